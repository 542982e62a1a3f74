pub mod dto;
mod handlers;

use actix_web::{error::InternalError, web, HttpResponse};
use log::warn;

use crate::error::ErrorBody;

/// Malformed or mistyped JSON bodies are answered with 422 and a `detail` message.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        let detail = err.to_string();
        warn!("{} rejected body: {detail}", req.path());

        let response = HttpResponse::UnprocessableEntity().json(ErrorBody { detail });
        InternalError::from_response(err, response).into()
    })
}

/// Registers the train and predict routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/train", web::post().to(handlers::train))
        .route("/predict-note", web::post().to(handlers::predict_note))
        .route("/predict-year", web::post().to(handlers::predict_year))
        .route("/predict-garage", web::post().to(handlers::predict_garage));
}
