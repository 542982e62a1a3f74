use actix_web::web::{Data, Json};
use log::{error, warn};

use super::dto::{
    PredictGarageRequest, PredictGarageResponse, PredictNoteRequest, PredictNoteResponse,
    PredictYearRequest, PredictYearResponse, TrainResponse, TRAINED_MESSAGE,
};
use crate::{error::ServiceErr, service::ModelService};

type HandlerResult<T> = Result<Json<T>, ServiceErr>;

fn report(route: &str, e: &ServiceErr) {
    if e.is_client_error() {
        warn!("{route} rejected: {e}");
    } else {
        error!("{route} failed: {e}");
    }
}

pub async fn train(service: Data<ModelService>) -> HandlerResult<TrainResponse> {
    service
        .train()
        .await
        .inspect_err(|e| report("/train", e))?;

    Ok(Json(TrainResponse {
        message: TRAINED_MESSAGE.to_string(),
    }))
}

pub async fn predict_note(
    service: Data<ModelService>,
    body: Json<PredictNoteRequest>,
) -> HandlerResult<PredictNoteResponse> {
    let PredictNoteRequest {
        city,
        surface,
        price,
    } = body.into_inner();

    let predicted_note = service
        .predict_rating(&city, surface, price)
        .await
        .inspect_err(|e| report("/predict-note", e))?;

    Ok(Json(PredictNoteResponse { predicted_note }))
}

pub async fn predict_year(
    service: Data<ModelService>,
    body: Json<PredictYearRequest>,
) -> HandlerResult<PredictYearResponse> {
    let prediction = service
        .predict_year(&body.city)
        .await
        .inspect_err(|e| report("/predict-year", e))?;

    Ok(Json(PredictYearResponse {
        predicted_year: prediction.year,
        r2: prediction.r2,
        rmse: prediction.rmse,
    }))
}

pub async fn predict_garage(
    service: Data<ModelService>,
    body: Json<PredictGarageRequest>,
) -> HandlerResult<PredictGarageResponse> {
    let predicted_garage = service
        .predict_garage(&body.city, body.price)
        .await
        .inspect_err(|e| report("/predict-garage", e))?;

    Ok(Json(PredictGarageResponse { predicted_garage }))
}
