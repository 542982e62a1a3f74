use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::info;

use housing_models::{http, ModelService, ServiceConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = ServiceConfig::from_env()?;
    let service = web::Data::new(ModelService::from_config(&config));
    info!("serving models for {}", service.dataset_path().display());

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(service.clone())
            .configure(http::configure)
    });
    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    let (host, port) = config.bind_addr();
    let server = server.bind((host.as_str(), port))?;
    info!("listening at {host}:{port}");

    server.run().await?;
    info!("wrapping up, shutting down...");

    Ok(())
}
