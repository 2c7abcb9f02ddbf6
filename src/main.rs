mod config;
mod errors;
mod handlers;
mod models;
mod routes;
mod store;
mod utils;
mod wellness;
#[cfg(test)]
mod test_utils;

use actix_web::{web, App, HttpServer};
use actix_web_prom::PrometheusMetricsBuilder;
use dotenv::dotenv;
use std::sync::Arc;
use log::{error, info};
use env_logger::Env;
use actix_web::middleware::Logger;
use std::collections::HashMap;
use crate::config::{Config, StoreBackend};
use crate::store::{MemoryStore, MySqlStore, Store};

async fn build_store(config: &Config) -> std::io::Result<Arc<dyn Store>> {
    match (config.store_backend, &config.database) {
        (StoreBackend::MySql, Some(database)) => {
            let store = MySqlStore::connect(database).await.map_err(|e| {
                error!("Database connection failed: {}", e);
                std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
            })?;
            store.migrate().await.map_err(|e| {
                error!("Migrations failed: {}", e);
                std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
            })?;
            Ok(Arc::new(store))
        }
        (StoreBackend::MySql, None) => Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "MySQL backend selected without database settings",
        )),
        (StoreBackend::Memory, _) => {
            info!("Using in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let store = build_store(&config).await?;

    // Set up Prometheus metrics
    let mut labels = HashMap::new();
    labels.insert("app".to_string(), "healthtrack".to_string());
    let prometheus = PrometheusMetricsBuilder::new("api")
        .endpoint("/metrics")
        .const_labels(labels)
        .build()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let bind_address = config.bind_address.clone();
    let workers = config.workers;
    info!("Starting server at {} with {} workers", bind_address, workers);

    let config_data = web::Data::new(config);
    let store_data: web::Data<dyn Store> = web::Data::from(store);

    // Start the HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default()) // Logging middleware
            .wrap(prometheus.clone()) // Prometheus metrics middleware
            .app_data(config_data.clone())
            .app_data(store_data.clone())
            .configure(routes::configure)
    })
    .workers(workers)
    .bind(&bind_address)?
    .run()
    .await
}
