use std::error::Error;

use anyhow::Context;
use crate::config::load_config;
use infra::{devfile::YamlDevfileParser, web::router};
use log::info;
use tokio::net::TcpListener;

mod config;
mod domain;
mod infra;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Start devstub - component detection for devfile and Dockerfile scans");

    let config = load_config()?;
    info!("Loaded config {:?}", config);

    let service = domain::DetectionService {
        devfile_parser: Box::new(YamlDevfileParser),
        application_placeholder: config.application_placeholder.clone(),
    };

    let listener = TcpListener::bind(&config.listen_address)
        .await
        .context(format!("Can't listen on {}", config.listen_address))?;
    axum::serve(listener, router(service)).await?;
    Ok(())
}
