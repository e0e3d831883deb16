mod config;
mod cv;
mod errors;
mod mail;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::cv::service::CvService;
use crate::cv::source::source_for_path;
use crate::cv::store::CvStore;
use crate::mail::MailClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Chat API v{}", env!("CARGO_PKG_VERSION"));

    // The CV is loaded lazily on the first question, not here.
    let source = source_for_path(&config.cv_source_path);
    let store = CvStore::new(&config.cv_cache_path);
    info!(
        "CV source: {}, cache: {}",
        source.describe(),
        store.path().display()
    );
    let cv = Arc::new(CvService::new(store, source));

    let mailer = match &config.resend_api_key {
        Some(key) => Some(MailClient::new(key.clone(), config.mail_from.clone())?),
        None => {
            warn!("RESEND_API_KEY not set; the email endpoint will report failures");
            None
        }
    };

    let state = AppState { cv, mailer };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
