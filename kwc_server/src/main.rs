//! This crate implements an HTTP server serving Kraków's waste collection
//! schedules as downloadable iCalendar files.
//!
//! Street data is read from a local directory laid out as
//! `<data dir>/<year>/street-<index>.json` plus a `street-index.json` per
//! year; the raw files are also served under `/api` for the web frontend.
//! The calendar path and query string are
//! `/calendar?year=<year>&street=<file_index>&schedule=<id>`.

use std::{net::SocketAddr, path::PathBuf};

use axum::{routing::get, Router};
use tower_http::services::ServeDir;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod route;

#[derive(Debug, Clone)]
pub struct AppState {
    pub data_dir: PathBuf,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kwc_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let data_dir =
        PathBuf::from(std::env::var("KWC_DATA_DIR").unwrap_or_else(|_| String::from("data")));
    info!("serving street data from {}", data_dir.display());

    let app = Router::new()
        .route("/calendar", get(route::calendar::handler))
        .route("/calendar/mixed", get(route::calendar::mixed::handler))
        .route("/calendar/paper", get(route::calendar::paper::handler))
        .route("/calendar/plastic", get(route::calendar::plastic::handler))
        .route("/calendar/glass", get(route::calendar::glass::handler))
        .route("/calendar/bio", get(route::calendar::bio::handler))
        .route("/calendar/barrel", get(route::calendar::barrel::handler))
        .nest_service("/api", ServeDir::new(&data_dir))
        .with_state(AppState { data_dir });
    let addr = SocketAddr::from(([0, 0, 0, 0], 8008));
    info!("listening on {addr}");
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}
