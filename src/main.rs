use axum::{routing::get, Router};
use dotenvy::dotenv;
use std::{env, net::SocketAddr, sync::Arc};
use tokio::sync::Mutex;
use anyhow::Result;

mod clock;
mod engine;
mod models;
mod routes;
mod store;

use clock::SystemClock;
use engine::{Engine, SharedEngine};
use store::FileStore;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let data_dir = env::var("REUSE_DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let store = FileStore::open(&data_dir)?;
    let engine = Engine::load(Box::new(store), Box::new(SystemClock))?;
    let engine: SharedEngine = Arc::new(Mutex::new(engine));

    let app = Router::new()
        .merge(routes::entries::routes(engine.clone()))
        .merge(routes::day_entries::routes(engine.clone()))
        .merge(routes::stats::routes(engine.clone()))
        .merge(routes::achievements::routes(engine.clone()))
        .merge(routes::insights::routes(engine.clone()))
        .merge(routes::donations::routes(engine.clone()))
        .merge(routes::data::routes(engine.clone()))
        .route("/health", get(|| async { "✅ Backend up" }));

    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3060);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("🌸 ReUse+ backend running at {}", addr);

    axum::serve(
        tokio::net::TcpListener::bind(addr).await?,
        app.into_make_service(),
    )
    .await?;

    Ok(())
}
