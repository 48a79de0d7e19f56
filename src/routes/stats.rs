use axum::{Router, routing::get, extract::State, Json};

use crate::engine::SharedEngine;
use crate::models::UserStats;

pub fn routes(engine: SharedEngine) -> Router {
    Router::new()
        .route("/stats", get(get_stats))
        .with_state(engine)
}

async fn get_stats(State(engine): State<SharedEngine>) -> Json<UserStats> {
    Json(engine.lock().await.stats().clone())
}
