use axum::{Router, routing::get, extract::State, Json};

use crate::engine::SharedEngine;
use crate::models::Achievement;

pub fn routes(engine: SharedEngine) -> Router {
    Router::new()
        .route("/achievements", get(get_achievements))
        .with_state(engine)
}

async fn get_achievements(State(engine): State<SharedEngine>) -> Json<Vec<Achievement>> {
    Json(engine.lock().await.achievements().to_vec())
}
