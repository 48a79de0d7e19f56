use axum::{
    Router,
    routing::{get, post},
    extract::State,
    Json,
    http::StatusCode,
};

use crate::engine::SharedEngine;
use crate::models::Insight;
use crate::routes::storage_error;

pub fn routes(engine: SharedEngine) -> Router {
    Router::new()
        .route("/insights", get(get_insights))
        .route("/insights/refresh", post(refresh_insights))
        .with_state(engine)
}

async fn get_insights(State(engine): State<SharedEngine>) -> Json<Vec<Insight>> {
    Json(engine.lock().await.insights().to_vec())
}

async fn refresh_insights(
    State(engine): State<SharedEngine>,
) -> Result<Json<Vec<Insight>>, (StatusCode, String)> {
    let insights = engine
        .lock()
        .await
        .refresh_insights()
        .map_err(storage_error)?;
    Ok(Json(insights))
}
