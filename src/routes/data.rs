use axum::{
    Router,
    routing::{delete, get},
    extract::State,
    Json,
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::engine::SharedEngine;
use crate::models::{Achievement, Cycle, DayEntry, Insight, UserStats};
use crate::routes::storage_error;

#[derive(Serialize)]
struct DataExport {
    cycles: Vec<Cycle>,
    day_entries: Vec<DayEntry>,
    user_stats: UserStats,
    achievements: Vec<Achievement>,
    insights: Vec<Insight>,
    export_date: DateTime<Utc>,
}

pub fn routes(engine: SharedEngine) -> Router {
    Router::new()
        .route("/export", get(export_data))
        .route("/data", delete(clear_data))
        .with_state(engine)
}

async fn export_data(State(engine): State<SharedEngine>) -> Json<DataExport> {
    let engine = engine.lock().await;
    Json(DataExport {
        cycles: engine.cycles().to_vec(),
        day_entries: engine.day_entries().to_vec(),
        user_stats: engine.stats().clone(),
        achievements: engine.achievements().to_vec(),
        insights: engine.insights().to_vec(),
        export_date: Utc::now(),
    })
}

async fn clear_data(
    State(engine): State<SharedEngine>,
) -> Result<StatusCode, (StatusCode, String)> {
    engine.lock().await.clear_data().map_err(storage_error)?;
    tracing::info!("🧹 all tracked data cleared");
    Ok(StatusCode::NO_CONTENT)
}
