use axum::{
    Router,
    routing::{get, post},
    extract::State,
    Json,
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::engine::cycles::CloseError;
use crate::engine::{EngineError, RecomputeOutcome, SharedEngine};
use crate::models::{Cycle, Flow, PeriodEntry};
use crate::routes::storage_error;

#[derive(Deserialize)]
pub struct NewPeriodEntry {
    pub id: Option<Uuid>,
    pub date: NaiveDate,
    pub flow: Flow,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub mood: String,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct DeleteEntryRequest {
    pub id: Uuid,
}

#[derive(Deserialize)]
pub struct CloseCycleRequest {
    pub cycle_id: Uuid,
    pub end_date: Option<NaiveDate>,
}

pub fn routes(engine: SharedEngine) -> Router {
    Router::new()
        .route("/period-entry", post(save_period_entry).delete(delete_period_entry))
        .route("/cycles", get(get_cycles))
        .route("/cycle/close", post(close_cycle))
        .with_state(engine)
}

async fn save_period_entry(
    State(engine): State<SharedEngine>,
    Json(body): Json<NewPeriodEntry>,
) -> Result<Json<RecomputeOutcome>, (StatusCode, String)> {
    let entry = PeriodEntry {
        id: body.id.unwrap_or_else(Uuid::new_v4),
        date: body.date,
        flow: body.flow,
        symptoms: body.symptoms,
        mood: body.mood,
        notes: body.notes,
    };

    let outcome = engine
        .lock()
        .await
        .save_period_entry(entry)
        .map_err(storage_error)?;
    Ok(Json(outcome))
}

// Unknown ids fall through to 204 as well; delete is deliberately
// permissive.
async fn delete_period_entry(
    State(engine): State<SharedEngine>,
    Json(body): Json<DeleteEntryRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    engine
        .lock()
        .await
        .delete_period_entry(body.id)
        .map_err(storage_error)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_cycles(
    State(engine): State<SharedEngine>,
) -> Json<Vec<Cycle>> {
    Json(engine.lock().await.cycles().to_vec())
}

async fn close_cycle(
    State(engine): State<SharedEngine>,
    Json(body): Json<CloseCycleRequest>,
) -> Result<Json<RecomputeOutcome>, (StatusCode, String)> {
    match engine.lock().await.close_cycle(body.cycle_id, body.end_date) {
        Ok(outcome) => Ok(Json(outcome)),
        Err(EngineError::Close(CloseError::NotFound(_))) => {
            Err((StatusCode::NOT_FOUND, "No such cycle".into()))
        }
        Err(EngineError::Close(CloseError::AlreadyClosed(_))) => {
            Err((StatusCode::CONFLICT, "Cycle already closed".into()))
        }
        Err(EngineError::Close(CloseError::EndBeforeStart)) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            "End date precedes the cycle start".into(),
        )),
        Err(e) => Err(storage_error(e)),
    }
}
