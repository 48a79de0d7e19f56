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

use crate::engine::{RecomputeOutcome, SharedEngine};
use crate::models::DayEntry;
use crate::routes::storage_error;

#[derive(Deserialize)]
pub struct NewDayEntry {
    pub id: Option<Uuid>,
    pub date: NaiveDate,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub mood: String,
    pub energy: u8,
    pub sleep: f32,
    pub water: u8,
    #[serde(default)]
    pub exercise: bool,
    pub notes: Option<String>,
}

fn validate(body: &NewDayEntry) -> Result<(), String> {
    if !(1..=5).contains(&body.energy) {
        return Err("energy must be between 1 and 5".into());
    }
    if !(0.0..=12.0).contains(&body.sleep) {
        return Err("sleep must be between 0 and 12 hours".into());
    }
    if body.water > 15 {
        return Err("water must be between 0 and 15 glasses".into());
    }
    Ok(())
}

pub fn routes(engine: SharedEngine) -> Router {
    Router::new()
        .route("/day-entry", post(save_day_entry))
        .route("/day-entries", get(get_day_entries))
        .with_state(engine)
}

async fn save_day_entry(
    State(engine): State<SharedEngine>,
    Json(body): Json<NewDayEntry>,
) -> Result<Json<RecomputeOutcome>, (StatusCode, String)> {
    validate(&body).map_err(|msg| (StatusCode::UNPROCESSABLE_ENTITY, msg))?;

    let entry = DayEntry {
        id: body.id.unwrap_or_else(Uuid::new_v4),
        date: body.date,
        symptoms: body.symptoms,
        mood: body.mood,
        energy: body.energy,
        sleep: body.sleep,
        water: body.water,
        exercise: body.exercise,
        notes: body.notes,
    };

    let outcome = engine
        .lock()
        .await
        .save_day_entry(entry)
        .map_err(storage_error)?;
    Ok(Json(outcome))
}

async fn get_day_entries(
    State(engine): State<SharedEngine>,
) -> Json<Vec<DayEntry>> {
    Json(engine.lock().await.day_entries().to_vec())
}
