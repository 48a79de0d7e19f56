use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
    extract::State,
    Json,
    http::StatusCode,
};
use chrono::Utc;
use uuid::Uuid;

use crate::engine::donations::NewDonation;
use crate::engine::SharedEngine;
use crate::models::{DonationStats, DonationTransaction};
use crate::routes::storage_error;

const CONFIRMATION_INTERVAL: Duration = Duration::from_secs(2);

pub fn routes(engine: SharedEngine) -> Router {
    Router::new()
        .route("/donation", post(create_donation))
        .route("/donations", get(get_donations))
        .route("/donation-stats", get(get_donation_stats))
        .with_state(engine)
}

async fn create_donation(
    State(engine): State<SharedEngine>,
    Json(body): Json<NewDonation>,
) -> Result<(StatusCode, Json<DonationTransaction>), (StatusCode, String)> {
    if body.amount == 0 {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            "amount must be positive".into(),
        ));
    }

    let tx = engine
        .lock()
        .await
        .create_donation(body, Utc::now())
        .map_err(storage_error)?;

    tokio::spawn(simulate_confirmations(engine.clone(), tx.id));

    Ok((StatusCode::CREATED, Json(tx)))
}

async fn get_donations(State(engine): State<SharedEngine>) -> Json<Vec<DonationTransaction>> {
    Json(engine.lock().await.donations().to_vec())
}

async fn get_donation_stats(State(engine): State<SharedEngine>) -> Json<DonationStats> {
    Json(engine.lock().await.donation_stats().clone())
}

/// Walks a transaction through its confirmations, one every two seconds,
/// the way a block explorer would see them trickle in.
async fn simulate_confirmations(engine: SharedEngine, id: Uuid) {
    let mut ticker = tokio::time::interval(CONFIRMATION_INTERVAL);
    ticker.tick().await; // the first tick completes immediately

    loop {
        ticker.tick().await;
        let more = match engine.lock().await.advance_donation(id) {
            Ok(more) => more,
            Err(e) => {
                tracing::error!("❌ failed to persist confirmation for {}: {}", id, e);
                false
            }
        };
        if !more {
            break;
        }
    }
}
