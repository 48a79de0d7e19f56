pub mod achievements;
pub mod data;
pub mod day_entries;
pub mod donations;
pub mod entries;
pub mod insights;
pub mod stats;

use axum::http::StatusCode;

use crate::engine::EngineError;

pub(crate) fn storage_error(e: EngineError) -> (StatusCode, String) {
    tracing::error!("❌ storage failure: {}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Storage error".into())
}
