use axum::body::Bytes;
use serde_json::Value;

use crate::error::AppError;

pub const KEYWORD: &str = "keyword";

/// Pulls `keyword` out of a search request. The field itself is optional, the JSON is not.
pub fn keyword_from_body(body: &Bytes) -> Result<Option<Value>, AppError> {
    let payload: Value = serde_json::from_slice(body).map_err(|_| AppError::MalformedPayload)?;

    // nothing to destructure
    if payload.is_null() {
        return Err(AppError::MalformedPayload);
    }

    Ok(payload.get(KEYWORD).cloned())
}
