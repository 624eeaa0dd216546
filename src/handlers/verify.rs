// src/handlers/verify.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    models::activation_code::{CodeKind, normalize_code},
    store::CodeStore,
    utils::token::encode_session_token,
};

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyReason {
    NotFound,
    AlreadyUsed,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<VerifyReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Validates an activation code at session start.
///
/// Unknown and exhausted codes are normal negative outcomes carried in the
/// response body, not HTTP faults. A valid code earns a session token that
/// reversibly encodes the normalized code for the later redemption step.
pub async fn verify_code(
    State(store): State<CodeStore>,
    Json(payload): Json<VerifyRequest>,
) -> Result<impl IntoResponse, AppError> {
    let code = normalize_code(&payload.code);
    if code.is_empty() {
        return Err(AppError::BadRequest(
            "Activation code is required".to_string(),
        ));
    }

    let response = match store.find_by_code(&code).await? {
        None => VerifyResponse {
            valid: false,
            reason: Some(VerifyReason::NotFound),
            token: None,
        },
        Some(record) if record.kind == CodeKind::Normal && record.used_at.is_some() => {
            VerifyResponse {
                valid: false,
                reason: Some(VerifyReason::AlreadyUsed),
                token: None,
            }
        }
        Some(_) => VerifyResponse {
            valid: true,
            reason: None,
            token: Some(encode_session_token(&code)),
        },
    };

    Ok(Json(response))
}
