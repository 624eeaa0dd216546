// src/handlers/submit.rs

use std::collections::HashMap;
use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;

use crate::{
    error::AppError,
    models::{
        activation_code::{CodeKind, normalize_code},
        quiz::QuizBank,
    },
    scoring,
    store::CodeStore,
    utils::token::decode_session_token,
};

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    /// question id -> chosen option key
    pub answers: HashMap<String, String>,
    #[serde(default)]
    pub token: Option<String>,
}

/// Classifies a completed answer set and redeems the session's code.
///
/// Redemption is best-effort: the user gets their result even when the code
/// cannot be marked used, and the failure surfaces only as `redeemed: false`
/// plus a log line.
pub async fn submit_quiz(
    State(store): State<CodeStore>,
    State(quiz): State<Arc<QuizBank>>,
    Json(payload): Json<SubmitRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.answers.is_empty() {
        return Err(AppError::BadRequest("No answers submitted".to_string()));
    }

    let outcome = scoring::score(&payload.answers, &quiz);

    let mut redeemed = false;
    if let Some(token) = payload.token.as_deref() {
        redeemed = redeem_best_effort(&store, token).await;
    }

    let result = quiz.results.get(&outcome.category).cloned();

    Ok(Json(serde_json::json!({
        "category": outcome.category,
        "scores": outcome.scores,
        "result": result,
        "redeemed": redeemed,
    })))
}

/// Attempts to redeem the code carried by a session token.
/// Only existing normal codes are eligible; every failure mode is logged and
/// reported as `false` instead of propagating.
async fn redeem_best_effort(store: &CodeStore, token: &str) -> bool {
    let Some(raw) = decode_session_token(token) else {
        tracing::warn!("Received malformed session token, skipping redemption");
        return false;
    };
    let code = normalize_code(&raw);

    match store.find_by_code(&code).await {
        Ok(Some(record)) if record.kind == CodeKind::Normal => match store.redeem(&code).await {
            Ok(true) => true,
            Ok(false) => {
                tracing::warn!("Activation code {} was already consumed", code);
                false
            }
            Err(e) => {
                tracing::warn!("Best-effort redemption failed for {}: {:?}", code, e);
                false
            }
        },
        Ok(_) => false,
        Err(e) => {
            tracing::warn!("Lookup during redemption failed for {}: {:?}", code, e);
            false
        }
    }
}
