// src/handlers/admin.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::activation_code::{CodeKind, normalize_code},
    store::{CodeStats, CodeStore},
    utils::codegen,
};

/// Shared-secret check for the administrative surface.
fn require_secret(provided: Option<&str>, config: &Config) -> Result<(), AppError> {
    if provided != Some(config.admin_secret.as_str()) {
        return Err(AppError::Forbidden("Unauthorized access".to_string()));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub secret: Option<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: CodeStats,
    pub low_inventory: bool,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Returns redemption statistics plus a low-inventory flag.
/// Admin only (shared secret).
pub async fn get_stats(
    State(store): State<CodeStore>,
    State(config): State<Config>,
    Query(query): Query<StatsQuery>,
) -> Result<impl IntoResponse, AppError> {
    require_secret(query.secret.as_deref(), &config)?;

    let stats = store.stats().await.map_err(|e| {
        tracing::error!("Failed to compute code stats: {:?}", e);
        AppError::from(e)
    })?;

    let low_inventory = stats.remaining_normal < config.low_inventory_threshold;

    Ok(Json(StatsResponse {
        stats,
        low_inventory,
        timestamp: chrono::Utc::now(),
    }))
}

/// DTO for bulk code minting.
#[derive(Debug, Deserialize, Validate)]
pub struct MintCodesRequest {
    pub secret: String,
    #[validate(range(min = 1, max = 10000, message = "Count must be between 1 and 10000."))]
    pub count: u32,
    #[serde(default)]
    pub kind: Option<CodeKind>,
}

/// Mints a batch of fresh activation codes and inserts them atomically.
/// Admin only (shared secret). Returns the generated code strings so they
/// can be distributed.
pub async fn mint_codes(
    State(store): State<CodeStore>,
    State(config): State<Config>,
    Json(payload): Json<MintCodesRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_secret(Some(payload.secret.as_str()), &config)?;

    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let kind = payload.kind.unwrap_or(CodeKind::Normal);
    let codes = codegen::generate_batch(payload.count as usize)?;

    let records: Vec<(String, CodeKind)> = codes.iter().map(|c| (c.clone(), kind)).collect();
    store.batch_insert(&records).await.map_err(|e| {
        tracing::error!("Failed to insert code batch: {:?}", e);
        AppError::from(e)
    })?;

    tracing::info!("Minted {} activation codes", codes.len());

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "count": codes.len(),
            "codes": codes,
        })),
    ))
}

/// DTO for administrative upsert/reset of a single code.
#[derive(Debug, Deserialize)]
pub struct UpsertCodeRequest {
    pub secret: String,
    pub code: String,
    pub kind: CodeKind,
}

/// Creates a code or resets an existing one to unused with the given kind.
/// Admin only (shared secret). Idempotent.
pub async fn upsert_code(
    State(store): State<CodeStore>,
    State(config): State<Config>,
    Json(payload): Json<UpsertCodeRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_secret(Some(payload.secret.as_str()), &config)?;

    let code = normalize_code(&payload.code);
    if code.is_empty() {
        return Err(AppError::BadRequest(
            "Activation code is required".to_string(),
        ));
    }

    store.upsert(&code, payload.kind).await.map_err(|e| {
        tracing::error!("Failed to upsert code {}: {:?}", code, e);
        AppError::from(e)
    })?;

    Ok(Json(serde_json::json!({ "code": code })))
}
