// src/models/activation_code.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Kind of an activation code.
///
/// `Normal` codes are single-use; `Admin` codes always validate and are
/// never marked as used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum CodeKind {
    Normal,
    Admin,
}

/// Represents the 'activation_codes' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivationCode {
    pub id: i64,

    /// Canonical uppercase code string, e.g. "CAT-A7QX-M3KP". Unique.
    pub code: String,

    /// 'normal' or 'admin'.
    pub kind: CodeKind,

    /// Set exactly once, when a normal code is redeemed.
    pub used_at: Option<chrono::DateTime<chrono::Utc>>,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Canonical form of a code as stored and compared: trimmed and uppercased.
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}
