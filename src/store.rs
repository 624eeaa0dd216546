// src/store.rs

use chrono::Utc;
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::models::activation_code::{ActivationCode, CodeKind};

/// Aggregate counters over the activation_codes table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeStats {
    pub total: i64,
    pub used_count: i64,
    /// Normal codes not yet redeemed.
    pub remaining_normal: i64,
    pub admin_count: i64,
    /// used / normal * 100, or 0.0 when no normal codes exist.
    pub usage_rate_percent: f64,
}

/// Raw counter row for the stats query.
#[derive(FromRow)]
struct StatsRow {
    total: i64,
    used_count: i64,
    normal_count: i64,
    admin_count: i64,
}

/// Persistence layer for activation codes.
///
/// Constructed once at startup around the shared pool and handed to handlers
/// through `AppState`. All conflicting updates to the same row are serialized
/// here via guarded UPDATE statements; callers never need their own locking.
#[derive(Clone)]
pub struct CodeStore {
    pool: SqlitePool,
}

impl CodeStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Exact-match lookup on the canonical code string.
    /// A miss is a normal outcome, not an error.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<ActivationCode>, sqlx::Error> {
        sqlx::query_as::<_, ActivationCode>(
            "SELECT id, code, kind, used_at, created_at FROM activation_codes WHERE code = ?1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
    }

    /// Marks a normal, unused code as redeemed.
    ///
    /// The precondition lives in the WHERE clause, so under concurrent calls
    /// for the same code exactly one caller observes the transition. Returns
    /// whether a row changed; already-used, admin and missing codes are
    /// no-ops (`false`).
    pub async fn redeem(&self, code: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE activation_codes SET used_at = ?1 \
             WHERE code = ?2 AND kind = 'normal' AND used_at IS NULL",
        )
        .bind(Utc::now())
        .bind(code)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Inserts a batch of codes in a single transaction.
    ///
    /// Codes already present are silently skipped. On failure nothing from
    /// the batch is persisted.
    pub async fn batch_insert(&self, records: &[(String, CodeKind)]) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        for (code, kind) in records {
            sqlx::query(
                "INSERT INTO activation_codes (code, kind, created_at) VALUES (?1, ?2, ?3) \
                 ON CONFLICT(code) DO NOTHING",
            )
            .bind(code)
            .bind(*kind)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await
    }

    /// Creates the code if absent; otherwise overwrites its kind and resets
    /// it to unused. Idempotent, used for administrative seeding and resets.
    pub async fn upsert(&self, code: &str, kind: CodeKind) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO activation_codes (code, kind, created_at) VALUES (?1, ?2, ?3) \
             ON CONFLICT(code) DO UPDATE SET kind = excluded.kind, used_at = NULL",
        )
        .bind(code)
        .bind(kind)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Aggregate redemption statistics, computed in one pass.
    pub async fn stats(&self) -> Result<CodeStats, sqlx::Error> {
        let row = sqlx::query_as::<_, StatsRow>(
            "SELECT \
                COUNT(*) AS total, \
                COALESCE(SUM(CASE WHEN used_at IS NOT NULL THEN 1 ELSE 0 END), 0) AS used_count, \
                COALESCE(SUM(CASE WHEN kind = 'normal' THEN 1 ELSE 0 END), 0) AS normal_count, \
                COALESCE(SUM(CASE WHEN kind = 'admin' THEN 1 ELSE 0 END), 0) AS admin_count \
             FROM activation_codes",
        )
        .fetch_one(&self.pool)
        .await?;

        let usage_rate_percent = if row.normal_count > 0 {
            row.used_count as f64 / row.normal_count as f64 * 100.0
        } else {
            0.0
        };

        Ok(CodeStats {
            total: row.total,
            used_count: row.used_count,
            remaining_normal: row.normal_count - row.used_count,
            admin_count: row.admin_count,
            usage_rate_percent,
        })
    }
}
