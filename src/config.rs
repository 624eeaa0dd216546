// src/config.rs

use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub admin_secret: String,
    pub quiz_data_path: String,
    /// Optional admin code seeded (upserted) at startup.
    pub admin_code: Option<String>,
    /// Stats report low inventory when remaining normal codes drop below this.
    pub low_inventory_threshold: i64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let admin_secret = env::var("ADMIN_SECRET").expect("ADMIN_SECRET must be set");

        let quiz_data_path =
            env::var("QUIZ_DATA_PATH").unwrap_or_else(|_| "data/quiz.json".to_string());

        let admin_code = env::var("ADMIN_CODE").ok().filter(|c| !c.trim().is_empty());

        let low_inventory_threshold = env::var("LOW_INVENTORY_THRESHOLD")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1000);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            database_url,
            admin_secret,
            quiz_data_path,
            admin_code,
            low_inventory_threshold,
            rust_log,
        }
    }
}
