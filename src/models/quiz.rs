// src/models/quiz.rs

use std::collections::HashMap;

use serde::Deserialize;

/// The full quiz document loaded from disk at startup.
///
/// The scoring engine only consumes `dimensions`, `questions` and `scoring`;
/// `results` is opaque per-category content passed back to the client
/// verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizBank {
    /// Dimension keys in declaration order. This order is the tie-break for
    /// equally-scored dimensions and must stay stable across releases.
    pub dimensions: Vec<String>,

    pub questions: Vec<Question>,

    pub scoring: ScoringConfig,

    /// Static descriptive content per result category (title, narrative,
    /// advice...). Never inspected by the engine.
    #[serde(default)]
    pub results: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: Vec<AnswerOption>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerOption {
    pub key: String,
    pub text: String,
    /// Dimension this option awards points to.
    pub dimension: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Points awarded per matched option.
    pub option_points: u32,

    pub balanced_rule: BalancedRule,

    /// Ordered rule list; the first matching rule wins, so the order of
    /// entries in the quiz document is significant.
    pub result_mapping: Vec<MappingRule>,

    /// Top-1 dimension -> category, used only when no mapping rule matches.
    pub fallback: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BalancedRule {
    pub enabled: bool,
    /// Spread threshold: the rule fires when max score - min score <= this.
    pub max_minus_min_lte: u32,
    pub result_if_balanced: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MappingRule {
    pub when: RuleWhen,
    pub result: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuleWhen {
    #[serde(default)]
    pub top1: Option<String>,
    #[serde(default)]
    pub top2: Option<String>,
}

impl QuizBank {
    /// Reads and parses the quiz document from `path`.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let raw = std::fs::read_to_string(path)?;
        let bank: QuizBank = serde_json::from_str(&raw)?;
        Ok(bank)
    }
}
