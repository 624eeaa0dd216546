// src/scoring.rs

use std::collections::HashMap;

use serde::Serialize;

use crate::models::quiz::QuizBank;

/// Points accumulated by one dimension, reported in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreEntry {
    pub dimension: String,
    pub points: u32,
}

/// Result of classifying one answer set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreOutcome {
    pub category: String,
    pub scores: Vec<ScoreEntry>,
}

/// Classifies a completed answer set into a result category.
///
/// Pure function: no I/O, no clock, no randomness. Identical answers against
/// an identical bank always yield the identical outcome.
///
/// Answers referencing unknown question ids or option keys are skipped, so a
/// partial or malformed submission still classifies instead of failing.
/// Dimensions with equal scores rank in the order they are declared in the
/// bank; this is the intentional, documented tie-break.
pub fn score(answers: &HashMap<String, String>, bank: &QuizBank) -> ScoreOutcome {
    let mut points = vec![0u32; bank.dimensions.len()];
    let dim_index: HashMap<&str, usize> = bank
        .dimensions
        .iter()
        .enumerate()
        .map(|(i, d)| (d.as_str(), i))
        .collect();

    for (question_id, option_key) in answers {
        let Some(question) = bank.questions.iter().find(|q| &q.id == question_id) else {
            continue;
        };
        let Some(option) = question.options.iter().find(|o| &o.key == option_key) else {
            continue;
        };
        if let Some(&i) = dim_index.get(option.dimension.as_str()) {
            points[i] += bank.scoring.option_points;
        }
    }

    let category = classify(&points, bank);

    let scores = bank
        .dimensions
        .iter()
        .zip(&points)
        .map(|(dimension, &points)| ScoreEntry {
            dimension: dimension.clone(),
            points,
        })
        .collect();

    ScoreOutcome { category, scores }
}

/// Maps a score vector onto a category: balance rule first, then the ordered
/// rule list (first match wins), then the top-1 fallback table. Total for any
/// non-empty dimension set.
fn classify(points: &[u32], bank: &QuizBank) -> String {
    let scoring = &bank.scoring;

    // Rank by score descending; ties keep declaration order.
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| points[b].cmp(&points[a]).then(a.cmp(&b)));

    let Some(&top_idx) = order.first() else {
        // Empty dimension set; nothing to rank.
        return scoring.balanced_rule.result_if_balanced.clone();
    };
    let top1 = bank.dimensions[top_idx].as_str();
    let top2 = order.get(1).map(|&i| bank.dimensions[i].as_str());

    let rule = &scoring.balanced_rule;
    if rule.enabled {
        let max = points[top_idx];
        let min = points[*order.last().unwrap_or(&top_idx)];
        if max - min <= rule.max_minus_min_lte {
            return rule.result_if_balanced.clone();
        }
    }

    for mapping in &scoring.result_mapping {
        if let Some(required) = &mapping.when.top1 {
            if required != top1 {
                continue;
            }
        }
        if let Some(required) = &mapping.when.top2 {
            if top2 != Some(required.as_str()) {
                continue;
            }
        }
        return mapping.result.clone();
    }

    scoring
        .fallback
        .get(top1)
        .cloned()
        .unwrap_or_else(|| rule.result_if_balanced.clone())
}
