use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::answer::NormalizedResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreClass {
    Excellent,
    Good,
    Average,
    Poor,
    Neutral,
}

impl ScoreClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreClass::Excellent => "excellent",
            ScoreClass::Good => "good",
            ScoreClass::Average => "average",
            ScoreClass::Poor => "poor",
            ScoreClass::Neutral => "neutral",
        }
    }
}

/// Totals over every final-test entry of a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalTestSummary {
    pub total_score: f64,
    pub total_possible: f64,
    /// `None` when nothing was possible to score.
    pub average_percentage: Option<f64>,
    pub completed_count: usize,
}

/// One final-test entry with its submissions normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalTestReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub score: f64,
    pub total: f64,
    pub percentage: Option<f64>,
    pub score_class: ScoreClass,
    pub question_count: usize,
    pub correct_count: usize,
    pub responses: Vec<NormalizedResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResults {
    pub candidate_id: String,
    pub generated_at: DateTime<Utc>,
    pub tests: Vec<FinalTestReport>,
    pub summary: FinalTestSummary,
}
