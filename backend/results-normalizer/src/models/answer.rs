use serde::{Deserialize, Serialize};

use super::question::QuestionType;

/// Display model for one submission, rebuilt from source data on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResponse {
    pub question_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_text: Option<String>,
    pub question_type: QuestionType,
    pub display_type: QuestionType,
    pub score: f64,
    /// Always at least 1.
    pub max_score: f64,
    pub percentage: f64,
    pub is_correct: bool,
    pub formatted_answer: String,
}
