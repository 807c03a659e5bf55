use crate::metrics::{record_anomaly, record_normalized};
use crate::models::{NormalizedResponse, RawSubmission};
use crate::utils::numeric::{is_unparsable, parse_or_zero};

use super::classifier::{classify_type, refine_display_type};
use super::formatter::format_answer;

/// Share of the maximum score at which an answer counts as correct.
pub const PASS_RATIO: f64 = 0.7;

/// Lower bound for `max_score`, which also keeps the percentage finite.
pub const MIN_MAX_SCORE: f64 = 1.0;

/// Builds the display model for one raw submission.
///
/// Pure apart from diagnostics: the same input always yields the same output.
pub fn normalize(submission: &RawSubmission) -> NormalizedResponse {
    let question_type = classify_type(submission.type_tag());
    let display_type = refine_display_type(submission);

    if display_type != question_type {
        tracing::debug!(
            "Payload shape refined {} to {} for question '{}'",
            question_type,
            display_type,
            submission.question_id()
        );
    }

    for (field, value) in [("score", submission.score()), ("maxScore", submission.max_score())] {
        if is_unparsable(value) {
            tracing::warn!("Non-numeric {} treated as zero: {:?}", field, value);
            record_anomaly("non_numeric_score");
        }
    }

    let (score, max_score) = score_pair(submission);
    let formatted_answer = format_answer(submission, &display_type);

    record_normalized(display_type.as_str());

    NormalizedResponse {
        question_id: submission.question_id(),
        question_text: submission.question_text(),
        question_type,
        display_type,
        score,
        max_score,
        percentage: score / max_score * 100.0,
        is_correct: is_passing(score, max_score),
        formatted_answer,
    }
}

/// Order-preserving batch form of [`normalize`].
pub fn normalize_all(submissions: &[RawSubmission]) -> Vec<NormalizedResponse> {
    submissions.iter().map(normalize).collect()
}

fn score_pair(submission: &RawSubmission) -> (f64, f64) {
    let score = parse_or_zero(submission.score());
    let max_score = parse_or_zero(submission.max_score());
    let max_score = if max_score < MIN_MAX_SCORE {
        MIN_MAX_SCORE
    } else {
        max_score
    };
    (score, max_score)
}

pub fn is_passing(score: f64, max_score: f64) -> bool {
    score >= max_score * PASS_RATIO
}
