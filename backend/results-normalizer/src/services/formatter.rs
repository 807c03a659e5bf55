use crate::models::{QuestionType, RawSubmission};

use super::payload::{
    value_text, AnswerPayload, ChoiceAnswer, MatchLine, OrderingAnswer, StatementAnswer,
};

pub const NO_ANSWER_SELECTED: &str = "No answer selected";
pub const NO_MATCHING_PERFORMED: &str = "No matching performed";
pub const NOT_MATCHED: &str = "Not matched";
pub const NO_STATEMENT_ANSWERED: &str = "No answer provided";
pub const NO_TEXT_ANSWER: &str = "No textual answer";
pub const DATA_UNAVAILABLE: &str = "Data unavailable";
pub const NOT_COMPLETED: &str = "Not completed";
pub const NO_ANSWER_AVAILABLE: &str = "No answer available";

const MARK_CORRECT: &str = "✓";
const MARK_INCORRECT: &str = "✗";

/// Human-readable rendering of a submission's answer. Never empty.
pub fn format_answer(submission: &RawSubmission, question_type: &QuestionType) -> String {
    format_payload(&AnswerPayload::from_submission(submission, question_type))
}

pub fn format_payload(payload: &AnswerPayload) -> String {
    match payload {
        AnswerPayload::Choice(choice) => format_choice(choice),
        AnswerPayload::Matching(lines) => format_matching(lines),
        AnswerPayload::TrueFalse(statements) => format_statements(statements),
        AnswerPayload::Text(text) => match text {
            Some(answer) if !answer.is_empty() => answer.clone(),
            _ => NO_TEXT_ANSWER.to_string(),
        },
        AnswerPayload::Blanks(blanks) => match blanks {
            Some(entries) => non_empty(
                join_lines(entries.iter().map(|(key, value)| format!("Blank {key}: {value}"))),
                DATA_UNAVAILABLE,
            ),
            None => DATA_UNAVAILABLE.to_string(),
        },
        AnswerPayload::Ordering(ordering) => format_ordering(ordering),
        AnswerPayload::Unrecognised(value) => non_empty(
            value.as_ref().map(value_text).unwrap_or_default(),
            NO_ANSWER_AVAILABLE,
        ),
    }
}

fn format_choice(choice: &ChoiceAnswer) -> String {
    if choice.selected.is_empty() {
        return NO_ANSWER_SELECTED.to_string();
    }

    let labels: Vec<String> = match &choice.options {
        Some(options) => choice
            .selected
            .iter()
            .map(|selected| match selected.index {
                Some(idx) => options
                    .get(idx)
                    .cloned()
                    .flatten()
                    .unwrap_or_else(|| format!("Option {}", idx.saturating_add(1))),
                None => format!("Option {}", selected.raw),
            })
            .collect(),
        None => choice
            .selected
            .iter()
            .map(|selected| selected.raw.clone())
            .collect(),
    };

    non_empty(labels.join(", "), NO_ANSWER_SELECTED)
}

fn format_matching(lines: &[MatchLine]) -> String {
    if lines.is_empty() {
        return NO_MATCHING_PERFORMED.to_string();
    }

    join_lines(lines.iter().map(|line| {
        format!(
            "{} → {} {} (correct: {})",
            line.source,
            line.target.as_deref().unwrap_or(NOT_MATCHED),
            if line.is_correct {
                MARK_CORRECT
            } else {
                MARK_INCORRECT
            },
            line.correct_value.as_deref().unwrap_or("N/A"),
        )
    }))
}

fn format_statements(statements: &[StatementAnswer]) -> String {
    if statements.is_empty() {
        return NO_STATEMENT_ANSWERED.to_string();
    }

    join_lines(statements.iter().enumerate().map(|(i, statement)| {
        let label = statement
            .statement
            .clone()
            .unwrap_or_else(|| format!("Statement {}", i + 1));
        let answer = match statement.answer {
            Some(true) => "True",
            Some(false) => "False",
            None => "Not answered",
        };
        format!("{label}: {answer}")
    }))
}

fn format_ordering(ordering: &OrderingAnswer) -> String {
    if ordering.completed == Some(false) {
        return NOT_COMPLETED.to_string();
    }

    match &ordering.positions {
        Some(positions) => non_empty(
            join_lines(
                positions
                    .iter()
                    .map(|(item, position)| format!("{item}: Position {position}")),
            ),
            DATA_UNAVAILABLE,
        ),
        None => DATA_UNAVAILABLE.to_string(),
    }
}

fn join_lines(lines: impl Iterator<Item = String>) -> String {
    lines.collect::<Vec<_>>().join("\n")
}

fn non_empty(text: String, sentinel: &str) -> String {
    if text.trim().is_empty() {
        sentinel.to_string()
    } else {
        text
    }
}
