//! Typed answer payloads.
//!
//! Each question category has its own adapter that turns the untrusted
//! [`RawSubmission`] into a validated variant. All tolerance for missing or
//! oddly-typed fields lives here; formatting only ever sees these types.

use serde_json::{Map, Value};

use crate::metrics::record_anomaly;
use crate::models::submission::json_kind;
use crate::models::{QuestionType, RawSubmission};

#[derive(Debug, Clone, PartialEq)]
pub enum AnswerPayload {
    Choice(ChoiceAnswer),
    Matching(Vec<MatchLine>),
    TrueFalse(Vec<StatementAnswer>),
    Text(Option<String>),
    Blanks(Option<Vec<(String, String)>>),
    Ordering(OrderingAnswer),
    Unrecognised(Option<Value>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceAnswer {
    pub selected: Vec<SelectedOption>,
    /// Option labels by position, when the record carried an `options` list.
    pub options: Option<Vec<Option<String>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedOption {
    pub index: Option<usize>,
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchLine {
    pub source: String,
    pub target: Option<String>,
    pub is_correct: bool,
    pub correct_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatementAnswer {
    pub statement: Option<String>,
    pub answer: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderingAnswer {
    /// Only an explicit `false` marks the question as not completed.
    pub completed: Option<bool>,
    pub positions: Option<Vec<(String, String)>>,
}

impl AnswerPayload {
    pub fn from_submission(submission: &RawSubmission, question_type: &QuestionType) -> Self {
        match question_type {
            QuestionType::Qcm => AnswerPayload::Choice(parse_choice(submission)),
            QuestionType::Appariement => AnswerPayload::Matching(parse_matching(submission)),
            QuestionType::VraiFaux => AnswerPayload::TrueFalse(parse_statements(submission)),
            QuestionType::Texte | QuestionType::TexteLibre => {
                AnswerPayload::Text(parse_text(submission))
            }
            QuestionType::EspacesVides => {
                AnswerPayload::Blanks(parse_keyed_answers(submission, "blanks"))
            }
            QuestionType::Ordonner => AnswerPayload::Ordering(OrderingAnswer {
                completed: submission.get("completed").and_then(Value::as_bool),
                positions: parse_keyed_answers(submission, "ordering"),
            }),
            QuestionType::Unknown | QuestionType::Other(_) => AnswerPayload::Unrecognised(
                submission
                    .first_of(&["answers", "responses", "answer"])
                    .cloned(),
            ),
        }
    }
}

fn parse_choice(submission: &RawSubmission) -> ChoiceAnswer {
    let selected = match submission.get("answers") {
        Some(Value::Array(items)) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(selected_option)
            .collect(),
        Some(single @ (Value::Number(_) | Value::String(_))) => vec![selected_option(single)],
        Some(other) => {
            unexpected_shape("qcm", other);
            Vec::new()
        }
        None => Vec::new(),
    };

    let options = submission
        .array("options")
        .map(|options| options.iter().map(option_label).collect());

    ChoiceAnswer { selected, options }
}

fn selected_option(value: &Value) -> SelectedOption {
    let index = match value {
        Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<usize>().ok(),
        _ => None,
    };
    SelectedOption {
        index,
        raw: value_text(value),
    }
}

fn option_label(option: &Value) -> Option<String> {
    match option {
        Value::Object(fields) => fields
            .get("text")
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(str::to_string),
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        _ => None,
    }
}

fn parse_matching(submission: &RawSubmission) -> Vec<MatchLine> {
    let entries = submission
        .array("answers")
        .filter(|answers| !answers.is_empty())
        .or_else(|| submission.array("userMatches"))
        .or_else(|| submission.array("answers"));

    let Some(entries) = entries else {
        if let Some(other) = submission.get("answers") {
            unexpected_shape("appariement", other);
        }
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(Value::as_object)
        .map(|entry| {
            let correct_values = entry.get("correct_values").and_then(Value::as_array);
            let correct_value = correct_values
                .and_then(|values| {
                    values
                        .get(1)
                        .filter(|v| is_usable(v))
                        .or_else(|| values.first().filter(|v| is_usable(v)))
                })
                .map(value_text);

            MatchLine {
                source: entry
                    .get("option_gauche_id")
                    .map(value_text)
                    .unwrap_or_default(),
                target: first_text(entry, &["valeur_droite", "option_droite_id"]),
                is_correct: entry
                    .get("is_correct")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
                correct_value,
            }
        })
        .collect()
}

fn parse_statements(submission: &RawSubmission) -> Vec<StatementAnswer> {
    submission
        .array("responses")
        .map(|responses| {
            responses
                .iter()
                .map(|response| {
                    let fields = response.as_object();
                    StatementAnswer {
                        statement: fields
                            .and_then(|f| first_text(f, &["texte_option", "texte_reponse"])),
                        answer: fields
                            .and_then(|f| f.get("userAnswer"))
                            .and_then(Value::as_bool),
                    }
                })
                .collect()
        })
        .unwrap_or_default()
}

fn parse_text(submission: &RawSubmission) -> Option<String> {
    submission
        .get("answer")
        .map(value_text)
        .filter(|text| !text.is_empty())
}

fn parse_keyed_answers(submission: &RawSubmission, context: &str) -> Option<Vec<(String, String)>> {
    match submission.get("answers") {
        Some(Value::Object(map)) => Some(
            map.iter()
                .map(|(key, value)| (key.clone(), value_text(value)))
                .collect(),
        ),
        Some(other) => {
            unexpected_shape(context, other);
            None
        }
        None => None,
    }
}

fn first_text(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .map(value_text)
        .find(|text| !text.is_empty())
}

/// Null and empty strings carry no answer.
fn is_usable(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Plain text for scalars, compact JSON for containers, empty for null.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn unexpected_shape(context: &str, value: &Value) {
    tracing::warn!(
        "Unexpected answers shape for {} question: got {}",
        context,
        json_kind(value)
    );
    record_anomaly("unexpected_answers_shape");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value, question_type: QuestionType) -> AnswerPayload {
        AnswerPayload::from_submission(&RawSubmission::from_value(value), &question_type)
    }

    #[test]
    fn choice_indices_accept_numbers_and_strings() {
        let AnswerPayload::Choice(choice) = payload(
            json!({ "answers": [0, "2", "x", null], "options": [{ "text": "A" }, "B", {}] }),
            QuestionType::Qcm,
        ) else {
            panic!("expected choice payload");
        };

        let indices: Vec<_> = choice.selected.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![Some(0), Some(2), None]);
        assert_eq!(
            choice.options,
            Some(vec![Some("A".into()), Some("B".into()), None])
        );
    }

    #[test]
    fn matching_falls_back_to_user_matches() {
        let AnswerPayload::Matching(lines) = payload(
            json!({ "userMatches": [{ "option_gauche_id": 3, "valeur_droite": "Paris" }] }),
            QuestionType::Appariement,
        ) else {
            panic!("expected matching payload");
        };
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].source, "3");
        assert_eq!(lines[0].target.as_deref(), Some("Paris"));
        assert!(!lines[0].is_correct);
        assert_eq!(lines[0].correct_value, None);
    }

    #[test]
    fn correct_value_prefers_second_entry() {
        let AnswerPayload::Matching(lines) = payload(
            json!({ "answers": [
                { "option_gauche_id": "A", "correct_values": ["id-1", "Lyon"] },
                { "option_gauche_id": "B", "correct_values": ["Nice"] }
            ] }),
            QuestionType::Appariement,
        ) else {
            panic!("expected matching payload");
        };
        assert_eq!(lines[0].correct_value.as_deref(), Some("Lyon"));
        assert_eq!(lines[1].correct_value.as_deref(), Some("Nice"));
    }

    #[test]
    fn ordering_keeps_explicit_completion_flag() {
        let AnswerPayload::Ordering(order) = payload(
            json!({ "completed": false, "answers": { "b": 2, "a": 1 } }),
            QuestionType::Ordonner,
        ) else {
            panic!("expected ordering payload");
        };
        assert_eq!(order.completed, Some(false));
        // source key order is preserved
        assert_eq!(
            order.positions,
            Some(vec![("b".into(), "2".into()), ("a".into(), "1".into())])
        );
    }

    #[test]
    fn blanks_reject_non_mapping_answers() {
        assert_eq!(
            payload(json!({ "answers": ["x"] }), QuestionType::EspacesVides),
            AnswerPayload::Blanks(None)
        );
    }

    #[test]
    fn unknown_types_keep_first_present_field() {
        assert_eq!(
            payload(
                json!({ "responses": [1], "answer": "x" }),
                QuestionType::Other("SLIDER".into())
            ),
            AnswerPayload::Unrecognised(Some(json!([1])))
        );
        assert_eq!(
            payload(json!({ "answers": null }), QuestionType::Unknown),
            AnswerPayload::Unrecognised(None)
        );
    }
}
