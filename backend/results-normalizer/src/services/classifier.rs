use serde_json::Value;

use crate::models::{QuestionType, RawSubmission};

/// Maps a free-text type tag onto a question category.
///
/// Rules are checked in priority order and the first match wins, so a tag
/// such as `multi_vrai_faux` never reaches the passthrough fallback.
pub fn classify_type(raw_type: Option<&str>) -> QuestionType {
    let Some(raw) = raw_type else {
        return QuestionType::Unknown;
    };
    let tag = raw.to_lowercase();

    if contains_any(&tag, &["qcm", "multiple-choice"]) {
        QuestionType::Qcm
    } else if contains_any(&tag, &["appariement", "matching"]) {
        QuestionType::Appariement
    } else if contains_any(&tag, &["texte", "text"]) || tag == "libre" {
        QuestionType::Texte
    } else if contains_any(&tag, &["vrai_faux", "vrai-faux", "multi_vrai_faux"]) {
        QuestionType::VraiFaux
    } else if contains_any(&tag, &["espaces", "vides"]) {
        QuestionType::EspacesVides
    } else if tag.contains("ordonner") {
        QuestionType::Ordonner
    } else {
        QuestionType::passthrough(raw)
    }
}

fn contains_any(tag: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| tag.contains(keyword))
}

/// Payload shape is a stronger signal than the tag, so it is checked first.
pub fn refine_display_type(submission: &RawSubmission) -> QuestionType {
    if submission.array("correctIndices").is_some() {
        return QuestionType::Qcm;
    }

    let answers_look_matched = submission
        .array("answers")
        .and_then(|answers| answers.first())
        .is_some_and(|first| has_field(first, "option_gauche_id"));
    if submission.array("userMatches").is_some() || answers_look_matched {
        return QuestionType::Appariement;
    }

    if submission
        .str_field("answer")
        .is_some_and(|answer| answer.chars().count() > 20)
    {
        return QuestionType::TexteLibre;
    }

    if submission
        .array("responses")
        .and_then(|responses| responses.first())
        .is_some_and(|first| has_field(first, "texte_option"))
    {
        return QuestionType::VraiFaux;
    }

    classify_type(submission.type_tag())
}

fn has_field(value: &Value, key: &str) -> bool {
    value.as_object().is_some_and(|obj| obj.contains_key(key))
}
