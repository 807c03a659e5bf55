use crate::models::{QuestionType, ScoreClass};

pub const DEFAULT_ICON: &str = "help-circle";

/// Color bucket for a percentage; `None` (or NaN) means there is nothing to grade.
pub fn score_class(percentage: Option<f64>) -> ScoreClass {
    match percentage {
        Some(p) if p >= 80.0 => ScoreClass::Excellent,
        Some(p) if p >= 60.0 => ScoreClass::Good,
        Some(p) if p >= 40.0 => ScoreClass::Average,
        Some(p) if p < 40.0 => ScoreClass::Poor,
        _ => ScoreClass::Neutral,
    }
}

pub fn display_icon(question_type: &QuestionType) -> &'static str {
    match question_type {
        QuestionType::Qcm => "list-checks",
        QuestionType::Appariement => "git-compare",
        QuestionType::Texte | QuestionType::TexteLibre => "file-text",
        QuestionType::VraiFaux => "check-circle",
        QuestionType::EspacesVides => "text-cursor-input",
        QuestionType::Ordonner => "list-ordered",
        QuestionType::Unknown | QuestionType::Other(_) => DEFAULT_ICON,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_class_thresholds() {
        assert_eq!(score_class(Some(100.0)), ScoreClass::Excellent);
        assert_eq!(score_class(Some(80.0)), ScoreClass::Excellent);
        assert_eq!(score_class(Some(79.9)), ScoreClass::Good);
        assert_eq!(score_class(Some(60.0)), ScoreClass::Good);
        assert_eq!(score_class(Some(40.0)), ScoreClass::Average);
        assert_eq!(score_class(Some(39.99)), ScoreClass::Poor);
        assert_eq!(score_class(Some(0.0)), ScoreClass::Poor);
        assert_eq!(score_class(None), ScoreClass::Neutral);
        assert_eq!(score_class(Some(f64::NAN)), ScoreClass::Neutral);
    }

    #[test]
    fn icons_default_for_unrecognised_categories() {
        assert_eq!(display_icon(&QuestionType::Qcm), "list-checks");
        assert_eq!(display_icon(&QuestionType::TexteLibre), "file-text");
        assert_eq!(display_icon(&QuestionType::Unknown), DEFAULT_ICON);
        assert_eq!(
            display_icon(&QuestionType::Other("SLIDER".into())),
            DEFAULT_ICON
        );
    }
}
