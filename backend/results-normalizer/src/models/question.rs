use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Question category as seen by the display layer.
///
/// The named variants form the closed set that icon and color lookups match
/// against. Tags that match none of them are carried upper-cased in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QuestionType {
    Qcm,
    Appariement,
    Texte,
    TexteLibre,
    VraiFaux,
    EspacesVides,
    Ordonner,
    Unknown,
    Other(String),
}

impl QuestionType {
    pub fn as_str(&self) -> &str {
        match self {
            QuestionType::Qcm => "QCM",
            QuestionType::Appariement => "APPARIEMENT",
            QuestionType::Texte => "TEXTE",
            QuestionType::TexteLibre => "TEXTE_LIBRE",
            QuestionType::VraiFaux => "VRAI_FAUX",
            QuestionType::EspacesVides => "ESPACES_VIDES",
            QuestionType::Ordonner => "ORDONNER",
            QuestionType::Unknown => "UNKNOWN",
            QuestionType::Other(code) => code,
        }
    }

    /// Exact match on a category code; anything else is kept as `Other`.
    pub fn from_code(code: &str) -> Self {
        match code {
            "QCM" => QuestionType::Qcm,
            "APPARIEMENT" => QuestionType::Appariement,
            "TEXTE" => QuestionType::Texte,
            "TEXTE_LIBRE" => QuestionType::TexteLibre,
            "VRAI_FAUX" => QuestionType::VraiFaux,
            "ESPACES_VIDES" => QuestionType::EspacesVides,
            "ORDONNER" => QuestionType::Ordonner,
            "" | "UNKNOWN" => QuestionType::Unknown,
            other => QuestionType::Other(other.to_string()),
        }
    }

    /// Upper-cased passthrough for tags no keyword rule recognised.
    pub fn passthrough(raw: &str) -> Self {
        Self::from_code(raw.to_uppercase().as_str())
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, QuestionType::Unknown | QuestionType::Other(_))
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for QuestionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for QuestionType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(QuestionType::from_code(&code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_category_code() {
        let json = serde_json::to_string(&QuestionType::VraiFaux).unwrap();
        assert_eq!(json, "\"VRAI_FAUX\"");

        let json = serde_json::to_string(&QuestionType::Other("ESSAY".into())).unwrap();
        assert_eq!(json, "\"ESSAY\"");
    }

    #[test]
    fn passthrough_upper_cases_and_recognises_codes() {
        assert_eq!(
            QuestionType::passthrough("essay"),
            QuestionType::Other("ESSAY".into())
        );
        assert_eq!(QuestionType::passthrough("unknown"), QuestionType::Unknown);
        assert_eq!(QuestionType::passthrough(""), QuestionType::Unknown);
        // the raw tag is kept as-is apart from case
        assert_eq!(
            QuestionType::passthrough(" essay "),
            QuestionType::Other(" ESSAY ".into())
        );
    }

    #[test]
    fn deserializes_known_and_unknown_codes() {
        let parsed: QuestionType = serde_json::from_str("\"ORDONNER\"").unwrap();
        assert_eq!(parsed, QuestionType::Ordonner);
        let parsed: QuestionType = serde_json::from_str("\"SLIDER\"").unwrap();
        assert_eq!(parsed, QuestionType::Other("SLIDER".into()));
    }
}
