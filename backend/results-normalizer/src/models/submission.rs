use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::metrics::record_anomaly;

/// One candidate answer exactly as the results API returned it.
///
/// Nothing about the record is trusted: any field may be missing, null, or of
/// an unexpected JSON type. Accessors treat `null` the same as absence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSubmission {
    fields: Map<String, Value>,
}

impl RawSubmission {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Accepts any JSON value; non-objects become an empty record.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            Value::Null => Self::default(),
            other => {
                tracing::warn!(
                    "Submission is not a JSON object (got {}), treating as empty",
                    json_kind(&other)
                );
                record_anomaly("non_object_submission");
                Self::default()
            }
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    /// First present, non-null value among alias names.
    pub fn first_of(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter().find_map(|key| self.get(key))
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn array(&self, key: &str) -> Option<&Vec<Value>> {
        self.get(key).and_then(Value::as_array)
    }

    pub fn object(&self, key: &str) -> Option<&Map<String, Value>> {
        self.get(key).and_then(Value::as_object)
    }

    pub fn type_tag(&self) -> Option<&str> {
        self.str_field("type")
    }

    pub fn question_id(&self) -> String {
        match self.first_of(&["questionId", "question_id"]) {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => String::new(),
        }
    }

    pub fn question_text(&self) -> Option<String> {
        self.str_field("question_text").map(str::to_string)
    }

    pub fn score(&self) -> Option<&Value> {
        self.get("score")
    }

    pub fn max_score(&self) -> Option<&Value> {
        self.first_of(&["maxScore", "possibleScore"])
    }
}

impl From<Map<String, Value>> for RawSubmission {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

impl From<Value> for RawSubmission {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

impl Serialize for RawSubmission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RawSubmission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(RawSubmission::from_value)
    }
}

pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
