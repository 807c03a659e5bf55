#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use results_normalizer::{services::ResourceFetcher, FetchError};
use serde_json::{json, Value};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// In-memory results API keyed by request path.
#[derive(Default)]
pub struct StaticFetcher {
    resources: HashMap<String, Value>,
    failures: HashMap<String, u16>,
    pub requested: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn with_resource(mut self, path: &str, body: Value) -> Self {
        self.resources.insert(path.to_string(), body);
        self
    }

    pub fn with_failure(mut self, path: &str, status: u16) -> Self {
        self.failures.insert(path.to_string(), status);
        self
    }

    pub fn requested_paths(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResourceFetcher for StaticFetcher {
    async fn fetch_json(&self, path: &str) -> Result<Value, FetchError> {
        self.requested.lock().unwrap().push(path.to_string());

        if let Some(status) = self.failures.get(path) {
            return Err(FetchError::Status {
                status: *status,
                body: "upstream failure".to_string(),
            });
        }

        self.resources.get(path).cloned().ok_or(FetchError::Status {
            status: 404,
            body: format!("no resource at {}", path),
        })
    }
}

/// A results payload shaped like the production API: one final test with
/// mixed question types, one survey, one percentage-only final test.
pub fn candidate_payload() -> Value {
    json!({
        "results": [
            {
                "title": "Fire safety - final",
                "test_type": "final",
                "results": { "score": "8", "total": 10 },
                "submissions": [
                    {
                        "questionId": "q1",
                        "question_text": "Which extinguisher for electrical fires?",
                        "type": "QCM",
                        "score": 2,
                        "maxScore": 2,
                        "answers": [1],
                        "options": [{ "text": "Water" }, { "text": "CO2" }]
                    },
                    {
                        "question_id": 2,
                        "type": "appariement",
                        "score": "1",
                        "possibleScore": "3",
                        "answers": [
                            {
                                "option_gauche_id": "Class A",
                                "valeur_droite": "Wood",
                                "is_correct": true,
                                "correct_values": ["a1", "Wood"]
                            },
                            { "option_gauche_id": "Class B", "is_correct": false }
                        ]
                    },
                    {
                        "questionId": "q3",
                        "type": "multi_vrai_faux",
                        "score": 2,
                        "maxScore": 2,
                        "responses": [
                            { "texte_option": "Smoke rises", "userAnswer": true },
                            { "texte_option": "Use lifts", "userAnswer": false }
                        ]
                    },
                    {
                        "questionId": "q4",
                        "type": "ordonner",
                        "completed": false,
                        "score": 0,
                        "maxScore": 3,
                        "answers": { "Alert": 1, "Evacuate": 2 }
                    },
                    {
                        "questionId": "q5",
                        "type": "espaces_vides",
                        "score": 3,
                        "maxScore": 0,
                        "answers": { "1": "exit", "2": "assembly point" }
                    }
                ]
            },
            { "test_type": "survey", "score": 4, "total": 5 },
            { "type": "test-final", "results": { "percentage": 60 } }
        ]
    })
}
