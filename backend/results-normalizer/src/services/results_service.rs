use chrono::Utc;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::Value;

use crate::error::FetchError;
use crate::metrics::record_anomaly;
use crate::models::submission::json_kind;
use crate::models::CandidateResults;

use super::aggregator::{build_test_report, is_final_test, summarize_final_tests};
use super::fetcher::ResourceFetcher;

/// Characters that cannot appear raw inside a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Fetches a candidate's results and turns them into a display report.
pub struct ResultsService<F> {
    fetcher: F,
    results_path: String,
}

impl<F: ResourceFetcher> ResultsService<F> {
    pub fn new(fetcher: F, results_path: impl Into<String>) -> Self {
        Self {
            fetcher,
            results_path: results_path.into(),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn results_path_for(&self, candidate_id: &str) -> String {
        let encoded = utf8_percent_encode(candidate_id, PATH_SEGMENT).to_string();
        self.results_path.replace("{id}", &encoded)
    }

    pub async fn candidate_results(&self, candidate_id: &str) -> Result<CandidateResults, FetchError> {
        tracing::info!("Loading results for candidate {}", candidate_id);

        let payload = self
            .fetcher
            .fetch_json(&self.results_path_for(candidate_id))
            .await?;
        let report = build_candidate_results(candidate_id, &payload);

        tracing::info!(
            "Candidate {}: {} final tests, average {:?}",
            candidate_id,
            report.summary.completed_count,
            report.summary.average_percentage
        );
        Ok(report)
    }
}

/// Pure part of [`ResultsService::candidate_results`].
pub fn build_candidate_results(candidate_id: &str, payload: &Value) -> CandidateResults {
    let entries = result_entries(payload);

    CandidateResults {
        candidate_id: candidate_id.to_string(),
        generated_at: Utc::now(),
        tests: entries
            .iter()
            .filter(|entry| is_final_test(entry))
            .map(build_test_report)
            .collect(),
        summary: summarize_final_tests(entries),
    }
}

/// Accepts a bare array or an object wrapping one under `results` or `data`.
pub fn result_entries(payload: &Value) -> &[Value] {
    let entries = match payload {
        Value::Array(items) => Some(items),
        Value::Object(fields) => ["results", "data"]
            .iter()
            .find_map(|key| fields.get(*key).and_then(Value::as_array)),
        _ => None,
    };

    match entries {
        Some(items) => items.as_slice(),
        None => {
            tracing::warn!(
                "Results payload has no entry list (got {}), treating as empty",
                json_kind(payload)
            );
            record_anomaly("results_payload_shape");
            &[]
        }
    }
}
