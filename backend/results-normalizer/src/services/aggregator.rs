use serde_json::{Map, Value};

use crate::models::{FinalTestReport, FinalTestSummary, RawSubmission};
use crate::utils::numeric::{parse_number, parse_or_zero};

use super::display::score_class;
use super::normalizer::normalize;

const FINAL_TEST_TYPES: [&str; 2] = ["final", "test-final"];

/// Points a percentage-only entry is weighted as.
const PERCENTAGE_ONLY_TOTAL: f64 = 100.0;

/// True for entries that represent a final test result.
pub fn is_final_test(entry: &Value) -> bool {
    let Some(fields) = entry.as_object() else {
        return false;
    };

    let declared = field(fields, "test_type")
        .or_else(|| field(fields, "type"))
        .and_then(Value::as_str);
    if declared.is_some_and(|t| FINAL_TEST_TYPES.contains(&t)) {
        return true;
    }

    if fields.get("submissions").is_some_and(Value::is_array) {
        return true;
    }

    results(fields).is_some_and(|r| field(r, "score").is_some())
}

/// Score and total of one entry, with percentage-only entries weighted as 100 points.
pub fn entry_scores(entry: &Value) -> (f64, f64) {
    let Some(fields) = entry.as_object() else {
        return (0.0, 0.0);
    };
    let results = results(fields);
    let pick = |key: &str| results.and_then(|r| field(r, key)).or_else(|| field(fields, key));

    let score = pick("score");
    let total = pick("total");
    if score.is_none() && total.is_none() {
        if let Some(percentage) = parse_number(pick("percentage")) {
            return (percentage, PERCENTAGE_ONLY_TOTAL);
        }
    }

    (parse_or_zero(score), parse_or_zero(total))
}

/// Totals across all final-test entries. Order of entries does not matter.
pub fn summarize_final_tests(entries: &[Value]) -> FinalTestSummary {
    let (total_score, total_possible, completed_count) = entries
        .iter()
        .filter(|entry| is_final_test(entry))
        .map(entry_scores)
        .fold((0.0, 0.0, 0usize), |(score, possible, count), (s, t)| {
            (score + s, possible + t, count + 1)
        });

    FinalTestSummary {
        total_score,
        total_possible,
        average_percentage: ratio_percentage(total_score, total_possible),
        completed_count,
    }
}

/// Normalizes the submissions of one final-test entry.
pub fn build_test_report(entry: &Value) -> FinalTestReport {
    let fields = entry.as_object();
    let (score, total) = entry_scores(entry);

    let responses: Vec<_> = fields
        .and_then(|f| f.get("submissions"))
        .and_then(Value::as_array)
        .map(|submissions| {
            submissions
                .iter()
                .map(|raw| normalize(&RawSubmission::from_value(raw.clone())))
                .collect()
        })
        .unwrap_or_default();

    let declared_percentage = fields
        .and_then(results)
        .and_then(|r| parse_number(field(r, "percentage")));
    let percentage = declared_percentage.or_else(|| ratio_percentage(score, total));

    FinalTestReport {
        title: fields
            .and_then(|f| field(f, "title").or_else(|| field(f, "name")))
            .and_then(Value::as_str)
            .map(str::to_string),
        score,
        total,
        percentage,
        score_class: score_class(percentage),
        question_count: responses.len(),
        correct_count: responses.iter().filter(|r| r.is_correct).count(),
        responses,
    }
}

fn ratio_percentage(score: f64, total: f64) -> Option<f64> {
    (total > 0.0).then(|| score / total * 100.0)
}

fn results(fields: &Map<String, Value>) -> Option<&Map<String, Value>> {
    fields.get("results").and_then(Value::as_object)
}

fn field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|v| !v.is_null())
}
