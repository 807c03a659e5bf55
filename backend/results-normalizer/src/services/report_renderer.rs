use std::fmt::Write;

use crate::models::{CandidateResults, FinalTestReport};

use super::display::display_icon;

/// Plain-text rendering of a candidate report for terminals and logs.
pub fn render_text(report: &CandidateResults) -> String {
    let mut out = String::new();
    let summary = &report.summary;

    let _ = writeln!(out, "Candidate {}", report.candidate_id);
    let _ = writeln!(
        out,
        "Final tests: {}  Score: {}/{}  Average: {}",
        summary.completed_count,
        format_number(summary.total_score),
        format_number(summary.total_possible),
        format_percentage(summary.average_percentage),
    );

    for (i, test) in report.tests.iter().enumerate() {
        out.push('\n');
        render_test(&mut out, i + 1, test);
    }

    out
}

fn render_test(out: &mut String, position: usize, test: &FinalTestReport) {
    let title = test
        .title
        .clone()
        .unwrap_or_else(|| format!("Final test {}", position));
    let _ = writeln!(
        out,
        "== {} [{}] {}/{} ({}) - {}/{} correct",
        title,
        test.score_class.as_str(),
        format_number(test.score),
        format_number(test.total),
        format_percentage(test.percentage),
        test.correct_count,
        test.question_count,
    );

    for response in &test.responses {
        let id = if response.question_id.is_empty() {
            "?"
        } else {
            response.question_id.as_str()
        };
        let _ = writeln!(
            out,
            "  [{}] {} ({}) {}/{}",
            display_icon(&response.display_type),
            id,
            response.display_type,
            format_number(response.score),
            format_number(response.max_score),
        );
        for line in response.formatted_answer.lines() {
            let _ = writeln!(out, "      {}", line);
        }
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

fn format_percentage(value: Option<f64>) -> String {
    value
        .map(|p| format!("{:.1}%", p))
        .unwrap_or_else(|| "n/a".to_string())
}
