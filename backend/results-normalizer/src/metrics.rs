use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};

use crate::error::FetchError;

lazy_static! {
    // Normalizer Metrics
    pub static ref SUBMISSIONS_NORMALIZED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "submissions_normalized_total",
        "Total number of submissions normalized",
        &["display_type"]
    )
    .unwrap();

    pub static ref PAYLOAD_ANOMALIES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "payload_anomalies_total",
        "Total number of unexpected payload shapes encountered",
        &["kind"]
    )
    .unwrap();

    // Fetch Metrics
    pub static ref FETCH_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "fetch_requests_total",
        "Total number of results API requests",
        &["status"]
    )
    .unwrap();

    pub static ref FETCH_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "fetch_duration_seconds",
        "Results API request duration in seconds",
        &["status"],
        vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .unwrap();
}

/// Renders all metrics in Prometheus text format
pub fn render_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| prometheus::Error::Msg(format!("Failed to convert metrics to UTF-8: {}", e)))
}

/// Helper: track a results API call with metrics
pub async fn track_fetch<F, T>(future: F) -> Result<T, FetchError>
where
    F: std::future::Future<Output = Result<T, FetchError>>,
{
    let start = std::time::Instant::now();
    let result = future.await;
    let duration = start.elapsed().as_secs_f64();

    let status = match &result {
        Ok(_) => "success",
        Err(err) => err.kind(),
    };

    FETCH_REQUESTS_TOTAL.with_label_values(&[status]).inc();
    FETCH_DURATION_SECONDS
        .with_label_values(&[status])
        .observe(duration);

    result
}

pub fn record_normalized(display_type: &str) {
    SUBMISSIONS_NORMALIZED_TOTAL
        .with_label_values(&[display_type])
        .inc();
}

pub fn record_anomaly(kind: &str) {
    PAYLOAD_ANOMALIES_TOTAL.with_label_values(&[kind]).inc();
}
