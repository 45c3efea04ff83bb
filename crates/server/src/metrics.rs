use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "price_desk_http_requests_total",
        "Total HTTP requests handled",
        &["method", "status"]
    )
    .expect("register http_requests_total")
});

pub static RECORD_PATCHES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "price_desk_record_patches_total",
        "Record patch attempts by outcome",
        &["outcome"]
    )
    .expect("register record_patches_total")
});

/// Patch outcome label values.
pub mod outcome {
    pub const UPDATED: &str = "updated";
    pub const INVALID: &str = "invalid";
    pub const NOT_FOUND: &str = "not_found";
    pub const FAILED: &str = "failed";
}

pub fn record_patch(outcome: &str) {
    RECORD_PATCHES_TOTAL.with_label_values(&[outcome]).inc();
}

/// Middleware: count every request by method and response status.
pub async fn track_requests(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let res = next.run(req).await;
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method.as_str(), res.status().as_str()])
        .inc();
    res
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}
