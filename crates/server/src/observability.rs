use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static PAGE_WINDOW_REQUESTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "gondola_page_window_requests_total",
        "Total page window computations served"
    )
    .expect("register page_window_requests_total")
});

pub static UPGRADE_QUOTES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "gondola_upgrade_quotes_total",
        "Total subscription quotes by outcome",
        &["outcome"]
    )
    .expect("register upgrade_quotes_total")
});

pub static CREDITED_TOKENS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "gondola_credited_tokens_total",
        "Total unused entitlement credited in upgrade quotes"
    )
    .expect("register credited_tokens_total")
});

pub fn record_quote(outcome: &str, credit: u64) {
    UPGRADE_QUOTES_TOTAL.with_label_values(&[outcome]).inc();
    CREDITED_TOKENS_TOTAL.inc_by(credit);
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}

/// Register every metric up front so `/metrics` lists them before first use.
pub fn init_metrics() {
    Lazy::force(&PAGE_WINDOW_REQUESTS_TOTAL);
    Lazy::force(&UPGRADE_QUOTES_TOTAL);
    Lazy::force(&CREDITED_TOKENS_TOTAL);
}
