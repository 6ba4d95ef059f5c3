//! Prometheus metrics for receipt-service.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, HistogramVec, TextEncoder,
};

/// Receipt counter by payment method.
pub static RECEIPTS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "receipt_receipts_total",
        "Total number of receipts created by payment method",
        &["payment_method"]
    )
    .expect("Failed to register receipts_total")
});

/// Schedule counter by frequency.
pub static SCHEDULES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "receipt_schedules_total",
        "Total number of export schedules created by frequency",
        &["frequency"]
    )
    .expect("Failed to register schedules_total")
});

/// Export request counter by format.
pub static EXPORTS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "receipt_exports_total",
        "Total number of export requests by format",
        &["format"]
    )
    .expect("Failed to register exports_total")
});

/// Store operation duration histogram.
pub static STORE_OP_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "receipt_store_op_duration_seconds",
        "Store operation duration in seconds",
        &["operation"],
        vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1]
    )
    .expect("Failed to register store_op_duration")
});

/// Initialize all metrics (forces lazy initialization).
pub fn init_metrics() {
    Lazy::force(&RECEIPTS_TOTAL);
    Lazy::force(&SCHEDULES_TOTAL);
    Lazy::force(&EXPORTS_TOTAL);
    Lazy::force(&STORE_OP_DURATION);
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder
        .encode_to_string(&metric_families)
        .unwrap_or_default()
}
