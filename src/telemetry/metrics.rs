//! Run metrics
//!
//! Recorded through the `metrics` facade; they go nowhere unless the
//! embedding process installs a recorder.

use std::time::Duration;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// DaslSimulate round trip
    Simulate,
}

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// States sent in the request history
    RequestStates,
    /// States returned by the service
    ResponseStates,
}

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Rows written to CSV reports
    ReportRows,
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    let metric_name = match metric {
        LatencyMetric::Simulate => "dasl_simulate_latency_ms",
    };

    let value_ms = duration.as_secs_f64() * 1_000.0;
    ::metrics::histogram!(metric_name).record(value_ms);
    tracing::debug!(metric = metric_name, value_ms, "Recording latency");
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    let metric_name = match metric {
        GaugeMetric::RequestStates => "dasl_request_states",
        GaugeMetric::ResponseStates => "dasl_response_states",
    };

    ::metrics::gauge!(metric_name).set(value);
    tracing::debug!(metric = metric_name, value = value, "Setting gauge");
}

/// Increment a counter
pub fn increment_counter(metric: CounterMetric, value: u64) {
    let metric_name = match metric {
        CounterMetric::ReportRows => "dasl_report_rows_total",
    };

    ::metrics::counter!(metric_name).increment(value);
    tracing::debug!(metric = metric_name, value = value, "Incrementing counter");
}
