//! Telemetry metric name constants.
//!
//! Centralised metric names for muninn operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `muninn_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `operation` — API operation (e.g. "create_session", "query", "upload")
//! - `status` — outcome: "ok" or "error"
//! - `event_type` — wire event kind (e.g. "fulfillment", "metricsLog")

/// Total requests dispatched through the client.
///
/// Labels: `operation`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "muninn_requests_total";

/// Request duration in seconds, end to end (streamed queries include the
/// time spent draining the stream).
///
/// Labels: `operation`.
pub const REQUEST_DURATION_SECONDS: &str = "muninn_request_duration_seconds";

/// Total well-formed stream events processed by the accumulator.
///
/// Labels: `event_type`.
pub const STREAM_EVENTS_TOTAL: &str = "muninn_stream_events_total";

/// Total `data:` lines skipped because their payload failed to parse.
pub const MALFORMED_LINES_TOTAL: &str = "muninn_malformed_lines_total";
