//! Wire event types for the chat query stream.
//!
//! The gateway emits newline-delimited Server-Sent-Events-style text: each
//! payload line is `data: <json>`, terminated by the non-JSON sentinel
//! `data: [DONE]`. Framing lines (`event:message`, `event:heartbeat`, blanks)
//! carry no payload.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Literal prefix of SSE payload lines.
pub const DATA_PREFIX: &str = "data:";

/// Sentinel payload marking end of stream. Not a JSON document.
pub const DONE_SENTINEL: &str = "[DONE]";

/// A single parsed event from the query stream.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// An incremental fragment of the generated answer, with the session
    /// and message identifiers the gateway attaches to it.
    Fulfillment {
        answer: Option<String>,
        session_id: Option<String>,
        message_id: Option<String>,
    },

    /// Token/timing metrics. The payload is opaque and surfaced verbatim;
    /// a later event replaces an earlier one wholesale.
    MetricsLog {
        public_metrics: Option<Map<String, Value>>,
    },

    /// Human-readable progress phrase. Display only, never control flow.
    StatusLog { message: Option<String> },

    /// An event kind this crate does not understand. Kept so UI layers can
    /// observe future event kinds through the status callback.
    Other { event_type: String },
}

/// Mirror of the wire object; converted into [`StreamEvent`] after the
/// `eventType` discriminant is known.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvent {
    event_type: String,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    session_id: Option<String>,
    #[serde(default)]
    message_id: Option<String>,
    #[serde(default)]
    public_metrics: Option<Map<String, Value>>,
    #[serde(default)]
    current_status_log: Option<StatusLogBody>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusLogBody {
    #[serde(default)]
    status_message: Option<String>,
}

impl StreamEvent {
    /// Parse one `data:` payload, returning `None` for anything that is not
    /// a well-formed event object.
    ///
    /// Malformed or partial JSON must never abort accumulation; callers skip
    /// `None` and continue with the next line.
    pub fn parse(data: &str) -> Option<Self> {
        let raw: RawEvent = serde_json::from_str(data).ok()?;
        Some(match raw.event_type.as_str() {
            "fulfillment" => StreamEvent::Fulfillment {
                answer: raw.answer,
                session_id: raw.session_id,
                message_id: raw.message_id,
            },
            "metricsLog" => StreamEvent::MetricsLog {
                public_metrics: raw.public_metrics,
            },
            "statusLog" => StreamEvent::StatusLog {
                message: raw.current_status_log.and_then(|s| s.status_message),
            },
            _ => StreamEvent::Other {
                event_type: raw.event_type,
            },
        })
    }

    /// Wire name of this event kind (used as a metrics label).
    pub fn event_type(&self) -> &str {
        match self {
            StreamEvent::Fulfillment { .. } => "fulfillment",
            StreamEvent::MetricsLog { .. } => "metricsLog",
            StreamEvent::StatusLog { .. } => "statusLog",
            StreamEvent::Other { event_type } => event_type,
        }
    }
}
