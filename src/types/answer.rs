//! Result types returned by queries and uploads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Terminal status of an accumulated answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerStatus {
    #[default]
    Completed,
    Failed,
}

/// The assembled result of one streamed query.
///
/// Produced by [`crate::AnswerAccumulator`] once the stream ends or the
/// `[DONE]` sentinel is observed. Nothing here outlives a single request.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccumulatedAnswer {
    /// Every fulfilment fragment, concatenated in arrival order.
    pub answer: String,
    /// Last-seen session id, empty if the stream never carried one.
    pub session_id: String,
    /// Last-seen message id, empty if the stream never carried one.
    pub message_id: String,
    /// Last-seen metrics payload, last write wins.
    pub metrics: Map<String, Value>,
    pub status: AnswerStatus,
}

impl AccumulatedAnswer {
    /// Whether the stream produced no fulfilment text at all.
    ///
    /// Not an error: callers decide whether an empty answer is user-facing
    /// failure.
    pub fn is_empty(&self) -> bool {
        self.answer.is_empty()
    }
}

/// Response payload of a `responseMode: "sync"` query.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncAnswer {
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub message_id: Option<String>,
}

/// Metadata returned by the media upload endpoints.
///
/// The gateway's field set varies by upload kind; anything past the common
/// fields is preserved in `extra`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
