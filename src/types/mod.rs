//! Public types for the Muninn API.

mod answer;
mod event;
mod options;
pub mod status;

pub use answer::{AccumulatedAnswer, AnswerStatus, MediaFile, SyncAnswer};
pub use event::{DATA_PREFIX, DONE_SENTINEL, StreamEvent};
pub use options::{ContextPair, ModelConfigs, QueryRequest, SessionRequest};
pub use status::friendly_message;
