//! Muninn - Async client for hosted agent-chat APIs
//!
//! The gateway answers queries as a `text/event-stream` of `data:`-prefixed
//! JSON events. This crate's core, [`AnswerAccumulator`], reassembles that
//! stream into one answer plus side metadata, tolerating malformed lines and
//! arbitrary chunk boundaries; [`ChatClient`] wraps it together with the
//! session, query, and media endpoints.
//!
//! # Example
//!
//! ```rust,no_run
//! use muninn::{ChatClient, QueryRequest, SessionRequest};
//!
//! #[tokio::main]
//! async fn main() -> muninn::Result<()> {
//!     let client = ChatClient::builder().api_key("your-key").build()?;
//!
//!     let session = client
//!         .create_session(&SessionRequest::new("user-42"))
//!         .await?;
//!
//!     let answer = client
//!         .query(&session, &QueryRequest::new("predefined-openai-gpt4o", "Hello!"))
//!         .await?;
//!
//!     println!("{}", answer.answer);
//!     Ok(())
//! }
//! ```
//!
//! # Accumulating a stream directly
//!
//! The accumulator also works standalone, fed from any byte source:
//!
//! ```rust
//! use muninn::AnswerAccumulator;
//!
//! let mut acc = AnswerAccumulator::new();
//! acc.feed(b"data: {\"eventType\":\"fulfillment\",\"answer\":\"Hel\"}\n");
//! acc.feed(b"data: {\"eventType\":\"fulfillment\",\"answer\":\"lo\"}\n");
//! acc.feed(b"data: [DONE]\n");
//! assert_eq!(acc.finish().answer, "Hello");
//! ```

mod client;
pub mod error;
pub mod stream;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use client::{ChatClient, ChatClientBuilder};
pub use error::{MuninnError, Result};
pub use stream::{AnswerAccumulator, LineBuffer};

// Re-export all types
pub use types::{
    AccumulatedAnswer, AnswerStatus, ContextPair, MediaFile, ModelConfigs, QueryRequest,
    SessionRequest, StreamEvent, SyncAnswer,
};
