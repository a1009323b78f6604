//! Answer accumulation over a chat query event stream.

use futures_util::{Stream, StreamExt};
use serde_json::{Map, Value};
use tracing::trace;

use super::line::LineBuffer;
use crate::telemetry;
use crate::types::{AccumulatedAnswer, AnswerStatus, DATA_PREFIX, DONE_SENTINEL, StreamEvent};

/// Assembles one streamed query response into an [`AccumulatedAnswer`].
///
/// Feed it raw body chunks as they arrive; it buffers partial lines across
/// chunk boundaries, skips anything that is not a well-formed `data:` event,
/// and stops at the `[DONE]` sentinel. Each accumulator owns one request's
/// state; nothing is shared between invocations.
///
/// Content never makes the accumulator fail. Transport faults belong to the
/// caller driving the stream (or to [`consume`](Self::consume), which
/// propagates them).
///
/// # Example
///
/// ```rust
/// use muninn::AnswerAccumulator;
///
/// let mut acc = AnswerAccumulator::new();
/// acc.feed(b"data: {\"eventType\":\"fulfillment\",\"answer\":\"Hi\"}\n");
/// acc.feed(b"data: [DONE]\n");
/// assert_eq!(acc.finish().answer, "Hi");
/// ```
pub struct AnswerAccumulator<'cb> {
    lines: LineBuffer,
    answer: String,
    session_id: Option<String>,
    message_id: Option<String>,
    metrics: Map<String, Value>,
    done: bool,
    on_status: Option<Box<dyn FnMut(&StreamEvent) + Send + 'cb>>,
}

impl Default for AnswerAccumulator<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'cb> AnswerAccumulator<'cb> {
    pub fn new() -> Self {
        Self {
            lines: LineBuffer::new(),
            answer: String::new(),
            session_id: None,
            message_id: None,
            metrics: Map::new(),
            done: false,
            on_status: None,
        }
    }

    /// Attach a display-only callback for `statusLog` and unknown events.
    ///
    /// Fire-and-forget: nothing the callback does affects the final answer.
    pub fn with_status_callback(callback: impl FnMut(&StreamEvent) + Send + 'cb) -> Self {
        Self {
            on_status: Some(Box::new(callback)),
            ..Self::new()
        }
    }

    /// Process one transport chunk. Returns `true` once the stream is
    /// terminal (`[DONE]` seen); later chunks are ignored.
    pub fn feed(&mut self, chunk: &[u8]) -> bool {
        if self.done {
            return true;
        }
        self.lines.push(chunk);
        while !self.done {
            match self.lines.next_line() {
                Some(line) => self.handle_line(&line),
                None => break,
            }
        }
        self.done
    }

    /// Whether the `[DONE]` sentinel has been observed.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Finish accumulation and produce the assembled answer.
    ///
    /// If the stream closed without a sentinel, any buffered trailing
    /// fragment is processed as a final line first.
    pub fn finish(mut self) -> AccumulatedAnswer {
        if !self.done
            && let Some(rest) = self.lines.finish()
        {
            self.handle_line(&rest);
        }
        AccumulatedAnswer {
            answer: self.answer,
            session_id: self.session_id.unwrap_or_default(),
            message_id: self.message_id.unwrap_or_default(),
            metrics: self.metrics,
            status: AnswerStatus::Completed,
        }
    }

    /// Drive an entire byte stream through this accumulator.
    ///
    /// Stops early at the sentinel. Transport errors propagate unchanged;
    /// they are the only way this returns `Err`.
    pub async fn consume<S, B, E>(mut self, mut stream: S) -> Result<AccumulatedAnswer, E>
    where
        S: Stream<Item = Result<B, E>> + Unpin,
        B: AsRef<[u8]>,
    {
        while let Some(chunk) = stream.next().await {
            if self.feed(chunk?.as_ref()) {
                break;
            }
        }
        Ok(self.finish())
    }

    fn handle_line(&mut self, line: &str) {
        // Framing lines (event:message, heartbeats, blanks) carry no payload.
        let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
            return;
        };
        let payload = payload.trim();

        if payload == DONE_SENTINEL {
            self.done = true;
            return;
        }

        let Some(event) = StreamEvent::parse(payload) else {
            trace!(line = payload, "skipping malformed stream line");
            metrics::counter!(telemetry::MALFORMED_LINES_TOTAL).increment(1);
            return;
        };

        metrics::counter!(telemetry::STREAM_EVENTS_TOTAL,
            "event_type" => event.event_type().to_owned(),
        )
        .increment(1);

        match event {
            StreamEvent::Fulfillment {
                answer,
                session_id,
                message_id,
            } => {
                if let Some(fragment) = answer {
                    self.answer.push_str(&fragment);
                }
                if session_id.is_some() {
                    self.session_id = session_id;
                }
                if message_id.is_some() {
                    self.message_id = message_id;
                }
            }
            StreamEvent::MetricsLog { public_metrics } => {
                if let Some(metrics) = public_metrics {
                    self.metrics = metrics;
                }
            }
            event @ (StreamEvent::StatusLog { .. } | StreamEvent::Other { .. }) => {
                if let Some(callback) = &mut self.on_status {
                    callback(&event);
                }
            }
        }
    }
}
