//! Stream reassembly: line buffering plus answer accumulation.

mod accumulator;
mod line;

pub use accumulator::AnswerAccumulator;
pub use line::LineBuffer;
