pub mod memory;
mod tracing_feedback;

pub use tracing_feedback::TracingFeedbackSink;
