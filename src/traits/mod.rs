pub mod context;
pub mod handler;

pub use context::{InputSource, LogSink, OutputSink, ProgressCompletion, ProgressSink, TraversalContext};
pub use handler::NodeHandler;
