//! Log estructurado de una ejecución y trait `LogSink`.

mod store;
mod types;

pub use store::{LogSink, RunLog};
pub use types::{LogEntry, LogLevel, Stage};
