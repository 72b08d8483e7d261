//! Execution engine: per-invocation record, continuation bridge and the
//! entry / core / exit / failure phase runner.

pub mod bridge;
pub mod outcome;
pub mod record;
pub mod runner;

pub use outcome::Outcome;
pub use record::ExecutionRecord;
