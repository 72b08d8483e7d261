//! # hookwrap-hooks
//!
//! Ready-made hooks for Hookwrap pipelines:
//!
//! - [`TraceHook`]: logs input, output and errors without touching them
//! - [`InjectField`]: writes a key into a JSON object argument before the core runs
//! - [`ReportFailure`]: logs recovered failures and optionally rewrites them

pub mod inject;
pub mod report;
pub mod trace;

pub use inject::InjectField;
pub use report::ReportFailure;
pub use trace::TraceHook;
