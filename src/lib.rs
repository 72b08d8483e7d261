//! Hookwrap: wrap a function with entry, exit and failure hooks.
//!
//! The library side of the root package holds the demo router pipeline used
//! by the `hookwrap-router` binary and the integration tests.

pub mod router;
