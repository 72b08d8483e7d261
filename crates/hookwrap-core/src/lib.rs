//! # hookwrap-core
//!
//! Core crate for Hookwrap. Contains configuration schemas and the unified
//! error system shared by the pipeline, the bundled hooks and the router
//! binary.
//!
//! This crate has **no** internal dependencies on other Hookwrap crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
