//! Domain library for the recruitment pipeline platform.
//!
//! The `workflows::recruitment` tree carries the stage pipeline evaluator and
//! the application intake workflow; `config`, `telemetry`, and `error` hold
//! the service-wide plumbing shared with the API crate.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
