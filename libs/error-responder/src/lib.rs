//! Error responder: translates application errors into RFC 9457 problem documents
//!
//! This crate provides:
//! - error values tagged with an [`ErrorKind`] (`AppError`, `FieldViolation`)
//! - RFC 9457 Problem Details (`Problem`)
//! - the mapping from kind to status, type URI and title (`ErrorResponder`)
//! - axum integration behind the `axum` feature
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod kind;
pub mod problem;
pub mod responder;
#[cfg(feature = "axum")]
pub mod response;

// Re-export commonly used types
pub use config::ResponderConfig;
pub use error::{AppError, BoxError, FieldViolation};
pub use kind::ErrorKind;
pub use problem::{APPLICATION_PROBLEM_JSON, Problem};
pub use responder::{ErrorResponder, respond, respond_validation};

/// Helper to attach instance and `trace_id` to a Problem
pub fn finalize(mut p: Problem, instance: &str, trace_id: Option<String>) -> Problem {
    p = p.with_instance(instance);
    if let Some(tid) = trace_id {
        p = p.with_trace_id(tid);
    }
    p
}
