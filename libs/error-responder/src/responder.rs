//! Centralized mapping from [`AppError`] to problem documents
//!
//! Every error maps to exactly one [`Problem`] and one status code. Upstream
//! failures and internal errors are logged before responding; client errors
//! are not.

use std::sync::OnceLock;

use http::{Method, StatusCode};
use serde_json::{Map, Value};

use crate::catalog::{self, ProblemDef};
use crate::config::ResponderConfig;
use crate::error::{AppError, FieldViolation};
use crate::kind::ErrorKind;
use crate::problem::Problem;

/// Detail sent with every validation problem.
pub const INVALID_FIELDS_DETAIL: &str = "One or more fields are invalid";

/// Extension member holding the field-to-message map.
pub const FIELDS_EXTENSION: &str = "fields";

static INSTALLED: OnceLock<ErrorResponder> = OnceLock::new();

/// Stateless translator from errors to problem documents.
#[derive(Debug, Clone, Default)]
pub struct ErrorResponder {
    config: ResponderConfig,
}

impl ErrorResponder {
    #[must_use]
    pub const fn new(config: ResponderConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ResponderConfig {
        &self.config
    }

    /// Make this responder the process-wide one used by [`respond`] and the
    /// axum integration. Returns `false` if one was already installed.
    #[must_use]
    pub fn install(self) -> bool {
        INSTALLED.set(self).is_ok()
    }

    /// The installed responder, or a default one if none was installed.
    #[must_use]
    pub fn global() -> &'static Self {
        INSTALLED.get_or_init(Self::default)
    }

    /// Translate an error into a problem document and its status code.
    #[must_use]
    pub fn respond(&self, err: &AppError) -> (Problem, StatusCode) {
        match err.kind() {
            ErrorKind::NotFound => self.problem(&catalog::NOT_FOUND, err.message()),
            ErrorKind::BadRequest => self.problem(&catalog::BAD_REQUEST, err.message()),
            ErrorKind::Unprocessable => {
                self.problem(&catalog::UNPROCESSABLE_ENTITY, err.message())
            }
            ErrorKind::ValidationFailed => self.respond_validation(err.violations()),
            ErrorKind::GatewayTimeout => {
                log_failure(err);
                self.problem(&catalog::GATEWAY_TIMEOUT, err.message())
            }
            ErrorKind::BadGateway => {
                log_failure(err);
                self.problem(&catalog::BAD_GATEWAY, err.message())
            }
            // Internal details never reach the body
            ErrorKind::Internal => {
                log_failure(err);
                self.problem(&catalog::INTERNAL, None)
            }
        }
    }

    /// Translate field violations into a 400 `invalid-fields` problem.
    ///
    /// Duplicate field names keep the last message.
    #[must_use]
    pub fn respond_validation(&self, violations: &[FieldViolation]) -> (Problem, StatusCode) {
        let mut fields = Map::new();
        for violation in violations {
            fields.insert(
                violation.field.clone(),
                Value::String(violation.message.clone()),
            );
        }

        let (problem, status) =
            self.problem(&catalog::INVALID_FIELDS, Some(INVALID_FIELDS_DETAIL));
        (
            problem.with_extension(FIELDS_EXTENSION, Value::Object(fields)),
            status,
        )
    }

    /// Like [`ErrorResponder::respond`], with the request path as `instance`
    /// and the current span id as `trace_id`.
    #[must_use]
    pub fn render(&self, err: &AppError, instance: &str) -> Problem {
        let (problem, _) = self.respond(err);
        crate::finalize(problem, instance, current_trace_id())
    }

    /// 405 problem for a request the router matched by path but not by method.
    #[must_use]
    pub fn method_not_allowed(&self, method: &Method, instance: &str) -> Problem {
        let detail = format!("method {method} is not allowed for {instance}");
        let (problem, _) = self.problem(&catalog::METHOD_NOT_ALLOWED, Some(&detail));
        crate::finalize(problem, instance, current_trace_id())
    }

    fn problem(&self, def: &ProblemDef, detail: Option<&str>) -> (Problem, StatusCode) {
        (def.as_problem(&self.config.type_prefix, detail), def.status)
    }
}

/// [`ErrorResponder::respond`] on the installed responder.
#[must_use]
pub fn respond(err: &AppError) -> (Problem, StatusCode) {
    ErrorResponder::global().respond(err)
}

/// [`ErrorResponder::respond_validation`] on the installed responder.
#[must_use]
pub fn respond_validation(violations: &[FieldViolation]) -> (Problem, StatusCode) {
    ErrorResponder::global().respond_validation(violations)
}

fn current_trace_id() -> Option<String> {
    tracing::Span::current()
        .id()
        .map(|id| id.into_u64().to_string())
}

fn log_failure(err: &AppError) {
    let chain = err.cause_chain();
    tracing::error!(kind = %err.kind(), error = %err, cause = ?chain, "request failed");
}
