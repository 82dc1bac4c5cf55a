//! Application error values raised by request handlers

use std::error::Error as StdError;
use std::fmt;

use crate::kind::ErrorKind;

/// Boxed underlying cause. Logged, never rendered to clients.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// A single validation failure attached to one input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// field path, e.g. "email" or "address.city"
    pub field: String,
    /// Already-resolved human-readable message
    pub message: String,
}

impl FieldViolation {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Error raised at the failure site and consumed once by the responder.
#[derive(Debug)]
pub struct AppError {
    kind: ErrorKind,
    message: Option<String>,
    cause: Option<BoxError>,
    violations: Vec<FieldViolation>,
}

impl AppError {
    /// Error of the given kind without a message.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            cause: None,
            violations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::new(kind)
        }
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_message(ErrorKind::NotFound, message)
    }

    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_message(ErrorKind::BadRequest, message)
    }

    /// A domain rule was violated.
    #[must_use]
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::with_message(ErrorKind::Unprocessable, message)
    }

    #[must_use]
    pub fn gateway_timeout(message: impl Into<String>) -> Self {
        Self::with_message(ErrorKind::GatewayTimeout, message)
    }

    #[must_use]
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::with_message(ErrorKind::BadGateway, message)
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_message(ErrorKind::Internal, message)
    }

    /// Validation failure carrying the offending fields.
    #[must_use]
    pub fn validation(violations: impl IntoIterator<Item = FieldViolation>) -> Self {
        Self {
            violations: violations.into_iter().collect(),
            ..Self::new(ErrorKind::ValidationFailed)
        }
    }

    /// Attach the underlying cause.
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Messages of the cause chain, outermost first.
    #[must_use]
    pub fn cause_chain(&self) -> Vec<String> {
        let mut chain = Vec::new();
        let mut source = self.source();
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }
        chain
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => f.write_str(message),
            None => write!(f, "{} error", self.kind),
        }
    }
}

impl StdError for AppError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
            .as_ref()
            .map(|cause| &**cause as &(dyn StdError + 'static))
    }
}

/// Untagged failures are internal errors; the anyhow error becomes the cause.
impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        Self::internal(e.to_string()).with_cause(e)
    }
}
