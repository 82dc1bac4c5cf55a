//! Error kinds that drive the problem mapping

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Why a request failed. Assigned where the error is raised.
///
/// `Internal` doubles as the catch-all: any kind code this crate does not
/// recognize parses to `Internal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The addressed entity does not exist.
    NotFound,
    /// The request itself is malformed.
    BadRequest,
    /// The request is well formed but breaks a domain rule.
    Unprocessable,
    /// An upstream dependency did not answer in time.
    GatewayTimeout,
    /// An upstream dependency answered with garbage or an error.
    BadGateway,
    /// One or more input fields failed validation.
    ValidationFailed,
    /// Anything else.
    Internal,
}

impl ErrorKind {
    pub const ALL: [Self; 7] = [
        Self::NotFound,
        Self::BadRequest,
        Self::Unprocessable,
        Self::GatewayTimeout,
        Self::BadGateway,
        Self::ValidationFailed,
        Self::Internal,
    ];

    /// Stable machine-readable code, e.g. `"not_found"`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::BadRequest => "bad_request",
            Self::Unprocessable => "unprocessable",
            Self::GatewayTimeout => "gateway_timeout",
            Self::BadGateway => "bad_gateway",
            Self::ValidationFailed => "validation_failed",
            Self::Internal => "internal",
        }
    }

    /// Parse a kind code. Unknown codes fall back to [`ErrorKind::Internal`].
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .unwrap_or(Self::Internal)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ErrorKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_code(s))
    }
}

impl Serialize for ErrorKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for ErrorKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;
        Ok(Self::from_code(&code))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn codes_parse_back_to_their_kind() {
        for kind in ErrorKind::ALL {
            assert_eq!(ErrorKind::from_code(kind.code()), kind);
            assert_eq!(kind.to_string(), kind.code());
        }
    }

    #[test]
    fn unknown_code_falls_back_to_internal() {
        assert_eq!(ErrorKind::from_code("teapot"), ErrorKind::Internal);
        assert_eq!(ErrorKind::from_code(""), ErrorKind::Internal);
        assert_eq!(ErrorKind::from_code("NOT_FOUND"), ErrorKind::Internal);
        assert_eq!("conflict".parse::<ErrorKind>(), Ok(ErrorKind::Internal));
    }

    #[test]
    fn deserializes_unknown_code_as_internal() {
        let kind: ErrorKind = serde_json::from_str(r#""payment_required""#).unwrap();
        assert_eq!(kind, ErrorKind::Internal);

        let kind: ErrorKind = serde_json::from_str(r#""gateway_timeout""#).unwrap();
        assert_eq!(kind, ErrorKind::GatewayTimeout);
    }

    #[test]
    fn serializes_as_code() {
        let json = serde_json::to_string(&ErrorKind::BadGateway).unwrap();
        assert_eq!(json, r#""bad_gateway""#);
    }
}
