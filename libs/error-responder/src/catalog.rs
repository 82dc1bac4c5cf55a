//! Static problem definitions, one per response shape

use http::StatusCode;

use crate::problem::Problem;

/// Static problem definition: status, title and the tail of the type URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemDef {
    pub status: StatusCode,
    pub title: &'static str,
    pub slug: &'static str,
}

pub const NOT_FOUND: ProblemDef = ProblemDef {
    status: StatusCode::NOT_FOUND,
    title: "Not Found",
    slug: "not-found",
};

pub const BAD_REQUEST: ProblemDef = ProblemDef {
    status: StatusCode::BAD_REQUEST,
    title: "Bad Request",
    slug: "bad-request",
};

pub const UNPROCESSABLE_ENTITY: ProblemDef = ProblemDef {
    status: StatusCode::UNPROCESSABLE_ENTITY,
    title: "Unprocessable Entity",
    slug: "unprocessable-entity",
};

pub const GATEWAY_TIMEOUT: ProblemDef = ProblemDef {
    status: StatusCode::GATEWAY_TIMEOUT,
    title: "Gateway Timeout",
    slug: "gateway-timeout",
};

pub const BAD_GATEWAY: ProblemDef = ProblemDef {
    status: StatusCode::BAD_GATEWAY,
    title: "Bad Gateway",
    slug: "bad-gateway",
};

pub const INTERNAL: ProblemDef = ProblemDef {
    status: StatusCode::INTERNAL_SERVER_ERROR,
    title: "Internal Server Error",
    slug: "internal",
};

/// Requests whose method the route does not serve.
pub const METHOD_NOT_ALLOWED: ProblemDef = ProblemDef {
    status: StatusCode::METHOD_NOT_ALLOWED,
    title: "Method Not Allowed",
    slug: "method-not-allowed",
};

/// Validation failures keep the lowercase title clients already match on.
pub const INVALID_FIELDS: ProblemDef = ProblemDef {
    status: StatusCode::BAD_REQUEST,
    title: "invalid fields",
    slug: "invalid-fields",
};

impl ProblemDef {
    /// Type URI under `prefix`, e.g. `/errors/not-found`.
    #[must_use]
    pub fn type_url(&self, prefix: &str) -> String {
        format!("{}/{}", prefix.trim_end_matches('/'), self.slug)
    }

    /// Build a [`Problem`] from this definition.
    #[inline]
    pub fn as_problem(&self, prefix: &str, detail: Option<&str>) -> Problem {
        let problem = Problem::new(self.status, self.title).with_type(self.type_url(prefix));
        match detail {
            Some(detail) => problem.with_detail(detail),
            None => problem,
        }
    }
}
