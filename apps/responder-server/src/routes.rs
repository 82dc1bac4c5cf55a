//! Demo order endpoints that fail in every way the responder knows about.

use std::io;

use axum::extract::Path;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::{Method, StatusCode, Uri};
use axum::routing::{get, post};
use axum::{Json, Router};
use error_responder::{AppError, ErrorResponder, FieldViolation, Problem};
use serde::{Deserialize, Serialize};

const SHIPPED_ORDER: u64 = 2;

#[derive(Debug, Serialize)]
pub struct Order {
    pub id: u64,
    pub email: String,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct NewOrder {
    pub email: String,
    pub quantity: i64,
}

impl NewOrder {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        if self.email.trim().is_empty() {
            violations.push(FieldViolation::new("email", "must not be blank"));
        } else if !self.email.contains('@') {
            violations.push(FieldViolation::new("email", "must be a well-formed email address"));
        }
        if self.quantity <= 0 {
            violations.push(FieldViolation::new("quantity", "must be positive"));
        }
        violations
    }
}

#[must_use]
pub fn router() -> Router {
    Router::new()
        .route("/orders", post(create_order))
        .route("/orders/{id}", get(get_order))
        .route("/orders/{id}/cancel", post(cancel_order))
        .route("/quotes/shipping", get(shipping_quote))
        .route("/quotes/tax", get(tax_quote))
        .route("/reports/daily", get(daily_report))
        .fallback(fallback)
        .method_not_allowed_fallback(method_not_allowed)
}

fn find_order(id: u64) -> Result<Order, AppError> {
    match id {
        1 | SHIPPED_ORDER => Ok(Order {
            id,
            email: format!("buyer{id}@example.com"),
            quantity: 1,
        }),
        _ => Err(AppError::not_found(format!("order {id} not found"))),
    }
}

async fn get_order(path: Result<Path<u64>, PathRejection>) -> Result<Json<Order>, AppError> {
    let Path(id) = path?;
    find_order(id).map(Json)
}

async fn create_order(
    payload: Result<Json<NewOrder>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let Json(new_order) = payload?;

    let violations = new_order.violations();
    if !violations.is_empty() {
        return Err(AppError::validation(violations));
    }

    tracing::info!(email = %new_order.email, "order accepted");
    Ok((
        StatusCode::CREATED,
        Json(Order {
            id: 3,
            email: new_order.email,
            quantity: new_order.quantity,
        }),
    ))
}

async fn cancel_order(path: Result<Path<u64>, PathRejection>) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    let order = find_order(id)?;
    if order.id == SHIPPED_ORDER {
        return Err(AppError::unprocessable(format!(
            "order {id} has already shipped and cannot be cancelled"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn shipping_quote() -> Result<Json<serde_json::Value>, AppError> {
    let cause = io::Error::new(io::ErrorKind::TimedOut, "carrier did not answer within 5s");
    Err(AppError::gateway_timeout("shipping carrier timed out").with_cause(cause))
}

async fn tax_quote() -> Result<Json<serde_json::Value>, AppError> {
    Err(AppError::bad_gateway("tax service returned an unreadable response"))
}

async fn daily_report() -> Result<Json<serde_json::Value>, AppError> {
    let err = anyhow::anyhow!("report table is locked").context("building daily report");
    Err(err.into())
}

async fn fallback(uri: Uri) -> Problem {
    let err = AppError::not_found(format!("no route for {}", uri.path()));
    ErrorResponder::global().render(&err, uri.path())
}

async fn method_not_allowed(method: Method, uri: Uri) -> Problem {
    ErrorResponder::global().method_not_allowed(&method, uri.path())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use axum::body::Body;
    use axum::http::{Request, header};
    use error_responder::APPLICATION_PROBLEM_JSON;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn call(method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Option<String>, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        let req = builder
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_owned())))
            .unwrap();

        let resp = router().oneshot(req).await.unwrap();
        let status = resp.status();
        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, content_type, body)
    }

    #[tokio::test]
    async fn existing_order_is_returned() {
        let (status, _, body) = call("GET", "/orders/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "buyer1@example.com");
    }

    #[tokio::test]
    async fn missing_order_is_not_found() {
        let (status, content_type, body) = call("GET", "/orders/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(content_type.as_deref(), Some(APPLICATION_PROBLEM_JSON));
        assert_eq!(body["type"], "/errors/not-found");
        assert_eq!(body["detail"], "order 99 not found");
    }

    #[tokio::test]
    async fn invalid_order_reports_fields() {
        let (status, _, body) = call("POST", "/orders", Some(r#"{"email":"","quantity":-1}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["type"], "/errors/invalid-fields");
        assert_eq!(
            body["fields"],
            json!({ "email": "must not be blank", "quantity": "must be positive" })
        );
    }

    #[tokio::test]
    async fn valid_order_is_created() {
        let (status, _, body) =
            call("POST", "/orders", Some(r#"{"email":"a@example.com","quantity":2}"#)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["quantity"], 2);
    }

    #[tokio::test]
    async fn wrong_field_type_is_bad_request() {
        let (status, _, body) =
            call("POST", "/orders", Some(r#"{"email":"a@example.com","quantity":"two"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["type"], "/errors/bad-request");
    }

    #[tokio::test]
    async fn shipped_order_cannot_be_cancelled() {
        let (status, _, body) = call("POST", "/orders/2/cancel", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["type"], "/errors/unprocessable-entity");
        assert_eq!(body["title"], "Unprocessable Entity");

        let (status, _, _) = call("POST", "/orders/1/cancel", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn upstream_failures_map_to_gateway_statuses() {
        let (status, _, body) = call("GET", "/quotes/shipping", None).await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body["detail"], "shipping carrier timed out");

        let (status, _, body) = call("GET", "/quotes/tax", None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["type"], "/errors/bad-gateway");
    }

    #[tokio::test]
    async fn internal_failure_hides_detail() {
        let (status, _, body) = call("GET", "/reports/daily", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["type"], "/errors/internal");
        assert!(body.get("detail").is_none());
        assert!(!body.to_string().contains("locked"));
    }

    #[tokio::test]
    async fn unknown_route_carries_instance() {
        let (status, content_type, body) = call("GET", "/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(content_type.as_deref(), Some(APPLICATION_PROBLEM_JSON));
        assert_eq!(body["instance"], "/nope");
    }

    #[tokio::test]
    async fn malformed_path_id_is_bad_request() {
        let (status, content_type, body) = call("GET", "/orders/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(content_type.as_deref(), Some(APPLICATION_PROBLEM_JSON));
        assert_eq!(body["type"], "/errors/bad-request");
        assert!(body["detail"].is_string());

        let (status, content_type, _) = call("POST", "/orders/abc/cancel", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(content_type.as_deref(), Some(APPLICATION_PROBLEM_JSON));
    }

    #[tokio::test]
    async fn wrong_method_is_method_not_allowed() {
        let (status, content_type, body) = call("DELETE", "/orders/1", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(content_type.as_deref(), Some(APPLICATION_PROBLEM_JSON));
        assert_eq!(body["type"], "/errors/method-not-allowed");
        assert_eq!(body["title"], "Method Not Allowed");
        assert_eq!(body["instance"], "/orders/1");
    }
}
