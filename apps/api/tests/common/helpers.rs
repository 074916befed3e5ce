//! Helpers for asserting on GraphQL and HTTP responses

#![allow(dead_code)]

use async_graphql::{Response, Value};
use axum::body::Body;
use axum::http::Request;

/// Response data as JSON
pub fn data(response: &Response) -> serde_json::Value {
    response
        .data
        .clone()
        .into_json()
        .expect("response data is valid JSON")
}

/// `extensions.code` of every error, in order
pub fn error_codes(response: &Response) -> Vec<String> {
    response
        .errors
        .iter()
        .filter_map(|error| error.extensions.as_ref())
        .filter_map(|extensions| match extensions.get("code") {
            Some(Value::String(code)) => Some(code.clone()),
            _ => None,
        })
        .collect()
}

/// Assert the response failed with exactly one error carrying `code`
pub fn assert_single_error(response: &Response, code: &str) {
    assert_eq!(
        error_codes(response),
        vec![code.to_string()],
        "unexpected errors: {:?}",
        response.errors
    );
}

/// Assert the response succeeded
pub fn assert_ok(response: &Response) {
    assert!(
        response.errors.is_empty(),
        "unexpected errors: {:?}",
        response.errors
    );
}

/// JSON `POST /graphql` request
pub fn graphql_request(query: &str, headers: &[(&str, &str)]) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/graphql")
        .header("content-type", "application/json");

    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }

    let body = serde_json::json!({ "query": query }).to_string();
    builder.body(Body::from(body)).expect("request builds")
}

/// Read a response body as JSON
pub async fn body_json(body: Body) -> serde_json::Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is JSON")
}
