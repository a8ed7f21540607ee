//! API Gateway (HTTP API, payload v2) request accessors and response shaping

use aws_lambda_events::apigw::{ApiGatewayV2httpRequest, ApiGatewayV2httpResponse};
use aws_lambda_events::encodings::Body;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue};
use serde::Serialize;
use serde_json::{json, Value};

/// Status and JSON body of a handler outcome, before it is wrapped for API Gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn ok<T: Serialize>(body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self::new(200, body),
            Err(error) => {
                tracing::error!(?error, "failed to serialize response body");
                Self::new(500, json!({ "message": "Failed to serialize response" }))
            }
        }
    }

    pub fn message(status: u16, message: impl Into<String>) -> Self {
        Self::new(status, json!({ "message": message.into() }))
    }
}

impl From<ApiResponse> for ApiGatewayV2httpResponse {
    fn from(response: ApiResponse) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        ApiGatewayV2httpResponse {
            status_code: i64::from(response.status),
            headers,
            multi_value_headers: HeaderMap::new(),
            body: Some(Body::Text(response.body.to_string())),
            is_base64_encoded: false,
            cookies: Vec::new(),
        }
    }
}

pub fn path_parameter<'a>(request: &'a ApiGatewayV2httpRequest, name: &str) -> Option<&'a str> {
    request.path_parameters.get(name).map(String::as_str)
}

/// First value of a query string parameter.
pub fn query_parameter<'a>(request: &'a ApiGatewayV2httpRequest, name: &str) -> Option<&'a str> {
    request.query_string_parameters.first(name)
}

/// Logs the raw inbound event before any processing.
pub fn log_event(request: &ApiGatewayV2httpRequest) {
    match serde_json::to_string(request) {
        Ok(event) => tracing::info!(%event, "[EVENT]"),
        Err(error) => tracing::info!(?request, ?error, "[EVENT] (not serializable)"),
    }
}
