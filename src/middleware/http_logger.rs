use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use std::time::Instant;

use crate::state::AppState;

fn should_ignore_path(path: &str) -> bool {
    matches!(path, "/health" | "/health/")
}

const SENSITIVE_FIELDS: [&str; 14] = [
    "password",
    "new_password",
    "generated_password",
    "token",
    "jwt",
    "access_token",
    "refresh_token",
    "authorization",
    "secret",
    "api_key",
    "credential",
    "credentials",
    "password_hash",
    "issued_credentials",
];

/// Replaces sensitive fields at any depth, so credential lists in import
/// responses never reach the log.
fn filter_sensitive_data(mut value: Value) -> Value {
    if let Value::Object(ref mut map) = value {
        for (key, entry) in map.iter_mut() {
            if SENSITIVE_FIELDS.contains(&key.as_str()) {
                *entry = Value::String("[REDACTED]".to_string());
            } else {
                *entry = filter_sensitive_data(entry.take());
            }
        }
    }
    if let Value::Array(items) = &mut value {
        for item in items.iter_mut() {
            *item = filter_sensitive_data(item.take());
        }
    }
    value
}

fn filter_sensitive_headers(headers: &HeaderMap) -> HeaderMap {
    let mut filtered_headers = headers.clone();

    let sensitive_headers = [
        "authorization",
        "cookie",
        "x-api-key",
        "x-auth-token",
        "bearer",
        "jwt",
        "access-token",
        "refresh-token",
    ];

    for header_name in sensitive_headers {
        if let Ok(name) = header_name.parse::<http::HeaderName>() {
            if filtered_headers.contains_key(&name) {
                filtered_headers.insert(name, HeaderValue::from_static("[REDACTED]"));
            }
        }
    }

    filtered_headers
}

pub async fn http_logger(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> std::result::Result<impl IntoResponse, (StatusCode, String)> {
    let start_time = Instant::now();

    let method = req.method().clone();
    let uri = req.uri().clone();
    let path = uri.path();
    let version = req.version();
    let req_headers = req.headers().clone();
    let x_request_id = req_headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if should_ignore_path(path) {
        return Ok(next.run(req).await);
    }

    // Check if request is a file upload
    let is_file_upload = req_headers
        .get("content-type")
        .and_then(|ct| ct.to_str().ok())
        .map(|ct| ct.starts_with("multipart/form-data"))
        .unwrap_or(false);

    let (parts, body) = req.into_parts();
    let bytes = buffer_body("request", body).await?;
    let bytes_clone = bytes.clone();

    // Only log body if not a file upload
    let req_body = if !is_file_upload {
        let body_str = String::from_utf8_lossy(bytes_clone.as_ref());
        match serde_json::from_str::<Value>(&body_str) {
            Ok(json) => filter_sensitive_data(json),
            Err(_) => Value::Object(serde_json::Map::new()),
        }
    } else {
        Value::Object(serde_json::Map::new())
    };

    // Reconstruct request with original body
    let req = Request::from_parts(parts, Body::from(bytes));

    let mut response = next.run(req).await;

    let latency = start_time.elapsed();

    let status = response.status();
    let res_headers = response.headers().clone();

    let should_log_body = matches!(method.as_str(), "POST" | "PUT" | "PATCH");
    let res_body = if should_log_body {
        let (parts, body) = response.into_parts();
        let bytes = buffer_body("response", body).await?;
        let body_str = String::from_utf8_lossy(&bytes);
        let json_body = match serde_json::from_str::<Value>(&body_str) {
            Ok(json) => filter_sensitive_data(json),
            Err(_) => Value::Object(serde_json::Map::new()),
        };
        response = Response::from_parts(parts, Body::from(bytes));
        json_body
    } else {
        Value::Object(serde_json::Map::new())
    };

    if method == Method::OPTIONS {
        // ignore OPTIONS requests
        return Ok(response);
    }

    let filtered_req_headers = filter_sensitive_headers(&req_headers);
    let filtered_res_headers = filter_sensitive_headers(&res_headers);

    tracing::info!(
        method = ?method,
        uri = ?uri,
        path = %path,
        x_request_id = %x_request_id,
        version = ?version,
        req_headers = ?filtered_req_headers,
        req_body = %req_body,
        status = ?status,
        latency_ms = latency.as_millis(),
        latency_micros = latency.as_micros(),
        res_headers = ?filtered_res_headers,
        res_body = %res_body,
        app_env = %state.app_env,
        "HTTP request completed"
    );

    Ok(response)
}

pub async fn buffer_body<B>(
    direction: &str,
    body: B,
) -> std::result::Result<Bytes, (StatusCode, String)>
where
    B: BodyExt,
    B::Error: std::fmt::Display,
{
    let bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) => {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("failed to read {direction} body: {err}"),
            ));
        }
    };

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn redacts_nested_credentials() {
        let body = json!({
            "email": "t@example.com",
            "password": "Secret123",
            "teacher": { "employee_id": "TCH00001", "generated_password": "Abc123def456" },
            "issued_credentials": [{ "password": "x" }]
        });

        let filtered = filter_sensitive_data(body);
        assert_eq!(filtered["email"], "t@example.com");
        assert_eq!(filtered["password"], "[REDACTED]");
        assert_eq!(filtered["teacher"]["employee_id"], "TCH00001");
        assert_eq!(filtered["teacher"]["generated_password"], "[REDACTED]");
        assert_eq!(filtered["issued_credentials"], "[REDACTED]");
    }

    #[test]
    fn redacts_authorization_header() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc"));
        headers.insert("accept", HeaderValue::from_static("*/*"));

        let filtered = filter_sensitive_headers(&headers);
        assert_eq!(filtered["authorization"], "[REDACTED]");
        assert_eq!(filtered["accept"], "*/*");
    }
}
