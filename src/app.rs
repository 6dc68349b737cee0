use crate::api_docs::ApiDoc;
use crate::config::Config;
use crate::middleware::http_logger::http_logger;
use crate::routes;
use crate::state::AppState;
use axum::Router;
use axum::middleware;
use axum::{Json, routing::get};
use http::header;
use std::collections::HashSet;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    ServiceBuilderExt,
    cors::{AllowOrigin, Any, CorsLayer},
    propagate_header::PropagateHeaderLayer,
};
use utoipa::OpenApi;

pub fn create_app(state: AppState, config: &Config) -> Router {
    let mut router = Router::new()
        .merge(routes::health::create_route())
        .merge(routes::auth::create_route())
        .merge(routes::teachers::create_route())
        .merge(routes::students::create_route())
        .merge(routes::tenants::create_route());

    if config.openapi_enabled {
        router = router.route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        );
    }

    let sensitive_headers: Arc<[_]> = vec![header::AUTHORIZATION, header::COOKIE].into();

    // Axum middleware sits outside the tower ServiceBuilder stack.
    let router = router
        .layer(middleware::from_fn_with_state(state.clone(), http_logger))
        .with_state(state);

    let middleware = ServiceBuilder::new()
        .layer(cors_layer(&config.cors_allowed_origins))
        .layer(PropagateHeaderLayer::new(header::HeaderName::from_static(
            "x-request-id",
        )))
        .sensitive_request_headers(sensitive_headers.clone())
        .sensitive_response_headers(sensitive_headers)
        .compression();

    router.layer(middleware)
}

fn cors_layer(allowed: &str) -> CorsLayer {
    let allowed_headers = [
        header::CONTENT_TYPE,
        header::AUTHORIZATION,
        header::ACCEPT,
        header::ACCEPT_LANGUAGE,
    ];

    let allowed_methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::PUT,
        http::Method::DELETE,
        http::Method::PATCH,
        http::Method::OPTIONS,
    ];

    if allowed == "*" {
        // Credentials cannot be combined with a wildcard origin.
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(allowed_methods)
            .allow_headers(allowed_headers)
            .allow_credentials(false);
    }

    let allowed_origins: HashSet<&str> = allowed.split(',').map(str::trim).collect();
    let origins: Vec<http::HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(allowed_methods)
        .allow_headers(allowed_headers)
        .allow_credentials(true)
}
