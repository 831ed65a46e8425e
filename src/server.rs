use crate::core::service::{Endpoint, ProxyService, ROUTE_NOT_FOUND};
use crate::core::{ApiResponse, QueryParams};
use axum::{
    extract::{RawQuery, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub type AppState = Arc<ProxyService>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(Endpoint::Postal.path(), get(postal))
        .route(Endpoint::Registry.path(), get(registry))
        .route(Endpoint::Vehicle.path(), get(vehicle))
        .route(Endpoint::News.path(), get(news))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn not_found() -> ApiResponse {
    ApiResponse::message(404, ROUTE_NOT_FOUND)
}

async fn postal(State(service): State<AppState>, RawQuery(query): RawQuery) -> ApiResponse {
    dispatch(&service, Endpoint::Postal, query).await
}

async fn registry(State(service): State<AppState>, RawQuery(query): RawQuery) -> ApiResponse {
    dispatch(&service, Endpoint::Registry, query).await
}

async fn vehicle(State(service): State<AppState>, RawQuery(query): RawQuery) -> ApiResponse {
    dispatch(&service, Endpoint::Vehicle, query).await
}

async fn news(State(service): State<AppState>, RawQuery(query): RawQuery) -> ApiResponse {
    dispatch(&service, Endpoint::News, query).await
}

async fn dispatch(service: &ProxyService, endpoint: Endpoint, query: Option<String>) -> ApiResponse {
    let params = QueryParams::parse(query.as_deref().unwrap_or_default());
    service.dispatch(endpoint, &params).await
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let content_type = HeaderValue::from_static(self.body.content_type());
        let cache = self.cache.map(|c| HeaderValue::from_static(c.header_value()));

        let mut response = (status, self.body.into_string()).into_response();
        let headers = response.headers_mut();
        headers.insert(header::CONTENT_TYPE, content_type);
        if let Some(cache) = cache {
            headers.insert(header::CACHE_CONTROL, cache);
        }
        response
    }
}
