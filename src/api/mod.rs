//! API handlers and router for the catalog REST endpoints

pub mod books;
pub mod health;
pub mod openapi;

use std::convert::Infallible;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{header, request::Parts, Method},
    routing::{delete, get, post, put},
    Router,
};
use serde::de::DeserializeOwned;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::{AppError, AppResult},
    models::book::BookIdQuery,
    AppState,
};

/// Build the application router with all routes.
///
/// Every response carries permissive CORS headers and any `OPTIONS`
/// request is answered as a preflight (200, empty body).
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Catalog
        .route("/api/books", get(books::list_books))
        .route("/api/add", post(books::add_book))
        .route("/api/borrow", get(books::borrow_book))
        .route("/api/return", get(books::return_book))
        .route("/api/update", put(books::update_book))
        .route("/api/delete", delete(books::delete_book))
        .with_state(state);

    api.merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// JSON body extractor that reports every failure as `MalformedInput`.
///
/// Only the first JSON value of the body is decoded and the content type is
/// not checked, so clients posting JSON as `text/plain` are still served.
/// A `null` body decodes to `T::default()`.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::MalformedInput(e.body_text()))?;

        decode_first(&bytes).map(JsonBody)
    }
}

fn decode_first<T: DeserializeOwned + Default>(bytes: &[u8]) -> AppResult<T> {
    serde_json::Deserializer::from_slice(bytes)
        .into_iter::<Option<T>>()
        .next()
        .ok_or_else(|| AppError::MalformedInput("empty body".to_string()))?
        .map(Option::unwrap_or_default)
        .map_err(|e| AppError::MalformedInput(e.to_string()))
}

/// The `?id=` extractor never rejects: a malformed query string counts as
/// having no `id`, and repeated `id` pairs resolve to the first one.
#[async_trait]
impl<S> FromRequestParts<S> for BookIdQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();
        Ok(BookIdQuery::from_pairs(pairs))
    }
}
