pub mod categories;
pub mod deserializers;
pub mod health;
pub mod questions;
pub mod quizzes;

use crate::db::Repository;
use crate::error::AppError;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// Value of `Access-Control-Allow-Methods` on every response.
pub const ALLOWED_METHODS: &str = "GET,PATCH,POST,DELETE,OPTIONS";
/// Value of `Access-Control-Allow-Headers` on every response.
pub const ALLOWED_HEADERS: &str = "Content-Type";

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
}

impl AppState {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/categories", get(categories::get_categories))
        .route(
            "/categories/:category_id/questions",
            get(categories::get_questions_by_category),
        )
        .route(
            "/questions",
            get(questions::get_questions).post(questions::post_questions),
        )
        .route("/questions/:question_id", delete(questions::delete_question))
        .route("/quizzes", post(quizzes::play_quiz))
        .fallback(not_found)
        .layer(middleware::map_response(json_method_not_allowed))
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound("no route".into())
}

/// Replace the router's empty 405 with the JSON error body, keeping `Allow`.
async fn json_method_not_allowed(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    let allow = response.headers().get(header::ALLOW).cloned();
    let mut rewritten = AppError::MethodNotAllowed.into_response();
    if let Some(allow) = allow {
        rewritten.headers_mut().insert(header::ALLOW, allow);
    }
    rewritten
}
