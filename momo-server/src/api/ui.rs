//! Embedded web pages

use axum::{
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use crate::AppState;

const HOME_HTML: &str = include_str!("../../assets/home.html");
const APP_HTML: &str = include_str!("../../assets/index.html");

/// GET /
pub async fn home_page() -> impl IntoResponse {
    Html(HOME_HTML)
}

/// GET /app
///
/// Memory form that drives the JSON endpoints
pub async fn app_page() -> impl IntoResponse {
    Html(APP_HTML)
}

pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home_page))
        .route("/app", get(app_page))
}
