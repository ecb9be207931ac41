use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::query_params::{ANALYTICS_PATH, CRAWLED_SITES_PATH, SEARCH_PATH};

pub mod handlers;
pub mod models;

pub use models::AppState;

pub fn create_router(state: AppState, static_dir: &str) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Page routes
        .route(SEARCH_PATH, get(handlers::search_page))
        .route(ANALYTICS_PATH, get(handlers::analytics_page))
        .route(CRAWLED_SITES_PATH, get(handlers::crawled_sites_page))
        .with_state(state)
        // Stylesheet
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
