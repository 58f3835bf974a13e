//! Router assembly and shared state for the board API.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::domains::jobs::{BoardCache, JobStore, DEFAULT_PAGE_SIZE};
use crate::server::routes::{
    board_handler, create_job_handler, delete_job_handler, get_job_handler, health_handler,
    posted_by_handler, update_job_handler,
};
use crate::store::JobCollection;

/// State handed to every handler via `Extension`.
#[derive(Clone)]
pub struct AppState {
    pub store: JobStore,
    pub cache: Arc<BoardCache>,
    pub page_size: usize,
}

/// Build the Axum application router over any backing collection.
///
/// The same router serves the Postgres store in production and the
/// in-memory store in tests and `STORE=memory` runs.
pub fn build_app(collection: Arc<dyn JobCollection>) -> Router {
    let store = JobStore::new(collection);
    let cache = Arc::new(BoardCache::new(store.clone()));

    let app_state = AppState {
        store,
        cache,
        page_size: DEFAULT_PAGE_SIZE,
    };

    // CORS configuration - allow any origin, the board is a public API
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/jobs", get(board_handler).post(create_job_handler))
        .route(
            "/api/jobs/:id",
            get(get_job_handler)
                .patch(update_job_handler)
                .delete(delete_job_handler),
        )
        .route("/api/jobs/posted-by/:email", get(posted_by_handler))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
