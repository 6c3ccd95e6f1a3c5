//! Router configuration.
//!
//! Route groups are mounted under `/api`; the auth gate wraps the catalog
//! group so reads stay public while mutations require credentials. Stored
//! images are served statically from the public directory.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{logging_middleware, request_id_middleware, require_auth};
use crate::state::AppState;

/// Upper bound for request bodies; leaves headroom over the 5 MiB image
/// limit for the remaining form fields.
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Creates the application router with all routes and middleware.
///
/// Middleware is applied in reverse order of declaration, so the request
/// ID runs first and logging sees the assigned ID.
pub fn create_router(state: AppState) -> Router {
    let catalog = OpenApiRouter::new()
        .merge(handlers::books::book_routes())
        .merge(handlers::categories::category_routes())
        .merge(handlers::upload::upload_routes())
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let api = OpenApiRouter::new()
        .merge(catalog)
        .merge(handlers::auth::auth_routes());

    let (router, api_doc) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", api)
        .merge(handlers::health::health_routes())
        .split_for_parts();

    let public_prefix = state.settings.storage.public_prefix.clone();
    let public_dir = state.settings.storage.public_dir.clone();

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api_doc))
        .nest_service(&public_prefix, ServeDir::new(public_dir))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
