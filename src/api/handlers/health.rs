//! Health check endpoint.

use axum::Json;
use axum::extract::State;
use diesel_async::RunQueryDsl;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::HealthResponse;
use crate::db::AsyncDbPool;
use crate::state::AppState;

pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(health))
}

/// GET /health - service status with a database connectivity probe
#[utoipa::path(
    get,
    path = "/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service status", body = HealthResponse)
    )
)]
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: state.settings.application.version.clone(),
        database: database_status(&state.db_pool).await.to_string(),
    })
}

async fn database_status(pool: &AsyncDbPool) -> &'static str {
    match pool.get().await {
        Ok(mut conn) => match diesel::sql_query("SELECT 1").execute(&mut conn).await {
            Ok(_) => "up",
            Err(_) => "down",
        },
        Err(_) => "down",
    }
}
