//! Authentication handlers: login and token refresh.

use axum::Json;
use axum::extract::State;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::AUTH_TAG;
use crate::api::dto::{ApiResponse, AuthTokensResponse, LoginRequest, RefreshRequest};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Authentication routes, mounted at `/auth`.
pub fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(login))
        .routes(routes!(refresh))
}

/// POST /api/auth/login - verify credentials and issue tokens
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = AUTH_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthTokensResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthTokensResponse>>> {
    let (user, tokens) = state
        .services
        .auth
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Login successful",
        AuthTokensResponse::new(user, tokens),
    )))
}

/// POST /api/auth/refresh - exchange a refresh token for a new pair
#[utoipa::path(
    post,
    path = "/auth/refresh",
    tag = AUTH_TAG,
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Tokens refreshed", body = ApiResponse<AuthTokensResponse>),
        (status = 401, description = "Invalid or expired refresh token")
    )
)]
async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RefreshRequest>,
) -> AppResult<Json<ApiResponse<AuthTokensResponse>>> {
    let (user, tokens) = state.services.auth.refresh(&payload.refresh_token).await?;

    Ok(Json(ApiResponse::ok(
        "Token refreshed successfully",
        AuthTokensResponse::new(user, tokens),
    )))
}
