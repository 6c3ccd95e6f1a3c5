//! Category endpoint handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::CATEGORY_TAG;
use crate::api::dto::{
    ApiResponse, CategoryResponse, CreateCategoryRequest, DeleteCategoryRequest, PageMeta,
    PaginationParams, UpdateCategoryRequest,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};

/// Category routes, all mounted at `/categories`.
pub fn category_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(
        list_categories,
        create_category,
        update_category,
        delete_category
    ))
}

/// GET /api/categories - paginated listing with book counts
#[utoipa::path(
    get,
    path = "/categories",
    tag = CATEGORY_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Categories retrieved", body = ApiResponse<Vec<CategoryResponse>>)
    )
)]
async fn list_categories(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<Json<ApiResponse<Vec<CategoryResponse>>>> {
    let request = params.to_request();
    let (items, total) = state.services.categories.list(request).await?;

    let items: Vec<CategoryResponse> = items.into_iter().map(CategoryResponse::from).collect();
    let meta = PageMeta::new(request, total);
    Ok(Json(
        ApiResponse::ok("Categories retrieved successfully", items).with_meta(meta),
    ))
}

/// POST /api/categories - create a category
#[utoipa::path(
    post,
    path = "/categories",
    tag = CATEGORY_TAG,
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponse>),
        (status = 400, description = "Invalid name"),
        (status = 401, description = "Not authorized"),
        (status = 409, description = "Name already exists")
    )
)]
async fn create_category(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCategoryRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CategoryResponse>>)> {
    let category = state.services.categories.create(&payload.name).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(
            "Category created successfully",
            CategoryResponse::from(category),
        )),
    ))
}

/// PUT /api/categories - rename a category
#[utoipa::path(
    put,
    path = "/categories",
    tag = CATEGORY_TAG,
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated or unchanged", body = ApiResponse<CategoryResponse>),
        (status = 401, description = "Not authorized"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Name already exists")
    )
)]
async fn update_category(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateCategoryRequest>,
) -> AppResult<Json<ApiResponse<CategoryResponse>>> {
    let outcome = state
        .services
        .categories
        .update(payload.id, &payload.name)
        .await?;

    let message = if outcome.is_unchanged() {
        "No changes detected"
    } else {
        "Category updated successfully"
    };
    Ok(Json(ApiResponse::ok(
        message,
        CategoryResponse::from(outcome.into_inner()),
    )))
}

/// DELETE /api/categories - soft-delete a category and detach its books
#[utoipa::path(
    delete,
    path = "/categories",
    tag = CATEGORY_TAG,
    request_body = DeleteCategoryRequest,
    responses(
        (status = 200, description = "Category deleted", body = ApiResponse<serde_json::Value>),
        (status = 401, description = "Not authorized"),
        (status = 404, description = "Category not found")
    )
)]
async fn delete_category(
    State(state): State<AppState>,
    Json(payload): Json<DeleteCategoryRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let detached = state.services.categories.delete(payload.id).await?;
    tracing::debug!(category_id = %payload.id, detached, "category deleted");
    Ok(Json(ApiResponse::message("Category deleted successfully")))
}
