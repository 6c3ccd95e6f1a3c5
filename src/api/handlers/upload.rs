//! Standalone image upload handler.

use axum::Json;
use axum::extract::{Multipart, State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::UPLOAD_TAG;
use crate::api::dto::{ApiResponse, UploadResponse};
use crate::error::{AppError, AppResult};
use crate::services::UploadedFile;
use crate::state::AppState;

pub fn upload_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(upload_file))
}

/// POST /api/upload - store an image in the public directory
///
/// Multipart field `file`; only `image/*` content up to 5 MiB is accepted.
/// The stored path is returned for a later book create/update.
#[utoipa::path(
    post,
    path = "/upload",
    tag = UPLOAD_TAG,
    responses(
        (status = 200, description = "File stored", body = ApiResponse<UploadResponse>),
        (status = 400, description = "Missing, non-image or oversized file"),
        (status = 401, description = "Not authorized")
    )
)]
async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<UploadResponse>>> {
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest {
            message: format!("Invalid multipart form: {e}"),
        }
    })? {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest {
                message: format!("Invalid multipart form: {e}"),
            })?
            .to_vec();
        file = Some(UploadedFile {
            name,
            content_type,
            bytes,
        });
    }

    let file = file.ok_or_else(|| AppError::validation("file", "File is required"))?;
    let stored = state.services.uploads.store(file).await?;
    Ok(Json(ApiResponse::ok(
        "File uploaded successfully",
        UploadResponse::from(stored),
    )))
}
