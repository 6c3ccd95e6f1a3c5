//! Book endpoint handlers.
//!
//! Create and update arrive as multipart forms (text fields plus an
//! optional cover file); the ids for update and delete travel in the body,
//! not the path.

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;

use crate::api::doc::BOOK_TAG;
use crate::api::dto::{ApiResponse, BookResponse, DeleteBookRequest, PageMeta, PaginationParams};
use crate::error::{AppError, AppResult};
use crate::services::{CreateBookInput, UpdateBookInput, UploadedFile};
use crate::state::AppState;
use crate::utils::validate::ValidatedQuery;

/// Book routes, all mounted at `/books`.
pub fn book_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(list_books, create_book, update_book, delete_book))
}

/// GET /api/books - paginated catalog listing
#[utoipa::path(
    get,
    path = "/books",
    tag = BOOK_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Books retrieved", body = ApiResponse<Vec<BookResponse>>)
    )
)]
async fn list_books(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<Json<ApiResponse<Vec<BookResponse>>>> {
    let request = params.to_request();
    let page = state.services.books.list(request).await?;

    let items: Vec<BookResponse> = page.items.into_iter().map(BookResponse::from).collect();
    let meta = PageMeta::new(request, page.total).with_total_stock(page.total_stock);
    Ok(Json(
        ApiResponse::ok("Books retrieved successfully", items).with_meta(meta),
    ))
}

/// POST /api/books - create a book from a multipart form
///
/// Text fields: `title`, `author`, `stock`, `categoryId`; the cover comes
/// as a file field `image` or a text field `imagePath` referencing a
/// previous upload.
#[utoipa::path(
    post,
    path = "/books",
    tag = BOOK_TAG,
    responses(
        (status = 201, description = "Book created", body = ApiResponse<BookResponse>),
        (status = 400, description = "Invalid fields or image"),
        (status = 401, description = "Not authorized"),
        (status = 404, description = "Category not found")
    )
)]
async fn create_book(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<BookResponse>>)> {
    let form = BookForm::parse(multipart).await?;

    let input = CreateBookInput {
        title: form.require("title", form.title.clone())?,
        author: form.require("author", form.author.clone())?,
        stock: parse_stock(&form.require("stock", form.stock.clone())?)?,
        category_id: parse_category_id(&form.require("categoryId", form.category_id.clone())?)?,
        image: form.image,
        image_path: form.image_path,
    };

    let created = state.services.books.create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(
            "Book created successfully",
            BookResponse::from(created),
        )),
    ))
}

/// PUT /api/books - diff-based update from a multipart form
///
/// Requires `id`; all other fields are optional. An unchanged payload
/// issues no write and reports "No changes detected".
#[utoipa::path(
    put,
    path = "/books",
    tag = BOOK_TAG,
    responses(
        (status = 200, description = "Book updated or unchanged", body = ApiResponse<BookResponse>),
        (status = 400, description = "Invalid fields or image"),
        (status = 401, description = "Not authorized"),
        (status = 404, description = "Book or category not found")
    )
)]
async fn update_book(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<BookResponse>>> {
    let form = BookForm::parse(multipart).await?;

    let id = form.require("id", form.id.clone())?;
    let input = UpdateBookInput {
        id: parse_uuid(&id, "id", "Invalid book id")?,
        title: form.title,
        author: form.author,
        stock: form.stock.as_deref().map(parse_stock).transpose()?,
        category_id: form
            .category_id
            .as_deref()
            .map(parse_category_id)
            .transpose()?,
        image: form.image,
    };

    let outcome = state.services.books.update(input).await?;
    let message = if outcome.is_unchanged() {
        "No changes detected"
    } else {
        "Book updated successfully"
    };
    Ok(Json(ApiResponse::ok(
        message,
        BookResponse::from(outcome.into_inner()),
    )))
}

/// DELETE /api/books - soft-delete a book
#[utoipa::path(
    delete,
    path = "/books",
    tag = BOOK_TAG,
    request_body = DeleteBookRequest,
    responses(
        (status = 200, description = "Book deleted", body = ApiResponse<serde_json::Value>),
        (status = 401, description = "Not authorized"),
        (status = 404, description = "Book not found")
    )
)]
async fn delete_book(
    State(state): State<AppState>,
    Json(payload): Json<DeleteBookRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.services.books.delete(payload.id).await?;
    Ok(Json(ApiResponse::message("Book deleted successfully")))
}

/// Raw multipart fields of a book create/update form.
#[derive(Debug, Default)]
struct BookForm {
    id: Option<String>,
    title: Option<String>,
    author: Option<String>,
    stock: Option<String>,
    category_id: Option<String>,
    image: Option<UploadedFile>,
    image_path: Option<String>,
}

impl BookForm {
    async fn parse(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match name.as_str() {
                "image" => {
                    let file_name = field.file_name().unwrap_or("upload").to_string();
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let bytes = field.bytes().await.map_err(bad_multipart)?.to_vec();
                    // Browsers submit an empty part for an untouched file
                    // input; treat it as no image.
                    if !bytes.is_empty() {
                        form.image = Some(UploadedFile {
                            name: file_name,
                            content_type,
                            bytes,
                        });
                    }
                }
                "id" => form.id = Some(field.text().await.map_err(bad_multipart)?),
                "title" => form.title = Some(field.text().await.map_err(bad_multipart)?),
                "author" => form.author = Some(field.text().await.map_err(bad_multipart)?),
                "stock" => form.stock = Some(field.text().await.map_err(bad_multipart)?),
                "categoryId" => {
                    form.category_id = Some(field.text().await.map_err(bad_multipart)?)
                }
                "imagePath" => {
                    let path = field.text().await.map_err(bad_multipart)?;
                    if !path.trim().is_empty() {
                        form.image_path = Some(path);
                    }
                }
                _ => {}
            }
        }
        Ok(form)
    }

    fn require(&self, field: &str, value: Option<String>) -> AppResult<String> {
        value.ok_or_else(|| {
            AppError::validation(field, &format!("Field '{field}' is required"))
        })
    }
}

fn bad_multipart(error: axum::extract::multipart::MultipartError) -> AppError {
    AppError::BadRequest {
        message: format!("Invalid multipart form: {error}"),
    }
}

fn parse_stock(raw: &str) -> AppResult<i32> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::validation("stock", "Stock must be a number"))
}

fn parse_category_id(raw: &str) -> AppResult<Uuid> {
    parse_uuid(raw, "categoryId", "Invalid category id")
}

fn parse_uuid(raw: &str, field: &str, reason: &str) -> AppResult<Uuid> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::validation(field, reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_stock_accepts_padded_number() {
        assert_eq!(parse_stock(" 12 ").unwrap(), 12);
    }

    #[test]
    fn parse_stock_rejects_non_numeric() {
        assert!(matches!(
            parse_stock("dozen"),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn parse_uuid_rejects_garbage() {
        assert!(parse_uuid("not-a-uuid", "id", "Invalid book id").is_err());
        let id = Uuid::new_v4();
        assert_eq!(parse_uuid(&id.to_string(), "id", "x").unwrap(), id);
    }
}
