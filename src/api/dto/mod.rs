//! Data Transfer Objects for API requests and responses.
//!
//! Everything on the wire is camelCase; the `ApiResponse` envelope wraps
//! every success and error body.

mod auth;
mod book;
mod category;
mod envelope;
mod health;
mod pagination;
mod upload;

pub use auth::{AuthTokensResponse, AuthUserResponse, LoginRequest, RefreshRequest};
pub use book::{BookResponse, DeleteBookRequest, ImageResponse};
pub use category::{
    CategoryResponse, CreateCategoryRequest, DeleteCategoryRequest, UpdateCategoryRequest,
};
pub use envelope::ApiResponse;
pub use health::HealthResponse;
pub use pagination::{PageMeta, PaginationParams};
pub use upload::UploadResponse;
