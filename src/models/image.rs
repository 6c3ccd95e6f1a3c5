use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

/// Stored image metadata. The backing file lives in the public directory;
/// `path` is the public URL path under which it is served.
#[derive(Debug, Queryable, Selectable, Clone, PartialEq)]
#[diesel(table_name = crate::schema::images)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Image {
    pub id: Uuid,
    pub path: String,
    /// Original file name as supplied by the client.
    pub name: String,
    pub created_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

/// Insert model for image rows.
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::images)]
pub struct NewImage {
    pub id: Uuid,
    pub path: String,
    pub name: String,
}
