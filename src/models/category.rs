use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

/// Category read model.
///
/// A `deleted_at` timestamp marks the row as soft-deleted; repository reads
/// always narrow to `deleted_at IS NULL`.
#[derive(Debug, Queryable, Selectable, Clone, PartialEq)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

/// Insert model for new categories. The id is generated in the service layer.
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory {
    pub id: Uuid,
    pub name: String,
}
