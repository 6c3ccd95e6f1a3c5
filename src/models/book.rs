use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

/// Book read model.
#[derive(Debug, Queryable, Selectable, Clone, PartialEq)]
#[diesel(table_name = crate::schema::books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub stock: i32,
    pub category_id: Option<Uuid>,
    pub image_id: Option<Uuid>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

/// Insert model for new books.
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::books)]
pub struct NewBook {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub stock: i32,
    pub category_id: Option<Uuid>,
    pub image_id: Option<Uuid>,
}

/// Changeset for partial book updates. `None` fields are left untouched,
/// so only the diff computed by the service is ever written. `updated_at`
/// is always bumped when a changeset is applied.
#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::books)]
pub struct BookChanges {
    pub title: Option<String>,
    pub author: Option<String>,
    pub stock: Option<i32>,
    pub category_id: Option<Uuid>,
    pub image_id: Option<Uuid>,
    pub updated_at: Option<NaiveDateTime>,
}

impl BookChanges {
    /// True when no field would be written.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.stock.is_none()
            && self.category_id.is_none()
            && self.image_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_changeset_reports_empty() {
        assert!(BookChanges::default().is_empty());
    }

    #[test]
    fn changeset_with_field_is_not_empty() {
        let changes = BookChanges {
            title: Some("Laskar Pelangi".to_string()),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }
}
