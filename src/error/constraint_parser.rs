use std::sync::OnceLock;

use regex::Regex;

/// Parses PostgreSQL constraint violation messages into structured pieces.
///
/// Used by `DatabaseErrorConverter` to turn raw constraint errors (for
/// example the partial unique index on category names) into `Duplicate` and
/// `Validation` variants with entity/field/value detail.
pub struct ConstraintParser;

struct RegexPatterns {
    key_value: Regex,
    column_name: Regex,
    table_name: Regex,
}

impl RegexPatterns {
    fn new() -> Self {
        Self {
            // "Key (name)=(Fiksi) already exists."
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").unwrap(),
            column_name: Regex::new(r#"column "([^"]+)""#).unwrap(),
            table_name: Regex::new(r#"table "([^"]+)""#).unwrap(),
        }
    }
}

static REGEX_PATTERNS: OnceLock<RegexPatterns> = OnceLock::new();

impl ConstraintParser {
    fn patterns() -> &'static RegexPatterns {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new)
    }

    /// Extracts (entity, field, value) from a unique violation.
    ///
    /// Prefers the constraint name ("categories_name_key" -> categories/name)
    /// and falls back to the message detail for both field and value.
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        if let Some(constraint) = constraint_name {
            if let Some((entity, field)) = Self::parse_constraint_name(constraint) {
                let value = Self::extract_key_value(message)
                    .map(|(_, v)| v)
                    .unwrap_or_else(|| "duplicate_value".to_string());
                return Some((entity, field, value));
            }
        }

        let (field, value) = Self::extract_key_value(message)?;
        let entity =
            Self::extract_table(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Extracts (entity, field) from a not-null violation message.
    pub fn parse_not_null_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        let field = Self::extract_column(message)?;
        let entity = Self::extract_table(message)
            .or_else(|| constraint_name.and_then(|c| Self::parse_constraint_name(c).map(|(e, _)| e)))
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    /// Extracts (entity, field, referenced value) from a foreign key
    /// violation, e.g. "books_category_id_fkey" plus "Key (category_id)=(…)".
    pub fn parse_foreign_key_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        if let Some(constraint) = constraint_name {
            if let Some((entity, field)) = Self::parse_fkey_constraint_name(constraint) {
                let value = Self::extract_key_value(message)
                    .map(|(_, v)| v)
                    .unwrap_or_else(|| "invalid_reference".to_string());
                return Some((entity, field, value));
            }
        }

        let (field, value) = Self::extract_key_value(message)?;
        let entity =
            Self::extract_table(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Splits "categories_name_key" style constraint names into
    /// (entity, field). Requires at least entity + field + suffix.
    pub fn parse_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let parts: Vec<&str> = constraint_name.split('_').collect();
        if parts.len() >= 3 {
            return Some((parts[0].to_string(), parts[1].to_string()));
        }
        None
    }

    /// Splits "books_category_id_fkey" into ("books", "category_id"),
    /// keeping multi-part field names intact.
    pub fn parse_fkey_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let without_suffix = constraint_name.strip_suffix("_fkey")?;
        let parts: Vec<&str> = without_suffix.split('_').collect();
        if parts.len() >= 2 {
            return Some((parts[0].to_string(), parts[1..].join("_")));
        }
        None
    }

    fn extract_column(message: &str) -> Option<String> {
        Self::patterns()
            .column_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    fn extract_table(message: &str) -> Option<String> {
        Self::patterns()
            .table_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    fn extract_key_value(message: &str) -> Option<(String, String)> {
        Self::patterns().key_value.captures(message).and_then(|caps| {
            let field = caps.get(1)?.as_str().to_string();
            let value = caps.get(2)?.as_str().to_string();
            Some((field, value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_unique_violation_from_constraint_name() {
        let message = "duplicate key value violates unique constraint \"categories_name_key\"\nDETAIL: Key (name)=(Fiksi) already exists.";
        let result = ConstraintParser::parse_unique_violation(message, Some("categories_name_key"));
        assert_eq!(
            result,
            Some((
                "categories".to_string(),
                "name".to_string(),
                "Fiksi".to_string()
            ))
        );
    }

    #[test]
    fn parses_unique_violation_from_message_only() {
        let message = "duplicate key value violates unique constraint\nDETAIL: Key (email)=(admin@local.com) already exists.";
        let result = ConstraintParser::parse_unique_violation(message, None);
        assert_eq!(
            result,
            Some((
                "resource".to_string(),
                "email".to_string(),
                "admin@local.com".to_string()
            ))
        );
    }

    #[test]
    fn parses_foreign_key_violation() {
        let message = "insert or update on table \"books\" violates foreign key constraint \"books_category_id_fkey\"\nDETAIL: Key (category_id)=(7a3f...) is not present in table \"categories\".";
        let result =
            ConstraintParser::parse_foreign_key_violation(message, Some("books_category_id_fkey"));
        assert_eq!(
            result,
            Some((
                "books".to_string(),
                "category_id".to_string(),
                "7a3f...".to_string()
            ))
        );
    }

    #[test]
    fn parses_not_null_violation() {
        let message = "null value in column \"title\" violates not-null constraint";
        let result = ConstraintParser::parse_not_null_violation(message, None);
        assert_eq!(result, Some(("resource".to_string(), "title".to_string())));
    }

    #[test]
    fn unrelated_messages_parse_to_none() {
        let message = "connection reset by peer";
        assert_eq!(ConstraintParser::parse_unique_violation(message, None), None);
        assert_eq!(
            ConstraintParser::parse_not_null_violation(message, None),
            None
        );
        assert_eq!(
            ConstraintParser::parse_foreign_key_violation(message, None),
            None
        );
    }

    #[test]
    fn fkey_constraint_name_keeps_multi_part_fields() {
        assert_eq!(
            ConstraintParser::parse_fkey_constraint_name("books_image_id_fkey"),
            Some(("books".to_string(), "image_id".to_string()))
        );
        assert_eq!(
            ConstraintParser::parse_fkey_constraint_name("not_a_foreign_key"),
            None
        );
    }
}
