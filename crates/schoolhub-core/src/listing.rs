//! Helpers shared by list endpoints: ordering and search.
//!
//! Ordering comes from an `ordering` query parameter such as `last_name` or
//! `-created_at`. Only whitelisted columns are accepted, so the resulting
//! `ORDER BY` fragment can be pushed into SQL without binding.

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// A validated `ORDER BY` column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ordering {
    pub column: &'static str,
    pub direction: SortDirection,
}

impl Ordering {
    /// Default ordering for list endpoints: newest first.
    pub const NEWEST_FIRST: Ordering = Ordering {
        column: "created_at",
        direction: SortDirection::Desc,
    };

    /// Parses an `ordering` parameter against the allowed column names.
    ///
    /// A leading `-` selects descending order. `None` or an empty value yields
    /// `default`.
    ///
    /// # Errors
    ///
    /// Returns a 400 error naming the allowed fields when the column is unknown.
    pub fn parse(
        raw: Option<&str>,
        allowed: &[&'static str],
        default: Ordering,
    ) -> Result<Ordering, AppError> {
        let raw = match raw.map(str::trim) {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(default),
        };

        let (name, direction) = match raw.strip_prefix('-') {
            Some(name) => (name, SortDirection::Desc),
            None => (raw, SortDirection::Asc),
        };

        allowed
            .iter()
            .copied()
            .find(|column| *column == name)
            .map(|column| Ordering {
                column,
                direction,
            })
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Invalid ordering field '{}'. Allowed: {}",
                    name,
                    allowed.join(", ")
                ))
            })
    }

    /// Renders `<prefix><column> <dir>, <prefix>id <dir>` so equal sort keys
    /// still page deterministically.
    pub fn to_sql(&self, table_prefix: &str) -> String {
        let dir = self.direction.as_sql();
        format!(
            "{prefix}{column} {dir}, {prefix}id {dir}",
            prefix = table_prefix,
            column = self.column,
            dir = dir
        )
    }
}

/// Builds an `ILIKE` pattern matching `term` as a literal substring.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    const FIELDS: &[&str] = &["first_name", "last_name", "created_at"];

    #[test]
    fn test_parse_defaults_when_missing() {
        assert_eq!(
            Ordering::parse(None, FIELDS, Ordering::NEWEST_FIRST).unwrap(),
            Ordering::NEWEST_FIRST
        );
        assert_eq!(
            Ordering::parse(Some("  "), FIELDS, Ordering::NEWEST_FIRST).unwrap(),
            Ordering::NEWEST_FIRST
        );
    }

    #[test]
    fn test_parse_ascending_and_descending() {
        let asc = Ordering::parse(Some("last_name"), FIELDS, Ordering::NEWEST_FIRST).unwrap();
        assert_eq!(asc.column, "last_name");
        assert_eq!(asc.direction, SortDirection::Asc);

        let desc = Ordering::parse(Some("-first_name"), FIELDS, Ordering::NEWEST_FIRST).unwrap();
        assert_eq!(desc.column, "first_name");
        assert_eq!(desc.direction, SortDirection::Desc);
    }

    #[test]
    fn test_parse_rejects_unknown_column() {
        let err = Ordering::parse(Some("password"), FIELDS, Ordering::NEWEST_FIRST).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.error.to_string().contains("password"));
    }

    #[test]
    fn test_parse_rejects_injection() {
        assert!(
            Ordering::parse(
                Some("last_name; DROP TABLE teachers"),
                FIELDS,
                Ordering::NEWEST_FIRST
            )
            .is_err()
        );
    }

    #[test]
    fn test_to_sql_appends_id_tiebreaker() {
        let ordering = Ordering::parse(Some("-last_name"), FIELDS, Ordering::NEWEST_FIRST).unwrap();
        assert_eq!(ordering.to_sql("t."), "t.last_name DESC, t.id DESC");
        assert_eq!(
            Ordering::NEWEST_FIRST.to_sql(""),
            "created_at DESC, id DESC"
        );
    }

    #[test]
    fn test_like_pattern_plain() {
        assert_eq!(like_pattern("smith"), "%smith%");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }
}
