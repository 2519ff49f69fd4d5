//! Serde helpers.
//!
//! Query strings send `?status=` for "no filter", so optional query values
//! go through [`empty_string_as_none`]. JSON partial updates need to tell an
//! absent key apart from an explicit `null`; [`double_option`] does that.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer};

/// Deserializes an optional string, parsing it with [`FromStr`] and mapping
/// blank values to `None`.
///
/// Control characters are rejected; PostgreSQL cannot store NUL in text.
pub fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) if s.chars().any(char::is_control) => Err(serde::de::Error::custom(
            "value must not contain control characters",
        )),
        Some(s) => s.parse::<T>().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Deserializes a field present in the input into `Some(value)`, where
/// `value` may itself be `None` for an explicit `null`.
///
/// Pair with `#[serde(default)]` so an absent key stays `None`.
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[derive(Deserialize)]
    struct Filters {
        #[serde(default, deserialize_with = "empty_string_as_none")]
        teacher: Option<Uuid>,
        #[serde(default, deserialize_with = "empty_string_as_none")]
        grade: Option<String>,
    }

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        teacher: Option<Option<Uuid>>,
    }

    #[test]
    fn test_empty_string_is_none() {
        let f: Filters = serde_json::from_str(r#"{"teacher":"","grade":" "}"#).unwrap();
        assert!(f.teacher.is_none());
        assert!(f.grade.is_none());
    }

    #[test]
    fn test_values_are_parsed() {
        let id = Uuid::new_v4();
        let f: Filters =
            serde_json::from_str(&format!(r#"{{"teacher":"{}","grade":"10"}}"#, id)).unwrap();
        assert_eq!(f.teacher, Some(id));
        assert_eq!(f.grade.as_deref(), Some("10"));
    }

    #[test]
    fn test_invalid_value_is_error() {
        assert!(serde_json::from_str::<Filters>(r#"{"teacher":"nope"}"#).is_err());
    }

    #[test]
    fn test_control_characters_are_rejected() {
        let err = serde_json::from_str::<Filters>(r#"{"grade":"a\u0000b"}"#)
            .err()
            .unwrap();
        assert!(err.to_string().contains("control characters"));
        assert!(serde_json::from_str::<Filters>(r#"{"grade":"10\u0007"}"#).is_err());
    }

    #[test]
    fn test_double_option_distinguishes_null_from_absent() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.teacher, None);

        let null: Patch = serde_json::from_str(r#"{"teacher":null}"#).unwrap();
        assert_eq!(null.teacher, Some(None));

        let id = Uuid::new_v4();
        let set: Patch = serde_json::from_str(&format!(r#"{{"teacher":"{}"}}"#, id)).unwrap();
        assert_eq!(set.teacher, Some(Some(id)));
    }
}
