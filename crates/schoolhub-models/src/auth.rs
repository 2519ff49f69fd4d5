//! Authentication request and response bodies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::users::{User, UserRole};

/// Self-service account registration.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 150, message = "username must be 1-150 characters"))]
    #[schema(example = "jdoe")]
    pub username: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    #[schema(example = "password123")]
    pub password: String,
    #[validate(
        email(message = "email must be a valid email address"),
        length(max = 254, message = "email must be at most 254 characters")
    )]
    #[schema(example = "jdoe@example.com")]
    pub email: String,
    #[validate(length(max = 100, message = "first_name must be at most 100 characters"))]
    pub first_name: Option<String>,
    #[validate(length(max = 100, message = "last_name must be at most 100 characters"))]
    pub last_name: Option<String>,
    /// `student` (default) or `teacher`.
    pub role: Option<UserRole>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    #[schema(example = "jdoe")]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "password123")]
    pub password: String,
}

/// Tokens plus the account they were issued for.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub access: String,
    pub refresh: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "refresh is required"))]
    pub refresh: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccessTokenResponse {
    pub access: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(username: &str, password: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            email: email.to_string(),
            first_name: None,
            last_name: None,
            role: None,
        }
    }

    #[test]
    fn test_register_valid() {
        assert!(register("jdoe", "password123", "jdoe@example.com").validate().is_ok());
    }

    #[test]
    fn test_register_rejects_short_password() {
        let errors = register("jdoe", "short", "jdoe@example.com")
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_register_rejects_bad_email_and_empty_username() {
        let errors = register("", "password123", "not-an-email").validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("username"));
    }

    #[test]
    fn test_register_missing_fields_fail_to_deserialize() {
        let result = serde_json::from_str::<RegisterRequest>(r#"{"username":"jdoe"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_login_requires_non_empty_fields() {
        let login = LoginRequest {
            username: String::new(),
            password: String::new(),
        };
        assert_eq!(login.validate().unwrap_err().field_errors().len(), 2);
    }

    #[test]
    fn test_register_rejects_email_over_254_characters() {
        let email = format!("{}@{}.com", "a".repeat(60), vec!["b".repeat(60); 4].join("."));
        let errors = register("jdoe", "password123", &email).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }
}
