//! Admin account creation. Registration over HTTP never grants `admin`.

use schoolhub_core::hash_password;
use schoolhub_db::unique_violation;
use schoolhub_models::{User, UserRole};
use sqlx::PgPool;
use validator::Validate;

/// Admin account input, held to the same rules as self-registration.
#[derive(Debug, Validate)]
pub struct NewAdmin {
    #[validate(length(min = 1, max = 150, message = "username must be 1-150 characters"))]
    pub username: String,
    #[validate(
        email(message = "email must be a valid email address"),
        length(max = 254, message = "email must be at most 254 characters")
    )]
    pub email: String,
    #[validate(length(max = 100, message = "first_name must be at most 100 characters"))]
    pub first_name: String,
    #[validate(length(max = 100, message = "last_name must be at most 100 characters"))]
    pub last_name: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

/// Checks the fields an interactive prompt cannot constrain.
pub fn validate(admin: &NewAdmin) -> Result<(), String> {
    admin.validate().map_err(|errors| {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        fields
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field))
                })
            })
            .collect::<Vec<_>>()
            .join(", ")
    })
}

pub async fn create_admin(db: &PgPool, admin: &NewAdmin) -> Result<User, Box<dyn std::error::Error>> {
    validate(admin)?;

    let hashed_password =
        hash_password(&admin.password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (username, email, password, first_name, last_name, role)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id, username, email, first_name, last_name, role, created_at, updated_at",
    )
    .bind(&admin.username)
    .bind(&admin.email)
    .bind(&hashed_password)
    .bind(&admin.first_name)
    .bind(&admin.last_name)
    .bind(UserRole::Admin)
    .fetch_one(db)
    .await
    .map_err(|e| -> Box<dyn std::error::Error> {
        match unique_violation(&e).as_deref() {
            Some("users_username_key") => "A user with this username already exists".into(),
            Some("users_email_key") => "A user with this email already exists".into(),
            _ => e.into(),
        }
    })?;

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> NewAdmin {
        NewAdmin {
            username: "root".to_string(),
            email: "root@example.com".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            password: "password123".to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_complete_input() {
        assert!(validate(&admin()).is_ok());
    }

    #[test]
    fn test_validate_rejects_short_password() {
        let input = NewAdmin {
            password: "short".to_string(),
            ..admin()
        };
        assert_eq!(
            validate(&input).unwrap_err(),
            "password must be at least 8 characters"
        );
    }

    #[test]
    fn test_validate_rejects_empty_username() {
        let input = NewAdmin {
            username: String::new(),
            ..admin()
        };
        assert!(validate(&input).unwrap_err().contains("username"));
    }

    #[test]
    fn test_validate_rejects_incomplete_email() {
        let input = NewAdmin {
            email: "a@".to_string(),
            ..admin()
        };
        assert_eq!(
            validate(&input).unwrap_err(),
            "email must be a valid email address"
        );
    }

    #[test]
    fn test_validate_counts_username_characters() {
        let multibyte = NewAdmin {
            username: "é".repeat(100),
            ..admin()
        };
        assert!(validate(&multibyte).is_ok());

        let too_long = NewAdmin {
            username: "a".repeat(151),
            ..admin()
        };
        assert!(validate(&too_long).is_err());
    }
}
