use sqlx::PgPool;
use tracing::instrument;

use schoolhub_auth::jwt::{create_access_token, create_refresh_token, verify_refresh_token};
use schoolhub_config::JwtConfig;
use schoolhub_core::{AppError, hash_password, verify_password};
use schoolhub_db::unique_violation;
use schoolhub_models::UserId;
use schoolhub_observability::{
    track_jwt_issued, track_login_failure, track_login_success, track_user_registered,
};

use super::model::{
    AccessTokenResponse, AuthResponse, LoginRequest, RefreshTokenRequest, RegisterRequest,
    TokenPairResponse, User,
};

const USER_COLUMNS: &str =
    "id, username, email, first_name, last_name, role, created_at, updated_at";

const INVALID_CREDENTIALS: &str = "Invalid credentials";

fn map_user_write_error(err: sqlx::Error) -> AppError {
    match unique_violation(&err).as_deref() {
        Some("users_username_key") => AppError::conflict("A user with that username already exists"),
        Some("users_email_key") => AppError::conflict("A user with that email already exists"),
        Some(_) => AppError::conflict("User already exists"),
        None => AppError::database(err),
    }
}

pub struct AuthService;

impl AuthService {
    fn issue_pair(user: &User, jwt_config: &JwtConfig) -> Result<TokenPairResponse, AppError> {
        let access = create_access_token(user.id, &user.username, user.role, jwt_config)?;
        track_jwt_issued("access");
        let refresh = create_refresh_token(user.id, &user.username, jwt_config)?;
        track_jwt_issued("refresh");

        Ok(TokenPairResponse { access, refresh })
    }

    #[instrument(skip(db, dto, jwt_config), fields(username = %dto.username))]
    pub async fn register_user(
        db: &PgPool,
        dto: RegisterRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let role = dto.role.unwrap_or_default();
        if !role.is_self_assignable() {
            return Err(AppError::validation(
                "role must be one of: student, teacher",
            ));
        }

        let username_taken =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(&dto.username)
                .fetch_one(db)
                .await?;
        if username_taken {
            return Err(AppError::conflict(
                "A user with that username already exists",
            ));
        }

        let email_taken =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(&dto.email)
                .fetch_one(db)
                .await?;
        if email_taken {
            return Err(AppError::conflict("A user with that email already exists"));
        }

        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, email, password, first_name, last_name, role)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&dto.username)
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(dto.first_name.unwrap_or_default())
        .bind(dto.last_name.unwrap_or_default())
        .bind(role)
        .fetch_one(db)
        .await
        .map_err(map_user_write_error)?;

        track_user_registered(role.as_str());

        let TokenPairResponse { access, refresh } = Self::issue_pair(&user, jwt_config)?;
        Ok(AuthResponse {
            access,
            refresh,
            user,
        })
    }

    /// Checks a username and password and returns the matching account.
    #[instrument(skip(db, dto), fields(username = %dto.username))]
    pub async fn authenticate(db: &PgPool, dto: &LoginRequest) -> Result<User, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            #[sqlx(flatten)]
            user: User,
            password: String,
        }

        let Some(row) = sqlx::query_as::<_, UserWithPassword>(&format!(
            "SELECT {}, password FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(&dto.username)
        .fetch_optional(db)
        .await?
        else {
            track_login_failure("unknown_user");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(&dto.password, &row.password)? {
            track_login_failure("bad_password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        track_login_success(row.user.role.as_str());
        Ok(row.user)
    }

    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let user = Self::authenticate(db, &dto).await?;
        let TokenPairResponse { access, refresh } = Self::issue_pair(&user, jwt_config)?;

        Ok(AuthResponse {
            access,
            refresh,
            user,
        })
    }

    pub async fn obtain_token_pair(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<TokenPairResponse, AppError> {
        let user = Self::authenticate(db, &dto).await?;
        Self::issue_pair(&user, jwt_config)
    }

    /// Issues a new access token. The role is read from the database, so a
    /// role change applies from the next refresh.
    #[instrument(skip_all)]
    pub async fn refresh_access_token(
        db: &PgPool,
        dto: RefreshTokenRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AccessTokenResponse, AppError> {
        let claims = verify_refresh_token(&dto.refresh, jwt_config)?;
        let user_id = claims.user_id()?;

        let user = Self::find_user(db, user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("User no longer exists"))?;

        let access = create_access_token(user.id, &user.username, user.role, jwt_config)?;
        track_jwt_issued("access");

        Ok(AccessTokenResponse { access })
    }

    #[instrument(skip(db))]
    pub async fn find_user(db: &PgPool, id: UserId) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }
}
