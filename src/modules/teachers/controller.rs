use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use tracing::instrument;

use schoolhub_core::{AppError, PaginationParams};
use schoolhub_models::TeacherId;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireAdmin;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::students::model::Student;
use crate::modules::students::service::StudentService;
use crate::modules::teachers::model::{
    CreateTeacherDto, PaginatedTeachersResponse, Teacher, TeacherFilterParams, UpdateTeacherDto,
};
use crate::modules::teachers::service::TeacherService;
use crate::state::AppState;
use crate::validator::{ApiPath, ApiQuery, ValidatedJson};

#[utoipa::path(
    post,
    path = "/api/teachers",
    request_body = CreateTeacherDto,
    responses(
        (status = 201, description = "Teacher created", body = Teacher),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 409, description = "Email or employee ID already in use", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn create_teacher(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateTeacherDto>,
) -> Result<(StatusCode, Json<Teacher>), AppError> {
    let teacher = TeacherService::create_teacher(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(teacher)))
}

#[utoipa::path(
    get,
    path = "/api/teachers",
    params(TeacherFilterParams, PaginationParams),
    responses(
        (status = 200, description = "Paginated teachers", body = PaginatedTeachersResponse),
        (status = 400, description = "Invalid filter, ordering or pagination", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn list_teachers(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ApiQuery(filters): ApiQuery<TeacherFilterParams>,
    ApiQuery(pagination): ApiQuery<PaginationParams>,
) -> Result<Json<PaginatedTeachersResponse>, AppError> {
    let teachers = TeacherService::list_teachers(&state.db, &filters, &pagination).await?;
    Ok(Json(teachers))
}

#[utoipa::path(
    get,
    path = "/api/teachers/{id}",
    params(
        ("id" = Uuid, Path, description = "Teacher ID")
    ),
    responses(
        (status = 200, description = "Teacher details", body = Teacher),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn get_teacher(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ApiPath(id): ApiPath<TeacherId>,
) -> Result<Json<Teacher>, AppError> {
    let teacher = TeacherService::get_teacher(&state.db, id).await?;
    Ok(Json(teacher))
}

/// Serves both `PUT` and `PATCH`; absent fields are left unchanged.
#[utoipa::path(
    patch,
    path = "/api/teachers/{id}",
    params(
        ("id" = Uuid, Path, description = "Teacher ID")
    ),
    request_body = UpdateTeacherDto,
    responses(
        (status = 200, description = "Teacher updated", body = Teacher),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse),
        (status = 409, description = "Email or employee ID already in use", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn update_teacher(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ApiPath(id): ApiPath<TeacherId>,
    ValidatedJson(dto): ValidatedJson<UpdateTeacherDto>,
) -> Result<Json<Teacher>, AppError> {
    let teacher = TeacherService::update_teacher(&state.db, id, dto).await?;
    Ok(Json(teacher))
}

#[utoipa::path(
    delete,
    path = "/api/teachers/{id}",
    params(
        ("id" = Uuid, Path, description = "Teacher ID")
    ),
    responses(
        (status = 204, description = "Teacher deleted; their students are unassigned"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn delete_teacher(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ApiPath(id): ApiPath<TeacherId>,
) -> Result<StatusCode, AppError> {
    TeacherService::delete_teacher(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/teachers/{id}/students",
    params(
        ("id" = Uuid, Path, description = "Teacher ID")
    ),
    responses(
        (status = 200, description = "Students assigned to the teacher", body = Vec<Student>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn get_teacher_students(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ApiPath(id): ApiPath<TeacherId>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = StudentService::list_students_of_teacher(&state.db, id).await?;
    Ok(Json(students))
}
