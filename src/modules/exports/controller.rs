use axum::{
    extract::State,
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::instrument;

use schoolhub_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::exports::service::ExportService;
use crate::modules::students::model::StudentFilterParams;
use crate::modules::teachers::model::TeacherFilterParams;
use crate::state::AppState;
use crate::validator::ApiQuery;

fn csv_attachment(filename: &str, body: Vec<u8>) -> Result<Response, AppError> {
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("text/csv")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/api/teachers/export",
    params(TeacherFilterParams),
    responses(
        (status = 200, description = "teachers.csv", content_type = "text/csv", body = String),
        (status = 400, description = "Invalid filter or ordering", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Exports"
)]
#[instrument(skip(state))]
pub async fn export_teachers(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ApiQuery(filters): ApiQuery<TeacherFilterParams>,
) -> Result<Response, AppError> {
    let rows = ExportService::teacher_rows(&state.db, &filters).await?;
    csv_attachment("teachers.csv", ExportService::teachers_csv(&rows)?)
}

#[utoipa::path(
    get,
    path = "/api/students/export",
    params(StudentFilterParams),
    responses(
        (status = 200, description = "students.csv", content_type = "text/csv", body = String),
        (status = 400, description = "Invalid filter or ordering", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Exports"
)]
#[instrument(skip(state))]
pub async fn export_students(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ApiQuery(filters): ApiQuery<StudentFilterParams>,
) -> Result<Response, AppError> {
    let rows = ExportService::student_rows(&state.db, &filters).await?;
    csv_attachment("students.csv", ExportService::students_csv(&rows)?)
}

#[utoipa::path(
    get,
    path = "/api/export/all",
    responses(
        (status = 200, description = "school_data_<timestamp>.csv with teachers and students", content_type = "text/csv", body = String),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Exports"
)]
#[instrument(skip(state))]
pub async fn export_all(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Response, AppError> {
    let teachers = ExportService::teacher_rows(&state.db, &TeacherFilterParams::default()).await?;
    let students = ExportService::student_rows(&state.db, &StudentFilterParams::default()).await?;

    let filename = format!("school_data_{}.csv", Utc::now().format("%Y%m%d_%H%M%S"));
    csv_attachment(&filename, ExportService::combined_csv(&teachers, &students)?)
}
