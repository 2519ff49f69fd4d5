use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use schoolhub_core::{AppError, Ordering, PaginationMeta, PaginationParams, like_pattern};
use schoolhub_db::unique_violation;
use schoolhub_models::TeacherId;
use schoolhub_observability::{track_record_created, track_record_deleted};

use crate::modules::teachers::model::{
    CreateTeacherDto, PaginatedTeachersResponse, TEACHER_ORDERING_FIELDS, Teacher,
    TeacherFilterParams, UpdateTeacherDto,
};

pub(crate) const TEACHER_COLUMNS: &str = "t.id, t.first_name, t.last_name, t.email, t.phone_number, \
     t.subject_specialization, t.employee_id, t.date_of_joining, t.status, t.created_at, t.updated_at";

const RETURNING_COLUMNS: &str = "id, first_name, last_name, email, phone_number, \
     subject_specialization, employee_id, date_of_joining, status, created_at, updated_at";

/// Appends a `WHERE` clause for `filters` to a query over `teachers t`.
pub(crate) fn push_teacher_filters(
    builder: &mut QueryBuilder<'_, Postgres>,
    filters: &TeacherFilterParams,
) {
    builder.push(" WHERE TRUE");

    if let Some(status) = filters.status {
        builder.push(" AND t.status = ").push_bind(status);
    }

    if let Some(subject) = &filters.subject_specialization {
        builder
            .push(" AND t.subject_specialization = ")
            .push_bind(subject.clone());
    }

    if let Some(search) = &filters.search {
        let pattern = like_pattern(search);
        builder
            .push(" AND (t.first_name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR t.last_name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR t.email ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR t.employee_id ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

pub(crate) fn teacher_ordering(filters: &TeacherFilterParams) -> Result<Ordering, AppError> {
    Ordering::parse(
        filters.ordering.as_deref(),
        TEACHER_ORDERING_FIELDS,
        Ordering::NEWEST_FIRST,
    )
}

fn map_write_error(err: sqlx::Error) -> AppError {
    match unique_violation(&err).as_deref() {
        Some("teachers_email_key") => {
            AppError::conflict("A teacher with this email already exists")
        }
        Some("teachers_employee_id_key") => {
            AppError::conflict("A teacher with this employee ID already exists")
        }
        Some(_) => AppError::conflict("Teacher already exists"),
        None => AppError::database(err),
    }
}

pub struct TeacherService;

impl TeacherService {
    /// Rejects an email or employee ID already used by a teacher other than `exclude`.
    async fn ensure_unique(
        db: &PgPool,
        email: Option<&str>,
        employee_id: Option<&str>,
        exclude: Option<TeacherId>,
    ) -> Result<(), AppError> {
        if let Some(email) = email {
            let taken = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM teachers WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2))",
            )
            .bind(email)
            .bind(exclude)
            .fetch_one(db)
            .await?;

            if taken {
                return Err(AppError::conflict(
                    "A teacher with this email already exists",
                ));
            }
        }

        if let Some(employee_id) = employee_id {
            let taken = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM teachers WHERE employee_id = $1 AND ($2::uuid IS NULL OR id <> $2))",
            )
            .bind(employee_id)
            .bind(exclude)
            .fetch_one(db)
            .await?;

            if taken {
                return Err(AppError::conflict(
                    "A teacher with this employee ID already exists",
                ));
            }
        }

        Ok(())
    }

    #[instrument(skip(db, dto), fields(employee_id = %dto.employee_id))]
    pub async fn create_teacher(db: &PgPool, dto: CreateTeacherDto) -> Result<Teacher, AppError> {
        Self::ensure_unique(db, Some(&dto.email), Some(&dto.employee_id), None).await?;

        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            r#"INSERT INTO teachers
                   (first_name, last_name, email, phone_number, subject_specialization,
                    employee_id, date_of_joining, status)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               RETURNING {}"#,
            RETURNING_COLUMNS
        ))
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.email)
        .bind(&dto.phone_number)
        .bind(&dto.subject_specialization)
        .bind(&dto.employee_id)
        .bind(dto.date_of_joining)
        .bind(dto.status)
        .fetch_one(db)
        .await
        .map_err(map_write_error)?;

        track_record_created("teacher");
        Ok(teacher)
    }

    #[instrument(skip(db))]
    pub async fn list_teachers(
        db: &PgPool,
        filters: &TeacherFilterParams,
        pagination: &PaginationParams,
    ) -> Result<PaginatedTeachersResponse, AppError> {
        let ordering = teacher_ordering(filters)?;

        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM teachers t");
        push_teacher_filters(&mut count_query, filters);
        let total = count_query
            .build_query_scalar::<i64>()
            .fetch_one(db)
            .await?;

        let mut data_query =
            QueryBuilder::<Postgres>::new(format!("SELECT {} FROM teachers t", TEACHER_COLUMNS));
        push_teacher_filters(&mut data_query, filters);
        data_query
            .push(" ORDER BY ")
            .push(ordering.to_sql("t."))
            .push(" LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let teachers = data_query
            .build_query_as::<Teacher>()
            .fetch_all(db)
            .await?;

        Ok(PaginatedTeachersResponse {
            data: teachers,
            meta: PaginationMeta::new(total, pagination),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_teacher(db: &PgPool, id: TeacherId) -> Result<Teacher, AppError> {
        sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {} FROM teachers t WHERE t.id = $1",
            TEACHER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Teacher not found")))
    }

    #[instrument(skip(db))]
    pub async fn exists(db: &PgPool, id: TeacherId) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM teachers WHERE id = $1)")
                .bind(id)
                .fetch_one(db)
                .await?;
        Ok(exists)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_teacher(
        db: &PgPool,
        id: TeacherId,
        dto: UpdateTeacherDto,
    ) -> Result<Teacher, AppError> {
        Self::get_teacher(db, id).await?;
        Self::ensure_unique(
            db,
            dto.email.as_deref(),
            dto.employee_id.as_deref(),
            Some(id),
        )
        .await?;

        sqlx::query_as::<_, Teacher>(&format!(
            r#"UPDATE teachers SET
                   first_name = COALESCE($2, first_name),
                   last_name = COALESCE($3, last_name),
                   email = COALESCE($4, email),
                   phone_number = COALESCE($5, phone_number),
                   subject_specialization = COALESCE($6, subject_specialization),
                   employee_id = COALESCE($7, employee_id),
                   date_of_joining = COALESCE($8, date_of_joining),
                   status = COALESCE($9, status),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING {}"#,
            RETURNING_COLUMNS
        ))
        .bind(id)
        .bind(dto.first_name)
        .bind(dto.last_name)
        .bind(dto.email)
        .bind(dto.phone_number)
        .bind(dto.subject_specialization)
        .bind(dto.employee_id)
        .bind(dto.date_of_joining)
        .bind(dto.status)
        .fetch_optional(db)
        .await
        .map_err(map_write_error)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Teacher not found")))
    }

    /// Deletes a teacher. Its students stay, with `assigned_teacher` cleared.
    #[instrument(skip(db))]
    pub async fn delete_teacher(db: &PgPool, id: TeacherId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM teachers WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Teacher not found")));
        }

        track_record_deleted("teacher");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolhub_models::RecordStatus;

    #[test]
    fn test_filters_render_in_order() {
        let filters = TeacherFilterParams {
            search: Some("smith".to_string()),
            status: Some(RecordStatus::Active),
            subject_specialization: Some("Physics".to_string()),
            ordering: None,
        };
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM teachers t");
        push_teacher_filters(&mut builder, &filters);

        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM teachers t WHERE TRUE AND t.status = $1 \
             AND t.subject_specialization = $2 AND (t.first_name ILIKE $3 \
             OR t.last_name ILIKE $4 OR t.email ILIKE $5 OR t.employee_id ILIKE $6)"
        );
    }

    #[test]
    fn test_no_filters_is_unconditional() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT 1 FROM teachers t");
        push_teacher_filters(&mut builder, &TeacherFilterParams::default());
        assert_eq!(builder.sql(), "SELECT 1 FROM teachers t WHERE TRUE");
    }

    #[test]
    fn test_ordering_rejects_unknown_field() {
        let filters = TeacherFilterParams {
            ordering: Some("-salary".to_string()),
            ..Default::default()
        };
        assert!(teacher_ordering(&filters).is_err());
    }
}
