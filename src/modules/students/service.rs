//! Student persistence.
//!
//! Every read joins `teachers` so responses carry `assigned_teacher_name`.

use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use schoolhub_core::{AppError, Ordering, PaginationMeta, PaginationParams, like_pattern};
use schoolhub_db::{is_foreign_key_violation, unique_violation};
use schoolhub_models::{StudentId, TeacherId};
use schoolhub_observability::{track_record_created, track_record_deleted};

use crate::modules::students::model::{
    CreateStudentDto, PaginatedStudentsResponse, STUDENT_ORDERING_FIELDS, Student,
    StudentFilterParams, UpdateStudentDto,
};
use crate::modules::teachers::service::TeacherService;

pub(crate) const STUDENT_PROJECTION: &str = "s.id, s.first_name, s.last_name, s.email, \
     s.phone_number, s.roll_number, s.class_grade, s.date_of_birth, s.admission_date, s.status, \
     s.assigned_teacher_id AS assigned_teacher, \
     t.first_name || ' ' || t.last_name AS assigned_teacher_name, \
     s.created_at, s.updated_at";

pub(crate) const STUDENT_FROM: &str =
    " FROM students s LEFT JOIN teachers t ON t.id = s.assigned_teacher_id";

/// Appends a `WHERE` clause for `filters` to a query over `students s`.
pub(crate) fn push_student_filters(
    builder: &mut QueryBuilder<'_, Postgres>,
    filters: &StudentFilterParams,
) {
    builder.push(" WHERE TRUE");

    if let Some(status) = filters.status {
        builder.push(" AND s.status = ").push_bind(status);
    }

    if let Some(class_grade) = &filters.class_grade {
        builder
            .push(" AND s.class_grade = ")
            .push_bind(class_grade.clone());
    }

    if let Some(teacher_id) = filters.assigned_teacher {
        builder
            .push(" AND s.assigned_teacher_id = ")
            .push_bind(teacher_id);
    }

    if let Some(search) = &filters.search {
        let pattern = like_pattern(search);
        builder
            .push(" AND (s.first_name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR s.last_name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR s.email ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR s.roll_number ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

pub(crate) fn student_ordering(filters: &StudentFilterParams) -> Result<Ordering, AppError> {
    Ordering::parse(
        filters.ordering.as_deref(),
        STUDENT_ORDERING_FIELDS,
        Ordering::NEWEST_FIRST,
    )
}

fn unknown_teacher() -> AppError {
    AppError::validation("assigned_teacher does not reference an existing teacher")
}

fn map_write_error(err: sqlx::Error) -> AppError {
    if is_foreign_key_violation(&err) {
        return unknown_teacher();
    }

    match unique_violation(&err).as_deref() {
        Some("students_email_key") => {
            AppError::conflict("A student with this email already exists")
        }
        Some("students_roll_number_key") => {
            AppError::conflict("A student with this roll number already exists")
        }
        Some(_) => AppError::conflict("Student already exists"),
        None => AppError::database(err),
    }
}

pub struct StudentService;

impl StudentService {
    async fn ensure_teacher(db: &PgPool, teacher_id: Option<TeacherId>) -> Result<(), AppError> {
        let Some(id) = teacher_id else {
            return Ok(());
        };

        if TeacherService::exists(db, id).await? {
            Ok(())
        } else {
            Err(unknown_teacher())
        }
    }

    /// Rejects an email or roll number already used by a student other than `exclude`.
    async fn ensure_unique(
        db: &PgPool,
        email: Option<&str>,
        roll_number: Option<&str>,
        exclude: Option<StudentId>,
    ) -> Result<(), AppError> {
        if let Some(email) = email {
            let taken = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM students WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2))",
            )
            .bind(email)
            .bind(exclude)
            .fetch_one(db)
            .await?;

            if taken {
                return Err(AppError::conflict(
                    "A student with this email already exists",
                ));
            }
        }

        if let Some(roll_number) = roll_number {
            let taken = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM students WHERE roll_number = $1 AND ($2::uuid IS NULL OR id <> $2))",
            )
            .bind(roll_number)
            .bind(exclude)
            .fetch_one(db)
            .await?;

            if taken {
                return Err(AppError::conflict(
                    "A student with this roll number already exists",
                ));
            }
        }

        Ok(())
    }

    #[instrument(skip(db, dto), fields(roll_number = %dto.roll_number))]
    pub async fn create_student(db: &PgPool, dto: CreateStudentDto) -> Result<Student, AppError> {
        Self::ensure_teacher(db, dto.assigned_teacher).await?;
        Self::ensure_unique(db, Some(&dto.email), Some(&dto.roll_number), None).await?;

        let student = sqlx::query_as::<_, Student>(&format!(
            r#"WITH s AS (
                   INSERT INTO students
                       (first_name, last_name, email, phone_number, roll_number, class_grade,
                        date_of_birth, admission_date, status, assigned_teacher_id)
                   VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                   RETURNING *
               )
               SELECT {} FROM s LEFT JOIN teachers t ON t.id = s.assigned_teacher_id"#,
            STUDENT_PROJECTION
        ))
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.email)
        .bind(&dto.phone_number)
        .bind(&dto.roll_number)
        .bind(&dto.class_grade)
        .bind(dto.date_of_birth)
        .bind(dto.admission_date)
        .bind(dto.status)
        .bind(dto.assigned_teacher)
        .fetch_one(db)
        .await
        .map_err(map_write_error)?;

        track_record_created("student");
        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn list_students(
        db: &PgPool,
        filters: &StudentFilterParams,
        pagination: &PaginationParams,
    ) -> Result<PaginatedStudentsResponse, AppError> {
        let ordering = student_ordering(filters)?;

        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM students s");
        push_student_filters(&mut count_query, filters);
        let total = count_query
            .build_query_scalar::<i64>()
            .fetch_one(db)
            .await?;

        let mut data_query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {}{}",
            STUDENT_PROJECTION, STUDENT_FROM
        ));
        push_student_filters(&mut data_query, filters);
        data_query
            .push(" ORDER BY ")
            .push(ordering.to_sql("s."))
            .push(" LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let students = data_query
            .build_query_as::<Student>()
            .fetch_all(db)
            .await?;

        Ok(PaginatedStudentsResponse {
            data: students,
            meta: PaginationMeta::new(total, pagination),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_student(db: &PgPool, id: StudentId) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(&format!(
            "SELECT {}{} WHERE s.id = $1",
            STUDENT_PROJECTION, STUDENT_FROM
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_student(
        db: &PgPool,
        id: StudentId,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        Self::get_student(db, id).await?;
        if let Some(teacher_id) = dto.assigned_teacher {
            Self::ensure_teacher(db, teacher_id).await?;
        }
        Self::ensure_unique(
            db,
            dto.email.as_deref(),
            dto.roll_number.as_deref(),
            Some(id),
        )
        .await?;

        // $11 says whether `assigned_teacher` was sent; $12 is its value, possibly NULL.
        sqlx::query_as::<_, Student>(&format!(
            r#"WITH s AS (
                   UPDATE students SET
                       first_name = COALESCE($2, first_name),
                       last_name = COALESCE($3, last_name),
                       email = COALESCE($4, email),
                       phone_number = COALESCE($5, phone_number),
                       roll_number = COALESCE($6, roll_number),
                       class_grade = COALESCE($7, class_grade),
                       date_of_birth = COALESCE($8, date_of_birth),
                       admission_date = COALESCE($9, admission_date),
                       status = COALESCE($10, status),
                       assigned_teacher_id = CASE WHEN $11::bool THEN $12::uuid ELSE assigned_teacher_id END,
                       updated_at = NOW()
                   WHERE id = $1
                   RETURNING *
               )
               SELECT {} FROM s LEFT JOIN teachers t ON t.id = s.assigned_teacher_id"#,
            STUDENT_PROJECTION
        ))
        .bind(id)
        .bind(dto.first_name)
        .bind(dto.last_name)
        .bind(dto.email)
        .bind(dto.phone_number)
        .bind(dto.roll_number)
        .bind(dto.class_grade)
        .bind(dto.date_of_birth)
        .bind(dto.admission_date)
        .bind(dto.status)
        .bind(dto.assigned_teacher.is_some())
        .bind(dto.assigned_teacher.flatten())
        .fetch_optional(db)
        .await
        .map_err(map_write_error)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_student(db: &PgPool, id: StudentId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        track_record_deleted("student");
        Ok(())
    }

    /// Students assigned to `teacher_id`, by name.
    #[instrument(skip(db))]
    pub async fn list_students_of_teacher(
        db: &PgPool,
        teacher_id: TeacherId,
    ) -> Result<Vec<Student>, AppError> {
        if !TeacherService::exists(db, teacher_id).await? {
            return Err(AppError::not_found(anyhow::anyhow!("Teacher not found")));
        }

        let students = sqlx::query_as::<_, Student>(&format!(
            "SELECT {}{} WHERE s.assigned_teacher_id = $1 \
             ORDER BY s.last_name, s.first_name, s.id",
            STUDENT_PROJECTION, STUDENT_FROM
        ))
        .bind(teacher_id)
        .fetch_all(db)
        .await?;

        Ok(students)
    }
}
