use chrono::{DateTime, Utc};
use csv::Writer;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use schoolhub_core::AppError;

use crate::modules::exports::model::{
    COMBINED_HEADERS, STUDENT_HEADERS, TEACHER_HEADERS, TeacherExportRow,
};
use crate::modules::students::model::{Student, StudentFilterParams};
use crate::modules::students::service::{
    STUDENT_FROM, STUDENT_PROJECTION, push_student_filters, student_ordering,
};
use crate::modules::teachers::model::TeacherFilterParams;
use crate::modules::teachers::service::{TEACHER_COLUMNS, push_teacher_filters, teacher_ordering};

fn timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339()
}

fn finish(writer: Writer<Vec<u8>>) -> Result<Vec<u8>, AppError> {
    writer
        .into_inner()
        .map_err(|e| AppError::internal_error(format!("Failed to finish CSV: {}", e)))
}

pub struct ExportService;

impl ExportService {
    #[instrument(skip(db))]
    pub async fn teacher_rows(
        db: &PgPool,
        filters: &TeacherFilterParams,
    ) -> Result<Vec<TeacherExportRow>, AppError> {
        let ordering = teacher_ordering(filters)?;

        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {}, COUNT(s.id) AS students_count, \
             COALESCE(STRING_AGG(s.first_name || ' ' || s.last_name, '; ' \
                 ORDER BY s.last_name, s.first_name), '') AS assigned_students \
             FROM teachers t LEFT JOIN students s ON s.assigned_teacher_id = t.id",
            TEACHER_COLUMNS
        ));
        push_teacher_filters(&mut query, filters);
        query
            .push(" GROUP BY t.id ORDER BY ")
            .push(ordering.to_sql("t."));

        let rows = query
            .build_query_as::<TeacherExportRow>()
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    #[instrument(skip(db))]
    pub async fn student_rows(
        db: &PgPool,
        filters: &StudentFilterParams,
    ) -> Result<Vec<Student>, AppError> {
        let ordering = student_ordering(filters)?;

        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {}{}",
            STUDENT_PROJECTION, STUDENT_FROM
        ));
        push_student_filters(&mut query, filters);
        query.push(" ORDER BY ").push(ordering.to_sql("s."));

        let rows = query.build_query_as::<Student>().fetch_all(db).await?;
        Ok(rows)
    }

    pub fn teachers_csv(rows: &[TeacherExportRow]) -> Result<Vec<u8>, AppError> {
        let mut writer = Writer::from_writer(vec![]);
        writer.write_record(TEACHER_HEADERS)?;

        for row in rows {
            let t = &row.teacher;
            writer.write_record([
                t.id.to_string(),
                t.first_name.clone(),
                t.last_name.clone(),
                t.email.clone(),
                t.phone_number.clone(),
                t.subject_specialization.clone(),
                t.employee_id.clone(),
                t.date_of_joining.to_string(),
                t.status.to_string(),
                row.students_count.to_string(),
                row.assigned_students.clone(),
                timestamp(&t.created_at),
                timestamp(&t.updated_at),
            ])?;
        }

        finish(writer)
    }

    pub fn students_csv(rows: &[Student]) -> Result<Vec<u8>, AppError> {
        let mut writer = Writer::from_writer(vec![]);
        writer.write_record(STUDENT_HEADERS)?;

        for s in rows {
            writer.write_record([
                s.id.to_string(),
                s.first_name.clone(),
                s.last_name.clone(),
                s.email.clone(),
                s.phone_number.clone(),
                s.roll_number.clone(),
                s.class_grade.clone(),
                s.date_of_birth.to_string(),
                s.admission_date.to_string(),
                s.status.to_string(),
                s.assigned_teacher_name
                    .clone()
                    .unwrap_or_else(|| "None".to_string()),
                timestamp(&s.created_at),
                timestamp(&s.updated_at),
            ])?;
        }

        finish(writer)
    }

    /// Teachers first, then students, under one header row.
    pub fn combined_csv(
        teachers: &[TeacherExportRow],
        students: &[Student],
    ) -> Result<Vec<u8>, AppError> {
        let mut writer = Writer::from_writer(vec![]);
        writer.write_record(COMBINED_HEADERS)?;

        for row in teachers {
            let t = &row.teacher;
            writer.write_record([
                "Teacher".to_string(),
                t.id.to_string(),
                t.first_name.clone(),
                t.last_name.clone(),
                t.email.clone(),
                t.phone_number.clone(),
                t.employee_id.clone(),
                t.subject_specialization.clone(),
                t.status.to_string(),
                String::new(),
                timestamp(&t.created_at),
                timestamp(&t.updated_at),
            ])?;
        }

        for s in students {
            writer.write_record([
                "Student".to_string(),
                s.id.to_string(),
                s.first_name.clone(),
                s.last_name.clone(),
                s.email.clone(),
                s.phone_number.clone(),
                s.roll_number.clone(),
                s.class_grade.clone(),
                s.status.to_string(),
                s.assigned_teacher_name
                    .clone()
                    .unwrap_or_else(|| "None".to_string()),
                timestamp(&s.created_at),
                timestamp(&s.updated_at),
            ])?;
        }

        finish(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use schoolhub_models::{RecordStatus, StudentId, TeacherId};

    use crate::modules::teachers::model::Teacher;

    fn teacher() -> Teacher {
        Teacher {
            id: TeacherId::new(),
            first_name: "John".to_string(),
            last_name: "Teacher".to_string(),
            email: "john@example.com".to_string(),
            phone_number: "5550100".to_string(),
            subject_specialization: "Math".to_string(),
            employee_id: "T001".to_string(),
            date_of_joining: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            status: RecordStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn student(assigned_teacher_name: Option<&str>) -> Student {
        Student {
            id: StudentId::new(),
            first_name: "Jane".to_string(),
            last_name: "Student, Jr.".to_string(),
            email: "jane@example.com".to_string(),
            phone_number: "5550101".to_string(),
            roll_number: "S001".to_string(),
            class_grade: "10".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2008, 1, 1).unwrap(),
            admission_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            status: RecordStatus::Inactive,
            assigned_teacher: None,
            assigned_teacher_name: assigned_teacher_name.map(str::to_string),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn lines(bytes: Vec<u8>) -> Vec<String> {
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_teachers_csv_includes_assignments() {
        let rows = vec![TeacherExportRow {
            teacher: teacher(),
            students_count: 2,
            assigned_students: "Jane Doe; Sam Smith".to_string(),
        }];
        let lines = lines(ExportService::teachers_csv(&rows).unwrap());

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ID,First Name,Last Name"));
        assert!(lines[1].contains(",T001,2024-01-01,active,2,Jane Doe; Sam Smith,"));
    }

    #[test]
    fn test_students_csv_quotes_and_unassigned() {
        let lines = lines(ExportService::students_csv(&[student(None)]).unwrap());

        assert!(lines[0].ends_with("Assigned Teacher,Created At,Updated At"));
        assert!(lines[1].contains("\"Student, Jr.\""));
        assert!(lines[1].contains(",inactive,None,"));
    }

    #[test]
    fn test_combined_csv_tags_rows() {
        let teachers = vec![TeacherExportRow {
            teacher: teacher(),
            students_count: 0,
            assigned_students: String::new(),
        }];
        let students = vec![student(Some("John Teacher"))];
        let lines = lines(ExportService::combined_csv(&teachers, &students).unwrap());

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Type,ID"));
        assert!(lines[1].starts_with("Teacher,"));
        assert!(lines[2].starts_with("Student,"));
        assert!(lines[2].contains("John Teacher"));
    }

    #[test]
    fn test_empty_export_has_header_only() {
        let lines = lines(ExportService::students_csv(&[]).unwrap());
        assert_eq!(lines, vec![STUDENT_HEADERS.join(",")]);
    }
}
