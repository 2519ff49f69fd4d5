//! Fake row generation, parallelised with rayon.

use chrono::{Duration, NaiveDate, Utc};
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;
use uuid::Uuid;

use schoolhub_models::{RecordStatus, TeacherId};

use super::SEED_EMAIL_DOMAIN;
use super::models::{StudentSeed, TeacherSeed};

const SUBJECTS: &[&str] = &[
    "Mathematics",
    "Physics",
    "Chemistry",
    "Biology",
    "English",
    "History",
    "Geography",
    "Computer Science",
    "Art",
    "Music",
];

const GRADES: &[&str] = &["6", "7", "8", "9", "10", "11", "12"];

fn pick<'a>(values: &[&'a str]) -> &'a str {
    values[(0..values.len()).fake::<usize>()]
}

fn days_ago(min: i64, max: i64) -> NaiveDate {
    let days: i64 = (min..max).fake();
    (Utc::now() - Duration::days(days)).date_naive()
}

/// Roughly one in ten seeded records is inactive.
fn status() -> RecordStatus {
    if (0..10).fake::<u8>() == 0 {
        RecordStatus::Inactive
    } else {
        RecordStatus::Active
    }
}

/// Short random tag keeping identifiers unique across seed runs.
fn tag() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

fn email(first_name: &str, last_name: &str, tag: &str) -> String {
    format!(
        "{}.{}.{}@{}",
        first_name.to_lowercase(),
        last_name.to_lowercase(),
        tag,
        SEED_EMAIL_DOMAIN
    )
}

pub fn generate_teachers(count: usize) -> Vec<TeacherSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let tag = tag();

            TeacherSeed {
                email: email(&first_name, &last_name, &tag),
                first_name,
                last_name,
                phone_number: format!("555{:07}", idx),
                subject_specialization: pick(SUBJECTS).to_string(),
                employee_id: format!("EMP-{}", tag),
                date_of_joining: days_ago(30, 365 * 15),
                status: status(),
            }
        })
        .collect()
}

/// Generates `per_teacher` students for each teacher, then `unassigned`
/// students with no teacher.
pub fn generate_students(
    teacher_ids: &[TeacherId],
    per_teacher: usize,
    unassigned: usize,
) -> Vec<StudentSeed> {
    let assignments: Vec<Option<TeacherId>> = teacher_ids
        .iter()
        .flat_map(|&id| std::iter::repeat_n(Some(id), per_teacher))
        .chain(std::iter::repeat_n(None, unassigned))
        .collect();

    assignments
        .into_par_iter()
        .enumerate()
        .map(|(idx, assigned_teacher)| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let tag = tag();

            StudentSeed {
                email: email(&first_name, &last_name, &tag),
                first_name,
                last_name,
                phone_number: format!("555{:07}", idx),
                roll_number: format!("ROLL-{}", tag),
                class_grade: pick(GRADES).to_string(),
                date_of_birth: days_ago(365 * 10, 365 * 18),
                admission_date: days_ago(30, 365 * 5),
                status: status(),
                assigned_teacher,
            }
        })
        .collect()
}
