//! Development data seeding.
//!
//! Every seeded row carries an email under [`SEED_EMAIL_DOMAIN`], which is
//! how [`clear_all`] tells seeded rows from real ones.

pub mod generate;
pub mod models;

use std::time::Instant;

use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use schoolhub_models::TeacherId;

pub use generate::{generate_students, generate_teachers};
pub use models::{SeedConfig, StudentSeed, TeacherSeed};

pub const SEED_EMAIL_DOMAIN: &str = "seed.schoolhub.local";

// Stays under PostgreSQL's 65535 bind parameters at 10 columns per row.
const BATCH_SIZE: usize = 1000;

type SeedResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Bulk-inserts teachers on the caller's connection, so they commit or roll
/// back with the caller's transaction.
pub async fn insert_teachers(
    conn: &mut PgConnection,
    teachers: &[TeacherSeed],
) -> SeedResult<Vec<TeacherId>> {
    let mut ids = Vec::with_capacity(teachers.len());

    for chunk in teachers.chunks(BATCH_SIZE) {
        let mut query = QueryBuilder::<Postgres>::new(
            "INSERT INTO teachers (first_name, last_name, email, phone_number, \
             subject_specialization, employee_id, date_of_joining, status) ",
        );
        query.push_values(chunk, |mut row, t| {
            row.push_bind(&t.first_name)
                .push_bind(&t.last_name)
                .push_bind(&t.email)
                .push_bind(&t.phone_number)
                .push_bind(&t.subject_specialization)
                .push_bind(&t.employee_id)
                .push_bind(t.date_of_joining)
                .push_bind(t.status);
        });
        query.push(" RETURNING id");

        let chunk_ids: Vec<TeacherId> = query.build_query_scalar().fetch_all(&mut *conn).await?;
        ids.extend(chunk_ids);
    }

    Ok(ids)
}

pub async fn insert_students(conn: &mut PgConnection, students: &[StudentSeed]) -> SeedResult<u64> {
    let mut inserted = 0;

    for chunk in students.chunks(BATCH_SIZE) {
        let mut query = QueryBuilder::<Postgres>::new(
            "INSERT INTO students (first_name, last_name, email, phone_number, roll_number, \
             class_grade, date_of_birth, admission_date, status, assigned_teacher_id) ",
        );
        query.push_values(chunk, |mut row, s| {
            row.push_bind(&s.first_name)
                .push_bind(&s.last_name)
                .push_bind(&s.email)
                .push_bind(&s.phone_number)
                .push_bind(&s.roll_number)
                .push_bind(&s.class_grade)
                .push_bind(s.date_of_birth)
                .push_bind(s.admission_date)
                .push_bind(s.status)
                .push_bind(s.assigned_teacher);
        });

        inserted += query.build().execute(&mut *conn).await?.rows_affected();
    }

    Ok(inserted)
}

/// Seeds teachers first, then students assigned across them, in one
/// transaction. A failure leaves no seeded rows behind.
pub async fn seed_all(db: &PgPool, config: &SeedConfig) -> SeedResult<()> {
    let start_time = Instant::now();
    let mut tx = db.begin().await?;
    println!("🌱 Seeding {} teachers...", config.teachers);

    let teachers = generate_teachers(config.teachers);
    let teacher_ids = insert_teachers(&mut tx, &teachers).await?;
    println!("   ✓ Inserted {} teachers", teacher_ids.len());

    println!(
        "🎓 Seeding {} students ({} per teacher, {} unassigned)...",
        config.total_students(),
        config.students_per_teacher,
        config.unassigned_students
    );
    let students = generate_students(
        &teacher_ids,
        config.students_per_teacher,
        config.unassigned_students,
    );
    let inserted = insert_students(&mut tx, &students).await?;
    println!("   ✓ Inserted {} students", inserted);

    tx.commit().await?;

    println!("✅ Seeding finished in {:?}", start_time.elapsed());
    Ok(())
}

/// Deletes seeded students and teachers. Returns `(teachers, students)` deleted.
pub async fn clear_all(db: &PgPool) -> SeedResult<(u64, u64)> {
    let pattern = format!("%@{}", SEED_EMAIL_DOMAIN);
    let mut tx = db.begin().await?;

    let students = sqlx::query("DELETE FROM students WHERE email LIKE $1")
        .bind(&pattern)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let teachers = sqlx::query("DELETE FROM teachers WHERE email LIKE $1")
        .bind(&pattern)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;
    Ok((teachers, students))
}
