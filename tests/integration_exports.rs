mod common;

use axum::http::{StatusCode, header};
use sqlx::PgPool;

use common::{
    RawResponse, create_test_user, insert_student, insert_teacher, send_raw, setup_test_app,
};
use schoolhub_models::UserRole;

fn parse_csv(response: &RawResponse) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_reader(response.body.as_bytes());
    let headers = reader.headers().unwrap().iter().map(String::from).collect();
    let rows = reader
        .records()
        .map(|record| record.unwrap().iter().map(String::from).collect())
        .collect();
    (headers, rows)
}

fn header_value<'a>(response: &'a RawResponse, name: header::HeaderName) -> &'a str {
    response.headers.get(name).unwrap().to_str().unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_export_teachers(pool: PgPool) {
    let ada = insert_teacher(&pool, "Ada", "Lovelace").await;
    insert_teacher(&pool, "Grace", "Hopper").await;
    insert_student(&pool, "Zed", "Young", Some(ada)).await;
    insert_student(&pool, "Amy", "Baker", Some(ada)).await;
    let user = create_test_user(&pool, UserRole::Student).await;
    let app = setup_test_app(pool);

    let response = send_raw(
        &app,
        "GET",
        "/api/teachers/export/?ordering=first_name",
        Some(user.token.as_str()),
        None,
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(header_value(&response, header::CONTENT_TYPE).starts_with("text/csv"));
    assert_eq!(
        header_value(&response, header::CONTENT_DISPOSITION),
        "attachment; filename=\"teachers.csv\""
    );

    let (headers, rows) = parse_csv(&response);
    assert_eq!(headers[0], "ID");
    assert!(headers.contains(&"Students Count".to_string()));
    assert_eq!(rows.len(), 2);

    let count = headers.iter().position(|h| h == "Students Count").unwrap();
    let names = headers.iter().position(|h| h == "Assigned Students").unwrap();
    assert_eq!(rows[0][0], ada.to_string());
    assert_eq!(rows[0][count], "2");
    assert_eq!(rows[0][names], "Amy Baker; Zed Young");
    assert_eq!(rows[1][count], "0");
    assert_eq!(rows[1][names], "");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_export_teachers_applies_filters(pool: PgPool) {
    insert_teacher(&pool, "Ada", "Lovelace").await;
    insert_teacher(&pool, "Grace", "Hopper").await;
    let user = create_test_user(&pool, UserRole::Teacher).await;
    let app = setup_test_app(pool);

    let response = send_raw(
        &app,
        "GET",
        "/api/teachers/export?search=hopper",
        Some(user.token.as_str()),
        None,
    )
    .await;

    let (_, rows) = parse_csv(&response);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][1], "Grace");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_export_students(pool: PgPool) {
    let ada = insert_teacher(&pool, "Ada", "Lovelace").await;
    insert_student(&pool, "Amy", "Baker", Some(ada)).await;
    insert_student(&pool, "Ben", "Carter", None).await;
    let user = create_test_user(&pool, UserRole::Admin).await;
    let app = setup_test_app(pool);

    let response = send_raw(
        &app,
        "GET",
        "/api/students/export?ordering=last_name",
        Some(user.token.as_str()),
        None,
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        header_value(&response, header::CONTENT_DISPOSITION),
        "attachment; filename=\"students.csv\""
    );

    let (headers, rows) = parse_csv(&response);
    let teacher = headers.iter().position(|h| h == "Assigned Teacher").unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][teacher], "Ada Lovelace");
    assert_eq!(rows[1][teacher], "None");

    let response = send_raw(
        &app,
        "GET",
        &format!("/api/students/export?assigned_teacher={}", ada),
        Some(user.token.as_str()),
        None,
    )
    .await;
    let (_, rows) = parse_csv(&response);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][1], "Amy");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_export_all(pool: PgPool) {
    let ada = insert_teacher(&pool, "Ada", "Lovelace").await;
    insert_student(&pool, "Amy", "Baker", Some(ada)).await;
    insert_student(&pool, "Ben", "Carter", None).await;
    let user = create_test_user(&pool, UserRole::Student).await;
    let app = setup_test_app(pool);

    let response = send_raw(
        &app,
        "GET",
        "/api/export/all/",
        Some(user.token.as_str()),
        None,
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    let disposition = header_value(&response, header::CONTENT_DISPOSITION);
    assert!(disposition.starts_with("attachment; filename=\"school_data_"));
    assert!(disposition.ends_with(".csv\""));

    let (headers, rows) = parse_csv(&response);
    assert_eq!(headers[0], "Type");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0][0], "Teacher");
    assert_eq!(rows[1][0], "Student");
    assert_eq!(rows[2][0], "Student");

    let assigned = headers.iter().position(|h| h == "Assigned Teacher").unwrap();
    let assigned: Vec<_> = rows[1..].iter().map(|r| r[assigned].as_str()).collect();
    assert!(assigned.contains(&"Ada Lovelace"));
    assert!(assigned.contains(&"None"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_exports_require_auth(pool: PgPool) {
    let app = setup_test_app(pool);

    for uri in ["/api/teachers/export", "/api/students/export", "/api/export/all"] {
        let response = send_raw(&app, "GET", uri, None, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }
}
