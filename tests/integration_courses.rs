mod common;

use axum::http::{Method, StatusCode};
use common::{count_rows, create_test_discipline, create_test_user, send, setup_test_app};
use journal_core::Role;
use journal_models::Enrollment;
use serde_json::json;
use sqlx::SqlitePool;

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_creates_course_with_subject(pool: SqlitePool) {
    let admin = create_test_user(&pool, "admin@test.com", Role::Admin).await;
    let teacher = create_test_user(&pool, "teacher@test.com", Role::Teacher).await;
    let graphs = create_test_discipline(&pool, "Graphs").await;
    let app = setup_test_app(pool.clone());

    let response = send(
        &app,
        Method::POST,
        "/courses/create",
        Some(&admin.token),
        Some(json!({
            "name": "Algorithms",
            "number": 101,
            "subjects": [{ "teacher_id": teacher.id, "discipline_id": graphs }]
        })),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "status": "OK", "course_id": 1 }));

    let (course_id, discipline_id, teacher_id): (i64, i64, i64) =
        sqlx::query_as("SELECT course_id, discipline_id, teacher_id FROM assignments")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(course_id, 1);
    assert_eq!(discipline_id, graphs.get());
    assert_eq!(teacher_id, teacher.id.get());

    let listing = send(&app, Method::GET, "/courses", Some(&teacher.token), None).await;
    assert_eq!(listing.body["courses"][0]["course_name"], "Algorithms");
    assert_eq!(listing.body["courses"][0]["course_number"], 101);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_every_subject_becomes_an_assignment(pool: SqlitePool) {
    let admin = create_test_user(&pool, "admin@test.com", Role::Admin).await;
    let first = create_test_user(&pool, "t1@test.com", Role::Teacher).await;
    let second = create_test_user(&pool, "t2@test.com", Role::Teacher).await;
    let graphs = create_test_discipline(&pool, "Graphs").await;
    let sorting = create_test_discipline(&pool, "Sorting").await;
    let app = setup_test_app(pool.clone());

    let response = send(
        &app,
        Method::POST,
        "/courses/create",
        Some(&admin.token),
        Some(json!({
            "name": "Algorithms",
            "number": 101,
            "subjects": [
                { "teacher_id": first.id, "discipline_id": graphs },
                { "teacher_id": second.id, "discipline_id": graphs },
                { "teacher_id": first.id, "discipline_id": sorting }
            ]
        })),
    )
    .await;

    assert_eq!(response.body["status"], "OK");
    assert_eq!(count_rows(&pool, "assignments").await, 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_repeated_subject_is_rejected(pool: SqlitePool) {
    let admin = create_test_user(&pool, "admin@test.com", Role::Admin).await;
    let teacher = create_test_user(&pool, "teacher@test.com", Role::Teacher).await;
    let graphs = create_test_discipline(&pool, "Graphs").await;
    let app = setup_test_app(pool.clone());
    let subject = json!({ "teacher_id": teacher.id, "discipline_id": graphs });

    let response = send(
        &app,
        Method::POST,
        "/courses/create",
        Some(&admin.token),
        Some(json!({ "name": "Algorithms", "number": 101, "subjects": [subject.clone(), subject] })),
    )
    .await;

    assert_eq!(
        response.body,
        json!({ "status": "Error", "error": "duplicate subject in course" })
    );
    // Statements are not wrapped in a transaction.
    assert_eq!(count_rows(&pool, "courses").await, 1);
    assert_eq!(count_rows(&pool, "assignments").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_course_without_subjects(pool: SqlitePool) {
    let admin = create_test_user(&pool, "admin@test.com", Role::Admin).await;
    let app = setup_test_app(pool.clone());

    let response = send(
        &app,
        Method::POST,
        "/courses/create",
        Some(&admin.token),
        Some(json!({ "name": "Empty", "number": 1 })),
    )
    .await;

    assert_eq!(response.body["status"], "OK");
    assert_eq!(count_rows(&pool, "courses").await, 1);
    assert_eq!(count_rows(&pool, "assignments").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_teacher_fails_to_save(pool: SqlitePool) {
    let admin = create_test_user(&pool, "admin@test.com", Role::Admin).await;
    let graphs = create_test_discipline(&pool, "Graphs").await;
    let app = setup_test_app(pool.clone());

    let response = send(
        &app,
        Method::POST,
        "/courses/create",
        Some(&admin.token),
        Some(json!({
            "name": "Algorithms",
            "number": 101,
            "subjects": [{ "teacher_id": 999, "discipline_id": graphs }]
        })),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({ "status": "Error", "error": "failed to save course" })
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_malformed_body_is_bad_request(pool: SqlitePool) {
    let admin = create_test_user(&pool, "admin@test.com", Role::Admin).await;
    let app = setup_test_app(pool.clone());

    let response = send(
        &app,
        Method::POST,
        "/courses/create",
        Some(&admin.token),
        Some(json!({ "name": "Algorithms", "number": "one-oh-one" })),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "Error");
    assert_eq!(response.body["error"], "failed to decode request");
    assert_eq!(count_rows(&pool, "courses").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_non_admin_cannot_create_course(pool: SqlitePool) {
    let student = create_test_user(&pool, "student@test.com", Role::Student).await;
    let teacher = create_test_user(&pool, "teacher@test.com", Role::Teacher).await;
    let app = setup_test_app(pool.clone());

    for token in [&student.token, &teacher.token] {
        let response = send(
            &app,
            Method::POST,
            "/courses/create",
            Some(token),
            Some(json!({ "name": "Algorithms", "number": 101 })),
        )
        .await;

        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body, json!({ "status": "Error", "error": "unauthorized" }));
    }

    assert_eq!(count_rows(&pool, "courses").await, 0);
}

async fn seed_course(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("INSERT INTO courses (num, name) VALUES (101, 'Algorithms') RETURNING id")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enroll_then_remove_students(pool: SqlitePool) {
    let admin = create_test_user(&pool, "admin@test.com", Role::Admin).await;
    let teacher = create_test_user(&pool, "teacher@test.com", Role::Teacher).await;
    let ann = create_test_user(&pool, "ann@test.com", Role::Student).await;
    let bob = create_test_user(&pool, "bob@test.com", Role::Student).await;
    let course_id = seed_course(&pool).await;
    let app = setup_test_app(pool.clone());
    let uri = format!("/courses/{}/modify/students", course_id);

    let enrolled = send(
        &app,
        Method::POST,
        &uri,
        Some(&admin.token),
        Some(json!({ "enrollments": [
            { "course_id": course_id, "student_id": ann.id },
            { "student_id": bob.id }
        ]})),
    )
    .await;
    assert_eq!(enrolled.body, json!({ "status": "OK" }));
    assert_eq!(count_rows(&pool, "enrollments").await, 2);

    let roster = send(
        &app,
        Method::GET,
        &format!("/courses/{}/students", course_id),
        Some(&teacher.token),
        None,
    )
    .await;
    assert_eq!(roster.body["students"].as_array().unwrap().len(), 2);

    let removed = send(
        &app,
        Method::DELETE,
        &uri,
        Some(&admin.token),
        Some(json!({ "enrollments": [{ "student_id": ann.id }] })),
    )
    .await;
    assert_eq!(removed.body, json!({ "status": "OK" }));

    let remaining: Vec<Enrollment> =
        sqlx::query_as("SELECT id, course_id, student_id FROM enrollments")
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].student_id, bob.id);
    assert_eq!(remaining[0].course_id.get(), course_id);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_removing_absent_enrollment_succeeds(pool: SqlitePool) {
    let admin = create_test_user(&pool, "admin@test.com", Role::Admin).await;
    let ann = create_test_user(&pool, "ann@test.com", Role::Student).await;
    let course_id = seed_course(&pool).await;
    let app = setup_test_app(pool.clone());

    let response = send(
        &app,
        Method::DELETE,
        &format!("/courses/{}/modify/students", course_id),
        Some(&admin.token),
        Some(json!({ "enrollments": [{ "student_id": ann.id }] })),
    )
    .await;

    assert_eq!(response.body, json!({ "status": "OK" }));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_enrollment_is_rejected(pool: SqlitePool) {
    let admin = create_test_user(&pool, "admin@test.com", Role::Admin).await;
    let ann = create_test_user(&pool, "ann@test.com", Role::Student).await;
    let course_id = seed_course(&pool).await;
    let app = setup_test_app(pool.clone());
    let uri = format!("/courses/{}/modify/students", course_id);
    let body = json!({ "enrollments": [{ "student_id": ann.id }] });

    send(&app, Method::POST, &uri, Some(&admin.token), Some(body.clone())).await;
    let response = send(&app, Method::POST, &uri, Some(&admin.token), Some(body)).await;

    assert_eq!(
        response.body,
        json!({ "status": "Error", "error": "student already enrolled" })
    );
    assert_eq!(count_rows(&pool, "enrollments").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enrollment_for_other_course_is_rejected(pool: SqlitePool) {
    let admin = create_test_user(&pool, "admin@test.com", Role::Admin).await;
    let ann = create_test_user(&pool, "ann@test.com", Role::Student).await;
    let course_id = seed_course(&pool).await;
    let app = setup_test_app(pool.clone());

    let response = send(
        &app,
        Method::POST,
        &format!("/courses/{}/modify/students", course_id),
        Some(&admin.token),
        Some(json!({ "enrollments": [{ "course_id": course_id + 1, "student_id": ann.id }] })),
    )
    .await;

    assert_eq!(response.body["status"], "Error");
    assert_eq!(count_rows(&pool, "enrollments").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_cannot_modify_enrollments(pool: SqlitePool) {
    let ann = create_test_user(&pool, "ann@test.com", Role::Student).await;
    let course_id = seed_course(&pool).await;
    let app = setup_test_app(pool.clone());

    let response = send(
        &app,
        Method::POST,
        &format!("/courses/{}/modify/students", course_id),
        Some(&ann.token),
        Some(json!({ "enrollments": [{ "student_id": ann.id }] })),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(count_rows(&pool, "enrollments").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unparseable_course_id_is_rejected(pool: SqlitePool) {
    let admin = create_test_user(&pool, "admin@test.com", Role::Admin).await;
    let student = create_test_user(&pool, "student@test.com", Role::Student).await;
    let app = setup_test_app(pool.clone());

    let roster = send(
        &app,
        Method::GET,
        "/courses/abc/students",
        Some(&admin.token),
        None,
    )
    .await;
    let enroll = send(
        &app,
        Method::POST,
        "/courses/abc/modify/students",
        Some(&admin.token),
        Some(json!({ "enrollments": [{ "student_id": student.id }] })),
    )
    .await;

    for response in [roster, enroll] {
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.body,
            json!({ "status": "Error", "error": "course not found" })
        );
    }
    assert_eq!(count_rows(&pool, "enrollments").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_cannot_read_roster(pool: SqlitePool) {
    let ann = create_test_user(&pool, "ann@test.com", Role::Student).await;
    let course_id = seed_course(&pool).await;
    let app = setup_test_app(pool.clone());

    let response = send(
        &app,
        Method::GET,
        &format!("/courses/{}/students", course_id),
        Some(&ann.token),
        None,
    )
    .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_my_courses_by_role(pool: SqlitePool) {
    let admin = create_test_user(&pool, "admin@test.com", Role::Admin).await;
    let teacher = create_test_user(&pool, "teacher@test.com", Role::Teacher).await;
    let ann = create_test_user(&pool, "ann@test.com", Role::Student).await;
    let graphs = create_test_discipline(&pool, "Graphs").await;
    let app = setup_test_app(pool.clone());

    let created = send(
        &app,
        Method::POST,
        "/courses/create",
        Some(&admin.token),
        Some(json!({
            "name": "Algorithms",
            "number": 101,
            "subjects": [{ "teacher_id": teacher.id, "discipline_id": graphs }]
        })),
    )
    .await;
    let course_id = created.body["course_id"].as_i64().unwrap();

    send(
        &app,
        Method::POST,
        &format!("/courses/{}/modify/students", course_id),
        Some(&admin.token),
        Some(json!({ "enrollments": [{ "student_id": ann.id }] })),
    )
    .await;

    let admin_view = send(&app, Method::GET, "/courses", Some(&admin.token), None).await;
    assert_eq!(admin_view.body, json!({ "status": "OK", "courses": [] }));

    let student_view = send(&app, Method::GET, "/courses", Some(&ann.token), None).await;
    let course = &student_view.body["courses"][0];
    assert_eq!(course["course_id"], course_id);
    assert_eq!(course["disciplines"][0]["discipline_name"], "Graphs");
    assert_eq!(course["disciplines"][0]["teachers"][0]["email"], "teacher@test.com");
    assert!(course["disciplines"][0].get("grade").is_none());

    let teacher_view = send(&app, Method::GET, "/courses", Some(&teacher.token), None).await;
    assert_eq!(teacher_view.body["courses"].as_array().unwrap().len(), 1);
}
