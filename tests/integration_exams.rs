mod common;

use axum::http::{Method, StatusCode};
use common::{
    TestUser, count_rows, create_test_discipline, create_test_user, send, setup_test_app,
};
use journal_core::{DisciplineId, ExamId, Role};
use journal_models::{Exam, Grade};
use serde_json::{Value, json};
use sqlx::SqlitePool;

struct Fixture {
    teacher: TestUser,
    student: TestUser,
    course_id: i64,
    discipline_id: DisciplineId,
}

/// One course with one (discipline, teacher) assignment and one enrolled
/// student.
async fn fixture(pool: &SqlitePool) -> Fixture {
    let teacher = create_test_user(pool, "teacher@test.com", Role::Teacher).await;
    let student = create_test_user(pool, "student@test.com", Role::Student).await;
    let discipline_id = create_test_discipline(pool, "Graphs").await;

    let course_id: i64 =
        sqlx::query_scalar("INSERT INTO courses (num, name) VALUES (101, 'Algorithms') RETURNING id")
            .fetch_one(pool)
            .await
            .unwrap();
    sqlx::query("INSERT INTO assignments (course_id, discipline_id, teacher_id) VALUES (?, ?, ?)")
        .bind(course_id)
        .bind(discipline_id)
        .bind(teacher.id)
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO enrollments (course_id, student_id) VALUES (?, ?)")
        .bind(course_id)
        .bind(student.id)
        .execute(pool)
        .await
        .unwrap();

    Fixture {
        teacher,
        student,
        course_id,
        discipline_id,
    }
}

fn sign_up_body(f: &Fixture, date: &str) -> Value {
    json!({
        "course_id": f.course_id,
        "discipline_id": f.discipline_id,
        "teacher_id": f.teacher.id,
        "exam_date": date
    })
}

fn grade_body(f: &Fixture, date: &str, grade: i64) -> Value {
    json!({
        "student_id": f.student.id,
        "course_id": f.course_id,
        "discipline_id": f.discipline_id,
        "exam_date": date,
        "grade": grade
    })
}

#[sqlx::test(migrations = "./migrations")]
async fn test_sign_up_then_grade(pool: SqlitePool) {
    let f = fixture(&pool).await;
    let app = setup_test_app(pool.clone());

    let signed_up = send(
        &app,
        Method::POST,
        "/exams/sign-up",
        Some(&f.student.token),
        Some(sign_up_body(&f, "2026-06-10")),
    )
    .await;
    assert_eq!(signed_up.body["status"], "OK");
    let exam_id = ExamId::new(signed_up.body["exam_id"].as_i64().unwrap());

    let exam: Exam = sqlx::query_as("SELECT id, student_id, assignment_id, exam_date FROM exams")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(exam.id, exam_id);
    assert_eq!(exam.student_id, f.student.id);
    assert_eq!(exam.exam_date.to_string(), "2026-06-10");

    let graded = send(
        &app,
        Method::POST,
        "/exams/grade",
        Some(&f.teacher.token),
        Some(grade_body(&f, "2026-06-10", 5)),
    )
    .await;
    assert_eq!(graded.body, json!({ "status": "OK" }));

    let grade: Grade = sqlx::query_as(
        "SELECT exam_id, grader_id, grade, grade_date FROM grades WHERE exam_id = ?",
    )
    .bind(exam_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(grade.grade, 5);
    assert_eq!(grade.grader_id, f.teacher.id);

    let listing = send(&app, Method::GET, "/courses", Some(&f.student.token), None).await;
    assert_eq!(listing.body["courses"][0]["disciplines"][0]["grade"], 5);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_sign_up_with_timestamp(pool: SqlitePool) {
    let f = fixture(&pool).await;
    let app = setup_test_app(pool.clone());

    let signed_up = send(
        &app,
        Method::POST,
        "/exams/sign-up",
        Some(&f.student.token),
        Some(sign_up_body(&f, "2026-06-10T00:00:00Z")),
    )
    .await;
    assert_eq!(signed_up.body["status"], "OK");

    let stored: String = sqlx::query_scalar("SELECT exam_date FROM exams")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, "2026-06-10");

    // The plain date addresses the same exam.
    let graded = send(
        &app,
        Method::POST,
        "/exams/grade",
        Some(&f.teacher.token),
        Some(grade_body(&f, "2026-06-10", 3)),
    )
    .await;
    assert_eq!(graded.body, json!({ "status": "OK" }));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_malformed_exam_date_is_rejected(pool: SqlitePool) {
    let f = fixture(&pool).await;
    let app = setup_test_app(pool.clone());

    let response = send(
        &app,
        Method::POST,
        "/exams/sign-up",
        Some(&f.student.token),
        Some(sign_up_body(&f, "10.06.2026")),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "Error");
    assert_eq!(count_rows(&pool, "exams").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_regrade_overwrites(pool: SqlitePool) {
    let f = fixture(&pool).await;
    let app = setup_test_app(pool.clone());

    send(
        &app,
        Method::POST,
        "/exams/sign-up",
        Some(&f.student.token),
        Some(sign_up_body(&f, "2026-06-10")),
    )
    .await;
    for grade in [2, 4] {
        send(
            &app,
            Method::POST,
            "/exams/grade",
            Some(&f.teacher.token),
            Some(grade_body(&f, "2026-06-10", grade)),
        )
        .await;
    }

    let grades: Vec<i64> = sqlx::query_scalar("SELECT grade FROM grades")
        .fetch_all(&pool)
        .await
        .unwrap();
    assert_eq!(grades, vec![4]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_latest_exam_grade_is_listed(pool: SqlitePool) {
    let f = fixture(&pool).await;
    let app = setup_test_app(pool.clone());

    for (date, grade) in [("2026-06-20", 3), ("2026-06-01", 5)] {
        send(
            &app,
            Method::POST,
            "/exams/sign-up",
            Some(&f.student.token),
            Some(sign_up_body(&f, date)),
        )
        .await;
        send(
            &app,
            Method::POST,
            "/exams/grade",
            Some(&f.teacher.token),
            Some(grade_body(&f, date, grade)),
        )
        .await;
    }

    let listing = send(&app, Method::GET, "/courses", Some(&f.student.token), None).await;
    assert_eq!(listing.body["courses"][0]["disciplines"][0]["grade"], 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_double_sign_up_is_rejected(pool: SqlitePool) {
    let f = fixture(&pool).await;
    let app = setup_test_app(pool.clone());

    send(
        &app,
        Method::POST,
        "/exams/sign-up",
        Some(&f.student.token),
        Some(sign_up_body(&f, "2026-06-10")),
    )
    .await;
    let response = send(
        &app,
        Method::POST,
        "/exams/sign-up",
        Some(&f.student.token),
        Some(sign_up_body(&f, "2026-06-10")),
    )
    .await;

    assert_eq!(
        response.body,
        json!({ "status": "Error", "error": "already signed up for this exam" })
    );
    assert_eq!(count_rows(&pool, "exams").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_sign_up_with_wrong_teacher(pool: SqlitePool) {
    let f = fixture(&pool).await;
    let other = create_test_user(&pool, "other@test.com", Role::Teacher).await;
    let app = setup_test_app(pool.clone());

    let mut body = sign_up_body(&f, "2026-06-10");
    body["teacher_id"] = json!(other.id);
    let response = send(&app, Method::POST, "/exams/sign-up", Some(&f.student.token), Some(body)).await;

    assert_eq!(
        response.body,
        json!({ "status": "Error", "error": "assignment not found" })
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_grade_out_of_range(pool: SqlitePool) {
    let f = fixture(&pool).await;
    let app = setup_test_app(pool.clone());

    for grade in [0, 6] {
        let response = send(
            &app,
            Method::POST,
            "/exams/grade",
            Some(&f.teacher.token),
            Some(grade_body(&f, "2026-06-10", grade)),
        )
        .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.body,
            json!({ "status": "Error", "error": "grade must be between 1 and 5" })
        );
    }
    assert_eq!(count_rows(&pool, "grades").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_grading_without_sign_up(pool: SqlitePool) {
    let f = fixture(&pool).await;
    let app = setup_test_app(pool.clone());

    let response = send(
        &app,
        Method::POST,
        "/exams/grade",
        Some(&f.teacher.token),
        Some(grade_body(&f, "2026-06-10", 4)),
    )
    .await;

    assert_eq!(
        response.body,
        json!({ "status": "Error", "error": "exam not found" })
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unassigned_teacher_cannot_grade(pool: SqlitePool) {
    let f = fixture(&pool).await;
    let other = create_test_user(&pool, "other@test.com", Role::Teacher).await;
    let app = setup_test_app(pool.clone());

    send(
        &app,
        Method::POST,
        "/exams/sign-up",
        Some(&f.student.token),
        Some(sign_up_body(&f, "2026-06-10")),
    )
    .await;
    let response = send(
        &app,
        Method::POST,
        "/exams/grade",
        Some(&other.token),
        Some(grade_body(&f, "2026-06-10", 4)),
    )
    .await;

    assert_eq!(
        response.body,
        json!({ "status": "Error", "error": "assignment not found" })
    );
    assert_eq!(count_rows(&pool, "grades").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_exam_routes_are_role_restricted(pool: SqlitePool) {
    let f = fixture(&pool).await;
    let app = setup_test_app(pool.clone());

    let teacher_sign_up = send(
        &app,
        Method::POST,
        "/exams/sign-up",
        Some(&f.teacher.token),
        Some(sign_up_body(&f, "2026-06-10")),
    )
    .await;
    let student_grade = send(
        &app,
        Method::POST,
        "/exams/grade",
        Some(&f.student.token),
        Some(grade_body(&f, "2026-06-10", 5)),
    )
    .await;

    assert_eq!(teacher_sign_up.status, StatusCode::UNAUTHORIZED);
    assert_eq!(student_grade.status, StatusCode::UNAUTHORIZED);
    assert_eq!(count_rows(&pool, "exams").await, 0);
}
