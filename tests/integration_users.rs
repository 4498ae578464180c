mod common;

use axum::http::StatusCode;
use common::{create_test_course, create_test_user, send, setup_test_app};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_enroll_and_list_courses() {
    let app = setup_test_app();
    let professor = create_test_user(&app, true).await;
    let student = create_test_user(&app, false).await;
    let rust = create_test_course(&app, &professor, "Rust").await;
    create_test_course(&app, &professor, "Go").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/courses/add-course-to-user/{}", student.id),
        Some(&student.bearer()),
        Some(json!({ "course_id": rust })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Course added to user successfully");

    let (status, body) = send(
        &app,
        "GET",
        &format!("/courses/get-user-courses/{}", student.id),
        Some(&student.bearer()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let courses = body.as_array().unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0]["id"], rust.as_str());
}

#[tokio::test]
async fn test_enroll_twice_is_a_no_op() {
    let app = setup_test_app();
    let professor = create_test_user(&app, true).await;
    let student = create_test_user(&app, false).await;
    let course_id = create_test_course(&app, &professor, "Rust").await;
    let uri = format!("/courses/add-course-to-user/{}", student.id);

    for _ in 0..2 {
        let (status, _) = send(
            &app,
            "POST",
            &uri,
            Some(&student.bearer()),
            Some(json!({ "course_id": course_id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = send(
        &app,
        "GET",
        &format!("/courses/get-user-courses/{}", student.id),
        Some(&student.bearer()),
        None,
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_enroll_in_missing_course() {
    let app = setup_test_app();
    let student = create_test_user(&app, false).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/courses/add-course-to-user/{}", student.id),
        Some(&student.bearer()),
        Some(json!({ "course_id": Uuid::new_v4() })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Course not found");
}

#[tokio::test]
async fn test_enroll_for_another_user_is_forbidden() {
    let app = setup_test_app();
    let professor = create_test_user(&app, true).await;
    let student = create_test_user(&app, false).await;
    let other = create_test_user(&app, false).await;
    let course_id = create_test_course(&app, &professor, "Rust").await;

    let (status, _) = send(
        &app,
        "POST",
        &format!("/courses/add-course-to-user/{}", other.id),
        Some(&student.bearer()),
        Some(json!({ "course_id": course_id })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/courses/get-user-courses/{}", other.id),
        Some(&student.bearer()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_enroll_with_bad_ids() {
    let app = setup_test_app();
    let student = create_test_user(&app, false).await;

    let (status, body) = send(
        &app,
        "POST",
        "/courses/add-course-to-user/not-a-uuid",
        Some(&student.bearer()),
        Some(json!({ "course_id": Uuid::new_v4() })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid user ID");

    let (status, _) = send(
        &app,
        "POST",
        &format!("/courses/add-course-to-user/{}", student.id),
        Some(&student.bearer()),
        Some(json!({ "course_id": "nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_enrolled_course_deleted_later() {
    let app = setup_test_app();
    let professor = create_test_user(&app, true).await;
    let student = create_test_user(&app, false).await;
    let course_id = create_test_course(&app, &professor, "Rust").await;

    send(
        &app,
        "POST",
        &format!("/courses/add-course-to-user/{}", student.id),
        Some(&student.bearer()),
        Some(json!({ "course_id": course_id })),
    )
    .await;
    send(
        &app,
        "DELETE",
        &format!("/courses/delete/{course_id}"),
        Some(&professor.bearer()),
        None,
    )
    .await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/courses/get-user-courses/{}", student.id),
        Some(&student.bearer()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}
