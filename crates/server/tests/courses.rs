use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use database::db::{PoolSettings, create_connection, sync_schema};
use serde_json::{Value, json};
use server::{create_app, state::AppState};
use std::time::Duration;
use tower::ServiceExt;

async fn app() -> Router {
    // A single long-lived connection keeps the in-memory database alive
    let pool = PoolSettings {
        max_connections: 1,
        min_connections: 1,
        acquire_timeout: Duration::from_secs(5),
        idle_timeout: Duration::from_secs(3600),
    };
    let db = create_connection("sqlite::memory:", &pool)
        .await
        .expect("Failed to open in-memory database");
    sync_schema(&db).await.expect("Failed to run migrations");

    create_app(AppState::new(db), &["http://localhost:5173".to_string()])
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

async fn create(app: &Router, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, "/courses", Some(body)).await
}

#[tokio::test]
async fn test_create_then_get_returns_submitted_fields() {
    let app = app().await;

    let (status, created) = create(
        &app,
        json!({"Dept": "cs", "Course_Number": "101", "Name": "Intro", "Hours": 3}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        created,
        json!({
            "Course_Number": "101",
            "Dept": "CS",
            "Level": null,
            "Hours": 3,
            "Name": "Intro",
            "Description": null,
        })
    );

    let (status, fetched) = send(&app, Method::GET, "/courses/101", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_lookup_key_is_normalized() {
    let app = app().await;
    create(
        &app,
        json!({"Dept": "cs", "Course_Number": "cs101", "Name": "Intro"}),
    )
    .await;

    let (status, fetched) = send(&app, Method::GET, "/courses/cs101", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["Course_Number"], "CS101");
}

#[tokio::test]
async fn test_duplicate_create_conflicts_and_keeps_original() {
    let app = app().await;
    create(
        &app,
        json!({"Dept": "CS", "Course_Number": "101", "Name": "Intro"}),
    )
    .await;

    let (status, body) = create(
        &app,
        json!({"Dept": "MATH", "Course_Number": "101", "Name": "Other"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Course number already exists");

    let (_, stored) = send(&app, Method::GET, "/courses/101", None).await;
    assert_eq!(stored["Name"], "Intro");
    assert_eq!(stored["Dept"], "CS");
}

#[tokio::test]
async fn test_create_requires_fields() {
    let app = app().await;

    for (body, field) in [
        (json!({"Course_Number": "101", "Name": "Intro"}), "Dept"),
        (json!({"Dept": "CS", "Name": "Intro"}), "Course_Number"),
        (json!({"Dept": "CS", "Course_Number": "101"}), "Name"),
        (
            json!({"Dept": "CS", "Course_Number": "101", "Name": ""}),
            "Name",
        ),
    ] {
        let (status, response) = create(&app, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["message"], format!("{field} is required"));
    }

    let (_, all) = send(&app, Method::GET, "/courses", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn test_create_rejects_bad_input() {
    let app = app().await;

    let (status, _) = create(
        &app,
        json!({"Dept": "CS", "Course_Number": "101", "Name": "Intro", "Level": "high"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = create(
        &app,
        json!({"Dept": "CS", "Course_Number": "101", "Name": "x".repeat(46)}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Name must be at most 45 characters");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/courses")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_is_ordered_by_course_number() {
    let app = app().await;
    for number in ["300", "100", "200"] {
        create(
            &app,
            json!({"Dept": "CS", "Course_Number": number, "Name": "Course"}),
        )
        .await;
    }

    let (status, all) = send(&app, Method::GET, "/courses", None).await;
    assert_eq!(status, StatusCode::OK);
    let keys: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|course| course["Course_Number"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["100", "200", "300"]);
}

#[tokio::test]
async fn test_get_missing_course() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/courses/NOPE", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Course not found");
}

#[tokio::test]
async fn test_update_changes_fields() {
    let app = app().await;
    create(
        &app,
        json!({"Dept": "CS", "Course_Number": "101", "Name": "Intro", "Description": "Old"}),
    )
    .await;

    let (status, updated) = send(
        &app,
        Method::PUT,
        "/courses/101",
        Some(json!({"Name": "Intro to CS", "Level": 100, "Description": null, "Dept": "ece"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["Name"], "Intro to CS");
    assert_eq!(updated["Level"], 100);
    assert_eq!(updated["Description"], Value::Null);
    assert_eq!(updated["Dept"], "ECE");

    let (_, stored) = send(&app, Method::GET, "/courses/101", None).await;
    assert_eq!(stored, updated);
}

#[tokio::test]
async fn test_update_rejects_key_change() {
    let app = app().await;
    create(
        &app,
        json!({"Dept": "CS", "Course_Number": "101", "Name": "Intro"}),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/courses/101",
        Some(json!({"Course_Number": "102", "Name": "Renamed"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Course_Number cannot be changed");

    let (status, stored) = send(&app, Method::GET, "/courses/101", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["Name"], "Intro");
    let (status, _) = send(&app, Method::GET, "/courses/102", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_with_same_key_is_allowed() {
    let app = app().await;
    create(
        &app,
        json!({"Dept": "CS", "Course_Number": "CS101", "Name": "Intro"}),
    )
    .await;

    let (status, updated) = send(
        &app,
        Method::PUT,
        "/courses/cs101",
        Some(json!({"Course_Number": "cs101", "Hours": 4})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["Hours"], 4);
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let app = app().await;

    let (status, _) = create(
        &app,
        json!({
            "Dept": "CS",
            "Course_Number": "101",
            "Name": "Intro",
            "Description": "x".repeat(1024 * 1024 + 1),
        }),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);

    let (_, all) = send(&app, Method::GET, "/courses", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn test_update_ignores_blank_course_number() {
    let app = app().await;
    create(
        &app,
        json!({"Dept": "CS", "Course_Number": "101", "Name": "Intro"}),
    )
    .await;

    for number in [json!(""), Value::Null] {
        let (status, updated) = send(
            &app,
            Method::PUT,
            "/courses/101",
            Some(json!({"Course_Number": number, "Level": 200})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["Course_Number"], "101");
        assert_eq!(updated["Level"], 200);
    }
}

#[tokio::test]
async fn test_update_missing_course() {
    let app = app().await;
    let (status, _) = send(
        &app,
        Method::PUT,
        "/courses/101",
        Some(json!({"Name": "Intro"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_course() {
    let app = app().await;
    create(
        &app,
        json!({"Dept": "CS", "Course_Number": "101", "Name": "Intro"}),
    )
    .await;

    let (status, body) = send(&app, Method::DELETE, "/courses/101", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Course deleted");

    let (status, _) = send(&app, Method::DELETE, "/courses/101", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_all_courses() {
    let app = app().await;
    for number in ["101", "102"] {
        create(
            &app,
            json!({"Dept": "CS", "Course_Number": number, "Name": "Course"}),
        )
        .await;
    }

    let (status, body) = send(&app, Method::DELETE, "/courses", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Deleted 2 courses", "deleted": 2}));

    let (status, all) = send(&app, Method::GET, "/courses", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all, json!([]));
}
