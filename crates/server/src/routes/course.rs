use crate::{
    dtos::course::{
        CourseResponse, CreateCourseRequest, DeleteAllResponse, MessageResponse,
        UpdateCourseRequest,
    },
    error::{ApiError, ErrorResponse},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use log::info;
use models::{
    course::{CourseDraft, CoursePatchDraft},
    validation::normalize_code,
};

/// Create a course
#[utoipa::path(
    post,
    path = "/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 409, description = "Course number already exists", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Courses"
)]
pub async fn create_course(
    State(state): State<AppState>,
    payload: Result<Json<CreateCourseRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CourseResponse>), ApiError> {
    let Json(payload) = payload?;
    let new_course = CourseDraft::from(payload).validate()?;

    let created = state
        .courses
        .create(new_course)
        .await
        .map_err(|e| ApiError::from_repository(e, "Failed to create course"))?;

    info!("Created course {}", created.course_number);
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List all courses ordered by course number
#[utoipa::path(
    get,
    path = "/courses",
    responses(
        (status = 200, description = "All courses", body = Vec<CourseResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Courses"
)]
pub async fn get_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let courses = state
        .courses
        .find_all()
        .await
        .map_err(|e| ApiError::from_repository(e, "Failed to fetch courses"))?;

    Ok(Json(courses.into_iter().map(Into::into).collect()))
}

/// Get a course by its course number
#[utoipa::path(
    get,
    path = "/courses/{key}",
    params(
        ("key" = String, Path, description = "Course number, matched case-insensitively")
    ),
    responses(
        (status = 200, description = "Course found", body = CourseResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Courses"
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<CourseResponse>, ApiError> {
    let course = state
        .courses
        .find_by_key(&normalize_code(&key))
        .await
        .map_err(|e| ApiError::from_repository(e, "Failed to fetch course"))?;

    Ok(Json(course.into()))
}

/// Update some fields of a course. The course number itself cannot change.
#[utoipa::path(
    put,
    path = "/courses/{key}",
    params(
        ("key" = String, Path, description = "Course number, matched case-insensitively")
    ),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated", body = CourseResponse),
        (status = 400, description = "Invalid field or course number change", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Courses"
)]
pub async fn update_course(
    State(state): State<AppState>,
    Path(key): Path<String>,
    payload: Result<Json<UpdateCourseRequest>, JsonRejection>,
) -> Result<Json<CourseResponse>, ApiError> {
    let key = normalize_code(&key);
    let Json(payload) = payload?;
    let patch = CoursePatchDraft::from(payload).validate(&key)?;

    let updated = state
        .courses
        .update_by_key(&key, patch)
        .await
        .map_err(|e| ApiError::from_repository(e, "Failed to update course"))?;

    info!("Updated course {key}");
    Ok(Json(updated.into()))
}

/// Delete a course by its course number
#[utoipa::path(
    delete,
    path = "/courses/{key}",
    params(
        ("key" = String, Path, description = "Course number, matched case-insensitively")
    ),
    responses(
        (status = 200, description = "Course deleted", body = MessageResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Courses"
)]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let key = normalize_code(&key);
    state
        .courses
        .delete_by_key(&key)
        .await
        .map_err(|e| ApiError::from_repository(e, "Failed to delete course"))?;

    info!("Deleted course {key}");
    Ok(Json(MessageResponse {
        message: "Course deleted".to_string(),
    }))
}

/// Delete every course
#[utoipa::path(
    delete,
    path = "/courses",
    responses(
        (status = 200, description = "All courses deleted", body = DeleteAllResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Courses"
)]
pub async fn delete_courses(
    State(state): State<AppState>,
) -> Result<Json<DeleteAllResponse>, ApiError> {
    let deleted = state
        .courses
        .delete_all()
        .await
        .map_err(|e| ApiError::from_repository(e, "Failed to delete all courses"))?;

    info!("Deleted {deleted} courses");
    Ok(Json(DeleteAllResponse {
        message: format!("Deleted {deleted} courses"),
        deleted,
    }))
}
