use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::Response,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::response::{ApiError, decode, ok, require};
use crate::domain::{Course, ExecutionContext};
use crate::infrastructure::AppState;

#[derive(Deserialize, ToSchema)]
pub struct CreateCourseRequest {
    name: String,
    url: String,
    text: String,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateCourseRequest {
    id: String,
    name: String,
    url: String,
    text: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CourseIdRequest {
    id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CourseResponse {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub text: String,
}

impl From<Course> for CourseResponse {
    fn from(c: Course) -> Self {
        Self {
            id: c.id,
            name: c.name,
            url: c.url,
            text: c.text,
        }
    }
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::BadRequest("Invalid id".to_string()))
}

#[utoipa::path(
    post,
    path = "/createCourse",
    request_body = CreateCourseRequest,
    responses(
        (status = 200, description = "Course created", body = CourseResponse),
        (status = 400, description = "Invalid request or duplicate name"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn create_course(
    State(state): State<AppState>,
    ctx: ExecutionContext,
    payload: Result<Json<CreateCourseRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let payload = decode(payload)?;
    require("name", &payload.name)?;
    require("url", &payload.url)?;
    require("text", &payload.text)?;

    let course = state
        .course_repo
        .create(
            &ctx,
            Course {
                id: Uuid::new_v4(),
                name: payload.name,
                url: payload.url,
                text: payload.text,
            },
        )
        .await?;

    Ok(ok(CourseResponse::from(course)))
}

#[utoipa::path(
    post,
    path = "/updateCourse",
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated", body = CourseResponse),
        (status = 400, description = "Invalid id, unknown course or duplicate name"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn update_course(
    State(state): State<AppState>,
    ctx: ExecutionContext,
    payload: Result<Json<UpdateCourseRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let payload = decode(payload)?;
    let id = parse_id(&payload.id)?;
    require("name", &payload.name)?;

    let course = state
        .course_repo
        .update(
            &ctx,
            Course {
                id,
                name: payload.name,
                url: payload.url,
                text: payload.text,
            },
        )
        .await?;

    Ok(ok(CourseResponse::from(course)))
}

#[utoipa::path(
    post,
    path = "/deleteCourse",
    request_body = CourseIdRequest,
    responses(
        (status = 200, description = "Deleted course as it was stored", body = CourseResponse),
        (status = 400, description = "Invalid id or unknown course"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn delete_course(
    State(state): State<AppState>,
    ctx: ExecutionContext,
    payload: Result<Json<CourseIdRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let id = parse_id(&decode(payload)?.id)?;

    let course = state.course_repo.delete(&ctx, id).await?;

    Ok(ok(CourseResponse::from(course)))
}

#[utoipa::path(
    post,
    path = "/getCourse",
    request_body = CourseIdRequest,
    responses(
        (status = 200, description = "Course found", body = CourseResponse),
        (status = 400, description = "Invalid id or unknown course"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn get_course(
    State(state): State<AppState>,
    ctx: ExecutionContext,
    payload: Result<Json<CourseIdRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let id = parse_id(&decode(payload)?.id)?;

    let course = state.course_repo.find_by_id(&ctx, id).await?;

    Ok(ok(CourseResponse::from(course)))
}

#[utoipa::path(
    post,
    path = "/getCourses",
    responses(
        (status = 200, description = "Every course", body = [CourseResponse]),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list_courses(
    State(state): State<AppState>,
    ctx: ExecutionContext,
) -> Result<Response, ApiError> {
    let courses = state.course_repo.find_all(&ctx).await?;

    Ok(ok(courses
        .into_iter()
        .map(CourseResponse::from)
        .collect::<Vec<_>>()))
}
