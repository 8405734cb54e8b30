pub mod auth;
pub mod context;
pub mod course;
pub mod health;
pub mod response;

use axum::{
    Router,
    routing::{get, post},
};

use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/", get(health::hello))
        .route("/health", get(health::health_check))
        // Accounts
        .route("/registration", post(auth::register))
        .route("/signIn", post(auth::sign_in))
        // Courses
        .route("/createCourse", post(course::create_course))
        .route("/updateCourse", post(course::update_course))
        .route("/deleteCourse", post(course::delete_course))
        .route("/getCourse", post(course::get_course))
        .route("/getCourses", post(course::list_courses))
        .with_state(state)
}
