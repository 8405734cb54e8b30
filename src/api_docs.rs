use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::hello,
        api::health::health_check,
        api::auth::register,
        api::auth::sign_in,
        api::course::create_course,
        api::course::update_course,
        api::course::delete_course,
        api::course::get_course,
        api::course::list_courses,
    ),
    components(
        schemas(
            api::auth::RegistrationRequest,
            api::auth::SignInRequest,
            api::auth::AccountResponse,
            api::course::CreateCourseRequest,
            api::course::UpdateCourseRequest,
            api::course::CourseIdRequest,
            api::course::CourseResponse,
        )
    ),
    tags(
        (name = "learnhub", description = "Accounts and course catalog API")
    )
)]
pub struct ApiDoc;
