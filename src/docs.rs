use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use freelearn_models::{
    Course, CourseFields, EnrollRequest, Lesson, LoginRequest, LoginResponse, MessageResponse,
    Module, RateCourseRequest, Rating, RegisterRequest, RegisterResponse, Role,
    UpdateCourseRequest,
};

use crate::modules::auth::controller::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::controller::ping,
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::courses::controller::list_courses,
        crate::modules::courses::controller::search_courses,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::courses::controller::rate_course,
        crate::modules::users::controller::enroll_in_course,
        crate::modules::users::controller::get_user_courses,
    ),
    components(
        schemas(
            RegisterRequest,
            RegisterResponse,
            LoginRequest,
            LoginResponse,
            Role,
            Course,
            CourseFields,
            UpdateCourseRequest,
            Module,
            Lesson,
            Rating,
            RateCourseRequest,
            EnrollRequest,
            MessageResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Authentication", description = "Registration and login"),
        (name = "Courses", description = "Course catalog, publishing and ratings"),
        (name = "Users", description = "Course enrollment")
    ),
    info(
        title = "Free Learn API",
        version = "0.1.0",
        description = "Course catalog backend: professors publish courses, students browse, rate and enroll.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/ping",
            "/register",
            "/login",
            "/get",
            "/search",
            "/courses/post",
            "/courses/get/{id}",
            "/courses/update/{id}",
            "/courses/delete/{id}",
            "/courses/rate/{id}",
            "/courses/add-course-to-user/{id}",
            "/courses/get-user-courses/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
