use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use freelearn_config::CorsConfig;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::auth::authenticate;
use crate::middleware::role::require_professor;
use crate::modules::auth::router::init_auth_router;
use crate::modules::courses::router::{
    init_catalog_router, init_courses_router, init_professor_router,
};
use crate::modules::health::router::init_health_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    let courses = Router::new()
        .merge(init_courses_router())
        .merge(init_users_router())
        .merge(init_professor_router().route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_professor,
        )))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(init_health_router())
        .merge(init_auth_router())
        .merge(init_catalog_router())
        .nest("/courses", courses)
        .with_state(state.clone())
        .layer(cors_layer(&state.cors_config))
        .layer(middleware::from_fn(logging_middleware))
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    layer.allow_origin(allowed_origins).allow_credentials(true)
}
