use axum::Json;

use crate::modules::users::model::MessageResponse;

pub const PING_MESSAGE: &str = "api is working!!";

/// Liveness probe
#[utoipa::path(
    get,
    path = "/ping",
    responses(
        (status = 200, description = "Service is up", body = MessageResponse)
    ),
    tag = "Health"
)]
pub async fn ping() -> Json<MessageResponse> {
    Json(MessageResponse::new(PING_MESSAGE))
}
