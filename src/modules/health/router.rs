use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::ping;

pub fn init_health_router() -> Router<AppState> {
    Router::new().route("/ping", get(ping))
}
