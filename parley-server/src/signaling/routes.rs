use crate::signaling::{SignalingService, ice_config_handler, ws_handler};
use axum::Router;
use axum::routing::get;

pub fn router(service: SignalingService) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/turn", get(ice_config_handler))
        .with_state(service)
}
