use crate::error::RelayError;
use crate::signaling::SignalingService;
use axum::Json;
use axum::extract::{Query, State};
use parley_core::{Credentials, IceConfig};
use tracing::debug;

/// `GET /turn`: ICE servers for an authenticated user.
pub async fn ice_config_handler(
    State(service): State<SignalingService>,
    Query(credentials): Query<Credentials>,
) -> Result<Json<IceConfig>, RelayError> {
    service.authenticate(&credentials).await?;

    debug!(username = %credentials.username, "Serving ICE configuration");
    Ok(Json(IceConfig {
        ice_servers: service.get_ice_servers(),
    }))
}
