use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use parley_core::PeerId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    /// Credentials were rejected before any room state was touched.
    #[error("Unauthorized")]
    AuthenticationFailure { username: String },

    #[error("websocket upgrade failed: {0}")]
    UpgradeFailure(String),

    /// The recipient's writer is gone. Logged by the room and skipped.
    #[error("delivery to peer {peer_id} failed")]
    DeliveryFailure { peer_id: PeerId },

    #[error("peer {0} is already a member of the room")]
    AlreadyRegistered(PeerId),

    #[error("identity '{0}' is already present in the room")]
    DuplicateIdentity(String),

    #[error("room is no longer running")]
    RoomClosed,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = match &self {
            RelayError::AuthenticationFailure { .. } => StatusCode::UNAUTHORIZED,
            RelayError::UpgradeFailure(_) => StatusCode::BAD_REQUEST,
            RelayError::AlreadyRegistered(_) | RelayError::DuplicateIdentity(_) => {
                StatusCode::CONFLICT
            }
            RelayError::DeliveryFailure { .. } | RelayError::RoomClosed => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        };

        (status, self.to_string()).into_response()
    }
}
