use crate::error::RelayError;
use crate::session::PeerSession;
use crate::signaling::SignalingService;
use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use futures::StreamExt;
use parley_core::Credentials;
use tracing::{error, info, warn};

/// `GET /ws`: authenticate, then upgrade and hand the socket to a [`PeerSession`].
///
/// Credentials are checked before the upgrade is even looked at, so a
/// rejected client gets a plain 401 and the room never hears about it.
pub async fn ws_handler(
    State(service): State<SignalingService>,
    Query(credentials): Query<Credentials>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    if let Err(e) = service.authenticate(&credentials).await {
        return e.into_response();
    }

    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => {
            let e = RelayError::UpgradeFailure(rejection.body_text());
            warn!(username = %credentials.username, error = %e, "Upgrade rejected");
            return rejection.into_response();
        }
    };

    let identity = credentials.username;

    ws.on_failed_upgrade({
        let identity = identity.clone();
        move |e| error!(%identity, error = %e, "WebSocket upgrade failed")
    })
    .on_upgrade(move |socket| async move {
        let session = PeerSession::new(
            identity,
            service.room().clone(),
            service.session_settings().clone(),
        );
        info!(
            peer_id = %session.peer_id(),
            identity = session.identity(),
            "New WebSocket connection"
        );

        let (sink, stream) = socket.split();
        session.run(sink, stream).await;
    })
}
