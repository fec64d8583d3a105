use crate::error::RelayError;
use crate::room::RoomHandle;
use crate::session::SessionSettings;
use crate::signaling::Authenticator;
use parley_core::{Credentials, IceServerConfig};
use std::sync::Arc;
use tracing::warn;

struct SignalingInner {
    room: RoomHandle,
    authenticator: Arc<dyn Authenticator>,
    ice_servers: Vec<IceServerConfig>,
    session: SessionSettings,
}

/// Shared state behind the HTTP handlers.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
}

impl SignalingService {
    pub fn new(
        room: RoomHandle,
        authenticator: Arc<dyn Authenticator>,
        ice_servers: Vec<IceServerConfig>,
        session: SessionSettings,
    ) -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                room,
                authenticator,
                ice_servers,
                session,
            }),
        }
    }

    pub fn room(&self) -> &RoomHandle {
        &self.inner.room
    }

    pub fn session_settings(&self) -> &SessionSettings {
        &self.inner.session
    }

    pub fn get_ice_servers(&self) -> Vec<IceServerConfig> {
        self.inner.ice_servers.clone()
    }

    pub async fn authenticate(&self, credentials: &Credentials) -> Result<(), RelayError> {
        if self
            .inner
            .authenticator
            .verify(&credentials.username, &credentials.password)
            .await
        {
            return Ok(());
        }

        warn!(username = %credentials.username, "Authentication failed");
        Err(RelayError::AuthenticationFailure {
            username: credentials.username.clone(),
        })
    }
}
