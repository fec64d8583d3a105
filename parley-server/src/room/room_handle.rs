use crate::error::RelayError;
use crate::room::{PeerHandle, Room, RoomCommand, RoomSettings};
use parley_core::{Envelope, PeerId};
use tokio::sync::{mpsc, oneshot};
use tracing::info;

/// Cloneable entry point to a running [`Room`].
#[derive(Clone)]
pub struct RoomHandle {
    command_tx: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    /// Start a room's event loop on the current runtime.
    pub fn spawn(settings: RoomSettings) -> Self {
        let (command_tx, command_rx) = mpsc::channel(settings.command_buffer.max(1));

        let room = Room::new(command_rx, settings);
        tokio::spawn(room.run());
        info!("Room spawned");

        Self { command_tx }
    }

    pub fn new(command_tx: mpsc::Sender<RoomCommand>) -> Self {
        Self { command_tx }
    }

    pub async fn register(&self, peer: PeerHandle) -> Result<(), RelayError> {
        self.request(|reply| RoomCommand::Register { peer, reply })
            .await?
    }

    /// Resolves once the peer is gone and the leave broadcast has been sent.
    /// Unknown peers are ignored.
    pub async fn deregister(&self, peer_id: &PeerId) -> Result<(), RelayError> {
        self.request(|reply| RoomCommand::Deregister {
            peer_id: peer_id.clone(),
            reply,
        })
        .await
    }

    /// Queue an envelope for routing on behalf of `sender`.
    pub async fn route(&self, envelope: Envelope, sender: &str) -> Result<(), RelayError> {
        self.command_tx
            .send(RoomCommand::Route {
                sender: sender.to_owned(),
                envelope,
            })
            .await
            .map_err(|_| RelayError::RoomClosed)
    }

    /// Sorted identities of the current members.
    pub async fn member_names(&self) -> Result<Vec<String>, RelayError> {
        self.request(|reply| RoomCommand::MemberNames { reply })
            .await
    }

    pub async fn is_member(&self, peer_id: &PeerId) -> Result<bool, RelayError> {
        self.request(|reply| RoomCommand::IsMember {
            peer_id: peer_id.clone(),
            reply,
        })
        .await
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> RoomCommand,
    ) -> Result<T, RelayError> {
        let (reply, response) = oneshot::channel();

        self.command_tx
            .send(build(reply))
            .await
            .map_err(|_| RelayError::RoomClosed)?;

        response.await.map_err(|_| RelayError::RoomClosed)
    }
}
