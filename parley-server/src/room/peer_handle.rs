use crate::error::RelayError;
use parley_core::{Envelope, PeerId};
use tokio::sync::mpsc;

/// A connected peer as seen by the room: who it claims to be and where its
/// outbound envelopes go. The receiving end belongs to the peer's socket writer.
#[derive(Debug, Clone)]
pub struct PeerHandle {
    peer_id: PeerId,
    identity: String,
    outbound: mpsc::Sender<Envelope>,
}

impl PeerHandle {
    pub fn new(
        peer_id: PeerId,
        identity: impl Into<String>,
        outbound: mpsc::Sender<Envelope>,
    ) -> Self {
        Self {
            peer_id,
            identity: identity.into(),
            outbound,
        }
    }

    pub fn peer_id(&self) -> &PeerId {
        &self.peer_id
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Waits for room in the outbound queue, so a peer that stops draining
    /// its socket holds up whoever is delivering to it.
    pub async fn deliver(&self, envelope: Envelope) -> Result<(), RelayError> {
        self.outbound
            .send(envelope)
            .await
            .map_err(|_| RelayError::DeliveryFailure {
                peer_id: self.peer_id.clone(),
            })
    }
}
