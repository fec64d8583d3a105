use crate::error::RelayError;
use crate::room::PeerHandle;
use parley_core::{Envelope, PeerId};
use tokio::sync::oneshot;

/// Requests accepted by the room's event loop. They are applied strictly one
/// at a time, in arrival order.
#[derive(Debug)]
pub enum RoomCommand {
    /// Add a freshly authenticated peer to the membership.
    Register {
        peer: PeerHandle,
        reply: oneshot::Sender<Result<(), RelayError>>,
    },

    /// Remove a peer and announce its departure to whoever is left.
    Deregister {
        peer_id: PeerId,
        reply: oneshot::Sender<()>,
    },

    /// Stamp `sender` onto the envelope and deliver it to its recipients.
    Route { sender: String, envelope: Envelope },

    MemberNames { reply: oneshot::Sender<Vec<String>> },

    IsMember {
        peer_id: PeerId,
        reply: oneshot::Sender<bool>,
    },
}
