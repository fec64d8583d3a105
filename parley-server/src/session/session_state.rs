use crate::error::RelayError;
use parley_core::DecodeError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Authenticated, not yet a room member.
    Connecting,
    Joined,
    Relaying,
    Disconnected,
}

/// Why a session reached [`SessionState::Disconnected`].
#[derive(Debug, Error)]
pub enum DisconnectReason {
    #[error("closed by peer")]
    Closed,

    #[error("read failed: {0}")]
    ReadError(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("idle timeout")]
    IdleTimeout,

    #[error("room closed")]
    RoomClosed,

    /// The room refused to register the peer.
    #[error("registration refused: {0}")]
    Refused(RelayError),
}
