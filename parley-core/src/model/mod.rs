mod credentials;
mod envelope;
mod peer;
mod signaling;

pub use credentials::Credentials;
pub use envelope::{DecodeError, Envelope, EnvelopeKind};
pub use peer::PeerId;
pub use signaling::{IceConfig, IceServerConfig};
