pub mod test_peer;

pub use test_connection::*;
pub use test_peer::*;

/// Upper bound for anything the room is expected to deliver (ms).
pub const RECV_TIMEOUT_MS: u64 = 2000;
