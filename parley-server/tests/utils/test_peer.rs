use parley_core::{Envelope, PeerId};
use parley_server::PeerHandle;
use tokio::sync::mpsc;

use super::RECV_TIMEOUT_MS;

/// A room member without a socket: whatever the room delivers lands in an
/// in-memory queue the test can inspect.
pub struct TestPeer {
    pub handle: PeerHandle,
    rx: mpsc::Receiver<Envelope>,
}

impl TestPeer {
    pub fn new(identity: &str) -> Self {
        let (tx, rx) = mpsc::channel(64);

        Self {
            handle: PeerHandle::new(PeerId::new(), identity, tx),
            rx,
        }
    }

    pub fn peer_id(&self) -> &PeerId {
        self.handle.peer_id()
    }

    /// Next delivered envelope. Panics if nothing arrives in time.
    pub async fn recv(&mut self) -> Envelope {
        let timeout = std::time::Duration::from_millis(RECV_TIMEOUT_MS);

        match tokio::time::timeout(timeout, self.rx.recv()).await {
            Ok(Some(envelope)) => envelope,
            Ok(None) => panic!("[TestPeer] {} queue closed", self.handle.identity()),
            Err(_) => panic!("[TestPeer] {} received nothing", self.handle.identity()),
        }
    }

    /// Everything delivered so far. Only meaningful after a room round-trip
    /// (e.g. `member_names`) has flushed earlier commands.
    pub fn drain(&mut self) -> Vec<Envelope> {
        let mut delivered = Vec::new();
        while let Ok(envelope) = self.rx.try_recv() {
            delivered.push(envelope);
        }
        delivered
    }

    /// Simulate a peer whose socket writer has died.
    pub fn close(&mut self) {
        self.rx.close();
    }
}
