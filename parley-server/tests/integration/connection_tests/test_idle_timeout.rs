use parley_core::Envelope;
use parley_server::{DisconnectReason, SessionSettings};

use crate::integration::{create_test_room, init_tracing};
use crate::utils::TestConnection;

#[tokio::test(start_paused = true)]
async fn test_idle_peer_is_disconnected_when_timeout_configured() {
    init_tracing();

    let room = create_test_room();
    let mut alice = TestConnection::join(&room, "alice").await;

    let settings = SessionSettings {
        idle_timeout_secs: Some(30),
        ..Default::default()
    };
    let mut bob = TestConnection::open_with(&room, "bob", settings);
    assert_eq!(bob.recv().await, Envelope::join("bob"));
    assert_eq!(alice.recv().await, Envelope::join("bob"));

    tokio::time::sleep(std::time::Duration::from_secs(31)).await;

    let (reason, _) = bob.finished().await;
    assert!(matches!(reason, DisconnectReason::IdleTimeout));
    assert_eq!(alice.recv().await, Envelope::leave("bob"));
}

#[tokio::test(start_paused = true)]
async fn test_idle_peer_stays_without_timeout() {
    init_tracing();

    let room = create_test_room();
    let bob = TestConnection::join(&room, "bob").await;

    tokio::time::sleep(std::time::Duration::from_secs(3600)).await;

    assert!(room.is_member(&bob.peer_id).await.unwrap());
}
