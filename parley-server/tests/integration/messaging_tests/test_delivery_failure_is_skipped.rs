use parley_core::{Envelope, EnvelopeKind};

use crate::integration::{create_test_room, init_tracing};
use crate::utils::TestPeer;

#[tokio::test]
async fn test_delivery_failure_is_skipped() {
    init_tracing();

    let room = create_test_room();
    let mut alice = TestPeer::new("alice");
    let mut bob = TestPeer::new("bob");
    let mut carol = TestPeer::new("carol");
    for peer in [&alice, &bob, &carol] {
        room.register(peer.handle.clone()).await.unwrap();
    }

    bob.close();

    room.route(Envelope::join("dave"), "dave").await.unwrap();

    assert_eq!(alice.recv().await, Envelope::join("dave"));
    assert_eq!(carol.recv().await, Envelope::join("dave"));

    // Only the lifecycle's read path removes a member.
    assert!(room.is_member(bob.peer_id()).await.unwrap());
    assert_eq!(
        room.member_names().await.unwrap(),
        vec!["alice", "bob", "carol"]
    );
}

#[tokio::test]
async fn test_leave_broadcast_survives_dead_recipient() {
    init_tracing();

    let room = create_test_room();
    let mut alice = TestPeer::new("alice");
    let mut bob = TestPeer::new("bob");
    let carol = TestPeer::new("carol");
    for peer in [&alice, &bob, &carol] {
        room.register(peer.handle.clone()).await.unwrap();
    }

    alice.close();
    room.deregister(carol.peer_id()).await.unwrap();

    assert_eq!(bob.recv().await, Envelope::leave("carol"));

    room.route(Envelope::new(EnvelopeKind::Offer, "sdp", "bob"), "alice")
        .await
        .unwrap();
    assert_eq!(bob.recv().await.username, "alice");
}
