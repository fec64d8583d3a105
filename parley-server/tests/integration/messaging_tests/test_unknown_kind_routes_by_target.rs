use parley_core::{Envelope, EnvelopeKind};

use crate::integration::{create_test_room, init_tracing};
use crate::utils::TestPeer;

#[tokio::test]
async fn test_unknown_kind_routes_by_target() {
    init_tracing();

    let room = create_test_room();
    let mut alice = TestPeer::new("alice");
    let mut bob = TestPeer::new("bob");
    room.register(alice.handle.clone()).await.unwrap();
    room.register(bob.handle.clone()).await.unwrap();

    let custom = Envelope::new(EnvelopeKind::Other("renegotiate".into()), "x", "bob");
    room.route(custom, "alice").await.unwrap();

    let delivered = bob.recv().await;
    assert_eq!(delivered.kind, EnvelopeKind::Other("renegotiate".into()));
    assert_eq!(delivered.username, "alice");

    room.member_names().await.unwrap();
    assert!(alice.drain().is_empty());
}

#[tokio::test]
async fn test_unmatched_envelopes_are_dropped() {
    init_tracing();

    let room = create_test_room();
    let mut alice = TestPeer::new("alice");
    let mut bob = TestPeer::new("bob");
    room.register(alice.handle.clone()).await.unwrap();
    room.register(bob.handle.clone()).await.unwrap();

    room.route(Envelope::default(), "alice").await.unwrap();
    room.route(Envelope::new(EnvelopeKind::Offer, "sdp", "nobody"), "alice")
        .await
        .unwrap();

    room.member_names().await.unwrap();
    assert!(alice.drain().is_empty());
    assert!(bob.drain().is_empty());
}

#[tokio::test]
async fn test_presence_kinds_fan_out_to_everyone() {
    init_tracing();

    let room = create_test_room();
    let mut alice = TestPeer::new("alice");
    let mut bob = TestPeer::new("bob");
    room.register(alice.handle.clone()).await.unwrap();
    room.register(bob.handle.clone()).await.unwrap();

    // Target is ignored for join/leave, and the sender gets its own copy.
    room.route(Envelope::new(EnvelopeKind::Leave, "", "carol"), "alice")
        .await
        .unwrap();

    assert_eq!(alice.recv().await.username, "alice");
    assert_eq!(bob.recv().await.kind, EnvelopeKind::Leave);
}
