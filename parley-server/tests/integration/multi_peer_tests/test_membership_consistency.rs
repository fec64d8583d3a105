use parley_core::Envelope;
use parley_server::RelayError;

use crate::integration::{create_test_room, init_tracing};
use crate::utils::TestPeer;

#[tokio::test]
async fn test_membership_tracks_register_and_deregister() {
    init_tracing();

    let room = create_test_room();
    let peers: Vec<TestPeer> = ["alice", "bob", "carol", "dave"]
        .into_iter()
        .map(TestPeer::new)
        .collect();

    for (joined, peer) in peers.iter().enumerate() {
        assert!(!room.is_member(peer.peer_id()).await.unwrap());
        room.register(peer.handle.clone()).await.unwrap();
        assert!(room.is_member(peer.peer_id()).await.unwrap());
        assert_eq!(room.member_names().await.unwrap().len(), joined + 1);
    }

    room.deregister(peers[1].peer_id()).await.unwrap();
    room.deregister(peers[3].peer_id()).await.unwrap();

    assert_eq!(room.member_names().await.unwrap(), vec!["alice", "carol"]);
    assert!(!room.is_member(peers[1].peer_id()).await.unwrap());
    assert!(room.is_member(peers[2].peer_id()).await.unwrap());
}

#[tokio::test]
async fn test_reregistering_a_member_is_rejected() {
    init_tracing();

    let room = create_test_room();
    let alice = TestPeer::new("alice");

    room.register(alice.handle.clone()).await.unwrap();
    let second = room.register(alice.handle.clone()).await;

    assert!(matches!(second, Err(RelayError::AlreadyRegistered(ref id)) if id == alice.peer_id()));
    assert_eq!(room.member_names().await.unwrap(), vec!["alice"]);
}

#[tokio::test]
async fn test_deregistering_a_non_member_is_silent() {
    init_tracing();

    let room = create_test_room();
    let mut alice = TestPeer::new("alice");
    let bob = TestPeer::new("bob");
    room.register(alice.handle.clone()).await.unwrap();
    room.register(bob.handle.clone()).await.unwrap();

    let stranger = TestPeer::new("mallory");
    room.deregister(stranger.peer_id()).await.unwrap();

    room.deregister(bob.peer_id()).await.unwrap();
    room.deregister(bob.peer_id()).await.unwrap();

    assert_eq!(alice.drain(), vec![Envelope::leave("bob")]);
    assert_eq!(room.member_names().await.unwrap(), vec!["alice"]);
}

#[tokio::test]
async fn test_leave_is_not_sent_to_departing_peer() {
    init_tracing();

    let room = create_test_room();
    let mut alice = TestPeer::new("alice");
    let mut bob = TestPeer::new("bob");
    room.register(alice.handle.clone()).await.unwrap();
    room.register(bob.handle.clone()).await.unwrap();

    room.deregister(alice.peer_id()).await.unwrap();

    assert!(alice.drain().is_empty());
    assert_eq!(bob.drain(), vec![Envelope::leave("alice")]);
}
