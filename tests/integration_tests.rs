mod test_helpers;

use emotisound_signaling::protocol::{ClientMessage, PeerId, ServerMessage};
use test_helpers::{connect_peer, create_test_relay, drain};

fn peer_joined_ids(messages: &[std::sync::Arc<ServerMessage>]) -> Vec<PeerId> {
    messages
        .iter()
        .filter_map(|msg| match **msg {
            ServerMessage::PeerJoined { peer_id } => Some(peer_id),
            _ => None,
        })
        .collect()
}

/// Two peers joining the same room each learn of the other exactly once
#[tokio::test]
async fn test_pairwise_join_notifications() {
    let relay = create_test_relay();

    let (alice, mut rx_alice) = connect_peer(&relay);
    let (bob, mut rx_bob) = connect_peer(&relay);

    relay.handle_join_room(&alice, "lobby".to_string()).await;
    assert!(
        drain(&mut rx_alice).is_empty(),
        "first peer gets no notifications for an empty room"
    );

    relay.handle_join_room(&bob, "lobby".to_string()).await;

    let alice_msgs = drain(&mut rx_alice);
    assert_eq!(peer_joined_ids(&alice_msgs), vec![bob]);
    assert_eq!(alice_msgs.len(), 1, "exactly one peer-joined, no duplicates");

    let bob_msgs = drain(&mut rx_bob);
    assert_eq!(peer_joined_ids(&bob_msgs), vec![alice]);
    assert_eq!(bob_msgs.len(), 1);
}

/// Scenario from the call flow: X, Y, Z join "lobby" in order. X sees Y then
/// Z in join order; Y sees X on its own join, then Z; Z sees X and Y as part
/// of its own join.
#[tokio::test]
async fn test_three_peer_join_ordering() {
    let relay = create_test_relay();

    let (x, mut rx_x) = connect_peer(&relay);
    let (y, mut rx_y) = connect_peer(&relay);
    let (z, mut rx_z) = connect_peer(&relay);

    relay.handle_join_room(&x, "lobby".to_string()).await;
    relay.handle_join_room(&y, "lobby".to_string()).await;
    relay.handle_join_room(&z, "lobby".to_string()).await;

    assert_eq!(peer_joined_ids(&drain(&mut rx_x)), vec![y, z]);

    assert_eq!(peer_joined_ids(&drain(&mut rx_y)), vec![x, z]);

    // Z's snapshot covers both existing members; their relative order within
    // one join is unspecified.
    let mut z_saw = peer_joined_ids(&drain(&mut rx_z));
    z_saw.sort();
    let mut expected = vec![x, y];
    expected.sort();
    assert_eq!(z_saw, expected);
}

/// An opaque offer payload passes through unchanged, tagged with the sender
#[tokio::test]
async fn test_signal_round_trip_verbatim() {
    let relay = create_test_relay();

    let (caller, _rx_caller) = connect_peer(&relay);
    let (callee, mut rx_callee) = connect_peer(&relay);

    relay.handle_join_room(&caller, "lobby".to_string()).await;
    relay.handle_join_room(&callee, "lobby".to_string()).await;
    drain(&mut rx_callee);

    let offer = serde_json::json!({
        "type": "offer",
        "sdp": "v=0\r\no=- 46117317 2 IN IP4 127.0.0.1\r\n..."
    });
    relay
        .handle_client_message(
            &caller,
            ClientMessage::Signal {
                to: callee,
                signal: offer.clone(),
            },
        )
        .await;

    let callee_msgs = drain(&mut rx_callee);
    assert_eq!(callee_msgs.len(), 1);
    match &*callee_msgs[0] {
        ServerMessage::Signal { from, signal } => {
            assert_eq!(*from, caller);
            assert_eq!(*signal, offer);
        }
        other => panic!("Expected relayed signal, got {other:?}"),
    }
}

/// A disconnect without an explicit leave still notifies the room
#[tokio::test]
async fn test_disconnect_without_leave() {
    let relay = create_test_relay();

    let (stayer, mut rx_stayer) = connect_peer(&relay);
    let (vanisher, _rx_vanisher) = connect_peer(&relay);

    relay.handle_join_room(&stayer, "lobby".to_string()).await;
    relay.handle_join_room(&vanisher, "lobby".to_string()).await;
    drain(&mut rx_stayer);

    relay.unregister_peer(&vanisher).await;

    let msgs = drain(&mut rx_stayer);
    assert_eq!(msgs.len(), 1);
    assert!(matches!(*msgs[0], ServerMessage::PeerLeft { peer_id } if peer_id == vanisher));

    let members = relay.room_members("lobby").await.unwrap();
    assert!(!members.contains(&vanisher));
    assert_eq!(members, vec![stayer]);
}

/// A room disappears with its last member and comes back fresh
#[tokio::test]
async fn test_room_lifecycle_is_fresh_after_empty() {
    let relay = create_test_relay();

    let (first, _rx_first) = connect_peer(&relay);
    relay.handle_join_room(&first, "revolving".to_string()).await;
    relay.leave_room(&first).await;

    assert_eq!(relay.room_members("revolving").await, None);

    let (second, mut rx_second) = connect_peer(&relay);
    relay.handle_join_room(&second, "revolving".to_string()).await;

    assert!(
        drain(&mut rx_second).is_empty(),
        "recreated room carries no stale members"
    );
    assert_eq!(relay.room_members("revolving").await, Some(vec![second]));
}

/// A signal targeting a departed peer vanishes without an error to the sender
#[tokio::test]
async fn test_signal_to_departed_peer_is_dropped() {
    let relay = create_test_relay();

    let (caller, mut rx_caller) = connect_peer(&relay);
    let (callee, _rx_callee) = connect_peer(&relay);

    relay.handle_join_room(&caller, "lobby".to_string()).await;
    relay.handle_join_room(&callee, "lobby".to_string()).await;
    relay.unregister_peer(&callee).await;
    drain(&mut rx_caller);

    relay
        .handle_client_message(
            &caller,
            ClientMessage::Signal {
                to: callee,
                signal: serde_json::json!({"type": "offer"}),
            },
        )
        .await;

    assert!(
        drain(&mut rx_caller).is_empty(),
        "sender is not informed of the failed delivery"
    );
}

/// After leaving, the connection stays open and can join again
#[tokio::test]
async fn test_leave_returns_peer_to_roomless_state() {
    let relay = create_test_relay();

    let (peer, _rx) = connect_peer(&relay);
    relay.handle_join_room(&peer, "first".to_string()).await;
    relay
        .handle_client_message(&peer, ClientMessage::LeaveRoom)
        .await;

    assert_eq!(relay.peer_room(&peer), None);

    relay.handle_join_room(&peer, "second".to_string()).await;
    assert_eq!(relay.peer_room(&peer), Some("second".to_string()));
}

/// Joining a new room while in another implicitly leaves the old one
#[tokio::test]
async fn test_rejoin_implicitly_leaves_previous_room() {
    let relay = create_test_relay();

    let (mover, _rx_mover) = connect_peer(&relay);
    let (old_mate, mut rx_old) = connect_peer(&relay);
    let (new_mate, mut rx_new) = connect_peer(&relay);

    relay.handle_join_room(&mover, "old".to_string()).await;
    relay.handle_join_room(&old_mate, "old".to_string()).await;
    relay.handle_join_room(&new_mate, "new".to_string()).await;
    drain(&mut rx_old);

    relay.handle_join_room(&mover, "new".to_string()).await;

    let old_msgs = drain(&mut rx_old);
    assert_eq!(old_msgs.len(), 1);
    assert!(matches!(*old_msgs[0], ServerMessage::PeerLeft { peer_id } if peer_id == mover));

    let new_msgs = drain(&mut rx_new);
    assert_eq!(peer_joined_ids(&new_msgs), vec![mover]);

    assert_eq!(relay.room_members("old").await, Some(vec![old_mate]));
}

/// Malformed joins (empty room id) are dropped without touching state
#[tokio::test]
async fn test_empty_room_id_is_ignored() {
    let relay = create_test_relay();

    let (peer, mut rx) = connect_peer(&relay);
    relay.handle_join_room(&peer, String::new()).await;

    assert!(drain(&mut rx).is_empty());
    assert_eq!(relay.peer_room(&peer), None);
    assert_eq!(relay.metrics_snapshot().await.open_rooms, 0);
}

/// Metrics counters track joins, signals, and departures
#[tokio::test]
async fn test_metrics_reflect_relay_activity() {
    let relay = create_test_relay();

    let (a, _rx_a) = connect_peer(&relay);
    let (b, mut rx_b) = connect_peer(&relay);

    relay.handle_join_room(&a, "lobby".to_string()).await;
    relay.handle_join_room(&b, "lobby".to_string()).await;
    relay
        .handle_client_message(
            &a,
            ClientMessage::Signal {
                to: b,
                signal: serde_json::json!({"type": "offer"}),
            },
        )
        .await;
    drain(&mut rx_b);
    relay.unregister_peer(&b).await;

    let snapshot = relay.metrics_snapshot().await;
    assert_eq!(snapshot.active_connections, 1);
    assert_eq!(snapshot.total_connections, 2);
    assert_eq!(snapshot.open_rooms, 1);
    assert_eq!(snapshot.peers_joined, 2);
    assert_eq!(snapshot.peers_left, 1);
    assert_eq!(snapshot.signals_relayed, 1);
}
