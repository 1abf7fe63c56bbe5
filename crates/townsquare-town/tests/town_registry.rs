//! Integration tests for the registry using a mock video client.

use std::sync::Arc;

use tokio::sync::mpsc;
use townsquare_game::{Board, GameError, GameStart};
use townsquare_session::{Player, VideoClient, VideoError};
use townsquare_town::{
    GameResult, MoveOutcome, RegistryError, TownEvent, TownRegistry, TOWN_CAPACITY,
};
use townsquare_types::{PlayerId, TownId};

// =========================================================================
// Mock collaborator
// =========================================================================

struct StaticVideoClient;

impl VideoClient for StaticVideoClient {
    async fn get_token_for_town(
        &self,
        _town_id: &TownId,
        player_id: &PlayerId,
    ) -> Result<String, VideoError> {
        Ok(format!("video-{player_id}"))
    }
}

fn registry() -> TownRegistry<StaticVideoClient> {
    TownRegistry::new(Arc::new(StaticVideoClient))
}

/// Creates a town and returns its id and update secret.
async fn create(
    registry: &TownRegistry<StaticVideoClient>,
    name: &str,
    public: bool,
) -> (TownId, String) {
    let handle = registry.create_town(name, public).await;
    let town = handle.lock().await;
    (town.town_id().clone(), town.update_secret().to_string())
}

/// Admits two players and activates a game; returns their ids
/// (the first holds the opening turn).
async fn start_two_player_game(
    registry: &TownRegistry<StaticVideoClient>,
    town_id: &TownId,
) -> (PlayerId, PlayerId) {
    let alice = Player::new("alice");
    let bob = Player::new("bob");
    let handle = registry.get(town_id).await.unwrap();
    {
        let mut town = handle.lock().await;
        town.add_player(alice.clone()).await.unwrap();
        town.add_player(bob.clone()).await.unwrap();
    }
    registry.start_game(town_id, &alice.id).await.unwrap();
    registry.start_game(town_id, &bob.id).await.unwrap();
    (alice.id, bob.id)
}

// =========================================================================
// create / get / list
// =========================================================================

#[tokio::test]
async fn test_create_town_registers_with_unique_ids() {
    let registry = registry();

    let (id1, _) = create(&registry, "first", true).await;
    let (id2, _) = create(&registry, "second", true).await;

    assert_ne!(id1, id2);
    assert_eq!(registry.town_count().await, 2);
    assert!(registry.get(&id1).await.is_some());
    assert!(registry.get(&id2).await.is_some());
}

#[tokio::test]
async fn test_get_unknown_town_returns_none() {
    let registry = registry();
    assert!(registry.get(&TownId::from("MISSING0")).await.is_none());
}

#[tokio::test]
async fn test_list_towns_returns_public_towns_only() {
    let registry = registry();
    let (public_id, _) = create(&registry, "public town", true).await;
    let (_unlisted, _) = create(&registry, "hidden town", false).await;

    let listed = registry.list_towns().await;

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].town_id, public_id);
    assert_eq!(listed[0].friendly_name, "public town");
    assert_eq!(listed[0].maximum_occupancy, TOWN_CAPACITY);
}

#[tokio::test]
async fn test_list_towns_occupancy_counts_listeners() {
    let registry = registry();
    let (town_id, _) = create(&registry, "busy town", true).await;

    let handle = registry.get(&town_id).await.unwrap();
    let (tx1, _rx1) = mpsc::unbounded_channel();
    let (tx2, _rx2) = mpsc::unbounded_channel();
    {
        let mut town = handle.lock().await;
        town.add_town_listener(tx1);
        town.add_town_listener(tx2);
    }

    let listed = registry.list_towns().await;
    assert_eq!(listed[0].current_occupancy, 2);
}

// =========================================================================
// update_town
// =========================================================================

#[tokio::test]
async fn test_update_town_wrong_secret_changes_nothing() {
    let registry = registry();
    let (town_id, _) = create(&registry, "old name", true).await;

    let ok = registry
        .update_town(&town_id, "wrong-secret", Some("new name"), Some(false))
        .await;

    assert!(!ok);
    let handle = registry.get(&town_id).await.unwrap();
    let town = handle.lock().await;
    assert_eq!(town.friendly_name(), "old name");
    assert!(town.publicly_listed());
}

#[tokio::test]
async fn test_update_town_unknown_id_returns_false() {
    let registry = registry();
    let ok = registry
        .update_town(&TownId::from("MISSING0"), "secret", Some("name"), None)
        .await;
    assert!(!ok);
}

#[tokio::test]
async fn test_update_town_applies_all_supplied_fields() {
    let registry = registry();
    let (town_id, secret) = create(&registry, "old name", true).await;

    let ok = registry
        .update_town(&town_id, &secret, Some("new name"), Some(false))
        .await;

    assert!(ok);
    let handle = registry.get(&town_id).await.unwrap();
    let town = handle.lock().await;
    assert_eq!(town.friendly_name(), "new name");
    assert!(!town.publicly_listed());
}

#[tokio::test]
async fn test_update_town_partial_update_leaves_omitted_fields() {
    let registry = registry();
    let (town_id, secret) = create(&registry, "old name", true).await;

    // Only flip visibility; the name stays.
    assert!(
        registry
            .update_town(&town_id, &secret, None, Some(false))
            .await
    );

    let handle = registry.get(&town_id).await.unwrap();
    let town = handle.lock().await;
    assert_eq!(town.friendly_name(), "old name");
    assert!(!town.publicly_listed());
}

#[tokio::test]
async fn test_update_town_empty_name_returns_false() {
    let registry = registry();
    let (town_id, secret) = create(&registry, "old name", true).await;

    let ok = registry
        .update_town(&town_id, &secret, Some(""), Some(false))
        .await;

    assert!(!ok);
    let handle = registry.get(&town_id).await.unwrap();
    assert_eq!(handle.lock().await.friendly_name(), "old name");
}

#[tokio::test]
async fn test_update_town_accepts_master_secret() {
    let registry =
        TownRegistry::with_master_secret(Arc::new(StaticVideoClient), "master-override");
    let (town_id, _) = create(&registry, "old name", true).await;

    let ok = registry
        .update_town(&town_id, "master-override", Some("renamed"), None)
        .await;

    assert!(ok);
    let handle = registry.get(&town_id).await.unwrap();
    assert_eq!(handle.lock().await.friendly_name(), "renamed");
}

// =========================================================================
// delete_town
// =========================================================================

#[tokio::test]
async fn test_delete_town_wrong_secret_returns_false() {
    let registry = registry();
    let (town_id, _) = create(&registry, "town", true).await;

    assert!(!registry.delete_town(&town_id, "wrong").await);
    assert!(registry.get(&town_id).await.is_some());
}

#[tokio::test]
async fn test_delete_town_removes_and_notifies_listeners() {
    let registry = registry();
    let (town_id, secret) = create(&registry, "doomed town", true).await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    registry
        .get(&town_id)
        .await
        .unwrap()
        .lock()
        .await
        .add_town_listener(tx);

    assert!(registry.delete_town(&town_id, &secret).await);

    assert!(registry.get(&town_id).await.is_none());
    assert_eq!(rx.try_recv().unwrap(), TownEvent::TownDestroyed);
}

#[tokio::test]
async fn test_delete_town_accepts_master_secret() {
    let registry = TownRegistry::with_master_secret(Arc::new(StaticVideoClient), "master");
    let (town_id, _) = create(&registry, "town", true).await;

    assert!(registry.delete_town(&town_id, "master").await);
    assert_eq!(registry.town_count().await, 0);
}

// =========================================================================
// Leaderboard forwards
// =========================================================================

#[tokio::test]
async fn test_leaderboard_forwards_unknown_town_returns_none() {
    let registry = registry();
    let missing = TownId::from("MISSING0");

    assert!(registry.get_leaderboard(&missing).await.is_none());
    assert!(
        registry
            .update_leaderboard(&missing, &PlayerId::from("a"), 1)
            .await
            .is_none()
    );
}

#[tokio::test]
async fn test_update_leaderboard_returns_refreshed_scores() {
    let registry = registry();
    let (town_id, _) = create(&registry, "town", true).await;
    let player = PlayerId::from("scorer");

    let scores = registry
        .update_leaderboard(&town_id, &player, 3)
        .await
        .unwrap();

    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].player_id, player);
    assert_eq!(scores[0].score, 3);
    assert_eq!(
        registry.get_leaderboard(&town_id).await.unwrap(),
        scores
    );
}

// =========================================================================
// Game forwards
// =========================================================================

#[tokio::test]
async fn test_start_game_unknown_town_errors() {
    let registry = registry();
    let result = registry
        .start_game(&TownId::from("MISSING0"), &PlayerId::from("a"))
        .await;
    assert!(matches!(result, Err(RegistryError::TownNotFound(_))));
}

#[tokio::test]
async fn test_start_game_forwards_to_controller() {
    let registry = registry();
    let (town_id, _) = create(&registry, "town", true).await;
    let alice = Player::new("alice");
    registry
        .get(&town_id)
        .await
        .unwrap()
        .lock()
        .await
        .add_player(alice.clone())
        .await
        .unwrap();

    let start = registry.start_game(&town_id, &alice.id).await.unwrap();

    assert_eq!(start, GameStart::Waiting);
    assert!(!registry.is_game_active(&town_id).await);
}

#[tokio::test]
async fn test_game_reads_for_unknown_town_are_absent() {
    let registry = registry();
    let missing = TownId::from("MISSING0");

    assert!(!registry.is_game_active(&missing).await);
    assert!(registry.current_player(&missing).await.is_none());
    assert!(registry.get_winner(&missing).await.is_none());
    assert!(registry.get_board(&missing).await.is_none());
    assert!(!registry.end_game(&missing).await);
}

#[tokio::test]
async fn test_make_move_unknown_town_errors() {
    let registry = registry();
    let result = registry
        .make_move(&TownId::from("MISSING0"), &PlayerId::from("a"), 0, 0)
        .await;
    assert!(matches!(result, Err(RegistryError::TownNotFound(_))));
}

#[tokio::test]
async fn test_make_move_wrong_turn_holder_rejected_without_mutation() {
    let registry = registry();
    let (town_id, _) = create(&registry, "town", true).await;
    let (alice, bob) = start_two_player_game(&registry, &town_id).await;

    // It is alice's turn; bob submits anyway.
    let outcome = registry.make_move(&town_id, &bob, 0, 0).await.unwrap();

    assert_eq!(outcome, MoveOutcome::Rejected(GameError::NotYourTurn(bob)));
    assert_eq!(
        registry.get_board(&town_id).await.unwrap(),
        Board::default(),
        "board untouched"
    );
    assert_eq!(registry.current_player(&town_id).await, Some(alice));
}

#[tokio::test]
async fn test_make_move_before_game_starts_is_rejected() {
    let registry = registry();
    let (town_id, _) = create(&registry, "town", true).await;

    let outcome = registry
        .make_move(&town_id, &PlayerId::from("a"), 0, 0)
        .await
        .unwrap();

    assert!(matches!(outcome, MoveOutcome::Rejected(_)));
}

#[tokio::test]
async fn test_full_game_through_registry() {
    let registry = registry();
    let (town_id, _) = create(&registry, "town", true).await;
    let (alice, bob) = start_two_player_game(&registry, &town_id).await;

    // Watch events from the winning move on.
    let (tx, mut rx) = mpsc::unbounded_channel();
    registry
        .get(&town_id)
        .await
        .unwrap()
        .lock()
        .await
        .add_town_listener(tx);

    // alice takes the top row.
    registry.make_move(&town_id, &alice, 0, 0).await.unwrap();
    registry.make_move(&town_id, &bob, 1, 0).await.unwrap();
    registry.make_move(&town_id, &alice, 0, 1).await.unwrap();
    registry.make_move(&town_id, &bob, 1, 1).await.unwrap();
    let outcome = registry.make_move(&town_id, &alice, 0, 2).await.unwrap();

    assert!(matches!(outcome, MoveOutcome::GameOver { .. }));
    assert!(!registry.is_game_active(&town_id).await);

    // The winner was scored before the engine reset; the winner read
    // after finalization is absent (the engine is back to empty).
    let scores = registry.get_leaderboard(&town_id).await.unwrap();
    let alice_row = scores.iter().find(|e| e.player_id == alice).unwrap();
    assert_eq!(alice_row.score, 1);

    let mut saw_game_end = false;
    while let Ok(event) = rx.try_recv() {
        if let TownEvent::GameEnded(result) = event {
            assert_eq!(result, GameResult::Winner(alice.clone()));
            saw_game_end = true;
        }
    }
    assert!(saw_game_end, "listeners hear the result");
}

#[tokio::test]
async fn test_towns_do_not_interfere() {
    let registry = registry();
    let (town_a, _) = create(&registry, "town a", true).await;
    let (town_b, _) = create(&registry, "town b", true).await;
    let (alice, _bob) = start_two_player_game(&registry, &town_a).await;

    registry.make_move(&town_a, &alice, 1, 1).await.unwrap();

    assert!(registry.is_game_active(&town_a).await);
    assert!(!registry.is_game_active(&town_b).await);
    assert_eq!(
        registry.get_board(&town_b).await.unwrap(),
        Board::default()
    );
}

#[tokio::test]
async fn test_end_game_forwards_and_reports_presence() {
    let registry = registry();
    let (town_id, _) = create(&registry, "town", true).await;
    let (_alice, _bob) = start_two_player_game(&registry, &town_id).await;

    assert!(registry.end_game(&town_id).await);
    assert!(!registry.is_game_active(&town_id).await);
}
