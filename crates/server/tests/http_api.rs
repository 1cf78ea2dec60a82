use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use battle_core::{Category, GameConfig, GameId, NameId, PlayerIdentity};
use battle_runtime::{EngineConfig, MemoryStore, Phase1Engine, TournamentStore};
use battle_server::{AppState, PLAYER_HEADER, router};
use serde_json::{Value, json};
use tower::ServiceExt;

const PLAYER: &str = "sam@example.com";

struct TestApp {
    app: Router,
    store: Arc<MemoryStore>,
    game: GameId,
    names: Vec<NameId>,
}

fn test_app(count: usize) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let game = store.add_game("Spring names", Category::Girl).unwrap();
    store
        .set_game_config(GameConfig::new(game.id).with_max_phase1_appearances(3))
        .unwrap();
    let names = (0..count)
        .map(|i| {
            store
                .add_name(format!("Girl {i}"), Category::Girl, None)
                .unwrap()
                .id
        })
        .collect();
    store
        .add_tournament_state(game.id, PlayerIdentity::new(PLAYER).unwrap())
        .unwrap();

    let engine = Phase1Engine::new(store.clone(), EngineConfig::with_seed(3));
    TestApp {
        app: router(AppState::new(engine)),
        store,
        game: game.id,
        names,
    }
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    player: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(player) = player {
        builder = builder.header(PLAYER_HEADER, player);
    }
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let request = builder.body(body).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn get(app: &Router, uri: &str, player: Option<&str>) -> (StatusCode, Value) {
    send(app, Method::GET, uri, player, None).await
}

async fn post(app: &Router, uri: &str, player: Option<&str>, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, player, Some(body)).await
}

fn uri(game: GameId, route: &str) -> String {
    format!("/api/games/{}/phase1/{route}", game.get())
}

#[tokio::test]
async fn healthz_reports_ok() {
    let t = test_app(2);
    let (status, body) = get(&t.app, "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn next_battle_returns_two_distinct_names() {
    let t = test_app(2);
    let (status, body) = get(&t.app, &uri(t.game, "next-battle"), Some(PLAYER)).await;

    assert_eq!(status, StatusCode::OK);
    let mut ids = vec![
        body["battle"]["name1"]["id"].as_u64().unwrap(),
        body["battle"]["name2"]["id"].as_u64().unwrap(),
    ];
    ids.sort_unstable();
    let expected: Vec<u64> = t.names.iter().map(|id| u64::from(id.get())).collect();
    assert_eq!(ids, expected);
    let text = body["battle"]["name1"]["text"].as_str().unwrap();
    assert!(text.starts_with("Girl"));
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn exhausted_pool_is_a_successful_empty_result() {
    let t = test_app(1);
    let (status, body) = get(&t.app, &uri(t.game, "next-battle"), Some(PLAYER)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "battle": null, "message": "No more battles available" })
    );
}

#[tokio::test]
async fn submitted_winner_shows_up_in_progress() {
    let t = test_app(2);
    let (a, b) = (t.names[0].get(), t.names[1].get());

    let payload = json!({ "name1Id": a, "name2Id": b, "winnerId": a, "mutualElimination": false });
    let (status, body) = post(&t.app, &uri(t.game, "battle"), Some(PLAYER), payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Battle submitted successfully");
    let battle = &body["battle"];
    assert_eq!(battle["name1Id"], a);
    assert_eq!(battle["name2Id"], b);
    assert_eq!(battle["winnerId"], a);
    assert_eq!(battle["mutualElimination"], false);
    assert_eq!(battle["battleRound"], 1);
    assert_eq!(battle["phase"], 1);
    assert!(battle["createdAt"].is_string());

    let (status, body) = get(&t.app, &uri(t.game, "progress"), Some(PLAYER)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "progress": {
                "totalBattles": 1,
                "namesWithWins": 1,
                "excludedCount": 0,
                "maxAppearances": 3
            }
        })
    );
}

#[tokio::test]
async fn legacy_doom_flag_excludes_both_names() {
    let t = test_app(3);
    let (a, b) = (t.names[0].get(), t.names[1].get());

    let payload = json!({ "name1Id": a, "name2Id": b, "winnerId": null, "doomSelected": true });
    let (status, body) = post(&t.app, &uri(t.game, "battle"), Some(PLAYER), payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["battle"]["winnerId"], Value::Null);
    assert_eq!(body["battle"]["mutualElimination"], true);

    let (_, body) = get(&t.app, &uri(t.game, "progress"), Some(PLAYER)).await;
    assert_eq!(body["progress"]["excludedCount"], 2);

    // Only one name is left.
    let (_, body) = get(&t.app, &uri(t.game, "next-battle"), Some(PLAYER)).await;
    assert_eq!(body["battle"], Value::Null);
}

#[tokio::test]
async fn identity_and_game_id_are_checked_first() {
    let t = test_app(2);

    let (status, body) = get(&t.app, "/api/games/abc/phase1/progress", Some(PLAYER)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid game ID");

    let (status, body) = get(&t.app, &uri(t.game, "progress"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthorized");

    let stranger = Some("kim@example.com");
    let (status, body) = get(&t.app, &uri(t.game, "next-battle"), stranger).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Player game not found");

    // The body is not looked at before the caller is resolved.
    let unknown_game = uri(GameId(99), "battle");
    let (status, _) = post(&t.app, &unknown_game, Some(PLAYER), json!({ "bogus": true })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_submissions_are_bad_requests_and_write_nothing() {
    let t = test_app(2);
    let (a, b) = (t.names[0].get(), t.names[1].get());
    let battle_uri = uri(t.game, "battle");

    let cases = [
        (
            json!({ "name1Id": a, "name2Id": a, "winnerId": a, "mutualElimination": false }),
            "Name IDs must be different",
        ),
        (
            json!({ "name1Id": a, "name2Id": b, "winnerId": null, "mutualElimination": false }),
            "Must select either winner or DOOM",
        ),
        (
            json!({ "name1Id": a, "name2Id": b, "winnerId": a, "mutualElimination": true }),
            "Cannot have both winner and DOOM selected",
        ),
        (
            json!({ "name1Id": a, "name2Id": b, "winnerId": 999, "mutualElimination": false }),
            "Winner must be one of the battle names",
        ),
    ];

    for (payload, message) in cases {
        let (status, body) = post(&t.app, &battle_uri, Some(PLAYER), payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], message);
    }

    let payload = json!({
        "name1Id": a,
        "name2Id": b,
        "winnerId": a,
        "mutualElimination": false,
        "round": 4
    });
    let (status, body) = post(&t.app, &battle_uri, Some(PLAYER), payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Invalid battle submission"));

    let (_, body) = get(&t.app, &uri(t.game, "progress"), Some(PLAYER)).await;
    assert_eq!(body["progress"]["totalBattles"], 0);
}

#[tokio::test]
async fn later_phases_reject_selection_and_recording() {
    let t = test_app(2);
    let player = PlayerIdentity::new(PLAYER).unwrap();
    let state = t
        .store
        .find_tournament_state(t.game, &player)
        .unwrap()
        .unwrap();
    t.store.set_phase(state.id, 2).unwrap();
    let (a, b) = (t.names[0].get(), t.names[1].get());

    let (status, body) = get(&t.app, &uri(t.game, "next-battle"), Some(PLAYER)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Not in Phase 1");

    let payload = json!({ "name1Id": a, "name2Id": b, "winnerId": b, "mutualElimination": false });
    let (status, body) = post(&t.app, &uri(t.game, "battle"), Some(PLAYER), payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Not in Phase 1");

    let (status, _) = get(&t.app, &uri(t.game, "progress"), Some(PLAYER)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_names_are_not_found() {
    let t = test_app(2);
    let a = t.names[0].get();

    let payload = json!({ "name1Id": a, "name2Id": 77, "winnerId": a, "mutualElimination": false });
    let (status, body) = post(&t.app, &uri(t.game, "battle"), Some(PLAYER), payload).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Name 77 not found");
}
