mod common;

use axum::http::StatusCode;
use common::{flashcards_json, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_browse_five_cards() {
    let app = TestApp::new();
    let id = app.create_session().await;
    app.generator.reply(&format!("Sure!\n```json\n{}\n```", flashcards_json(5)));

    let (status, view) = app
        .post_json(
            &format!("/api/sessions/{}/flashcards", id),
            json!({ "text": "Cell biology", "num_cards": 5 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["status"], "browsing");
    assert_eq!(view["card"]["number"], 1);
    assert_eq!(view["card"]["text"], "Term 0");

    let (status, _) = app.post(&format!("/api/sessions/{}/flashcards/previous", id)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    for _ in 0..4 {
        let (status, _) = app.post(&format!("/api/sessions/{}/flashcards/next", id)).await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, _) = app.post(&format!("/api/sessions/{}/flashcards/next", id)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, view) = app.get(&format!("/api/sessions/{}/flashcards", id)).await;
    assert_eq!(view["card"]["number"], 5);
    assert_eq!(view["card"]["has_next"], false);
}

#[tokio::test]
async fn test_flip_then_move_shows_front() {
    let app = TestApp::new();
    let id = app.create_session().await;
    app.generator.reply(&flashcards_json(6));
    app.post_json(&format!("/api/sessions/{}/flashcards", id), json!({ "text": "cells", "num_cards": 6 }))
        .await;

    let (_, view) = app.post(&format!("/api/sessions/{}/flashcards/flip", id)).await;
    assert_eq!(view["card"]["show_back"], true);
    assert_eq!(view["card"]["text"], "Definition 0");

    let (_, view) = app.post(&format!("/api/sessions/{}/flashcards/next", id)).await;
    assert_eq!(view["card"]["show_back"], false);
    assert_eq!(view["card"]["text"], "Term 1");
}

#[tokio::test]
async fn test_reset_clears_deck() {
    let app = TestApp::new();
    let id = app.create_session().await;
    app.generator.reply(&flashcards_json(5));
    app.post_json(&format!("/api/sessions/{}/flashcards", id), json!({ "text": "cells", "num_cards": 5 }))
        .await;

    let (status, view) = app.post(&format!("/api/sessions/{}/flashcards/reset", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["status"], "idle");

    let (status, _) = app.post(&format!("/api/sessions/{}/flashcards/flip", id)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_malformed_cards_are_discarded() {
    let app = TestApp::new();
    let id = app.create_session().await;
    app.generator.reply(r#"[{"front": "Only a front"}]"#);

    let (status, _) = app
        .post_json(&format!("/api/sessions/{}/flashcards", id), json!({ "text": "cells" }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, view) = app.get(&format!("/api/sessions/{}/flashcards", id)).await;
    assert_eq!(view["status"], "idle");
}

#[tokio::test]
async fn test_default_card_count_is_pinned_in_prompt() {
    let app = TestApp::new();
    let id = app.create_session().await;
    app.generator.reply(&flashcards_json(10));
    app.post_json(&format!("/api/sessions/{}/flashcards", id), json!({ "text": "cells" }))
        .await;

    let prompts = app.generator.prompts.lock().unwrap().clone();
    assert!(prompts[0].contains("exactly 10 flashcards"));
}

#[tokio::test]
async fn test_sessions_do_not_share_decks() {
    let app = TestApp::new();
    let first = app.create_session().await;
    let second = app.create_session().await;
    app.generator.reply(&flashcards_json(5));
    app.post_json(&format!("/api/sessions/{}/flashcards", first), json!({ "text": "cells", "num_cards": 5 }))
        .await;

    let (_, view) = app.get(&format!("/api/sessions/{}/flashcards", second)).await;
    assert_eq!(view["status"], "idle");
}
