//! Interactive flow tests
//!
//! Drives the booking wizard, chat and offer popup through scripted input
//! with tokio's paused clock, so every deferred reply, offer and redirect
//! fires without real waiting.

use homehelp::cli::output::Output;
use homehelp::cli::prompt::Prompter;
use homehelp::cli::{book, chat, offers};
use homehelp::{AppState, HomeHelpConfig, PlaceholderAuthClient};
use homehelp_core::conversation::CANNED_REPLIES;
use homehelp_core::{MessageKind, Route, Sender, ServiceCategory, SessionContext, Urgency};
use std::sync::Arc;
use tempfile::TempDir;

// ============= Helper Functions =============

fn state(dir: &TempDir) -> AppState {
    let mut config = HomeHelpConfig::default();
    config.storage.token_file = dir.path().join("tokens.json");
    AppState::with_client(config, Arc::new(PlaceholderAuthClient::new())).unwrap()
}

async fn signed_in(dir: &TempDir, context: SessionContext) -> AppState {
    let mut state = state(dir);
    assert!(state.session_mut(context).login("asha@example.com", "pw").await);
    state
}

fn script(lines: &str) -> Prompter<&[u8]> {
    Prompter::new(lines.as_bytes())
}

// ============= Booking =============

#[tokio::test(start_paused = true)]
async fn test_booking_round_trip() {
    let dir = TempDir::new().unwrap();
    let state = signed_in(&dir, SessionContext::Customer).await;
    let mut input = script("1\nPune, Maharashtra\n12 MG Road\nKitchen sink leaks\nhigh\n2030-04-01\n");

    let request = book::run(&state, None, None, &mut input, &Output::no_color())
        .await
        .unwrap()
        .expect("booking confirmed");

    assert_eq!(request.service(), "Plumbing");
    assert_eq!(request.category(), ServiceCategory::Professional);
    assert_eq!(request.location(), "Pune, Maharashtra");
    assert_eq!(request.urgency(), Urgency::High);
    assert_eq!(
        request.preferred_time().map(|d| d.to_string()).as_deref(),
        Some("2030-04-01")
    );
}

#[tokio::test(start_paused = true)]
async fn test_booking_back_and_retry() {
    let dir = TempDir::new().unwrap();
    let state = signed_in(&dir, SessionContext::Customer).await;
    // Switch to casual, pick a service, step back, pick another, fail a
    // blank address, then finish with defaults.
    let mut input = script(
        "c\n2\nback\n3\nDelhi\n\nDelhi\nFlat 4B\nWash both cars\n\n\n",
    );

    let request = book::run(&state, None, None, &mut input, &Output::no_color())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(request.service(), "Car Washing");
    assert_eq!(request.category(), ServiceCategory::Casual);
    assert_eq!(request.address(), "Flat 4B");
    assert_eq!(request.urgency(), Urgency::Medium);
    assert_eq!(request.preferred_time(), None);
}

#[tokio::test(start_paused = true)]
async fn test_booking_prefilled_service_is_kept_on_enter() {
    let dir = TempDir::new().unwrap();
    let state = signed_in(&dir, SessionContext::Customer).await;
    let mut input = script("\nNoida\nTower 2\nWeekly garden trim\nlow\n\n");

    let request = book::run(&state, Some("Gardening"), None, &mut input, &Output::no_color())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(request.service(), "Gardening");
    assert_eq!(request.category(), ServiceCategory::Casual);
}

#[tokio::test(start_paused = true)]
async fn test_booking_cancelled_at_end_of_input() {
    let dir = TempDir::new().unwrap();
    let state = signed_in(&dir, SessionContext::Customer).await;
    let mut input = script("1\nPune\n");

    let request = book::run(&state, None, None, &mut input, &Output::no_color())
        .await
        .unwrap();
    assert!(request.is_none());
}

#[tokio::test]
async fn test_booking_requires_customer_session() {
    let dir = TempDir::new().unwrap();
    let state = signed_in(&dir, SessionContext::Helper).await;
    let mut input = script("1\n");

    let request = book::run(&state, None, None, &mut input, &Output::no_color())
        .await
        .unwrap();
    assert!(request.is_none());
    // The guard returns before reading anything
    assert_eq!(input.next_line().await.unwrap().as_deref(), Some("1"));
}

// ============= Chat =============

#[tokio::test(start_paused = true)]
async fn test_chat_delivers_replies_after_end_of_input() {
    let dir = TempDir::new().unwrap();
    let state = state(&dir);
    let mut input = script("Can you come at 3?\n\nSure?\n");

    let transcript = chat::run(
        &state,
        "req-42",
        SessionContext::Customer,
        &mut input,
        &Output::no_color(),
    )
    .await
    .unwrap();

    // greeting, banner, follow-up, two sent messages and their two replies
    assert_eq!(transcript.len(), 7);
    assert_eq!(transcript[1].kind, MessageKind::System);

    let sent: Vec<_> = transcript
        .iter()
        .filter(|m| m.sender == Sender::Customer)
        .map(|m| m.body.as_str())
        .collect();
    assert_eq!(sent, ["Can you come at 3?", "Sure?"]);
    assert_eq!(
        transcript.iter().filter(|m| m.sender == Sender::Helper).count(),
        4
    );
    let replies = transcript
        .iter()
        .filter(|m| m.sender == Sender::Helper && CANNED_REPLIES.contains(&m.body.as_str()))
        .count();
    assert_eq!(replies, 2);
}

#[tokio::test(start_paused = true)]
async fn test_chat_quit_drops_pending_replies() {
    let dir = TempDir::new().unwrap();
    let state = state(&dir);
    let mut input = script("Hello\n/quit\n");

    let transcript = chat::run(
        &state,
        "new-client",
        SessionContext::Helper,
        &mut input,
        &Output::no_color(),
    )
    .await
    .unwrap();

    // greeting, banner and the message; follow-up and reply never arrive
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[2].sender, Sender::Helper);
    assert_eq!(transcript[2].body, "Hello");
}

// ============= Offers =============

#[tokio::test(start_paused = true)]
async fn test_accepting_offer_opens_chat() {
    let dir = TempDir::new().unwrap();
    let state = signed_in(&dir, SessionContext::Helper).await;
    let mut input = script("a\n");

    let route = offers::run(
        &state,
        ServiceCategory::Professional,
        &mut input,
        &Output::no_color(),
    )
    .await
    .unwrap();

    assert_eq!(route, Some(Route::Chat("new-client".to_string())));
}

#[tokio::test(start_paused = true)]
async fn test_declining_offer_leaves_nothing() {
    let dir = TempDir::new().unwrap();
    let state = signed_in(&dir, SessionContext::Helper).await;
    let mut input = script("maybe\nd\n");

    let route = offers::run(&state, ServiceCategory::Casual, &mut input, &Output::no_color())
        .await
        .unwrap();

    assert_eq!(route, None);
    // Both lines were consumed: the unknown answer re-asked
    assert_eq!(input.next_line().await.unwrap(), None);
}

#[tokio::test]
async fn test_offers_require_helper_session() {
    let dir = TempDir::new().unwrap();
    let state = signed_in(&dir, SessionContext::Customer).await;
    let mut input = script("a\n");

    let route = offers::run(
        &state,
        ServiceCategory::Professional,
        &mut input,
        &Output::no_color(),
    )
    .await
    .unwrap();
    assert_eq!(route, None);
}
