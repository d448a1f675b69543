use std::sync::Arc;

use chat_cell::models::{ReplyCategory, Sender};
use chat_cell::services::classifier::{classify, reply_pool, respond, FirstPicker};
use chat_cell::services::session::ChatSessionService;
use shared_config::AppConfig;

fn session() -> ChatSessionService {
    let config = AppConfig::for_tests("unused");
    ChatSessionService::with_picker(&config, Arc::new(FirstPicker))
}

#[test]
fn classifies_each_keyword_family() {
    assert_eq!(classify("Hello there"), ReplyCategory::Greeting);
    assert_eq!(classify("Can I schedule a session?"), ReplyCategory::Appointment);
    assert_eq!(classify("this is URGENT"), ReplyCategory::Emergency);
    assert_eq!(classify("what therapy do you offer"), ReplyCategory::Services);
    assert_eq!(classify("the weather is nice"), ReplyCategory::Default);
}

#[test]
fn appointment_wins_over_emergency_when_both_match() {
    // Precedence is fixed. "book" is checked before "emergency".
    assert_eq!(
        classify("I want to book an emergency appointment"),
        ReplyCategory::Appointment
    );
}

#[test]
fn greeting_wins_over_everything_else() {
    assert_eq!(
        classify("hi, I need urgent therapy"),
        ReplyCategory::Greeting
    );
}

#[test]
fn matching_is_case_insensitive_substring() {
    assert_eq!(classify("HELP ME please"), ReplyCategory::Emergency);
    // "hi" inside another word still matches; substring search is deliberate.
    assert_eq!(classify("this is my third try"), ReplyCategory::Greeting);
}

#[test]
fn respond_draws_from_the_category_pool() {
    let reply = respond(ReplyCategory::Emergency, &FirstPicker);
    assert_eq!(reply, reply_pool(ReplyCategory::Emergency)[0]);
    assert!(reply.contains("+1 (555) 000-0000"));
}

#[tokio::test]
async fn transcript_starts_with_the_greeting() {
    let chat = session();
    let transcript = chat.transcript();
    assert_eq!(transcript.messages.len(), 1);
    assert_eq!(transcript.messages[0].sender, Sender::Assistant);
    assert!(transcript.messages[0].text.contains("WEvolve assistant"));
    assert!(!transcript.is_thinking);
}

#[tokio::test]
async fn send_message_appends_user_and_assistant_turns_in_order() {
    let chat = session();

    let reply = chat.send_message("Can I book an appointment?").await;
    let reply = reply.expect("reply should land on an uncleared transcript");
    assert_eq!(reply.sender, Sender::Assistant);
    assert_eq!(reply.text, reply_pool(ReplyCategory::Appointment)[0]);

    let transcript = chat.transcript();
    assert_eq!(transcript.messages.len(), 3);
    assert_eq!(transcript.messages[1].sender, Sender::User);
    assert_eq!(transcript.messages[1].text, "Can I book an appointment?");
    assert_eq!(transcript.messages[2].id, reply.id);
    assert!(!transcript.is_thinking);
}

#[tokio::test]
async fn clear_resets_to_a_fresh_greeting() {
    let chat = session();
    chat.send_message("hello").await;
    assert_eq!(chat.transcript().messages.len(), 3);

    chat.clear();

    let transcript = chat.transcript();
    assert_eq!(transcript.messages.len(), 1);
    assert_eq!(transcript.messages[0].sender, Sender::Assistant);
    assert!(!transcript.is_thinking);
}

#[tokio::test(start_paused = true)]
async fn clear_cancels_a_pending_reply() {
    let mut config = AppConfig::for_tests("unused");
    config.bot_delay_min_ms = 500;
    config.bot_delay_max_ms = 500;
    let chat = Arc::new(ChatSessionService::with_picker(
        &config,
        Arc::new(FirstPicker),
    ));

    let pending = tokio::spawn({
        let chat = chat.clone();
        async move { chat.send_message("hello").await }
    });

    // Let the user turn land and the thinking delay start.
    tokio::task::yield_now().await;
    assert!(chat.transcript().is_thinking);

    chat.clear();
    tokio::time::advance(std::time::Duration::from_millis(600)).await;

    let reply = pending.await.unwrap();
    assert!(reply.is_none(), "stale reply must be dropped");

    let transcript = chat.transcript();
    assert_eq!(transcript.messages.len(), 1, "only the fresh greeting remains");
    assert!(!transcript.is_thinking);
}
