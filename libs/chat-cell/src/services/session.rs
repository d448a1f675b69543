use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;

use crate::models::{ChatMessage, Sender, TranscriptView};
use crate::services::classifier::{classify, respond, RandomPicker, ReplyPicker};

const GREETING_MESSAGE: &str = "Hello! I'm your WEvolve assistant. How can I help you today?";

struct TranscriptState {
    messages: Vec<ChatMessage>,
    is_thinking: bool,
    /// Bumped on every clear; an in-flight reply only lands if the
    /// generation it started under is still current.
    generation: u64,
}

/// One chat widget session: append-only transcript, simulated thinking delay,
/// and a clear operation that cancels any pending reply.
pub struct ChatSessionService {
    delay_min_ms: u64,
    delay_max_ms: u64,
    picker: Arc<dyn ReplyPicker>,
    state: Mutex<TranscriptState>,
}

impl ChatSessionService {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_picker(config, Arc::new(RandomPicker))
    }

    pub fn with_picker(config: &AppConfig, picker: Arc<dyn ReplyPicker>) -> Self {
        Self {
            delay_min_ms: config.bot_delay_min_ms,
            delay_max_ms: config.bot_delay_max_ms,
            picker,
            state: Mutex::new(TranscriptState {
                messages: vec![greeting_message()],
                is_thinking: false,
                generation: 0,
            }),
        }
    }

    pub fn transcript(&self) -> TranscriptView {
        let state = self.state.lock().expect("transcript lock poisoned");
        TranscriptView {
            messages: state.messages.clone(),
            is_thinking: state.is_thinking,
        }
    }

    /// Append the user message, think for a bounded simulated delay, then
    /// append and return the assistant reply. Returns `None` when the
    /// transcript was cleared while the reply was pending; the stale reply is
    /// dropped, never appended late.
    pub async fn send_message(&self, text: &str) -> Option<ChatMessage> {
        let generation = {
            let mut state = self.state.lock().expect("transcript lock poisoned");
            state.messages.push(ChatMessage {
                id: message_id(),
                text: text.to_string(),
                sender: Sender::User,
                timestamp: Utc::now(),
            });
            state.is_thinking = true;
            state.generation
        };

        let reply_text = respond(classify(text), self.picker.as_ref());

        tokio::time::sleep(Duration::from_millis(self.thinking_delay_ms())).await;

        let mut state = self.state.lock().expect("transcript lock poisoned");
        if state.generation != generation {
            debug!("Dropping stale chat reply for a cleared transcript");
            return None;
        }

        let reply = ChatMessage {
            id: message_id(),
            text: reply_text,
            sender: Sender::Assistant,
            timestamp: Utc::now(),
        };
        state.messages.push(reply.clone());
        state.is_thinking = false;
        Some(reply)
    }

    /// Reset the transcript to the fresh greeting and cancel any in-flight
    /// reply.
    pub fn clear(&self) {
        let mut state = self.state.lock().expect("transcript lock poisoned");
        state.generation += 1;
        state.messages = vec![greeting_message()];
        state.is_thinking = false;
        debug!("Chat transcript cleared");
    }

    fn thinking_delay_ms(&self) -> u64 {
        if self.delay_max_ms <= self.delay_min_ms {
            return self.delay_min_ms;
        }
        rand::thread_rng().gen_range(self.delay_min_ms..=self.delay_max_ms)
    }
}

fn greeting_message() -> ChatMessage {
    ChatMessage {
        id: "1".to_string(),
        text: GREETING_MESSAGE.to_string(),
        sender: Sender::Assistant,
        timestamp: Utc::now(),
    }
}

fn message_id() -> String {
    Uuid::new_v4().simple().to_string()[..9].to_string()
}
