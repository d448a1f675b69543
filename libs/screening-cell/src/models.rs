use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// One questionnaire item: fixed option list plus the subset of answers that
/// count as crisis indicators. Questions are configuration data, swappable as
/// a whole; the engine never special-cases individual ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningQuestion {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub crisis_triggers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningResponse {
    pub question_id: String,
    pub answer: String,
    pub is_crisis_indicator: bool,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScreeningSession {
    pub id: Uuid,
    pub responses: HashMap<String, ScreeningResponse>,
    /// Latches true on the first crisis indicator and never clears.
    pub crisis_flag: bool,
    pub submitted: bool,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScreeningResult {
    pub session_id: Uuid,
    pub complete: bool,
    pub crisis_flag: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crisis_advisory: Option<CrisisAdvisory>,
}

/// Immediate-help messaging surfaced alongside any crisis-flagged session.
/// Persistent and non-dismissible for the session's lifetime.
#[derive(Debug, Clone, Serialize)]
pub struct CrisisAdvisory {
    pub message: String,
    pub helpline: String,
    pub emergency_number: String,
}

impl CrisisAdvisory {
    pub fn standard() -> Self {
        Self {
            message: "If you're experiencing a mental health emergency, please reach out for \
                      immediate support. Trained professionals are available 24/7."
                .to_string(),
            helpline: "988".to_string(),
            emergency_number: "911".to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ScreeningError {
    #[error("Unknown question: {0}")]
    UnknownQuestion(String),

    #[error("Invalid answer {answer:?} for question {question_id}")]
    InvalidAnswer { question_id: String, answer: String },

    #[error("Screening session not found")]
    SessionNotFound,

    #[error("Screening session is already submitted")]
    AlreadySubmitted,
}
