use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{
    CrisisAdvisory, ScreeningError, ScreeningQuestion, ScreeningResponse, ScreeningResult,
    ScreeningSession,
};

/// The fixed, ordered question set. Construction is data-driven so a
/// different questionnaire can be swapped in without touching the engine.
#[derive(Debug, Clone)]
pub struct Questionnaire {
    questions: Vec<ScreeningQuestion>,
}

impl Questionnaire {
    pub fn new(questions: Vec<ScreeningQuestion>) -> Self {
        Self { questions }
    }

    /// The standard intake questionnaire: mood, anxiety, sleep, self-harm.
    pub fn standard() -> Self {
        let q = |id: &str, question: &str, options: &[&str], crisis: &[&str]| ScreeningQuestion {
            id: id.to_string(),
            question: question.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            crisis_triggers: crisis.iter().map(|o| o.to_string()).collect(),
        };

        Self::new(vec![
            q(
                "mood",
                "Over the past 2 weeks, how often have you felt down, depressed, or hopeless?",
                &["Not at all", "Several days", "More than half the days", "Nearly every day"],
                &["More than half the days", "Nearly every day"],
            ),
            q(
                "anxiety",
                "How often do you feel nervous, anxious, or on edge?",
                &["Not at all", "Several days", "More than half the days", "Nearly every day"],
                &["More than half the days", "Nearly every day"],
            ),
            q(
                "sleep",
                "How would you rate your sleep quality over the past month?",
                &["Excellent", "Good", "Fair", "Poor", "Very poor"],
                &["Poor", "Very poor"],
            ),
            q(
                "selfharm",
                "Have you had thoughts of hurting yourself or that you would be better off dead?",
                &["Never", "Rarely", "Sometimes", "Often"],
                &["Sometimes", "Often"],
            ),
        ])
    }

    pub fn questions(&self) -> &[ScreeningQuestion] {
        &self.questions
    }

    pub fn get(&self, question_id: &str) -> Option<&ScreeningQuestion> {
        self.questions.iter().find(|q| q.id == question_id)
    }
}

pub struct ScreeningService {
    questionnaire: Questionnaire,
    sessions: Mutex<HashMap<Uuid, ScreeningSession>>,
}

impl ScreeningService {
    pub fn new(questionnaire: Questionnaire) -> Self {
        Self {
            questionnaire,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    pub fn start_session(&self) -> ScreeningSession {
        let session = ScreeningSession {
            id: Uuid::new_v4(),
            responses: HashMap::new(),
            crisis_flag: false,
            submitted: false,
            started_at: Utc::now(),
        };
        self.sessions
            .lock()
            .expect("session map lock poisoned")
            .insert(session.id, session.clone());
        debug!("Started screening session {}", session.id);
        session
    }

    pub fn get_session(&self, session_id: Uuid) -> Result<ScreeningSession, ScreeningError> {
        self.sessions
            .lock()
            .expect("session map lock poisoned")
            .get(&session_id)
            .cloned()
            .ok_or(ScreeningError::SessionNotFound)
    }

    /// Record one answer. Rejects answers outside the question's option list.
    /// A crisis-trigger answer latches the session's crisis flag; later
    /// non-crisis answers never clear it.
    pub fn record_answer(
        &self,
        session_id: Uuid,
        question_id: &str,
        answer: &str,
    ) -> Result<ScreeningResult, ScreeningError> {
        let question = self
            .questionnaire
            .get(question_id)
            .ok_or_else(|| ScreeningError::UnknownQuestion(question_id.to_string()))?;

        if !question.options.iter().any(|o| o == answer) {
            warn!(
                "Rejected answer {:?} for screening question {}",
                answer, question_id
            );
            return Err(ScreeningError::InvalidAnswer {
                question_id: question_id.to_string(),
                answer: answer.to_string(),
            });
        }

        let is_crisis = question.crisis_triggers.iter().any(|t| t == answer);

        let mut sessions = self.sessions.lock().expect("session map lock poisoned");
        let session = sessions
            .get_mut(&session_id)
            .ok_or(ScreeningError::SessionNotFound)?;
        if session.submitted {
            return Err(ScreeningError::AlreadySubmitted);
        }

        session.responses.insert(
            question_id.to_string(),
            ScreeningResponse {
                question_id: question_id.to_string(),
                answer: answer.to_string(),
                is_crisis_indicator: is_crisis,
                recorded_at: Utc::now(),
            },
        );

        if is_crisis && !session.crisis_flag {
            info!(
                "Crisis indicator recorded in screening session {} (question {})",
                session_id, question_id
            );
            session.crisis_flag = true;
        }

        Ok(result_for(session, &self.questionnaire))
    }

    pub fn is_complete(&self, session_id: Uuid) -> Result<bool, ScreeningError> {
        let session = self.get_session(session_id)?;
        Ok(complete(&session, &self.questionnaire))
    }

    /// Finalize the session. Immutable afterwards; returns the completeness
    /// and crisis outcome the caller surfaces to the user.
    pub fn submit(&self, session_id: Uuid) -> Result<ScreeningResult, ScreeningError> {
        let mut sessions = self.sessions.lock().expect("session map lock poisoned");
        let session = sessions
            .get_mut(&session_id)
            .ok_or(ScreeningError::SessionNotFound)?;
        if session.submitted {
            return Err(ScreeningError::AlreadySubmitted);
        }
        session.submitted = true;
        info!(
            "Screening session {} submitted (complete: {}, crisis: {})",
            session_id,
            complete(session, &self.questionnaire),
            session.crisis_flag
        );
        Ok(result_for(session, &self.questionnaire))
    }

    /// One-shot submission: record a full answer map into a fresh session and
    /// finalize it in one call.
    pub fn submit_screening(
        &self,
        answers: &HashMap<String, String>,
    ) -> Result<ScreeningResult, ScreeningError> {
        let session = self.start_session();
        for (question_id, answer) in answers {
            self.record_answer(session.id, question_id, answer)?;
        }
        self.submit(session.id)
    }
}

fn complete(session: &ScreeningSession, questionnaire: &Questionnaire) -> bool {
    questionnaire
        .questions()
        .iter()
        .all(|q| session.responses.contains_key(&q.id))
}

fn result_for(session: &ScreeningSession, questionnaire: &Questionnaire) -> ScreeningResult {
    ScreeningResult {
        session_id: session.id,
        complete: complete(session, questionnaire),
        crisis_flag: session.crisis_flag,
        crisis_advisory: session.crisis_flag.then(CrisisAdvisory::standard),
    }
}
