use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use payment_cell::models::PaymentError;
use provider_cell::models::ProviderError;

/// Wizard position. `Confirmed` is terminal; a draft never reaches it in
/// storage because confirmation destroys the draft.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    SelectDateTime,
    SessionDetails,
    PersonalInfo,
    Payment,
    Confirmed,
}

impl BookingStep {
    pub fn number(&self) -> u8 {
        match self {
            BookingStep::SelectDateTime => 1,
            BookingStep::SessionDetails => 2,
            BookingStep::PersonalInfo => 3,
            BookingStep::Payment => 4,
            BookingStep::Confirmed => 5,
        }
    }

    pub fn next(&self) -> BookingStep {
        match self {
            BookingStep::SelectDateTime => BookingStep::SessionDetails,
            BookingStep::SessionDetails => BookingStep::PersonalInfo,
            BookingStep::PersonalInfo => BookingStep::Payment,
            BookingStep::Payment | BookingStep::Confirmed => BookingStep::Confirmed,
        }
    }

    pub fn previous(&self) -> BookingStep {
        match self {
            BookingStep::SelectDateTime | BookingStep::SessionDetails => {
                BookingStep::SelectDateTime
            }
            BookingStep::PersonalInfo => BookingStep::SessionDetails,
            BookingStep::Payment => BookingStep::PersonalInfo,
            BookingStep::Confirmed => BookingStep::Payment,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    Initial,
    FollowUp,
    Emergency,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub emergency_contact: String,
    #[serde(default)]
    pub insurance: String,
}

impl PersonalInfo {
    /// Presence-only check; formats are deliberately not validated.
    pub fn is_complete(&self) -> bool {
        !self.first_name.trim().is_empty()
            && !self.last_name.trim().is_empty()
            && !self.email.trim().is_empty()
            && !self.phone.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentState {
    None,
    Pending,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingDraft {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub selected_date: Option<NaiveDate>,
    pub selected_time: Option<String>,
    pub session_type: Option<SessionType>,
    pub reason: String,
    pub personal: PersonalInfo,
    pub step: BookingStep,
    pub payment_state: PaymentState,
    pub payment_intent_id: Option<String>,
    #[serde(skip)]
    pub payment_in_flight: bool,
}

impl BookingDraft {
    pub fn new(provider_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            provider_id,
            selected_date: None,
            selected_time: None,
            session_type: None,
            reason: String::new(),
            personal: PersonalInfo::default(),
            step: BookingStep::SelectDateTime,
            payment_state: PaymentState::None,
            payment_intent_id: None,
            payment_in_flight: false,
        }
    }
}

/// Partial update applied to a draft before advancing. Absent fields are left
/// untouched.
#[derive(Debug, Default, Deserialize)]
pub struct DraftUpdate {
    pub selected_date: Option<NaiveDate>,
    pub selected_time: Option<String>,
    pub session_type: Option<SessionType>,
    pub reason: Option<String>,
    pub personal: Option<PersonalInfo>,
}

/// Result of an `advance` call. A failed guard comes back as
/// `advanced: false` with the step unchanged, never as an error.
#[derive(Debug, Clone, Serialize)]
pub struct AdvanceOutcome {
    pub advanced: bool,
    pub step: BookingStep,
    pub payment_state: PaymentState,
    pub message: Option<String>,
    pub confirmation: Option<BookingConfirmation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingConfirmation {
    pub booking_id: String,
    pub provider_id: Uuid,
    pub provider_name: String,
    pub date: NaiveDate,
    pub time: String,
    pub session_type: SessionType,
    pub amount_cents: i64,
}

/// Outcome of the one-shot booking flow.
#[derive(Debug, Clone, Serialize)]
pub struct BookingResult {
    pub confirmed: bool,
    pub booking_id: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Booking draft not found")]
    DraftNotFound,
    #[error("A payment is already being processed for this draft")]
    PaymentInFlight,
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Payment(#[from] PaymentError),
}
