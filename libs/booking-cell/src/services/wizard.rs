use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use notification_cell::services::notifier::NotificationService;
use payment_cell::models::{PaymentIntentStatus, PaymentMethodDetails};
use payment_cell::services::gateway::PaymentGatewayService;
use provider_cell::services::directory::ProviderDirectory;
use shared_utils::clock::Clock;

use crate::models::{
    AdvanceOutcome, BookingConfirmation, BookingDraft, BookingError, BookingResult, BookingStep,
    DraftUpdate, PaymentState, PersonalInfo, SessionType,
};

/// Step-by-step booking wizard. Each draft walks
/// date/time → session details → personal info → payment, a guard gating
/// every transition. Guards that fail produce a structured non-advance, not
/// an error; only missing drafts and payment plumbing failures are errors.
pub struct BookingWizardService {
    directory: Arc<ProviderDirectory>,
    gateway: Arc<PaymentGatewayService>,
    notifier: Arc<NotificationService>,
    clock: Arc<dyn Clock>,
    drafts: Mutex<HashMap<Uuid, BookingDraft>>,
}

impl BookingWizardService {
    pub fn new(
        directory: Arc<ProviderDirectory>,
        gateway: Arc<PaymentGatewayService>,
        notifier: Arc<NotificationService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            directory,
            gateway,
            notifier,
            clock,
            drafts: Mutex::new(HashMap::new()),
        }
    }

    pub fn start_draft(&self, provider_id: Uuid) -> Result<BookingDraft, BookingError> {
        self.directory.get(provider_id)?;
        let draft = BookingDraft::new(provider_id);
        let mut drafts = self.drafts.lock().expect("draft map lock poisoned");
        drafts.insert(draft.id, draft.clone());
        Ok(draft)
    }

    pub fn get_draft(&self, draft_id: Uuid) -> Result<BookingDraft, BookingError> {
        let drafts = self.drafts.lock().expect("draft map lock poisoned");
        drafts
            .get(&draft_id)
            .cloned()
            .ok_or(BookingError::DraftNotFound)
    }

    pub fn update_draft(
        &self,
        draft_id: Uuid,
        update: DraftUpdate,
    ) -> Result<BookingDraft, BookingError> {
        let mut drafts = self.drafts.lock().expect("draft map lock poisoned");
        let draft = drafts
            .get_mut(&draft_id)
            .ok_or(BookingError::DraftNotFound)?;

        if let Some(date) = update.selected_date {
            draft.selected_date = Some(date);
        }
        if let Some(time) = update.selected_time {
            draft.selected_time = Some(time);
        }
        if let Some(session_type) = update.session_type {
            draft.session_type = Some(session_type);
        }
        if let Some(reason) = update.reason {
            draft.reason = reason;
        }
        if let Some(personal) = update.personal {
            draft.personal = personal;
        }
        Ok(draft.clone())
    }

    /// Apply the current step's guard. Steps 1 to 3 resolve synchronously;
    /// the payment step creates (or reuses) an intent and confirms it through
    /// the simulated gateway, so only that step actually awaits.
    pub async fn advance(
        &self,
        draft_id: Uuid,
        payment_method: Option<PaymentMethodDetails>,
    ) -> Result<AdvanceOutcome, BookingError> {
        let step = {
            let drafts = self.drafts.lock().expect("draft map lock poisoned");
            drafts
                .get(&draft_id)
                .map(|d| d.step)
                .ok_or(BookingError::DraftNotFound)?
        };

        match step {
            BookingStep::SelectDateTime
            | BookingStep::SessionDetails
            | BookingStep::PersonalInfo => self.advance_sync_step(draft_id),
            BookingStep::Payment => self.advance_payment(draft_id, payment_method).await,
            BookingStep::Confirmed => Err(BookingError::DraftNotFound),
        }
    }

    fn advance_sync_step(&self, draft_id: Uuid) -> Result<AdvanceOutcome, BookingError> {
        let mut drafts = self.drafts.lock().expect("draft map lock poisoned");
        let draft = drafts
            .get_mut(&draft_id)
            .ok_or(BookingError::DraftNotFound)?;

        let guard_failure = match draft.step {
            BookingStep::SelectDateTime => self.check_slot_selection(draft)?,
            BookingStep::SessionDetails => {
                if draft.session_type.is_none() {
                    Some("Select a session type to continue".to_string())
                } else if draft.reason.trim().is_empty() {
                    Some("Describe the reason for your visit".to_string())
                } else {
                    None
                }
            }
            BookingStep::PersonalInfo => {
                if draft.personal.is_complete() {
                    None
                } else {
                    Some("First name, last name, email and phone are required".to_string())
                }
            }
            BookingStep::Payment | BookingStep::Confirmed => None,
        };

        match guard_failure {
            Some(message) => Ok(AdvanceOutcome {
                advanced: false,
                step: draft.step,
                payment_state: draft.payment_state,
                message: Some(message),
                confirmation: None,
            }),
            None => {
                draft.step = draft.step.next();
                Ok(AdvanceOutcome {
                    advanced: true,
                    step: draft.step,
                    payment_state: draft.payment_state,
                    message: None,
                    confirmation: None,
                })
            }
        }
    }

    /// Date/time guard: the selected time must be offered by the provider on
    /// the selected date, judged against the injected clock.
    fn check_slot_selection(&self, draft: &BookingDraft) -> Result<Option<String>, BookingError> {
        let (date, time) = match (draft.selected_date, draft.selected_time.as_deref()) {
            (Some(date), Some(time)) => (date, time),
            _ => return Ok(Some("Select a date and time to continue".to_string())),
        };

        let availability =
            self.directory
                .available_slots(draft.provider_id, date, self.clock.today())?;
        if availability.slots.iter().any(|slot| slot == time) {
            Ok(None)
        } else {
            Ok(Some(
                "The selected time is not available on that date".to_string(),
            ))
        }
    }

    async fn advance_payment(
        &self,
        draft_id: Uuid,
        payment_method: Option<PaymentMethodDetails>,
    ) -> Result<AdvanceOutcome, BookingError> {
        let method = match payment_method {
            Some(method) => method,
            None => {
                let drafts = self.drafts.lock().expect("draft map lock poisoned");
                let draft = drafts.get(&draft_id).ok_or(BookingError::DraftNotFound)?;
                return Ok(AdvanceOutcome {
                    advanced: false,
                    step: draft.step,
                    payment_state: draft.payment_state,
                    message: Some("Payment details are required".to_string()),
                    confirmation: None,
                });
            }
        };

        // Create or reuse the intent and raise the in-flight flag under the
        // draft lock so a second advance cannot slip in.
        let intent_id = {
            let mut drafts = self.drafts.lock().expect("draft map lock poisoned");
            let draft = drafts
                .get_mut(&draft_id)
                .ok_or(BookingError::DraftNotFound)?;
            if draft.payment_in_flight {
                return Err(BookingError::PaymentInFlight);
            }

            let intent_id = match &draft.payment_intent_id {
                Some(id) => id.clone(),
                None => {
                    let provider = self.directory.get(draft.provider_id)?;
                    let intent = self.gateway.create_intent(provider.price, "usd")?;
                    draft.payment_intent_id = Some(intent.id.clone());
                    intent.id
                }
            };
            draft.payment_in_flight = true;
            draft.payment_state = PaymentState::Pending;
            intent_id
        };

        let outcome = self.gateway.confirm(&intent_id, &method).await;

        // Scoped so the draft lock is released before the confirmation side
        // effects await; holding it across the await would make the future
        // non-Send.
        let confirmed = {
            let mut drafts = self.drafts.lock().expect("draft map lock poisoned");
            let draft = match drafts.get_mut(&draft_id) {
                Some(draft) => draft,
                None => {
                    // The draft was abandoned while the gateway was confirming.
                    // The payment result has nowhere to land and is dropped.
                    info!("Ignoring payment result for abandoned draft {}", draft_id);
                    return Err(BookingError::DraftNotFound);
                }
            };
            draft.payment_in_flight = false;

            let outcome = match outcome {
                Ok(outcome) => outcome,
                Err(err) => {
                    draft.payment_state = PaymentState::Failed;
                    return Err(err.into());
                }
            };

            if outcome.success {
                draft.payment_state = PaymentState::Succeeded;
                draft.step = BookingStep::Confirmed;
                drafts
                    .remove(&draft_id)
                    .ok_or(BookingError::DraftNotFound)?
            } else {
                draft.payment_state = PaymentState::Failed;
                return Ok(AdvanceOutcome {
                    advanced: false,
                    step: BookingStep::Payment,
                    payment_state: PaymentState::Failed,
                    message: outcome.error,
                    confirmation: None,
                });
            }
        };

        let confirmation = self.build_confirmation(&confirmed)?;
        self.emit_confirmation_side_effects(&confirmation, &confirmed.personal.email)
            .await;
        Ok(AdvanceOutcome {
            advanced: true,
            step: BookingStep::Confirmed,
            payment_state: PaymentState::Succeeded,
            message: None,
            confirmation: Some(confirmation),
        })
    }

    fn build_confirmation(
        &self,
        draft: &BookingDraft,
    ) -> Result<BookingConfirmation, BookingError> {
        let provider = self.directory.get(draft.provider_id)?;
        // The payment guard ran, so the selection fields are present.
        let date = draft.selected_date.ok_or(BookingError::DraftNotFound)?;
        let time = draft
            .selected_time
            .clone()
            .ok_or(BookingError::DraftNotFound)?;
        let session_type = draft.session_type.ok_or(BookingError::DraftNotFound)?;
        Ok(BookingConfirmation {
            booking_id: format!("bk_{}", Uuid::new_v4().simple()),
            provider_id: provider.id,
            provider_name: provider.name.clone(),
            date,
            time,
            session_type,
            amount_cents: provider.price * 100,
        })
    }

    async fn emit_confirmation_side_effects(&self, confirmation: &BookingConfirmation, to: &str) {
        info!(
            booking_id = %confirmation.booking_id,
            provider = %confirmation.provider_name,
            "Booking confirmed"
        );
        self.notifier.appointment_reminder(
            &confirmation.provider_name,
            confirmation.date,
            &confirmation.time,
        );
        self.notifier
            .send_email(
                to,
                "Your WEvolve appointment is confirmed",
                &format!(
                    "Your appointment with {} on {} at {} is confirmed.",
                    confirmation.provider_name, confirmation.date, confirmation.time
                ),
            )
            .await;
    }

    /// Step back one step. A no-op on the first step. Rejected while a payment
    /// is awaiting its result, so a late confirm cannot land on a retreated
    /// draft.
    pub fn retreat(&self, draft_id: Uuid) -> Result<BookingDraft, BookingError> {
        let mut drafts = self.drafts.lock().expect("draft map lock poisoned");
        let draft = drafts
            .get_mut(&draft_id)
            .ok_or(BookingError::DraftNotFound)?;
        if draft.payment_in_flight {
            return Err(BookingError::PaymentInFlight);
        }
        draft.step = draft.step.previous();
        Ok(draft.clone())
    }

    /// Drop the draft. A payment intent that was created but not finalized is
    /// cancelled on a best-effort basis.
    pub fn abandon(&self, draft_id: Uuid) -> Result<(), BookingError> {
        let draft = {
            let mut drafts = self.drafts.lock().expect("draft map lock poisoned");
            drafts.remove(&draft_id).ok_or(BookingError::DraftNotFound)?
        };

        if let Some(intent_id) = &draft.payment_intent_id {
            match self.gateway.get_intent(intent_id) {
                Ok(intent) if intent.status != PaymentIntentStatus::Succeeded => {
                    if let Err(err) = self.gateway.cancel_intent(intent_id) {
                        warn!("Could not cancel intent for abandoned draft: {}", err);
                    }
                }
                Ok(_) => {}
                Err(err) => warn!("Could not load intent for abandoned draft: {}", err),
            }
        }
        Ok(())
    }

    /// One-shot booking: drives a fresh draft through every step. A guard
    /// failure or decline surfaces as a failed `BookingResult` and the draft
    /// is abandoned, never left behind.
    #[allow(clippy::too_many_arguments)]
    pub async fn book_appointment(
        &self,
        provider_id: Uuid,
        date: NaiveDate,
        time: &str,
        session_type: SessionType,
        reason: &str,
        personal: PersonalInfo,
        payment_method: PaymentMethodDetails,
    ) -> Result<BookingResult, BookingError> {
        let draft = self.start_draft(provider_id)?;
        self.update_draft(
            draft.id,
            DraftUpdate {
                selected_date: Some(date),
                selected_time: Some(time.to_string()),
                session_type: Some(session_type),
                reason: Some(reason.to_string()),
                personal: Some(personal),
            },
        )?;

        for _ in 0..4 {
            let outcome = self.advance(draft.id, Some(payment_method.clone())).await?;
            if !outcome.advanced {
                self.abandon(draft.id)?;
                return Ok(BookingResult {
                    confirmed: false,
                    booking_id: None,
                    error: outcome.message,
                });
            }
            if let Some(confirmation) = outcome.confirmation {
                return Ok(BookingResult {
                    confirmed: true,
                    booking_id: Some(confirmation.booking_id),
                    error: None,
                });
            }
        }

        // Four guard-true advances always end in a confirmation.
        self.abandon(draft.id)?;
        Ok(BookingResult {
            confirmed: false,
            booking_id: None,
            error: Some("Booking did not complete".to_string()),
        })
    }
}
