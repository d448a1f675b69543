use std::sync::Mutex;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_utils::store::{Store, SubscriberId};

use crate::models::{Notification, NotificationError, NotificationKind, SentEmail};

/// In-app notification list plus simulated outbound email/SMS sends.
/// The list lives in an observable store so other cells can react to changes;
/// emails land in an in-process outbox instead of a real transport.
pub struct NotificationService {
    notifications: Store<Vec<Notification>>,
    outbox: Mutex<Vec<SentEmail>>,
    latency_ms: u64,
}

impl NotificationService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            notifications: Store::new(Vec::new()),
            outbox: Mutex::new(Vec::new()),
            latency_ms: config.simulated_latency_ms,
        }
    }

    pub fn list(&self) -> Vec<Notification> {
        self.notifications.get()
    }

    pub fn unread_count(&self) -> usize {
        self.notifications
            .get()
            .iter()
            .filter(|n| !n.read)
            .count()
    }

    /// Newest notifications first.
    pub fn add(&self, title: &str, message: &str, kind: NotificationKind) -> Notification {
        let notification = Notification {
            id: Uuid::new_v4(),
            title: title.to_string(),
            message: message.to_string(),
            kind,
            timestamp: Utc::now(),
            read: false,
        };
        self.notifications.update(|list| {
            list.insert(0, notification.clone());
        });
        notification
    }

    pub fn appointment_reminder(
        &self,
        provider_name: &str,
        date: NaiveDate,
        time: &str,
    ) -> Notification {
        self.add(
            "Appointment Reminder",
            &format!(
                "You have an appointment with {} on {} at {}",
                provider_name, date, time
            ),
            NotificationKind::Info,
        )
    }

    pub fn mark_read(&self, id: Uuid) -> Result<(), NotificationError> {
        self.notifications.update(|list| {
            match list.iter_mut().find(|n| n.id == id) {
                Some(notification) => {
                    notification.read = true;
                    Ok(())
                }
                None => Err(NotificationError::NotFound),
            }
        })
    }

    pub fn mark_all_read(&self) {
        self.notifications.update(|list| {
            for notification in list.iter_mut() {
                notification.read = true;
            }
        });
    }

    pub fn remove(&self, id: Uuid) -> Result<(), NotificationError> {
        self.notifications.update(|list| {
            let before = list.len();
            list.retain(|n| n.id != id);
            if list.len() == before {
                Err(NotificationError::NotFound)
            } else {
                Ok(())
            }
        })
    }

    pub fn subscribe(
        &self,
        callback: impl Fn(&Vec<Notification>) + Send + Sync + 'static,
    ) -> SubscriberId {
        self.notifications.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriberId) {
        self.notifications.unsubscribe(id);
    }

    /// Simulated email send. Records the envelope in the outbox after a short
    /// delay and always succeeds.
    pub async fn send_email(&self, to: &str, subject: &str, body: &str) {
        tokio::time::sleep(Duration::from_millis(self.latency_ms)).await;
        self.outbox
            .lock()
            .expect("outbox lock poisoned")
            .push(SentEmail {
                to: to.to_string(),
                subject: subject.to_string(),
                body: body.to_string(),
                sent_at: Utc::now(),
            });
        info!(to, subject, body_len = body.len(), "Simulated email sent");
    }

    pub fn sent_emails(&self) -> Vec<SentEmail> {
        self.outbox.lock().expect("outbox lock poisoned").clone()
    }

    /// Simulated SMS send.
    pub async fn send_sms(&self, to: &str, message: &str) {
        tokio::time::sleep(Duration::from_millis(self.latency_ms)).await;
        info!(to, message_len = message.len(), "Simulated SMS sent");
    }
}
