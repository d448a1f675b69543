use std::time::Duration;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::UserRole;
use shared_storage::ClientStore;
use shared_utils::jwt::sign_token;
use shared_utils::store::PersistedStore;

use crate::models::{AccountProfile, AuthError, LoginOutcome, ProfileUpdate, StoredSession};

const SESSION_STORE: &str = "auth-storage";
const SESSION_VALID_HOURS: i64 = 24;
const DEMO_USER_ID: &str = "1";
const DEMO_USER_NAME: &str = "Demo User";

/// Simulated sign-in against one hard-coded credential pair. Successful
/// sessions persist across restarts through the "auth-storage" blob.
pub struct AuthSessionService {
    demo_email: String,
    demo_password: String,
    jwt_secret: String,
    latency_ms: u64,
    sessions: PersistedStore<Option<StoredSession>>,
}

impl AuthSessionService {
    pub fn new(config: &AppConfig, client: ClientStore) -> Self {
        Self {
            demo_email: config.demo_email.clone(),
            demo_password: config.demo_password.clone(),
            jwt_secret: config.jwt_secret.clone(),
            latency_ms: config.simulated_latency_ms,
            sessions: PersistedStore::open(client, SESSION_STORE, None),
        }
    }

    /// Exactly one credential pair succeeds. Every other combination gets the
    /// same generic failure, never revealing which field was wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        tokio::time::sleep(Duration::from_millis(self.latency_ms)).await;

        if email != self.demo_email || password != self.demo_password {
            return Ok(LoginOutcome {
                success: false,
                user: None,
                token: None,
                error: Some(AuthError::InvalidCredentials.to_string()),
            });
        }

        let profile = AccountProfile {
            id: DEMO_USER_ID.to_string(),
            email: self.demo_email.clone(),
            name: DEMO_USER_NAME.to_string(),
            role: UserRole::Patient,
            created_at: Utc::now(),
        };
        self.open_session(profile)
    }

    /// Registration always succeeds with a fresh account and signs the new
    /// user in.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        _password: &str,
    ) -> Result<LoginOutcome, AuthError> {
        tokio::time::sleep(Duration::from_millis(self.latency_ms)).await;

        let profile = AccountProfile {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            name: name.to_string(),
            role: UserRole::Patient,
            created_at: Utc::now(),
        };
        self.open_session(profile)
    }

    fn open_session(&self, profile: AccountProfile) -> Result<LoginOutcome, AuthError> {
        let token = sign_token(&profile.to_user(), &self.jwt_secret, SESSION_VALID_HOURS)
            .map_err(AuthError::TokenSigning)?;

        self.sessions.update(|session| {
            *session = Some(StoredSession {
                profile: profile.clone(),
                token: token.clone(),
            });
        });
        info!("Session opened for {}", profile.email);

        Ok(LoginOutcome {
            success: true,
            user: Some(profile),
            token: Some(token),
            error: None,
        })
    }

    pub fn logout(&self) {
        self.sessions.update(|session| *session = None);
        info!("Session cleared");
    }

    pub fn current_session(&self) -> Option<StoredSession> {
        self.sessions.get()
    }

    /// Merge partial profile fields into the signed-in session.
    pub fn update_profile(&self, update: ProfileUpdate) -> Result<AccountProfile, AuthError> {
        self.sessions.update(|session| {
            let session = session.as_mut().ok_or(AuthError::NotSignedIn)?;
            if let Some(name) = update.name {
                session.profile.name = name;
            }
            if let Some(email) = update.email {
                session.profile.email = email;
            }
            Ok(session.profile.clone())
        })
    }
}
