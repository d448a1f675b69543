use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::User;

use crate::jwt::sign_token;

pub struct TestConfig {
    pub jwt_secret: String,
    pub storage_dir: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-session-tokens-must-be-long-enough".to_string(),
            storage_dir: std::env::temp_dir()
                .join(format!("wevolve-test-{}", Uuid::new_v4()))
                .to_string_lossy()
                .into_owned(),
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        let mut config = AppConfig::for_tests(&self.storage_dir);
        config.jwt_secret = self.jwt_secret.clone();
        config
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: "test@example.com".to_string(),
            role: "patient".to_string(),
        }
    }
}

impl TestUser {
    pub fn new(email: &str, role: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }

    pub fn patient(email: &str) -> Self {
        Self::new(email, "patient")
    }

    pub fn admin(email: &str) -> Self {
        Self::new(email, "admin")
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            email: Some(self.email.clone()),
            role: Some(self.role.clone()),
            created_at: Some(Utc::now()),
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, jwt_secret: &str, valid_hours: Option<i64>) -> String {
        sign_token(&user.to_user(), jwt_secret, valid_hours.unwrap_or(24))
            .expect("test token creation should not fail")
    }

    pub fn create_expired_token(user: &TestUser, jwt_secret: &str) -> String {
        sign_token(&user.to_user(), jwt_secret, -1)
            .expect("test token creation should not fail")
    }
}
