use assert_matches::assert_matches;
use tempfile::TempDir;

use auth_cell::models::{AuthError, ProfileUpdate, ThemePreference};
use auth_cell::services::session::AuthSessionService;
use auth_cell::services::theme::ThemeService;
use shared_config::AppConfig;
use shared_models::auth::UserRole;
use shared_storage::ClientStore;
use shared_utils::jwt::validate_token;

fn setup() -> (TempDir, AppConfig, ClientStore) {
    let dir = TempDir::new().unwrap();
    let config = AppConfig::for_tests(dir.path().to_str().unwrap());
    let client = ClientStore::open(dir.path()).unwrap();
    (dir, config, client)
}

#[tokio::test]
async fn demo_credentials_sign_in_with_a_valid_token() {
    let (_dir, config, client) = setup();
    let auth = AuthSessionService::new(&config, client);

    let outcome = auth.login("demo@wevolve.com", "demo123").await.unwrap();
    assert!(outcome.success);

    let user = outcome.user.unwrap();
    assert_eq!(user.email, "demo@wevolve.com");
    assert_eq!(user.role, UserRole::Patient);

    // The issued token round-trips through the middleware's validator.
    let token = outcome.token.unwrap();
    let validated = validate_token(&token, &config.jwt_secret).unwrap();
    assert_eq!(validated.id, user.id);
}

#[tokio::test]
async fn wrong_credentials_get_one_generic_failure_message() {
    let (_dir, config, client) = setup();
    let auth = AuthSessionService::new(&config, client);

    let wrong_password = auth.login("demo@wevolve.com", "nope").await.unwrap();
    let wrong_email = auth.login("other@wevolve.com", "demo123").await.unwrap();

    assert!(!wrong_password.success);
    assert!(!wrong_email.success);
    assert_eq!(wrong_password.error.as_deref(), Some("Invalid credentials"));
    assert_eq!(wrong_email.error, wrong_password.error);
    assert!(wrong_password.user.is_none());
    assert!(wrong_password.token.is_none());
}

#[tokio::test]
async fn registration_always_succeeds_with_a_fresh_id() {
    let (_dir, config, client) = setup();
    let auth = AuthSessionService::new(&config, client);

    let first = auth
        .register("Ada Lovelace", "ada@example.com", "pw")
        .await
        .unwrap();
    let second = auth
        .register("Ada Lovelace", "ada@example.com", "pw")
        .await
        .unwrap();

    assert!(first.success && second.success);
    assert_ne!(first.user.unwrap().id, second.user.unwrap().id);
}

#[tokio::test]
async fn session_survives_a_service_restart() {
    let (dir, config, _) = setup();

    {
        let client = ClientStore::open(dir.path()).unwrap();
        let auth = AuthSessionService::new(&config, client);
        auth.login("demo@wevolve.com", "demo123").await.unwrap();
    }

    let client = ClientStore::open(dir.path()).unwrap();
    let auth = AuthSessionService::new(&config, client);
    let session = auth.current_session().expect("session reloaded from disk");
    assert_eq!(session.profile.email, "demo@wevolve.com");
}

#[tokio::test]
async fn logout_clears_the_persisted_session() {
    let (dir, config, client) = setup();
    let auth = AuthSessionService::new(&config, client);
    auth.login("demo@wevolve.com", "demo123").await.unwrap();

    auth.logout();
    assert!(auth.current_session().is_none());

    // Gone on disk too, not just in memory.
    let client = ClientStore::open(dir.path()).unwrap();
    let reloaded = AuthSessionService::new(&config, client);
    assert!(reloaded.current_session().is_none());
}

#[tokio::test]
async fn profile_update_merges_only_the_given_fields() {
    let (_dir, config, client) = setup();
    let auth = AuthSessionService::new(&config, client);
    auth.login("demo@wevolve.com", "demo123").await.unwrap();

    let profile = auth
        .update_profile(ProfileUpdate {
            name: Some("Demo Renamed".to_string()),
            email: None,
        })
        .unwrap();

    assert_eq!(profile.name, "Demo Renamed");
    assert_eq!(profile.email, "demo@wevolve.com");
}

#[tokio::test]
async fn profile_update_requires_a_session() {
    let (_dir, config, client) = setup();
    let auth = AuthSessionService::new(&config, client);

    let err = auth.update_profile(ProfileUpdate::default()).unwrap_err();
    assert_matches!(err, AuthError::NotSignedIn);
}

#[test]
fn theme_defaults_to_light_and_toggle_persists() {
    let dir = TempDir::new().unwrap();

    {
        let theme = ThemeService::new(ClientStore::open(dir.path()).unwrap());
        assert_eq!(theme.get(), ThemePreference::Light);
        assert_eq!(theme.toggle(), ThemePreference::Dark);
    }

    let theme = ThemeService::new(ClientStore::open(dir.path()).unwrap());
    assert_eq!(theme.get(), ThemePreference::Dark);
    assert_eq!(theme.set(ThemePreference::Light), ThemePreference::Light);
}
