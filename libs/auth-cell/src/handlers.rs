use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_models::auth::{TokenResponse, User};
use shared_models::error::AppError;

use crate::models::{AuthError, ProfileUpdate, ThemePreference};
use crate::services::session::AuthSessionService;
use crate::services::theme::ThemeService;

pub struct AuthState {
    pub session: Arc<AuthSessionService>,
    pub theme: Arc<ThemeService>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    pub theme: ThemePreference,
}

pub async fn login(
    State(state): State<Arc<AuthState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    let outcome = state
        .session
        .login(&request.email, &request.password)
        .await
        .map_err(map_auth_error)?;
    if !outcome.success {
        return Err(AppError::Auth(
            outcome
                .error
                .unwrap_or_else(|| "Invalid credentials".to_string()),
        ));
    }
    Ok(Json(json!({
        "user": outcome.user,
        "token": outcome.token,
    })))
}

pub async fn register(
    State(state): State<Arc<AuthState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<Value>, AppError> {
    if request.email.trim().is_empty() || request.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name and email are required".to_string()));
    }
    let outcome = state
        .session
        .register(&request.name, &request.email, &request.password)
        .await
        .map_err(map_auth_error)?;
    Ok(Json(json!({
        "user": outcome.user,
        "token": outcome.token,
    })))
}

pub async fn logout(State(state): State<Arc<AuthState>>) -> Result<Json<Value>, AppError> {
    state.session.logout();
    Ok(Json(json!({ "logged_out": true })))
}

pub async fn get_profile(State(state): State<Arc<AuthState>>) -> Result<Json<Value>, AppError> {
    let session = state
        .session
        .current_session()
        .ok_or_else(|| AppError::Auth(AuthError::NotSignedIn.to_string()))?;
    Ok(Json(json!({ "user": session.profile })))
}

pub async fn update_profile(
    State(state): State<Arc<AuthState>>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<Value>, AppError> {
    let profile = state
        .session
        .update_profile(update)
        .map_err(map_auth_error)?;
    Ok(Json(json!({ "user": profile })))
}

/// Echo of the middleware-validated token identity.
pub async fn validate_session(
    Extension(user): Extension<User>,
) -> Result<Json<TokenResponse>, AppError> {
    Ok(Json(TokenResponse {
        valid: true,
        user_id: user.id,
        email: user.email,
        role: user.role,
    }))
}

pub async fn get_theme(State(state): State<Arc<AuthState>>) -> Result<Json<Value>, AppError> {
    Ok(Json(json!({ "theme": state.theme.get() })))
}

pub async fn set_theme(
    State(state): State<Arc<AuthState>>,
    Json(request): Json<ThemeRequest>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(json!({ "theme": state.theme.set(request.theme) })))
}

pub async fn toggle_theme(State(state): State<Arc<AuthState>>) -> Result<Json<Value>, AppError> {
    Ok(Json(json!({ "theme": state.theme.toggle() })))
}

fn map_auth_error(err: AuthError) -> AppError {
    match err {
        AuthError::InvalidCredentials | AuthError::NotSignedIn => AppError::Auth(err.to_string()),
        AuthError::TokenSigning(_) => AppError::Internal(err.to_string()),
    }
}
