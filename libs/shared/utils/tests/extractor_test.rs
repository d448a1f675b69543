use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::{middleware, routing::get, Extension, Router};
use tower::ServiceExt;

use shared_models::auth::User;
use shared_utils::extractor::auth_middleware;
use shared_utils::test_utils::{JwtTestUtils, TestConfig, TestUser};

fn protected_app(config: &TestConfig) -> Router {
    Router::new()
        .route(
            "/whoami",
            get(|Extension(user): Extension<User>| async move { user.id }),
        )
        .layer(middleware::from_fn_with_state(
            config.to_arc(),
            auth_middleware,
        ))
}

#[tokio::test]
async fn valid_bearer_token_reaches_the_handler_with_its_user() {
    let config = TestConfig::default();
    let user = TestUser::patient("ada@example.com");
    let token = JwtTestUtils::create_test_token(&user, &config.jwt_secret, None);

    let response = protected_app(&config)
        .oneshot(
            Request::builder()
                .uri("/whoami")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(body, user.id.as_bytes());
}

#[tokio::test]
async fn missing_header_is_unauthorized() {
    let config = TestConfig::default();
    let response = protected_app(&config)
        .oneshot(Request::builder().uri("/whoami").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_bearer_scheme_is_unauthorized() {
    let config = TestConfig::default();
    let response = protected_app(&config)
        .oneshot(
            Request::builder()
                .uri("/whoami")
                .header("Authorization", "Basic abc123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_unauthorized() {
    let config = TestConfig::default();
    let user = TestUser::admin("root@example.com");
    let token = JwtTestUtils::create_expired_token(&user, &config.jwt_secret);

    let response = protected_app(&config)
        .oneshot(
            Request::builder()
                .uri("/whoami")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_signed_with_another_secret_is_unauthorized() {
    let config = TestConfig::default();
    let user = TestUser::default();
    let token = JwtTestUtils::create_test_token(&user, "some-other-secret-entirely", None);

    let response = protected_app(&config)
        .oneshot(
            Request::builder()
                .uri("/whoami")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
