//! Sign-in lifecycle scenarios against an in-memory backend.

#![allow(clippy::unwrap_used)]

use crew_lounge_client::{
    LoginRequest, MockReply, RegisterRequest, SessionPhase, UpdateDetailsRequest,
};
use crew_lounge_core::{ApprovalStatus, Email, UserRole};
use crew_lounge_integration_tests::{TestContext, member};
use reqwest::Method;
use serde_json::json;

fn credentials() -> LoginRequest {
    LoginRequest::new(Email::parse("alex.rivera@example.com").unwrap(), "hunter22")
}

#[tokio::test]
async fn test_login_token_then_me_yields_approved_host() {
    let ctx = TestContext::new();
    ctx.login_issues_token("abc").me_returns("host", "approved");

    ctx.session.login(&credentials()).await.unwrap();

    let state = ctx.session.snapshot();
    assert_eq!(state.phase, SessionPhase::Authenticated);
    assert!(state.is_authenticated());
    assert!(state.is_approved());
    assert!(state.can_add_listings());
    assert_eq!(ctx.stored_token().await.as_deref(), Some("abc"));

    let me = ctx.backend.last_request().unwrap();
    assert_eq!(me.headers["authorization"], "Bearer abc");
}

#[tokio::test]
async fn test_login_rejected_by_application() {
    let ctx = TestContext::new();
    ctx.backend.on_json(
        Method::POST,
        "/auth/login",
        200,
        &json!({"success": false, "error": "X"}),
    );

    assert!(ctx.session.login(&credentials()).await.is_err());

    let state = ctx.session.snapshot();
    assert!(!state.is_authenticated());
    assert_eq!(state.last_error.as_deref(), Some("X"));
    assert!(!state.loading);
    assert!(ctx.stored_token().await.is_none());
}

#[tokio::test]
async fn test_derived_flags_follow_role_and_status() {
    let cases = [
        ("host", "pending", true, false, false),
        ("host", "approved", true, true, true),
        ("admin", "approved", true, true, true),
        ("user", "approved", true, true, false),
        ("employer", "approved", true, true, false),
        ("host", "rejected", true, false, false),
    ];

    for (role, status, authenticated, approved, can_list) in cases {
        let ctx = TestContext::with_token("abc");
        ctx.me_returns(role, status);
        ctx.session.bootstrap().await;

        let state = ctx.session.snapshot();
        assert_eq!(state.is_authenticated(), authenticated, "{role}/{status}");
        assert_eq!(state.is_approved(), approved, "{role}/{status}");
        assert_eq!(state.can_add_listings(), can_list, "{role}/{status}");
    }
}

#[tokio::test]
async fn test_register_always_lands_pending() {
    let ctx = TestContext::new();
    ctx.backend.on_json(
        Method::POST,
        "/auth/register",
        201,
        &json!({"success": true, "token": "fresh", "data": member("host", "approved")}),
    );

    let request = RegisterRequest::new(
        "Alex Rivera",
        Email::parse("alex.rivera@example.com").unwrap(),
        "hunter22",
    )
    .with_role(UserRole::Host)
    .with_airline("Delta")
    .with_position("First Officer");
    ctx.session.register(&request).await.unwrap();

    let state = ctx.session.snapshot();
    let user = state.user.as_ref().unwrap();
    assert_eq!(user.status, ApprovalStatus::Pending);
    assert_eq!(user.role, UserRole::Host);
    assert!(!state.can_add_listings());
    assert_eq!(ctx.stored_token().await.as_deref(), Some("fresh"));
}

#[tokio::test]
async fn test_logout_twice_stays_anonymous() {
    let ctx = TestContext::with_token("abc");
    ctx.me_returns("user", "approved");
    ctx.backend
        .on(Method::GET, "/auth/logout", MockReply::json(200, &json!({"success": true})))
        .on(Method::GET, "/auth/logout", MockReply::Timeout);

    ctx.session.bootstrap().await;
    assert!(ctx.session.snapshot().is_authenticated());

    ctx.session.logout().await;
    ctx.session.logout().await;

    let state = ctx.session.snapshot();
    assert_eq!(state.phase, SessionPhase::Anonymous);
    assert!(state.user.is_none());
    assert!(state.last_error.is_none());
    assert!(ctx.stored_token().await.is_none());
    assert_eq!(ctx.backend.requests_to(&Method::GET, "/auth/logout"), 2);
}

#[tokio::test]
async fn test_bootstrap_with_rejected_token_forgets_it() {
    let ctx = TestContext::with_token("expired");
    ctx.backend.on_json(
        Method::GET,
        "/auth/me",
        401,
        &json!({"success": false, "error": "Not authorized to access this route"}),
    );

    ctx.session.bootstrap().await;
    let state = ctx.session.snapshot();
    assert_eq!(state.phase, SessionPhase::Anonymous);
    assert!(state.last_error.is_none());
    assert!(ctx.stored_token().await.is_none());

    ctx.session.bootstrap().await;
    assert_eq!(ctx.backend.requests_to(&Method::GET, "/auth/me"), 1);
}

#[tokio::test]
async fn test_bootstrap_when_backend_unreachable() {
    let ctx = TestContext::with_token("abc");
    ctx.backend
        .on(Method::GET, "/auth/me", MockReply::NetworkError("connection refused".into()));

    ctx.session.bootstrap().await;
    let state = ctx.session.snapshot();
    assert_eq!(state.phase, SessionPhase::Anonymous);
    assert!(state.last_error.is_none());
    assert!(ctx.stored_token().await.is_none());
}

#[tokio::test]
async fn test_profile_update_can_revoke_listing_rights() {
    let ctx = TestContext::with_token("abc");
    ctx.me_returns("host", "approved");
    ctx.backend.on_json(
        Method::PUT,
        "/auth/updatedetails",
        200,
        &json!({"success": true, "data": member("host", "rejected")}),
    );

    ctx.session.bootstrap().await;
    assert!(ctx.session.snapshot().can_add_listings());

    let details = UpdateDetailsRequest {
        position: Some("Captain".to_string()),
        ..UpdateDetailsRequest::default()
    };
    ctx.session.update_profile(&details).await.unwrap();
    assert!(!ctx.session.snapshot().can_add_listings());
}

#[tokio::test]
async fn test_subscriber_observes_final_state() {
    let ctx = TestContext::new();
    ctx.login_issues_token("abc").me_returns("user", "pending");
    let mut updates = ctx.session.subscribe();

    let session = ctx.session.clone();
    let login = tokio::spawn(async move { session.login(&credentials()).await });

    updates
        .wait_for(|state| state.phase == SessionPhase::Authenticated && !state.loading)
        .await
        .unwrap();
    login.await.unwrap().unwrap();
    assert!(!ctx.session.snapshot().is_approved());
}
