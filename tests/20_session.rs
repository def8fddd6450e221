// The Session extractor is the page layer's own re-check: even with the
// route guard absent, a handler that wants a session must get a verified one
// or the request is redirected to login.

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    routing::get,
    Router,
};
use tower::ServiceExt;

use arsip_api::auth::{issue_token, Claims, Role, Session};

fn unguarded_app() -> Router {
    Router::new().route(
        "/dashboard",
        get(|session: Session| async move { session.nama }),
    )
}

#[tokio::test]
async fn missing_session_redirects_to_login() -> Result<()> {
    let response = unguarded_app()
        .oneshot(Request::builder().uri("/dashboard").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/login"
    );
    Ok(())
}

#[tokio::test]
async fn tampered_cookie_redirects_to_login() -> Result<()> {
    let response = unguarded_app()
        .oneshot(
            Request::builder()
                .uri("/dashboard")
                .header(header::COOKIE, "token=not.a.token")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    Ok(())
}

#[tokio::test]
async fn valid_cookie_reaches_handler() -> Result<()> {
    let claims = Claims::new(
        "op-7".to_string(),
        Role::User,
        "sari".to_string(),
        "Sari Dewi".to_string(),
    );
    let token = issue_token(&claims)?;

    let response = unguarded_app()
        .oneshot(
            Request::builder()
                .uri("/dashboard")
                .header(header::COOKIE, format!("token={}", token))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}
