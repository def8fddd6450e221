// Route guard behavior exercised through a real router, in process.
//
// The guard does not touch the database, so the test router pairs it with
// stub page handlers instead of the full application.

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware::from_fn,
    routing::get,
    Router,
};
use tower::ServiceExt;

use arsip_api::auth::{issue_token, Claims, Role};
use arsip_api::middleware::route_guard;

fn test_app() -> Router {
    Router::new()
        .route("/login", get(|| async { "login" }))
        .route("/dashboard", get(|| async { "dashboard" }))
        .route("/surat", get(|| async { "surat" }))
        .route("/admin", get(|| async { "admin" }))
        .route("/admin/users", get(|| async { "admin users" }))
        .route("/logo/x.png", get(|| async { "logo" }))
        .layer(from_fn(route_guard))
}

fn token_for(role: Role) -> String {
    let claims = Claims::new(
        "op-1".to_string(),
        role,
        "budi".to_string(),
        "Budi Santoso".to_string(),
    );
    issue_token(&claims).expect("issue token")
}

fn request(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(path);
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("token={}", token));
    }
    builder.body(Body::empty()).unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Location header")
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn root_redirects_to_login_without_token() -> Result<()> {
    let response = test_app().oneshot(request("/", None)).await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    Ok(())
}

#[tokio::test]
async fn root_redirects_to_dashboard_with_valid_token() -> Result<()> {
    let token = token_for(Role::User);
    let response = test_app().oneshot(request("/", Some(token.as_str()))).await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    Ok(())
}

#[tokio::test]
async fn login_page_reachable_without_token() -> Result<()> {
    let response = test_app().oneshot(request("/login", None)).await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn login_page_bounces_authenticated_user() -> Result<()> {
    let token = token_for(Role::Operator);
    let response = test_app().oneshot(request("/login", Some(token.as_str()))).await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    Ok(())
}

#[tokio::test]
async fn protected_page_redirects_with_from_parameter() -> Result<()> {
    let response = test_app().oneshot(request("/surat", None)).await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?from=/surat");
    Ok(())
}

#[tokio::test]
async fn invalid_token_on_protected_page_clears_cookie() -> Result<()> {
    let response = test_app()
        .oneshot(request("/dashboard", Some("garbage")))
        .await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("Set-Cookie header")
        .to_str()?;
    assert!(set_cookie.starts_with("token="), "{set_cookie}");
    assert!(set_cookie.contains("Max-Age=0"), "{set_cookie}");
    Ok(())
}

#[tokio::test]
async fn user_management_is_super_admin_only() -> Result<()> {
    for role in [Role::User, Role::Operator, Role::Admin] {
        let token = token_for(role);
        let response = test_app()
            .oneshot(request("/admin/users", Some(token.as_str())))
            .await?;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{role:?}");
        assert_eq!(location(&response), "/dashboard", "{role:?}");
    }

    let token = token_for(Role::SuperAdmin);
    let response = test_app()
        .oneshot(request("/admin/users", Some(token.as_str())))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn admin_area_requires_elevated_role() -> Result<()> {
    for role in [Role::User, Role::Operator] {
        let token = token_for(role);
        let response = test_app().oneshot(request("/admin", Some(token.as_str()))).await?;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{role:?}");
        assert_eq!(location(&response), "/dashboard", "{role:?}");
    }
    for role in [Role::Admin, Role::SuperAdmin] {
        let token = token_for(role);
        let response = test_app().oneshot(request("/admin", Some(token.as_str()))).await?;
        assert_eq!(response.status(), StatusCode::OK, "{role:?}");
    }
    Ok(())
}

#[tokio::test]
async fn exempt_assets_ignore_token_state() -> Result<()> {
    let response = test_app().oneshot(request("/logo/x.png", None)).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = test_app()
        .oneshot(request("/logo/x.png", Some("garbage")))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn valid_token_reaches_protected_page() -> Result<()> {
    let token = token_for(Role::User);
    let response = test_app().oneshot(request("/surat", Some(token.as_str()))).await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}
