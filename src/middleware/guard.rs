use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::auth::{verify_token, Role};
use crate::config;

/// Asset locations served without any session check.
const EXEMPT_PREFIXES: &[&str] = &["/api/", "/assets/", "/uploads/", "/logo/"];
const EXEMPT_EXACT: &[&str] = &["/favicon.ico", "/images/profile-default.png"];
const EXEMPT_EXTENSIONS: &[&str] = &[
    ".png", ".jpg", ".jpeg", ".svg", ".ico", ".css", ".woff", ".woff2", ".ttf",
];

/// Pages reachable without a session. Authenticated users are bounced off
/// them to the dashboard instead.
const PUBLIC_PATHS: &[&str] = &["/login"];

const ADMIN_PREFIX: &str = "/admin";
const USER_MANAGEMENT_PREFIX: &str = "/admin/users";

/// Outcome of the per-request guard decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Continue,
    RedirectDashboard,
    RedirectLogin { from: Option<String> },
    /// Verification failed on a protected path: redirect to login and drop
    /// the stale or forged cookie.
    RedirectLoginClearCookie,
}

pub fn is_exempt(path: &str) -> bool {
    EXEMPT_EXACT.contains(&path)
        || EXEMPT_PREFIXES.iter().any(|p| path.starts_with(p))
        || EXEMPT_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Decide what to do with an inbound request before it reaches a handler.
/// Pure: same path and cookie always produce the same decision.
pub fn decide(path: &str, token: Option<&str>) -> GuardDecision {
    if is_exempt(path) {
        return GuardDecision::Continue;
    }

    if path == "/" {
        return match token {
            Some(t) if verify_token(t).is_ok() => GuardDecision::RedirectDashboard,
            _ => GuardDecision::RedirectLogin { from: None },
        };
    }

    if PUBLIC_PATHS.contains(&path) {
        if let Some(t) = token {
            if verify_token(t).is_ok() {
                return GuardDecision::RedirectDashboard;
            }
        }
        return GuardDecision::Continue;
    }

    // Protected path from here on.
    let Some(t) = token else {
        return GuardDecision::RedirectLogin {
            from: Some(path.to_string()),
        };
    };

    let claims = match verify_token(t) {
        Ok(claims) => claims,
        Err(_) => return GuardDecision::RedirectLoginClearCookie,
    };

    let elevated = claims.role.is_elevated();

    // Account management is super-admin only. This check must stay ahead of
    // the general admin-area check: the paths overlap and the stricter rule
    // wins.
    if path.starts_with(USER_MANAGEMENT_PREFIX) && claims.role != Role::SuperAdmin {
        return GuardDecision::RedirectDashboard;
    }
    if path.starts_with(ADMIN_PREFIX) && !elevated {
        return GuardDecision::RedirectDashboard;
    }

    GuardDecision::Continue
}

/// Axum middleware applying [`decide`] to every request.
pub async fn route_guard(jar: CookieJar, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let cookie_name = &config::config().security.cookie_name;
    let token = jar.get(cookie_name).map(|c| c.value().to_string());

    match decide(&path, token.as_deref()) {
        GuardDecision::Continue => next.run(request).await,
        GuardDecision::RedirectDashboard => Redirect::to("/dashboard").into_response(),
        GuardDecision::RedirectLogin { from } => {
            let target = match from {
                Some(p) => format!("/login?from={}", p),
                None => "/login".to_string(),
            };
            Redirect::to(&target).into_response()
        }
        GuardDecision::RedirectLoginClearCookie => {
            let removal = Cookie::build((cookie_name.clone(), "")).path("/").build();
            let jar = jar.remove(removal);
            (jar, Redirect::to("/login")).into_response()
        }
    }
}
