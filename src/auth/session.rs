use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::Redirect,
};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::{verify_token, Role};
use crate::config;

/// Request-scoped session reconstructed from the signed cookie. Exists only
/// if a token was present and verified; discarded at end of request.
#[derive(Debug, Clone)]
pub struct Session {
    pub operator_id: String,
    pub role: Role,
    pub username: String,
    pub nama: String,
}

/// Read and verify the session cookie. Verification failures are swallowed;
/// callers treat `None` as unauthenticated and redirect themselves.
pub fn read_session(jar: &CookieJar) -> Option<Session> {
    let cookie_name = &config::config().security.cookie_name;
    let token = jar.get(cookie_name)?.value();
    let claims = verify_token(token).ok()?;

    Some(Session {
        operator_id: claims.operator_id,
        role: claims.role,
        username: claims.username,
        nama: claims.nama,
    })
}

/// Page handlers extract `Session` directly; a missing or invalid session
/// redirects to the login page. The route guard already made this decision,
/// the extractor repeats it so handlers never see a half-authenticated state.
#[axum::async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        read_session(&jar).ok_or_else(|| Redirect::to("/login"))
    }
}
