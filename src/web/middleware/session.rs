//! Session middleware for the web layer.
//!
//! Every request gets a session: the `sid` cookie is looked up in the
//! [`SessionStore`] and the resulting [`Viewer`] snapshot is placed in the
//! request extensions. Requests without a cookie get a fresh anonymous
//! session and a `Set-Cookie` on the way out.

use axum::{
    async_trait,
    body::Body,
    extract::FromRequestParts,
    http::{header::SET_COOKIE, request::Parts, HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::convert::Infallible;

use crate::auth::{SessionStore, Viewer};

/// Session cookie name.
pub const SESSION_COOKIE: &str = "sid";

/// The request's session token, available to handlers that need to mutate
/// the session.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

/// Resolve the session for a request and stash it in the extensions.
pub async fn session_layer(
    sessions: SessionStore,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(req.headers());
    let (token, is_new) = match jar.get(SESSION_COOKIE) {
        Some(cookie) => (cookie.value().to_string(), false),
        None => (sessions.create().await, true),
    };

    let viewer = match sessions.viewer(&token).await {
        Some(viewer) => viewer,
        None => {
            // A cookie from before a restart or past expiry gets a fresh
            // anonymous session under the same token.
            sessions.ensure(&token).await;
            Viewer::anonymous()
        }
    };

    req.extensions_mut().insert(viewer);
    req.extensions_mut().insert(SessionToken(token.clone()));

    let mut response = next.run(req).await;

    if is_new {
        let cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }

    response
}

/// Extractor for the viewer snapshot. Always succeeds; logged-out requests
/// see the anonymous viewer.
#[derive(Debug, Clone)]
pub struct CurrentViewer(pub Viewer);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentViewer
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let viewer = parts
            .extensions
            .get::<Viewer>()
            .cloned()
            .unwrap_or_else(Viewer::anonymous);
        Ok(Self(viewer))
    }
}

/// Extractor that requires a logged-in user.
///
/// Logged-out requests are redirected to the login page.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: i64,
    pub first_name: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let viewer = parts.extensions.get::<Viewer>();
        match viewer {
            Some(v) if v.login_validated => Ok(Self {
                user_id: v.user_id.ok_or_else(login_redirect)?,
                first_name: v.first_name.clone().unwrap_or_default(),
            }),
            _ => Err(login_redirect()),
        }
    }
}

fn login_redirect() -> Response {
    Redirect::to("/login").into_response()
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionToken>()
            .cloned()
            .ok_or_else(|| {
                crate::web::error::ApiError::internal("Session middleware missing").into_response()
            })
    }
}
