//! Router configuration for the TutorHub web API.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    contact_login, create_post_form, create_post_login_first, create_post_submit, dashboard,
    listing, login, login_form, mark_read, mark_unread, register_form, register_user,
    tutor_message, tutor_page, AppState,
};
use super::middleware::{create_cors_layer, session_layer};

/// Create the main router.
pub fn create_router(app_state: AppState, cors_origins: &[String]) -> Router {
    // Listing pages
    let listing_routes = Router::new()
        .route("/", get(listing))
        .route("/search", get(listing));

    // Account routes
    let account_routes = Router::new()
        .route("/login", get(login_form).post(login))
        .route("/register", get(register_form).post(register_user));

    // Dashboard routes (login enforced per handler)
    let dashboard_routes = Router::new()
        .route("/dashboard", get(dashboard))
        .route("/dashboard/markRead", post(mark_read))
        .route("/dashboard/markUnread", post(mark_unread));

    // Tutor post routes
    let post_routes = Router::new()
        .route("/createTutorPost", get(create_post_form).post(create_post_submit))
        .route("/createTutorPost/loginFirst", post(create_post_login_first));

    // Tutor contact routes; the static contactlogin route wins over the slug
    let tutor_routes = Router::new()
        .route("/tutor/contactlogin", post(contact_login))
        .route("/tutor/:slug", get(tutor_page).post(tutor_message));

    // Clone the session store for the middleware closure
    let sessions = app_state.sessions.clone();

    Router::new()
        .merge(listing_routes)
        .merge(account_routes)
        .merge(dashboard_routes)
        .merge(post_routes)
        .merge(tutor_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let sessions = sessions.clone();
                    session_layer(sessions, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

/// Build the full application router, used by the server and by tests.
pub fn create_app(app_state: AppState, cors_origins: &[String]) -> Router {
    create_router(app_state, cors_origins).merge(create_health_router())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_health_router() {
        let _router = create_health_router();
        // Should not panic
    }
}
