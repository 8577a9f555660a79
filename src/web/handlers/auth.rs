//! Login and registration handlers.

use std::collections::HashMap;

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use validator::Validate;

use crate::auth::{attempt_login, register, RegistrationRequest};
use crate::catalog::CatalogRepository;
use crate::web::dto::{
    ApiResponse, LoginRequest, LoginResponse, RegisterFormResponse, RegisterRequest,
    RegisterResponse, UserInfo,
};
use crate::web::error::ApiError;
use crate::web::middleware::{CurrentViewer, SessionToken};

use super::AppState;

/// GET /login - login form, or straight home when already logged in.
pub async fn login_form(CurrentViewer(viewer): CurrentViewer) -> Response {
    if viewer.login_validated {
        return Redirect::to("/").into_response();
    }
    Json(ApiResponse::new(viewer)).into_response()
}

/// POST /login - authenticate and bind the session.
///
/// On success the response names the next page: the lazy-registration
/// referring page when a capture is pending, the home page otherwise.
pub async fn login(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    Form(request): Form<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let user = attempt_login(
        state.db.pool(),
        &state.sessions,
        &token,
        &request.user_email,
        &request.entered_password,
    )
    .await?;

    let redirect = state
        .sessions
        .lazy_referring_page(&token)
        .await
        .unwrap_or_else(|| "/".to_string());

    Ok(Json(ApiResponse::new(LoginResponse {
        redirect,
        user: UserInfo::from(&user),
    })))
}

/// GET /register - registration form data, or home when already logged in.
pub async fn register_form(
    State(state): State<AppState>,
    CurrentViewer(viewer): CurrentViewer,
) -> Result<Response, ApiError> {
    if viewer.login_validated {
        return Ok(Redirect::to("/").into_response());
    }

    let majors = CatalogRepository::new(state.db.pool()).major_lists().await?;
    Ok(Json(ApiResponse::new(RegisterFormResponse { viewer, majors })).into_response())
}

/// POST /register - create an account.
pub async fn register_user(
    State(state): State<AppState>,
    Form(request): Form<RegisterRequest>,
) -> Result<Json<ApiResponse<RegisterResponse>>, ApiError> {
    if let Err(errors) = request.validate() {
        return Err(ApiError::validation(
            "Registration fields failed validation",
            validation_details(&errors),
        ));
    }

    let user = register(
        state.db.pool(),
        RegistrationRequest {
            email: request.email,
            password: request.password,
            first_name: request.first_name,
            last_name: request.last_name,
            major_short_name: request.major_dropdown,
        },
    )
    .await?;

    Ok(Json(ApiResponse::new(RegisterResponse {
        user: UserInfo::from(&user),
    })))
}

fn validation_details(errors: &validator::ValidationErrors) -> HashMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}
