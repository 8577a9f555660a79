//! Tutor contact page handlers.

use axum::{
    extract::{Path, State},
    response::Redirect,
    Form, Json,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use validator::Validate;

use crate::auth::{LazyPayload, LazyRegistration};
use crate::post::{resolve_slug, send_contact_message, TutorPostDetail};
use crate::search::TIMESTAMP_FORMAT;
use crate::web::dto::{
    ApiResponse, ContactLoginRequest, ContactMessageRequest, TutorDetail, TutorPageResponse,
};
use crate::web::error::ApiError;
use crate::web::middleware::{CurrentUser, CurrentViewer, SessionToken};

use super::AppState;

fn tutor_detail(detail: TutorPostDetail) -> TutorDetail {
    TutorDetail {
        post_id: detail.post_id,
        first_name: detail.first_name,
        last_name: detail.last_name,
        course_number: detail.course_number,
        course_title: detail.course_title,
        major_short_name: detail.major_short_name,
        details: detail.details,
        image: detail.image.map(|bytes| STANDARD.encode(bytes)),
        created_at: detail.created_at.format(TIMESTAMP_FORMAT).to_string(),
    }
}

/// GET /tutor/{slug} - a tutor's contact page.
///
/// When the visitor arrives back here after the login detour with a
/// captured message draft, the draft is sent now and surfaced as
/// `message_sent`.
pub async fn tutor_page(
    State(state): State<AppState>,
    CurrentViewer(viewer): CurrentViewer,
    SessionToken(token): SessionToken,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<TutorPageResponse>>, ApiError> {
    let detail = resolve_slug(state.db.pool(), &slug)
        .await?
        .ok_or_else(|| ApiError::not_found("Tutor page not found"))?;

    let mut message_sent = false;
    let this_page = format!("/tutor/{slug}");

    if viewer.login_validated {
        if let Some(user_id) = viewer.user_id {
            let pending = state.sessions.lazy_referring_page(&token).await;
            if pending.as_deref() == Some(this_page.as_str()) {
                if let Some(lazy) = state.sessions.take_lazy(&token).await {
                    if let LazyPayload::MessageDraft { text } = lazy.payload {
                        message_sent =
                            send_contact_message(state.db.pool(), &slug, user_id, &text).await?;
                    }
                }
            }
        }
    }

    Ok(Json(ApiResponse::new(TutorPageResponse {
        viewer,
        tutor: tutor_detail(detail),
        message_sent,
    })))
}

/// POST /tutor/{slug} - send a message to the tutor. Requires login.
pub async fn tutor_message(
    State(state): State<AppState>,
    CurrentViewer(viewer): CurrentViewer,
    user: CurrentUser,
    Path(slug): Path<String>,
    Form(request): Form<ContactMessageRequest>,
) -> Result<Json<ApiResponse<TutorPageResponse>>, ApiError> {
    if request.validate().is_err() {
        return Err(ApiError::bad_request("Message text is required"));
    }

    let detail = resolve_slug(state.db.pool(), &slug)
        .await?
        .ok_or_else(|| ApiError::not_found("Tutor page not found"))?;

    let message_sent =
        send_contact_message(state.db.pool(), &slug, user.user_id, &request.message_text).await?;

    Ok(Json(ApiResponse::new(TutorPageResponse {
        viewer,
        tutor: tutor_detail(detail),
        message_sent,
    })))
}

/// POST /tutor/contactlogin - capture a logged-out message draft and send
/// the visitor through login.
pub async fn contact_login(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    Form(request): Form<ContactLoginRequest>,
) -> Redirect {
    state
        .sessions
        .set_lazy(
            &token,
            LazyRegistration {
                referring_page: request.referring_tutor_page,
                payload: LazyPayload::MessageDraft {
                    text: request.message_text,
                },
            },
        )
        .await;

    Redirect::to("/login")
}
