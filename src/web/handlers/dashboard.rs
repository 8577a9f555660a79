//! Messaging dashboard handlers.

use axum::{
    extract::State,
    response::Redirect,
    Form, Json,
};
use tracing::warn;

use crate::message::{parse_id_list, MessageRepository};
use crate::search::TIMESTAMP_FORMAT;
use crate::web::dto::{ApiResponse, DashboardResponse, MarkMessagesRequest, MessageView};
use crate::web::error::ApiError;
use crate::web::middleware::{CurrentUser, CurrentViewer, SessionToken};

use super::AppState;

/// GET /dashboard - the user's received messages, newest first.
///
/// Requires login (the extractor redirects otherwise). Outside the
/// lazy-registration detour, so pending captures are discarded.
pub async fn dashboard(
    State(state): State<AppState>,
    CurrentViewer(viewer): CurrentViewer,
    user: CurrentUser,
    SessionToken(token): SessionToken,
) -> Result<Json<ApiResponse<DashboardResponse>>, ApiError> {
    state.sessions.clear_lazy(&token).await;

    let repo = MessageRepository::new(state.db.pool());
    let inbox = repo.inbox(user.user_id).await?;
    let unread_count = repo.count_unread(user.user_id).await?;

    let messages = inbox
        .into_iter()
        .map(|m| MessageView {
            id: m.id,
            sender_name: m.sender_name(),
            body: m.body,
            is_read: m.is_read,
            sent_at: m.sent_at.format(TIMESTAMP_FORMAT).to_string(),
        })
        .collect();

    Ok(Json(ApiResponse::new(DashboardResponse {
        viewer,
        messages,
        unread_count,
    })))
}

/// POST /dashboard/markRead - mark the listed messages as read.
pub async fn mark_read(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(request): Form<MarkMessagesRequest>,
) -> Redirect {
    toggle_read(&state, &user, &request.message_ids, true).await
}

/// POST /dashboard/markUnread - mark the listed messages as unread.
pub async fn mark_unread(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(request): Form<MarkMessagesRequest>,
) -> Redirect {
    toggle_read(&state, &user, &request.message_ids, false).await
}

/// Shared toggle logic: parse the id list, apply, and go back to the
/// dashboard regardless of the outcome.
async fn toggle_read(state: &AppState, user: &CurrentUser, raw_ids: &str, read: bool) -> Redirect {
    match parse_id_list(raw_ids) {
        Some(ids) => {
            if let Err(e) = MessageRepository::new(state.db.pool())
                .set_read(user.user_id, &ids, read)
                .await
            {
                warn!("Failed to update read state: {}", e);
            }
        }
        None => {
            warn!("Malformed message id list: {:?}", raw_ids);
        }
    }
    Redirect::to("/dashboard")
}
