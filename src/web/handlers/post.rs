//! Tutor post creation handlers, including the lazy-registration capture.

use axum::{
    extract::{Multipart, State},
    response::Redirect,
    Json,
};

use crate::auth::{LazyPayload, LazyRegistration};
use crate::catalog::CatalogRepository;
use crate::post::{create_post, CreatePostRequest};
use crate::web::dto::{
    ApiResponse, CreatePostFormResponse, CreatePostResponse, PostPrefill,
};
use crate::web::error::ApiError;
use crate::web::middleware::{CurrentUser, CurrentViewer, SessionToken};

use super::AppState;

/// The page the tutor post capture returns to after login.
const CREATE_POST_PAGE: &str = "/createTutorPost";

/// The tutor post form fields, parsed out of a multipart body.
#[derive(Debug, Default)]
struct PostForm {
    course_number: String,
    major_short_name: String,
    details: String,
    image: Option<Vec<u8>>,
}

async fn read_post_form(mut multipart: Multipart) -> Result<PostForm, ApiError> {
    let mut form = PostForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed form data: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "courseNumber" => {
                form.course_number = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(e.to_string()))?;
            }
            "majorShortName" => {
                form.major_short_name = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(e.to_string()))?;
            }
            "postDetails" => {
                form.details = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(e.to_string()))?;
            }
            "postImage" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(e.to_string()))?;
                if !bytes.is_empty() {
                    form.image = Some(bytes.to_vec());
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// GET /createTutorPost - the creation form: course catalog plus a one-shot
/// prefill when a captured draft is waiting for this page.
pub async fn create_post_form(
    State(state): State<AppState>,
    CurrentViewer(viewer): CurrentViewer,
    SessionToken(token): SessionToken,
) -> Result<Json<ApiResponse<CreatePostFormResponse>>, ApiError> {
    let prefill = match state.sessions.lazy_referring_page(&token).await {
        Some(page) if page == CREATE_POST_PAGE => {
            state.sessions.take_lazy(&token).await.and_then(|lazy| {
                match lazy.payload {
                    LazyPayload::TutorPostForm {
                        course_number,
                        major_short_name,
                        post_details,
                        image,
                    } => Some(PostPrefill {
                        course_number,
                        major_short_name,
                        post_details,
                        image_attached: image.is_some(),
                    }),
                    LazyPayload::MessageDraft { .. } => None,
                }
            })
        }
        _ => None,
    };

    let courses = CatalogRepository::new(state.db.pool()).course_options().await?;

    Ok(Json(ApiResponse::new(CreatePostFormResponse {
        viewer,
        courses,
        prefill,
    })))
}

/// POST /createTutorPost - create a post. Requires login.
///
/// When the submission carries no image but a captured draft with one is
/// still pending, the captured image is used (and the capture consumed).
pub async fn create_post_submit(
    State(state): State<AppState>,
    user: CurrentUser,
    SessionToken(token): SessionToken,
    multipart: Multipart,
) -> Result<Json<ApiResponse<CreatePostResponse>>, ApiError> {
    let mut form = read_post_form(multipart).await?;

    if form.image.is_none() {
        if let Some(lazy) = state.sessions.take_lazy(&token).await {
            if let LazyPayload::TutorPostForm { image, .. } = lazy.payload {
                form.image = image;
            }
        }
    }

    let post_id = create_post(
        state.db.pool(),
        CreatePostRequest {
            user_id: user.user_id,
            major_short_name: form.major_short_name,
            course_number: form.course_number,
            details: form.details,
            image: form.image,
        },
    )
    .await?;

    Ok(Json(ApiResponse::new(CreatePostResponse { post_id })))
}

/// POST /createTutorPost/loginFirst - capture a logged-out draft and send
/// the visitor through login.
pub async fn create_post_login_first(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    multipart: Multipart,
) -> Result<Redirect, ApiError> {
    let form = read_post_form(multipart).await?;

    state
        .sessions
        .set_lazy(
            &token,
            LazyRegistration {
                referring_page: CREATE_POST_PAGE.to_string(),
                payload: LazyPayload::TutorPostForm {
                    course_number: form.course_number,
                    major_short_name: form.major_short_name,
                    post_details: form.details,
                    image: form.image,
                },
            },
        )
        .await;

    Ok(Redirect::to("/login"))
}
