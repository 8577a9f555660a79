//! Home and search page handlers.

use axum::{
    extract::{Query, State},
    Json,
};

use crate::search::{list_categories, run_search};
use crate::web::dto::{ApiResponse, ListingResponse, SearchQuery};
use crate::web::error::ApiError;
use crate::web::middleware::{CurrentViewer, SessionToken};

use super::AppState;

/// GET / and GET /search - the tutor listing.
///
/// These pages are outside the lazy-registration detour, so any pending
/// capture is discarded here.
pub async fn listing(
    State(state): State<AppState>,
    CurrentViewer(viewer): CurrentViewer,
    SessionToken(token): SessionToken,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<ListingResponse>>, ApiError> {
    state.sessions.clear_lazy(&token).await;

    let categories = list_categories(state.db.pool()).await;
    let listing = run_search(state.db.pool(), &query.search, &query.category, query.page).await?;

    Ok(Json(ApiResponse::new(ListingResponse {
        viewer,
        categories,
        listing,
    })))
}
