use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::{app::AppState, models::*, utils::AppError};

/// Get clips
///
/// Clips attached to the movie `id`
#[utoipa::path(
    get,
    path = "/api/v1/clip/{id}",
    params(("id" = String, Path, description = "Movie id")),
    responses(
        (status = StatusCode::OK, description = "Clips of the movie", body = ClipListResponse)
    ),
    tag = "Clip API"
)]
pub async fn get_clips_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ClipListResponse>, AppError> {
    let data = state.catalog.list_clips(&MediaRef::movie(&id)).await?;
    let res = ClipListResponse {
        success: true,
        data,
    };
    Ok(Json(res))
}
