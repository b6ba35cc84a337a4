use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::helper::{create_clip, parse_media_kind};
use crate::{
    app::AppState,
    models::*,
    utils::{AppError, ValidatedBody},
};

/// Create clip
///
/// Adds a clip to the movie, series or season `id`, picked by `type`
#[utoipa::path(
    post,
    path = "/api/v1/clip/{id}",
    params(("id" = String, Path, description = "Id of the movie, series or season")),
    request_body = CreateClipReqBody,
    responses(
        (status = StatusCode::CREATED, description = "Clip created", body = Clip),
        (status = StatusCode::BAD_REQUEST, description = "Bad request", body = GenericResponse),
        (status = StatusCode::NOT_FOUND, description = "Parent not found", body = GenericResponse)
    ),
    tag = "Clip API"
)]
pub async fn create_clip_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ValidatedBody(body): ValidatedBody<CreateClipReqBody>,
) -> Result<(StatusCode, Json<Clip>), AppError> {
    let parent = MediaRef::new(parse_media_kind(&body.kind)?, &id);
    let clip = create_clip(
        state.catalog.as_ref(),
        parent,
        &body.title,
        &body.clip_link,
        body.duration,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(clip)))
}
