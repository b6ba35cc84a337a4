use axum::{extract::State, Json};
use base64::{engine::general_purpose, Engine as _};
use std::sync::Arc;

use crate::{
    app::AppState,
    models::*,
    utils::{AppError, ValidatedBody},
};

/// Strips a `data:<mime>;base64,` prefix when the client sent a data url
fn raw_base64(image_data: &str) -> &str {
    match image_data.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => image_data,
    }
}

/// Upload an image
///
/// Stores a base64 encoded image in one of the image folders and returns
/// a signed url to read it
#[utoipa::path(
    post,
    path = "/api/v1/upload/image",
    request_body = UploadImageReqBody,
    responses(
        (status = StatusCode::OK, description = "upload successful", body = UploadImageResponse),
        (status = StatusCode::BAD_REQUEST, description = "Bad request", body = GenericResponse),
    ),
    tag = "Upload API"
)]
pub async fn upload_image_handler(
    State(state): State<Arc<AppState>>,
    ValidatedBody(body): ValidatedBody<UploadImageReqBody>,
) -> Result<Json<UploadImageResponse>, AppError> {
    let path = super::image_key(&body.folder, &body.image_name)?;
    let data = general_purpose::STANDARD
        .decode(raw_base64(body.image_data.trim()))
        .map_err(|err| {
            tracing::debug!("{:?}", err);
            AppError::BadRequestErr("imageData is not valid base64".into())
        })?;
    let url = state
        .storage
        .upload(data, &path, &body.image_type)
        .await?;
    tracing::debug!("image uploaded to {path}");
    let res = UploadImageResponse {
        success: true,
        url,
        path,
    };
    Ok(Json(res))
}
