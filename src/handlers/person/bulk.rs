use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use super::helper::create_many;
use crate::{
    app::AppState,
    models::*,
    utils::{AppError, ValidatedBody},
};

impl From<BulkPersonReq> for NewPerson {
    fn from(req: BulkPersonReq) -> Self {
        Self {
            name: req.name,
            roles: req.job.into_iter().collect(),
            description: Some(req.description),
            image_urls: req.image_urls,
            ..Default::default()
        }
    }
}

/// Bulk create persons
///
/// Imports a list of persons, names that already exist are skipped
#[utoipa::path(
    post,
    path = "/api/v1/person/bulk",
    request_body = BulkPersonReqBody,
    responses(
        (status = StatusCode::CREATED, description = "Persons imported", body = BulkPersonResponse),
        (status = StatusCode::BAD_REQUEST, description = "Bad request", body = GenericResponse)
    ),
    tag = "Person API"
)]
pub async fn bulk_create_persons_handler(
    State(state): State<Arc<AppState>>,
    ValidatedBody(body): ValidatedBody<BulkPersonReqBody>,
) -> Result<(StatusCode, Json<BulkPersonResponse>), AppError> {
    if body.0.is_empty() {
        return Err(AppError::BadRequestErr("No persons to import".into()));
    }
    let persons = body.0.into_iter().map(NewPerson::from).collect();
    let count = create_many(state.catalog.as_ref(), persons).await?;
    tracing::debug!("bulk import created {count} persons");
    let res = BulkPersonResponse {
        success: true,
        count,
    };
    Ok((StatusCode::CREATED, Json(res)))
}
