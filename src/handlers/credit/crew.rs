use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use super::helper::add_crew;
use crate::{
    app::AppState,
    models::*,
    utils::{AppError, ValidatedBody},
};

/// Add crew
///
/// Assigns an existing person to an existing movie with a job title. The
/// same person can hold several jobs on one movie.
#[utoipa::path(
    post,
    path = "/api/v1/movie/crew",
    request_body = AddCrewReqBody,
    responses(
        (status = StatusCode::CREATED, description = "Crew member assigned", body = CrewCredit),
        (status = StatusCode::BAD_REQUEST, description = "Bad request", body = GenericResponse),
        (status = StatusCode::NOT_FOUND, description = "Movie or person not found", body = GenericResponse),
        (status = StatusCode::CONFLICT, description = "Already holds this job", body = GenericResponse)
    ),
    tag = "Movie API"
)]
pub async fn add_crew_handler(
    State(state): State<Arc<AppState>>,
    ValidatedBody(body): ValidatedBody<AddCrewReqBody>,
) -> Result<(StatusCode, Json<CrewCredit>), AppError> {
    let credit = add_crew(
        state.catalog.as_ref(),
        &body.movie_id,
        &body.crew_id,
        &body.job_title,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(credit)))
}
