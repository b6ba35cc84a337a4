use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    app::AppState,
    models::*,
    utils::AppError,
};

async fn list_summaries(
    state: &AppState,
    roles: Option<&[Role]>,
    with_job: bool,
) -> Result<Json<PersonListResponse>, AppError> {
    let persons = state.catalog.list_persons(roles).await?;
    let data = persons.iter().map(|p| p.to_summary(with_job)).collect();
    let res = PersonListResponse {
        success: true,
        data,
    };
    Ok(Json(res))
}

/// List persons
///
/// Every cast and crew member with its jobs, sorted by name
#[utoipa::path(
    get,
    path = "/api/v1/person",
    responses(
        (status = StatusCode::OK, description = "All persons", body = PersonListResponse)
    ),
    tag = "Person API"
)]
pub async fn list_persons_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PersonListResponse>, AppError> {
    list_summaries(&state, None, true).await
}

/// List actors
///
/// Persons holding the ACTOR role, sorted by name
#[utoipa::path(
    get,
    path = "/api/v1/person/actors",
    responses(
        (status = StatusCode::OK, description = "All actors", body = PersonListResponse)
    ),
    tag = "Person API"
)]
pub async fn list_actors_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PersonListResponse>, AppError> {
    list_summaries(&state, Some(&[Role::ACTOR][..]), false).await
}

/// List crew members
///
/// Persons holding any crew role, sorted by name
#[utoipa::path(
    get,
    path = "/api/v1/person/crew",
    responses(
        (status = StatusCode::OK, description = "All crew members", body = PersonListResponse)
    ),
    tag = "Person API"
)]
pub async fn list_crew_members_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PersonListResponse>, AppError> {
    list_summaries(&state, Some(&CREW_ROLES[..]), true).await
}
