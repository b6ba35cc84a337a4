use axum::{
    extract::{Path, State},
    Json,
};
use std::{collections::HashMap, sync::Arc};

use crate::{app::AppState, models::*, store::Catalog, utils::AppError};

async fn movie_credits(
    catalog: &dyn Catalog,
    movie_id: &str,
) -> Result<MovieCreditsResponse, AppError> {
    if catalog.find_movie(movie_id).await?.is_none() {
        return Err(AppError::NotFound("Movie not found".into()));
    }
    let cast_rows = catalog.list_cast(movie_id).await?;
    let crew_rows = catalog.list_crew(movie_id).await?;
    let mut person_ids: Vec<String> = cast_rows
        .iter()
        .map(|c| c.person_id.to_owned())
        .chain(crew_rows.iter().map(|c| c.person_id.to_owned()))
        .collect();
    person_ids.sort();
    person_ids.dedup();
    let persons: HashMap<String, Person> = catalog
        .find_persons(&person_ids)
        .await?
        .into_iter()
        .map(|p| (p.id.to_owned(), p))
        .collect();

    // rows whose person has vanished are left out
    let mut cast: Vec<MovieCastEntry> = cast_rows
        .into_iter()
        .filter_map(|row| {
            let person = persons.get(&row.person_id)?;
            Some(MovieCastEntry {
                id: row.id,
                character_name: row.character_name,
                cast_id: row.person_id,
                person: person.into(),
            })
        })
        .collect();
    cast.sort_by(|a, b| a.character_name.cmp(&b.character_name));
    let mut crew: Vec<MovieCrewEntry> = crew_rows
        .into_iter()
        .filter_map(|row| {
            let person = persons.get(&row.person_id)?;
            Some(MovieCrewEntry {
                id: row.id,
                job_title: row.job_title,
                crew_id: row.person_id,
                person: person.into(),
            })
        })
        .collect();
    crew.sort_by(|a, b| a.job_title.cmp(&b.job_title));
    let total = cast.len() + crew.len();
    Ok(MovieCreditsResponse {
        success: true,
        cast,
        crew,
        total,
    })
}

/// Get movie credits
///
/// Cast sorted by character name and crew sorted by job title, each entry
/// carrying the person details
#[utoipa::path(
    get,
    path = "/api/v1/movie/{id}/credits",
    params(
        ("id" = String, Path, description = "Movie id")
    ),
    responses(
        (status = StatusCode::OK, description = "Cast and crew", body = MovieCreditsResponse),
        (status = StatusCode::NOT_FOUND, description = "Movie not found", body = GenericResponse)
    ),
    tag = "Movie API"
)]
pub async fn movie_credits_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MovieCreditsResponse>, AppError> {
    let res = movie_credits(state.catalog.as_ref(), &id).await?;
    Ok(Json(res))
}
