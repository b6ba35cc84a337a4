use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::{app::AppState, models::*, utils::AppError};

/// Get all movies
///
/// Newest movies first
#[utoipa::path(
    get,
    path = "/api/v1/movie",
    responses(
        (status = StatusCode::OK, description = "All movies", body = MovieListResponse),
    ),
    tag = "Movie API"
)]
pub async fn list_movies_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MovieListResponse>, AppError> {
    let movies = state.catalog.list_movies().await?;
    let res = MovieListResponse {
        success: true,
        data: movies,
    };
    Ok(Json(res))
}

/// Get movie dropdown
///
/// Id, title and release date of every movie, sorted by title
#[utoipa::path(
    get,
    path = "/api/v1/movie/list",
    responses(
        (status = StatusCode::OK, description = "Movie summaries", body = MovieSummaryResponse),
    ),
    tag = "Movie API"
)]
pub async fn movie_summaries_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MovieSummaryResponse>, AppError> {
    let movies = state.catalog.list_movies().await?;
    let mut data: Vec<MovieSummary> = movies.iter().map(Movie::to_summary).collect();
    data.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
    Ok(Json(MovieSummaryResponse {
        success: true,
        data,
    }))
}

/// Get movie by id
#[utoipa::path(
    get,
    path = "/api/v1/movie/{id}",
    params(
        ("id" = String, Path, description = "Movie id")
    ),
    responses(
        (status = StatusCode::OK, description = "Movie details", body = MovieResponse),
        (status = StatusCode::NOT_FOUND, description = "Movie not found", body = GenericResponse)
    ),
    tag = "Movie API"
)]
pub async fn get_movie_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MovieResponse>, AppError> {
    let movie = state
        .catalog
        .find_movie(&id)
        .await?
        .ok_or(AppError::NotFound("Movie not found".into()))?;
    Ok(Json(MovieResponse {
        success: true,
        data: movie,
    }))
}
