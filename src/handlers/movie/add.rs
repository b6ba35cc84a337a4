use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::{
    app::AppState,
    models::*,
    store::{end_transaction, Catalog},
    utils::{get_epoch_ts, new_id, parse_date, to_embed_url, AppError, ValidatedBody},
};

impl AddMovieReqBody {
    fn into_movie(self) -> Result<Movie, AppError> {
        let release_date = parse_date(&self.release_date, "releaseDate")?;
        let tags = self
            .tags
            .into_iter()
            .map(|tag| tag.trim().to_owned())
            .filter(|tag| !tag.is_empty())
            .collect();
        Ok(Movie {
            id: new_id(),
            title: self.title.trim().to_owned(),
            description: self.description.trim().to_owned(),
            release_date,
            rating: Some(self.rating),
            duration: Some(self.duration),
            genres: dedup_genres(self.genres),
            tags,
            trailer_link: to_embed_url(self.trailer_link.trim()),
            v_poster: Some(self.v_poster),
            h_poster: Some(self.h_poster),
            movie_link: Some(self.movie_link),
            created_ts: Some(get_epoch_ts()),
        })
    }
}

async fn add_movie(catalog: &dyn Catalog, movie: &Movie) -> Result<(), AppError> {
    let mut tx = catalog.begin().await?;
    let result = tx.insert_movie(movie).await.map_err(AppError::from);
    end_transaction(tx, result).await?;
    Ok(())
}

/// Add movie
///
/// Stores a single fully described movie, without any credits or clips
#[utoipa::path(
    post,
    path = "/api/v1/movie/add",
    request_body = AddMovieReqBody,
    responses(
        (status = StatusCode::CREATED, description = "Movie added", body = MovieResponse),
        (status = StatusCode::BAD_REQUEST, description = "Missing or invalid fields", body = GenericResponse)
    ),
    tag = "Movie API"
)]
pub async fn add_movie_handler(
    State(state): State<Arc<AppState>>,
    ValidatedBody(body): ValidatedBody<AddMovieReqBody>,
) -> Result<(StatusCode, Json<MovieResponse>), AppError> {
    let movie = body.into_movie()?;
    add_movie(state.catalog.as_ref(), &movie).await?;
    tracing::debug!("movie added: {}", movie.id);
    let res = MovieResponse {
        success: true,
        data: movie,
    };
    Ok((StatusCode::CREATED, Json(res)))
}
