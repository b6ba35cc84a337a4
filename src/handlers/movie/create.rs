use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use super::helper::create_movie;
use crate::{
    app::AppState,
    models::*,
    utils::{AppError, ValidatedBody},
};

/// Create movie
///
/// Creates a movie along with its cast, crew and clips. Either the whole
/// graph is stored or nothing is. Nested entries that cannot be linked
/// are left out and listed in `skipped`.
#[utoipa::path(
    post,
    path = "/api/v1/movie",
    request_body = CreateMovieReqBody,
    responses(
        (status = StatusCode::CREATED, description = "Movie created", body = CreateMovieResponse),
        (status = StatusCode::BAD_REQUEST, description = "Missing or invalid fields", body = GenericResponse),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Nothing was stored", body = GenericResponse)
    ),
    tag = "Movie API"
)]
pub async fn create_movie_handler(
    State(state): State<Arc<AppState>>,
    ValidatedBody(body): ValidatedBody<CreateMovieReqBody>,
) -> Result<(StatusCode, Json<CreateMovieResponse>), AppError> {
    let created = create_movie(state.catalog.as_ref(), body).await?;
    let res = CreateMovieResponse {
        success: true,
        movie: created.movie,
        skipped: created.skipped,
    };
    Ok((StatusCode::CREATED, Json(res)))
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, routing::post, Router};
    use tower::ServiceExt; // for `oneshot` and `ready`

    use super::*;
    use crate::{
        app::test_support::memory_state,
        store::{Catalog, MemoryCatalog},
    };

    fn req_body(body: &str) -> Request<Body> {
        Request::builder()
            .uri("/movie")
            .method("POST")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_movie_handler() {
        let catalog = MemoryCatalog::new();
        let app = Router::new()
            .route("/movie", post(create_movie_handler))
            .with_state(memory_state(&catalog));
        let body = r#"{
            "title": "Dune",
            "description": "Spice must flow",
            "releaseDate": "2021-10-22",
            "genres": ["SCI_FI", "ADVENTURE"],
            "trailerLink": "https://youtu.be/n9xhJrPXop4",
            "cast": [{"actorId": "unknown", "characterName": "Paul"}],
            "clips": [{"title": "Teaser", "clipLink": "https://youtu.be/abc12345678", "duration": "60"}]
        }"#;
        let res = app.clone().oneshot(req_body(body)).await.unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        let bytes = hyper::body::to_bytes(res.into_body()).await.unwrap();
        let res: CreateMovieResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(res.success, true);
        assert_eq!(res.movie.trailer_link, "https://www.youtube.com/embed/n9xhJrPXop4");
        assert_eq!(res.skipped.len(), 1);
        assert_eq!(res.skipped[0].section, "cast");
        let clips = catalog
            .list_clips(&MediaRef::movie(&res.movie.id))
            .await
            .unwrap();
        assert_eq!(clips[0].duration, 60);
    }

    #[tokio::test]
    async fn test_create_movie_handler_bad_request() {
        let catalog = MemoryCatalog::new();
        let app = Router::new()
            .route("/movie", post(create_movie_handler))
            .with_state(memory_state(&catalog));
        let res = app
            .clone()
            .oneshot(req_body(r#"{"title": "Dune", "description": "Spice"}"#))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let bytes = hyper::body::to_bytes(res.into_body()).await.unwrap();
        let res: GenericResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            res.message,
            "Missing required fields: title, description, or releaseDate"
        );

        let body = r#"{"title": "Dune", "description": "Spice", "releaseDate": "2021-10-22", "genres": ["WESTERN"]}"#;
        let res = app.oneshot(req_body(body)).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(catalog.row_counts().await.movies, 0);
    }
}
