use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use super::helper::add_cast;
use crate::{
    app::AppState,
    models::*,
    utils::{AppError, ValidatedBody},
};

/// Add cast
///
/// Assigns an existing person to an existing movie as a character
#[utoipa::path(
    post,
    path = "/api/v1/movie/cast",
    request_body = AddCastReqBody,
    responses(
        (status = StatusCode::CREATED, description = "Cast member assigned", body = CastCredit),
        (status = StatusCode::BAD_REQUEST, description = "Bad request", body = GenericResponse),
        (status = StatusCode::NOT_FOUND, description = "Movie or person not found", body = GenericResponse),
        (status = StatusCode::CONFLICT, description = "Already assigned", body = GenericResponse)
    ),
    tag = "Movie API"
)]
pub async fn add_cast_handler(
    State(state): State<Arc<AppState>>,
    ValidatedBody(body): ValidatedBody<AddCastReqBody>,
) -> Result<(StatusCode, Json<CastCredit>), AppError> {
    let credit = add_cast(
        state.catalog.as_ref(),
        &body.movie_id,
        &body.cast_id,
        &body.character_name,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(credit)))
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, routing::post, Router};
    use tower::ServiceExt; // for `oneshot` and `ready`

    use super::*;
    use crate::{
        app::test_support::memory_state, handlers::credit::helper::tests::seed_movie_and_person,
        store::MemoryCatalog,
    };

    fn req_body(body: String) -> Request<Body> {
        Request::builder()
            .uri("/movie/cast")
            .method("POST")
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_add_cast_handler() {
        let catalog = MemoryCatalog::new();
        let (movie_id, person_id) = seed_movie_and_person(&catalog, Role::ACTOR).await;
        let app = Router::new()
            .route("/movie/cast", post(add_cast_handler))
            .with_state(memory_state(&catalog));
        let body = format!(
            r#"{{"movieId": "{movie_id}", "castId": "{person_id}", "characterName": "Paul"}}"#
        );
        let res = app.clone().oneshot(req_body(body.clone())).await.unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        let bytes = hyper::body::to_bytes(res.into_body()).await.unwrap();
        let credit: CastCredit = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(credit.assignment.movie_id, movie_id);
        assert_eq!(credit.movie_title, "Dune");

        let res = app.clone().oneshot(req_body(body)).await.unwrap();
        assert_eq!(res.status(), StatusCode::CONFLICT);

        let body = format!(r#"{{"movieId": "{movie_id}", "castId": "{person_id}"}}"#);
        let res = app.clone().oneshot(req_body(body)).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body = format!(
            r#"{{"movieId": "missing", "castId": "{person_id}", "characterName": "Paul"}}"#
        );
        let res = app.oneshot(req_body(body)).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
