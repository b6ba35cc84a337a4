use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::{
    app::AppState,
    handlers::clip::helper::{parse_media_kind, reference_exists},
    models::*,
    store::{end_transaction, Catalog, CatalogTx},
    utils::{AppError, ValidatedBody},
};

/// Only movies and seasons can be reviewed
fn review_target(kind: &str, id: &str) -> Result<MediaRef, AppError> {
    match parse_media_kind(kind)? {
        kind @ (MediaKind::MOVIE | MediaKind::SEASON) => Ok(MediaRef::new(kind, id)),
        MediaKind::SERIES => {
            let err = "Invalid type `SERIES`. Must be MOVIE or SEASON";
            Err(AppError::BadRequestErr(err.into()))
        }
    }
}

async fn insert_review(tx: &mut dyn CatalogTx, review: &Review) -> Result<(), AppError> {
    if tx.find_user(&review.author_id).await?.is_none() {
        return Err(AppError::NotFound("User not found".into()));
    }
    let target = &review.target;
    let kind = target.kind.to_string();
    if !reference_exists(tx, &kind, &target.reference_id).await? {
        let err = format!("{kind} with ID {} does not exist", target.reference_id);
        return Err(AppError::NotFound(err));
    }
    tx.insert_review(review).await?;
    Ok(())
}

pub async fn create_review(
    catalog: &dyn Catalog,
    user_id: &str,
    kind: &str,
    id: &str,
    body: &CreateReviewReqBody,
) -> Result<Review, AppError> {
    let target = review_target(kind, id)?;
    let review = Review::new(target, user_id, &body.review_text, body.rating);
    let mut tx = catalog.begin().await?;
    let result = insert_review(tx.as_mut(), &review).await;
    end_transaction(tx, result).await?;
    Ok(review)
}

/// Add review
///
/// Adds a user's review of a movie or a season, rated from 0 to 5
#[utoipa::path(
    post,
    path = "/api/v1/user/{user_id}/{kind}/{id}/review",
    params(
        ("user_id" = String, Path, description = "Author id"),
        ("kind" = String, Path, description = "MOVIE or SEASON"),
        ("id" = String, Path, description = "Id of the reviewed movie or season")
    ),
    request_body = CreateReviewReqBody,
    responses(
        (status = StatusCode::CREATED, description = "Review added", body = ReviewResponse),
        (status = StatusCode::BAD_REQUEST, description = "Bad request", body = GenericResponse),
        (status = StatusCode::NOT_FOUND, description = "User or reviewed item not found", body = GenericResponse)
    ),
    tag = "User API"
)]
pub async fn create_review_handler(
    State(state): State<Arc<AppState>>,
    Path((user_id, kind, id)): Path<(String, String, String)>,
    ValidatedBody(body): ValidatedBody<CreateReviewReqBody>,
) -> Result<(StatusCode, Json<ReviewResponse>), AppError> {
    let review = create_review(state.catalog.as_ref(), &user_id, &kind, &id, &body).await?;
    let res = ReviewResponse {
        success: true,
        data: review,
    };
    Ok((StatusCode::CREATED, Json(res)))
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, routing::post, Router};
    use serde_json::json;
    use tower::ServiceExt; // for `oneshot` and `ready`

    use super::*;
    use crate::{
        app::test_support::memory_state,
        handlers::{credit::helper::tests::sample_movie, user::create::create_user},
        store::MemoryCatalog,
        utils::new_id,
    };

    async fn seed(catalog: &MemoryCatalog) -> (String, String, String) {
        let user = CreateUserReqBody {
            name: "Ada".to_owned(),
            username: "ada".to_owned(),
            email: "ada@example.com".to_owned(),
            password: "pw".to_owned(),
        };
        let user = create_user(catalog, user).await.unwrap();
        let movie = sample_movie("Dune");
        let mut tx = catalog.begin().await.unwrap();
        tx.insert_movie(&movie).await.unwrap();
        tx.commit().await.unwrap();
        let season = Season {
            id: new_id(),
            series_id: new_id(),
            season_number: 1,
            title: "Season 1".to_owned(),
        };
        let season_id = season.id.to_owned();
        catalog.seed_season(season).await;
        (user.id, movie.id, season_id)
    }

    fn req_body(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .method("POST")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_review_handler() {
        let catalog = MemoryCatalog::new();
        let (user_id, movie_id, season_id) = seed(&catalog).await;
        let app = Router::new()
            .route("/user/:user_id/:kind/:id/review", post(create_review_handler))
            .with_state(memory_state(&catalog));
        let body = json!({"reviewText": "Spice!", "rating": 4.5});

        let uri = format!("/user/{user_id}/MOVIE/{movie_id}/review");
        let res = app.clone().oneshot(req_body(&uri, body.clone())).await.unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        let bytes = hyper::body::to_bytes(res.into_body()).await.unwrap();
        let res: ReviewResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(res.data.target, MediaRef::movie(&movie_id));
        assert_eq!(res.data.author_id, user_id);

        let uri = format!("/user/{user_id}/SEASON/{season_id}/review");
        let res = app.clone().oneshot(req_body(&uri, body.clone())).await.unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(catalog.row_counts().await.reviews, 2);
    }

    #[tokio::test]
    async fn test_create_review_handler_errors() {
        let catalog = MemoryCatalog::new();
        let (user_id, movie_id, _) = seed(&catalog).await;
        let app = Router::new()
            .route("/user/:user_id/:kind/:id/review", post(create_review_handler))
            .with_state(memory_state(&catalog));
        let body = json!({"reviewText": "Spice!", "rating": 4.5});

        let uri = format!("/user/{user_id}/SERIES/{movie_id}/review");
        let res = app.clone().oneshot(req_body(&uri, body.clone())).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let uri = format!("/user/{user_id}/EPISODE/{movie_id}/review");
        let res = app.clone().oneshot(req_body(&uri, body.clone())).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let uri = format!("/user/missing/MOVIE/{movie_id}/review");
        let res = app.clone().oneshot(req_body(&uri, body.clone())).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let uri = format!("/user/{user_id}/MOVIE/missing/review");
        let res = app.clone().oneshot(req_body(&uri, body)).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        // movie ratings go up to 10, reviews only to 5
        let uri = format!("/user/{user_id}/MOVIE/{movie_id}/review");
        let body = json!({"reviewText": "Spice!", "rating": 8});
        let res = app.oneshot(req_body(&uri, body)).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(catalog.row_counts().await.reviews, 0);
    }
}
