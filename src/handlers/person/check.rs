use axum::{extract::State, Json};
use std::sync::Arc;

use super::helper::lookup_by_name;
use crate::{
    app::AppState,
    models::*,
    utils::{AppError, ValidatedBody},
};

/// Check person exists
///
/// Looks up a cast or crew member by name, ignoring the case
#[utoipa::path(
    post,
    path = "/api/v1/person/check",
    request_body = CheckPersonReqBody,
    responses(
        (status = StatusCode::OK, description = "Lookup done", body = CheckPersonResponse),
        (status = StatusCode::BAD_REQUEST, description = "Bad request", body = GenericResponse),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Store fault", body = GenericResponse)
    ),
    tag = "Person API"
)]
pub async fn check_person_handler(
    State(state): State<Arc<AppState>>,
    ValidatedBody(body): ValidatedBody<CheckPersonReqBody>,
) -> Result<Json<CheckPersonResponse>, AppError> {
    let person = lookup_by_name(state.catalog.as_ref(), &body.name).await?;
    let res = CheckPersonResponse {
        exists: person.is_some(),
        person,
    };
    Ok(Json(res))
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, http::StatusCode, routing::post, Router};
    use tower::ServiceExt; // for `oneshot` and `ready`

    use super::*;
    use crate::{
        app::test_support::memory_state,
        handlers::person::helper::create_or_merge_roles,
        store::MemoryCatalog,
    };

    fn check_request(name: &str) -> Request<Body> {
        Request::builder()
            .uri("/check")
            .method("POST")
            .header("Content-Type", "application/json")
            .body(Body::from(format!(r#"{{"name": "{name}"}}"#)))
            .unwrap()
    }

    #[tokio::test]
    async fn test_check_person_either_casing() {
        let catalog = MemoryCatalog::new();
        let tom = NewPerson {
            name: "Tom Hanks".to_owned(),
            roles: [Role::ACTOR].into_iter().collect(),
            ..Default::default()
        };
        create_or_merge_roles(&catalog, tom, None).await.unwrap();
        let app = Router::new()
            .route("/check", post(check_person_handler))
            .with_state(memory_state(&catalog));
        for name in ["Tom Hanks", "TOM HANKS", "tom hanks"] {
            let res = app.clone().oneshot(check_request(name)).await.unwrap();
            assert_eq!(res.status(), StatusCode::OK);
            let body = hyper::body::to_bytes(res.into_body()).await.unwrap();
            let res: CheckPersonResponse = serde_json::from_slice(&body).unwrap();
            assert_eq!(res.exists, true);
            assert_eq!(res.person.map(|p| p.name), Some("Tom Hanks".to_owned()));
        }
        let res = app.oneshot(check_request("Meg Ryan")).await.unwrap();
        let body = hyper::body::to_bytes(res.into_body()).await.unwrap();
        let res: CheckPersonResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(res.exists, false);
        assert!(res.person.is_none());
    }

    #[tokio::test]
    async fn test_check_person_empty_name() {
        let catalog = MemoryCatalog::new();
        let app = Router::new()
            .route("/check", post(check_person_handler))
            .with_state(memory_state(&catalog));
        let res = app.oneshot(check_request("")).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
