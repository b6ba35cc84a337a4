use axum::http::{StatusCode, Uri};
use axum::Json;

use crate::models::GenericResponse;

/// Fallback for every unknown route
pub async fn global_404_handler(uri: Uri) -> (StatusCode, Json<GenericResponse>) {
    let message = format!("Route `{}` does not exist", uri.path());
    tracing::debug!("{message}");
    let res = GenericResponse {
        success: false,
        message,
    };
    (StatusCode::NOT_FOUND, Json(res))
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, routing::get, Router};
    use tower::ServiceExt; // for `oneshot` and `ready`

    use super::*;

    #[tokio::test]
    async fn test_global_404_handler() {
        let app = Router::new()
            .route("/", get(|| async {}))
            .fallback(global_404_handler);
        let req = Request::builder()
            .uri("/a-not-exiting-path?x=1")
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body = hyper::body::to_bytes(res.into_body()).await.unwrap();
        let res_404: GenericResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(res_404.success, false);
        assert_eq!(res_404.message, "Route `/a-not-exiting-path` does not exist");
    }
}
