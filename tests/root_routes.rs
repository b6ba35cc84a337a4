use axum::http::StatusCode;
use tower::ServiceExt; // for `oneshot` and `ready`

use movie_catalog_backend::store::MemoryCatalog;

mod helper;
use helper::*;

#[tokio::test]
async fn test_default_route_handler() {
    let app = test_app(&MemoryCatalog::new());
    let res = app.oneshot(build_get_request("/")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let default_res: GenericResponse = body_json(res).await;
    assert_eq!(default_res.success, true);
    assert_eq!(default_res.message, "Movie catalog API is running".to_owned());
}

#[tokio::test]
async fn test_global_404_handler() {
    let app = test_app(&MemoryCatalog::new());
    let res = app
        .oneshot(build_get_request("/a-not-exiting-path"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let res_404: GenericResponse = body_json(res).await;
    assert_eq!(res_404.success, false);
    assert_eq!(res_404.message, "Route `/a-not-exiting-path` does not exist");
}

#[tokio::test]
async fn test_ping_handler() {
    let app = test_app(&MemoryCatalog::new());
    let res = app.oneshot(build_get_request("/api/v1/ping")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let res: GenericResponse = body_json(res).await;
    assert_eq!(res.success, true);
    assert_eq!(res.message.as_str(), "pong");
}

#[tokio::test]
async fn test_openapi_json_is_served() {
    let app = test_app(&MemoryCatalog::new());
    let res = app
        .oneshot(build_get_request("/api-docs/openapi.json"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let doc: serde_json::Value = body_json(res).await;
    assert!(doc["paths"]["/api/v1/movie"].is_object());
}
