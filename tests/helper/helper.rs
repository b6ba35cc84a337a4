use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response, Router};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;

use movie_catalog_backend::{
    app::{build_app, AppState},
    storage::ObjectStorage,
    store::MemoryCatalog,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct GenericResponse {
    pub success: bool,
    pub message: String,
}

/// Object storage answering with a fake signed url
struct FakeStorage;

#[async_trait]
impl ObjectStorage for FakeStorage {
    async fn upload(&self, _data: Vec<u8>, path: &str, _: &str) -> anyhow::Result<String> {
        Ok(format!("https://storage.test/{path}?signature=test"))
    }
}

/// Full application over the given in-memory catalog
pub fn test_app(catalog: &MemoryCatalog) -> Router {
    let state = AppState::new(Arc::new(catalog.clone()), Arc::new(FakeStorage));
    build_app(Arc::new(state))
}

pub fn build_post_request(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

pub fn build_get_request(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

pub async fn body_json<T: DeserializeOwned>(res: Response) -> T {
    let body = hyper::body::to_bytes(res.into_body()).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}
