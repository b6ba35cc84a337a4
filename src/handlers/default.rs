use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::models::GenericResponse;

fn status_response(message: &str) -> Json<GenericResponse> {
    Json(GenericResponse {
        success: true,
        message: message.to_owned(),
    })
}

/// Default route
///
/// Tells that the catalog API is up
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Server is up", body = GenericResponse)
    ),
    tag = "Debugging API"
)]
pub async fn default_route_handler() -> impl IntoResponse {
    (StatusCode::OK, status_response("Movie catalog API is running"))
}

/// Liveness check under the versioned prefix
#[utoipa::path(
    get,
    path = "/api/v1/ping",
    responses(
        (status = 200, description = "Server is up", body = GenericResponse)
    ),
    tag = "Debugging API"
)]
pub async fn ping_handler() -> Json<GenericResponse> {
    status_response("pong")
}
