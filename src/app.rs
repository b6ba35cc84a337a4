use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    http::StatusCode,
    routing::{get, post},
    BoxError, Json, Router,
};
use std::{sync::Arc, time::Duration};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    constants::*, handlers::*, models::GenericResponse, storage::ObjectStorage, store::Catalog,
    swagger::ApiDoc,
};

/// Shared handles given to every handler
pub struct AppState {
    pub catalog: Arc<dyn Catalog>,
    pub storage: Arc<dyn ObjectStorage>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn Catalog>, storage: Arc<dyn ObjectStorage>) -> Self {
        Self { catalog, storage }
    }
}

pub fn build_app(state: Arc<AppState>) -> Router {
    tracing::debug!("Initializing the app");
    let api_routes = Router::new()
        .route("/ping", get(ping_handler))
        .route("/person", post(create_person_handler).get(list_persons_handler))
        .route("/person/check", post(check_person_handler))
        .route("/person/bulk", post(bulk_create_persons_handler))
        .route("/person/actors", get(list_actors_handler))
        .route("/person/crew", get(list_crew_members_handler))
        .route("/movie", post(create_movie_handler).get(list_movies_handler))
        .route("/movie/add", post(add_movie_handler))
        .route("/movie/list", get(movie_summaries_handler))
        .route("/movie/cast", post(add_cast_handler))
        .route("/movie/crew", post(add_crew_handler))
        .route("/movie/:id", get(get_movie_handler))
        .route("/movie/:id/credits", get(movie_credits_handler))
        .route("/clip/:id", post(create_clip_handler).get(get_clips_handler))
        .route(
            "/upload/image",
            post(upload_image_handler).layer(DefaultBodyLimit::max(IMAGE_UPLOAD_BODY_LIMIT)),
        )
        .route("/user", post(create_user_handler))
        .route("/user/:user_id/:kind/:id/review", post(create_review_handler));

    Router::new()
        .route("/", get(default_route_handler))
        .nest("/api/v1", api_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(global_404_handler)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout_error))
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn handle_timeout_error(err: BoxError) -> (StatusCode, Json<GenericResponse>) {
    if err.is::<tower::timeout::error::Elapsed>() {
        let res = GenericResponse {
            success: false,
            message: "Request timed out".to_owned(),
        };
        return (StatusCode::REQUEST_TIMEOUT, Json(res));
    }
    tracing::error!("unhandled middleware error: {err}");
    let res = GenericResponse {
        success: false,
        message: "Something went wrong".to_owned(),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(res))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use super::AppState;
    use crate::{storage::MockObjectStorage, store::MemoryCatalog};

    /// State over an in-memory catalog, with an object storage expecting no call
    pub fn memory_state(catalog: &MemoryCatalog) -> Arc<AppState> {
        memory_state_with_storage(catalog, MockObjectStorage::new())
    }

    pub fn memory_state_with_storage(
        catalog: &MemoryCatalog,
        storage: MockObjectStorage,
    ) -> Arc<AppState> {
        Arc::new(AppState::new(Arc::new(catalog.clone()), Arc::new(storage)))
    }
}
