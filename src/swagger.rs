use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::default::ping_handler,
        crate::handlers::default::default_route_handler,
        crate::handlers::person::create::create_person_handler,
        crate::handlers::person::check::check_person_handler,
        crate::handlers::person::bulk::bulk_create_persons_handler,
        crate::handlers::person::list::list_persons_handler,
        crate::handlers::person::list::list_actors_handler,
        crate::handlers::person::list::list_crew_members_handler,
        crate::handlers::movie::create::create_movie_handler,
        crate::handlers::movie::add::add_movie_handler,
        crate::handlers::movie::get_movie::list_movies_handler,
        crate::handlers::movie::get_movie::movie_summaries_handler,
        crate::handlers::movie::get_movie::get_movie_handler,
        crate::handlers::movie::credits::movie_credits_handler,
        crate::handlers::credit::cast::add_cast_handler,
        crate::handlers::credit::crew::add_crew_handler,
        crate::handlers::clip::create::create_clip_handler,
        crate::handlers::clip::get_clip::get_clips_handler,
        crate::handlers::upload::image::upload_image_handler,
        crate::handlers::user::create::create_user_handler,
        crate::handlers::user::review::create_review_handler,
    ),
    components(
        schemas(
            crate::models::CheckPersonReqBody,
            crate::models::CreatePersonReqBody,
            crate::models::BulkPersonReq,
            crate::models::BulkPersonReqBody,
            crate::models::CreateMovieReqBody,
            crate::models::CastEntryReq,
            crate::models::CrewEntryReq,
            crate::models::ClipEntryReq,
            crate::models::AddMovieReqBody,
            crate::models::AddCastReqBody,
            crate::models::AddCrewReqBody,
            crate::models::CreateClipReqBody,
            crate::models::UploadImageReqBody,
            crate::models::CreateUserReqBody,
            crate::models::CreateReviewReqBody,

            crate::models::GenericResponse,
            crate::models::CheckPersonResponse,
            crate::models::PersonResponse,
            crate::models::BulkPersonResponse,
            crate::models::PersonListResponse,
            crate::models::SkippedEntry,
            crate::models::CreateMovieResponse,
            crate::models::MovieResponse,
            crate::models::MovieListResponse,
            crate::models::MovieSummaryResponse,
            crate::models::MovieCreditsResponse,
            crate::models::ClipListResponse,
            crate::models::UploadImageResponse,
            crate::models::UserResponse,
            crate::models::ReviewResponse,

            crate::models::Person,
            crate::models::PersonSummary,
            crate::models::Role,
            crate::models::Movie,
            crate::models::MovieSummary,
            crate::models::Genre,
            crate::models::CastAssignment,
            crate::models::CrewAssignment,
            crate::models::CastCredit,
            crate::models::CrewCredit,
            crate::models::CreditPerson,
            crate::models::MovieCastEntry,
            crate::models::MovieCrewEntry,
            crate::models::MediaKind,
            crate::models::MediaRef,
            crate::models::Clip,
            crate::models::UserRespData,
            crate::models::Review,
        )
    ),
    tags(
        (name = "Debugging API", description = "API for debugging purposes"),
        (name = "Person API", description = "Cast and crew registry"),
        (name = "Movie API", description = "Movies and their cast & crew"),
        (name = "Clip API", description = "Clips of movies, series and seasons"),
        (name = "Upload API", description = "Image uploads"),
        (name = "User API", description = "Users and their reviews")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_catalog_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/api/v1/movie"));
        assert!(paths.contains_key("/api/v1/person"));
        assert!(paths.contains_key("/api/v1/movie/{id}/credits"));
        assert!(paths.contains_key("/api/v1/clip/{id}"));
    }
}
