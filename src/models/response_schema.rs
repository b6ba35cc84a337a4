use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{
    Clip, Movie, MovieCastEntry, MovieCrewEntry, MovieSummary, Person, PersonSummary, Review,
    UserRespData,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenericResponse {
    pub success: bool,
    pub message: String,
}

/// response schema for check person exists
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckPersonResponse {
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person: Option<Person>,
}

/// response schema for create or merge person
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PersonResponse {
    pub success: bool,
    pub person: Person,
}

/// response schema for bulk person import
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BulkPersonResponse {
    pub success: bool,
    pub count: u64,
}

/// response schema for person listings
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PersonListResponse {
    pub success: bool,
    pub data: Vec<PersonSummary>,
}

/// nested entry of the movie form that was not persisted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct SkippedEntry {
    /// cast, crew or clips
    pub section: String,
    /// position of the entry in the submitted list
    pub index: usize,
    pub reason: String,
}

/// response schema for create movie
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateMovieResponse {
    pub success: bool,
    pub movie: Movie,
    pub skipped: Vec<SkippedEntry>,
}

/// response schema for a single movie
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MovieResponse {
    pub success: bool,
    pub data: Movie,
}

/// response schema for all movies
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MovieListResponse {
    pub success: bool,
    pub data: Vec<Movie>,
}

/// response schema for movie dropdown
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MovieSummaryResponse {
    pub success: bool,
    pub data: Vec<MovieSummary>,
}

/// response schema for the cast & crew of a movie
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MovieCreditsResponse {
    pub success: bool,
    pub cast: Vec<MovieCastEntry>,
    pub crew: Vec<MovieCrewEntry>,
    pub total: usize,
}

/// response schema for clips of a movie
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClipListResponse {
    pub success: bool,
    pub data: Vec<Clip>,
}

/// response schema for image upload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadImageResponse {
    pub success: bool,
    pub url: String,
    pub path: String,
}

/// response schema for create user
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub success: bool,
    pub data: UserRespData,
}

/// response schema for add review
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponse {
    pub success: bool,
    pub data: Review,
}
