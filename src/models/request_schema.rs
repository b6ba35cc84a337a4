use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use super::{Genre, Role, RoleInput};

/// request body schema for check person exists
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CheckPersonReqBody {
    #[validate(length(min = 1))]
    pub name: String,
}

/// request body schema for create person or merge roles into an existing one
///
/// When `isUpdate` is set `personId` is required and only `job` is used,
/// it is merged into the roles the person already has.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePersonReqBody {
    pub name: Option<String>,
    #[schema(value_type = Option<Vec<Role>>)]
    pub job: Option<RoleInput>,
    pub description: Option<String>,
    pub dob: Option<String>,
    pub death_date: Option<String>,
    pub image_urls: Option<Vec<String>>,
    #[validate(url)]
    pub profile_photo: Option<String>,
    pub is_update: Option<bool>,
    pub person_id: Option<String>,
}

/// request body schema for one person in a bulk import
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkPersonReq {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub job: Vec<Role>,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

/// request body schema for bulk person import, a plain JSON array
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct BulkPersonReqBody(pub Vec<BulkPersonReq>);

impl Validate for BulkPersonReqBody {
    fn validate(&self) -> Result<(), ValidationErrors> {
        for person in &self.0 {
            person.validate()?;
        }
        Ok(())
    }
}

/// cast row of the movie form, incomplete rows are skipped
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CastEntryReq {
    pub actor_id: Option<String>,
    pub character_name: Option<String>,
}

/// crew row of the movie form, incomplete rows are skipped
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrewEntryReq {
    pub crew_id: Option<String>,
    pub job_title: Option<String>,
}

/// clip row of the movie form, rows without title or link are skipped
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClipEntryReq {
    pub title: Option<String>,
    pub clip_link: Option<String>,
    /// seconds, a number or a numeric string, anything else counts as 0
    #[schema(value_type = Option<u32>)]
    pub duration: Option<Value>,
}

/// request body schema for create movie with its cast, crew & clips
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovieReqBody {
    pub title: Option<String>,
    pub description: Option<String>,
    /// `YYYY-MM-DD` or RFC 3339
    pub release_date: Option<String>,
    pub genres: Option<Vec<Genre>>,
    pub rating: Option<f64>,
    pub v_poster: Option<String>,
    pub h_poster: Option<String>,
    pub trailer_link: Option<String>,
    pub movie_link: Option<String>,
    pub tags: Option<Vec<String>>,
    pub duration: Option<u32>,
    pub cast: Option<Vec<CastEntryReq>>,
    pub crew: Option<Vec<CrewEntryReq>>,
    pub clips: Option<Vec<ClipEntryReq>>,
}

/// request body schema for the strict single movie insert, every field is required
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddMovieReqBody {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub release_date: String,
    pub genres: Vec<Genre>,
    #[validate(range(min = 0.0, max = 10.0))]
    pub rating: f64,
    #[validate(url)]
    pub v_poster: String,
    #[validate(url)]
    pub h_poster: String,
    #[validate(length(min = 1))]
    pub trailer_link: String,
    #[validate(length(min = 1))]
    pub movie_link: String,
    pub tags: Vec<String>,
    #[validate(range(min = 1))]
    pub duration: u32,
}

/// request body schema for assign a cast member to a movie
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCastReqBody {
    #[validate(length(min = 1))]
    pub movie_id: String,
    #[validate(length(min = 1))]
    pub cast_id: String,
    #[validate(length(min = 1))]
    pub character_name: String,
}

/// request body schema for assign a crew member to a movie
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCrewReqBody {
    #[validate(length(min = 1))]
    pub movie_id: String,
    #[validate(length(min = 1))]
    pub crew_id: String,
    #[validate(length(min = 1))]
    pub job_title: String,
}

/// request body schema for create clip
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClipReqBody {
    /// MOVIE, SERIES or SEASON
    #[serde(rename = "type")]
    #[validate(length(min = 1))]
    pub kind: String,
    #[validate(length(min = 1))]
    pub clip_link: String,
    #[validate(length(min = 1))]
    pub title: String,
    pub duration: Option<u32>,
}

/// request body schema for upload image
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadImageReqBody {
    /// base64 encoded file content
    #[validate(length(min = 1))]
    pub image_data: String,
    #[validate(length(min = 1))]
    pub image_name: String,
    #[validate(length(min = 1))]
    pub image_type: String,
    /// Actors, vPosters or hPosters
    #[validate(length(min = 1))]
    pub folder: String,
}

/// request body schema for create user
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserReqBody {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// request body schema for add review
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewReqBody {
    #[validate(length(min = 1))]
    pub review_text: String,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: f64,
}
