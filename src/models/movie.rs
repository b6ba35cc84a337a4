use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Genre tags a movie can carry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[allow(non_camel_case_types)]
pub enum Genre {
    ACTION,
    ADVENTURE,
    COMEDY,
    DRAMA,
    FANTASY,
    HORROR,
    ROMANCE,
    MYSTERY,
    SCI_FI,
    THRILLER,
    DOCUMENTARY,
    ANIMATION,
    CRIME,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub release_date: DateTime<Utc>,

    /// 0 to 10
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    /// runtime in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,

    #[serde(default)]
    pub genres: Vec<Genre>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub trailer_link: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub v_poster: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub h_poster: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie_link: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_ts: Option<u64>,
}

/// Short projection used by the admin dropdowns
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovieSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub release_date: DateTime<Utc>,
}

impl Movie {
    pub fn to_summary(&self) -> MovieSummary {
        MovieSummary {
            id: self.id.to_owned(),
            title: self.title.to_owned(),
            release_date: self.release_date,
        }
    }
}

/// Keeps the first occurrence of every genre, in the given order
pub fn dedup_genres(genres: Vec<Genre>) -> Vec<Genre> {
    let mut uniq: Vec<Genre> = Vec::with_capacity(genres.len());
    for genre in genres {
        if !uniq.contains(&genre) {
            uniq.push(genre);
        }
    }
    uniq
}
