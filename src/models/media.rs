use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

/// Kind of catalog entity a clip or review points at
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[allow(non_camel_case_types)]
pub enum MediaKind {
    MOVIE,
    SERIES,
    SEASON,
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MOVIE" => Ok(Self::MOVIE),
            "SERIES" => Ok(Self::SERIES),
            "SEASON" => Ok(Self::SEASON),
            _ => Err(format!(
                "Invalid type `{s}`. Must be MOVIE, SERIES, or SEASON"
            )),
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::MOVIE => "MOVIE",
            Self::SERIES => "SERIES",
            Self::SEASON => "SEASON",
        };
        write!(f, "{s}")
    }
}

/// Tagged reference to the entity owning a clip or a review
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaRef {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub reference_id: String,
}

impl MediaRef {
    pub fn new(kind: MediaKind, reference_id: &str) -> Self {
        Self {
            kind,
            reference_id: reference_id.to_owned(),
        }
    }

    pub fn movie(movie_id: &str) -> Self {
        Self::new(MediaKind::MOVIE, movie_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    #[serde(rename = "_id")]
    pub id: String,
    pub series_id: String,
    pub season_number: u32,
    pub title: String,
}
