use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use utoipa::ToSchema;

use super::{Person, Role};
use crate::utils::{get_epoch_ts, new_id};

/// A person playing a character in a movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CastAssignment {
    #[serde(rename = "_id")]
    pub id: String,
    pub movie_id: String,
    pub person_id: String,
    pub character_name: String,
    pub created_ts: Option<u64>,
}

/// A person holding a job on a movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrewAssignment {
    #[serde(rename = "_id")]
    pub id: String,
    pub movie_id: String,
    pub person_id: String,
    pub job_title: String,
    pub created_ts: Option<u64>,
}

impl CastAssignment {
    pub fn new(movie_id: &str, person_id: &str, character_name: &str) -> Self {
        Self {
            id: new_id(),
            movie_id: movie_id.to_owned(),
            person_id: person_id.to_owned(),
            character_name: character_name.to_owned(),
            created_ts: Some(get_epoch_ts()),
        }
    }
}

impl CrewAssignment {
    pub fn new(movie_id: &str, person_id: &str, job_title: &str) -> Self {
        Self {
            id: new_id(),
            movie_id: movie_id.to_owned(),
            person_id: person_id.to_owned(),
            job_title: job_title.to_owned(),
            created_ts: Some(get_epoch_ts()),
        }
    }
}

/// Cast assignment joined with the movie title and the person name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CastCredit {
    #[serde(flatten)]
    pub assignment: CastAssignment,
    pub movie_title: String,
    pub person_name: String,
}

/// Crew assignment joined with the movie title and the person name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrewCredit {
    #[serde(flatten)]
    pub assignment: CrewAssignment,
    pub movie_title: String,
    pub person_name: String,
}

/// Person details shown next to a credit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreditPerson {
    pub name: String,
    #[schema(value_type = Vec<Role>)]
    pub job: BTreeSet<Role>,
    pub description: Option<String>,
    pub profile_photo: Option<String>,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub death_date: Option<DateTime<Utc>>,
}

impl From<&Person> for CreditPerson {
    fn from(person: &Person) -> Self {
        Self {
            name: person.name.to_owned(),
            job: person.roles.clone(),
            description: person.description.clone(),
            profile_photo: person.profile_photo.clone(),
            date_of_birth: person.dob,
            death_date: person.death_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovieCastEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub character_name: String,
    pub cast_id: String,
    #[serde(flatten)]
    pub person: CreditPerson,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovieCrewEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub job_title: String,
    pub crew_id: String,
    #[serde(flatten)]
    pub person: CreditPerson,
}
