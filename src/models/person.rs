use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use utoipa::ToSchema;

use crate::utils::{get_epoch_ts, new_id};

/// Capacity a person can work in
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, ToSchema,
)]
#[allow(non_camel_case_types)]
pub enum Role {
    ACTOR,
    DIRECTOR,
    WRITER,
    PRODUCER,
    MUSIC,
}

pub const CREW_ROLES: [Role; 4] = [Role::DIRECTOR, Role::WRITER, Role::PRODUCER, Role::MUSIC];

/// `job` is accepted either as a single role or as a list of roles
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RoleInput {
    One(Role),
    Many(Vec<Role>),
}

impl From<RoleInput> for BTreeSet<Role> {
    fn from(value: RoleInput) -> Self {
        match value {
            RoleInput::One(role) => BTreeSet::from([role]),
            RoleInput::Many(roles) => roles.into_iter().collect(),
        }
    }
}

/// A cast or crew member
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,

    #[serde(rename = "job")]
    #[schema(value_type = Vec<Role>)]
    pub roles: BTreeSet<Role>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_date: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,

    #[serde(default)]
    pub image_urls: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_ts: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_ts: Option<u64>,
}

/// Fields needed to register a new person
#[derive(Debug, Clone, Default)]
pub struct NewPerson {
    pub name: String,
    pub roles: BTreeSet<Role>,
    pub description: Option<String>,
    pub dob: Option<DateTime<Utc>>,
    pub death_date: Option<DateTime<Utc>>,
    pub profile_photo: Option<String>,
    pub image_urls: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct PersonSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<Role>>)]
    pub job: Option<BTreeSet<Role>>,
}

impl NewPerson {
    /// Builds the row to insert, with a fresh id and a trimmed name
    pub fn into_person(self) -> Person {
        Person {
            id: new_id(),
            name: self.name.trim().to_owned(),
            roles: self.roles,
            description: self.description,
            dob: self.dob,
            death_date: self.death_date,
            profile_photo: self.profile_photo,
            image_urls: self.image_urls,
            created_ts: Some(get_epoch_ts()),
            updated_ts: None,
        }
    }
}

impl Person {
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.iter().any(|role| self.roles.contains(role))
    }

    pub fn to_summary(&self, with_job: bool) -> PersonSummary {
        PersonSummary {
            id: self.id.to_owned(),
            name: self.name.to_owned(),
            job: with_job.then(|| self.roles.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_input_single_value() {
        let input: RoleInput = serde_json::from_str(r#""ACTOR""#).unwrap();
        let roles: BTreeSet<Role> = input.into();
        assert_eq!(roles, BTreeSet::from([Role::ACTOR]));
    }

    #[test]
    fn test_role_input_list_collapses_duplicates() {
        let input: RoleInput = serde_json::from_str(r#"["WRITER", "DIRECTOR", "WRITER"]"#).unwrap();
        let roles: BTreeSet<Role> = input.into();
        assert_eq!(roles.len(), 2);
        assert!(roles.contains(&Role::DIRECTOR));
        assert!(roles.contains(&Role::WRITER));
    }

    #[test]
    fn test_role_input_rejects_unknown_role() {
        assert!(serde_json::from_str::<RoleInput>(r#""GAFFER""#).is_err());
    }
}
