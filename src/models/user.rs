use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_ts: Option<u64>,
}

/// User as returned by the API, never carries the password hash
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRespData {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub created_ts: Option<u64>,
}

impl User {
    pub fn to_user_resp_data(&self) -> UserRespData {
        UserRespData {
            id: self.id.to_owned(),
            name: self.name.to_owned(),
            username: self.username.to_owned(),
            email: self.email.to_owned(),
            created_ts: self.created_ts,
        }
    }
}
