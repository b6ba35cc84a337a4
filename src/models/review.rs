use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::MediaRef;
use crate::utils::{get_epoch_ts, new_id};

/// A user's review of a movie or a season, rated 0 to 5
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub target: MediaRef,
    pub author_id: String,
    pub review_text: String,
    pub rating: f64,
    pub created_ts: Option<u64>,
}

impl Review {
    pub fn new(target: MediaRef, author_id: &str, review_text: &str, rating: f64) -> Self {
        Self {
            id: new_id(),
            target,
            author_id: author_id.to_owned(),
            review_text: review_text.trim().to_owned(),
            rating,
            created_ts: Some(get_epoch_ts()),
        }
    }
}
