use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::MediaRef;
use crate::utils::{get_epoch_ts, new_id};

/// Short video attached to a movie, a series or a season
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub parent: MediaRef,
    pub title: String,
    pub clip_link: String,
    #[serde(default)]
    pub duration: u32,
    pub created_ts: Option<u64>,
}

impl Clip {
    /// `clip_link` is stored as given, callers normalize it first
    pub fn new(parent: MediaRef, title: &str, clip_link: &str, duration: Option<u32>) -> Self {
        Self {
            id: new_id(),
            parent,
            title: title.to_owned(),
            clip_link: clip_link.to_owned(),
            duration: duration.unwrap_or_default(),
            created_ts: Some(get_epoch_ts()),
        }
    }
}
