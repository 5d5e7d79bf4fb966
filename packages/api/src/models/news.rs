use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::event::Reaction;
use super::user::UserBase;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct News {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub header: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_alt: Option<String>,
    #[serde(default)]
    pub creator: Option<UserBase>,
    #[serde(default)]
    pub emojis_allowed: bool,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create/update payload for `news/`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsMutate {
    pub title: String,
    pub header: String,
    pub body: String,
    pub image: Option<String>,
    pub image_alt: Option<String>,
    pub emojis_allowed: bool,
}
