use serde::{Deserialize, Serialize};

use super::user::UserBase;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BadgeCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Share of members holding the badge, 0 to 100.
    #[serde(default)]
    pub total_completion_percentage: f64,
    #[serde(default)]
    pub badge_category: Option<BadgeCategory>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BadgeLeaderboard {
    pub user: UserBase,
    #[serde(default)]
    pub number_of_badges: u32,
}

/// Claim a badge by its secret flag.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BadgeClaim {
    pub flag: String,
}
