//! # Group models
//!
//! Groups are addressed by slug. Besides the group itself this module holds
//! the records of the per-group sub-resources: laws (the group's by-laws,
//! each carrying a fine amount), fines handed out under those laws, and
//! memberships with their history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::event::{StudyCount, StudyYearCount};
use super::user::UserBase;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupType {
    Tihlde,
    Board,
    Subgroup,
    Committee,
    Studyyear,
    Study,
    Interestgroup,
    Private,
    #[default]
    #[serde(other)]
    Other,
}

/// Group reference nested in other resources.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupBase {
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupList {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_alt: Option<String>,
    #[serde(default, rename = "type")]
    pub group_type: GroupType,
    #[serde(default)]
    pub viewer_is_member: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupPermissions {
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub write: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_alt: Option<String>,
    #[serde(default, rename = "type")]
    pub group_type: GroupType,
    #[serde(default)]
    pub fines_activated: bool,
    #[serde(default)]
    pub fine_info: String,
    #[serde(default)]
    pub fines_admin: Option<UserBase>,
    #[serde(default)]
    pub viewer_is_member: bool,
    #[serde(default)]
    pub permissions: GroupPermissions,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupMutate {
    pub name: String,
    pub description: String,
    pub contact_email: Option<String>,
    pub image: Option<String>,
    pub image_alt: Option<String>,
    pub fines_activated: bool,
    pub fine_info: String,
    /// `user_id` of the fines administrator.
    pub fines_admin: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupMemberStatistics {
    #[serde(default)]
    pub studies: Vec<StudyCount>,
    #[serde(default)]
    pub studyyears: Vec<StudyYearCount>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupLaw {
    pub id: String,
    pub paragraph: f64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: u32,
}

impl GroupLaw {
    /// Whole-numbered paragraphs are chapter headings, not fineable laws.
    pub fn is_heading(&self) -> bool {
        self.paragraph.fract() == 0.0
    }
}

/// Laws in paragraph order.
pub fn sort_laws(laws: &mut [GroupLaw]) {
    laws.sort_by(|a, b| a.paragraph.total_cmp(&b.paragraph));
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupLawMutate {
    pub paragraph: f64,
    pub title: String,
    pub description: String,
    pub amount: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupFine {
    pub id: String,
    pub user: UserBase,
    #[serde(default)]
    pub amount: u32,
    #[serde(default)]
    pub approved: bool,
    #[serde(default)]
    pub payed: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub defense: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_by: Option<UserBase>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// New fine for one or more users.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupFineCreate {
    pub user: Vec<String>,
    pub amount: u32,
    pub description: String,
    pub reason: String,
    pub image: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupFineMutate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payed: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupFineDefenseMutate {
    pub defense: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupFineBatchMutate {
    pub fine_ids: Vec<String>,
    pub data: GroupFineMutate,
}

/// Sum of fines for one user in a group.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupUserFine {
    pub user: UserBase,
    #[serde(default)]
    pub fines_amount: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupFineStatistics {
    #[serde(default)]
    pub approved_and_not_payed: u32,
    #[serde(default)]
    pub not_approved: u32,
    #[serde(default)]
    pub payed: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipType {
    Leader,
    #[default]
    Member,
}

impl MembershipType {
    pub fn label(&self) -> &'static str {
        match self {
            MembershipType::Leader => "Leder",
            MembershipType::Member => "Medlem",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    pub user: UserBase,
    pub group: GroupList,
    #[serde(default)]
    pub membership_type: MembershipType,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MembershipHistory {
    pub id: String,
    pub user: UserBase,
    pub group: GroupList,
    #[serde(default)]
    pub membership_type: MembershipType,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MembershipHistoryMutate {
    pub membership_type: MembershipType,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_group_type_is_other() {
        let group: GroupList =
            serde_json::from_str(r#"{"slug": "x", "name": "X", "type": "SOMETHING_NEW"}"#).unwrap();
        assert_eq!(group.group_type, GroupType::Other);
        let group: GroupList =
            serde_json::from_str(r#"{"slug": "index", "name": "Index", "type": "SUBGROUP"}"#).unwrap();
        assert_eq!(group.group_type, GroupType::Subgroup);
    }

    #[test]
    fn test_laws_sorted_and_headings() {
        let law = |paragraph: f64| GroupLaw {
            id: paragraph.to_string(),
            paragraph,
            title: String::new(),
            ..Default::default()
        };
        let mut laws = vec![law(2.1), law(1.0), law(1.12), law(1.2)];
        sort_laws(&mut laws);
        let order: Vec<f64> = laws.iter().map(|l| l.paragraph).collect();
        assert_eq!(order, vec![1.0, 1.12, 1.2, 2.1]);
        assert!(laws[0].is_heading());
        assert!(!laws[1].is_heading());
    }

    #[test]
    fn test_fine_mutate_skips_unset() {
        let batch = GroupFineBatchMutate {
            fine_ids: vec!["a".to_string()],
            data: GroupFineMutate {
                payed: Some(true),
                ..Default::default()
            },
        };
        assert_eq!(
            serde_json::to_string(&batch).unwrap(),
            r#"{"fine_ids":["a"],"data":{"payed":true}}"#
        );
    }
}
