//! Event, registration and reaction records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::form::Submission;
use super::group::GroupBase;
use super::user::UserBase;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    #[serde(default)]
    pub text: String,
}

/// An emoji reaction on a news item or event.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub reaction_id: String,
    pub emoji: String,
    #[serde(default)]
    pub user: Option<UserBase>,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub object_id: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReactionMutate {
    pub emoji: String,
    pub content_type: String,
    pub object_id: i64,
}

/// Count reactions per emoji, most used first. Ties keep first-seen order.
pub fn reaction_counts(reactions: &[Reaction]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for reaction in reactions {
        match counts.iter_mut().find(|(emoji, _)| *emoji == reaction.emoji) {
            Some((_, n)) => *n += 1,
            None => counts.push((reaction.emoji.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPermissions {
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub write: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_alt: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub start_registration_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_registration_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sign_off_deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category: Option<i64>,
    #[serde(default)]
    pub organizer: Option<GroupBase>,
    #[serde(default)]
    pub sign_up: bool,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub list_count: u32,
    #[serde(default)]
    pub waiting_list_count: u32,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub expired: bool,
    #[serde(default)]
    pub can_cause_strikes: bool,
    #[serde(default)]
    pub enforces_previous_strikes: bool,
    #[serde(default)]
    pub emojis_allowed: bool,
    /// Id of the registration survey form.
    #[serde(default)]
    pub survey: Option<String>,
    /// Id of the post-event evaluation form.
    #[serde(default)]
    pub evaluation: Option<String>,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
    #[serde(default)]
    pub permissions: EventPermissions,
}

/// Where an event's registration window is relative to a point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistrationWindow {
    NoSignUp,
    NotOpen,
    Open,
    Closed,
}

impl Event {
    pub fn registration_window(&self, now: DateTime<Utc>) -> RegistrationWindow {
        if !self.sign_up {
            return RegistrationWindow::NoSignUp;
        }
        if self.closed || self.expired {
            return RegistrationWindow::Closed;
        }
        if self.start_registration_at.is_some_and(|start| now < start) {
            return RegistrationWindow::NotOpen;
        }
        if self.end_registration_at.is_some_and(|end| now >= end) {
            return RegistrationWindow::Closed;
        }
        RegistrationWindow::Open
    }

    /// Whether a new registration would land on the waiting list.
    pub fn is_full(&self) -> bool {
        self.limit > 0 && self.list_count >= self.limit
    }

    /// Whether a registered user can still sign off without consequences.
    pub fn can_sign_off(&self, now: DateTime<Utc>) -> bool {
        self.sign_off_deadline.is_none_or(|deadline| now < deadline)
    }
}

/// Compact row of the event lists.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventList {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_alt: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: Option<i64>,
    #[serde(default)]
    pub organizer: Option<GroupBase>,
    #[serde(default)]
    pub expired: bool,
}

/// Create/update payload for `events/`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventMutate {
    pub title: String,
    pub description: String,
    pub location: String,
    pub image: Option<String>,
    pub image_alt: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub start_registration_at: Option<DateTime<Utc>>,
    pub end_registration_at: Option<DateTime<Utc>>,
    pub sign_off_deadline: Option<DateTime<Utc>>,
    pub category: Option<i64>,
    /// Slug of the organizing group.
    pub organizer: Option<String>,
    pub sign_up: bool,
    pub limit: u32,
    pub closed: bool,
    pub can_cause_strikes: bool,
    pub enforces_previous_strikes: bool,
    pub emojis_allowed: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyCount {
    #[serde(default)]
    pub study: String,
    #[serde(default)]
    pub amount: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyYearCount {
    #[serde(default)]
    pub studyyear: String,
    #[serde(default)]
    pub amount: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventStatistics {
    #[serde(default)]
    pub has_attended_count: u32,
    #[serde(default)]
    pub list_count: u32,
    #[serde(default)]
    pub waiting_list_count: u32,
    #[serde(default)]
    pub studies: Vec<StudyCount>,
    #[serde(default)]
    pub studyyears: Vec<StudyYearCount>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFavorite {
    pub is_favorite: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub user_info: UserBase,
    #[serde(default)]
    pub is_on_wait: bool,
    #[serde(default)]
    pub has_attended: bool,
    #[serde(default)]
    pub allow_photo: bool,
    #[serde(default)]
    pub has_unanswered_evaluation: bool,
    #[serde(default)]
    pub wait_queue_number: Option<u32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub survey_submission: Option<Submission>,
}

/// Registration changes. Only the set fields are sent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationMutate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_photo: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_attended: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_on_wait: Option<bool>,
}

/// A registration visible to all members. `user_info` is `None` for users
/// who hide their registrations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicRegistration {
    #[serde(default)]
    pub user_info: Option<UserBase>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event() -> Event {
        serde_json::from_str(
            r#"{
                "id": 1,
                "title": "Julebord",
                "start_date": "2026-12-01T18:00:00+01:00",
                "end_date": "2026-12-01T23:00:00+01:00",
                "start_registration_at": "2026-11-01T12:00:00+01:00",
                "end_registration_at": "2026-11-20T12:00:00+01:00",
                "sign_off_deadline": "2026-11-25T12:00:00+01:00",
                "sign_up": true,
                "limit": 2,
                "list_count": 1
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_dates_are_normalised_to_utc() {
        let event = event();
        assert_eq!(event.start_date, Utc.with_ymd_and_hms(2026, 12, 1, 17, 0, 0).unwrap());
        assert!(event.reactions.is_empty());
    }

    #[test]
    fn test_registration_window() {
        let mut event = event();
        let before = Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap();
        let during = Utc.with_ymd_and_hms(2026, 11, 10, 0, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2026, 11, 21, 0, 0, 0).unwrap();

        assert_eq!(event.registration_window(before), RegistrationWindow::NotOpen);
        assert_eq!(event.registration_window(during), RegistrationWindow::Open);
        assert_eq!(event.registration_window(after), RegistrationWindow::Closed);

        event.closed = true;
        assert_eq!(event.registration_window(during), RegistrationWindow::Closed);
        event.sign_up = false;
        assert_eq!(event.registration_window(during), RegistrationWindow::NoSignUp);
    }

    #[test]
    fn test_capacity_and_sign_off() {
        let mut event = event();
        assert!(!event.is_full());
        event.list_count = 2;
        assert!(event.is_full());
        event.limit = 0;
        assert!(!event.is_full());

        assert!(event.can_sign_off(Utc.with_ymd_and_hms(2026, 11, 24, 0, 0, 0).unwrap()));
        assert!(!event.can_sign_off(Utc.with_ymd_and_hms(2026, 11, 26, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_reaction_counts() {
        let reaction = |emoji: &str| Reaction {
            reaction_id: "r".to_string(),
            emoji: emoji.to_string(),
            ..Default::default()
        };
        let counts = reaction_counts(&[reaction("👍"), reaction("🎉"), reaction("🎉")]);
        assert_eq!(counts, vec![("🎉".to_string(), 2), ("👍".to_string(), 1)]);
    }
}
