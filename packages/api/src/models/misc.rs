//! Smaller resources: strikes, QR codes, feedback, short links, the Töddel
//! archive, warning banners, cheatsheets and file uploads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::event::EventList;
use super::user::UserBase;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Strike {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub strike_size: u32,
    #[serde(default)]
    pub event: Option<EventList>,
    #[serde(default)]
    pub creator: Option<UserBase>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Row of the `strikes/` admin list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StrikeList {
    pub user: UserBase,
    #[serde(default)]
    pub strikes: Vec<Strike>,
    #[serde(default)]
    pub active_strikes_sum: u32,
}

/// The predefined reasons a strike can be given for. The server derives the
/// description and size from the enum name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrikeReason {
    BadBehavior,
    EvalForm,
    NoShow,
    PastDeadline,
    LateArrival,
}

impl StrikeReason {
    pub const ALL: [StrikeReason; 5] = [
        StrikeReason::BadBehavior,
        StrikeReason::EvalForm,
        StrikeReason::NoShow,
        StrikeReason::PastDeadline,
        StrikeReason::LateArrival,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StrikeReason::BadBehavior => "Dårlig oppførsel",
            StrikeReason::EvalForm => "Ikke svart på evaluering",
            StrikeReason::NoShow => "Ikke møtt opp",
            StrikeReason::PastDeadline => "Avmeldt etter frist",
            StrikeReason::LateArrival => "Kom for sent",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrikeCreate {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<i64>,
    #[serde(flatten)]
    pub kind: StrikeKind,
}

/// A strike is either one of the predefined reasons or free text with a size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StrikeKind {
    Enum { r#enum: StrikeReason },
    Custom { description: String, strike_size: u32 },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QrCode {
    pub id: i64,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QrCodeCreate {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackType {
    #[default]
    Idea,
    Bug,
}

impl FeedbackType {
    pub fn label(&self) -> &'static str {
        match self {
            FeedbackType::Idea => "Idé",
            FeedbackType::Bug => "Feil",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedbackStatus {
    #[default]
    Open,
    InProgress,
    Closed,
    Rejected,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub feedback_type: FeedbackType,
    #[serde(default)]
    pub status: FeedbackStatus,
    #[serde(default)]
    pub author: Option<UserBase>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackCreate {
    pub title: String,
    pub description: String,
    pub feedback_type: FeedbackType,
}

impl FeedbackCreate {
    /// Check title and description lengths, returning the first problem.
    pub fn validate(&self) -> Result<(), &'static str> {
        let title = self.title.trim().chars().count();
        let description = self.description.trim().chars().count();
        if title < 2 {
            return Err("Tittelen må være minst 2 tegn.");
        }
        if title > 50 {
            return Err("Tittelen kan ikke overstige 50 tegn.");
        }
        if description < 10 {
            return Err("Beskrivelsen må være minst 10 tegn.");
        }
        if description > 500 {
            return Err("Beskrivelsen kan ikke overstige 500 tegn.");
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShortLink {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Toddel {
    pub edition: i64,
    pub title: String,
    pub pdf: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ToddelMutate {
    pub edition: i64,
    pub title: String,
    pub pdf: String,
    pub image: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningType {
    #[default]
    Information,
    Warning,
    Error,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    pub id: i64,
    pub text: String,
    #[serde(default, rename = "type")]
    pub warning_type: WarningType,
}

/// Warnings the user has not dismissed.
pub fn unread_warnings(warnings: &[Warning], read: &[i64]) -> Vec<Warning> {
    warnings
        .iter()
        .filter(|w| !read.contains(&w.id))
        .cloned()
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheatsheetStudy {
    Dataing,
    Digfor,
    Digsec,
    Digsam,
    Drift,
}

impl CheatsheetStudy {
    /// Path segment used by the API. Digital security files live under the
    /// older `DIGINC` name.
    pub fn path_segment(&self) -> &'static str {
        match self {
            CheatsheetStudy::Dataing => "DATAING",
            CheatsheetStudy::Digfor => "DIGFOR",
            CheatsheetStudy::Digsec => "DIGINC",
            CheatsheetStudy::Digsam => "DIGSAM",
            CheatsheetStudy::Drift => "DRIFT",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cheatsheet {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub creator: String,
    #[serde(default)]
    pub grade: u8,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub official: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FileUploadResponse {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strike_create_shapes() {
        let predefined = StrikeCreate {
            user_id: "olan".to_string(),
            event_id: Some(4),
            kind: StrikeKind::Enum {
                r#enum: StrikeReason::NoShow,
            },
        };
        assert_eq!(
            serde_json::to_value(&predefined).unwrap(),
            serde_json::json!({"user_id": "olan", "event_id": 4, "enum": "NO_SHOW"})
        );

        let custom = StrikeCreate {
            user_id: "olan".to_string(),
            event_id: None,
            kind: StrikeKind::Custom {
                description: "Søl".to_string(),
                strike_size: 2,
            },
        };
        assert_eq!(
            serde_json::to_value(&custom).unwrap(),
            serde_json::json!({"user_id": "olan", "description": "Søl", "strike_size": 2})
        );
    }

    #[test]
    fn test_feedback_validation() {
        let mut feedback = FeedbackCreate {
            title: "A".to_string(),
            description: "For kort".to_string(),
            feedback_type: FeedbackType::Bug,
        };
        assert_eq!(feedback.validate(), Err("Tittelen må være minst 2 tegn."));
        feedback.title = "Knapp".to_string();
        assert_eq!(feedback.validate(), Err("Beskrivelsen må være minst 10 tegn."));
        feedback.description = "Knappen virker ikke på mobil".to_string();
        assert!(feedback.validate().is_ok());
    }

    #[test]
    fn test_unread_warnings() {
        let warning = |id| Warning {
            id,
            text: String::new(),
            warning_type: WarningType::Information,
        };
        let unread = unread_warnings(&[warning(1), warning(2), warning(3)], &[2]);
        assert_eq!(unread.iter().map(|w| w.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_cheatsheet_digsec_alias() {
        assert_eq!(CheatsheetStudy::Digsec.path_segment(), "DIGINC");
        assert_eq!(CheatsheetStudy::Dataing.path_segment(), "DATAING");
    }
}
