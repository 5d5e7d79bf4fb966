//! # User models
//!
//! [`User`] is the full profile returned for `users/{id}/` and `users/me/`.
//! Lists and nested references use the smaller [`UserList`] and [`UserBase`].
//! [`UserPermissions`] maps each app (`event`, `news`, `group`, ...) to the
//! actions the signed-in user may perform in it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Minimal user reference nested in other resources.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserBase {
    pub user_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub email: String,
}

impl UserBase {
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name, &self.user_id)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub gender: Option<i32>,
    #[serde(default)]
    pub cell: String,
    #[serde(default)]
    pub allergy: String,
    #[serde(default)]
    pub tool: String,
    #[serde(default)]
    pub unread_notifications: u32,
    #[serde(default)]
    pub unanswered_evaluations_count: u32,
    #[serde(default)]
    pub number_of_strikes: u32,
    #[serde(default)]
    pub public_event_registrations: bool,
    #[serde(default)]
    pub slack_user_id: Option<String>,
    /// Names of the groups the user is a member of, e.g. `"Index"`.
    #[serde(default)]
    pub groups: Vec<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name, &self.user_id)
    }
}

/// Row of the `users/` admin list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserList {
    pub user_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl UserList {
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name, &self.user_id)
    }
}

fn full_name(first: &str, last: &str, fallback: &str) -> String {
    let name = format!("{first} {last}");
    let name = name.trim();
    if name.is_empty() {
        fallback.to_string()
    } else {
        name.to_string()
    }
}

/// Sign-up payload for `users/`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserCreate {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Partial profile update. Only the set fields are sent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_event_registrations: Option<bool>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub write: bool,
    #[serde(default)]
    pub write_all: bool,
    #[serde(default)]
    pub destroy: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPermissions {
    #[serde(default)]
    pub permissions: BTreeMap<String, Permission>,
}

impl UserPermissions {
    /// Whether the user may write in any of `apps`.
    pub fn can_write_any(&self, apps: &[&str]) -> bool {
        apps.iter().any(|app| {
            self.permissions
                .get(*app)
                .is_some_and(|p| p.write || p.write_all)
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationSetting {
    pub notification_type: String,
    #[serde(default)]
    pub email: bool,
    #[serde(default)]
    pub website: bool,
    #[serde(default)]
    pub slack: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettingChoice {
    pub notification_type: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub user_id: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_tolerates_missing_and_unknown_fields() {
        let user: User = serde_json::from_str(
            r#"{"user_id": "olan", "first_name": "Ola", "last_name": "Nordmann", "shirt_size": "M"}"#,
        )
        .unwrap();
        assert_eq!(user.full_name(), "Ola Nordmann");
        assert_eq!(user.unread_notifications, 0);
        assert!(user.image.is_none());
    }

    #[test]
    fn test_full_name_falls_back_to_user_id() {
        let user = UserBase {
            user_id: "anon".to_string(),
            ..Default::default()
        };
        assert_eq!(user.full_name(), "anon");
    }

    #[test]
    fn test_update_only_sends_set_fields() {
        let update = UserUpdate {
            allergy: Some("Nøtter".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"allergy":"Nøtter"}"#);
    }

    #[test]
    fn test_write_permission() {
        let perms: UserPermissions = serde_json::from_str(
            r#"{"permissions": {"event": {"read": true, "write": false, "write_all": true}, "news": {"read": true}}}"#,
        )
        .unwrap();
        assert!(perms.can_write_any(&["event"]));
        assert!(!perms.can_write_any(&["news", "strike"]));
    }
}
