//! # Users and authentication
//!
//! Profile endpoints take an optional `user_id`; `None` addresses the
//! signed-in user through the `me` alias (`users/me/`). Authentication is a
//! plain token exchange: `auth/login/` trades a username and password for a
//! bearer token, which the UI keeps and attaches to every later request.
//!
//! Cache keys follow the per-facet roots `user`, `user_badges`,
//! `user_events`, ... so that e.g. a new registration can invalidate every
//! user's event list at once without touching the profile.

use serde_json::json;
use store::{Filters, Invalidation, PaginationResponse};

use crate::client::ApiClient;
use crate::error::{ApiError, RequestResponse};
use crate::models::{
    Badge, EventList, Form, LoginRequest, LoginResponse, Membership, MembershipHistory,
    NotificationSetting, NotificationSettingChoice, Strike, User, UserCreate, UserList,
    UserPermissions, UserUpdate,
};
use crate::transport::Transport;

pub const USERS_ENDPOINT: &str = "users";
pub const ME_ENDPOINT: &str = "me";
pub const NOTIFICATION_SETTINGS_ENDPOINT: &str = "notification-settings";
pub const AUTH_ENDPOINT: &str = "auth";

pub mod keys {
    use store::{Filters, QueryKey};

    fn scoped(root: &str, user_id: Option<&str>) -> QueryKey {
        match user_id {
            Some(id) => QueryKey::new(root).push_str(id),
            None => QueryKey::new(root),
        }
    }

    /// The signed-in user's profile.
    pub fn me() -> QueryKey {
        QueryKey::new("user")
    }

    pub fn detail(user_id: Option<&str>) -> QueryKey {
        scoped("user", user_id)
    }

    pub fn permissions() -> QueryKey {
        QueryKey::new("user_permissions")
    }

    pub fn badges(user_id: Option<&str>) -> QueryKey {
        scoped("user_badges", user_id)
    }

    pub fn badges_all() -> QueryKey {
        QueryKey::new("user_badges")
    }

    pub fn events(user_id: Option<&str>) -> QueryKey {
        scoped("user_events", user_id)
    }

    pub fn events_all() -> QueryKey {
        QueryKey::new("user_events")
    }

    pub fn forms(filters: &Filters) -> QueryKey {
        QueryKey::new("user_forms").push_filters(filters)
    }

    pub fn memberships(user_id: Option<&str>) -> QueryKey {
        scoped("user_memberships", user_id)
    }

    pub fn membership_histories(user_id: Option<&str>) -> QueryKey {
        scoped("user_membership_histories", user_id)
    }

    pub fn strikes(user_id: Option<&str>) -> QueryKey {
        scoped("user_strikes", user_id)
    }

    pub fn notification_settings() -> QueryKey {
        QueryKey::new("user_notification_settings")
    }

    pub fn notification_setting_choices() -> QueryKey {
        QueryKey::new("user_notification_setting_choices")
    }

    pub fn all_users() -> QueryKey {
        QueryKey::new("users")
    }

    pub fn list(filters: &Filters) -> QueryKey {
        all_users().push_filters(filters)
    }
}

fn user_path(user_id: Option<&str>) -> String {
    format!("{USERS_ENDPOINT}/{}/", user_id.unwrap_or(ME_ENDPOINT))
}

impl<T: Transport> ApiClient<T> {
    pub async fn login(&self, user_id: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest {
            user_id: user_id.to_string(),
            password: password.to_string(),
        };
        self.post(&format!("{AUTH_ENDPOINT}/login/"), &body).await
    }

    /// Ask for a password reset link by email.
    pub async fn forgot_password(&self, email: &str) -> Result<RequestResponse, ApiError> {
        self.post(&format!("{AUTH_ENDPOINT}/password/reset/"), &json!({ "email": email }))
            .await
    }

    pub async fn create_user(&self, user: &UserCreate) -> Result<RequestResponse, ApiError> {
        self.post(&format!("{USERS_ENDPOINT}/"), user).await
    }

    pub async fn get_user(&self, user_id: Option<&str>) -> Result<User, ApiError> {
        self.get(&user_path(user_id), &Filters::new()).await
    }

    pub async fn get_user_permissions(&self) -> Result<UserPermissions, ApiError> {
        self.get(&format!("{USERS_ENDPOINT}/{ME_ENDPOINT}/permissions/"), &Filters::new())
            .await
    }

    pub async fn get_user_badges(
        &self,
        user_id: Option<&str>,
        filters: &Filters,
    ) -> Result<PaginationResponse<Badge>, ApiError> {
        self.get(&format!("{}badges/", user_path(user_id)), filters).await
    }

    pub async fn get_user_events(
        &self,
        user_id: Option<&str>,
        filters: &Filters,
    ) -> Result<PaginationResponse<EventList>, ApiError> {
        self.get(&format!("{}events/", user_path(user_id)), filters).await
    }

    /// Forms the signed-in user has answered or is asked to answer.
    pub async fn get_user_forms(&self, filters: &Filters) -> Result<PaginationResponse<Form>, ApiError> {
        self.get(&format!("{USERS_ENDPOINT}/{ME_ENDPOINT}/forms/"), filters)
            .await
    }

    pub async fn get_user_memberships(
        &self,
        user_id: Option<&str>,
        filters: &Filters,
    ) -> Result<PaginationResponse<Membership>, ApiError> {
        self.get(&format!("{}memberships/", user_path(user_id)), filters)
            .await
    }

    pub async fn get_user_membership_histories(
        &self,
        user_id: Option<&str>,
        filters: &Filters,
    ) -> Result<PaginationResponse<MembershipHistory>, ApiError> {
        self.get(&format!("{}membership-histories/", user_path(user_id)), filters)
            .await
    }

    pub async fn get_user_strikes(&self, user_id: Option<&str>) -> Result<Vec<Strike>, ApiError> {
        self.get(&format!("{}strikes/", user_path(user_id)), &Filters::new())
            .await
    }

    pub async fn get_users(&self, filters: &Filters) -> Result<PaginationResponse<UserList>, ApiError> {
        self.get(&format!("{USERS_ENDPOINT}/"), filters).await
    }

    pub async fn update_user(&self, user_id: &str, user: &UserUpdate) -> Result<User, ApiError> {
        self.put(&user_path(Some(user_id)), user).await
    }

    pub async fn delete_user(&self, user_id: Option<&str>) -> Result<RequestResponse, ApiError> {
        self.delete(&user_path(user_id)).await
    }

    /// Accept a pending sign-up.
    pub async fn activate_user(&self, user_id: &str) -> Result<RequestResponse, ApiError> {
        self.post(&format!("{USERS_ENDPOINT}/activate/"), &json!({ "user_id": user_id }))
            .await
    }

    /// Reject a pending sign-up with a reason mailed to the applicant.
    pub async fn decline_user(&self, user_id: &str, reason: &str) -> Result<RequestResponse, ApiError> {
        self.post(
            &format!("{USERS_ENDPOINT}/decline/"),
            &json!({ "user_id": user_id, "reason": reason }),
        )
        .await
    }

    /// Request an email with all data stored about the signed-in user.
    pub async fn export_user_data(&self) -> Result<RequestResponse, ApiError> {
        self.get(&format!("{USERS_ENDPOINT}/{ME_ENDPOINT}/data/"), &Filters::new())
            .await
    }

    pub async fn slack_connect(&self, code: &str) -> Result<RequestResponse, ApiError> {
        self.post(&format!("{USERS_ENDPOINT}/{ME_ENDPOINT}/slack/"), &json!({ "code": code }))
            .await
    }

    pub async fn get_notification_settings(&self) -> Result<Vec<NotificationSetting>, ApiError> {
        self.get(&format!("{NOTIFICATION_SETTINGS_ENDPOINT}/"), &Filters::new())
            .await
    }

    /// Store one setting; the server answers with the full list, which the
    /// caller seeds under [`keys::notification_settings`].
    pub async fn update_notification_settings(
        &self,
        setting: &NotificationSetting,
    ) -> Result<Vec<NotificationSetting>, ApiError> {
        self.post(&format!("{NOTIFICATION_SETTINGS_ENDPOINT}/"), setting)
            .await
    }

    pub async fn get_notification_setting_choices(&self) -> Result<Vec<NotificationSettingChoice>, ApiError> {
        self.get(&format!("{NOTIFICATION_SETTINGS_ENDPOINT}/choices/"), &Filters::new())
            .await
    }
}

/// A new token means a new identity: drop everything cached for the old one.
pub fn invalidates_after_login() -> Invalidation {
    Invalidation::new()
        .remove(keys::me())
        .remove(keys::permissions())
}

pub fn invalidates_after_logout() -> Invalidation {
    invalidates_after_login()
}

/// After a profile update. When the updated user is the signed-in one the
/// caller also seeds [`keys::me`] with the answer.
pub fn invalidates_after_user_update() -> Invalidation {
    Invalidation::new().invalidate(keys::all_users())
}

/// After activating or declining a pending sign-up.
pub fn invalidates_after_user_review() -> Invalidation {
    Invalidation::new().invalidate(keys::all_users())
}

pub fn invalidates_after_slack_connect() -> Invalidation {
    Invalidation::new().invalidate(keys::me())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{Method, RequestBody};
    use crate::transport::MockTransport;
    use store::{ApiConfig, QueryCache};

    fn client(mock: &MockTransport) -> ApiClient<MockTransport> {
        ApiClient::new(mock.clone(), ApiConfig::new("https://api.example.org"))
    }

    #[tokio::test]
    async fn test_login_posts_credentials_without_token() {
        let mock = MockTransport::new();
        mock.respond_json(200, r#"{"token": "abc123"}"#);

        let res = client(&mock).login("olan", "hemmelig").await.unwrap();
        assert_eq!(res.token, "abc123");

        let req = mock.last_request().unwrap();
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.url, "https://api.example.org/auth/login/");
        assert!(req.header("Authorization").is_none());
        assert_eq!(
            req.body,
            RequestBody::Json(r#"{"user_id":"olan","password":"hemmelig"}"#.to_string())
        );
    }

    #[tokio::test]
    async fn test_wrong_password_is_expected_error() {
        let mock = MockTransport::new();
        mock.respond_json(401, r#"{"detail": "Brukernavnet eller passordet er feil"}"#);
        let err = client(&mock).login("olan", "feil").await.unwrap_err();
        assert_eq!(err.detail(), "Brukernavnet eller passordet er feil");
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_me_alias() {
        let mock = MockTransport::new();
        mock.respond_json(200, r#"{"user_id": "olan"}"#);
        mock.respond_json(200, "[]");
        let api = client(&mock).with_token(Some("t".into()));

        api.get_user(None).await.unwrap();
        assert_eq!(mock.last_request().unwrap().url, "https://api.example.org/users/me/");

        let strikes = api.get_user_strikes(Some("kari")).await.unwrap();
        assert!(strikes.is_empty());
        assert_eq!(
            mock.last_request().unwrap().url,
            "https://api.example.org/users/kari/strikes/"
        );
    }

    #[test]
    fn test_user_scoped_keys() {
        assert!(keys::events(Some("olan")).starts_with(&keys::events_all()));
        assert!(!keys::events(Some("olan")).starts_with(&keys::me()));
        assert_eq!(keys::detail(None), keys::me());
    }

    #[test]
    fn test_login_drops_previous_identity() {
        let cache = QueryCache::new();
        cache.set(keys::me(), &1);
        cache.set(keys::permissions(), &1);
        cache.set(keys::list(&Filters::new()), &1);
        cache.apply(&invalidates_after_login());
        assert!(!cache.contains(&keys::me()));
        assert!(!cache.contains(&keys::permissions()));
        assert!(cache.contains(&keys::all_users()));
    }
}
