//! Badges, badge categories and leaderboards.

use store::{Filters, Invalidation, PaginationResponse};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Badge, BadgeCategory, BadgeClaim, BadgeLeaderboard};
use crate::resources::users::{self, ME_ENDPOINT, USERS_ENDPOINT};
use crate::transport::Transport;

pub const BADGES_ENDPOINT: &str = "badges";

pub mod keys {
    use store::{Filters, QueryKey};

    pub fn all() -> QueryKey {
        QueryKey::new("badges")
    }

    pub fn list(filters: &Filters) -> QueryKey {
        all().push_str("list").push_filters(filters)
    }

    pub fn categories(filters: &Filters) -> QueryKey {
        all().push_str("categories").push_filters(filters)
    }

    pub fn category(id: &str) -> QueryKey {
        all().push_str("category").push_str(id)
    }

    pub fn overall_leaderboard(filters: &Filters) -> QueryKey {
        all().push_str("leaderboard").push_filters(filters)
    }

    pub fn detail(id: &str) -> QueryKey {
        all().push_str("badge").push_str(id)
    }

    pub fn leaderboard(id: &str, filters: &Filters) -> QueryKey {
        detail(id).push_str("leaderboard").push_filters(filters)
    }
}

impl<T: Transport> ApiClient<T> {
    pub async fn get_badges(&self, filters: &Filters) -> Result<PaginationResponse<Badge>, ApiError> {
        self.get(&format!("{BADGES_ENDPOINT}/"), filters).await
    }

    pub async fn get_badge(&self, id: &str) -> Result<Badge, ApiError> {
        self.get(&format!("{BADGES_ENDPOINT}/{id}/"), &Filters::new())
            .await
    }

    pub async fn get_badge_categories(
        &self,
        filters: &Filters,
    ) -> Result<PaginationResponse<BadgeCategory>, ApiError> {
        self.get(&format!("{BADGES_ENDPOINT}/categories/"), filters).await
    }

    pub async fn get_badge_category(&self, id: &str) -> Result<BadgeCategory, ApiError> {
        self.get(&format!("{BADGES_ENDPOINT}/categories/{id}/"), &Filters::new())
            .await
    }

    /// Users ranked by number of badges. Filters: `study`, `studyyear`.
    pub async fn get_overall_badge_leaderboard(
        &self,
        filters: &Filters,
    ) -> Result<PaginationResponse<BadgeLeaderboard>, ApiError> {
        self.get(&format!("{BADGES_ENDPOINT}/leaderboard/"), filters).await
    }

    /// Users holding one badge, first claimers first.
    pub async fn get_badge_leaderboard(
        &self,
        id: &str,
        filters: &Filters,
    ) -> Result<PaginationResponse<BadgeLeaderboard>, ApiError> {
        self.get(&format!("{BADGES_ENDPOINT}/{id}/leaderboard/"), filters)
            .await
    }

    /// Claim a badge by its secret flag.
    pub async fn create_user_badge(&self, flag: &str) -> Result<Badge, ApiError> {
        let claim = BadgeClaim {
            flag: flag.to_string(),
        };
        self.post(&format!("{USERS_ENDPOINT}/{ME_ENDPOINT}/badges/"), &claim)
            .await
    }
}

pub fn invalidates_after_badge_claim() -> Invalidation {
    Invalidation::new()
        .invalidate(users::keys::badges_all())
        .invalidate(keys::all())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use store::{ApiConfig, QueryCache};

    #[tokio::test]
    async fn test_claim_badge() {
        let mock = MockTransport::new();
        mock.respond_json(200, r#"{"id": "b1", "title": "Kodeknekker"}"#);
        let api = ApiClient::new(mock.clone(), ApiConfig::new("https://api.example.org/"))
            .with_token(Some("t".into()));

        let badge = api.create_user_badge("flag{abc}").await.unwrap();
        assert_eq!(badge.title, "Kodeknekker");
        assert_eq!(badge.total_completion_percentage, 0.0);

        let req = mock.last_request().unwrap();
        assert_eq!(req.url, "https://api.example.org/users/me/badges/");
    }

    #[tokio::test]
    async fn test_wrong_flag_surfaces_detail() {
        let mock = MockTransport::new();
        mock.respond_json(404, r#"{"detail": "Badgen finnes ikke"}"#);
        let api = ApiClient::new(mock.clone(), ApiConfig::new("https://api.example.org/"));
        let err = api.create_user_badge("flag{nope}").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.detail(), "Badgen finnes ikke");
    }

    #[test]
    fn test_claim_refreshes_user_badges() {
        let cache = QueryCache::new();
        cache.set(users::keys::badges(Some("olan")), &1);
        cache.set(keys::leaderboard("b1", &Filters::new()), &1);
        cache.apply(&invalidates_after_badge_claim());
        assert!(!cache.is_fresh(&users::keys::badges(Some("olan"))));
        assert!(!cache.is_fresh(&keys::leaderboard("b1", &Filters::new())));
    }
}
