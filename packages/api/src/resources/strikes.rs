//! Strikes: penalty points given to users for e.g. no-shows.

use store::{Filters, Invalidation, PaginationResponse};

use crate::client::ApiClient;
use crate::error::{ApiError, RequestResponse};
use crate::models::{Strike, StrikeCreate, StrikeList};
use crate::resources::users;
use crate::transport::Transport;

pub const STRIKES_ENDPOINT: &str = "strikes";

pub mod keys {
    use store::{Filters, QueryKey};

    pub fn all() -> QueryKey {
        QueryKey::new("strikes")
    }

    pub fn list(filters: &Filters) -> QueryKey {
        all().push_filters(filters)
    }
}

impl<T: Transport> ApiClient<T> {
    /// Users with strikes. Filters: `active`, `search`, `study`, `studyyear`.
    pub async fn get_strikes(&self, filters: &Filters) -> Result<PaginationResponse<StrikeList>, ApiError> {
        self.get(&format!("{STRIKES_ENDPOINT}/"), filters).await
    }

    pub async fn create_strike(&self, strike: &StrikeCreate) -> Result<Strike, ApiError> {
        self.post(&format!("{STRIKES_ENDPOINT}/"), strike).await
    }

    pub async fn delete_strike(&self, id: &str) -> Result<RequestResponse, ApiError> {
        self.delete(&format!("{STRIKES_ENDPOINT}/{id}/")).await
    }
}

/// After creating or deleting a strike given to `user_id`.
pub fn invalidates_after_strike_change(user_id: &str) -> Invalidation {
    Invalidation::new()
        .invalidate(keys::all())
        .invalidate(users::keys::strikes(Some(user_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{StrikeKind, StrikeReason};
    use crate::transport::MockTransport;
    use store::{ApiConfig, QueryCache};

    #[tokio::test]
    async fn test_create_predefined_strike() {
        let mock = MockTransport::new();
        mock.respond_json(201, r#"{"id": "s1", "description": "Ikke møtt opp", "strike_size": 2}"#);
        let api = ApiClient::new(mock.clone(), ApiConfig::new("https://api.example.org/"))
            .with_token(Some("t".into()));

        let strike = api
            .create_strike(&StrikeCreate {
                user_id: "olan".into(),
                event_id: Some(7),
                kind: StrikeKind::Enum {
                    r#enum: StrikeReason::NoShow,
                },
            })
            .await
            .unwrap();
        assert_eq!(strike.strike_size, 2);

        let req = mock.last_request().unwrap();
        let body: serde_json::Value = match req.body {
            crate::fetch::RequestBody::Json(ref body) => serde_json::from_str(body).unwrap(),
            ref other => panic!("unexpected body {other:?}"),
        };
        assert_eq!(
            body,
            serde_json::json!({"user_id": "olan", "event_id": 7, "enum": "NO_SHOW"})
        );
    }

    #[test]
    fn test_strike_change_touches_user_strikes() {
        let cache = QueryCache::new();
        cache.set(keys::list(&Filters::new().with("active", true)), &1);
        cache.set(users::keys::strikes(Some("olan")), &1);
        cache.set(users::keys::strikes(Some("kari")), &1);

        cache.apply(&invalidates_after_strike_change("olan"));
        assert!(!cache.is_fresh(&keys::list(&Filters::new().with("active", true))));
        assert!(!cache.is_fresh(&users::keys::strikes(Some("olan"))));
        assert!(cache.is_fresh(&users::keys::strikes(Some("kari"))));
    }
}
