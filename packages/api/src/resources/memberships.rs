//! Group memberships and membership histories.
//!
//! Memberships live under `groups/{slug}/memberships/`, past memberships
//! under `groups/{slug}/membership-histories/`.

use serde_json::json;
use store::{Filters, Invalidation, PaginationResponse};

use crate::client::ApiClient;
use crate::error::{ApiError, RequestResponse};
use crate::models::{Membership, MembershipHistory, MembershipHistoryMutate, MembershipType};
use crate::resources::groups::{self, GROUPS_ENDPOINT};
use crate::transport::Transport;

pub const MEMBERSHIPS_ENDPOINT: &str = "memberships";
pub const MEMBERSHIP_HISTORIES_ENDPOINT: &str = "membership-histories";

pub mod keys {
    use store::{Filters, QueryKey};

    pub fn all(slug: &str) -> QueryKey {
        QueryKey::new("membership").push_str(slug)
    }

    pub fn list(slug: &str, filters: &Filters) -> QueryKey {
        all(slug).push_filters(filters)
    }

    pub fn histories(slug: &str) -> QueryKey {
        all(slug).push_str("membership-history")
    }

    pub fn histories_list(slug: &str, filters: &Filters) -> QueryKey {
        histories(slug).push_filters(filters)
    }
}

fn memberships_path(slug: &str) -> String {
    format!("{GROUPS_ENDPOINT}/{slug}/{MEMBERSHIPS_ENDPOINT}/")
}

fn histories_path(slug: &str) -> String {
    format!("{GROUPS_ENDPOINT}/{slug}/{MEMBERSHIP_HISTORIES_ENDPOINT}/")
}

impl<T: Transport> ApiClient<T> {
    pub async fn get_memberships(
        &self,
        slug: &str,
        filters: &Filters,
    ) -> Result<PaginationResponse<Membership>, ApiError> {
        self.get(&memberships_path(slug), filters).await
    }

    pub async fn get_membership_histories(
        &self,
        slug: &str,
        filters: &Filters,
    ) -> Result<PaginationResponse<MembershipHistory>, ApiError> {
        self.get(&histories_path(slug), filters).await
    }

    pub async fn create_membership(&self, slug: &str, user_id: &str) -> Result<Membership, ApiError> {
        self.post(&memberships_path(slug), &json!({ "user": { "user_id": user_id } }))
            .await
    }

    /// Promote to leader or demote to member.
    pub async fn update_membership(
        &self,
        slug: &str,
        user_id: &str,
        membership_type: MembershipType,
    ) -> Result<Membership, ApiError> {
        self.put(
            &format!("{}{user_id}/", memberships_path(slug)),
            &json!({ "membership_type": membership_type }),
        )
        .await
    }

    pub async fn delete_membership(&self, slug: &str, user_id: &str) -> Result<RequestResponse, ApiError> {
        self.delete(&format!("{}{user_id}/", memberships_path(slug)))
            .await
    }

    pub async fn update_membership_history(
        &self,
        slug: &str,
        id: &str,
        history: &MembershipHistoryMutate,
    ) -> Result<MembershipHistory, ApiError> {
        self.put(&format!("{}{id}/", histories_path(slug)), history)
            .await
    }

    pub async fn delete_membership_history(&self, slug: &str, id: &str) -> Result<RequestResponse, ApiError> {
        self.delete(&format!("{}{id}/", histories_path(slug))).await
    }
}

pub fn invalidates_after_membership_change(slug: &str) -> Invalidation {
    Invalidation::new().invalidate(keys::all(slug))
}

/// A new leader can change what the viewer may do in the group.
pub fn invalidates_after_membership_update(slug: &str) -> Invalidation {
    Invalidation::new()
        .invalidate(groups::keys::detail(slug))
        .invalidate(keys::all(slug))
}

pub fn invalidates_after_history_change(slug: &str) -> Invalidation {
    Invalidation::new().invalidate(keys::histories(slug))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{Method, RequestBody};
    use crate::transport::MockTransport;
    use store::ApiConfig;

    #[tokio::test]
    async fn test_update_membership_sends_screaming_type() {
        let mock = MockTransport::new();
        mock.respond_json(
            200,
            r#"{"user": {"user_id": "olan"}, "group": {"slug": "index", "name": "Index"}, "membership_type": "LEADER"}"#,
        );
        let api = ApiClient::new(mock.clone(), ApiConfig::new("https://api.example.org/"));

        let membership = api
            .update_membership("index", "olan", MembershipType::Leader)
            .await
            .unwrap();
        assert_eq!(membership.membership_type, MembershipType::Leader);

        let req = mock.last_request().unwrap();
        assert_eq!(req.method, Method::Put);
        assert_eq!(req.url, "https://api.example.org/groups/index/memberships/olan/");
        assert_eq!(req.body, RequestBody::Json(r#"{"membership_type":"LEADER"}"#.to_string()));
    }

    #[test]
    fn test_history_key_is_under_membership_root() {
        assert!(keys::histories("index").starts_with(&keys::all("index")));
        let changes = invalidates_after_membership_update("index");
        assert_eq!(changes.invalidate.len(), 2);
    }
}
