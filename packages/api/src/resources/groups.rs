//! # Groups, laws and fines
//!
//! | Resource | Endpoint |
//! |----------|----------|
//! | groups | `groups/`, `groups/{slug}/`, `groups/{slug}/statistics/`, `groups/{slug}/forms/` |
//! | laws | `groups/{slug}/laws/[{id}/]` |
//! | fines | `groups/{slug}/fines/[{id}/]`, `.../fines/{id}/defense/`, `.../fines/statistics/` |
//! | fines per user | `groups/{slug}/fines/users/[{user_id}/]` |
//! | batch updates | `groups/{slug}/fines/batch-update/[{user_id}/]` |
//!
//! Every fine mutation invalidates the whole `["groups", slug, "fines"]`
//! subtree: statistics and per-user sums all change together.

use store::{Filters, Invalidation, PaginationResponse};

use crate::client::ApiClient;
use crate::error::{ApiError, RequestResponse};
use crate::models::{
    Form, Group, GroupFine, GroupFineBatchMutate, GroupFineCreate, GroupFineDefenseMutate,
    GroupFineMutate, GroupFineStatistics, GroupLaw, GroupLawMutate, GroupList,
    GroupMemberStatistics, GroupMutate, GroupUserFine,
};
use crate::transport::Transport;

pub const GROUPS_ENDPOINT: &str = "groups";
pub const GROUP_LAWS_ENDPOINT: &str = "laws";
pub const GROUP_FINES_ENDPOINT: &str = "fines";

pub mod keys {
    use store::{Filters, QueryKey};

    pub fn all() -> QueryKey {
        QueryKey::new("groups")
    }

    pub fn list(filters: &Filters) -> QueryKey {
        all().push_str("list").push_filters(filters)
    }

    pub fn detail(slug: &str) -> QueryKey {
        all().push_str(slug)
    }

    pub fn statistics(slug: &str) -> QueryKey {
        detail(slug).push_str("statistics")
    }

    pub fn forms(slug: &str) -> QueryKey {
        detail(slug).push_str("forms")
    }

    pub fn laws(slug: &str) -> QueryKey {
        detail(slug).push_str("laws")
    }

    pub fn fines(slug: &str) -> QueryKey {
        detail(slug).push_str("fines")
    }

    pub fn fines_list(slug: &str, filters: &Filters) -> QueryKey {
        fines(slug).push_str("list").push_filters(filters)
    }

    pub fn fines_statistics(slug: &str) -> QueryKey {
        fines(slug).push_str("statistics")
    }

    pub fn users_fines(slug: &str, filters: &Filters) -> QueryKey {
        fines(slug).push_str("users").push_filters(filters)
    }

    pub fn user_fines(slug: &str, user_id: &str, filters: &Filters) -> QueryKey {
        fines(slug).push_str("user").push_str(user_id).push_filters(filters)
    }
}

fn group_path(slug: &str) -> String {
    format!("{GROUPS_ENDPOINT}/{slug}/")
}

fn laws_path(slug: &str) -> String {
    format!("{GROUPS_ENDPOINT}/{slug}/{GROUP_LAWS_ENDPOINT}/")
}

fn fines_path(slug: &str) -> String {
    format!("{GROUPS_ENDPOINT}/{slug}/{GROUP_FINES_ENDPOINT}/")
}

impl<T: Transport> ApiClient<T> {
    /// Filters: `overview`, `type`.
    pub async fn get_groups(&self, filters: &Filters) -> Result<Vec<GroupList>, ApiError> {
        self.get(&format!("{GROUPS_ENDPOINT}/"), filters).await
    }

    pub async fn get_group(&self, slug: &str) -> Result<Group, ApiError> {
        self.get(&group_path(slug), &Filters::new()).await
    }

    pub async fn get_group_statistics(&self, slug: &str) -> Result<GroupMemberStatistics, ApiError> {
        self.get(&format!("{}statistics/", group_path(slug)), &Filters::new())
            .await
    }

    pub async fn update_group(&self, slug: &str, group: &GroupMutate) -> Result<Group, ApiError> {
        self.put(&group_path(slug), group).await
    }

    /// Application forms owned by the group.
    pub async fn get_group_forms(&self, slug: &str) -> Result<Vec<Form>, ApiError> {
        self.get(&format!("{}forms/", group_path(slug)), &Filters::new())
            .await
    }

    pub async fn get_group_laws(&self, slug: &str) -> Result<Vec<GroupLaw>, ApiError> {
        self.get(&laws_path(slug), &Filters::new()).await
    }

    pub async fn create_group_law(&self, slug: &str, law: &GroupLawMutate) -> Result<GroupLaw, ApiError> {
        self.post(&laws_path(slug), law).await
    }

    pub async fn update_group_law(
        &self,
        slug: &str,
        law_id: &str,
        law: &GroupLawMutate,
    ) -> Result<GroupLaw, ApiError> {
        self.put(&format!("{}{law_id}/", laws_path(slug)), law).await
    }

    pub async fn delete_group_law(&self, slug: &str, law_id: &str) -> Result<RequestResponse, ApiError> {
        self.delete(&format!("{}{law_id}/", laws_path(slug))).await
    }

    /// Filters: `approved`, `payed`.
    pub async fn get_group_fines(
        &self,
        slug: &str,
        filters: &Filters,
    ) -> Result<PaginationResponse<GroupFine>, ApiError> {
        self.get(&fines_path(slug), filters).await
    }

    pub async fn get_group_fines_statistics(&self, slug: &str) -> Result<GroupFineStatistics, ApiError> {
        self.get(&format!("{}statistics/", fines_path(slug)), &Filters::new())
            .await
    }

    pub async fn get_group_users_fines(
        &self,
        slug: &str,
        filters: &Filters,
    ) -> Result<PaginationResponse<GroupUserFine>, ApiError> {
        self.get(&format!("{}users/", fines_path(slug)), filters).await
    }

    pub async fn get_group_user_fines(
        &self,
        slug: &str,
        user_id: &str,
        filters: &Filters,
    ) -> Result<PaginationResponse<GroupFine>, ApiError> {
        self.get(&format!("{}users/{user_id}/", fines_path(slug)), filters)
            .await
    }

    pub async fn create_group_fine(&self, slug: &str, fine: &GroupFineCreate) -> Result<GroupFine, ApiError> {
        self.post(&fines_path(slug), fine).await
    }

    pub async fn update_group_fine(
        &self,
        slug: &str,
        fine_id: &str,
        fine: &GroupFineMutate,
    ) -> Result<GroupFine, ApiError> {
        self.put(&format!("{}{fine_id}/", fines_path(slug)), fine).await
    }

    /// The fined user's explanation.
    pub async fn update_group_fine_defense(
        &self,
        slug: &str,
        fine_id: &str,
        defense: &GroupFineDefenseMutate,
    ) -> Result<GroupFine, ApiError> {
        self.put(&format!("{}{fine_id}/defense/", fines_path(slug)), defense)
            .await
    }

    pub async fn batch_update_group_fines(
        &self,
        slug: &str,
        batch: &GroupFineBatchMutate,
    ) -> Result<RequestResponse, ApiError> {
        self.put(&format!("{}batch-update/", fines_path(slug)), batch)
            .await
    }

    /// Apply `data` to every fine of one user.
    pub async fn batch_update_user_group_fines(
        &self,
        slug: &str,
        user_id: &str,
        data: &GroupFineMutate,
    ) -> Result<RequestResponse, ApiError> {
        self.put(&format!("{}batch-update/{user_id}/", fines_path(slug)), data)
            .await
    }

    pub async fn delete_group_fine(&self, slug: &str, fine_id: &str) -> Result<RequestResponse, ApiError> {
        self.delete(&format!("{}{fine_id}/", fines_path(slug))).await
    }
}

/// After a group update. The caller seeds [`keys::detail`].
pub fn invalidates_after_group_update() -> Invalidation {
    Invalidation::new().invalidate(keys::list(&Filters::new()))
}

pub fn invalidates_after_law_change(slug: &str) -> Invalidation {
    Invalidation::new().invalidate(keys::laws(slug))
}

pub fn invalidates_after_fine_change(slug: &str) -> Invalidation {
    Invalidation::new().invalidate(keys::fines(slug))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use store::{ApiConfig, QueryCache};

    fn client(mock: &MockTransport) -> ApiClient<MockTransport> {
        ApiClient::new(mock.clone(), ApiConfig::new("https://api.example.org/"))
    }

    #[tokio::test]
    async fn test_fine_paths() {
        let mock = MockTransport::new();
        for _ in 0..4 {
            mock.respond_json(200, r#"{"detail": "ok"}"#);
        }
        let api = client(&mock);

        api.batch_update_group_fines(
            "index",
            &GroupFineBatchMutate {
                fine_ids: vec!["f1".into()],
                data: GroupFineMutate {
                    approved: Some(true),
                    ..Default::default()
                },
            },
        )
        .await
        .unwrap();
        api.batch_update_user_group_fines("index", "olan", &GroupFineMutate::default())
            .await
            .unwrap();
        api.delete_group_fine("index", "f1").await.unwrap();
        api.delete_group_law("index", "l1").await.unwrap();

        let urls: Vec<String> = mock.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                "https://api.example.org/groups/index/fines/batch-update/",
                "https://api.example.org/groups/index/fines/batch-update/olan/",
                "https://api.example.org/groups/index/fines/f1/",
                "https://api.example.org/groups/index/laws/l1/",
            ]
        );
    }

    #[tokio::test]
    async fn test_groups_list_is_plain_array() {
        let mock = MockTransport::new();
        mock.respond_json(200, r#"[{"slug": "hs", "name": "Hovedstyret", "type": "BOARD"}]"#);
        let groups = client(&mock)
            .get_groups(&Filters::new().with("overview", true))
            .await
            .unwrap();
        assert_eq!(groups[0].slug, "hs");
    }

    #[test]
    fn test_fine_change_invalidates_fine_subtree_only() {
        let cache = QueryCache::new();
        cache.set(keys::fines_statistics("index"), &1);
        cache.set(keys::user_fines("index", "olan", &Filters::new()), &1);
        cache.set(keys::laws("index"), &1);
        cache.set(keys::fines_statistics("hs"), &1);

        cache.apply(&invalidates_after_fine_change("index"));
        assert!(!cache.is_fresh(&keys::fines_statistics("index")));
        assert!(!cache.is_fresh(&keys::user_fines("index", "olan", &Filters::new())));
        assert!(cache.is_fresh(&keys::laws("index")));
        assert!(cache.is_fresh(&keys::fines_statistics("hs")));
    }
}
