use store::{Filters, Invalidation, PaginationResponse};

use crate::client::ApiClient;
use crate::error::{ApiError, RequestResponse};
use crate::models::{JobPost, JobPostMutate};
use crate::transport::Transport;

pub const JOBPOSTS_ENDPOINT: &str = "jobposts";

pub mod keys {
    use store::{Filters, QueryKey};

    pub fn all() -> QueryKey {
        QueryKey::new("jobpost")
    }

    pub fn list(filters: &Filters) -> QueryKey {
        all().push_str("list").push_filters(filters)
    }

    pub fn detail(id: i64) -> QueryKey {
        all().push_int(id)
    }
}

impl<T: Transport> ApiClient<T> {
    /// Filters: `search`, `expired`, `job_type`, `classes`.
    pub async fn get_job_posts(&self, filters: &Filters) -> Result<PaginationResponse<JobPost>, ApiError> {
        self.get(&format!("{JOBPOSTS_ENDPOINT}/"), filters).await
    }

    pub async fn get_job_post(&self, id: i64) -> Result<JobPost, ApiError> {
        self.get(&format!("{JOBPOSTS_ENDPOINT}/{id}/"), &Filters::new()).await
    }

    pub async fn create_job_post(&self, item: &JobPostMutate) -> Result<JobPost, ApiError> {
        self.post(&format!("{JOBPOSTS_ENDPOINT}/"), item).await
    }

    pub async fn update_job_post(&self, id: i64, item: &JobPostMutate) -> Result<JobPost, ApiError> {
        self.put(&format!("{JOBPOSTS_ENDPOINT}/{id}/"), item).await
    }

    pub async fn delete_job_post(&self, id: i64) -> Result<RequestResponse, ApiError> {
        self.delete(&format!("{JOBPOSTS_ENDPOINT}/{id}/")).await
    }
}

pub fn invalidates_after_job_post_change() -> Invalidation {
    Invalidation::new().invalidate(keys::all())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use store::{ApiConfig, QueryCache};

    #[tokio::test]
    async fn test_filtered_list() {
        let mock = MockTransport::new();
        mock.respond_json(200, r#"{"count": 1, "next": 2, "results": [{"id": 1, "title": "Trainee"}]}"#);
        let api = ApiClient::new(mock.clone(), ApiConfig::new("https://api.example.org/"));

        let page = api
            .get_job_posts(&Filters::new().with("expired", true).page(1))
            .await
            .unwrap();
        assert_eq!(page.next, Some(2));
        assert_eq!(
            mock.last_request().unwrap().url,
            "https://api.example.org/jobposts/?expired=true&page=1"
        );
    }

    #[test]
    fn test_change_invalidates_lists_and_details() {
        let cache = QueryCache::new();
        cache.set(keys::list(&Filters::new().with("search", "x")), &1);
        cache.set(keys::detail(1), &1);
        cache.apply(&invalidates_after_job_post_change());
        assert!(!cache.is_fresh(&keys::detail(1)));
        assert!(!cache.is_fresh(&keys::list(&Filters::new().with("search", "x"))));
    }
}
