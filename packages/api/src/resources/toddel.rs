//! Töddel, the student magazine. Editions are addressed by number.

use store::{Filters, Invalidation, PaginationResponse};

use crate::client::ApiClient;
use crate::error::{ApiError, RequestResponse};
use crate::models::{Toddel, ToddelMutate};
use crate::transport::Transport;

pub const TODDEL_ENDPOINT: &str = "toddel";

pub mod keys {
    use store::{Filters, QueryKey};

    pub fn all() -> QueryKey {
        QueryKey::new("toddel")
    }

    pub fn list(filters: &Filters) -> QueryKey {
        all().push_filters(filters)
    }
}

impl<T: Transport> ApiClient<T> {
    pub async fn get_toddels(&self, filters: &Filters) -> Result<PaginationResponse<Toddel>, ApiError> {
        self.get(&format!("{TODDEL_ENDPOINT}/"), filters).await
    }

    pub async fn create_toddel(&self, toddel: &ToddelMutate) -> Result<Toddel, ApiError> {
        self.post(&format!("{TODDEL_ENDPOINT}/"), toddel).await
    }

    pub async fn update_toddel(&self, edition: i64, toddel: &ToddelMutate) -> Result<Toddel, ApiError> {
        self.put(&format!("{TODDEL_ENDPOINT}/{edition}/"), toddel).await
    }

    pub async fn delete_toddel(&self, edition: i64) -> Result<RequestResponse, ApiError> {
        self.delete(&format!("{TODDEL_ENDPOINT}/{edition}/")).await
    }
}

pub fn invalidates_after_toddel_change() -> Invalidation {
    Invalidation::new().invalidate(keys::all())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::Method;
    use crate::transport::MockTransport;
    use store::{ApiConfig, QueryCache};

    #[tokio::test]
    async fn test_update_by_edition() {
        let mock = MockTransport::new();
        mock.respond_json(200, r#"{"edition": 42, "title": "Vår", "pdf": "https://cdn.example.org/42.pdf"}"#);
        let api = ApiClient::new(mock.clone(), ApiConfig::new("https://api.example.org/"));
        let toddel = api
            .update_toddel(
                42,
                &ToddelMutate {
                    edition: 42,
                    title: "Vår".into(),
                    pdf: "https://cdn.example.org/42.pdf".into(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(toddel.edition, 42);

        let req = mock.last_request().unwrap();
        assert_eq!(req.method, Method::Put);
        assert_eq!(req.url, "https://api.example.org/toddel/42/");
    }

    #[test]
    fn test_change_invalidates_every_page() {
        let cache = QueryCache::new();
        cache.set(keys::list(&Filters::new().page(3)), &1);
        cache.apply(&invalidates_after_toddel_change());
        assert!(!cache.is_fresh(&keys::list(&Filters::new().page(3))));
    }
}
