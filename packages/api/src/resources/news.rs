use store::{Filters, Invalidation, PaginationResponse};

use crate::client::ApiClient;
use crate::error::{ApiError, RequestResponse};
use crate::models::{News, NewsMutate};
use crate::transport::Transport;

pub const NEWS_ENDPOINT: &str = "news";

pub mod keys {
    use store::{Filters, QueryKey};

    pub fn all() -> QueryKey {
        QueryKey::new("news")
    }

    pub fn list(filters: &Filters) -> QueryKey {
        all().push_str("list").push_filters(filters)
    }

    pub fn detail(id: i64) -> QueryKey {
        all().push_int(id)
    }
}

impl<T: Transport> ApiClient<T> {
    pub async fn get_news(&self, filters: &Filters) -> Result<PaginationResponse<News>, ApiError> {
        self.get(&format!("{NEWS_ENDPOINT}/"), filters).await
    }

    pub async fn get_news_item(&self, id: i64) -> Result<News, ApiError> {
        self.get(&format!("{NEWS_ENDPOINT}/{id}/"), &Filters::new()).await
    }

    pub async fn create_news(&self, item: &NewsMutate) -> Result<News, ApiError> {
        self.post(&format!("{NEWS_ENDPOINT}/"), item).await
    }

    pub async fn update_news(&self, id: i64, item: &NewsMutate) -> Result<News, ApiError> {
        self.put(&format!("{NEWS_ENDPOINT}/{id}/"), item).await
    }

    pub async fn delete_news(&self, id: i64) -> Result<RequestResponse, ApiError> {
        self.delete(&format!("{NEWS_ENDPOINT}/{id}/")).await
    }
}

/// After create, update or delete. Saved items are seeded under
/// [`keys::detail`] by the caller.
pub fn invalidates_after_news_change() -> Invalidation {
    Invalidation::new().invalidate(keys::all())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use store::ApiConfig;

    #[tokio::test]
    async fn test_news_crud_paths() {
        let mock = MockTransport::new();
        mock.respond_json(201, r#"{"id": 9, "title": "Hei"}"#);
        mock.respond_json(200, r#"{"id": 9, "title": "Hei igjen"}"#);
        mock.respond_json(200, r#"{"detail": "Nyheten ble slettet"}"#);
        let api = ApiClient::new(mock.clone(), ApiConfig::new("https://api.example.org/"));

        let created = api.create_news(&NewsMutate::default()).await.unwrap();
        let updated = api.update_news(created.id, &NewsMutate::default()).await.unwrap();
        assert_eq!(updated.title, "Hei igjen");
        let deleted = api.delete_news(created.id).await.unwrap();
        assert_eq!(deleted.detail, "Nyheten ble slettet");

        let urls: Vec<String> = mock.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                "https://api.example.org/news/",
                "https://api.example.org/news/9/",
                "https://api.example.org/news/9/",
            ]
        );
    }
}
