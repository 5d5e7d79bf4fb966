//! Short links: `s.tihlde.org/{name}` style redirects owned by a user.

use store::{Filters, Invalidation};

use crate::client::ApiClient;
use crate::error::{ApiError, RequestResponse};
use crate::models::ShortLink;
use crate::transport::Transport;

pub const SHORT_LINKS_ENDPOINT: &str = "short-links";

pub mod keys {
    use store::QueryKey;

    pub fn all() -> QueryKey {
        QueryKey::new("short-link")
    }
}

impl<T: Transport> ApiClient<T> {
    pub async fn get_short_links(&self) -> Result<Vec<ShortLink>, ApiError> {
        self.get(&format!("{SHORT_LINKS_ENDPOINT}/"), &Filters::new())
            .await
    }

    pub async fn create_short_link(&self, link: &ShortLink) -> Result<ShortLink, ApiError> {
        self.post(&format!("{SHORT_LINKS_ENDPOINT}/"), link).await
    }

    pub async fn delete_short_link(&self, name: &str) -> Result<RequestResponse, ApiError> {
        self.delete(&format!("{SHORT_LINKS_ENDPOINT}/{name}/")).await
    }
}

pub fn invalidates_after_short_link_change() -> Invalidation {
    Invalidation::new().invalidate(keys::all())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use store::ApiConfig;

    #[tokio::test]
    async fn test_duplicate_name_is_field_error() {
        let mock = MockTransport::new();
        mock.respond_json(400, r#"{"name": ["Navnet er allerede i bruk"]}"#);
        let api = ApiClient::new(mock.clone(), ApiConfig::new("https://api.example.org/"));
        let err = api
            .create_short_link(&ShortLink {
                name: "kontakt".into(),
                url: "https://tihlde.org/kontakt".into(),
            })
            .await
            .unwrap_err();
        assert!(err.is_expected());
        assert_eq!(err.field("name"), Some("Navnet er allerede i bruk"));
    }

    #[tokio::test]
    async fn test_delete_by_name() {
        let mock = MockTransport::new();
        mock.respond_json(200, r#"{"detail": "Linken ble slettet"}"#);
        let api = ApiClient::new(mock.clone(), ApiConfig::new("https://api.example.org/"));
        api.delete_short_link("kontakt").await.unwrap();
        assert_eq!(
            mock.last_request().unwrap().url,
            "https://api.example.org/short-links/kontakt/"
        );
    }
}
