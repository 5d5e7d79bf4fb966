//! QR codes pointing at arbitrary URLs. The server renders the image.

use store::{Filters, Invalidation};

use crate::client::ApiClient;
use crate::error::{ApiError, RequestResponse};
use crate::models::{QrCode, QrCodeCreate};
use crate::transport::Transport;

pub const QR_CODES_ENDPOINT: &str = "qr-codes";

pub mod keys {
    use store::QueryKey;

    pub fn all() -> QueryKey {
        QueryKey::new("qr-codes")
    }

    pub fn detail(id: i64) -> QueryKey {
        all().push_int(id)
    }
}

impl<T: Transport> ApiClient<T> {
    /// The signed-in user's QR codes.
    pub async fn get_qr_codes(&self) -> Result<Vec<QrCode>, ApiError> {
        self.get(&format!("{QR_CODES_ENDPOINT}/"), &Filters::new()).await
    }

    pub async fn get_qr_code(&self, id: i64) -> Result<QrCode, ApiError> {
        self.get(&format!("{QR_CODES_ENDPOINT}/{id}/"), &Filters::new())
            .await
    }

    pub async fn create_qr_code(&self, qr_code: &QrCodeCreate) -> Result<QrCode, ApiError> {
        self.post(&format!("{QR_CODES_ENDPOINT}/"), qr_code).await
    }

    pub async fn delete_qr_code(&self, id: i64) -> Result<RequestResponse, ApiError> {
        self.delete(&format!("{QR_CODES_ENDPOINT}/{id}/")).await
    }
}

pub fn invalidates_after_qr_code_change() -> Invalidation {
    Invalidation::new().invalidate(keys::all())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use store::ApiConfig;

    #[tokio::test]
    async fn test_list_qr_codes() {
        let mock = MockTransport::new();
        mock.respond_json(
            200,
            r#"[{"id": 1, "name": "Stand", "url": "https://tihlde.org", "image": "data:image/png;base64,AA=="}]"#,
        );
        let api = ApiClient::new(mock.clone(), ApiConfig::new("https://api.example.org/"));
        let codes = api.get_qr_codes().await.unwrap();
        assert_eq!(codes.len(), 1);
        assert_eq!(codes[0].name, "Stand");
        assert_eq!(mock.last_request().unwrap().url, "https://api.example.org/qr-codes/");
    }

    #[test]
    fn test_detail_under_all() {
        assert!(keys::detail(1).starts_with(&keys::all()));
    }
}
