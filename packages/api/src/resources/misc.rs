//! # Warnings, cheatsheets and file upload
//!
//! | Call | Endpoint |
//! |------|----------|
//! | [`get_warnings`](ApiClient::get_warnings) | `GET warnings/` |
//! | [`get_cheatsheets`](ApiClient::get_cheatsheets) | `GET cheatsheets/{STUDY}/{grade}/files/` |
//! | [`upload_file`](ApiClient::upload_file) | `POST upload/` (files) |
//!
//! Which warnings a user has dismissed is kept client-side; see
//! [`crate::models::unread_warnings`].

use store::{Filters, PaginationResponse};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::fetch::{Method, UploadFile};
use crate::models::{Cheatsheet, CheatsheetStudy, FileUploadResponse, Warning};
use crate::transport::Transport;

pub const WARNINGS_ENDPOINT: &str = "warnings";
pub const CHEATSHEETS_ENDPOINT: &str = "cheatsheets";
pub const UPLOAD_ENDPOINT: &str = "upload";

pub mod keys {
    use store::{Filters, QueryKey};

    use crate::models::CheatsheetStudy;

    pub fn warnings() -> QueryKey {
        QueryKey::new("warnings")
    }

    pub fn cheatsheets(study: CheatsheetStudy, grade: u8, filters: &Filters) -> QueryKey {
        QueryKey::new("cheatsheet")
            .push_str(study.path_segment())
            .push_int(i64::from(grade))
            .push_filters(filters)
    }
}

impl<T: Transport> ApiClient<T> {
    pub async fn get_warnings(&self) -> Result<Vec<Warning>, ApiError> {
        self.get(&format!("{WARNINGS_ENDPOINT}/"), &Filters::new()).await
    }

    /// Filters: `search`.
    pub async fn get_cheatsheets(
        &self,
        study: CheatsheetStudy,
        grade: u8,
        filters: &Filters,
    ) -> Result<PaginationResponse<Cheatsheet>, ApiError> {
        let endpoint = format!(
            "{CHEATSHEETS_ENDPOINT}/{}/{grade}/files/",
            study.path_segment()
        );
        self.get(&endpoint, filters).await
    }

    /// Upload a single file and get back its public URL.
    pub async fn upload_file(&self, file: UploadFile) -> Result<FileUploadResponse, ApiError> {
        self.fetch_files(Method::Post, &format!("{UPLOAD_ENDPOINT}/"), vec![file])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use store::ApiConfig;

    #[tokio::test]
    async fn test_cheatsheet_path_uses_legacy_digsec_segment() {
        let mock = MockTransport::new();
        mock.respond_json(200, r#"{"count": 0, "next": null, "previous": null, "results": []}"#);
        let api = ApiClient::new(mock.clone(), ApiConfig::new("https://api.example.org/"));
        api.get_cheatsheets(CheatsheetStudy::Digsec, 2, &Filters::new())
            .await
            .unwrap();
        assert_eq!(
            mock.last_request().unwrap().url,
            "https://api.example.org/cheatsheets/DIGINC/2/files/"
        );
    }

    #[tokio::test]
    async fn test_upload_file_returns_url() {
        let mock = MockTransport::new();
        mock.respond_json(201, r#"{"url": "https://cdn.example.org/a.png"}"#);
        let api = ApiClient::new(mock.clone(), ApiConfig::new("https://api.example.org/"))
            .with_token(Some("t".into()));
        let res = api
            .upload_file(UploadFile::new("a.png", vec![0x89, 0x50]).with_content_type("image/png"))
            .await
            .unwrap();
        assert_eq!(res.url, "https://cdn.example.org/a.png");
        assert_eq!(mock.last_request().unwrap().url, "https://api.example.org/upload/");
    }

    #[test]
    fn test_cheatsheet_keys_differ_by_grade() {
        assert_ne!(
            keys::cheatsheets(CheatsheetStudy::Dataing, 1, &Filters::new()),
            keys::cheatsheets(CheatsheetStudy::Dataing, 2, &Filters::new())
        );
    }
}
