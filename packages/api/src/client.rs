//! # API client
//!
//! [`ApiClient`] joins configuration, the current bearer token and a
//! [`Transport`]. Every resource module adds typed methods to it in its own
//! `impl` block; they all funnel into [`ApiClient::fetch`] or
//! [`ApiClient::fetch_files`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use store::{ApiConfig, Filters};

use crate::error::ApiError;
use crate::fetch::{classify, HttpRequest, Method, UploadFile};
use crate::transport::{ReqwestTransport, Transport};

#[derive(Clone, Debug)]
pub struct ApiClient<T: Transport = ReqwestTransport> {
    transport: T,
    config: ApiConfig,
    token: Option<String>,
}

impl ApiClient<ReqwestTransport> {
    /// Client talking to the real API.
    pub fn from_config(config: ApiConfig) -> Self {
        Self::new(ReqwestTransport::new(), config)
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, config: ApiConfig) -> Self {
        Self {
            transport,
            config,
            token: None,
        }
    }

    /// Builder method to authenticate requests. An empty token means anonymous.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `data` to `endpoint` and decode the answer.
    pub async fn fetch<R: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        data: serde_json::Value,
    ) -> Result<R, ApiError> {
        self.send(method, endpoint, data, Vec::new()).await
    }

    /// Upload `files` as multipart to `endpoint`.
    pub async fn fetch_files<R: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        files: Vec<UploadFile>,
    ) -> Result<R, ApiError> {
        self.send(method, endpoint, serde_json::Value::Object(Default::default()), files)
            .await
    }

    async fn send<R: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        data: serde_json::Value,
        files: Vec<UploadFile>,
    ) -> Result<R, ApiError> {
        let url = self.config.url_for(endpoint);
        let request = HttpRequest::build(method, &url, &data, self.token(), files)?;
        tracing::debug!("{} {}", method.as_str(), request.url);

        let result = match self.transport.send(request).await {
            Ok(response) => classify(response),
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            tracing::warn!("{} {endpoint} failed: {e}", method.as_str());
        }
        result
    }

    pub async fn get<R: DeserializeOwned>(&self, endpoint: &str, filters: &Filters) -> Result<R, ApiError> {
        self.fetch(Method::Get, endpoint, filters.to_json()).await
    }

    pub async fn post<B: Serialize, R: DeserializeOwned>(&self, endpoint: &str, body: &B) -> Result<R, ApiError> {
        self.fetch(Method::Post, endpoint, to_data(body)?).await
    }

    pub async fn put<B: Serialize, R: DeserializeOwned>(&self, endpoint: &str, body: &B) -> Result<R, ApiError> {
        self.fetch(Method::Put, endpoint, to_data(body)?).await
    }

    pub async fn delete<R: DeserializeOwned>(&self, endpoint: &str) -> Result<R, ApiError> {
        self.fetch(Method::Delete, endpoint, serde_json::json!({})).await
    }
}

fn to_data<B: Serialize>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RequestResponse;
    use crate::fetch::RequestBody;
    use crate::transport::MockTransport;

    fn client(mock: &MockTransport) -> ApiClient<MockTransport> {
        ApiClient::new(mock.clone(), ApiConfig::new("https://api.example.org/"))
    }

    #[tokio::test]
    async fn test_get_with_filters_and_token() {
        let mock = MockTransport::new();
        mock.respond_json(200, r#"{"detail": "ok"}"#);
        let api = client(&mock).with_token(Some("secret".to_string()));

        let res: RequestResponse = api
            .get("events/", &Filters::new().with("search", "fest").page(2))
            .await
            .unwrap();
        assert_eq!(res.detail, "ok");

        let req = mock.last_request().unwrap();
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.url, "https://api.example.org/events/?page=2&search=fest");
        assert_eq!(req.header("Authorization"), Some("Bearer secret"));
    }

    #[tokio::test]
    async fn test_empty_token_is_anonymous() {
        let mock = MockTransport::new();
        mock.respond_json(200, "{}");
        let api = client(&mock).with_token(Some(String::new()));
        assert!(!api.is_authenticated());

        let _: RequestResponse = api.delete("news/1/").await.unwrap();
        let req = mock.last_request().unwrap();
        assert!(req.header("Authorization").is_none());
        assert_eq!(req.method, Method::Delete);
    }

    #[tokio::test]
    async fn test_post_serialises_body() {
        #[derive(Serialize)]
        struct Body {
            title: String,
        }
        let mock = MockTransport::new();
        mock.respond_json(201, r#"{"detail": "laget"}"#);

        let _: RequestResponse = client(&mock)
            .post("news/", &Body { title: "Hei".to_string() })
            .await
            .unwrap();
        assert_eq!(
            mock.last_request().unwrap().body,
            RequestBody::Json(r#"{"title":"Hei"}"#.to_string())
        );
    }

    #[tokio::test]
    async fn test_error_passes_through() {
        let mock = MockTransport::new();
        mock.respond_json(400, r#"{"detail": "Ugyldig"}"#);
        let err = client(&mock)
            .put::<_, RequestResponse>("news/1/", &serde_json::json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.detail(), "Ugyldig");

        mock.fail("offline");
        let err = client(&mock).get::<RequestResponse>("news/", &Filters::new()).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}
