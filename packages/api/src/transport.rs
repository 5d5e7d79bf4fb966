//! # Transports
//!
//! [`Transport`] is the seam between the client and the network. The client
//! builds an [`HttpRequest`], hands it to a transport and classifies the
//! [`HttpResponse`] it gets back.
//!
//! - [`ReqwestTransport`] talks to the real API. `reqwest` uses the browser's
//!   `fetch` on `wasm32` and hyper on native targets, so the same code serves
//!   both the web bundle and native tests/tools.
//! - [`MockTransport`] records every request and answers from a queue of
//!   canned responses. It backs the client tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::error::ApiError;
use crate::fetch::{HttpRequest, HttpResponse, Method, RequestBody};

/// Async interface for sending a built request.
pub trait Transport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, ApiError>>;
}

#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn multipart(files: Vec<crate::fetch::UploadFile>) -> Result<reqwest::multipart::Form, ApiError> {
        let mut form = reqwest::multipart::Form::new();
        for file in files {
            let mut part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.name);
            if let Some(content_type) = file.content_type {
                part = part
                    .mime_str(&content_type)
                    .map_err(|e| ApiError::Decode(e.to_string()))?;
            }
            form = form.part("file", part);
        }
        Ok(form)
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
            Method::Put => self.client.put(&request.url),
            Method::Delete => self.client.delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(json) => builder.body(json),
            RequestBody::Multipart(files) => builder.multipart(Self::multipart(files)?),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            content_type,
            body,
        })
    }
}

/// In-memory transport for tests.
#[derive(Clone, Debug, Default)]
pub struct MockTransport {
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    responses: Arc<Mutex<VecDeque<Result<HttpResponse, ApiError>>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the answer for the next request.
    pub fn respond(&self, response: HttpResponse) -> &Self {
        self.responses.lock().unwrap_or_else(|p| p.into_inner()).push_back(Ok(response));
        self
    }

    /// Queue a JSON answer for the next request.
    pub fn respond_json(&self, status: u16, body: &str) -> &Self {
        self.respond(HttpResponse::json(status, body))
    }

    /// Queue a network failure for the next request.
    pub fn fail(&self, message: &str) -> &Self {
        self.responses
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push_back(Err(ApiError::Network(message.to_string())));
        self
    }

    /// Every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap_or_else(|p| p.into_inner()).last().cloned()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap_or_else(|p| p.into_inner()).push(request);
        self.responses
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no response queued".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn get(url: &str) -> HttpRequest {
        HttpRequest::build(Method::Get, url, &json!({}), None, Vec::new()).unwrap()
    }

    #[tokio::test]
    async fn test_mock_replays_in_order_and_records() {
        let mock = MockTransport::new();
        mock.respond_json(200, "[1]").respond_json(404, "{}");

        let first = mock.send(get("https://a.example/1/")).await.unwrap();
        let second = mock.send(get("https://a.example/2/")).await.unwrap();
        assert_eq!(first.body, "[1]");
        assert_eq!(second.status, 404);

        let urls: Vec<_> = mock.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(urls, vec!["https://a.example/1/", "https://a.example/2/"]);
    }

    #[tokio::test]
    async fn test_mock_without_response_is_network_error() {
        let mock = MockTransport::new();
        mock.fail("offline");
        assert_eq!(
            mock.send(get("https://a.example/")).await,
            Err(ApiError::Network("offline".to_string()))
        );
        assert!(matches!(
            mock.send(get("https://a.example/")).await,
            Err(ApiError::Network(_))
        ));
    }
}
