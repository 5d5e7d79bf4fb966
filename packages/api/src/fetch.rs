//! # Request construction and response classification
//!
//! The transport-independent half of the fetch wrapper. [`HttpRequest::build`]
//! turns a method, URL, data object, optional bearer token and optional files
//! into a concrete request:
//!
//! | Case | URL | Body | `Content-Type` |
//! |------|-----|------|----------------|
//! | `GET` | data appended as query string | none | `application/json` |
//! | other, no files | unchanged | data as JSON | `application/json` |
//! | files | unchanged | multipart, each file under `file` | set by transport |
//!
//! [`classify`] is the reverse: a 2xx JSON response is decoded into the
//! expected type, anything else becomes an [`ApiError`].

use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// A file selected for upload.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(String),
    /// Every file is sent as a part named `file`.
    Multipart(Vec<UploadFile>),
}

/// A fully built request, ready for a [`crate::Transport`].
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn build(
        method: Method,
        url: &str,
        data: &serde_json::Value,
        token: Option<&str>,
        files: Vec<UploadFile>,
    ) -> Result<Self, ApiError> {
        let mut headers = Vec::new();
        if files.is_empty() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        if let Some(token) = token {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }

        let is_get = method == Method::Get;
        let url = if is_get {
            args_to_params(url, data)?
        } else {
            url.to_string()
        };

        let body = if !files.is_empty() {
            RequestBody::Multipart(files)
        } else if is_get {
            RequestBody::Empty
        } else {
            let json = serde_json::to_string(data).map_err(|e| ApiError::Decode(e.to_string()))?;
            RequestBody::Json(json)
        };

        Ok(Self {
            method,
            url,
            headers,
            body,
        })
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Append the fields of a JSON object to `url` as query parameters.
///
/// `null` values are skipped, arrays repeat the key once per element, and
/// nested objects are sent as their JSON text.
pub fn args_to_params(url: &str, data: &serde_json::Value) -> Result<String, ApiError> {
    let serde_json::Value::Object(map) = data else {
        return Ok(url.to_string());
    };
    if map.is_empty() {
        return Ok(url.to_string());
    }
    let mut parsed = Url::parse(url).map_err(|e| ApiError::InvalidUrl(format!("{url}: {e}")))?;
    {
        let mut pairs = parsed.query_pairs_mut();
        for (key, value) in map {
            match value {
                serde_json::Value::Null => {}
                serde_json::Value::Array(items) => {
                    for item in items {
                        if let Some(text) = param_text(item) {
                            pairs.append_pair(key, &text);
                        }
                    }
                }
                other => {
                    if let Some(text) = param_text(other) {
                        pairs.append_pair(key, &text);
                    }
                }
            }
        }
    }
    Ok(parsed.to_string())
}

fn param_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// A response as seen by the client, independent of the HTTP library.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    /// A JSON response, mostly for tests and the mock transport.
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: String::new(),
            content_type: Some("application/json".to_string()),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"))
    }
}

/// Decode a successful JSON response or turn it into an [`ApiError`].
pub fn classify<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    if response.is_success() && response.is_json() {
        return serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()));
    }
    Err(ApiError::from_response(
        response.status,
        &response.status_text,
        &response.body,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RequestResponse;
    use serde_json::json;

    #[test]
    fn test_get_serialises_query_and_has_no_body() {
        let req = HttpRequest::build(
            Method::Get,
            "https://api.example.org/events/",
            &json!({"page": 2, "search": "bed pres", "expired": false, "category": null}),
            Some("tok"),
            Vec::new(),
        )
        .unwrap();

        assert_eq!(req.body, RequestBody::Empty);
        assert!(req.url.starts_with("https://api.example.org/events/?"));
        assert!(req.url.contains("page=2"));
        assert!(req.url.contains("search=bed+pres"));
        assert!(req.url.contains("expired=false"));
        assert!(!req.url.contains("category"));
        assert_eq!(req.header("authorization"), Some("Bearer tok"));
        assert_eq!(req.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn test_get_without_data_keeps_url() {
        let req = HttpRequest::build(Method::Get, "https://api.example.org/news/1/", &json!({}), None, Vec::new()).unwrap();
        assert_eq!(req.url, "https://api.example.org/news/1/");
        assert!(req.header("Authorization").is_none());
    }

    #[test]
    fn test_arrays_repeat_key() {
        let url = args_to_params("https://api.example.org/users/", &json!({"in_group": ["index", "hs"]})).unwrap();
        assert!(url.ends_with("?in_group=index&in_group=hs"));
    }

    #[test]
    fn test_mutation_sends_json() {
        let req = HttpRequest::build(
            Method::Post,
            "https://api.example.org/news/",
            &json!({"title": "Hei"}),
            None,
            Vec::new(),
        )
        .unwrap();
        assert_eq!(req.url, "https://api.example.org/news/");
        assert_eq!(req.body, RequestBody::Json(r#"{"title":"Hei"}"#.to_string()));
    }

    #[test]
    fn test_files_use_multipart_without_json_header() {
        let files = vec![
            UploadFile::new("a.png", vec![1, 2, 3]),
            UploadFile::new("b.png", vec![4]),
        ];
        let req = HttpRequest::build(
            Method::Post,
            "https://api.example.org/galleries/1/pictures/",
            &json!({}),
            Some("tok"),
            files.clone(),
        )
        .unwrap();
        assert_eq!(req.body, RequestBody::Multipart(files));
        assert!(req.header("Content-Type").is_none());
        assert_eq!(req.header("Authorization"), Some("Bearer tok"));
    }

    #[test]
    fn test_classify_success() {
        let res: RequestResponse = classify(HttpResponse::json(200, r#"{"detail": "ok"}"#)).unwrap();
        assert_eq!(res.detail, "ok");
    }

    #[test]
    fn test_classify_error_status() {
        let err = classify::<RequestResponse>(HttpResponse::json(403, r#"{"detail": "Ingen tilgang"}"#)).unwrap_err();
        assert_eq!(err.detail(), "Ingen tilgang");
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn test_classify_non_json_success_is_error() {
        let response = HttpResponse {
            status: 200,
            status_text: "OK".to_string(),
            content_type: Some("text/html".to_string()),
            body: "<html></html>".to_string(),
        };
        let err = classify::<RequestResponse>(response).unwrap_err();
        assert_eq!(err.detail(), "OK");
    }

    #[test]
    fn test_classify_wrong_shape_is_decode_error() {
        let err = classify::<Vec<i32>>(HttpResponse::json(200, r#"{"detail": "ok"}"#)).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
