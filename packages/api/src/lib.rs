//! # API crate: typed REST client for the TIHLDE backend
//!
//! Every page of the web app reads and writes through [`ApiClient`]. The
//! client is generic over a [`Transport`] so the same request code runs
//! against the network in the browser and against canned answers in tests.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`]: base URL, bearer token, JSON and multipart calls |
//! | [`error`] | [`ApiError`], the one error type every request returns |
//! | [`fetch`] | Library-independent request/response values and response classification |
//! | [`models`] | Serde records for the REST schemas |
//! | [`resources`] | Per-resource endpoints, cache keys and invalidation rules |
//! | [`transport`] | [`ReqwestTransport`] for real traffic, [`MockTransport`] for tests |
//!
//! ## Request flow
//!
//! 1. a resource method (e.g. [`ApiClient::get_event`]) names the endpoint;
//! 2. [`ApiClient::fetch`] builds an [`HttpRequest`] with query parameters or
//!    a JSON body and the `Authorization: Bearer ...` header when signed in;
//! 3. the transport sends it and [`fetch::classify`] turns the answer into
//!    the expected type or an [`ApiError`] carrying the server's `detail`.

pub mod client;
pub mod error;
pub mod fetch;
pub mod models;
pub mod resources;
pub mod transport;

pub use client::ApiClient;
pub use error::{ApiError, RequestResponse};
pub use fetch::{HttpRequest, HttpResponse, Method, UploadFile};
pub use transport::{MockTransport, ReqwestTransport, Transport};
