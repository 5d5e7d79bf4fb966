//! Access to the REST client from components.

use api::{ApiClient, ReqwestTransport};
use dioxus::prelude::*;
use store::ApiConfig;

use crate::auth::AuthToken;

#[derive(Clone, Copy)]
struct ApiBase(CopyValue<ApiClient<ReqwestTransport>>);

/// Copyable handle producing clients for the current session.
#[derive(Clone, Copy)]
pub struct ApiHandle {
    base: CopyValue<ApiClient<ReqwestTransport>>,
    token: Memo<Option<String>>,
}

impl ApiHandle {
    /// A client carrying the current token. Called inside a resource or memo,
    /// this subscribes it to sign-in and sign-out.
    pub fn client(&self) -> ApiClient<ReqwestTransport> {
        self.base.cloned().with_token(self.token.cloned())
    }

    /// A client without credentials, for login and password reset.
    pub fn anonymous(&self) -> ApiClient<ReqwestTransport> {
        self.base.cloned().with_token(None)
    }
}

/// Provides the HTTP client shared by every [`use_api`] handle. Mount it
/// above [`AuthProvider`](crate::AuthProvider).
#[component]
pub fn ApiProvider(config: ApiConfig, children: Element) -> Element {
    use_context_provider(|| {
        tracing::info!("API base url: {}", config.base_url);
        ApiBase(CopyValue::new(ApiClient::from_config(config.clone())))
    });

    rsx! {
        {children}
    }
}

/// Get an [`ApiHandle`] bound to the signed-in user's token.
pub fn use_api() -> ApiHandle {
    let AuthToken(token) = use_context::<AuthToken>();
    use_api_with(token)
}

pub(crate) fn use_api_with(token: Memo<Option<String>>) -> ApiHandle {
    let ApiBase(base) = use_context::<ApiBase>();
    ApiHandle { base, token }
}
