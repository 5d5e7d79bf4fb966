//! Authentication context and hooks for the UI.
//!
//! A session is a bearer token obtained from `auth/login/`. In the browser
//! the token is kept in `localStorage` so a reload stays signed in; native
//! builds keep it in memory for the life of the process.

use api::models::User;
use api::resources::users;
use api::ApiError;
use dioxus::prelude::*;

use crate::api_client::{use_api_with, ApiHandle};
use crate::query::{use_query_client, QueryClient};

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
const TOKEN_KEY: &str = "kvark_token";

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub token: Option<String>,
    pub user: Option<User>,
    pub loading: bool,
    /// Path to go back to once signed in.
    pub login_redirect: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            token: None,
            user: None,
            loading: true,
            login_redirect: None,
        }
    }
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Names of the signed-in user's groups, empty until the profile is loaded.
    pub fn groups(&self) -> &[String] {
        self.user
            .as_ref()
            .map(|u| u.groups.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AuthToken(pub(crate) Memo<Option<String>>);

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that manages authentication state.
/// Mount it inside [`ApiProvider`](crate::ApiProvider) and
/// [`QueryProvider`](crate::QueryProvider).
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth_state = use_signal(|| AuthState {
        token: storage::load(),
        ..AuthState::default()
    });
    let token = use_memo(move || auth_state.read().token.clone());
    use_context_provider(|| auth_state);
    use_context_provider(|| AuthToken(token));

    let api = use_api_with(token);
    let query = use_query_client();

    // Load the profile whenever the token changes
    let _ = use_resource(move || {
        let client = api.client();
        async move {
            if !client.is_authenticated() {
                auth_state.with_mut(|state| {
                    state.user = None;
                    state.loading = false;
                });
                return;
            }
            match client.get_user(None).await {
                Ok(user) => {
                    query.set(users::keys::me(), &user);
                    auth_state.with_mut(|state| {
                        state.user = Some(user);
                        state.loading = false;
                    });
                }
                Err(e) if e.is_unauthorized() => {
                    tracing::warn!("Stored token was rejected, signing out");
                    log_out(auth_state, query);
                }
                // The session stays pending; guarded pages keep waiting
                Err(e) => tracing::error!("Failed to load user: {}", e),
            }
        }
    });

    rsx! {
        {children}
    }
}

/// Exchange a username and password for a token and start a session.
pub async fn log_in(
    mut auth: Signal<AuthState>,
    api: ApiHandle,
    query: QueryClient,
    user_id: &str,
    password: &str,
) -> Result<(), ApiError> {
    let response = api.anonymous().login(user_id, password).await?;
    storage::save(Some(&response.token));
    query.apply(&users::invalidates_after_login());
    auth.with_mut(|state| {
        state.token = Some(response.token);
        state.loading = true;
    });
    tracing::info!("Signed in as {}", user_id);
    Ok(())
}

/// Drop the token and everything cached for the signed-in user.
pub fn log_out(mut auth: Signal<AuthState>, query: QueryClient) {
    storage::save(None);
    query.apply(&users::invalidates_after_logout());
    auth.with_mut(|state| {
        state.token = None;
        state.user = None;
        state.loading = false;
    });
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logg ut".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let auth_state = use_auth();
    let query = use_query_client();

    let onclick = move |_| {
        log_out(auth_state, query);
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href("/");
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod storage {
    use super::TOKEN_KEY;

    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    pub fn load() -> Option<String> {
        local_storage()?
            .get_item(TOKEN_KEY)
            .ok()?
            .filter(|token| !token.is_empty())
    }

    pub fn save(token: Option<&str>) {
        let Some(storage) = local_storage() else {
            tracing::warn!("localStorage unavailable, session will not survive a reload");
            return;
        };
        let result = match token {
            Some(token) => storage.set_item(TOKEN_KEY, token),
            None => storage.remove_item(TOKEN_KEY),
        };
        if result.is_err() {
            tracing::warn!("Failed to persist session token");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod storage {
    use std::sync::Mutex;

    static TOKEN: Mutex<Option<String>> = Mutex::new(None);

    pub fn load() -> Option<String> {
        TOKEN.lock().ok()?.clone()
    }

    pub fn save(token: Option<&str>) {
        if let Ok(mut stored) = TOKEN.lock() {
            *stored = token.map(str::to_string);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_storage_roundtrip() {
        storage::save(Some("abc"));
        assert_eq!(storage::load().as_deref(), Some("abc"));
        storage::save(None);
        assert_eq!(storage::load(), None);
    }

    #[test]
    fn test_groups_empty_until_profile_loaded() {
        let mut state = AuthState {
            token: Some("t".to_string()),
            ..AuthState::default()
        };
        assert!(state.is_authenticated());
        assert!(state.groups().is_empty());

        state.user = Some(User {
            user_id: "olan".to_string(),
            groups: vec!["Index".to_string()],
            ..Default::default()
        });
        assert_eq!(state.groups(), ["Index".to_string()]);
    }
}
