//! Route guarding by sign-in state and group membership.

use dioxus::prelude::*;

use crate::auth::{use_auth, AuthState};

/// Groups an access list may name.
pub const ACCESS_GROUPS: [&str; 6] = ["HS", "Index", "NoK", "Promo", "Sosialen", "KoK"];

/// Whether a member of `user_groups` may enter a page limited to
/// `access_groups`. An empty list lets every signed-in user in; names outside
/// [`ACCESS_GROUPS`] grant nothing. The access list is matched without
/// regard to case; the user's group names must match exactly.
pub fn has_access(user_groups: &[String], access_groups: &[&str]) -> bool {
    if access_groups.is_empty() {
        return true;
    }
    access_groups
        .iter()
        .filter_map(|wanted| {
            ACCESS_GROUPS
                .iter()
                .find(|known| known.eq_ignore_ascii_case(wanted))
        })
        .any(|known| user_groups.iter().any(|g| g == known))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Access {
    /// The session is still being restored.
    Pending,
    Granted,
    /// Not signed in. `next` is where to return afterwards.
    Login { next: String },
    /// Signed in without the required group.
    Landing,
}

pub fn decide_access(auth: &AuthState, access_groups: &[&str], current_path: &str) -> Access {
    if auth.loading {
        return Access::Pending;
    }
    if !auth.is_authenticated() {
        return Access::Login {
            next: current_path.to_string(),
        };
    }
    // Signed in, but the profile never loaded
    if auth.user.is_none() {
        return Access::Pending;
    }
    if has_access(auth.groups(), access_groups) {
        Access::Granted
    } else {
        Access::Landing
    }
}

/// Renders `children` only for signed-in members of `access_groups`.
///
/// Anyone else is handed to `on_redirect`; for [`Access::Login`] the current
/// path is remembered in [`AuthState::login_redirect`] first.
#[component]
pub fn RequireAuth(
    #[props(default)] access_groups: Vec<String>,
    current_path: String,
    on_redirect: EventHandler<Access>,
    children: Element,
) -> Element {
    let mut auth = use_auth();
    let groups: Vec<&str> = access_groups.iter().map(String::as_str).collect();
    let access = decide_access(&auth.read(), &groups, &current_path);

    use_effect(use_reactive((&access,), move |(access,)| match &access {
        Access::Login { next } => {
            auth.write().login_redirect = Some(next.clone());
            on_redirect.call(access.clone());
        }
        Access::Landing => on_redirect.call(access.clone()),
        Access::Pending | Access::Granted => {}
    }));

    match access {
        Access::Granted => rsx! {
            {children}
        },
        Access::Pending => rsx! {
            div { class: "p-8 text-center text-neutral-600", "Autentiserer..." }
        },
        Access::Login { .. } | Access::Landing => rsx! {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::models::User;

    fn groups(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn signed_in(names: &[&str]) -> AuthState {
        AuthState {
            token: Some("t".to_string()),
            user: Some(User {
                user_id: "olan".to_string(),
                groups: groups(names),
                ..Default::default()
            }),
            loading: false,
            login_redirect: None,
        }
    }

    #[test]
    fn test_empty_access_list_allows_everyone() {
        assert!(has_access(&[], &[]));
    }

    #[test]
    fn test_access_list_ignores_case_user_groups_do_not() {
        assert!(has_access(&groups(&["HS"]), &["hs"]));
        assert!(has_access(&groups(&["NoK"]), &["nok", "index"]));
        assert!(!has_access(&groups(&["index"]), &["Index", "HS"]));
        assert!(!has_access(&groups(&["Promo"]), &["HS", "Index"]));
    }

    #[test]
    fn test_unknown_access_group_grants_nothing() {
        assert!(!has_access(&groups(&["Kontorsjef"]), &["Kontorsjef"]));
    }

    #[test]
    fn test_decide_access() {
        let loading = AuthState::default();
        assert_eq!(decide_access(&loading, &["HS"], "/admin"), Access::Pending);

        let anonymous = AuthState {
            loading: false,
            ..AuthState::default()
        };
        assert_eq!(
            decide_access(&anonymous, &[], "/profil"),
            Access::Login {
                next: "/profil".to_string()
            }
        );

        assert_eq!(
            decide_access(&signed_in(&["Index"]), &["HS", "Index"], "/admin/brukere"),
            Access::Granted
        );
        assert_eq!(
            decide_access(&signed_in(&["Promo"]), &["HS", "Index"], "/admin/brukere"),
            Access::Landing
        );
    }

    #[test]
    fn test_failed_profile_load_stays_pending() {
        let state = AuthState {
            token: Some("t".to_string()),
            user: None,
            loading: false,
            login_redirect: None,
        };
        assert_eq!(decide_access(&state, &["HS"], "/admin"), Access::Pending);
        assert_eq!(decide_access(&state, &[], "/profil"), Access::Pending);
    }
}
