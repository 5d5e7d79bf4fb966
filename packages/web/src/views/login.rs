//! Sign-in and password reset views.

use dioxus::prelude::*;
use ui::components::{Button, Input, Label, Paper};
use ui::{log_in, show_snackbar, use_api, use_auth, use_query_client, use_snackbar, Severity};

use crate::Route;

/// Where to go after signing in: the page that sent the user here, or the
/// landing page when that path is missing or no longer routes.
fn redirect_target(path: Option<&str>) -> Route {
    path.and_then(|p| p.parse::<Route>().ok())
        .filter(|route| !matches!(route, Route::Login {} | Route::SignUp {} | Route::NotFound { .. }))
        .unwrap_or(Route::Landing {})
}

/// Login page component.
#[component]
pub fn Login() -> Element {
    let mut auth = use_auth();
    let api = use_api();
    let query = use_query_client();
    let nav = use_navigator();
    let mut user_id = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // Already signed in
    use_effect(move || {
        let state = auth();
        if !state.loading && state.user.is_some() {
            nav.replace(redirect_target(state.login_redirect.as_deref()));
        }
    });

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);

            let u = user_id().trim().to_string();
            let p = password();
            if u.is_empty() || p.is_empty() {
                error.set(Some("Fyll inn brukernavn og passord".to_string()));
                return;
            }

            loading.set(true);
            match log_in(auth, api, query, &u, &p).await {
                Ok(()) => {
                    let redirect = auth.peek().login_redirect.clone();
                    auth.with_mut(|state| state.login_redirect = None);
                    nav.replace(redirect_target(redirect.as_deref()));
                }
                Err(e) => {
                    loading.set(false);
                    let message = if e.is_unauthorized() {
                        "Feil brukernavn eller passord".to_string()
                    } else {
                        e.detail()
                    };
                    error.set(Some(message));
                }
            }
        });
    };

    rsx! {
        div {
            class: "flex justify-center py-12",
            Paper {
                class: "w-full max-w-sm",
                form {
                    class: "flex flex-col gap-4",
                    onsubmit: handle_login,
                    h1 { class: "m-0 text-center text-2xl font-bold text-neutral-900", "Logg inn" }
                    div {
                        class: "flex flex-col gap-1.5",
                        Label { html_for: "user_id", "Brukernavn" }
                        Input {
                            id: "user_id",
                            placeholder: "Brukernavn",
                            value: user_id(),
                            oninput: move |evt: FormEvent| user_id.set(evt.value()),
                        }
                    }
                    div {
                        class: "flex flex-col gap-1.5",
                        Label { html_for: "password", "Passord" }
                        Input {
                            id: "password",
                            r#type: "password",
                            placeholder: "Passord",
                            value: password(),
                            oninput: move |evt: FormEvent| password.set(evt.value()),
                        }
                    }
                    if let Some(err) = error() {
                        div { class: "error-box", "{err}" }
                    }
                    Button {
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Logger inn..." } else { "Logg inn" }
                    }
                    Link {
                        to: Route::ForgotPassword {},
                        class: "text-center text-sm text-neutral-600",
                        "Glemt passord?"
                    }
                    Link {
                        to: Route::SignUp {},
                        class: "text-center text-sm text-neutral-600",
                        "Ny bruker? Opprett en konto"
                    }
                }
            }
        }
    }
}

#[component]
pub fn ForgotPassword() -> Element {
    let api = use_api();
    let mut snackbar = use_snackbar();
    let mut email = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut sent = use_signal(|| false);
    let mut loading = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);

            let e = email().trim().to_string();
            if e.is_empty() || !e.contains('@') {
                error.set(Some("Skriv inn en gyldig e-postadresse".to_string()));
                return;
            }

            loading.set(true);
            match api.anonymous().forgot_password(&e).await {
                Ok(response) => {
                    sent.set(true);
                    let message = if response.detail.is_empty() {
                        "Sjekk e-posten din".to_string()
                    } else {
                        response.detail
                    };
                    show_snackbar(&mut snackbar, Severity::Success, &message);
                }
                Err(e) => error.set(Some(e.detail())),
            }
            loading.set(false);
        });
    };

    rsx! {
        div {
            class: "flex justify-center py-12",
            Paper {
                class: "w-full max-w-sm",
                if sent() {
                    p { class: "m-0 text-sm text-neutral-700", "Vi har sendt deg en e-post med en lenke for å tilbakestille passordet." }
                } else {
                    form {
                        class: "flex flex-col gap-4",
                        onsubmit: handle_submit,
                        h1 { class: "m-0 text-center text-2xl font-bold text-neutral-900", "Glemt passord" }
                        div {
                            class: "flex flex-col gap-1.5",
                            Label { html_for: "email", "E-post" }
                            Input {
                                id: "email",
                                r#type: "email",
                                value: email(),
                                oninput: move |evt: FormEvent| email.set(evt.value()),
                            }
                        }
                        if let Some(err) = error() {
                            div { class: "error-box", "{err}" }
                        }
                        Button { r#type: "submit", disabled: loading(), "Send lenke" }
                    }
                }
                Link {
                    to: Route::Login {},
                    class: "mt-4 block text-center text-sm text-neutral-600",
                    "Tilbake til innlogging"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_target() {
        assert_eq!(redirect_target(None), Route::Landing {});
        assert_eq!(redirect_target(Some("/profil")), Route::Profile {});
        assert_eq!(redirect_target(Some("/arrangementer/12")), Route::EventDetail { id: 12 });
        assert_eq!(redirect_target(Some("/logg-inn")), Route::Landing {});
        assert_eq!(redirect_target(Some("/ny-bruker")), Route::Landing {});
        assert_eq!(redirect_target(Some("/kokebok")), Route::Cheatsheets {});
    }
}
