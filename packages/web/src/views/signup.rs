use api::models::UserCreate;
use dioxus::prelude::*;
use ui::components::{Button, Input, Label, Paper};
use ui::{show_snackbar, use_api, use_snackbar, Severity};

use crate::Route;

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Clone, Debug, Default, PartialEq)]
struct SignUpDraft {
    user_id: String,
    first_name: String,
    last_name: String,
    email: String,
    password: String,
    repeat_password: String,
}

impl SignUpDraft {
    fn to_create(&self) -> Result<UserCreate, &'static str> {
        let user_id = self.user_id.trim().to_lowercase();
        if user_id.is_empty() || user_id.contains(char::is_whitespace) {
            return Err("Brukernavnet kan ikke være tomt eller inneholde mellomrom");
        }
        let first_name = self.first_name.trim();
        let last_name = self.last_name.trim();
        if first_name.is_empty() || last_name.is_empty() {
            return Err("Fyll inn fornavn og etternavn");
        }
        let email = self.email.trim();
        if !email.contains('@') {
            return Err("Skriv inn en gyldig e-postadresse");
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err("Passordet må ha minst 8 tegn");
        }
        if self.password != self.repeat_password {
            return Err("Passordene er ikke like");
        }
        Ok(UserCreate {
            user_id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

/// Sign-up for new members. Accounts wait for approval before they can
/// sign in.
#[component]
pub fn SignUp() -> Element {
    let api = use_api();
    let nav = use_navigator();
    let mut snackbar = use_snackbar();
    let mut draft = use_signal(SignUpDraft::default);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let body = match draft.read().to_create() {
            Ok(body) => body,
            Err(message) => {
                error.set(Some(message.to_string()));
                return;
            }
        };
        spawn(async move {
            error.set(None);
            loading.set(true);
            match api.anonymous().create_user(&body).await {
                Ok(response) => {
                    let message = if response.detail.is_empty() {
                        "Brukeren ble opprettet og venter på godkjenning".to_string()
                    } else {
                        response.detail
                    };
                    show_snackbar(&mut snackbar, Severity::Success, &message);
                    nav.replace(Route::Login {});
                }
                Err(e) => {
                    tracing::warn!("sign-up failed: {}", e);
                    error.set(Some(e.detail()));
                }
            }
            loading.set(false);
        });
    };

    let d = draft();

    rsx! {
        div {
            class: "flex justify-center py-12",
            Paper {
                class: "w-full max-w-md",
                form {
                    class: "flex flex-col gap-4",
                    onsubmit: handle_submit,
                    h1 { class: "m-0 text-center text-2xl font-bold text-neutral-900", "Ny bruker" }
                    div {
                        class: "flex flex-col gap-1.5",
                        Label { html_for: "signup-user", "Brukernavn" }
                        Input { id: "signup-user", value: d.user_id.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.user_id = e.value()) }
                    }
                    div {
                        class: "grid gap-4 md:grid-cols-2",
                        div {
                            class: "flex flex-col gap-1.5",
                            Label { html_for: "signup-first", "Fornavn" }
                            Input { id: "signup-first", value: d.first_name.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.first_name = e.value()) }
                        }
                        div {
                            class: "flex flex-col gap-1.5",
                            Label { html_for: "signup-last", "Etternavn" }
                            Input { id: "signup-last", value: d.last_name.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.last_name = e.value()) }
                        }
                    }
                    div {
                        class: "flex flex-col gap-1.5",
                        Label { html_for: "signup-email", "E-post" }
                        Input { id: "signup-email", r#type: "email", value: d.email.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.email = e.value()) }
                    }
                    div {
                        class: "flex flex-col gap-1.5",
                        Label { html_for: "signup-password", "Passord" }
                        Input { id: "signup-password", r#type: "password", value: d.password.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.password = e.value()) }
                    }
                    div {
                        class: "flex flex-col gap-1.5",
                        Label { html_for: "signup-repeat", "Gjenta passord" }
                        Input { id: "signup-repeat", r#type: "password", value: d.repeat_password.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.repeat_password = e.value()) }
                    }
                    if let Some(err) = error() {
                        div { class: "error-box", "{err}" }
                    }
                    Button { r#type: "submit", disabled: loading(), "Opprett bruker" }
                    Link {
                        to: Route::Login {},
                        class: "text-center text-sm text-neutral-600",
                        "Har du allerede en bruker? Logg inn"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> SignUpDraft {
        SignUpDraft {
            user_id: " OlaN ".to_string(),
            first_name: "Ola".to_string(),
            last_name: "Nordmann".to_string(),
            email: "ola@stud.ntnu.no".to_string(),
            password: "hemmelig1".to_string(),
            repeat_password: "hemmelig1".to_string(),
        }
    }

    #[test]
    fn test_sign_up_normalizes_user_id() {
        let body = filled().to_create().unwrap();
        assert_eq!(body.user_id, "olan");
        assert_eq!(body.email, "ola@stud.ntnu.no");
    }

    #[test]
    fn test_sign_up_checks_passwords() {
        let mut draft = filled();
        draft.repeat_password = "hemmelig2".to_string();
        assert_eq!(draft.to_create(), Err("Passordene er ikke like"));
        draft.password = "kort".to_string();
        draft.repeat_password = "kort".to_string();
        assert_eq!(draft.to_create(), Err("Passordet må ha minst 8 tegn"));
    }

    #[test]
    fn test_sign_up_needs_names_and_email() {
        let mut draft = filled();
        draft.user_id = "ola n".to_string();
        assert!(draft.to_create().is_err());
        let mut draft = filled();
        draft.last_name = " ".to_string();
        assert_eq!(draft.to_create(), Err("Fyll inn fornavn og etternavn"));
        let mut draft = filled();
        draft.email = "ola".to_string();
        assert_eq!(draft.to_create(), Err("Skriv inn en gyldig e-postadresse"));
    }
}
