use api::models::UserList;
use api::resources::users;
use dioxus::prelude::*;
use store::Filters;
use ui::components::{Button, ButtonVariant, Input, LoadMore, ModalOverlay, Paper, Textarea};
use ui::{
    report_error, show_snackbar, use_api, use_paginated, use_query_client, use_snackbar, Severity,
};

use super::{AdminPage, USER_ADMIN};
use crate::views::{ErrorMessage, Loading};

/// Sign-ups waiting for review, optionally narrowed by a search.
fn pending_filters(search: &str) -> Filters {
    let mut filters = Filters::new().with("is_allowed", false);
    filters.insert("search", search.trim());
    filters
}

#[component]
pub fn UserAdmin() -> Element {
    let api = use_api();
    let mut search_input = use_signal(String::new);
    let mut search = use_signal(String::new);
    let mut declining = use_signal(|| Option::<UserList>::None);
    let filters = use_memo(move || pending_filters(&search()));

    let list = use_paginated(
        move || users::keys::list(&filters()),
        move |page| {
            let client = api.client();
            let filters = filters.peek().page(page);
            async move { client.get_users(&filters).await }
        },
    );

    rsx! {
        AdminPage {
            access: USER_ADMIN,
            title: "Nye medlemmer",
            form {
                class: "mb-4 flex items-center gap-2",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    search.set(search_input());
                },
                Input {
                    class: "flex-1",
                    placeholder: "Søk etter navn eller brukernavn",
                    value: search_input(),
                    oninput: move |evt: FormEvent| search_input.set(evt.value()),
                }
                Button { r#type: "submit", "Søk" }
            }
            if let Some(error) = list.error() {
                ErrorMessage { error }
            }
            if list.is_loading() {
                Loading {}
            } else {
                LoadMore {
                    has_next_page: list.has_next_page(),
                    is_fetching: list.is_fetching(),
                    is_empty: list.is_empty(),
                    empty_text: "Ingen ventende medlemmer",
                    on_load_more: move |_| list.load_more(),
                    div {
                        class: "flex flex-col gap-2",
                        for user in list.items() {
                            PendingUser {
                                key: "{user.user_id}",
                                user: user.clone(),
                                on_decline: move |user| declining.set(Some(user)),
                            }
                        }
                    }
                }
            }
            if let Some(user) = declining() {
                DeclineDialog { user, on_close: move |_| declining.set(None) }
            }
        }
    }
}

#[component]
fn PendingUser(user: UserList, on_decline: EventHandler<UserList>) -> Element {
    let api = use_api();
    let query = use_query_client();
    let mut snackbar = use_snackbar();
    let mut busy = use_signal(|| false);
    let name = user.full_name();
    let declined = user.clone();

    let user_id = user.user_id.clone();
    let activate = move |_: MouseEvent| {
        let user_id = user_id.clone();
        spawn(async move {
            busy.set(true);
            match api.client().activate_user(&user_id).await {
                Ok(_) => {
                    query.apply(&users::invalidates_after_user_review());
                    let message = format!("{user_id} ble lagt til som medlem");
                    show_snackbar(&mut snackbar, Severity::Success, &message);
                }
                Err(e) => {
                    report_error(&mut snackbar, &e);
                }
            }
            busy.set(false);
        });
    };

    rsx! {
        Paper {
            class: "flex items-center gap-3",
            if let Some(image) = user.image.clone() {
                img { class: "h-10 w-10 rounded-full object-cover", src: "{image}" }
            }
            div {
                class: "flex flex-1 flex-col min-w-0",
                strong { "{name}" }
                span { class: "truncate text-sm text-neutral-500", "{user.user_id} · {user.email}" }
            }
            Button { disabled: busy(), onclick: activate, "Godkjenn" }
            Button {
                variant: ButtonVariant::Destructive,
                disabled: busy(),
                onclick: move |_| on_decline.call(declined.clone()),
                "Avslå"
            }
        }
    }
}

#[component]
fn DeclineDialog(user: UserList, on_close: EventHandler<()>) -> Element {
    let api = use_api();
    let query = use_query_client();
    let mut snackbar = use_snackbar();
    let mut reason = use_signal(String::new);
    let mut sending = use_signal(|| false);
    let mut inline_error = use_signal(|| Option::<String>::None);
    let title = format!("Avslå {}", user.full_name());

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let text = reason().trim().to_string();
        if text.is_empty() {
            inline_error.set(Some("Skriv en begrunnelse".to_string()));
            return;
        }
        let user_id = user.user_id.clone();
        spawn(async move {
            sending.set(true);
            match api.client().decline_user(&user_id, &text).await {
                Ok(_) => {
                    query.apply(&users::invalidates_after_user_review());
                    show_snackbar(&mut snackbar, Severity::Info, "Brukeren ble avslått");
                    on_close.call(());
                }
                Err(e) => inline_error.set(report_error(&mut snackbar, &e)),
            }
            sending.set(false);
        });
    };

    rsx! {
        ModalOverlay {
            title,
            on_close: move |_| on_close.call(()),
            form {
                class: "flex flex-col gap-3 p-4",
                onsubmit: handle_submit,
                p { class: "m-0 text-sm text-neutral-600", "Begrunnelsen sendes på e-post til søkeren." }
                Textarea {
                    rows: 4,
                    value: reason(),
                    oninput: move |evt: FormEvent| reason.set(evt.value()),
                }
                if let Some(err) = inline_error() {
                    div { class: "error-box", "{err}" }
                }
                Button { r#type: "submit", variant: ButtonVariant::Destructive, disabled: sending(), "Avslå" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_filters() {
        let filters = pending_filters("  ");
        assert_eq!(filters.get("is_allowed"), Some("false"));
        assert_eq!(filters.get("search"), None);

        let filters = pending_filters(" kari ");
        assert_eq!(filters.get("search"), Some("kari"));
    }
}
