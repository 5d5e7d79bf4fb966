use api::models::ShortLink;
use api::resources::short_links;
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Input, Label, Paper};
use ui::{report_error, show_snackbar, use_api, use_query, use_query_client, use_snackbar, Severity};

use super::{ErrorMessage, Guard, Loading};

/// Public address a short link resolves at.
const SHORT_LINK_BASE: &str = "https://s.tihlde.org";

/// Short link names end up in a path segment.
fn valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[component]
pub fn ShortLinks() -> Element {
    rsx! {
        Guard {
            ShortLinkManager {}
        }
    }
}

#[component]
fn ShortLinkManager() -> Element {
    let api = use_api();
    let query = use_query_client();
    let mut snackbar = use_snackbar();
    let mut name = use_signal(String::new);
    let mut url = use_signal(String::new);
    let mut inline_error = use_signal(|| Option::<String>::None);

    let links = use_query(short_links::keys::all, move || {
        let client = api.client();
        async move { client.get_short_links().await }
    });

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let link = ShortLink {
            name: name().trim().to_string(),
            url: url().trim().to_string(),
        };
        if !valid_name(&link.name) {
            inline_error.set(Some("Navnet kan bare inneholde bokstaver, tall, - og _.".to_string()));
            return;
        }
        spawn(async move {
            match api.client().create_short_link(&link).await {
                Ok(_) => {
                    query.apply(&short_links::invalidates_after_short_link_change());
                    show_snackbar(&mut snackbar, Severity::Success, "Linken ble opprettet");
                    name.set(String::new());
                    url.set(String::new());
                    inline_error.set(None);
                }
                Err(e) => inline_error.set(report_error(&mut snackbar, &e)),
            }
        });
    };

    let delete = move |link_name: String| {
        spawn(async move {
            match api.client().delete_short_link(&link_name).await {
                Ok(_) => query.apply(&short_links::invalidates_after_short_link_change()),
                Err(e) => {
                    report_error(&mut snackbar, &e);
                }
            }
        });
    };

    let list = match &*links.read() {
        None => None,
        Some(Err(error)) => return rsx! { ErrorMessage { error: error.clone() } },
        Some(Ok(list)) => Some(list.clone()),
    };

    rsx! {
        h1 { class: "page-title", "Korte linker" }
        div {
            class: "grid gap-4 md:grid-cols-[1fr_2fr]",
            Paper {
                form {
                    class: "flex flex-col gap-3",
                    onsubmit: handle_submit,
                    div {
                        class: "flex flex-col gap-1.5",
                        Label { html_for: "link-name", "Navn" }
                        Input {
                            id: "link-name",
                            value: name(),
                            required: true,
                            oninput: move |evt: FormEvent| name.set(evt.value()),
                        }
                        span { class: "text-xs text-neutral-500", "{SHORT_LINK_BASE}/{name}" }
                    }
                    div {
                        class: "flex flex-col gap-1.5",
                        Label { html_for: "link-url", "Lenke" }
                        Input {
                            id: "link-url",
                            r#type: "url",
                            value: url(),
                            required: true,
                            oninput: move |evt: FormEvent| url.set(evt.value()),
                        }
                    }
                    if let Some(err) = inline_error() {
                        div { class: "error-box", "{err}" }
                    }
                    Button { r#type: "submit", "Opprett" }
                }
            }
            div {
                class: "flex flex-col gap-2",
                if let Some(list) = list {
                    if list.is_empty() {
                        p { class: "text-sm text-neutral-500", "Du har ingen korte linker" }
                    }
                    for link in list {
                        Paper {
                            key: "{link.name}",
                            class: "flex items-center gap-3",
                            div {
                                class: "flex flex-1 flex-col min-w-0",
                                strong { "{SHORT_LINK_BASE}/{link.name}" }
                                a { class: "truncate text-sm", href: "{link.url}", "{link.url}" }
                            }
                            Button {
                                variant: ButtonVariant::Destructive,
                                onclick: {
                                    let link_name = link.name.clone();
                                    move |_: MouseEvent| delete(link_name.clone())
                                },
                                "Slett"
                            }
                        }
                    }
                } else {
                    Loading {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_name() {
        assert!(valid_name("bedpres-2026"));
        assert!(valid_name("kok_info"));
        assert!(!valid_name(""));
        assert!(!valid_name("med mellomrom"));
        assert!(!valid_name("a/b"));
    }
}
