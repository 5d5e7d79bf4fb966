use api::models::{News, NewsMutate};
use api::resources::news;
use api::UploadFile;
use dioxus::prelude::*;
use store::Filters;
use ui::components::{Button, ButtonVariant, FileUpload, Input, LoadMore, Paper, Textarea};
use ui::{
    report_error, show_snackbar, use_api, use_paginated, use_query, use_query_client, use_snackbar,
    Severity,
};

use super::{use_draft, AdminPage, Checkbox, Field, NEWS_ADMIN};
use crate::views::{format_date, use_prop_signal, ErrorMessage, Loading};

fn news_draft(item: &News) -> NewsMutate {
    NewsMutate {
        title: item.title.clone(),
        header: item.header.clone(),
        body: item.body.clone(),
        image: item.image.clone(),
        image_alt: item.image_alt.clone(),
        emojis_allowed: item.emojis_allowed,
    }
}

/// Trimmed copy of the draft, or why it can't be saved.
fn checked(draft: &NewsMutate) -> Result<NewsMutate, &'static str> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err("Nyheten må ha en tittel");
    }
    let header = draft.header.trim();
    if header.is_empty() {
        return Err("Nyheten må ha en ingress");
    }
    let blank_to_none = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    Ok(NewsMutate {
        title: title.to_string(),
        header: header.to_string(),
        body: draft.body.clone(),
        image: blank_to_none(&draft.image),
        image_alt: blank_to_none(&draft.image_alt),
        emojis_allowed: draft.emojis_allowed,
    })
}

#[component]
pub fn NewsAdmin() -> Element {
    let mut selected = use_signal(|| Option::<i64>::None);

    let editor = match selected() {
        None => rsx! {
            NewsForm { item: None, on_saved: move |id| selected.set(Some(id)), on_deleted: move |_| selected.set(None) }
        },
        Some(id) => rsx! {
            NewsLoader { id, on_saved: move |id| selected.set(Some(id)), on_deleted: move |_| selected.set(None) }
        },
    };

    rsx! {
        AdminPage {
            access: NEWS_ADMIN,
            title: "Nyheter",
            div {
                class: "grid gap-4 md:grid-cols-[1fr_2fr]",
                AdminNewsList { selected: selected(), on_select: move |id| selected.set(id) }
                {editor}
            }
        }
    }
}

#[component]
fn AdminNewsList(selected: Option<i64>, on_select: EventHandler<Option<i64>>) -> Element {
    let api = use_api();
    let list = use_paginated(
        || news::keys::list(&Filters::new()),
        move |page| {
            let client = api.client();
            async move { client.get_news(&Filters::new().page(page)).await }
        },
    );

    rsx! {
        div {
            class: "flex flex-col gap-2",
            Button { onclick: move |_| on_select.call(None), "Ny nyhet" }
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
                    empty_text: "Ingen nyheter",
                    on_load_more: move |_| list.load_more(),
                    for item in list.items() {
                        button {
                            key: "{item.id}",
                            class: if selected == Some(item.id) { "admin-item active" } else { "admin-item" },
                            onclick: move |_| on_select.call(Some(item.id)),
                            strong { "{item.title}" }
                            span { class: "text-xs text-neutral-500", {item.created_at.as_ref().map(format_date).unwrap_or_default()} }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn NewsLoader(id: i64, on_saved: EventHandler<i64>, on_deleted: EventHandler<()>) -> Element {
    let api = use_api();
    let id = use_prop_signal(id);
    let item = use_query(
        move || news::keys::detail(id()),
        move || {
            let id = id();
            let client = api.client();
            async move { client.get_news_item(id).await }
        },
    );

    let view = match &*item.read() {
        None => rsx! { Loading {} },
        Some(Err(error)) => rsx! { ErrorMessage { error: error.clone() } },
        Some(Ok(item)) => rsx! { NewsForm { item: Some(item.clone()), on_saved, on_deleted } },
    };
    view
}

#[component]
fn NewsForm(item: Option<News>, on_saved: EventHandler<i64>, on_deleted: EventHandler<()>) -> Element {
    let api = use_api();
    let query = use_query_client();
    let mut snackbar = use_snackbar();
    let news_id = item.as_ref().map(|n| n.id);
    let mut draft = use_draft(item.as_ref().map(news_draft).unwrap_or_default());
    let mut saving = use_signal(|| false);
    let mut uploading = use_signal(|| false);
    let mut confirm_delete = use_signal(|| false);
    let mut inline_error = use_signal(|| Option::<String>::None);

    let upload_image = move |mut files: Vec<UploadFile>| {
        if files.is_empty() {
            return;
        }
        let file = files.swap_remove(0);
        spawn(async move {
            uploading.set(true);
            match api.client().upload_file(file).await {
                Ok(uploaded) => draft.with_mut(|d| d.image = Some(uploaded.url)),
                Err(e) => {
                    report_error(&mut snackbar, &e);
                }
            }
            uploading.set(false);
        });
    };

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let body = match checked(&draft.read()) {
            Ok(body) => body,
            Err(message) => {
                inline_error.set(Some(message.to_string()));
                return;
            }
        };
        spawn(async move {
            saving.set(true);
            let client = api.client();
            let result = match news_id {
                Some(id) => client.update_news(id, &body).await,
                None => client.create_news(&body).await,
            };
            match result {
                Ok(saved) => {
                    query.apply(&news::invalidates_after_news_change());
                    query.set(news::keys::detail(saved.id), &saved);
                    show_snackbar(&mut snackbar, Severity::Success, "Nyheten ble lagret");
                    inline_error.set(None);
                    on_saved.call(saved.id);
                }
                Err(e) => inline_error.set(report_error(&mut snackbar, &e)),
            }
            saving.set(false);
        });
    };

    let delete = move |_: MouseEvent| {
        let Some(id) = news_id else {
            return;
        };
        if !confirm_delete() {
            confirm_delete.set(true);
            return;
        }
        spawn(async move {
            match api.client().delete_news(id).await {
                Ok(_) => {
                    query.apply(&news::invalidates_after_news_change());
                    show_snackbar(&mut snackbar, Severity::Info, "Nyheten ble slettet");
                    confirm_delete.set(false);
                    on_deleted.call(());
                }
                Err(e) => {
                    report_error(&mut snackbar, &e);
                }
            }
        });
    };

    let d = draft();
    let image = d.image.clone().unwrap_or_default();

    rsx! {
        Paper {
            form {
                class: "flex flex-col gap-3",
                onsubmit: handle_submit,
                Field { label: "Tittel", html_for: "news-title",
                    Input { id: "news-title", value: d.title.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.title = e.value()) }
                }
                Field { label: "Ingress", html_for: "news-header",
                    Input { id: "news-header", value: d.header.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.header = e.value()) }
                }
                Field { label: "Innhold", html_for: "news-body",
                    Textarea { id: "news-body", rows: 12, value: d.body.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.body = e.value()) }
                }
                Field { label: "Bilde",
                    div {
                        class: "flex items-center gap-3",
                        if !image.is_empty() {
                            img { class: "h-16 w-24 rounded object-cover", src: "{image}" }
                        }
                        FileUpload {
                            label: "Last opp bilde",
                            accept: "image/*",
                            disabled: uploading(),
                            on_files: upload_image,
                        }
                    }
                    Input { value: image.clone(), placeholder: "eller lim inn en URL", oninput: move |e: FormEvent| draft.with_mut(|d| d.image = Some(e.value())) }
                }
                Field { label: "Alternativ bildetekst", html_for: "news-image-alt",
                    Input { id: "news-image-alt", value: d.image_alt.clone().unwrap_or_default(), oninput: move |e: FormEvent| draft.with_mut(|d| d.image_alt = Some(e.value())) }
                }
                Checkbox { label: "Tillat reaksjoner", checked: d.emojis_allowed, on_change: move |v| draft.with_mut(|d| d.emojis_allowed = v) }
                if let Some(err) = inline_error() {
                    div { class: "error-box", "{err}" }
                }
                div {
                    class: "flex gap-2",
                    Button { r#type: "submit", disabled: saving() || uploading(), if news_id.is_some() { "Lagre" } else { "Publiser" } }
                    if news_id.is_some() {
                        Button {
                            variant: ButtonVariant::Destructive,
                            onclick: delete,
                            if confirm_delete() { "Bekreft sletting" } else { "Slett" }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_requires_title_and_header() {
        let mut draft = NewsMutate::default();
        assert_eq!(checked(&draft), Err("Nyheten må ha en tittel"));
        draft.title = "Generalforsamling".to_string();
        assert_eq!(checked(&draft), Err("Nyheten må ha en ingress"));
        draft.header = "  Innkalling  ".to_string();
        assert_eq!(checked(&draft).unwrap().header, "Innkalling");
    }

    #[test]
    fn test_checked_drops_blank_image() {
        let draft = NewsMutate {
            title: "Tittel".to_string(),
            header: "Ingress".to_string(),
            image: Some("   ".to_string()),
            image_alt: Some("Logo".to_string()),
            ..Default::default()
        };
        let body = checked(&draft).unwrap();
        assert_eq!(body.image, None);
        assert_eq!(body.image_alt.as_deref(), Some("Logo"));
    }
}
