use api::models::News;
use api::resources::{news, reactions::NEWS_CONTENT_TYPE};
use dioxus::prelude::*;
use store::Filters;
use ui::components::{LoadMore, Paper};
use ui::{use_api, use_paginated, use_query, Markdown};

use super::reactions::Reactions;
use super::{format_datetime, use_prop_signal, ErrorMessage, Loading};
use crate::Route;

#[component]
pub(crate) fn NewsCard(item: News) -> Element {
    let published = item.created_at.as_ref().map(format_datetime).unwrap_or_default();

    rsx! {
        Link {
            to: Route::NewsDetail { id: item.id },
            class: "no-underline text-inherit",
            Paper {
                class: "flex h-full flex-col gap-2 hover:shadow-md transition-shadow",
                if let Some(image) = item.image.clone() {
                    img { class: "card-image", src: "{image}", alt: item.image_alt.clone().unwrap_or_default() }
                }
                h3 { class: "m-0 text-base font-semibold text-neutral-900", "{item.title}" }
                p { class: "m-0 text-sm text-neutral-600", "{item.header}" }
                span { class: "text-xs text-neutral-400", "{published}" }
            }
        }
    }
}

#[component]
pub fn NewsList() -> Element {
    let api = use_api();
    let list = use_paginated(
        || news::keys::list(&Filters::new()),
        move |page| {
            let client = api.client();
            async move { client.get_news(&Filters::new().page(page)).await }
        },
    );

    rsx! {
        h1 { class: "page-title", "Nyheter" }
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
                div {
                    class: "card-grid",
                    for item in list.items() {
                        NewsCard { key: "{item.id}", item }
                    }
                }
            }
        }
    }
}

#[component]
pub fn NewsDetail(id: i64) -> Element {
    let news_id = use_prop_signal(id);
    let api = use_api();
    let item = use_query(
        move || news::keys::detail(news_id()),
        move || {
            let id = news_id();
            let client = api.client();
            async move { client.get_news_item(id).await }
        },
    );

    let item = match &*item.read() {
        None => return rsx! { Loading {} },
        Some(Err(error)) => return rsx! { ErrorMessage { error: error.clone() } },
        Some(Ok(item)) => item.clone(),
    };
    let published = item.created_at.as_ref().map(format_datetime).unwrap_or_default();
    let author = item.creator.as_ref().map(|c| c.full_name()).unwrap_or_default();

    rsx! {
        article {
            class: "mx-auto flex max-w-3xl flex-col gap-4",
            if let Some(image) = item.image.clone() {
                img { class: "card-image", src: "{image}", alt: item.image_alt.clone().unwrap_or_default() }
            }
            Paper {
                h1 { class: "page-title", "{item.title}" }
                p { class: "text-lg text-neutral-700", "{item.header}" }
                p {
                    class: "text-xs text-neutral-500",
                    "{published}"
                    if !author.is_empty() {
                        " · {author}"
                    }
                }
                Markdown { source: item.body.clone() }
            }
            Reactions {
                content_type: NEWS_CONTENT_TYPE,
                object_id: item.id,
                reactions: item.reactions.clone(),
                allowed: item.emojis_allowed,
            }
        }
    }
}
