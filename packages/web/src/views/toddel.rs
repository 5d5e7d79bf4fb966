use api::resources::toddel;
use dioxus::prelude::*;
use store::Filters;
use ui::components::{LoadMore, Paper};
use ui::{use_api, use_paginated};

use super::{format_date, ErrorMessage, Loading};

/// Archive of Töddel editions. Each card opens the edition's PDF.
#[component]
pub fn ToddelArchive() -> Element {
    let api = use_api();
    let list = use_paginated(
        || toddel::keys::list(&Filters::new()),
        move |page| {
            let client = api.client();
            async move { client.get_toddels(&Filters::new().page(page)).await }
        },
    );

    rsx! {
        h1 { class: "page-title", "Töddel" }
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
                empty_text: "Ingen utgaver",
                on_load_more: move |_| list.load_more(),
                div {
                    class: "card-grid",
                    for edition in list.items() {
                        a {
                            key: "{edition.edition}",
                            href: "{edition.pdf}",
                            target: "_blank",
                            rel: "noreferrer",
                            class: "no-underline text-inherit",
                            Paper {
                                class: "flex h-full flex-col gap-2 hover:shadow-md transition-shadow",
                                if let Some(image) = edition.image.clone() {
                                    img { class: "card-image", src: "{image}", alt: "{edition.title}" }
                                }
                                strong { "Utgave {edition.edition}: {edition.title}" }
                                span {
                                    class: "text-xs text-neutral-500",
                                    {edition.published_at.as_ref().map(format_date).unwrap_or_default()}
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
