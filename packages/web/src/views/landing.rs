use api::resources::{events, job_posts, news};
use dioxus::prelude::*;
use store::Filters;
use ui::{use_api, use_paginated};

use super::events::EventCard;
use super::job_posts::JobPostCard;
use super::news::NewsCard;
use super::{ErrorMessage, Loading};
use crate::Route;

/// Cards shown per section on the front page.
const PREVIEW_COUNT: usize = 3;

/// Front page: the next events, the latest news and open positions. The
/// lists share cache entries with their full pages.
#[component]
pub fn Landing() -> Element {
    let api = use_api();
    let upcoming = use_paginated(
        || events::keys::list(&Filters::new()),
        move |page| {
            let client = api.client();
            async move { client.get_events(&Filters::new().page(page)).await }
        },
    );
    let latest = use_paginated(
        || news::keys::list(&Filters::new()),
        move |page| {
            let client = api.client();
            async move { client.get_news(&Filters::new().page(page)).await }
        },
    );
    let positions = use_paginated(
        || job_posts::keys::list(&Filters::new()),
        move |page| {
            let client = api.client();
            async move { client.get_job_posts(&Filters::new().page(page)).await }
        },
    );

    rsx! {
        section {
            class: "mb-8 rounded-lg bg-slate-900 px-6 py-10 text-white",
            h1 { class: "m-0 text-3xl font-bold", "TIHLDE" }
            p { class: "m-0 mt-2 text-white/80", "Linjeforeningen for Dataingeniør, Digital infrastruktur og cybersikkerhet, Digital forretningsutvikling og Digital transformasjon ved NTNU" }
        }
        LandingSection {
            title: "Arrangementer",
            more: rsx! { Link { to: Route::Events {}, class: "text-sm", "Se alle" } },
            if let Some(error) = upcoming.error() {
                ErrorMessage { error }
            } else if upcoming.is_loading() {
                Loading {}
            } else {
                for event in upcoming.items().into_iter().take(PREVIEW_COUNT) {
                    EventCard { key: "{event.id}", event }
                }
            }
        }
        LandingSection {
            title: "Nyheter",
            more: rsx! { Link { to: Route::NewsList {}, class: "text-sm", "Se alle" } },
            if let Some(error) = latest.error() {
                ErrorMessage { error }
            } else if latest.is_loading() {
                Loading {}
            } else {
                for item in latest.items().into_iter().take(PREVIEW_COUNT) {
                    NewsCard { key: "{item.id}", item }
                }
            }
        }
        LandingSection {
            title: "Karriere",
            more: rsx! { Link { to: Route::JobPosts {}, class: "text-sm", "Se alle" } },
            if let Some(error) = positions.error() {
                ErrorMessage { error }
            } else if positions.is_loading() {
                Loading {}
            } else {
                for post in positions.items().into_iter().take(PREVIEW_COUNT) {
                    JobPostCard { key: "{post.id}", post }
                }
            }
        }
    }
}

#[component]
fn LandingSection(title: String, more: Element, children: Element) -> Element {
    rsx! {
        section {
            class: "mb-8",
            div {
                class: "mb-3 flex items-baseline justify-between",
                h2 { class: "m-0 text-xl font-semibold", "{title}" }
                {more}
            }
            div { class: "card-grid", {children} }
        }
    }
}
