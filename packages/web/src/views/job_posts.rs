use api::models::{JobPost, JobPostType};
use api::resources::job_posts;
use dioxus::prelude::*;
use store::Filters;
use ui::components::{Button, Input, LoadMore, Paper};
use ui::{use_api, use_paginated, use_query, Markdown};

use super::{format_date, use_prop_signal, ErrorMessage, Loading};
use crate::Route;

/// "Løpende opptak" wins over a deadline.
fn deadline_text(post: &JobPost) -> String {
    if post.is_continuously_hiring {
        return "Løpende opptak".to_string();
    }
    match &post.deadline {
        Some(deadline) => format!("Frist {}", format_date(deadline)),
        None => "Ingen frist".to_string(),
    }
}

fn class_range(post: &JobPost) -> String {
    if post.class_start == post.class_end {
        format!("{}. klasse", post.class_start)
    } else {
        format!("{}. - {}. klasse", post.class_start, post.class_end)
    }
}

fn job_post_filters(search: &str, job_type: Option<JobPostType>, expired: bool) -> Filters {
    let mut filters = Filters::new();
    filters.insert("search", search.trim());
    if let Some(job_type) = job_type {
        filters.insert("job_type", job_type.as_str());
    }
    if expired {
        filters.insert("expired", true);
    }
    filters
}

#[component]
pub(crate) fn JobPostCard(post: JobPost) -> Element {
    let deadline = deadline_text(&post);
    let kind = post.job_type.label();

    rsx! {
        Link {
            to: Route::JobPostDetail { id: post.id },
            class: "no-underline text-inherit",
            Paper {
                class: "flex h-full flex-col gap-2 hover:shadow-md transition-shadow",
                if let Some(image) = post.image.clone() {
                    img { class: "card-image", src: "{image}", alt: post.image_alt.clone().unwrap_or_default() }
                }
                h3 { class: "m-0 text-base font-semibold text-neutral-900", "{post.title}" }
                span { class: "text-sm text-neutral-600", "{post.company} · {post.location}" }
                span { class: "text-xs text-neutral-500", "{kind} · {deadline}" }
            }
        }
    }
}

#[component]
pub fn JobPosts() -> Element {
    let api = use_api();
    let mut search_input = use_signal(String::new);
    let mut search = use_signal(String::new);
    let mut job_type = use_signal(|| Option::<JobPostType>::None);
    let mut expired = use_signal(|| false);
    let filters = use_memo(move || job_post_filters(&search(), job_type(), expired()));

    let list = use_paginated(
        move || job_posts::keys::list(&filters()),
        move |page| {
            let client = api.client();
            let filters = filters.peek().page(page);
            async move { client.get_job_posts(&filters).await }
        },
    );

    rsx! {
        h1 { class: "page-title", "Karriere" }
        form {
            class: "mb-4 flex flex-wrap items-center gap-2",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                search.set(search_input());
            },
            Input {
                class: "flex-1 min-w-[12rem]",
                placeholder: "Søk etter annonse",
                value: search_input(),
                oninput: move |evt: FormEvent| search_input.set(evt.value()),
            }
            select {
                class: "border border-neutral-300 rounded px-2 py-2 text-sm",
                onchange: move |evt: FormEvent| {
                    let value = evt.value();
                    job_type.set(JobPostType::ALL.into_iter().find(|t| t.as_str() == value));
                },
                option { value: "", "Alle typer" }
                for t in JobPostType::ALL {
                    option { value: t.as_str(), {t.label()} }
                }
            }
            label {
                class: "flex items-center gap-1 text-sm",
                input {
                    r#type: "checkbox",
                    checked: expired(),
                    onchange: move |evt: FormEvent| expired.set(evt.checked()),
                }
                "Utgåtte"
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
                empty_text: "Ingen annonser",
                on_load_more: move |_| list.load_more(),
                div {
                    class: "card-grid",
                    for post in list.items() {
                        JobPostCard { key: "{post.id}", post }
                    }
                }
            }
        }
    }
}

#[component]
pub fn JobPostDetail(id: i64) -> Element {
    let post_id = use_prop_signal(id);
    let api = use_api();
    let post = use_query(
        move || job_posts::keys::detail(post_id()),
        move || {
            let id = post_id();
            let client = api.client();
            async move { client.get_job_post(id).await }
        },
    );

    let post = match &*post.read() {
        None => return rsx! { Loading {} },
        Some(Err(error)) => return rsx! { ErrorMessage { error: error.clone() } },
        Some(Ok(post)) => post.clone(),
    };
    let deadline = deadline_text(&post);
    let classes = class_range(&post);
    let kind = post.job_type.label();
    let mailto = format!("mailto:{}", post.email);

    rsx! {
        div {
            class: "grid gap-4 md:grid-cols-[2fr_1fr]",
            Paper {
                h1 { class: "page-title", "{post.title}" }
                p { class: "text-lg text-neutral-700", "{post.ingress}" }
                Markdown { source: post.body.clone() }
            }
            div {
                class: "flex flex-col gap-4",
                if let Some(image) = post.image.clone() {
                    img { class: "card-image", src: "{image}", alt: post.image_alt.clone().unwrap_or_default() }
                }
                Paper {
                    class: "flex flex-col gap-1 text-sm",
                    span { strong { "Bedrift: " } "{post.company}" }
                    span { strong { "Sted: " } "{post.location}" }
                    span { strong { "Type: " } "{kind}" }
                    span { strong { "Søknadsfrist: " } "{deadline}" }
                    span { strong { "Årstrinn: " } "{classes}" }
                    if !post.email.is_empty() {
                        a { href: "{mailto}", "{post.email}" }
                    }
                    if !post.link.is_empty() {
                        a { href: "{post.link}", target: "_blank", rel: "noreferrer", "Søk her" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_deadline_text() {
        let mut post = JobPost {
            deadline: Some(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()),
            ..Default::default()
        };
        assert_eq!(deadline_text(&post), "Frist 01.03.2026");

        post.is_continuously_hiring = true;
        assert_eq!(deadline_text(&post), "Løpende opptak");

        post.is_continuously_hiring = false;
        post.deadline = None;
        assert_eq!(deadline_text(&post), "Ingen frist");
    }

    #[test]
    fn test_class_range() {
        let post = JobPost {
            class_start: 3,
            class_end: 3,
            ..Default::default()
        };
        assert_eq!(class_range(&post), "3. klasse");
        let post = JobPost {
            class_start: 1,
            class_end: 5,
            ..Default::default()
        };
        assert_eq!(class_range(&post), "1. - 5. klasse");
    }

    #[test]
    fn test_job_post_filters() {
        assert!(job_post_filters("", None, false).is_empty());
        let filters = job_post_filters("rust", Some(JobPostType::SummerJob), false);
        assert_eq!(filters.get("job_type"), Some("SUMMER_JOB"));
        assert_eq!(filters.get("search"), Some("rust"));
    }
}
