use api::models::CheatsheetStudy;
use api::resources::misc;
use dioxus::prelude::*;
use store::Filters;
use ui::components::{Button, Input, LoadMore, Paper};
use ui::{use_api, use_paginated};

use super::{ErrorMessage, Guard, Loading};

const STUDIES: [(CheatsheetStudy, &str); 5] = [
    (CheatsheetStudy::Dataing, "Dataingeniør"),
    (CheatsheetStudy::Digfor, "Digital forretningsutvikling"),
    (CheatsheetStudy::Digsec, "Digital infrastruktur og cybersikkerhet"),
    (CheatsheetStudy::Digsam, "Digital samhandling"),
    (CheatsheetStudy::Drift, "Drift av datasystemer"),
];

/// Digital samhandling is a master's programme and starts in fourth grade.
fn grades(study: CheatsheetStudy) -> std::ops::RangeInclusive<u8> {
    match study {
        CheatsheetStudy::Digsam => 4..=5,
        _ => 1..=3,
    }
}

fn study_from_value(value: &str) -> Option<CheatsheetStudy> {
    STUDIES
        .iter()
        .map(|(study, _)| *study)
        .find(|study| study.path_segment() == value)
}

fn cheatsheet_filters(search: &str) -> Filters {
    let mut filters = Filters::new();
    filters.insert("search", search.trim());
    filters
}

#[component]
pub fn Cheatsheets() -> Element {
    rsx! {
        Guard {
            h1 { class: "page-title", "Kokebok" }
            CheatsheetBrowser {}
        }
    }
}

#[component]
fn CheatsheetBrowser() -> Element {
    let api = use_api();
    let mut study = use_signal(|| CheatsheetStudy::Dataing);
    let mut grade = use_signal(|| 1u8);
    let mut search_input = use_signal(String::new);
    let mut search = use_signal(String::new);
    let filters = use_memo(move || cheatsheet_filters(&search()));

    let list = use_paginated(
        move || misc::keys::cheatsheets(study(), grade(), &filters()),
        move |page| {
            let client = api.client();
            let study = *study.peek();
            let grade = *grade.peek();
            let filters = filters.peek().page(page);
            async move { client.get_cheatsheets(study, grade, &filters).await }
        },
    );

    let pick_study = move |evt: FormEvent| {
        if let Some(next) = study_from_value(&evt.value()) {
            study.set(next);
            if !grades(next).contains(&grade()) {
                grade.set(*grades(next).start());
            }
        }
    };

    rsx! {
        form {
            class: "mb-4 flex flex-wrap items-center gap-2",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                search.set(search_input());
            },
            select {
                class: "border border-neutral-300 rounded px-2 py-2 text-sm",
                onchange: pick_study,
                for (value, label) in STUDIES {
                    option {
                        value: value.path_segment(),
                        selected: value == study(),
                        "{label}"
                    }
                }
            }
            select {
                class: "border border-neutral-300 rounded px-2 py-2 text-sm",
                onchange: move |evt: FormEvent| {
                    if let Ok(value) = evt.value().parse::<u8>() {
                        grade.set(value);
                    }
                },
                for value in grades(study()) {
                    option { value: "{value}", selected: value == grade(), "{value}. klasse" }
                }
            }
            Input {
                class: "flex-1",
                placeholder: "Søk etter fag eller tittel",
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
                empty_text: "Fant ingen oppskrifter",
                on_load_more: move |_| list.load_more(),
                div {
                    class: "flex flex-col gap-2",
                    for sheet in list.items() {
                        a {
                            key: "{sheet.id}",
                            href: "{sheet.url}",
                            target: "_blank",
                            class: "no-underline text-inherit",
                            Paper {
                                class: "flex items-center justify-between gap-3 text-sm",
                                div {
                                    class: "flex flex-col",
                                    strong { "{sheet.title}" }
                                    span { class: "text-neutral-500", "{sheet.course} · {sheet.creator}" }
                                }
                                if sheet.official {
                                    span { class: "text-xs font-semibold text-neutral-600", "Offisiell" }
                                }
                            }
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
    fn test_study_select_values() {
        for (study, _) in STUDIES {
            assert_eq!(study_from_value(study.path_segment()), Some(study));
        }
        assert_eq!(study_from_value("MATTE"), None);
    }

    #[test]
    fn test_grades_per_study() {
        assert!(grades(CheatsheetStudy::Dataing).contains(&1));
        assert!(!grades(CheatsheetStudy::Digsam).contains(&1));
        assert_eq!(*grades(CheatsheetStudy::Digsam).start(), 4);
    }

    #[test]
    fn test_search_changes_key() {
        assert_ne!(
            misc::keys::cheatsheets(CheatsheetStudy::Drift, 2, &cheatsheet_filters("")),
            misc::keys::cheatsheets(CheatsheetStudy::Drift, 2, &cheatsheet_filters("ops"))
        );
    }
}
