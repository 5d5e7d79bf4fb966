//! Administration pages. Every page sits behind a [`Guard`] with the groups
//! allowed to manage that resource.

use dioxus::prelude::*;
use ui::components::Label;
use ui::{has_access, use_auth};

use super::{access_list, Guard};
use crate::Route;

mod events;
pub use events::EventAdmin;

mod participants;

mod news;
pub use news::NewsAdmin;

mod job_posts;
pub use job_posts::JobPostAdmin;

mod users;
pub use users::UserAdmin;

mod strikes;
pub use strikes::StrikeAdmin;

pub(crate) const EVENT_ADMIN: &[&str] = &["HS", "Promo", "NoK", "Index"];
pub(crate) const NEWS_ADMIN: &[&str] = &["HS", "Promo", "NoK", "Index"];
pub(crate) const JOB_POST_ADMIN: &[&str] = &["HS", "NoK", "Index"];
pub(crate) const USER_ADMIN: &[&str] = &["HS", "Index"];
pub(crate) const STRIKE_ADMIN: &[&str] = &["HS", "Index"];

/// Members of any of these see the admin link.
pub(crate) const ANY_ADMIN: &[&str] = &["HS", "Promo", "NoK", "Index"];

/// Editable copy of `initial` that starts over whenever `initial` changes,
/// e.g. when another item is picked for editing.
pub(crate) fn use_draft<T: Clone + PartialEq + 'static>(initial: T) -> Signal<T> {
    let mut source = use_signal(|| initial.clone());
    let mut draft = use_signal(|| initial.clone());
    if *source.peek() != initial {
        source.set(initial.clone());
        draft.set(initial);
    }
    draft
}

/// Guarded admin page with the section tabs on top.
#[component]
fn AdminPage(access: &'static [&'static str], title: String, children: Element) -> Element {
    rsx! {
        Guard {
            access_groups: access_list(access),
            AdminTabs {}
            h1 { class: "page-title", "{title}" }
            {children}
        }
    }
}

/// Links to the admin sections the user can open.
#[component]
fn AdminTabs() -> Element {
    let auth = use_auth();
    let route = use_route::<Route>();
    let state = auth();
    let groups = state.groups();

    let sections = [
        (Route::EventAdmin {}, "Arrangementer", EVENT_ADMIN),
        (Route::NewsAdmin {}, "Nyheter", NEWS_ADMIN),
        (Route::JobPostAdmin {}, "Karriere", JOB_POST_ADMIN),
        (Route::UserAdmin {}, "Brukere", USER_ADMIN),
        (Route::StrikeAdmin {}, "Prikker", STRIKE_ADMIN),
    ];
    let visible: Vec<(Route, &str, bool)> = sections
        .into_iter()
        .filter(|(_, _, access)| has_access(groups, access))
        .map(|(target, label, _)| {
            let active = target == route;
            (target, label, active)
        })
        .collect();

    rsx! {
        nav {
            class: "tab-bar",
            for (target, label, active) in visible {
                Link {
                    to: target,
                    class: tab_class(active),
                    "{label}"
                }
            }
        }
    }
}

fn tab_class(active: bool) -> &'static str {
    if active {
        "tab active"
    } else {
        "tab"
    }
}

/// Labelled form row.
#[component]
pub(crate) fn Field(label: String, #[props(default)] html_for: String, children: Element) -> Element {
    rsx! {
        div {
            class: "flex flex-col gap-1.5",
            Label { html_for, "{label}" }
            {children}
        }
    }
}

#[component]
pub(crate) fn Checkbox(label: String, checked: bool, on_change: EventHandler<bool>) -> Element {
    rsx! {
        label {
            class: "flex items-center gap-2 text-sm",
            input {
                r#type: "checkbox",
                checked,
                onchange: move |evt: FormEvent| on_change.call(evt.checked()),
            }
            "{label}"
        }
    }
}
