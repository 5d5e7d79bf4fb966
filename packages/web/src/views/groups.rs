use api::models::{sort_laws, Group, GroupList, GroupType};
use api::resources::{groups, memberships};
use dioxus::prelude::*;
use store::Filters;
use ui::components::{LoadMore, Paper};
use ui::{use_api, use_auth, use_paginated, use_query, Markdown};

use super::group_admin::{
    AddMember, DeleteLaw, EditGroup, FineAdmin, FineDefense, MemberActions, NewFine, NewLaw,
};
use super::{format_date, use_prop_signal, ErrorMessage, Loading};
use crate::Route;

/// Section order on the group overview.
const SECTIONS: [(GroupType, &str); 5] = [
    (GroupType::Board, "Hovedorgan"),
    (GroupType::Subgroup, "Undergrupper"),
    (GroupType::Committee, "Komiteer"),
    (GroupType::Interestgroup, "Interessegrupper"),
    (GroupType::Other, "Andre"),
];

/// Split groups into the overview sections, dropping empty ones. Types
/// without a section of their own land under "Andre".
fn group_sections(groups: &[GroupList]) -> Vec<(&'static str, Vec<GroupList>)> {
    let section_of = |t: GroupType| {
        SECTIONS
            .iter()
            .position(|(s, _)| *s == t)
            .unwrap_or(SECTIONS.len() - 1)
    };
    let mut sections: Vec<(&'static str, Vec<GroupList>)> =
        SECTIONS.iter().map(|(_, title)| (*title, Vec::new())).collect();
    for group in groups {
        sections[section_of(group.group_type)].1.push(group.clone());
    }
    sections.retain(|(_, list)| !list.is_empty());
    sections
}

#[component]
pub fn Groups() -> Element {
    let api = use_api();
    let list = use_query(
        || groups::keys::list(&Filters::new()),
        move || {
            let client = api.client();
            async move { client.get_groups(&Filters::new()).await }
        },
    );

    let sections = match &*list.read() {
        None => return rsx! { Loading {} },
        Some(Err(error)) => return rsx! { ErrorMessage { error: error.clone() } },
        Some(Ok(list)) => group_sections(list),
    };

    rsx! {
        h1 { class: "page-title", "Grupper" }
        for (title, list) in sections {
            section {
                key: "{title}",
                class: "mb-6",
                h2 { class: "mb-3 text-lg font-semibold", "{title}" }
                div {
                    class: "card-grid",
                    for group in list {
                        Link {
                            key: "{group.slug}",
                            to: Route::GroupDetail { slug: group.slug.clone() },
                            class: "no-underline text-inherit",
                            Paper {
                                class: "flex items-center gap-3 hover:shadow-md transition-shadow",
                                if let Some(image) = group.image.clone() {
                                    img { class: "h-12 w-12 rounded-full object-cover", src: "{image}", alt: "" }
                                }
                                span { class: "font-medium", "{group.name}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GroupTab {
    About,
    Members,
    Laws,
    Fines,
}

impl GroupTab {
    fn label(self) -> &'static str {
        match self {
            GroupTab::About => "Om",
            GroupTab::Members => "Medlemmer",
            GroupTab::Laws => "Lovverk",
            GroupTab::Fines => "Bøter",
        }
    }
}

/// Laws and fines are for members of groups with fines turned on.
fn visible_tabs(group: &Group) -> Vec<GroupTab> {
    let mut tabs = vec![GroupTab::About, GroupTab::Members];
    if group.fines_activated && (group.viewer_is_member || group.permissions.write) {
        tabs.push(GroupTab::Laws);
        tabs.push(GroupTab::Fines);
    }
    tabs
}

#[component]
pub fn GroupDetail(slug: String) -> Element {
    let slug = use_prop_signal(slug);
    let api = use_api();
    let mut tab = use_signal(|| GroupTab::About);

    let group = use_query(
        move || groups::keys::detail(&slug()),
        move || {
            let slug = slug();
            let client = api.client();
            async move { client.get_group(&slug).await }
        },
    );

    let group = match &*group.read() {
        None => return rsx! { Loading {} },
        Some(Err(error)) => return rsx! { ErrorMessage { error: error.clone() } },
        Some(Ok(group)) => group.clone(),
    };
    let tabs = visible_tabs(&group);
    let can_manage = group.permissions.write;
    let current = if tabs.contains(&tab()) { tab() } else { GroupTab::About };
    let body = match current {
        GroupTab::About => rsx! { GroupAbout { group: group.clone() } },
        GroupTab::Members => rsx! { GroupMembers { slug: group.slug.clone(), can_manage } },
        GroupTab::Laws => rsx! { GroupLaws { slug: group.slug.clone(), can_manage } },
        GroupTab::Fines => rsx! { GroupFines { slug: group.slug.clone(), can_manage } },
    };

    rsx! {
        div {
            class: "mb-4 flex items-center gap-4",
            if let Some(image) = group.image.clone() {
                img { class: "h-16 w-16 rounded-full object-cover", src: "{image}", alt: group.image_alt.clone().unwrap_or_default() }
            }
            h1 { class: "page-title m-0", "{group.name}" }
        }
        div {
            class: "tab-bar",
            for t in tabs {
                button {
                    class: if t == current { "tab active" } else { "tab" },
                    onclick: move |_| tab.set(t),
                    {t.label()}
                }
            }
        }
        {body}
    }
}

#[component]
fn GroupAbout(group: Group) -> Element {
    rsx! {
        if group.permissions.write {
            div { class: "mb-3 flex justify-end", EditGroup { group: group.clone() } }
        }
        Paper {
            Markdown { source: group.description.clone() }
            if let Some(email) = group.contact_email.clone() {
                p { class: "text-sm", "Kontakt: " a { href: "mailto:{email}", "{email}" } }
            }
        }
    }
}

#[component]
fn GroupMembers(slug: String, can_manage: bool) -> Element {
    let slug = use_prop_signal(slug);
    let api = use_api();
    let list = use_paginated(
        move || memberships::keys::list(&slug(), &Filters::new()),
        move |page| {
            let slug = slug.peek().clone();
            let client = api.client();
            async move { client.get_memberships(&slug, &Filters::new().page(page)).await }
        },
    );

    if let Some(error) = list.error() {
        return rsx! { ErrorMessage { error } };
    }
    if list.is_loading() {
        return rsx! { Loading {} };
    }

    rsx! {
        if can_manage {
            AddMember { slug: slug() }
        }
        LoadMore {
            has_next_page: list.has_next_page(),
            is_fetching: list.is_fetching(),
            is_empty: list.is_empty(),
            empty_text: "Ingen medlemmer",
            on_load_more: move |_| list.load_more(),
            Paper {
                ul {
                    class: "m-0 list-none p-0 divide-y divide-neutral-100",
                    for membership in list.items() {
                        li {
                            key: "{membership.user.user_id}",
                            class: "flex items-center justify-between gap-3 py-2 text-sm",
                            span { class: "flex-1", {membership.user.full_name()} }
                            span { class: "text-neutral-500", {membership.membership_type.label()} }
                            if can_manage {
                                MemberActions { slug: slug(), membership: membership.clone() }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn GroupLaws(slug: String, can_manage: bool) -> Element {
    let slug = use_prop_signal(slug);
    let api = use_api();
    let laws = use_query(
        move || groups::keys::laws(&slug()),
        move || {
            let slug = slug();
            let client = api.client();
            async move { client.get_group_laws(&slug).await }
        },
    );

    let mut laws = match &*laws.read() {
        None => return rsx! { Loading {} },
        Some(Err(error)) => return rsx! { ErrorMessage { error: error.clone() } },
        Some(Ok(laws)) => laws.clone(),
    };
    sort_laws(&mut laws);

    rsx! {
        if can_manage {
            div { class: "mb-3", NewLaw { slug: slug() } }
        }
        Paper {
            class: "flex flex-col gap-3",
            if laws.is_empty() {
                p { class: "text-sm text-neutral-500", "Gruppen har ikke lagt inn et lovverk" }
            }
            for law in laws {
                div {
                    key: "{law.id}",
                    if law.is_heading() {
                        h3 { class: "m-0 mt-2 text-base font-semibold", "§{law.paragraph} {law.title}" }
                    } else {
                        div {
                            class: "flex items-center justify-between gap-3 text-sm font-medium",
                            span { class: "flex-1", "§{law.paragraph} {law.title}" }
                            span { class: "text-neutral-500", "{law.amount} bøter" }
                            if can_manage {
                                DeleteLaw { slug: slug(), law_id: law.id.clone() }
                            }
                        }
                    }
                    if !law.description.is_empty() {
                        p { class: "m-0 text-sm text-neutral-600", "{law.description}" }
                    }
                }
            }
        }
    }
}

#[component]
fn GroupFines(slug: String, can_manage: bool) -> Element {
    let slug = use_prop_signal(slug);
    let api = use_api();
    let auth = use_auth();
    let user_id = auth().user.map(|u| u.user_id).unwrap_or_default();
    let user_id = use_prop_signal(user_id);

    let list = use_paginated(
        move || groups::keys::user_fines(&slug(), &user_id(), &Filters::new()),
        move |page| {
            let slug = slug.peek().clone();
            let user_id = user_id.peek().clone();
            let client = api.client();
            async move {
                client
                    .get_group_user_fines(&slug, &user_id, &Filters::new().page(page))
                    .await
            }
        },
    );

    if let Some(error) = list.error() {
        return rsx! { ErrorMessage { error } };
    }
    if list.is_loading() {
        return rsx! { Loading {} };
    }

    rsx! {
        div { class: "mb-3", NewFine { slug: slug() } }
        if can_manage {
            FineAdmin { slug: slug() }
        }
        h3 { class: "m-0 mb-2 text-base font-semibold", "Mine bøter" }
        LoadMore {
            has_next_page: list.has_next_page(),
            is_fetching: list.is_fetching(),
            is_empty: list.is_empty(),
            empty_text: "Du har ingen bøter i denne gruppen",
            on_load_more: move |_| list.load_more(),
            div {
                class: "flex flex-col gap-2",
                for fine in list.items() {
                    Paper {
                        key: "{fine.id}",
                        class: "flex flex-col gap-1 text-sm",
                        div {
                            class: "flex justify-between font-medium",
                            span { "{fine.description}" }
                            span { "{fine.amount} bøter" }
                        }
                        if !fine.reason.is_empty() {
                            span { class: "text-neutral-600", "{fine.reason}" }
                        }
                        span {
                            class: "text-xs text-neutral-500",
                            {fine.created_at.as_ref().map(format_date).unwrap_or_default()}
                            if fine.payed {
                                " · Betalt"
                            } else if fine.approved {
                                " · Godkjent"
                            } else {
                                " · Ikke godkjent"
                            }
                        }
                        FineDefense { slug: slug(), fine: fine.clone() }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(slug: &str, group_type: GroupType) -> GroupList {
        GroupList {
            slug: slug.to_string(),
            name: slug.to_string(),
            group_type,
            ..Default::default()
        }
    }

    #[test]
    fn test_group_sections_keep_order_and_skip_empty() {
        let groups = vec![
            group("index", GroupType::Subgroup),
            group("hs", GroupType::Board),
            group("dataingenior", GroupType::Study),
            group("kok", GroupType::Committee),
        ];
        let sections = group_sections(&groups);
        let titles: Vec<&str> = sections.iter().map(|(t, _)| *t).collect();
        assert_eq!(titles, vec!["Hovedorgan", "Undergrupper", "Komiteer", "Andre"]);
        assert_eq!(sections[3].1[0].slug, "dataingenior");
    }

    #[test]
    fn test_fine_tabs_need_membership() {
        let mut group = Group {
            fines_activated: true,
            ..Default::default()
        };
        assert_eq!(visible_tabs(&group).len(), 2);
        group.viewer_is_member = true;
        assert_eq!(visible_tabs(&group).len(), 4);
        group.fines_activated = false;
        assert_eq!(visible_tabs(&group).len(), 2);
    }
}
