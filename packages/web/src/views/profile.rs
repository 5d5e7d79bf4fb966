use api::models::{Strike, User};
use api::resources::{notifications, users};
use dioxus::prelude::*;
use store::Filters;
use ui::components::{LoadMore, Paper};
use ui::{
    report_error, use_api, use_auth, use_paginated, use_query, use_query_client, use_snackbar,
    LogoutButton,
};

use super::events::EventCard;
use super::profile_settings::ProfileSettings;
use super::{format_date, format_datetime, ErrorMessage, Guard, Loading};
use crate::Route;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ProfileTab {
    Events,
    Notifications,
    Memberships,
    Badges,
    Strikes,
    Settings,
}

impl ProfileTab {
    const ALL: [ProfileTab; 6] = [
        ProfileTab::Events,
        ProfileTab::Notifications,
        ProfileTab::Memberships,
        ProfileTab::Badges,
        ProfileTab::Strikes,
        ProfileTab::Settings,
    ];

    fn label(self) -> &'static str {
        match self {
            ProfileTab::Events => "Arrangementer",
            ProfileTab::Notifications => "Varsler",
            ProfileTab::Memberships => "Medlemskap",
            ProfileTab::Badges => "Badges",
            ProfileTab::Strikes => "Prikker",
            ProfileTab::Settings => "Innstillinger",
        }
    }
}

/// Sum of strike sizes that have not expired yet.
fn active_strike_count(strikes: &[Strike], now: chrono::DateTime<chrono::Utc>) -> u32 {
    strikes
        .iter()
        .filter(|s| s.expires_at.is_none_or(|expires| expires > now))
        .map(|s| s.strike_size)
        .sum()
}

fn notification_class(read: bool) -> &'static str {
    if read {
        "flex flex-col gap-1"
    } else {
        "flex flex-col gap-1 border-l-4 border-l-primary-500"
    }
}

#[component]
pub fn Profile() -> Element {
    rsx! {
        Guard {
            ProfileContent {}
        }
    }
}

#[component]
fn ProfileContent() -> Element {
    let auth = use_auth();
    let mut tab = use_signal(|| ProfileTab::Events);

    let Some(user) = auth().user else {
        return rsx! { Loading {} };
    };
    let current = tab();
    let body = match current {
        ProfileTab::Events => rsx! { MyEvents {} },
        ProfileTab::Notifications => rsx! { MyNotifications {} },
        ProfileTab::Memberships => rsx! { MyMemberships {} },
        ProfileTab::Badges => rsx! { MyBadges {} },
        ProfileTab::Strikes => rsx! { MyStrikes {} },
        ProfileTab::Settings => rsx! { ProfileSettings { user: user.clone() } },
    };

    rsx! {
        div {
            class: "grid gap-4 md:grid-cols-[1fr_3fr]",
            ProfileCard { user }
            div {
                div {
                    class: "tab-bar",
                    for t in ProfileTab::ALL {
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
    }
}

#[component]
fn ProfileCard(user: User) -> Element {
    let name = user.full_name();

    rsx! {
        Paper {
            class: "flex flex-col items-center gap-2 text-center",
            if let Some(image) = user.image.clone() {
                img { class: "h-24 w-24 rounded-full object-cover", src: "{image}", alt: "" }
            }
            h2 { class: "m-0 text-lg font-semibold", "{name}" }
            span { class: "text-sm text-neutral-500", "{user.user_id}" }
            span { class: "text-sm text-neutral-500", "{user.email}" }
            if !user.allergy.is_empty() {
                span { class: "text-xs text-neutral-500", "Allergier: {user.allergy}" }
            }
            if user.unanswered_evaluations_count > 0 {
                span {
                    class: "text-xs font-medium text-amber-700",
                    "Du har {user.unanswered_evaluations_count} ubesvarte evalueringer"
                }
            }
            LogoutButton { class: "mt-2" }
        }
    }
}

#[component]
fn MyEvents() -> Element {
    let api = use_api();
    let list = use_paginated(
        || users::keys::events(None),
        move |page| {
            let client = api.client();
            async move { client.get_user_events(None, &Filters::new().page(page)).await }
        },
    );

    if let Some(error) = list.error() {
        return rsx! { ErrorMessage { error } };
    }
    if list.is_loading() {
        return rsx! { Loading {} };
    }

    rsx! {
        LoadMore {
            has_next_page: list.has_next_page(),
            is_fetching: list.is_fetching(),
            is_empty: list.is_empty(),
            empty_text: "Du er ikke påmeldt noen kommende arrangementer",
            on_load_more: move |_| list.load_more(),
            div {
                class: "card-grid",
                for event in list.items() {
                    EventCard { key: "{event.id}", event }
                }
            }
        }
    }
}

#[component]
fn MyNotifications() -> Element {
    let api = use_api();
    let query = use_query_client();
    let mut snackbar = use_snackbar();
    let list = use_paginated(
        || notifications::keys::list(&Filters::new()),
        move |page| {
            let client = api.client();
            async move { client.get_notifications(&Filters::new().page(page)).await }
        },
    );

    if let Some(error) = list.error() {
        return rsx! { ErrorMessage { error } };
    }
    if list.is_loading() {
        return rsx! { Loading {} };
    }

    let mark_read = move |id: i64| {
        spawn(async move {
            match api.client().update_notification(id, true).await {
                Ok(_) => query.apply(&notifications::invalidates_after_notification_update()),
                Err(e) => {
                    report_error(&mut snackbar, &e);
                }
            }
        });
    };

    rsx! {
        LoadMore {
            has_next_page: list.has_next_page(),
            is_fetching: list.is_fetching(),
            is_empty: list.is_empty(),
            empty_text: "Ingen varsler",
            on_load_more: move |_| list.load_more(),
            div {
                class: "flex flex-col gap-2",
                for notification in list.items() {
                    Paper {
                        key: "{notification.id}",
                        class: notification_class(notification.read),
                        div {
                            class: "flex items-start justify-between gap-2",
                            strong { class: "text-sm", "{notification.title}" }
                            if !notification.read {
                                button {
                                    class: "bg-transparent border-none cursor-pointer text-xs text-primary-600",
                                    onclick: move |_| mark_read(notification.id),
                                    "Marker som lest"
                                }
                            }
                        }
                        p { class: "m-0 text-sm text-neutral-700", "{notification.description}" }
                        if let Some(link) = notification.link.clone() {
                            a { class: "text-sm", href: "{link}", "Gå til" }
                        }
                        span {
                            class: "text-xs text-neutral-400",
                            {notification.created_at.as_ref().map(format_datetime).unwrap_or_default()}
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn MyMemberships() -> Element {
    let api = use_api();
    let list = use_paginated(
        || users::keys::memberships(None),
        move |page| {
            let client = api.client();
            async move { client.get_user_memberships(None, &Filters::new().page(page)).await }
        },
    );

    if let Some(error) = list.error() {
        return rsx! { ErrorMessage { error } };
    }
    if list.is_loading() {
        return rsx! { Loading {} };
    }

    rsx! {
        LoadMore {
            has_next_page: list.has_next_page(),
            is_fetching: list.is_fetching(),
            is_empty: list.is_empty(),
            empty_text: "Du er ikke medlem av noen grupper",
            on_load_more: move |_| list.load_more(),
            div {
                class: "card-grid",
                for membership in list.items() {
                    Link {
                        key: "{membership.group.slug}",
                        to: Route::GroupDetail { slug: membership.group.slug.clone() },
                        class: "no-underline text-inherit",
                        Paper {
                            class: "flex flex-col gap-1",
                            span { class: "font-medium", "{membership.group.name}" }
                            span { class: "text-xs text-neutral-500", {membership.membership_type.label()} }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn MyBadges() -> Element {
    let api = use_api();
    let list = use_paginated(
        || users::keys::badges(None),
        move |page| {
            let client = api.client();
            async move { client.get_user_badges(None, &Filters::new().page(page)).await }
        },
    );

    if let Some(error) = list.error() {
        return rsx! { ErrorMessage { error } };
    }
    if list.is_loading() {
        return rsx! { Loading {} };
    }

    rsx! {
        LoadMore {
            has_next_page: list.has_next_page(),
            is_fetching: list.is_fetching(),
            is_empty: list.is_empty(),
            empty_text: "Du har ingen badges ennå",
            on_load_more: move |_| list.load_more(),
            div {
                class: "card-grid",
                for badge in list.items() {
                    Paper {
                        key: "{badge.id}",
                        class: "flex flex-col items-center gap-1 text-center",
                        if let Some(image) = badge.image.clone() {
                            img { class: "h-16 w-16 object-contain", src: "{image}", alt: "" }
                        }
                        strong { class: "text-sm", "{badge.title}" }
                        span { class: "text-xs text-neutral-500", "{badge.description}" }
                        span { class: "text-xs text-neutral-400", {format!("{:.1}% har denne", badge.total_completion_percentage)} }
                    }
                }
            }
        }
    }
}

#[component]
fn MyStrikes() -> Element {
    let api = use_api();
    let strikes = use_query(
        || users::keys::strikes(None),
        move || {
            let client = api.client();
            async move { client.get_user_strikes(None).await }
        },
    );

    let strikes = match &*strikes.read() {
        None => return rsx! { Loading {} },
        Some(Err(error)) => return rsx! { ErrorMessage { error: error.clone() } },
        Some(Ok(strikes)) => strikes.clone(),
    };
    let active = active_strike_count(&strikes, chrono::Utc::now());

    rsx! {
        div {
            class: "flex flex-col gap-2",
            p { class: "m-0 text-sm", "Du har {active} aktive prikker." }
            for strike in strikes {
                Paper {
                    key: "{strike.id}",
                    class: "flex flex-col gap-1 text-sm",
                    div {
                        class: "flex justify-between font-medium",
                        span { "{strike.description}" }
                        span { "{strike.strike_size} prikk(er)" }
                    }
                    if let Some(event) = strike.event.clone() {
                        Link { to: Route::EventDetail { id: event.id }, "{event.title}" }
                    }
                    if let Some(expires) = strike.expires_at.as_ref().map(format_date) {
                        span { class: "text-xs text-neutral-500", "Utløper {expires}" }
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
    fn test_active_strike_count_skips_expired() {
        let now = Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap();
        let strike = |size: u32, expires: Option<chrono::DateTime<Utc>>| Strike {
            strike_size: size,
            expires_at: expires,
            ..Default::default()
        };
        let strikes = vec![
            strike(1, Some(Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap())),
            strike(2, Some(Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap())),
            strike(3, None),
        ];
        assert_eq!(active_strike_count(&strikes, now), 4);
    }
}
