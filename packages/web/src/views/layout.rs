use api::models::{unread_warnings, WarningType};
use api::resources::misc;
use dioxus::prelude::*;
use ui::{has_access, use_api, use_auth, use_query, Navbar};

use super::admin::ANY_ADMIN;
use crate::Route;

const LINK_CLASS: &str = "text-sm text-white/90 no-underline hover:text-white";

/// Shell around every page: warning banner, top bar and the routed page.
#[component]
pub fn AppLayout() -> Element {
    let auth = use_auth();
    let state = auth();
    let is_admin = state.user.is_some() && has_access(state.groups(), ANY_ADMIN);

    rsx! {
        WarningBanner {}
        Navbar {
            brand: rsx! {
                Link { to: Route::Landing {}, class: "text-white no-underline text-lg font-bold", "TIHLDE" }
            },
            Link { to: Route::Events {}, class: "{LINK_CLASS}", "Arrangementer" }
            Link { to: Route::NewsList {}, class: "{LINK_CLASS}", "Nyheter" }
            Link { to: Route::JobPosts {}, class: "{LINK_CLASS}", "Karriere" }
            Link { to: Route::Groups {}, class: "{LINK_CLASS}", "Grupper" }
            Link { to: Route::Galleries {}, class: "{LINK_CLASS}", "Galleri" }
            Link { to: Route::ToddelArchive {}, class: "{LINK_CLASS}", "Töddel" }
            if is_admin {
                Link { to: Route::EventAdmin {}, class: "{LINK_CLASS}", "Admin" }
            }
            if let Some(user) = state.user.clone() {
                Link {
                    to: Route::Profile {},
                    class: "rounded bg-white/10 px-3 py-1.5 text-sm text-white no-underline hover:bg-white/20",
                    "{user.first_name}"
                    if user.unread_notifications > 0 {
                        span { class: "ml-1.5 rounded-full bg-red-500 px-1.5 text-xs", "{user.unread_notifications}" }
                    }
                }
            } else if !state.loading {
                Link {
                    to: Route::Login {},
                    class: "rounded bg-white px-3 py-1.5 text-sm font-medium text-slate-900 no-underline",
                    "Logg inn"
                }
            }
        }
        main {
            class: "page",
            Outlet::<Route> {}
        }
        footer {
            class: "py-6 text-center text-xs text-neutral-500",
            Link { to: Route::FeedbackPage {}, class: "mr-4", "Tilbakemelding" }
            Link { to: Route::ShortLinks {}, class: "mr-4", "Linker" }
            Link { to: Route::Cheatsheets {}, class: "mr-4", "Kokebok" }
            Link { to: Route::QrCodes {}, "QR-koder" }
        }
    }
}

/// Site-wide notices from the API. Closed notices stay hidden for the session.
#[component]
fn WarningBanner() -> Element {
    let api = use_api();
    let mut closed = use_signal(Vec::<i64>::new);
    let warnings = use_query(misc::keys::warnings, move || {
        let client = api.client();
        async move { client.get_warnings().await }
    });

    let visible = match &*warnings.read() {
        Some(Ok(list)) => unread_warnings(list, &closed.read()),
        _ => Vec::new(),
    };

    rsx! {
        for warning in visible {
            div {
                key: "{warning.id}",
                class: warning_class(warning.warning_type),
                span { "{warning.text}" }
                button {
                    class: "ml-3 bg-transparent border-none cursor-pointer font-semibold",
                    onclick: move |_| closed.write().push(warning.id),
                    "✕"
                }
            }
        }
    }
}

fn warning_class(kind: WarningType) -> &'static str {
    match kind {
        WarningType::Information => "warning-banner information",
        WarningType::Warning => "warning-banner warning",
        WarningType::Error => "warning-banner error",
    }
}
