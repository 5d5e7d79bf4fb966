use api::ApiError;
use chrono::{DateTime, NaiveDateTime, Utc};
use dioxus::prelude::*;
use ui::components::NotFoundIndicator;
use ui::{Access, RequireAuth};

use crate::Route;

mod layout;
pub use layout::AppLayout;

mod landing;
pub use landing::Landing;

mod events;
pub use events::{EventDetail, Events};

mod news;
pub use news::{NewsDetail, NewsList};

mod job_posts;
pub use job_posts::{JobPostDetail, JobPosts};

mod groups;
pub use groups::{GroupDetail, Groups};

mod group_admin;

mod profile;
pub use profile::Profile;

mod profile_settings;

mod gallery;
pub use gallery::{Galleries, GalleryDetail};

mod form;
pub use form::FormPage;

mod qr_codes;
pub use qr_codes::QrCodes;

mod feedback;
pub use feedback::FeedbackPage;

mod short_links;
pub use short_links::ShortLinks;

mod toddel;
pub use toddel::ToddelArchive;

mod login;
pub use login::{ForgotPassword, Login};

mod signup;
pub use signup::SignUp;

mod cheatsheets;
pub use cheatsheets::Cheatsheets;

mod admin;
pub use admin::{EventAdmin, JobPostAdmin, NewsAdmin, StrikeAdmin, UserAdmin};

mod not_found;
pub use not_found::NotFound;

mod reactions;

/// Date and time as shown on cards and detail pages.
pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%d.%m.%Y kl. %H:%M").to_string()
}

pub(crate) fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%d.%m.%Y").to_string()
}

/// Value for an `<input type="datetime-local">`.
pub(crate) fn to_input_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M").to_string()
}

/// Parse the value of an `<input type="datetime-local">`. Browsers omit the
/// seconds unless the step asks for them.
pub(crate) fn parse_input_datetime(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Track a prop in a signal so resources reading it re-run when a route
/// parameter changes under the same component.
pub(crate) fn use_prop_signal<T: Clone + PartialEq + 'static>(value: T) -> Signal<T> {
    let mut signal = use_signal(|| value.clone());
    if *signal.peek() != value {
        signal.set(value);
    }
    signal
}

pub(crate) fn access_list(groups: &[&str]) -> Vec<String> {
    groups.iter().map(|g| g.to_string()).collect()
}

#[component]
pub(crate) fn Loading() -> Element {
    rsx! {
        div { class: "py-12 text-center text-neutral-500", "Laster..." }
    }
}

/// A failed query: 404s get the not-found illustration, the rest their detail.
#[component]
pub(crate) fn ErrorMessage(error: ApiError) -> Element {
    if error.is_not_found() {
        return rsx! {
            NotFoundIndicator { header: "Fant ikke innholdet" }
        };
    }
    rsx! {
        div { class: "error-box", "{error.detail()}" }
    }
}

/// Page guard: signed-in members of `access_groups` only. Everyone else is
/// sent to the login page or the landing page.
#[component]
pub(crate) fn Guard(#[props(default)] access_groups: Vec<String>, children: Element) -> Element {
    let route = use_route::<Route>();
    let nav = use_navigator();

    rsx! {
        RequireAuth {
            access_groups,
            current_path: route.to_string(),
            on_redirect: move |access: Access| match access {
                Access::Login { .. } => {
                    nav.replace(Route::Login {});
                }
                _ => {
                    nav.replace(Route::Landing {});
                }
            },
            {children}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_input_datetime_roundtrip() {
        let dt = Utc.with_ymd_and_hms(2024, 9, 14, 18, 30, 0).unwrap();
        assert_eq!(to_input_datetime(&dt), "2024-09-14T18:30");
        assert_eq!(parse_input_datetime("2024-09-14T18:30"), Some(dt));
        assert_eq!(parse_input_datetime("2024-09-14T18:30:00"), Some(dt));
        assert_eq!(parse_input_datetime(""), None);
    }

    #[test]
    fn test_display_formats() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 5, 9, 0, 0).unwrap();
        assert_eq!(format_datetime(&dt), "05.01.2024 kl. 09:00");
        assert_eq!(format_date(&dt), "05.01.2024");
    }
}
