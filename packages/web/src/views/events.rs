use api::models::{Event, EventFavorite, EventList, RegistrationMutate, RegistrationWindow, Submission};
use api::resources::{events, forms, reactions::EVENT_CONTENT_TYPE};
use api::ApiError;
use chrono::Utc;
use dioxus::prelude::*;
use store::Filters;
use ui::components::{Button, ButtonVariant, FormAnswer, Input, LoadMore, ModalOverlay, Paper};
use ui::{
    report_error, show_snackbar, use_api, use_auth, use_paginated, use_query, use_query_client,
    use_snackbar, Markdown, Severity,
};

use super::reactions::Reactions;
use super::{format_datetime, use_prop_signal, ErrorMessage, Loading};
use crate::Route;

/// Filters for the event list. Empty values are left out.
fn event_filters(search: &str, category: Option<i64>, expired: bool) -> Filters {
    let mut filters = Filters::new();
    let search = search.trim();
    if !search.is_empty() {
        filters.insert("search", search);
    }
    if let Some(category) = category {
        filters.insert("category", category);
    }
    if expired {
        filters.insert("expired", true);
    }
    filters
}

#[component]
pub(crate) fn EventCard(event: EventList) -> Element {
    let when = format_datetime(&event.start_date);

    rsx! {
        Link {
            to: Route::EventDetail { id: event.id },
            class: "no-underline text-inherit",
            Paper {
                class: "flex h-full flex-col gap-2 hover:shadow-md transition-shadow",
                if let Some(image) = event.image.clone() {
                    img { class: "card-image", src: "{image}", alt: event.image_alt.clone().unwrap_or_default() }
                }
                h3 { class: "m-0 text-base font-semibold text-neutral-900", "{event.title}" }
                span { class: "text-sm text-neutral-600", "{when}" }
                span { class: "text-sm text-neutral-600", "{event.location}" }
                if event.expired {
                    span { class: "text-xs text-neutral-400", "Avsluttet" }
                }
            }
        }
    }
}

#[component]
pub fn Events() -> Element {
    let api = use_api();
    let mut search_input = use_signal(String::new);
    let mut search = use_signal(String::new);
    let mut category = use_signal(|| Option::<i64>::None);
    let mut expired = use_signal(|| false);
    let filters = use_memo(move || event_filters(&search(), category(), expired()));

    let categories = use_query(events::keys::categories, move || {
        let client = api.client();
        async move { client.get_categories().await }
    });
    let list = use_paginated(
        move || events::keys::list(&filters()),
        move |page| {
            let client = api.client();
            let filters = filters.peek().page(page);
            async move { client.get_events(&filters).await }
        },
    );

    let category_options = match &*categories.read() {
        Some(Ok(list)) => list.clone(),
        _ => Vec::new(),
    };

    rsx! {
        h1 { class: "page-title", "Arrangementer" }
        form {
            class: "mb-4 flex flex-wrap items-center gap-2",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                search.set(search_input());
            },
            Input {
                class: "flex-1 min-w-[12rem]",
                placeholder: "Søk etter arrangement",
                value: search_input(),
                oninput: move |evt: FormEvent| search_input.set(evt.value()),
            }
            select {
                class: "border border-neutral-300 rounded px-2 py-2 text-sm",
                onchange: move |evt: FormEvent| category.set(evt.value().parse().ok()),
                option { value: "", "Alle kategorier" }
                for c in category_options {
                    option { key: "{c.id}", value: "{c.id}", "{c.text}" }
                }
            }
            label {
                class: "flex items-center gap-1 text-sm",
                input {
                    r#type: "checkbox",
                    checked: expired(),
                    onchange: move |evt: FormEvent| expired.set(evt.checked()),
                }
                "Tidligere"
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
                empty_text: "Ingen arrangementer",
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
}

#[component]
pub fn EventDetail(id: i64) -> Element {
    let event_id = use_prop_signal(id);
    let api = use_api();

    let event = use_query(
        move || events::keys::detail(event_id()),
        move || {
            let id = event_id();
            let client = api.client();
            async move { client.get_event(id).await }
        },
    );

    let view = match &*event.read() {
        None => rsx! { Loading {} },
        Some(Err(error)) => rsx! { ErrorMessage { error: error.clone() } },
        Some(Ok(event)) => rsx! { EventView { event: event.clone() } },
    };
    view
}

#[component]
fn EventView(event: Event) -> Element {
    let auth = use_auth();
    let start = format_datetime(&event.start_date);
    let end = format_datetime(&event.end_date);
    let signed_in = auth().user.is_some();

    rsx! {
        div {
            class: "grid gap-4 md:grid-cols-[2fr_1fr]",
            div {
                class: "flex flex-col gap-4",
                if let Some(image) = event.image.clone() {
                    img { class: "card-image", src: "{image}", alt: event.image_alt.clone().unwrap_or_default() }
                }
                Paper {
                    h1 { class: "page-title", "{event.title}" }
                    Markdown { source: event.description.clone() }
                }
                Reactions {
                    content_type: EVENT_CONTENT_TYPE,
                    object_id: event.id,
                    reactions: event.reactions.clone(),
                    allowed: event.emojis_allowed,
                }
            }
            div {
                class: "flex flex-col gap-4",
                Paper {
                    class: "flex flex-col gap-1 text-sm",
                    span { strong { "Fra: " } "{start}" }
                    span { strong { "Til: " } "{end}" }
                    span { strong { "Sted: " } "{event.location}" }
                    if let Some(organizer) = event.organizer.clone() {
                        span {
                            strong { "Arrangør: " }
                            Link { to: Route::GroupDetail { slug: organizer.slug }, "{organizer.name}" }
                        }
                    }
                    if event.sign_up {
                        span { strong { "Påmeldte: " } "{event.list_count}/{event.limit}" }
                        if event.waiting_list_count > 0 {
                            span { strong { "Venteliste: " } "{event.waiting_list_count}" }
                        }
                    }
                }
                if signed_in {
                    RegistrationPanel { event: event.clone() }
                    FavoriteToggle { event_id: event.id }
                } else if event.sign_up {
                    Paper {
                        class: "text-sm",
                        Link { to: Route::Login {}, "Logg inn" }
                        " for å melde deg på."
                    }
                }
                if event.permissions.write {
                    Link { to: Route::EventAdmin {}, class: "text-sm", "Administrer arrangementer" }
                }
            }
        }
    }
}

/// Registration status and the sign-up/sign-off buttons for the signed-in user.
#[component]
fn RegistrationPanel(event: Event) -> Element {
    let auth = use_auth();
    let api = use_api();
    let query = use_query_client();
    let mut snackbar = use_snackbar();
    let mut inline_error = use_signal(|| Option::<String>::None);
    let mut show_survey = use_signal(|| false);

    let user_id = auth().user.map(|u| u.user_id).unwrap_or_default();
    let target = use_prop_signal((event.id, user_id));
    let registration = use_query(
        move || {
            let (event_id, user_id) = target();
            events::keys::registration(event_id, &user_id)
        },
        move || {
            let (event_id, user_id) = target();
            let client = api.client();
            async move { client.get_registration(event_id, &user_id).await }
        },
    );

    let event_id = event.id;
    let survey = event.survey.clone();
    let now = Utc::now();
    let window = event.registration_window(now);

    let register = move |submission: Option<Submission>| {
        let survey = survey.clone();
        spawn(async move {
            let client = api.client();
            if let (Some(form_id), Some(submission)) = (survey.as_deref(), submission.as_ref()) {
                if let Err(e) = client.create_submission(form_id, submission).await {
                    inline_error.set(report_error(&mut snackbar, &e));
                    return;
                }
            }
            match client.create_registration(event_id, &RegistrationMutate::default()).await {
                Ok(registration) => {
                    query.apply(&events::invalidates_after_registration_create(event_id, survey.as_deref()));
                    let message = if registration.is_on_wait {
                        "Du er satt på venteliste"
                    } else {
                        "Du er påmeldt"
                    };
                    show_snackbar(&mut snackbar, Severity::Success, message);
                    inline_error.set(None);
                    show_survey.set(false);
                }
                Err(e) => inline_error.set(report_error(&mut snackbar, &e)),
            }
        });
    };

    let survey_for_delete = event.survey.clone();
    let sign_off = move |_: MouseEvent| {
        let survey = survey_for_delete.clone();
        let (_, user_id) = target();
        spawn(async move {
            match api.client().delete_registration(event_id, &user_id).await {
                Ok(_) => {
                    query.apply(&events::invalidates_after_registration_delete(event_id, survey.as_deref()));
                    show_snackbar(&mut snackbar, Severity::Info, "Du er meldt av");
                }
                Err(e) => inline_error.set(report_error(&mut snackbar, &e)),
            }
        });
    };

    let status = match &*registration.read() {
        None => return rsx! { Loading {} },
        Some(Ok(registration)) => Some(registration.clone()),
        Some(Err(e)) if e.is_not_found() => None,
        Some(Err(e)) => return rsx! { ErrorMessage { error: e.clone() } },
    };

    let has_survey = event.survey.is_some();
    let opens_at = event
        .start_registration_at
        .as_ref()
        .map(format_datetime)
        .unwrap_or_default();

    let status_view = match (status, window) {
        (Some(registration), _) => {
            let wait_text = match registration.wait_queue_number {
                Some(number) => format!("Du står på venteliste (nr. {number})"),
                None => "Du står på venteliste".to_string(),
            };
            rsx! {
                if registration.is_on_wait {
                    p { class: "m-0 text-sm", "{wait_text}" }
                } else {
                    p { class: "m-0 text-sm font-medium text-green-700", "Du er påmeldt" }
                }
                if event.can_sign_off(now) {
                    Button { variant: ButtonVariant::Outline, onclick: sign_off, "Meld deg av" }
                } else {
                    p { class: "m-0 text-xs text-neutral-500", "Avmeldingsfristen har gått ut" }
                }
            }
        }
        (None, RegistrationWindow::Open) => {
            let register = register.clone();
            rsx! {
                if event.is_full() {
                    p { class: "m-0 text-xs text-neutral-500", "Arrangementet er fullt, du havner på venteliste." }
                }
                Button {
                    onclick: move |_: MouseEvent| {
                        if has_survey {
                            show_survey.set(true);
                        } else {
                            register(None);
                        }
                    },
                    "Meld deg på"
                }
            }
        }
        (None, RegistrationWindow::NotOpen) => rsx! {
            p { class: "m-0 text-sm", "Påmeldingen åpner {opens_at}" }
        },
        (None, RegistrationWindow::Closed) => rsx! {
            p { class: "m-0 text-sm", "Påmeldingen er stengt" }
        },
        (None, RegistrationWindow::NoSignUp) => rsx! {},
    };

    rsx! {
        Paper {
            class: "flex flex-col gap-3",
            {status_view}
            if let Some(err) = inline_error() {
                div { class: "error-box", "{err}" }
            }
        }
        if show_survey() {
            if let Some(form_id) = event.survey.clone() {
                ModalOverlay {
                    title: "Spørreskjema",
                    on_close: move |_| show_survey.set(false),
                    div {
                        class: "p-6",
                        SurveyForm { form_id, on_submit: move |submission| register(Some(submission)) }
                    }
                }
            }
        }
    }
}

#[component]
fn SurveyForm(form_id: String, on_submit: EventHandler<Submission>) -> Element {
    let api = use_api();
    let form_id = use_prop_signal(form_id);
    let form = use_query(
        move || forms::keys::detail(&form_id()),
        move || {
            let id = form_id();
            let client = api.client();
            async move { client.get_form(&id).await }
        },
    );

    let view = match &*form.read() {
        None => rsx! { Loading {} },
        Some(Err(error)) => rsx! { ErrorMessage { error: error.clone() } },
        Some(Ok(form)) => rsx! {
            FormAnswer { form: form.clone(), submit_text: "Send svar og meld på", on_submit }
        },
    };
    view
}

#[component]
fn FavoriteToggle(event_id: i64) -> Element {
    let api = use_api();
    let query = use_query_client();
    let mut snackbar = use_snackbar();
    let id = use_prop_signal(event_id);

    let favorite = use_query(
        move || events::keys::favorite(id()),
        move || {
            let id = id();
            let client = api.client();
            async move { client.get_event_favorite(id).await }
        },
    );
    let is_favorite = matches!(&*favorite.read(), Some(Ok(f)) if f.is_favorite);

    let toggle = move |_: MouseEvent| {
        let id = id();
        spawn(async move {
            let next = EventFavorite { is_favorite: !is_favorite };
            let result: Result<EventFavorite, ApiError> = api.client().set_event_favorite(id, &next).await;
            match result {
                Ok(saved) => query.set(events::keys::favorite(id), &saved),
                Err(e) => {
                    report_error(&mut snackbar, &e);
                }
            }
        });
    };

    rsx! {
        Button {
            variant: ButtonVariant::Ghost,
            onclick: toggle,
            if is_favorite { "★ Favoritt" } else { "☆ Legg til som favoritt" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_filters_skip_empty_values() {
        assert!(event_filters("  ", None, false).is_empty());

        let filters = event_filters(" fest ", Some(3), true);
        assert_eq!(filters.get("search"), Some("fest"));
        assert_eq!(filters.get("category"), Some("3"));
        assert_eq!(filters.get("expired"), Some("true"));
    }
}
