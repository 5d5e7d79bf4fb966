use api::models::{Registration, RegistrationMutate};
use api::resources::events;
use api::UploadFile;
use dioxus::prelude::*;
use store::Filters;
use ui::components::{Button, ButtonVariant, FileUpload, Input, LoadMore, Paper, Textarea};
use ui::{
    report_error, show_snackbar, use_api, use_paginated, use_query_client, use_snackbar, Severity,
};

use super::{Checkbox, Field};
use crate::views::{format_datetime, use_prop_signal, ErrorMessage, Loading};

fn registration_filters(on_wait: bool) -> Filters {
    Filters::new().with("is_on_wait", on_wait)
}

/// Trimmed title and message for a notification to every participant.
fn notification(title: &str, message: &str) -> Result<(String, String), &'static str> {
    let title = title.trim();
    let message = message.trim();
    if title.is_empty() {
        return Err("Varselet må ha en tittel");
    }
    if message.is_empty() {
        return Err("Varselet må ha en melding");
    }
    Ok((title.to_string(), message.to_string()))
}

/// Participants and wait list of an event, with attendance, list moves and
/// removal, plus messages and gift cards to everyone registered.
#[component]
pub(super) fn Participants(event_id: i64, survey: Option<String>) -> Element {
    let mut on_wait = use_signal(|| false);
    let tab_class = |active: bool| if active { "tab active" } else { "tab" };

    rsx! {
        div {
            class: "flex flex-col gap-3 p-4",
            div {
                class: "tab-bar",
                button { class: tab_class(!on_wait()), onclick: move |_| on_wait.set(false), "Påmeldte" }
                button { class: tab_class(on_wait()), onclick: move |_| on_wait.set(true), "Venteliste" }
            }
            RegistrationList { event_id, on_wait: on_wait(), survey }
            NotifyParticipants { event_id }
            GiftCards { event_id }
        }
    }
}

#[component]
fn RegistrationList(event_id: i64, on_wait: bool, survey: Option<String>) -> Element {
    let api = use_api();
    let event_id = use_prop_signal(event_id);
    let on_wait = use_prop_signal(on_wait);
    let mut show_email = use_signal(|| false);

    let list = use_paginated(
        move || events::keys::registration_list(event_id(), &registration_filters(on_wait())),
        move |page| {
            let client = api.client();
            let event_id = *event_id.peek();
            let filters = registration_filters(*on_wait.peek()).page(page);
            async move { client.get_event_registrations(event_id, &filters).await }
        },
    );

    if let Some(error) = list.error() {
        return rsx! { ErrorMessage { error } };
    }
    if list.is_loading() {
        return rsx! { Loading {} };
    }
    let registrations = list.items();
    let empty_text = if on_wait() { "Ingen på ventelisten" } else { "Ingen påmeldte" };
    let attended = registrations.iter().filter(|r| r.has_attended).count();

    rsx! {
        div {
            class: "flex items-center justify-between text-sm text-neutral-600",
            if on_wait() {
                span { "{list.total()} på venteliste" }
            } else {
                span { "{list.total()} påmeldte, {attended} av de viste har ankommet" }
            }
            Checkbox { label: "Vis e-post", checked: show_email(), on_change: move |v| show_email.set(v) }
        }
        LoadMore {
            has_next_page: list.has_next_page(),
            is_fetching: list.is_fetching(),
            is_empty: list.is_empty(),
            empty_text: empty_text.to_string(),
            on_load_more: move |_| list.load_more(),
            div {
                class: "flex flex-col gap-2",
                for registration in registrations {
                    ParticipantRow {
                        key: "{registration.user_info.user_id}",
                        event_id: event_id(),
                        survey: survey.clone(),
                        show_email: show_email(),
                        registration,
                    }
                }
            }
        }
    }
}

#[component]
fn ParticipantRow(
    event_id: i64,
    survey: Option<String>,
    show_email: bool,
    registration: Registration,
) -> Element {
    let api = use_api();
    let query = use_query_client();
    let mut snackbar = use_snackbar();
    let mut busy = use_signal(|| false);
    let mut confirm_delete = use_signal(|| false);

    let user = registration.user_info.clone();
    let name = user.full_name();
    let user_id = user.user_id.clone();

    let update = {
        let user_id = user_id.clone();
        move |change: RegistrationMutate| {
            let user_id = user_id.clone();
            spawn(async move {
                busy.set(true);
                match api.client().update_registration(event_id, &user_id, &change).await {
                    Ok(_) => query.apply(&events::invalidates_after_registration_update(event_id)),
                    Err(e) => {
                        report_error(&mut snackbar, &e);
                    }
                }
                busy.set(false);
            });
        }
    };
    let set_attended = update.clone();
    let move_list = update;

    let remove = move |_: MouseEvent| {
        if !confirm_delete() {
            confirm_delete.set(true);
            return;
        }
        let user_id = user_id.clone();
        let survey = survey.clone();
        spawn(async move {
            busy.set(true);
            match api.client().delete_registration(event_id, &user_id).await {
                Ok(_) => {
                    query.apply(&events::invalidates_after_registration_delete(event_id, survey.as_deref()));
                    show_snackbar(&mut snackbar, Severity::Info, "Deltakeren ble fjernet");
                }
                Err(e) => {
                    report_error(&mut snackbar, &e);
                }
            }
            confirm_delete.set(false);
            busy.set(false);
        });
    };

    let on_wait = registration.is_on_wait;
    let registered_at = registration.created_at.as_ref().map(format_datetime).unwrap_or_default();

    rsx! {
        Paper {
            class: "flex flex-wrap items-center gap-3",
            div {
                class: "flex flex-1 flex-col min-w-0 text-sm",
                strong { "{name}" }
                span { class: "text-xs text-neutral-500", "Påmeldt {registered_at}" }
                if show_email {
                    span { class: "text-xs text-neutral-500", "{user.email}" }
                }
                if !registration.allow_photo {
                    span { class: "text-xs text-neutral-500", "Vil ikke bli tatt bilde av" }
                }
            }
            if !on_wait {
                Checkbox {
                    label: "Ankommet",
                    checked: registration.has_attended,
                    on_change: move |v| set_attended(RegistrationMutate { has_attended: Some(v), ..Default::default() }),
                }
            }
            Button {
                variant: ButtonVariant::Ghost,
                disabled: busy(),
                onclick: move |_: MouseEvent| move_list(RegistrationMutate { is_on_wait: Some(!on_wait), ..Default::default() }),
                if on_wait { "Flytt til påmeldte" } else { "Flytt til venteliste" }
            }
            Button {
                variant: ButtonVariant::Destructive,
                disabled: busy(),
                onclick: remove,
                if confirm_delete() { "Bekreft" } else { "Fjern" }
            }
        }
    }
}

#[component]
fn NotifyParticipants(event_id: i64) -> Element {
    let api = use_api();
    let mut snackbar = use_snackbar();
    let mut title = use_signal(String::new);
    let mut message = use_signal(String::new);
    let mut sending = use_signal(|| false);
    let mut inline_error = use_signal(|| Option::<String>::None);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let (subject, body) = match notification(&title(), &message()) {
            Ok(parts) => parts,
            Err(problem) => {
                inline_error.set(Some(problem.to_string()));
                return;
            }
        };
        spawn(async move {
            sending.set(true);
            match api.client().notify_event_registrations(event_id, &subject, &body).await {
                Ok(response) => {
                    show_snackbar(&mut snackbar, Severity::Success, &response.detail);
                    title.set(String::new());
                    message.set(String::new());
                    inline_error.set(None);
                }
                Err(e) => inline_error.set(report_error(&mut snackbar, &e)),
            }
            sending.set(false);
        });
    };

    rsx! {
        form {
            class: "flex flex-col gap-2 border-t border-neutral-200 pt-3",
            onsubmit: handle_submit,
            h3 { class: "m-0 text-base font-semibold", "Send varsel til påmeldte" }
            Field { label: "Tittel", html_for: "notify-title",
                Input { id: "notify-title", value: title(), oninput: move |e: FormEvent| title.set(e.value()) }
            }
            Field { label: "Melding", html_for: "notify-message",
                Textarea { id: "notify-message", rows: 4, value: message(), oninput: move |e: FormEvent| message.set(e.value()) }
            }
            if let Some(err) = inline_error() {
                div { class: "error-box", "{err}" }
            }
            Button { r#type: "submit", disabled: sending(), "Send varsel" }
        }
    }
}

#[component]
fn GiftCards(event_id: i64) -> Element {
    let api = use_api();
    let mut snackbar = use_snackbar();
    let mut sending = use_signal(|| false);

    let send = move |files: Vec<UploadFile>| {
        if files.is_empty() {
            return;
        }
        spawn(async move {
            sending.set(true);
            match api.client().send_gift_cards(event_id, files).await {
                Ok(response) => show_snackbar(&mut snackbar, Severity::Success, &response.detail),
                Err(e) => {
                    report_error(&mut snackbar, &e);
                }
            }
            sending.set(false);
        });
    };

    rsx! {
        div {
            class: "flex flex-col gap-2 border-t border-neutral-200 pt-3",
            h3 { class: "m-0 text-base font-semibold", "Gavekort" }
            p { class: "m-0 text-sm text-neutral-600", "Velg én fil per deltaker som har ankommet. Filene sendes på e-post." }
            FileUpload {
                label: "Velg gavekort",
                multiple: true,
                disabled: sending(),
                on_files: send,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_filters_split_wait_list() {
        assert_eq!(registration_filters(false).get("is_on_wait"), Some("false"));
        assert_eq!(registration_filters(true).get("is_on_wait"), Some("true"));
        assert_ne!(
            events::keys::registration_list(4, &registration_filters(true)),
            events::keys::registration_list(4, &registration_filters(false))
        );
        assert!(events::keys::registration_list(4, &registration_filters(true))
            .starts_with(&events::keys::registration_list(4, &Filters::new())));
    }

    #[test]
    fn test_notification_needs_title_and_message() {
        assert_eq!(notification(" ", "hei"), Err("Varselet må ha en tittel"));
        assert_eq!(notification("Oppmøte", "  "), Err("Varselet må ha en melding"));
        assert_eq!(
            notification(" Oppmøte ", " Kl. 18 i A4 "),
            Ok(("Oppmøte".to_string(), "Kl. 18 i A4".to_string()))
        );
    }
}
