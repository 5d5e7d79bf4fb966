use api::models::{
    Event, EventFormType, EventMutate, Form, FormCreate, FormField, FormResourceType, FormUpdate,
};
use api::resources::{events, forms};
use chrono::{DateTime, Utc};
use dioxus::prelude::*;
use store::Filters;
use ui::components::{
    validate_fields, Button, ButtonVariant, Expandable, FormFieldsEditor, Input, LoadMore, Paper,
    Textarea,
};
use ui::{
    report_error, show_snackbar, use_api, use_paginated, use_query, use_query_client, use_snackbar,
    Severity,
};

use super::participants::Participants;
use super::{use_draft, AdminPage, Checkbox, Field, EVENT_ADMIN};
use crate::views::{
    format_datetime, parse_input_datetime, to_input_datetime, use_prop_signal, ErrorMessage, Loading,
};

/// Form state of the event editor. Dates are kept as `datetime-local` input
/// values until saved.
#[derive(Clone, Debug, Default, PartialEq)]
struct EventDraft {
    title: String,
    description: String,
    location: String,
    image: String,
    image_alt: String,
    start_date: String,
    end_date: String,
    start_registration_at: String,
    end_registration_at: String,
    sign_off_deadline: String,
    category: Option<i64>,
    organizer: String,
    sign_up: bool,
    limit: String,
    closed: bool,
    can_cause_strikes: bool,
    enforces_previous_strikes: bool,
    emojis_allowed: bool,
}

fn input_value(dt: Option<&DateTime<Utc>>) -> String {
    dt.map(to_input_datetime).unwrap_or_default()
}

fn optional_datetime(value: &str, what: &str) -> Result<Option<DateTime<Utc>>, String> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_input_datetime(value)
        .map(Some)
        .ok_or_else(|| format!("Ugyldig {what}"))
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl EventDraft {
    fn from_event(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            image: event.image.clone().unwrap_or_default(),
            image_alt: event.image_alt.clone().unwrap_or_default(),
            start_date: to_input_datetime(&event.start_date),
            end_date: to_input_datetime(&event.end_date),
            start_registration_at: input_value(event.start_registration_at.as_ref()),
            end_registration_at: input_value(event.end_registration_at.as_ref()),
            sign_off_deadline: input_value(event.sign_off_deadline.as_ref()),
            category: event.category,
            organizer: event.organizer.as_ref().map(|g| g.slug.clone()).unwrap_or_default(),
            sign_up: event.sign_up,
            limit: event.limit.to_string(),
            closed: event.closed,
            can_cause_strikes: event.can_cause_strikes,
            enforces_previous_strikes: event.enforces_previous_strikes,
            emojis_allowed: event.emojis_allowed,
        }
    }

    /// Check the draft and build the request body.
    fn to_mutate(&self) -> Result<EventMutate, String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Arrangementet må ha en tittel".to_string());
        }
        let start_date = optional_datetime(&self.start_date, "startdato")?
            .ok_or_else(|| "Velg når arrangementet starter".to_string())?;
        let end_date = optional_datetime(&self.end_date, "sluttdato")?
            .ok_or_else(|| "Velg når arrangementet slutter".to_string())?;
        if end_date < start_date {
            return Err("Arrangementet kan ikke slutte før det starter".to_string());
        }

        let start_registration_at = optional_datetime(&self.start_registration_at, "påmeldingsstart")?;
        let end_registration_at = optional_datetime(&self.end_registration_at, "påmeldingsslutt")?;
        let sign_off_deadline = optional_datetime(&self.sign_off_deadline, "avmeldingsfrist")?;
        let limit = match self.limit.trim() {
            "" => 0,
            value => value
                .parse::<u32>()
                .map_err(|_| "Antall plasser må være et heltall".to_string())?,
        };
        if self.sign_up {
            let (Some(open), Some(close)) = (start_registration_at, end_registration_at) else {
                return Err("Velg når påmeldingen åpner og stenger".to_string());
            };
            if close < open {
                return Err("Påmeldingen kan ikke stenge før den åpner".to_string());
            }
        }

        Ok(EventMutate {
            title: title.to_string(),
            description: self.description.clone(),
            location: self.location.trim().to_string(),
            image: non_empty(&self.image),
            image_alt: non_empty(&self.image_alt),
            start_date,
            end_date,
            start_registration_at,
            end_registration_at,
            sign_off_deadline,
            category: self.category,
            organizer: non_empty(&self.organizer),
            sign_up: self.sign_up,
            limit,
            closed: self.closed,
            can_cause_strikes: self.can_cause_strikes,
            enforces_previous_strikes: self.enforces_previous_strikes,
            emojis_allowed: self.emojis_allowed,
        })
    }
}

#[component]
pub fn EventAdmin() -> Element {
    let mut selected = use_signal(|| Option::<i64>::None);

    rsx! {
        AdminPage {
            access: EVENT_ADMIN,
            title: "Arrangementer",
            div {
                class: "grid gap-4 md:grid-cols-[1fr_2fr]",
                AdminEventList { selected: selected(), on_select: move |id| selected.set(id) }
                EventEditor {
                    event_id: selected(),
                    on_saved: move |id| selected.set(Some(id)),
                    on_deleted: move |_| selected.set(None),
                }
            }
        }
    }
}

#[component]
fn AdminEventList(selected: Option<i64>, on_select: EventHandler<Option<i64>>) -> Element {
    let api = use_api();
    let list = use_paginated(
        || events::keys::list_admin(&Filters::new()),
        move |page| {
            let client = api.client();
            async move { client.get_events_where_admin(&Filters::new().page(page)).await }
        },
    );

    rsx! {
        div {
            class: "flex flex-col gap-2",
            Button { onclick: move |_| on_select.call(None), "Nytt arrangement" }
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
                    for event in list.items() {
                        button {
                            key: "{event.id}",
                            class: if selected == Some(event.id) { "admin-item active" } else { "admin-item" },
                            onclick: move |_| on_select.call(Some(event.id)),
                            strong { "{event.title}" }
                            span { class: "text-xs text-neutral-500", {format_datetime(&event.start_date)} }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn EventEditor(event_id: Option<i64>, on_saved: EventHandler<i64>, on_deleted: EventHandler<()>) -> Element {
    match event_id {
        None => rsx! { EventForm { event: None, on_saved, on_deleted } },
        Some(id) => rsx! { EventLoader { id, on_saved, on_deleted } },
    }
}

#[component]
fn EventLoader(id: i64, on_saved: EventHandler<i64>, on_deleted: EventHandler<()>) -> Element {
    let api = use_api();
    let id = use_prop_signal(id);
    let event = use_query(
        move || events::keys::detail(id()),
        move || {
            let id = id();
            let client = api.client();
            async move { client.get_event(id).await }
        },
    );

    let view = match &*event.read() {
        None => rsx! { Loading {} },
        Some(Err(error)) => rsx! { ErrorMessage { error: error.clone() } },
        Some(Ok(event)) => rsx! {
            EventForm { event: Some(event.clone()), on_saved, on_deleted }
            Expandable {
                title: "Påmeldingsskjema",
                description: "Spørsmål deltakerne svarer på ved påmelding",
                SurveyEditor { event_id: event.id, event_title: event.title.clone(), survey: event.survey.clone() }
            }
            if event.sign_up {
                Expandable {
                    title: "Deltakere",
                    description: "Oppmøte, venteliste, varsler og gavekort",
                    Participants { event_id: event.id, survey: event.survey.clone() }
                }
            }
        },
    };
    view
}

#[component]
fn EventForm(event: Option<Event>, on_saved: EventHandler<i64>, on_deleted: EventHandler<()>) -> Element {
    let api = use_api();
    let query = use_query_client();
    let mut snackbar = use_snackbar();
    let event_id = event.as_ref().map(|e| e.id);
    let mut draft = use_draft(event.as_ref().map(EventDraft::from_event).unwrap_or_default());
    let mut saving = use_signal(|| false);
    let mut confirm_delete = use_signal(|| false);
    let mut inline_error = use_signal(|| Option::<String>::None);

    let categories = use_query(events::keys::categories, move || {
        let client = api.client();
        async move { client.get_categories().await }
    });
    let category_options = match &*categories.read() {
        Some(Ok(list)) => list.clone(),
        _ => Vec::new(),
    };

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let body = match draft.read().to_mutate() {
            Ok(body) => body,
            Err(message) => {
                inline_error.set(Some(message));
                return;
            }
        };
        spawn(async move {
            saving.set(true);
            let client = api.client();
            let result = match event_id {
                Some(id) => client.update_event(id, &body).await,
                None => client.create_event(&body).await,
            };
            match result {
                Ok(saved) => {
                    query.apply(&events::invalidates_after_event_change());
                    query.set(events::keys::detail(saved.id), &saved);
                    show_snackbar(&mut snackbar, Severity::Success, "Arrangementet ble lagret");
                    inline_error.set(None);
                    on_saved.call(saved.id);
                }
                Err(e) => inline_error.set(report_error(&mut snackbar, &e)),
            }
            saving.set(false);
        });
    };

    let delete = move |_: MouseEvent| {
        let Some(id) = event_id else {
            return;
        };
        if !confirm_delete() {
            confirm_delete.set(true);
            return;
        }
        spawn(async move {
            match api.client().delete_event(id).await {
                Ok(_) => {
                    query.apply(&events::invalidates_after_event_change());
                    show_snackbar(&mut snackbar, Severity::Info, "Arrangementet ble slettet");
                    confirm_delete.set(false);
                    on_deleted.call(());
                }
                Err(e) => {
                    report_error(&mut snackbar, &e);
                }
            }
        });
    };

    let d = draft();

    rsx! {
        Paper {
            form {
                class: "flex flex-col gap-3",
                onsubmit: handle_submit,
                Field { label: "Tittel", html_for: "event-title",
                    Input { id: "event-title", value: d.title.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.title = e.value()) }
                }
                Field { label: "Sted", html_for: "event-location",
                    Input { id: "event-location", value: d.location.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.location = e.value()) }
                }
                div {
                    class: "grid gap-3 md:grid-cols-2",
                    Field { label: "Start", html_for: "event-start",
                        Input { id: "event-start", r#type: "datetime-local", value: d.start_date.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.start_date = e.value()) }
                    }
                    Field { label: "Slutt", html_for: "event-end",
                        Input { id: "event-end", r#type: "datetime-local", value: d.end_date.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.end_date = e.value()) }
                    }
                }
                Field { label: "Beskrivelse", html_for: "event-description",
                    Textarea { id: "event-description", rows: 10, value: d.description.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.description = e.value()) }
                }
                div {
                    class: "grid gap-3 md:grid-cols-2",
                    Field { label: "Bilde (URL)", html_for: "event-image",
                        Input { id: "event-image", value: d.image.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.image = e.value()) }
                    }
                    Field { label: "Alternativ bildetekst", html_for: "event-image-alt",
                        Input { id: "event-image-alt", value: d.image_alt.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.image_alt = e.value()) }
                    }
                }
                div {
                    class: "grid gap-3 md:grid-cols-2",
                    Field { label: "Kategori", html_for: "event-category",
                        select {
                            id: "event-category",
                            class: "border border-neutral-300 rounded px-2 py-2 text-sm",
                            onchange: move |e: FormEvent| draft.with_mut(|d| d.category = e.value().parse().ok()),
                            option { value: "", selected: d.category.is_none(), "Ingen" }
                            for c in category_options {
                                option { key: "{c.id}", value: "{c.id}", selected: d.category == Some(c.id), "{c.text}" }
                            }
                        }
                    }
                    Field { label: "Arrangør (gruppe-slug)", html_for: "event-organizer",
                        Input { id: "event-organizer", value: d.organizer.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.organizer = e.value()) }
                    }
                }
                Checkbox { label: "Påmelding", checked: d.sign_up, on_change: move |v| draft.with_mut(|d| d.sign_up = v) }
                if d.sign_up {
                    div {
                        class: "grid gap-3 md:grid-cols-2",
                        Field { label: "Påmelding åpner", html_for: "event-reg-start",
                            Input { id: "event-reg-start", r#type: "datetime-local", value: d.start_registration_at.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.start_registration_at = e.value()) }
                        }
                        Field { label: "Påmelding stenger", html_for: "event-reg-end",
                            Input { id: "event-reg-end", r#type: "datetime-local", value: d.end_registration_at.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.end_registration_at = e.value()) }
                        }
                        Field { label: "Avmeldingsfrist", html_for: "event-sign-off",
                            Input { id: "event-sign-off", r#type: "datetime-local", value: d.sign_off_deadline.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.sign_off_deadline = e.value()) }
                        }
                        Field { label: "Antall plasser", html_for: "event-limit",
                            Input { id: "event-limit", r#type: "number", value: d.limit.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.limit = e.value()) }
                        }
                    }
                    Checkbox { label: "Stengt for påmelding", checked: d.closed, on_change: move |v| draft.with_mut(|d| d.closed = v) }
                    Checkbox { label: "Kan gi prikker", checked: d.can_cause_strikes, on_change: move |v| draft.with_mut(|d| d.can_cause_strikes = v) }
                    Checkbox { label: "Håndhever tidligere prikker", checked: d.enforces_previous_strikes, on_change: move |v| draft.with_mut(|d| d.enforces_previous_strikes = v) }
                }
                Checkbox { label: "Tillat reaksjoner", checked: d.emojis_allowed, on_change: move |v| draft.with_mut(|d| d.emojis_allowed = v) }
                if let Some(err) = inline_error() {
                    div { class: "error-box", "{err}" }
                }
                div {
                    class: "flex gap-2",
                    Button { r#type: "submit", disabled: saving(), if event_id.is_some() { "Lagre" } else { "Opprett" } }
                    if event_id.is_some() {
                        Button {
                            variant: ButtonVariant::Destructive,
                            onclick: delete,
                            if confirm_delete() { "Bekreft sletting" } else { "Slett" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SurveyEditor(event_id: i64, event_title: String, survey: Option<String>) -> Element {
    match survey {
        None => rsx! { SurveyFields { event_id, event_title, form: None } },
        Some(form_id) => rsx! { SurveyLoader { event_id, event_title, form_id } },
    }
}

#[component]
fn SurveyLoader(event_id: i64, event_title: String, form_id: String) -> Element {
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
        Some(Ok(form)) => rsx! { SurveyFields { event_id, event_title, form: Some(form.clone()) } },
    };
    view
}

/// Fields of a template without the ids the server gave them, so they are
/// stored as new fields on the copy.
fn fields_from_template(template: &Form) -> Vec<FormField> {
    template
        .fields
        .iter()
        .cloned()
        .map(|mut field| {
            field.uuid = None;
            for option in &mut field.options {
                option.uuid = None;
            }
            field
        })
        .collect()
}

fn template_create(title: &str, fields: Vec<FormField>) -> FormCreate {
    FormCreate {
        title: title.trim().to_string(),
        fields,
        template: true,
        resource_type: FormResourceType::Form,
        event_form_type: None,
        event: None,
    }
}

fn survey_create(event_id: i64, event_title: &str, fields: Vec<FormField>) -> FormCreate {
    FormCreate {
        title: format!("Påmeldingsskjema: {event_title}"),
        fields,
        template: false,
        resource_type: FormResourceType::EventForm,
        event_form_type: Some(EventFormType::Survey),
        event: Some(event_id),
    }
}

#[component]
fn SurveyFields(event_id: i64, event_title: String, form: Option<Form>) -> Element {
    let api = use_api();
    let query = use_query_client();
    let mut snackbar = use_snackbar();
    let form_id = form.as_ref().map(|f| f.id.clone());
    let mut fields = use_draft(form.as_ref().map(|f| f.fields.clone()).unwrap_or_default());
    let mut problems = use_signal(Vec::<String>::new);
    let mut saving = use_signal(|| false);
    let mut confirm_delete = use_signal(|| false);
    let mut template_title = use_signal(String::new);
    let has_form = form.is_some();
    let templates_title = event_title.clone();

    let save = move |_: MouseEvent| {
        let current = fields();
        let found = validate_fields(&current);
        if !found.is_empty() {
            problems.set(found);
            return;
        }
        problems.set(Vec::new());
        let form_id = form_id.clone();
        let event_title = event_title.clone();
        spawn(async move {
            saving.set(true);
            let client = api.client();
            let result = match form_id.as_deref() {
                Some(id) => {
                    let update = FormUpdate {
                        title: None,
                        fields: current,
                        resource_type: FormResourceType::EventForm,
                    };
                    client.update_form(id, &update).await.map(|saved| {
                        query.set(forms::keys::detail(id), &saved);
                        query.apply(&forms::invalidates_after_form_update(id));
                    })
                }
                None => client
                    .create_form(&survey_create(event_id, &event_title, current))
                    .await
                    .map(|saved| query.apply(&forms::invalidates_after_form_create(&saved))),
            };
            match result {
                Ok(()) => show_snackbar(&mut snackbar, Severity::Success, "Skjemaet ble lagret"),
                Err(e) => {
                    report_error(&mut snackbar, &e);
                }
            }
            saving.set(false);
        });
    };

    let delete = move |_: MouseEvent| {
        let Some(existing) = form.clone() else {
            return;
        };
        if !confirm_delete() {
            confirm_delete.set(true);
            return;
        }
        spawn(async move {
            match api.client().delete_form(&existing.id).await {
                Ok(_) => {
                    query.apply(&forms::invalidates_after_form_delete(&existing));
                    show_snackbar(&mut snackbar, Severity::Info, "Skjemaet ble slettet");
                }
                Err(e) => {
                    report_error(&mut snackbar, &e);
                }
            }
            confirm_delete.set(false);
        });
    };

    let save_template = move |_: MouseEvent| {
        let current = fields();
        if template_title().trim().is_empty() {
            problems.set(vec!["Gi malen et navn".to_string()]);
            return;
        }
        let found = validate_fields(&current);
        if !found.is_empty() {
            problems.set(found);
            return;
        }
        problems.set(Vec::new());
        let body = template_create(&template_title(), current);
        spawn(async move {
            saving.set(true);
            match api.client().create_form(&body).await {
                Ok(saved) => {
                    query.apply(&forms::invalidates_after_form_create(&saved));
                    show_snackbar(&mut snackbar, Severity::Success, "Malen ble lagret");
                    template_title.set(String::new());
                }
                Err(e) => {
                    report_error(&mut snackbar, &e);
                }
            }
            saving.set(false);
        });
    };

    rsx! {
        div {
            class: "flex flex-col gap-3 p-4",
            if !has_form {
                SurveyTemplates { event_id, event_title: templates_title }
            }
            FormFieldsEditor {
                fields: fields(),
                disabled: saving(),
                on_change: move |next| fields.set(next),
            }
            for problem in problems() {
                div { class: "text-sm text-red-600", "{problem}" }
            }
            div {
                class: "flex flex-wrap gap-2",
                Button { onclick: save, disabled: saving(), "Lagre skjema" }
                if has_form {
                    Button {
                        variant: ButtonVariant::Destructive,
                        onclick: delete,
                        if confirm_delete() { "Bekreft sletting" } else { "Slett skjema" }
                    }
                }
            }
            div {
                class: "flex items-center gap-2",
                Input {
                    class: "flex-1",
                    placeholder: "Navn på mal",
                    value: template_title(),
                    oninput: move |e: FormEvent| template_title.set(e.value()),
                }
                Button { variant: ButtonVariant::Outline, onclick: save_template, disabled: saving(), "Lagre som mal" }
            }
        }
    }
}

/// Saved templates an event without a survey can start from.
#[component]
fn SurveyTemplates(event_id: i64, event_title: String) -> Element {
    let api = use_api();
    let templates = use_query(forms::keys::templates, move || {
        let client = api.client();
        async move { client.get_form_templates().await }
    });

    let templates = match &*templates.read() {
        Some(Ok(list)) => list.clone(),
        Some(Err(error)) => return rsx! { ErrorMessage { error: error.clone() } },
        None => return rsx! { Loading {} },
    };
    if templates.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "flex flex-col gap-2",
            h3 { class: "m-0 text-base font-semibold", "Start fra en mal" }
            for template in templates {
                SurveyTemplate { key: "{template.id}", event_id, event_title: event_title.clone(), template }
            }
        }
    }
}

#[component]
fn SurveyTemplate(event_id: i64, event_title: String, template: Form) -> Element {
    let api = use_api();
    let query = use_query_client();
    let mut snackbar = use_snackbar();
    let mut busy = use_signal(|| false);
    let mut confirm_delete = use_signal(|| false);

    let body = survey_create(event_id, &event_title, fields_from_template(&template));
    let use_template = move |_: MouseEvent| {
        let body = body.clone();
        spawn(async move {
            busy.set(true);
            match api.client().create_form(&body).await {
                Ok(saved) => {
                    query.apply(&forms::invalidates_after_form_create(&saved));
                    show_snackbar(&mut snackbar, Severity::Success, "Skjemaet ble opprettet fra malen");
                }
                Err(e) => {
                    report_error(&mut snackbar, &e);
                }
            }
            busy.set(false);
        });
    };

    let removed = template.clone();
    let delete = move |_: MouseEvent| {
        if !confirm_delete() {
            confirm_delete.set(true);
            return;
        }
        let removed = removed.clone();
        spawn(async move {
            match api.client().delete_form(&removed.id).await {
                Ok(_) => {
                    query.apply(&forms::invalidates_after_form_delete(&removed));
                    show_snackbar(&mut snackbar, Severity::Info, "Malen ble slettet");
                }
                Err(e) => {
                    report_error(&mut snackbar, &e);
                }
            }
            confirm_delete.set(false);
        });
    };

    rsx! {
        div {
            class: "flex items-center gap-2 rounded border border-neutral-200 px-3 py-2",
            span { class: "flex-1 text-sm", "{template.title} ({template.fields.len()} spørsmål)" }
            Button { variant: ButtonVariant::Outline, disabled: busy(), onclick: use_template, "Bruk malen" }
            Button {
                variant: ButtonVariant::Destructive,
                disabled: busy(),
                onclick: delete,
                if confirm_delete() { "Bekreft" } else { "Slett malen" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> EventDraft {
        EventDraft {
            title: "Bedpres".to_string(),
            start_date: "2026-10-01T17:00".to_string(),
            end_date: "2026-10-01T20:00".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_minimal_draft_builds_request() {
        let body = draft().to_mutate().unwrap();
        assert_eq!(body.title, "Bedpres");
        assert_eq!(body.limit, 0);
        assert!(body.image.is_none());
        assert!(body.organizer.is_none());
    }

    #[test]
    fn test_draft_rejects_bad_dates() {
        let mut d = draft();
        d.end_date = "2026-10-01T16:00".to_string();
        assert!(d.to_mutate().is_err());

        let mut d = draft();
        d.start_date = "i morgen".to_string();
        assert_eq!(d.to_mutate().unwrap_err(), "Ugyldig startdato");
    }

    #[test]
    fn test_sign_up_needs_registration_window() {
        let mut d = draft();
        d.sign_up = true;
        assert!(d.to_mutate().is_err());

        d.start_registration_at = "2026-09-01T12:00".to_string();
        d.end_registration_at = "2026-09-20T12:00".to_string();
        d.limit = "40".to_string();
        let body = d.to_mutate().unwrap();
        assert_eq!(body.limit, 40);
        assert!(body.sign_up);

        d.limit = "mange".to_string();
        assert!(d.to_mutate().is_err());
    }

    #[test]
    fn test_draft_from_event_roundtrips() {
        let body = draft().to_mutate().unwrap();
        let event = Event {
            id: 1,
            title: body.title.clone(),
            start_date: body.start_date,
            end_date: body.end_date,
            ..Default::default()
        };
        let again = EventDraft::from_event(&event);
        assert_eq!(again.start_date, "2026-10-01T17:00");
        assert_eq!(again.to_mutate().unwrap().start_date, body.start_date);
    }

    #[test]
    fn test_template_copy_drops_field_ids() {
        use api::models::{FormFieldOption, FormFieldType};

        let mut field = FormField::new(FormFieldType::SingleSelect);
        field.uuid = Some("f1".to_string());
        field.title = "Matpreferanse".to_string();
        field.options = vec![FormFieldOption {
            uuid: Some("o1".to_string()),
            title: "Vegetar".to_string(),
        }];
        let template = Form {
            id: "t".to_string(),
            title: "Bedpres-mal".to_string(),
            fields: vec![field],
            template: true,
            ..Default::default()
        };

        let body = survey_create(9, "Bedpres", fields_from_template(&template));
        assert_eq!(body.event, Some(9));
        assert!(!body.template);
        assert_eq!(body.fields[0].uuid, None);
        assert_eq!(body.fields[0].options[0].uuid, None);
        assert_eq!(body.fields[0].options[0].title, "Vegetar");
    }

    #[test]
    fn test_template_create_is_not_tied_to_event() {
        let body = template_create("  Standard  ", Vec::new());
        assert_eq!(body.title, "Standard");
        assert!(body.template);
        assert_eq!(body.event, None);
        assert_eq!(body.event_form_type, None);
    }
}
