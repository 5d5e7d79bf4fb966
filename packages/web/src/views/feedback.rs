use api::models::{FeedbackCreate, FeedbackStatus, FeedbackType};
use api::resources::feedback;
use dioxus::prelude::*;
use store::Filters;
use ui::components::{Button, Input, Label, LoadMore, Paper, Textarea};
use ui::{
    report_error, show_snackbar, use_api, use_paginated, use_query_client, use_snackbar, Severity,
};

use super::{format_date, ErrorMessage, Guard, Loading};

fn status_label(status: FeedbackStatus) -> &'static str {
    match status {
        FeedbackStatus::Open => "Åpen",
        FeedbackStatus::InProgress => "Under arbeid",
        FeedbackStatus::Closed => "Løst",
        FeedbackStatus::Rejected => "Avvist",
    }
}

#[component]
pub fn FeedbackPage() -> Element {
    rsx! {
        Guard {
            h1 { class: "page-title", "Tilbakemelding" }
            div {
                class: "grid gap-4 md:grid-cols-[1fr_2fr]",
                NewFeedback {}
                FeedbackList {}
            }
        }
    }
}

#[component]
fn NewFeedback() -> Element {
    let api = use_api();
    let query = use_query_client();
    let mut snackbar = use_snackbar();
    let mut draft = use_signal(FeedbackCreate::default);
    let mut saving = use_signal(|| false);
    let mut inline_error = use_signal(|| Option::<String>::None);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let payload = draft();
        if let Err(message) = payload.validate() {
            inline_error.set(Some(message.to_string()));
            return;
        }
        spawn(async move {
            saving.set(true);
            match api.client().create_feedback(&payload).await {
                Ok(_) => {
                    query.apply(&feedback::invalidates_after_feedback_change());
                    show_snackbar(&mut snackbar, Severity::Success, "Takk for tilbakemeldingen!");
                    draft.set(FeedbackCreate::default());
                    inline_error.set(None);
                }
                Err(e) => inline_error.set(report_error(&mut snackbar, &e)),
            }
            saving.set(false);
        });
    };

    let current = draft();

    rsx! {
        Paper {
            form {
                class: "flex flex-col gap-3",
                onsubmit: handle_submit,
                div {
                    class: "flex gap-2",
                    for kind in [FeedbackType::Idea, FeedbackType::Bug] {
                        label {
                            class: "flex items-center gap-1 text-sm",
                            input {
                                r#type: "radio",
                                name: "feedback-type",
                                checked: current.feedback_type == kind,
                                onchange: move |_| draft.with_mut(|d| d.feedback_type = kind),
                            }
                            {kind.label()}
                        }
                    }
                }
                div {
                    class: "flex flex-col gap-1.5",
                    Label { html_for: "feedback-title", "Tittel" }
                    Input {
                        id: "feedback-title",
                        value: current.title.clone(),
                        oninput: move |evt: FormEvent| draft.with_mut(|d| d.title = evt.value()),
                    }
                }
                div {
                    class: "flex flex-col gap-1.5",
                    Label { html_for: "feedback-description", "Beskrivelse" }
                    Textarea {
                        id: "feedback-description",
                        rows: 6,
                        value: current.description.clone(),
                        oninput: move |evt: FormEvent| draft.with_mut(|d| d.description = evt.value()),
                    }
                }
                if let Some(err) = inline_error() {
                    div { class: "error-box", "{err}" }
                }
                Button { r#type: "submit", disabled: saving(), "Send inn" }
            }
        }
    }
}

#[component]
fn FeedbackList() -> Element {
    let api = use_api();
    let list = use_paginated(
        || feedback::keys::list(&Filters::new()),
        move |page| {
            let client = api.client();
            async move { client.get_feedbacks(&Filters::new().page(page)).await }
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
            empty_text: "Ingen tilbakemeldinger ennå",
            on_load_more: move |_| list.load_more(),
            div {
                class: "flex flex-col gap-2",
                for item in list.items() {
                    Paper {
                        key: "{item.id}",
                        class: "flex flex-col gap-1",
                        div {
                            class: "flex items-center justify-between gap-2",
                            strong { class: "text-sm", "{item.title}" }
                            span {
                                class: "rounded-full bg-neutral-100 px-2 py-0.5 text-xs",
                                {item.feedback_type.label()}
                                " · "
                                {status_label(item.status)}
                            }
                        }
                        p { class: "m-0 text-sm text-neutral-700 whitespace-pre-wrap", "{item.description}" }
                        span {
                            class: "text-xs text-neutral-400",
                            {item.created_at.as_ref().map(format_date).unwrap_or_default()}
                        }
                    }
                }
            }
        }
    }
}
