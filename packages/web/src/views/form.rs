use api::models::Submission;
use api::resources::forms;
use dioxus::prelude::*;
use ui::components::{FormAnswer, Paper};
use ui::{report_error, show_snackbar, use_api, use_query, use_query_client, use_snackbar, Severity};

use super::{use_prop_signal, ErrorMessage, Guard, Loading};

#[component]
pub fn FormPage(id: String) -> Element {
    rsx! {
        Guard {
            FormContent { id }
        }
    }
}

#[component]
fn FormContent(id: String) -> Element {
    let form_id = use_prop_signal(id);
    let api = use_api();
    let query = use_query_client();
    let mut snackbar = use_snackbar();
    let mut sending = use_signal(|| false);
    let mut inline_error = use_signal(|| Option::<String>::None);

    let form = use_query(
        move || forms::keys::detail(&form_id()),
        move || {
            let id = form_id();
            let client = api.client();
            async move { client.get_form(&id).await }
        },
    );

    let submit = move |submission: Submission| {
        let id = form_id();
        spawn(async move {
            sending.set(true);
            match api.client().create_submission(&id, &submission).await {
                Ok(_) => {
                    query.apply(&forms::invalidates_after_submission(&id));
                    show_snackbar(&mut snackbar, Severity::Success, "Svaret ditt er registrert");
                    inline_error.set(None);
                }
                Err(e) => inline_error.set(report_error(&mut snackbar, &e)),
            }
            sending.set(false);
        });
    };

    let form = match &*form.read() {
        None => return rsx! { Loading {} },
        Some(Err(error)) => return rsx! { ErrorMessage { error: error.clone() } },
        Some(Ok(form)) => form.clone(),
    };

    rsx! {
        Paper {
            class: "mx-auto max-w-2xl",
            h1 { class: "page-title", "{form.title}" }
            if form.viewer_has_answered {
                p { class: "text-sm text-neutral-600", "Du har allerede svart på dette skjemaet. Takk!" }
            } else {
                FormAnswer { form: form.clone(), disabled: sending(), on_submit: submit }
            }
            if let Some(err) = inline_error() {
                div { class: "error-box mt-3", "{err}" }
            }
        }
    }
}
