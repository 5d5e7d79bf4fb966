use api::models::{AnswerDraft, Form, FormField, FormFieldType, Submission};
use dioxus::prelude::*;

use super::{Button, ButtonVariant, Textarea};

fn missing_message(missing: &[String]) -> String {
    format!("Du må svare på: {}", missing.join(", "))
}

/// Answer sheet for a form. Required questions are checked before
/// `on_submit` is called.
#[component]
pub fn FormAnswer(
    form: Form,
    #[props(default)] disabled: bool,
    #[props(default = "Send inn svar".to_string())] submit_text: String,
    on_submit: EventHandler<Submission>,
) -> Element {
    let mut draft = use_signal(AnswerDraft::new);
    let mut error = use_signal(|| Option::<String>::None);

    let submit_form = form.clone();
    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        match draft.read().to_submission(&submit_form) {
            Ok(submission) => {
                error.set(None);
                on_submit.call(submission);
            }
            Err(missing) => error.set(Some(missing_message(&missing))),
        }
    };

    rsx! {
        form {
            class: "flex flex-col gap-4",
            onsubmit: handle_submit,
            for field in form.fields.iter().filter(|f| f.uuid.is_some()) {
                div {
                    key: "{field.title}",
                    class: "flex flex-col gap-1.5",
                    span {
                        class: "text-sm font-medium text-neutral-800",
                        "{field.title}"
                        if field.required {
                            span { class: "text-red-600", " *" }
                        }
                    }
                    FieldInput { field: field.clone(), draft, disabled }
                }
            }
            if let Some(err) = error() {
                div {
                    class: "px-2.5 py-2.5 bg-red-50 border border-red-200 rounded text-red-600 text-[0.8125rem]",
                    "{err}"
                }
            }
            Button {
                variant: ButtonVariant::Primary,
                r#type: "submit",
                disabled,
                "{submit_text}"
            }
        }
    }
}

#[component]
fn FieldInput(field: FormField, mut draft: Signal<AnswerDraft>, disabled: bool) -> Element {
    let uuid = field.uuid.clone().unwrap_or_default();

    if field.field_type == FormFieldType::TextAnswer {
        let value = draft.read().text(&uuid).to_string();
        return rsx! {
            Textarea {
                rows: 3,
                value,
                disabled,
                oninput: move |evt: FormEvent| draft.write().set_text(&uuid, evt.value()),
            }
        };
    }

    let input_type = if field.field_type == FormFieldType::SingleSelect {
        "radio"
    } else {
        "checkbox"
    };
    let options: Vec<(String, String)> = field
        .options
        .iter()
        .filter_map(|o| Some((o.uuid.clone()?, o.title.clone())))
        .collect();

    rsx! {
        for (option_uuid, title) in options {
            label {
                key: "{option_uuid}",
                class: "flex items-center gap-2 text-sm text-neutral-700",
                input {
                    r#type: input_type,
                    name: "{uuid}",
                    checked: draft.read().is_selected(&uuid, &option_uuid),
                    disabled,
                    onchange: {
                        let field = field.clone();
                        let option_uuid = option_uuid.clone();
                        move |_| draft.write().toggle_option(&field, &option_uuid)
                    },
                }
                "{title}"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_message_lists_titles() {
        let missing = vec!["Allergier".to_string(), "Mat".to_string()];
        assert_eq!(missing_message(&missing), "Du må svare på: Allergier, Mat");
    }
}
