//! Controlled editor for a form's question list.
//!
//! The component holds no state of its own: every change is expressed as a
//! [`FieldsEdit`], applied to a copy of the fields and reported through
//! `on_change`.

use api::models::{FormField, FormFieldOption, FormFieldType};
use dioxus::prelude::*;

use super::{Button, ButtonVariant, Input, Paper};
use crate::icons::{FaArrowDown, FaArrowUp, FaTrashCan};
use crate::Icon;

#[derive(Clone, Debug, PartialEq)]
pub enum FieldsEdit {
    AddField(FormFieldType),
    RemoveField(usize),
    MoveField { from: usize, to: usize },
    SetTitle(usize, String),
    SetRequired(usize, bool),
    SetType(usize, FormFieldType),
    AddOption(usize),
    RemoveOption(usize, usize),
    SetOption(usize, usize, String),
}

impl FieldsEdit {
    /// Apply to `fields`. Out-of-range indices leave the list untouched.
    pub fn apply(self, fields: &mut Vec<FormField>) {
        match self {
            FieldsEdit::AddField(field_type) => fields.push(FormField::new(field_type)),
            FieldsEdit::RemoveField(i) => {
                if i < fields.len() {
                    fields.remove(i);
                }
            }
            FieldsEdit::MoveField { from, to } => {
                if from < fields.len() && to < fields.len() && from != to {
                    let field = fields.remove(from);
                    fields.insert(to, field);
                }
            }
            FieldsEdit::SetTitle(i, title) => {
                if let Some(field) = fields.get_mut(i) {
                    field.title = title;
                }
            }
            FieldsEdit::SetRequired(i, required) => {
                if let Some(field) = fields.get_mut(i) {
                    field.required = required;
                }
            }
            FieldsEdit::SetType(i, field_type) => {
                if let Some(field) = fields.get_mut(i) {
                    field.field_type = field_type;
                    match field_type {
                        FormFieldType::TextAnswer => field.options.clear(),
                        _ if field.options.is_empty() => field.options.push(FormFieldOption::default()),
                        _ => {}
                    }
                }
            }
            FieldsEdit::AddOption(i) => {
                if let Some(field) = fields.get_mut(i) {
                    if field.field_type != FormFieldType::TextAnswer {
                        field.options.push(FormFieldOption::default());
                    }
                }
            }
            FieldsEdit::RemoveOption(i, o) => {
                if let Some(field) = fields.get_mut(i) {
                    if o < field.options.len() {
                        field.options.remove(o);
                    }
                }
            }
            FieldsEdit::SetOption(i, o, title) => {
                if let Some(option) = fields.get_mut(i).and_then(|f| f.options.get_mut(o)) {
                    option.title = title;
                }
            }
        }
    }
}

/// Problems that block saving, in field order.
pub fn validate_fields(fields: &[FormField]) -> Vec<String> {
    let mut problems = Vec::new();
    for (i, field) in fields.iter().enumerate() {
        let n = i + 1;
        if field.title.trim().is_empty() {
            problems.push(format!("Spørsmål {n} mangler tittel"));
        }
        if field.field_type != FormFieldType::TextAnswer {
            if field.options.is_empty() {
                problems.push(format!("Spørsmål {n} må ha minst ett alternativ"));
            } else if field.options.iter().any(|o| o.title.trim().is_empty()) {
                problems.push(format!("Spørsmål {n} har et tomt alternativ"));
            }
        }
    }
    problems
}

const FIELD_TYPES: [FormFieldType; 3] = [
    FormFieldType::TextAnswer,
    FormFieldType::SingleSelect,
    FormFieldType::MultipleSelect,
];

fn type_value(field_type: FormFieldType) -> &'static str {
    match field_type {
        FormFieldType::TextAnswer => "TEXT_ANSWER",
        FormFieldType::SingleSelect => "SINGLE_SELECT",
        FormFieldType::MultipleSelect => "MULTIPLE_SELECT",
    }
}

fn parse_type(value: &str) -> FormFieldType {
    FIELD_TYPES
        .into_iter()
        .find(|t| type_value(*t) == value)
        .unwrap_or_default()
}

/// Edit a form's fields. Set `disabled` once the form has answers; the
/// question list is then read-only.
#[component]
pub fn FormFieldsEditor(
    fields: Vec<FormField>,
    #[props(default)] disabled: bool,
    on_change: EventHandler<Vec<FormField>>,
) -> Element {
    let count = fields.len();
    let current = fields.clone();
    let edit = move |change: FieldsEdit| {
        let mut next = current.clone();
        change.apply(&mut next);
        on_change.call(next);
    };

    rsx! {
        div {
            class: "flex flex-col gap-3",
            if disabled {
                div {
                    class: "px-3 py-2 bg-amber-50 border border-amber-200 rounded text-amber-800 text-sm",
                    "Skjemaet har svar og kan ikke endres."
                }
            }
            for (i, field) in fields.into_iter().enumerate() {
                Paper {
                    key: "{i}",
                    class: "flex flex-col gap-2",
                    div {
                        class: "flex items-center gap-2",
                        Input {
                            class: "flex-1",
                            placeholder: "Spørsmål",
                            value: field.title.clone(),
                            disabled,
                            oninput: {
                                let edit = edit.clone();
                                move |evt: FormEvent| edit(FieldsEdit::SetTitle(i, evt.value()))
                            },
                        }
                        select {
                            class: "border border-neutral-300 rounded px-2 py-2 text-sm",
                            disabled,
                            value: type_value(field.field_type),
                            onchange: {
                                let edit = edit.clone();
                                move |evt: FormEvent| edit(FieldsEdit::SetType(i, parse_type(&evt.value())))
                            },
                            for t in FIELD_TYPES {
                                option { value: type_value(t), {t.label()} }
                            }
                        }
                    }
                    if field.field_type != FormFieldType::TextAnswer {
                        for (o, option) in field.options.iter().enumerate() {
                            div {
                                key: "{i}-{o}",
                                class: "flex items-center gap-2 pl-4",
                                Input {
                                    class: "flex-1",
                                    placeholder: format!("Alternativ {}", o + 1),
                                    value: option.title.clone(),
                                    disabled,
                                    oninput: {
                                        let edit = edit.clone();
                                        move |evt: FormEvent| edit(FieldsEdit::SetOption(i, o, evt.value()))
                                    },
                                }
                                Button {
                                    variant: ButtonVariant::Ghost,
                                    disabled,
                                    onclick: {
                                        let edit = edit.clone();
                                        move |_| edit(FieldsEdit::RemoveOption(i, o))
                                    },
                                    Icon { icon: FaTrashCan, width: 12, height: 12 }
                                }
                            }
                        }
                        Button {
                            variant: ButtonVariant::Ghost,
                            class: "self-start",
                            disabled,
                            onclick: {
                                let edit = edit.clone();
                                move |_| edit(FieldsEdit::AddOption(i))
                            },
                            "Legg til alternativ"
                        }
                    }
                    div {
                        class: "flex items-center gap-2",
                        label {
                            class: "flex items-center gap-1 text-sm text-neutral-700",
                            input {
                                r#type: "checkbox",
                                checked: field.required,
                                disabled,
                                onchange: {
                                    let edit = edit.clone();
                                    move |evt: FormEvent| edit(FieldsEdit::SetRequired(i, evt.checked()))
                                },
                            }
                            "Påkrevd"
                        }
                        div { class: "flex-1" }
                        Button {
                            variant: ButtonVariant::Ghost,
                            disabled: disabled || i == 0,
                            onclick: {
                                let edit = edit.clone();
                                move |_| edit(FieldsEdit::MoveField { from: i, to: i.saturating_sub(1) })
                            },
                            Icon { icon: FaArrowUp, width: 12, height: 12 }
                        }
                        Button {
                            variant: ButtonVariant::Ghost,
                            disabled: disabled || i + 1 == count,
                            onclick: {
                                let edit = edit.clone();
                                move |_| edit(FieldsEdit::MoveField { from: i, to: i + 1 })
                            },
                            Icon { icon: FaArrowDown, width: 12, height: 12 }
                        }
                        Button {
                            variant: ButtonVariant::Destructive,
                            disabled,
                            onclick: {
                                let edit = edit.clone();
                                move |_| edit(FieldsEdit::RemoveField(i))
                            },
                            "Slett"
                        }
                    }
                }
            }
            div {
                class: "flex flex-wrap gap-2",
                for t in FIELD_TYPES {
                    Button {
                        variant: ButtonVariant::Outline,
                        disabled,
                        onclick: {
                            let edit = edit.clone();
                            move |_| edit(FieldsEdit::AddField(t))
                        },
                        "+ "
                        {t.label()}
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(title: &str, field_type: FormFieldType) -> FormField {
        FormField {
            title: title.to_string(),
            ..FormField::new(field_type)
        }
    }

    #[test]
    fn test_add_and_remove_fields() {
        let mut fields = Vec::new();
        FieldsEdit::AddField(FormFieldType::TextAnswer).apply(&mut fields);
        FieldsEdit::AddField(FormFieldType::SingleSelect).apply(&mut fields);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].options.len(), 1);

        FieldsEdit::RemoveField(0).apply(&mut fields);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field_type, FormFieldType::SingleSelect);

        FieldsEdit::RemoveField(5).apply(&mut fields);
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_move_field() {
        let mut fields = vec![
            titled("a", FormFieldType::TextAnswer),
            titled("b", FormFieldType::TextAnswer),
            titled("c", FormFieldType::TextAnswer),
        ];
        FieldsEdit::MoveField { from: 2, to: 0 }.apply(&mut fields);
        let titles: Vec<_> = fields.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, ["c", "a", "b"]);

        FieldsEdit::MoveField { from: 0, to: 3 }.apply(&mut fields);
        let titles: Vec<_> = fields.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, ["c", "a", "b"]);
    }

    #[test]
    fn test_options_follow_field_type() {
        let mut fields = vec![titled("Mat", FormFieldType::TextAnswer)];
        FieldsEdit::AddOption(0).apply(&mut fields);
        assert!(fields[0].options.is_empty());

        FieldsEdit::SetType(0, FormFieldType::MultipleSelect).apply(&mut fields);
        assert_eq!(fields[0].options.len(), 1);
        FieldsEdit::AddOption(0).apply(&mut fields);
        FieldsEdit::SetOption(0, 1, "Vegetar".to_string()).apply(&mut fields);
        assert_eq!(fields[0].options[1].title, "Vegetar");

        FieldsEdit::RemoveOption(0, 0).apply(&mut fields);
        assert_eq!(fields[0].options.len(), 1);
        assert_eq!(fields[0].options[0].title, "Vegetar");

        FieldsEdit::SetType(0, FormFieldType::TextAnswer).apply(&mut fields);
        assert!(fields[0].options.is_empty());
    }

    #[test]
    fn test_validate_fields() {
        let mut select = titled("Mat", FormFieldType::SingleSelect);
        let fields = vec![titled("", FormFieldType::TextAnswer), select.clone()];
        let problems = validate_fields(&fields);
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("Spørsmål 1"));
        assert!(problems[1].contains("tomt alternativ"));

        select.options[0].title = "Pizza".to_string();
        assert!(validate_fields(&[select]).is_empty());
    }

    #[test]
    fn test_type_select_values() {
        for t in FIELD_TYPES {
            assert_eq!(parse_type(type_value(t)), t);
        }
        assert_eq!(parse_type("bogus"), FormFieldType::TextAnswer);
    }
}
