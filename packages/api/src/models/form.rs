//! # Form models
//!
//! Forms are question lists used for event surveys, event evaluations,
//! group applications and stand-alone surveys. A [`Form`] has ordered
//! [`FormField`]s; select fields carry [`FormFieldOption`]s. Answers are
//! sent as a [`Submission`] referencing fields and options by `uuid`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::user::UserBase;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormFieldType {
    #[default]
    TextAnswer,
    SingleSelect,
    MultipleSelect,
}

impl FormFieldType {
    pub fn label(&self) -> &'static str {
        match self {
            FormFieldType::TextAnswer => "Tekstspørsmål",
            FormFieldType::SingleSelect => "Flervalgsspørsmål",
            FormFieldType::MultipleSelect => "Avkrysningsspørsmål",
        }
    }
}

/// The resource a form is attached to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormResourceType {
    #[default]
    Form,
    EventForm,
    GroupForm,
}

/// Role of an event form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventFormType {
    Survey,
    Evaluation,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FormFieldOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    pub title: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    /// `None` until the server has stored the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    pub title: String,
    #[serde(default)]
    pub required: bool,
    #[serde(rename = "type")]
    pub field_type: FormFieldType,
    #[serde(default)]
    pub options: Vec<FormFieldOption>,
}

impl FormField {
    /// A blank field of `field_type`. Select fields start with one empty option.
    pub fn new(field_type: FormFieldType) -> Self {
        let options = match field_type {
            FormFieldType::TextAnswer => Vec::new(),
            _ => vec![FormFieldOption::default()],
        };
        Self {
            uuid: None,
            title: String::new(),
            required: false,
            field_type,
            options,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Form {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub fields: Vec<FormField>,
    #[serde(default)]
    pub template: bool,
    #[serde(default)]
    pub resource_type: FormResourceType,
    #[serde(default, rename = "type")]
    pub event_form_type: Option<EventFormType>,
    #[serde(default)]
    pub event: Option<i64>,
    #[serde(default)]
    pub viewer_has_answered: bool,
}

/// Create payload for `forms/`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FormCreate {
    pub title: String,
    pub fields: Vec<FormField>,
    pub template: bool,
    pub resource_type: FormResourceType,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_form_type: Option<EventFormType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<i64>,
}

/// Update payload for `forms/{id}/`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FormUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub fields: Vec<FormField>,
    pub resource_type: FormResourceType,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionStatistics {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub answer_amount: u32,
    #[serde(default)]
    pub answer_percentage: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldStatistics {
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "type")]
    pub field_type: FormFieldType,
    #[serde(default)]
    pub statistics: Vec<OptionStatistics>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FormStatistics {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub statistics: Vec<FieldStatistics>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRef {
    pub uuid: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub field: FieldRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selected_options: Vec<FieldRef>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub answers: Vec<Answer>,
}

/// A submission together with who sent it, as listed for form admins.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSubmission {
    pub user: UserBase,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

/// Answers being filled in, keyed by field `uuid`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnswerDraft {
    text: BTreeMap<String, String>,
    selected: BTreeMap<String, Vec<String>>,
}

impl AnswerDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, field: &str, text: impl Into<String>) {
        self.text.insert(field.to_string(), text.into());
    }

    pub fn text(&self, field: &str) -> &str {
        self.text.get(field).map(String::as_str).unwrap_or_default()
    }

    /// Select `option` on a field. Single-select fields keep one option.
    pub fn toggle_option(&mut self, field: &FormField, option: &str) {
        let Some(uuid) = field.uuid.as_deref() else {
            return;
        };
        let selected = self.selected.entry(uuid.to_string()).or_default();
        match field.field_type {
            FormFieldType::SingleSelect => {
                selected.clear();
                selected.push(option.to_string());
            }
            _ => {
                if let Some(pos) = selected.iter().position(|o| o == option) {
                    selected.remove(pos);
                } else {
                    selected.push(option.to_string());
                }
            }
        }
    }

    pub fn is_selected(&self, field: &str, option: &str) -> bool {
        self.selected
            .get(field)
            .is_some_and(|s| s.iter().any(|o| o == option))
    }

    fn is_answered(&self, field: &FormField) -> bool {
        let Some(uuid) = field.uuid.as_deref() else {
            return false;
        };
        match field.field_type {
            FormFieldType::TextAnswer => !self.text(uuid).trim().is_empty(),
            _ => self.selected.get(uuid).is_some_and(|s| !s.is_empty()),
        }
    }

    /// Titles of required fields that have no answer.
    pub fn missing_required<'a>(&self, form: &'a Form) -> Vec<&'a str> {
        form.fields
            .iter()
            .filter(|f| f.required && !self.is_answered(f))
            .map(|f| f.title.as_str())
            .collect()
    }

    /// Build the submission, or return the titles of unanswered required fields.
    pub fn to_submission(&self, form: &Form) -> Result<Submission, Vec<String>> {
        let missing = self.missing_required(form);
        if !missing.is_empty() {
            return Err(missing.into_iter().map(str::to_string).collect());
        }
        let answers = form
            .fields
            .iter()
            .filter(|f| self.is_answered(f))
            .filter_map(|f| {
                let uuid = f.uuid.clone()?;
                let answer = match f.field_type {
                    FormFieldType::TextAnswer => Answer {
                        answer_text: Some(self.text(&uuid).to_string()),
                        field: FieldRef { uuid },
                        selected_options: Vec::new(),
                    },
                    _ => Answer {
                        selected_options: self
                            .selected
                            .get(&uuid)
                            .map(|s| s.iter().map(|o| FieldRef { uuid: o.clone() }).collect())
                            .unwrap_or_default(),
                        field: FieldRef { uuid },
                        answer_text: None,
                    },
                };
                Some(answer)
            })
            .collect();
        Ok(Submission { answers })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> Form {
        serde_json::from_str(
            r#"{
                "id": "f1",
                "title": "Påmelding",
                "resource_type": "EventForm",
                "type": "SURVEY",
                "fields": [
                    {"uuid": "a", "title": "Allergier", "required": true, "type": "TEXT_ANSWER", "options": []},
                    {"uuid": "b", "title": "Mat", "required": true, "type": "SINGLE_SELECT",
                     "options": [{"uuid": "b1", "title": "Kjøtt"}, {"uuid": "b2", "title": "Vegetar"}]},
                    {"uuid": "c", "title": "Aktiviteter", "required": false, "type": "MULTIPLE_SELECT",
                     "options": [{"uuid": "c1", "title": "Quiz"}, {"uuid": "c2", "title": "Dans"}]}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_parses_event_form() {
        let form = form();
        assert_eq!(form.resource_type, FormResourceType::EventForm);
        assert_eq!(form.event_form_type, Some(EventFormType::Survey));
        assert_eq!(form.fields[1].options.len(), 2);
    }

    #[test]
    fn test_new_fields() {
        assert!(FormField::new(FormFieldType::TextAnswer).options.is_empty());
        assert_eq!(FormField::new(FormFieldType::MultipleSelect).options.len(), 1);
        let json = serde_json::to_string(&FormField::new(FormFieldType::TextAnswer)).unwrap();
        assert_eq!(json, r#"{"title":"","required":false,"type":"TEXT_ANSWER","options":[]}"#);
    }

    #[test]
    fn test_required_fields_are_enforced() {
        let form = form();
        let mut draft = AnswerDraft::new();
        assert_eq!(draft.missing_required(&form), vec!["Allergier", "Mat"]);

        draft.set_text("a", "   ");
        draft.toggle_option(&form.fields[1], "b1");
        assert_eq!(draft.to_submission(&form), Err(vec!["Allergier".to_string()]));
    }

    #[test]
    fn test_single_select_replaces_and_multi_toggles() {
        let form = form();
        let mut draft = AnswerDraft::new();
        draft.toggle_option(&form.fields[1], "b1");
        draft.toggle_option(&form.fields[1], "b2");
        assert!(!draft.is_selected("b", "b1"));
        assert!(draft.is_selected("b", "b2"));

        draft.toggle_option(&form.fields[2], "c1");
        draft.toggle_option(&form.fields[2], "c2");
        draft.toggle_option(&form.fields[2], "c1");
        assert!(!draft.is_selected("c", "c1"));
        assert!(draft.is_selected("c", "c2"));
    }

    #[test]
    fn test_submission_shape() {
        let form = form();
        let mut draft = AnswerDraft::new();
        draft.set_text("a", "Gluten");
        draft.toggle_option(&form.fields[1], "b2");

        let submission = draft.to_submission(&form).unwrap();
        assert_eq!(submission.answers.len(), 2);
        assert_eq!(
            serde_json::to_value(&submission).unwrap(),
            serde_json::json!({"answers": [
                {"field": {"uuid": "a"}, "answer_text": "Gluten"},
                {"field": {"uuid": "b"}, "selected_options": [{"uuid": "b2"}]}
            ]})
        );
    }
}
