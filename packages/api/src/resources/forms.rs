//! # Forms and submissions
//!
//! `forms/` holds templates and stand-alone surveys; event and group forms
//! are the same resource with another `resource_type`. Once a form has
//! submissions its fields are locked by the server.

use store::{Filters, Invalidation, PaginationResponse};

use crate::client::ApiClient;
use crate::error::{ApiError, RequestResponse};
use crate::models::{Form, FormCreate, FormStatistics, FormUpdate, Submission, UserSubmission};
use crate::resources::{events, users};
use crate::transport::Transport;

pub const FORMS_ENDPOINT: &str = "forms";
pub const SUBMISSIONS_ENDPOINT: &str = "submissions";

pub mod keys {
    use store::{Filters, QueryKey};

    pub fn all() -> QueryKey {
        QueryKey::new("form")
    }

    pub fn templates() -> QueryKey {
        all().push_str("templates")
    }

    pub fn detail(form_id: &str) -> QueryKey {
        all().push_str(form_id)
    }

    pub fn statistics(form_id: &str) -> QueryKey {
        detail(form_id).push_str("statistics")
    }

    pub fn submissions(form_id: &str, filters: &Filters) -> QueryKey {
        detail(form_id).push_str("submissions").push_filters(filters)
    }
}

fn form_path(form_id: &str) -> String {
    format!("{FORMS_ENDPOINT}/{form_id}/")
}

impl<T: Transport> ApiClient<T> {
    pub async fn get_form(&self, form_id: &str) -> Result<Form, ApiError> {
        self.get(&form_path(form_id), &Filters::new()).await
    }

    pub async fn get_form_templates(&self) -> Result<Vec<Form>, ApiError> {
        self.get(&format!("{FORMS_ENDPOINT}/"), &Filters::new()).await
    }

    pub async fn get_form_statistics(&self, form_id: &str) -> Result<FormStatistics, ApiError> {
        self.get(&format!("{FORMS_ENDPOINT}/{form_id}/statistics/"), &Filters::new())
            .await
    }

    pub async fn create_form(&self, form: &FormCreate) -> Result<Form, ApiError> {
        self.post(&format!("{FORMS_ENDPOINT}/"), form).await
    }

    pub async fn update_form(&self, form_id: &str, form: &FormUpdate) -> Result<Form, ApiError> {
        self.put(&form_path(form_id), form).await
    }

    pub async fn delete_form(&self, form_id: &str) -> Result<RequestResponse, ApiError> {
        self.delete(&form_path(form_id)).await
    }

    pub async fn get_submissions(
        &self,
        form_id: &str,
        filters: &Filters,
    ) -> Result<PaginationResponse<UserSubmission>, ApiError> {
        self.get(&format!("{FORMS_ENDPOINT}/{form_id}/{SUBMISSIONS_ENDPOINT}/"), filters)
            .await
    }

    pub async fn create_submission(&self, form_id: &str, submission: &Submission) -> Result<Submission, ApiError> {
        self.post(
            &format!("{FORMS_ENDPOINT}/{form_id}/{SUBMISSIONS_ENDPOINT}/"),
            submission,
        )
        .await
    }
}

/// After creating an event survey or evaluation the owning event changes too.
pub fn invalidates_after_form_create(form: &Form) -> Invalidation {
    let changes = Invalidation::new().invalidate(keys::templates());
    match form.event {
        Some(event_id) => changes.invalidate(events::keys::detail(event_id)),
        None => changes,
    }
}

/// After updating a form. The caller seeds [`keys::detail`] with the answer.
pub fn invalidates_after_form_update(form_id: &str) -> Invalidation {
    Invalidation::new()
        .invalidate(keys::statistics(form_id))
        .invalidate(keys::templates())
}

pub fn invalidates_after_form_delete(form: &Form) -> Invalidation {
    invalidates_after_form_create(form).remove(keys::detail(&form.id))
}

pub fn invalidates_after_submission(form_id: &str) -> Invalidation {
    Invalidation::new()
        .invalidate(keys::detail(form_id))
        .invalidate(users::keys::forms(&Filters::new()))
        .invalidate(users::keys::me())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use store::{ApiConfig, QueryCache};

    #[tokio::test]
    async fn test_submission_path_and_lock_error() {
        let mock = MockTransport::new();
        mock.respond_json(400, r#"{"detail": "Du har allerede svart på dette skjemaet"}"#);
        let api = ApiClient::new(mock.clone(), ApiConfig::new("https://api.example.org/"));

        let err = api
            .create_submission("abc", &Submission::default())
            .await
            .unwrap_err();
        assert!(err.is_expected());
        assert_eq!(
            mock.last_request().unwrap().url,
            "https://api.example.org/forms/abc/submissions/"
        );
    }

    #[test]
    fn test_submission_invalidates_form_and_user_forms() {
        let cache = QueryCache::new();
        cache.set(keys::detail("abc"), &1);
        cache.set(keys::statistics("abc"), &1);
        cache.set(users::keys::forms(&Filters::new().with("unanswered", true)), &1);
        cache.apply(&invalidates_after_submission("abc"));
        assert!(!cache.is_fresh(&keys::statistics("abc")));
        assert!(!cache.is_fresh(&users::keys::forms(&Filters::new().with("unanswered", true))));
    }

    #[test]
    fn test_event_form_create_touches_event() {
        let form = Form {
            id: "f".to_string(),
            event: Some(3),
            ..Default::default()
        };
        let changes = invalidates_after_form_create(&form);
        assert!(changes.invalidate.contains(&events::keys::detail(3)));
        assert!(invalidates_after_form_delete(&form).remove.contains(&keys::detail("f")));
    }
}
