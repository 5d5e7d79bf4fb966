//! Ideas and bug reports sent by members.

use store::{Filters, Invalidation, PaginationResponse};

use crate::client::ApiClient;
use crate::error::{ApiError, RequestResponse};
use crate::models::{Feedback, FeedbackCreate};
use crate::transport::Transport;

pub const FEEDBACK_ENDPOINT: &str = "feedbacks";

pub mod keys {
    use store::{Filters, QueryKey};

    pub fn all() -> QueryKey {
        QueryKey::new("feedbacks")
    }

    pub fn list(filters: &Filters) -> QueryKey {
        all().push_filters(filters)
    }
}

impl<T: Transport> ApiClient<T> {
    /// Filters: `status`, `feedback_type`.
    pub async fn get_feedbacks(&self, filters: &Filters) -> Result<PaginationResponse<Feedback>, ApiError> {
        self.get(&format!("{FEEDBACK_ENDPOINT}/"), filters).await
    }

    /// Validated before sending; an invalid payload never reaches the server.
    pub async fn create_feedback(&self, feedback: &FeedbackCreate) -> Result<Feedback, ApiError> {
        if let Err(message) = feedback.validate() {
            return Err(ApiError::Response {
                status: 400,
                detail: message.to_string(),
                fields: Default::default(),
            });
        }
        self.post(&format!("{FEEDBACK_ENDPOINT}/"), feedback).await
    }

    pub async fn delete_feedback(&self, id: i64) -> Result<RequestResponse, ApiError> {
        self.delete(&format!("{FEEDBACK_ENDPOINT}/{id}/")).await
    }
}

pub fn invalidates_after_feedback_change() -> Invalidation {
    Invalidation::new().invalidate(keys::all())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FeedbackType;
    use crate::transport::MockTransport;
    use store::ApiConfig;

    #[tokio::test]
    async fn test_invalid_feedback_is_not_sent() {
        let mock = MockTransport::new();
        let api = ApiClient::new(mock.clone(), ApiConfig::new("https://api.example.org/"));
        let err = api
            .create_feedback(&FeedbackCreate {
                title: "x".into(),
                description: "Knappen virker ikke".into(),
                feedback_type: FeedbackType::Bug,
            })
            .await
            .unwrap_err();
        assert_eq!(err.detail(), "Tittelen må være minst 2 tegn.");
        assert!(err.is_expected());
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_list_feedback_with_filters() {
        let mock = MockTransport::new();
        mock.respond_json(200, r#"{"count": 0, "next": null, "previous": null, "results": []}"#);
        let api = ApiClient::new(mock.clone(), ApiConfig::new("https://api.example.org/"));
        api.get_feedbacks(&Filters::new().with("status", "OPEN"))
            .await
            .unwrap();
        assert_eq!(
            mock.last_request().unwrap().url,
            "https://api.example.org/feedbacks/?status=OPEN"
        );
    }
}
