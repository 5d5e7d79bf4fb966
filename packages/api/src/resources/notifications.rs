//! Notifications for the signed-in user: `notifications/` and
//! `notifications/{id}/` (mark as read).

use store::{Filters, Invalidation, PaginationResponse};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Notification, NotificationMutate};
use crate::resources::users;
use crate::transport::Transport;

pub const NOTIFICATIONS_ENDPOINT: &str = "notifications";

pub mod keys {
    use store::{Filters, QueryKey};

    pub fn all() -> QueryKey {
        QueryKey::new("notifications")
    }

    pub fn list(filters: &Filters) -> QueryKey {
        all().push_filters(filters)
    }
}

impl<T: Transport> ApiClient<T> {
    pub async fn get_notifications(&self, filters: &Filters) -> Result<PaginationResponse<Notification>, ApiError> {
        self.get(&format!("{NOTIFICATIONS_ENDPOINT}/"), filters).await
    }

    pub async fn update_notification(&self, id: i64, read: bool) -> Result<Notification, ApiError> {
        self.put(
            &format!("{NOTIFICATIONS_ENDPOINT}/{id}/"),
            &NotificationMutate { read },
        )
        .await
    }
}

/// The profile carries the unread count, so it goes stale with the list.
pub fn invalidates_after_notification_update() -> Invalidation {
    Invalidation::new()
        .invalidate(keys::all())
        .invalidate(users::keys::me())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{Method, RequestBody};
    use crate::transport::MockTransport;
    use store::ApiConfig;

    #[tokio::test]
    async fn test_mark_read() {
        let mock = MockTransport::new();
        mock.respond_json(200, r#"{"id": 5, "title": "Ny prikk", "read": true}"#);
        let api = ApiClient::new(mock.clone(), ApiConfig::new("https://api.example.org/"));

        let notification = api.update_notification(5, true).await.unwrap();
        assert!(notification.read);

        let req = mock.last_request().unwrap();
        assert_eq!(req.method, Method::Put);
        assert_eq!(req.url, "https://api.example.org/notifications/5/");
        assert_eq!(req.body, RequestBody::Json(r#"{"read":true}"#.to_string()));
        assert_eq!(invalidates_after_notification_update().invalidate.len(), 2);
    }
}
