//! # Events
//!
//! | Method | Endpoint |
//! |--------|----------|
//! | [`get_events`](ApiClient::get_events) | `GET events/` |
//! | [`get_events_where_admin`](ApiClient::get_events_where_admin) | `GET events/admin/` |
//! | [`get_event`](ApiClient::get_event) | `GET events/{id}/` |
//! | [`create_event`](ApiClient::create_event) / [`update_event`](ApiClient::update_event) / [`delete_event`](ApiClient::delete_event) | `POST events/`, `PUT`/`DELETE events/{id}/` |
//! | [`get_event_statistics`](ApiClient::get_event_statistics) | `GET events/{id}/statistics/` |
//! | [`get_event_favorite`](ApiClient::get_event_favorite) / [`set_event_favorite`](ApiClient::set_event_favorite) | `GET`/`PUT events/{id}/favorite/` |
//! | [`notify_event_registrations`](ApiClient::notify_event_registrations) | `POST events/{id}/notify/` |
//! | [`get_public_event_registrations`](ApiClient::get_public_event_registrations) | `GET events/{id}/public_registrations/` |
//! | [`send_gift_cards`](ApiClient::send_gift_cards) | `POST events/{id}/mail-gift-cards/` (files) |
//! | registrations | `events/{id}/registrations/[{user_id}/]` |
//! | [`get_categories`](ApiClient::get_categories) | `GET categories/` |
//!
//! Cache keys live under `["event", ...]`; the registration survey's form
//! entry and the signed-in user's entries are invalidated alongside
//! registrations since both show registration state.

use serde_json::json;
use store::{Filters, Invalidation, PaginationResponse};

use crate::client::ApiClient;
use crate::error::{ApiError, RequestResponse};
use crate::fetch::{Method, UploadFile};
use crate::models::{
    Category, Event, EventFavorite, EventList, EventMutate, EventStatistics, PublicRegistration,
    Registration, RegistrationMutate,
};
use crate::resources::{forms, notifications, users};
use crate::transport::Transport;

pub const EVENTS_ENDPOINT: &str = "events";
pub const EVENT_REGISTRATIONS_ENDPOINT: &str = "registrations";
pub const CATEGORIES_ENDPOINT: &str = "categories";

pub mod keys {
    use store::{Filters, QueryKey};

    pub fn all() -> QueryKey {
        QueryKey::new("event")
    }

    pub fn list(filters: &Filters) -> QueryKey {
        all().push_str("list").push_filters(filters)
    }

    pub fn list_admin(filters: &Filters) -> QueryKey {
        all().push_str("admin_list").push_filters(filters)
    }

    pub fn detail(event_id: i64) -> QueryKey {
        all().push_int(event_id)
    }

    pub fn statistics(event_id: i64) -> QueryKey {
        detail(event_id).push_str("statistics")
    }

    pub fn favorite(event_id: i64) -> QueryKey {
        detail(event_id).push_str("favorite")
    }

    pub fn public_registrations(event_id: i64) -> QueryKey {
        detail(event_id).push_str("public_registrations")
    }

    pub fn registrations(event_id: i64) -> QueryKey {
        detail(event_id).push_str("registrations")
    }

    pub fn registration_list(event_id: i64, filters: &Filters) -> QueryKey {
        registrations(event_id).push_str("list").push_filters(filters)
    }

    pub fn registration(event_id: i64, user_id: &str) -> QueryKey {
        registrations(event_id).push_str(user_id)
    }

    pub fn categories() -> QueryKey {
        QueryKey::new("categories")
    }
}

fn event_path(event_id: i64) -> String {
    format!("{EVENTS_ENDPOINT}/{event_id}/")
}

fn registrations_path(event_id: i64) -> String {
    format!("{EVENTS_ENDPOINT}/{event_id}/{EVENT_REGISTRATIONS_ENDPOINT}/")
}

impl<T: Transport> ApiClient<T> {
    pub async fn get_events(&self, filters: &Filters) -> Result<PaginationResponse<EventList>, ApiError> {
        self.get(&format!("{EVENTS_ENDPOINT}/"), filters).await
    }

    /// Events the signed-in user may administer.
    pub async fn get_events_where_admin(
        &self,
        filters: &Filters,
    ) -> Result<PaginationResponse<EventList>, ApiError> {
        self.get(&format!("{EVENTS_ENDPOINT}/admin/"), filters).await
    }

    pub async fn get_event(&self, event_id: i64) -> Result<Event, ApiError> {
        self.get(&event_path(event_id), &Filters::new()).await
    }

    pub async fn create_event(&self, event: &EventMutate) -> Result<Event, ApiError> {
        self.post(&format!("{EVENTS_ENDPOINT}/"), event).await
    }

    pub async fn update_event(&self, event_id: i64, event: &EventMutate) -> Result<Event, ApiError> {
        self.put(&event_path(event_id), event).await
    }

    pub async fn delete_event(&self, event_id: i64) -> Result<RequestResponse, ApiError> {
        self.delete(&event_path(event_id)).await
    }

    pub async fn get_event_statistics(&self, event_id: i64) -> Result<EventStatistics, ApiError> {
        self.get(&format!("{EVENTS_ENDPOINT}/{event_id}/statistics/"), &Filters::new())
            .await
    }

    pub async fn get_event_favorite(&self, event_id: i64) -> Result<EventFavorite, ApiError> {
        self.get(&format!("{EVENTS_ENDPOINT}/{event_id}/favorite/"), &Filters::new())
            .await
    }

    pub async fn set_event_favorite(
        &self,
        event_id: i64,
        favorite: &EventFavorite,
    ) -> Result<EventFavorite, ApiError> {
        self.put(&format!("{EVENTS_ENDPOINT}/{event_id}/favorite/"), favorite)
            .await
    }

    /// Send a notification to everyone registered for the event.
    pub async fn notify_event_registrations(
        &self,
        event_id: i64,
        title: &str,
        message: &str,
    ) -> Result<RequestResponse, ApiError> {
        self.post(
            &format!("{EVENTS_ENDPOINT}/{event_id}/notify/"),
            &json!({ "title": title, "message": message }),
        )
        .await
    }

    pub async fn get_public_event_registrations(
        &self,
        event_id: i64,
        filters: &Filters,
    ) -> Result<PaginationResponse<PublicRegistration>, ApiError> {
        self.get(&format!("{EVENTS_ENDPOINT}/{event_id}/public_registrations/"), filters)
            .await
    }

    /// Mail one gift card file to each attendee.
    pub async fn send_gift_cards(
        &self,
        event_id: i64,
        files: Vec<UploadFile>,
    ) -> Result<RequestResponse, ApiError> {
        self.fetch_files(
            Method::Post,
            &format!("{EVENTS_ENDPOINT}/{event_id}/mail-gift-cards/"),
            files,
        )
        .await
    }

    pub async fn get_event_registrations(
        &self,
        event_id: i64,
        filters: &Filters,
    ) -> Result<PaginationResponse<Registration>, ApiError> {
        self.get(&registrations_path(event_id), filters).await
    }

    pub async fn get_registration(&self, event_id: i64, user_id: &str) -> Result<Registration, ApiError> {
        self.get(&format!("{}{user_id}/", registrations_path(event_id)), &Filters::new())
            .await
    }

    pub async fn create_registration(
        &self,
        event_id: i64,
        registration: &RegistrationMutate,
    ) -> Result<Registration, ApiError> {
        self.post(&registrations_path(event_id), registration).await
    }

    pub async fn update_registration(
        &self,
        event_id: i64,
        user_id: &str,
        registration: &RegistrationMutate,
    ) -> Result<Registration, ApiError> {
        self.put(&format!("{}{user_id}/", registrations_path(event_id)), registration)
            .await
    }

    pub async fn delete_registration(&self, event_id: i64, user_id: &str) -> Result<RequestResponse, ApiError> {
        self.delete(&format!("{}{user_id}/", registrations_path(event_id)))
            .await
    }

    pub async fn get_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get(&format!("{CATEGORIES_ENDPOINT}/"), &Filters::new()).await
    }
}

/// After creating, updating or deleting an event. The saved event itself is
/// seeded under [`keys::detail`] by the caller.
pub fn invalidates_after_event_change() -> Invalidation {
    Invalidation::new().invalidate(keys::all())
}

/// After a registration is created. `survey` is the event's survey form id,
/// if the event is cached and has one.
pub fn invalidates_after_registration_create(event_id: i64, survey: Option<&str>) -> Invalidation {
    with_survey(Invalidation::new(), survey)
        .invalidate(keys::detail(event_id))
        .invalidate(users::keys::events_all())
        .invalidate(users::keys::me())
        .invalidate(notifications::keys::all())
}

pub fn invalidates_after_registration_update(event_id: i64) -> Invalidation {
    Invalidation::new()
        .invalidate(keys::registration_list(event_id, &Filters::new()))
        .invalidate(users::keys::events_all())
}

pub fn invalidates_after_registration_delete(event_id: i64, survey: Option<&str>) -> Invalidation {
    with_survey(Invalidation::new(), survey)
        .remove(keys::registrations(event_id))
        .invalidate(keys::detail(event_id))
        .invalidate(users::keys::events_all())
}

fn with_survey(changes: Invalidation, survey: Option<&str>) -> Invalidation {
    match survey {
        Some(form_id) => changes.invalidate(forms::keys::detail(form_id)),
        None => changes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::RequestBody;
    use crate::transport::MockTransport;
    use store::{ApiConfig, QueryCache, QueryKey};

    fn client(mock: &MockTransport) -> ApiClient<MockTransport> {
        ApiClient::new(mock.clone(), ApiConfig::new("https://api.example.org/")).with_token(Some("t".into()))
    }

    const EVENT: &str = r#"{"id": 7, "title": "Bedpres", "start_date": "2026-10-20T16:00:00Z",
        "end_date": "2026-10-20T19:00:00Z", "survey": "form-1"}"#;

    #[tokio::test]
    async fn test_event_list_paths() {
        let mock = MockTransport::new();
        mock.respond_json(200, r#"{"count": 0, "next": null, "previous": null, "results": []}"#);
        mock.respond_json(200, r#"{"count": 0, "next": null, "previous": null, "results": []}"#);
        let api = client(&mock);

        let page = api
            .get_events(&Filters::new().with("category", 2).page(1))
            .await
            .unwrap();
        assert!(page.results.is_empty());
        api.get_events_where_admin(&Filters::new()).await.unwrap();

        let urls: Vec<String> = mock.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                "https://api.example.org/events/?category=2&page=1",
                "https://api.example.org/events/admin/",
            ]
        );
    }

    #[tokio::test]
    async fn test_get_event_and_registration_paths() {
        let mock = MockTransport::new();
        mock.respond_json(200, EVENT);
        mock.respond_json(200, r#"{"user_info": {"user_id": "olan"}, "is_on_wait": true}"#);
        let api = client(&mock);

        let event = api.get_event(7).await.unwrap();
        assert_eq!(event.survey.as_deref(), Some("form-1"));

        let registration = api.get_registration(7, "olan").await.unwrap();
        assert!(registration.is_on_wait);
        assert_eq!(
            mock.last_request().unwrap().url,
            "https://api.example.org/events/7/registrations/olan/"
        );
    }

    #[tokio::test]
    async fn test_notify_and_gift_cards() {
        let mock = MockTransport::new();
        mock.respond_json(200, r#"{"detail": "Sendt"}"#);
        mock.respond_json(200, r#"{"detail": "Sendt"}"#);
        let api = client(&mock);

        api.notify_event_registrations(7, "Husk", "Oppmøte 17:00").await.unwrap();
        let req = mock.last_request().unwrap();
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.url, "https://api.example.org/events/7/notify/");
        let RequestBody::Json(body) = req.body else {
            panic!("expected a JSON body");
        };
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&body).unwrap(),
            json!({"title": "Husk", "message": "Oppmøte 17:00"})
        );

        api.send_gift_cards(7, vec![UploadFile::new("kort.pdf", vec![1])])
            .await
            .unwrap();
        let req = mock.last_request().unwrap();
        assert!(matches!(req.body, RequestBody::Multipart(ref files) if files.len() == 1));
    }

    #[test]
    fn test_registration_create_invalidation() {
        let cache = QueryCache::new();
        cache.set(keys::detail(7), &1);
        cache.set(forms::keys::detail("form-1"), &1);
        cache.set(users::keys::me(), &1);
        cache.set(users::keys::events(None), &1);
        cache.set(notifications::keys::all(), &1);
        cache.set(keys::detail(8), &1);

        cache.apply(&invalidates_after_registration_create(7, Some("form-1")));

        assert!(!cache.is_fresh(&keys::detail(7)));
        assert!(!cache.is_fresh(&forms::keys::detail("form-1")));
        assert!(!cache.is_fresh(&users::keys::me()));
        assert!(!cache.is_fresh(&users::keys::events(None)));
        assert!(!cache.is_fresh(&notifications::keys::all()));
        assert!(cache.is_fresh(&keys::detail(8)));
    }

    #[test]
    fn test_registration_delete_removes_registrations() {
        let cache = QueryCache::new();
        cache.set(keys::registration(7, "olan"), &1);
        cache.set(keys::registration_list(7, &Filters::new()), &1);
        cache.apply(&invalidates_after_registration_delete(7, None));
        assert!(!cache.contains(&keys::registration(7, "olan")));
        assert!(!cache.contains(&keys::registration_list(7, &Filters::new())));
    }

    #[test]
    fn test_key_hierarchy() {
        assert!(keys::registration(7, "olan").starts_with(&keys::detail(7)));
        assert!(keys::statistics(7).starts_with(&keys::all()));
        assert_eq!(keys::categories(), QueryKey::new("categories"));
        assert_eq!(keys::list(&Filters::new()).to_string(), "event/list");
    }
}
