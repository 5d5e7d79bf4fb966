//! Emoji reactions on news items and events.
//!
//! Reactions are embedded in the news and event detail payloads, so every
//! mutation invalidates the detail of the object reacted on.

use serde_json::json;
use store::Invalidation;

use crate::client::ApiClient;
use crate::error::{ApiError, RequestResponse};
use crate::models::{Reaction, ReactionMutate};
use crate::resources::{events, news};
use crate::transport::Transport;

pub const REACTIONS_ENDPOINT: &str = "emojis/reactions";

/// `content_type` of reactions on news items.
pub const NEWS_CONTENT_TYPE: &str = "news";
/// `content_type` of reactions on events.
pub const EVENT_CONTENT_TYPE: &str = "event";

impl<T: Transport> ApiClient<T> {
    pub async fn create_reaction(&self, reaction: &ReactionMutate) -> Result<Reaction, ApiError> {
        self.post(&format!("{REACTIONS_ENDPOINT}/"), reaction).await
    }

    /// Swap the emoji of an existing reaction.
    pub async fn update_reaction(&self, reaction_id: &str, emoji: &str) -> Result<Reaction, ApiError> {
        self.put(
            &format!("{REACTIONS_ENDPOINT}/{reaction_id}/"),
            &json!({ "emoji": emoji }),
        )
        .await
    }

    pub async fn delete_reaction(&self, reaction_id: &str) -> Result<RequestResponse, ApiError> {
        self.delete(&format!("{REACTIONS_ENDPOINT}/{reaction_id}/"))
            .await
    }
}

/// Unknown content types invalidate nothing.
pub fn invalidates_after_reaction(content_type: &str, object_id: i64) -> Invalidation {
    match content_type {
        NEWS_CONTENT_TYPE => Invalidation::new().invalidate(news::keys::detail(object_id)),
        EVENT_CONTENT_TYPE => Invalidation::new().invalidate(events::keys::detail(object_id)),
        _ => Invalidation::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::Method;
    use crate::transport::MockTransport;
    use store::ApiConfig;

    #[tokio::test]
    async fn test_reaction_endpoints() {
        let mock = MockTransport::new();
        mock.respond_json(201, r#"{"reaction_id": "r1", "emoji": "🎉", "content_type": "news", "object_id": 3}"#);
        mock.respond_json(200, r#"{"detail": "Reaksjonen ble slettet"}"#);
        let api = ApiClient::new(mock.clone(), ApiConfig::new("https://api.example.org/"))
            .with_token(Some("t".into()));

        let reaction = api
            .create_reaction(&ReactionMutate {
                emoji: "🎉".into(),
                content_type: NEWS_CONTENT_TYPE.into(),
                object_id: 3,
            })
            .await
            .unwrap();
        assert_eq!(reaction.object_id, 3);
        assert_eq!(
            mock.last_request().unwrap().url,
            "https://api.example.org/emojis/reactions/"
        );

        api.delete_reaction(&reaction.reaction_id).await.unwrap();
        let req = mock.last_request().unwrap();
        assert_eq!(req.method, Method::Delete);
        assert_eq!(req.url, "https://api.example.org/emojis/reactions/r1/");
    }

    #[test]
    fn test_invalidation_by_content_type() {
        assert_eq!(
            invalidates_after_reaction("news", 3).invalidate,
            vec![news::keys::detail(3)]
        );
        assert_eq!(
            invalidates_after_reaction("event", 3).invalidate,
            vec![events::keys::detail(3)]
        );
        assert!(invalidates_after_reaction("jobpost", 3).is_empty());
    }
}
