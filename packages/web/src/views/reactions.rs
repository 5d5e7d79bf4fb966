use api::models::{reaction_counts, Reaction, ReactionMutate};
use api::resources::reactions;
use dioxus::prelude::*;
use ui::{report_error, use_api, use_auth, use_query_client, use_snackbar};

const EMOJIS: [&str; 6] = ["👍", "❤️", "😂", "😮", "🎉", "🔥"];

/// Emoji reactions on a news article or event. A user has at most one
/// reaction: picking another emoji swaps it, picking the same one removes it.
#[component]
pub(crate) fn Reactions(
    content_type: &'static str,
    object_id: i64,
    reactions: Vec<Reaction>,
    #[props(default = true)] allowed: bool,
) -> Element {
    let auth = use_auth();
    let api = use_api();
    let query = use_query_client();
    let mut snackbar = use_snackbar();

    let user_id = auth().user.map(|u| u.user_id);
    let mine = user_id.as_deref().and_then(|uid| {
        reactions
            .iter()
            .find(|r| r.user.as_ref().is_some_and(|u| u.user_id == uid))
            .cloned()
    });
    let counts = reaction_counts(&reactions);

    let react = move |emoji: &'static str| {
        let mine = mine.clone();
        spawn(async move {
            let client = api.client();
            let result = match mine {
                Some(existing) if existing.emoji == emoji => {
                    client.delete_reaction(&existing.reaction_id).await.map(|_| ())
                }
                Some(existing) => client
                    .update_reaction(&existing.reaction_id, emoji)
                    .await
                    .map(|_| ()),
                None => client
                    .create_reaction(&ReactionMutate {
                        emoji: emoji.to_string(),
                        content_type: content_type.to_string(),
                        object_id,
                    })
                    .await
                    .map(|_| ()),
            };
            match result {
                Ok(()) => query.apply(&reactions::invalidates_after_reaction(content_type, object_id)),
                Err(e) => {
                    report_error(&mut snackbar, &e);
                }
            }
        });
    };

    rsx! {
        div {
            class: "flex flex-wrap items-center gap-2",
            for (emoji, count) in counts {
                span {
                    key: "{emoji}",
                    class: "rounded-full border border-neutral-200 bg-white px-2 py-0.5 text-sm",
                    "{emoji} {count}"
                }
            }
            if allowed && user_id.is_some() {
                div {
                    class: "flex gap-1",
                    for emoji in EMOJIS {
                        button {
                            key: "{emoji}",
                            class: "rounded bg-transparent border-none cursor-pointer text-lg hover:bg-neutral-100",
                            onclick: {
                                let react = react.clone();
                                move |_| react(emoji)
                            },
                            "{emoji}"
                        }
                    }
                }
            }
        }
    }
}
