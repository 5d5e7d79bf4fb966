use dioxus::prelude::*;

use super::{Button, ButtonVariant};

/// List footer for paginated lists: shows `children`, then a "load more"
/// button while more pages exist.
#[component]
pub fn LoadMore(
    has_next_page: bool,
    #[props(default)] is_fetching: bool,
    #[props(default)] is_empty: bool,
    #[props(default = "Fant ingenting".to_string())] empty_text: String,
    on_load_more: EventHandler<()>,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "flex flex-col gap-3",
            {children}
            if is_empty {
                p { class: "py-6 text-center text-neutral-500", "{empty_text}" }
            }
            if has_next_page {
                Button {
                    variant: ButtonVariant::Outline,
                    class: "self-center",
                    disabled: is_fetching,
                    onclick: move |_| on_load_more.call(()),
                    if is_fetching { "Laster..." } else { "Last inn mer" }
                }
            }
        }
    }
}
