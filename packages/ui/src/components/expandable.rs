use dioxus::prelude::*;

use crate::icons::{FaChevronDown, FaChevronUp};
use crate::Icon;

/// Collapsible section with a clickable header.
#[component]
pub fn Expandable(
    title: String,
    #[props(default)] description: String,
    #[props(default)] open: bool,
    children: Element,
) -> Element {
    let mut expanded = use_signal(|| open);

    rsx! {
        div {
            class: "border border-neutral-200 rounded-lg bg-white",
            button {
                class: "flex w-full items-center justify-between gap-2 px-4 py-3 text-left bg-transparent border-none cursor-pointer",
                onclick: move |_| expanded.toggle(),
                div {
                    span { class: "block font-medium text-neutral-800", "{title}" }
                    if !description.is_empty() {
                        span { class: "block text-xs text-neutral-500", "{description}" }
                    }
                }
                if expanded() {
                    Icon { icon: FaChevronUp, width: 14, height: 14 }
                } else {
                    Icon { icon: FaChevronDown, width: 14, height: 14 }
                }
            }
            if expanded() {
                div { class: "px-4 pb-4", {children} }
            }
        }
    }
}
