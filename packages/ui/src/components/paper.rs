use dioxus::prelude::*;

/// White card with a border, the base container of most pages.
#[component]
pub fn Paper(#[props(default)] class: String, children: Element) -> Element {
    rsx! {
        div {
            class: "bg-white border border-neutral-200 rounded-lg p-4 {class}",
            {children}
        }
    }
}
