use dioxus::prelude::*;

#[component]
pub fn NotFoundIndicator(
    #[props(default = "Fant ikke siden".to_string())] header: String,
    #[props(default)] subtitle: String,
) -> Element {
    rsx! {
        div {
            class: "flex flex-col items-center gap-2 py-16 text-center",
            span { class: "text-5xl", "🤷" }
            h2 { class: "m-0 text-xl font-semibold text-neutral-800", "{header}" }
            if !subtitle.is_empty() {
                p { class: "m-0 text-neutral-600", "{subtitle}" }
            }
        }
    }
}
