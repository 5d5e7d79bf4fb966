use dioxus::prelude::*;
use ui::components::NotFoundIndicator;

use crate::Route;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));
    tracing::debug!("No route for {}", path);

    rsx! {
        NotFoundIndicator { subtitle: "Vi fant ingenting på {path}" }
        div {
            class: "text-center",
            Link { to: Route::Landing {}, "Til forsiden" }
        }
    }
}
