use dioxus::prelude::*;

use crate::icons::{FaBars, FaXmark};
use crate::Icon;

/// Top bar. `brand` sits on the left, `children` (links and the profile
/// button) on the right and in the collapsed menu on small screens.
#[component]
pub fn Navbar(brand: Element, children: Element) -> Element {
    let mut menu_open = use_signal(|| false);

    rsx! {
        header {
            class: "sticky top-0 z-40 bg-slate-900 text-white shadow",
            nav {
                class: "mx-auto flex max-w-6xl items-center justify-between px-4 py-3",
                div { class: "flex items-center gap-2 font-semibold", {brand} }
                div {
                    class: "hidden items-center gap-4 md:flex",
                    {children.clone()}
                }
                button {
                    class: "md:hidden p-2 rounded hover:bg-slate-800",
                    "aria-label": "Meny",
                    onclick: move |_| menu_open.toggle(),
                    if menu_open() {
                        Icon { width: 18, height: 18, icon: FaXmark }
                    } else {
                        Icon { width: 18, height: 18, icon: FaBars }
                    }
                }
            }
            if menu_open() {
                div {
                    class: "flex flex-col gap-2 border-t border-slate-800 px-4 py-3 md:hidden",
                    onclick: move |_| menu_open.set(false),
                    {children}
                }
            }
        }
    }
}
