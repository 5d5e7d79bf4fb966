use dioxus::prelude::*;

const FIELD_CLASS: &str = "bg-white border border-neutral-300 rounded px-3 py-2 text-sm text-neutral-800 outline-none font-[inherit] focus:border-primary-500 focus:shadow-[0_0_0_1px_var(--color-primary-500)]";

#[component]
pub fn Input(
    #[props(default)] id: String,
    #[props(default)] class: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default)] placeholder: String,
    #[props(default)] value: String,
    #[props(default)] required: bool,
    #[props(default)] disabled: bool,
    oninput: Option<EventHandler<FormEvent>>,
) -> Element {
    rsx! {
        input {
            id: "{id}",
            class: "{FIELD_CLASS} {class}",
            r#type: r#type,
            placeholder: "{placeholder}",
            value: "{value}",
            required,
            disabled,
            oninput: move |evt| {
                if let Some(handler) = oninput {
                    handler.call(evt);
                }
            },
        }
    }
}

#[component]
pub fn Textarea(
    #[props(default)] id: String,
    #[props(default)] class: String,
    #[props(default)] placeholder: String,
    #[props(default)] value: String,
    #[props(default = 4)] rows: u32,
    #[props(default)] disabled: bool,
    oninput: Option<EventHandler<FormEvent>>,
) -> Element {
    rsx! {
        textarea {
            id: "{id}",
            class: "{FIELD_CLASS} resize-y {class}",
            placeholder: "{placeholder}",
            rows: "{rows}",
            value: "{value}",
            disabled,
            oninput: move |evt| {
                if let Some(handler) = oninput {
                    handler.call(evt);
                }
            },
        }
    }
}

#[component]
pub fn Label(#[props(default)] html_for: String, #[props(default)] class: String, children: Element) -> Element {
    rsx! {
        label {
            r#for: "{html_for}",
            class: "block text-sm font-medium text-neutral-700 {class}",
            {children}
        }
    }
}
