use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Outline,
    Ghost,
    Destructive,
}

impl ButtonVariant {
    fn class(self) -> &'static str {
        match self {
            ButtonVariant::Primary => "bg-primary-500 text-white hover:bg-primary-600 border border-primary-500",
            ButtonVariant::Outline => "bg-white text-neutral-800 hover:bg-neutral-50 border border-neutral-300",
            ButtonVariant::Ghost => "bg-transparent text-neutral-700 hover:bg-neutral-100 border border-transparent",
            ButtonVariant::Destructive => "bg-red-600 text-white hover:bg-red-700 border border-red-600",
        }
    }
}

#[component]
pub fn Button(
    #[props(default)] variant: ButtonVariant,
    #[props(default)] class: String,
    #[props(default = "button".to_string())] r#type: String,
    #[props(default)] disabled: bool,
    onclick: Option<EventHandler<MouseEvent>>,
    children: Element,
) -> Element {
    let variant_class = variant.class();

    rsx! {
        button {
            class: "inline-flex items-center justify-center gap-2 rounded px-4 py-2 text-sm cursor-pointer transition-colors disabled:opacity-50 disabled:cursor-not-allowed {variant_class} {class}",
            r#type: r#type,
            disabled,
            onclick: move |evt| {
                if let Some(handler) = onclick {
                    handler.call(evt);
                }
            },
            {children}
        }
    }
}
