use api::models::QrCodeCreate;
use api::resources::qr_codes;
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Input, Label, Paper};
use ui::{report_error, show_snackbar, use_api, use_query, use_query_client, use_snackbar, Severity};

use super::{ErrorMessage, Guard, Loading};

#[component]
pub fn QrCodes() -> Element {
    rsx! {
        Guard {
            h1 { class: "page-title", "QR-koder" }
            div {
                class: "grid gap-4 md:grid-cols-[1fr_2fr]",
                NewQrCode {}
                QrCodeList {}
            }
        }
    }
}

#[component]
fn NewQrCode() -> Element {
    let api = use_api();
    let query = use_query_client();
    let mut snackbar = use_snackbar();
    let mut name = use_signal(String::new);
    let mut url = use_signal(String::new);
    let mut saving = use_signal(|| false);
    let mut inline_error = use_signal(|| Option::<String>::None);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let payload = QrCodeCreate {
            name: name().trim().to_string(),
            url: url().trim().to_string(),
        };
        if payload.name.is_empty() || payload.url.is_empty() {
            inline_error.set(Some("Fyll inn navn og lenke.".to_string()));
            return;
        }
        spawn(async move {
            saving.set(true);
            match api.client().create_qr_code(&payload).await {
                Ok(_) => {
                    query.apply(&qr_codes::invalidates_after_qr_code_change());
                    show_snackbar(&mut snackbar, Severity::Success, "QR-koden ble opprettet");
                    name.set(String::new());
                    url.set(String::new());
                    inline_error.set(None);
                }
                Err(e) => inline_error.set(report_error(&mut snackbar, &e)),
            }
            saving.set(false);
        });
    };

    rsx! {
        Paper {
            form {
                class: "flex flex-col gap-3",
                onsubmit: handle_submit,
                h2 { class: "m-0 text-base font-semibold", "Ny QR-kode" }
                div {
                    class: "flex flex-col gap-1.5",
                    Label { html_for: "qr-name", "Navn" }
                    Input {
                        id: "qr-name",
                        value: name(),
                        required: true,
                        oninput: move |evt: FormEvent| name.set(evt.value()),
                    }
                }
                div {
                    class: "flex flex-col gap-1.5",
                    Label { html_for: "qr-url", "Lenke" }
                    Input {
                        id: "qr-url",
                        r#type: "url",
                        value: url(),
                        required: true,
                        oninput: move |evt: FormEvent| url.set(evt.value()),
                    }
                }
                if let Some(err) = inline_error() {
                    div { class: "error-box", "{err}" }
                }
                Button { r#type: "submit", disabled: saving(), "Opprett" }
            }
        }
    }
}

#[component]
fn QrCodeList() -> Element {
    let api = use_api();
    let query = use_query_client();
    let mut snackbar = use_snackbar();
    let codes = use_query(qr_codes::keys::all, move || {
        let client = api.client();
        async move { client.get_qr_codes().await }
    });

    let delete = move |id: i64| {
        spawn(async move {
            match api.client().delete_qr_code(id).await {
                Ok(_) => {
                    query.apply(&qr_codes::invalidates_after_qr_code_change());
                    show_snackbar(&mut snackbar, Severity::Info, "QR-koden ble slettet");
                }
                Err(e) => {
                    report_error(&mut snackbar, &e);
                }
            }
        });
    };

    let codes = match &*codes.read() {
        None => return rsx! { Loading {} },
        Some(Err(error)) => return rsx! { ErrorMessage { error: error.clone() } },
        Some(Ok(codes)) => codes.clone(),
    };

    rsx! {
        div {
            class: "flex flex-col gap-3",
            if codes.is_empty() {
                p { class: "text-sm text-neutral-500", "Du har ingen QR-koder" }
            }
            for code in codes {
                Paper {
                    key: "{code.id}",
                    class: "flex items-center gap-4",
                    if let Some(image) = code.image.clone() {
                        img { class: "h-24 w-24", src: "{image}", alt: "QR-kode for {code.name}" }
                    }
                    div {
                        class: "flex flex-1 flex-col gap-1 min-w-0",
                        strong { "{code.name}" }
                        a { class: "truncate text-sm", href: "{code.url}", "{code.url}" }
                    }
                    Button {
                        variant: ButtonVariant::Destructive,
                        onclick: move |_| delete(code.id),
                        "Slett"
                    }
                }
            }
        }
    }
}
