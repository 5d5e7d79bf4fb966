//! Transient notification banner.
//!
//! One message is shown at a time and a new one replaces it. The banner
//! closes itself after `snackbar.duration_ms`.

use std::time::Duration;

use api::ApiError;
use dioxus::prelude::*;
use store::SnackbarConfig;

use crate::time::sleep;

const SNACKBAR_CSS: Asset = asset!("/assets/styling/snackbar.css");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    fn class(self) -> &'static str {
        match self {
            Severity::Info => "snackbar info",
            Severity::Success => "snackbar success",
            Severity::Warning => "snackbar warning",
            Severity::Error => "snackbar error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Snackbar {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SnackbarQueue {
    current: Option<Snackbar>,
    next_id: u64,
}

impl SnackbarQueue {
    /// Show `message`, replacing whatever is on screen. Returns its id.
    pub fn show(&mut self, severity: Severity, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        self.current = Some(Snackbar {
            id: self.next_id,
            message: message.into(),
            severity,
        });
        self.next_id
    }

    pub fn current(&self) -> Option<&Snackbar> {
        self.current.as_ref()
    }

    /// Close the banner if it still shows `id`. A newer message stays up.
    pub fn dismiss(&mut self, id: u64) -> bool {
        if self.current.as_ref().is_some_and(|s| s.id == id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn close(&mut self) {
        self.current = None;
    }
}

pub fn use_snackbar() -> Signal<SnackbarQueue> {
    use_context::<Signal<SnackbarQueue>>()
}

pub fn show_snackbar(snackbar: &mut Signal<SnackbarQueue>, severity: Severity, message: &str) {
    tracing::debug!(?severity, "snackbar: {}", message);
    snackbar.write().show(severity, message);
}

/// Message for errors the form should show next to its fields; `None` for
/// failures that belong in the snackbar.
pub fn inline_message(error: &ApiError) -> Option<String> {
    error.is_expected().then(|| error.detail())
}

/// Route a failed request to the user. Expected errors (validation, "already
/// registered") are returned for inline display, anything else becomes an
/// error snackbar.
pub fn report_error(snackbar: &mut Signal<SnackbarQueue>, error: &ApiError) -> Option<String> {
    let inline = inline_message(error);
    if inline.is_none() {
        tracing::warn!("request failed: {}", error);
        show_snackbar(snackbar, Severity::Error, &error.detail());
    }
    inline
}

#[component]
pub fn SnackbarProvider(#[props(default)] config: SnackbarConfig, children: Element) -> Element {
    use_context_provider(|| Signal::new(SnackbarQueue::default()));

    rsx! {
        {children}
        SnackbarHost { duration_ms: config.duration_ms }
    }
}

#[component]
fn SnackbarHost(duration_ms: u32) -> Element {
    let mut snackbar = use_snackbar();

    use_effect(move || {
        let Some(id) = snackbar.read().current().map(|s| s.id) else {
            return;
        };
        spawn(async move {
            sleep(Duration::from_millis(u64::from(duration_ms))).await;
            snackbar.write().dismiss(id);
        });
    });

    let Some(current) = snackbar().current().cloned() else {
        return rsx! {};
    };

    rsx! {
        document::Stylesheet { href: SNACKBAR_CSS }

        div {
            class: current.severity.class(),
            role: "status",
            span { class: "snackbar-message", "{current.message}" }
            button {
                class: "snackbar-close",
                onclick: move |_| snackbar.write().close(),
                "Lukk"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_new_message_replaces_current() {
        let mut queue = SnackbarQueue::default();
        let first = queue.show(Severity::Info, "Lagret");
        let second = queue.show(Severity::Error, "Noe gikk galt");

        assert_ne!(first, second);
        let current = queue.current().unwrap();
        assert_eq!(current.message, "Noe gikk galt");
        assert_eq!(current.severity, Severity::Error);
    }

    #[test]
    fn test_stale_dismiss_keeps_newer_message() {
        let mut queue = SnackbarQueue::default();
        let first = queue.show(Severity::Info, "a");
        let second = queue.show(Severity::Info, "b");

        assert!(!queue.dismiss(first));
        assert_eq!(queue.current().unwrap().message, "b");
        assert!(queue.dismiss(second));
        assert!(queue.current().is_none());
    }

    #[test]
    fn test_expected_errors_stay_inline() {
        let conflict = ApiError::Response {
            status: 409,
            detail: "Du er allerede påmeldt".to_string(),
            fields: BTreeMap::new(),
        };
        assert_eq!(inline_message(&conflict).as_deref(), Some("Du er allerede påmeldt"));

        let server = ApiError::Response {
            status: 500,
            detail: "Internal".to_string(),
            fields: BTreeMap::new(),
        };
        assert_eq!(inline_message(&server), None);
    }
}
