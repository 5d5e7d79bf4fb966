use api::models::{Strike, StrikeCreate, StrikeKind, StrikeList, StrikeReason};
use api::resources::strikes;
use dioxus::prelude::*;
use store::Filters;
use ui::components::{Button, ButtonVariant, Expandable, Input, LoadMore, Paper};
use ui::{
    report_error, show_snackbar, use_api, use_paginated, use_query_client, use_snackbar, Severity,
};

use super::{AdminPage, Field, STRIKE_ADMIN};
use crate::views::{format_date, ErrorMessage, Loading};

/// Select value for a free-text strike.
const CUSTOM_REASON: &str = "custom";

#[derive(Clone, Debug, Default, PartialEq)]
struct StrikeDraft {
    user_id: String,
    event_id: String,
    /// `None` means a custom description and size.
    reason: Option<StrikeReason>,
    description: String,
    strike_size: String,
}

impl StrikeDraft {
    fn to_create(&self) -> Result<StrikeCreate, &'static str> {
        let user_id = self.user_id.trim();
        if user_id.is_empty() {
            return Err("Oppgi brukernavnet til den som skal få prikken");
        }
        let event_id = match self.event_id.trim() {
            "" => None,
            value => Some(value.parse::<i64>().map_err(|_| "Arrangement-id må være et tall")?),
        };
        let kind = match self.reason {
            Some(reason) => StrikeKind::Enum { r#enum: reason },
            None => {
                let description = self.description.trim();
                if description.is_empty() {
                    return Err("Skriv en begrunnelse for prikken");
                }
                let strike_size = self
                    .strike_size
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|size| *size > 0)
                    .ok_or("Antall prikker må være et positivt heltall")?;
                StrikeKind::Custom {
                    description: description.to_string(),
                    strike_size,
                }
            }
        };

        Ok(StrikeCreate {
            user_id: user_id.to_string(),
            event_id,
            kind,
        })
    }
}

fn reason_value(reason: Option<StrikeReason>) -> String {
    match reason {
        Some(reason) => format!("{reason:?}"),
        None => CUSTOM_REASON.to_string(),
    }
}

fn reason_from_value(value: &str) -> Option<StrikeReason> {
    StrikeReason::ALL
        .into_iter()
        .find(|reason| format!("{reason:?}") == value)
}

fn strike_filters(search: &str) -> Filters {
    let mut filters = Filters::new().with("active", true);
    filters.insert("search", search.trim());
    filters
}

#[component]
pub fn StrikeAdmin() -> Element {
    rsx! {
        AdminPage {
            access: STRIKE_ADMIN,
            title: "Prikker",
            div {
                class: "grid gap-4 md:grid-cols-[1fr_2fr]",
                NewStrike {}
                StrikeOverview {}
            }
        }
    }
}

#[component]
fn NewStrike() -> Element {
    let api = use_api();
    let query = use_query_client();
    let mut snackbar = use_snackbar();
    let mut draft = use_signal(StrikeDraft::default);
    let mut saving = use_signal(|| false);
    let mut inline_error = use_signal(|| Option::<String>::None);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let body = match draft.read().to_create() {
            Ok(body) => body,
            Err(message) => {
                inline_error.set(Some(message.to_string()));
                return;
            }
        };
        spawn(async move {
            saving.set(true);
            match api.client().create_strike(&body).await {
                Ok(_) => {
                    query.apply(&strikes::invalidates_after_strike_change(&body.user_id));
                    let message = format!("{} fikk en prikk", body.user_id);
                    show_snackbar(&mut snackbar, Severity::Success, &message);
                    draft.set(StrikeDraft::default());
                    inline_error.set(None);
                }
                Err(e) => inline_error.set(report_error(&mut snackbar, &e)),
            }
            saving.set(false);
        });
    };

    let d = draft();
    let selected_reason = reason_value(d.reason);

    rsx! {
        Paper {
            form {
                class: "flex flex-col gap-3",
                onsubmit: handle_submit,
                h2 { class: "m-0 text-lg font-semibold", "Gi prikk" }
                Field { label: "Brukernavn", html_for: "strike-user",
                    Input { id: "strike-user", value: d.user_id.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.user_id = e.value()) }
                }
                Field { label: "Arrangement-id (valgfritt)", html_for: "strike-event",
                    Input { id: "strike-event", r#type: "number", value: d.event_id.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.event_id = e.value()) }
                }
                Field { label: "Grunn", html_for: "strike-reason",
                    select {
                        id: "strike-reason",
                        class: "border border-neutral-300 rounded px-2 py-2 text-sm",
                        onchange: move |e: FormEvent| draft.with_mut(|d| d.reason = reason_from_value(&e.value())),
                        for reason in StrikeReason::ALL {
                            option {
                                value: reason_value(Some(reason)),
                                selected: selected_reason == reason_value(Some(reason)),
                                {reason.label()}
                            }
                        }
                        option { value: CUSTOM_REASON, selected: d.reason.is_none(), "Annet" }
                    }
                }
                if d.reason.is_none() {
                    Field { label: "Begrunnelse", html_for: "strike-description",
                        Input { id: "strike-description", value: d.description.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.description = e.value()) }
                    }
                    Field { label: "Antall prikker", html_for: "strike-size",
                        Input { id: "strike-size", r#type: "number", value: d.strike_size.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.strike_size = e.value()) }
                    }
                }
                if let Some(err) = inline_error() {
                    div { class: "error-box", "{err}" }
                }
                Button { r#type: "submit", disabled: saving(), "Gi prikk" }
            }
        }
    }
}

#[component]
fn StrikeOverview() -> Element {
    let api = use_api();
    let mut search_input = use_signal(String::new);
    let mut search = use_signal(String::new);
    let filters = use_memo(move || strike_filters(&search()));

    let list = use_paginated(
        move || strikes::keys::list(&filters()),
        move |page| {
            let client = api.client();
            let filters = filters.peek().page(page);
            async move { client.get_strikes(&filters).await }
        },
    );

    rsx! {
        div {
            class: "flex flex-col gap-2",
            form {
                class: "flex items-center gap-2",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    search.set(search_input());
                },
                Input {
                    class: "flex-1",
                    placeholder: "Søk etter bruker",
                    value: search_input(),
                    oninput: move |evt: FormEvent| search_input.set(evt.value()),
                }
                Button { r#type: "submit", "Søk" }
            }
            if let Some(error) = list.error() {
                ErrorMessage { error }
            }
            if list.is_loading() {
                Loading {}
            } else {
                LoadMore {
                    has_next_page: list.has_next_page(),
                    is_fetching: list.is_fetching(),
                    is_empty: list.is_empty(),
                    empty_text: "Ingen har aktive prikker",
                    on_load_more: move |_| list.load_more(),
                    for entry in list.items() {
                        UserStrikes { key: "{entry.user.user_id}", entry }
                    }
                }
            }
        }
    }
}

#[component]
fn UserStrikes(entry: StrikeList) -> Element {
    let title = format!("{} ({})", entry.user.full_name(), entry.active_strikes_sum);
    let user_id = entry.user.user_id.clone();

    rsx! {
        Expandable {
            title,
            description: user_id.clone(),
            div {
                class: "flex flex-col gap-2 p-4",
                for strike in entry.strikes {
                    StrikeRow { key: "{strike.id}", user_id: user_id.clone(), strike }
                }
            }
        }
    }
}

#[component]
fn StrikeRow(user_id: String, strike: Strike) -> Element {
    let api = use_api();
    let query = use_query_client();
    let mut snackbar = use_snackbar();
    let mut confirm = use_signal(|| false);

    let strike_id = strike.id.clone();
    let delete = move |_: MouseEvent| {
        if !confirm() {
            confirm.set(true);
            return;
        }
        let strike_id = strike_id.clone();
        let user_id = user_id.clone();
        spawn(async move {
            match api.client().delete_strike(&strike_id).await {
                Ok(_) => {
                    query.apply(&strikes::invalidates_after_strike_change(&user_id));
                    show_snackbar(&mut snackbar, Severity::Info, "Prikken ble slettet");
                }
                Err(e) => {
                    report_error(&mut snackbar, &e);
                }
            }
            confirm.set(false);
        });
    };

    let given = strike.created_at.as_ref().map(format_date).unwrap_or_default();
    let expires = strike.expires_at.as_ref().map(format_date).unwrap_or_default();
    let event_title = strike.event.as_ref().map(|e| e.title.clone());

    rsx! {
        div {
            class: "flex items-center gap-3 border-b border-neutral-100 pb-2",
            div {
                class: "flex flex-1 flex-col",
                span { "{strike.description}" }
                if let Some(title) = event_title {
                    span { class: "text-xs text-neutral-500", "{title}" }
                }
                span { class: "text-xs text-neutral-500", "{strike.strike_size} prikk(er) · gitt {given} · utløper {expires}" }
            }
            Button {
                variant: ButtonVariant::Destructive,
                onclick: delete,
                if confirm() { "Bekreft" } else { "Slett" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predefined_reason() {
        let draft = StrikeDraft {
            user_id: " olan ".to_string(),
            event_id: "12".to_string(),
            reason: Some(StrikeReason::NoShow),
            ..Default::default()
        };
        let body = draft.to_create().unwrap();
        assert_eq!(body.user_id, "olan");
        assert_eq!(body.event_id, Some(12));
        assert_eq!(body.kind, StrikeKind::Enum { r#enum: StrikeReason::NoShow });
    }

    #[test]
    fn test_custom_strike_needs_description_and_size() {
        let mut draft = StrikeDraft {
            user_id: "olan".to_string(),
            ..Default::default()
        };
        assert!(draft.to_create().is_err());
        draft.description = "Ødela utstyr".to_string();
        draft.strike_size = "0".to_string();
        assert!(draft.to_create().is_err());
        draft.strike_size = "2".to_string();
        assert_eq!(
            draft.to_create().unwrap().kind,
            StrikeKind::Custom { description: "Ødela utstyr".to_string(), strike_size: 2 }
        );
    }

    #[test]
    fn test_reason_select_values() {
        for reason in StrikeReason::ALL {
            assert_eq!(reason_from_value(&reason_value(Some(reason))), Some(reason));
        }
        assert_eq!(reason_from_value(CUSTOM_REASON), None);
    }
}
