//! The settings tab on the profile: personal details, notification channels,
//! badge flags, data export and account deletion.

use api::models::{NotificationSetting, NotificationSettingChoice, User, UserUpdate};
use api::resources::{badges, users};
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Input, Paper};
use ui::{
    log_out, report_error, show_snackbar, use_api, use_auth, use_query, use_query_client,
    use_snackbar, Severity,
};

use super::admin::{Checkbox, Field};
use super::{use_prop_signal, ErrorMessage, Loading};
use crate::Route;

#[derive(Clone, Debug, Default, PartialEq)]
struct ProfileDraft {
    first_name: String,
    last_name: String,
    email: String,
    cell: String,
    allergy: String,
    tool: String,
    public_event_registrations: bool,
}

impl ProfileDraft {
    fn from_user(user: &User) -> Self {
        ProfileDraft {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            cell: user.cell.clone(),
            allergy: user.allergy.clone(),
            tool: user.tool.clone(),
            public_event_registrations: user.public_event_registrations,
        }
    }

    /// Only the fields that differ from `user` are sent.
    fn to_update(&self, user: &User) -> Result<UserUpdate, &'static str> {
        fn changed(new: &str, old: &str) -> Option<String> {
            let new = new.trim();
            (new != old).then(|| new.to_string())
        }

        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err("Fornavn og etternavn kan ikke være tomme");
        }
        if !self.email.contains('@') {
            return Err("Skriv inn en gyldig e-postadresse");
        }
        let update = UserUpdate {
            first_name: changed(&self.first_name, &user.first_name),
            last_name: changed(&self.last_name, &user.last_name),
            email: changed(&self.email, &user.email),
            cell: changed(&self.cell, &user.cell),
            allergy: changed(&self.allergy, &user.allergy),
            tool: changed(&self.tool, &user.tool),
            public_event_registrations: (self.public_event_registrations
                != user.public_event_registrations)
                .then_some(self.public_event_registrations),
            ..Default::default()
        };
        if update == UserUpdate::default() {
            return Err("Ingen endringer å lagre");
        }
        Ok(update)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Channel {
    Email,
    Website,
    Slack,
}

impl Channel {
    const ALL: [Channel; 3] = [Channel::Email, Channel::Website, Channel::Slack];

    fn label(self) -> &'static str {
        match self {
            Channel::Email => "E-post",
            Channel::Website => "Nettside",
            Channel::Slack => "Slack",
        }
    }

    fn get(self, setting: &NotificationSetting) -> bool {
        match self {
            Channel::Email => setting.email,
            Channel::Website => setting.website,
            Channel::Slack => setting.slack,
        }
    }

    fn set(self, setting: &mut NotificationSetting, on: bool) {
        match self {
            Channel::Email => setting.email = on,
            Channel::Website => setting.website = on,
            Channel::Slack => setting.slack = on,
        }
    }
}

/// One row per notification type. Types the user never touched are on for
/// email and the website and off for Slack.
fn setting_rows(
    choices: &[NotificationSettingChoice],
    settings: &[NotificationSetting],
) -> Vec<(NotificationSettingChoice, NotificationSetting)> {
    choices
        .iter()
        .map(|choice| {
            let setting = settings
                .iter()
                .find(|s| s.notification_type == choice.notification_type)
                .cloned()
                .unwrap_or_else(|| NotificationSetting {
                    notification_type: choice.notification_type.clone(),
                    email: true,
                    website: true,
                    slack: false,
                });
            (choice.clone(), setting)
        })
        .collect()
}

#[component]
pub(super) fn ProfileSettings(user: User) -> Element {
    let linked_slack = user.slack_user_id.is_some();

    rsx! {
        div {
            class: "flex flex-col gap-4",
            EditProfile { user }
            NotificationSettings { linked_slack }
            ClaimBadge {}
            AccountActions {}
        }
    }
}

#[component]
fn EditProfile(user: User) -> Element {
    let api = use_api();
    let query = use_query_client();
    let mut auth = use_auth();
    let mut snackbar = use_snackbar();
    let initial = ProfileDraft::from_user(&user);
    let mut draft = use_signal(move || initial);
    let mut saving = use_signal(|| false);
    let mut inline_error = use_signal(|| Option::<String>::None);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let body = match draft.read().to_update(&user) {
            Ok(body) => body,
            Err(message) => {
                inline_error.set(Some(message.to_string()));
                return;
            }
        };
        let user_id = user.user_id.clone();
        spawn(async move {
            saving.set(true);
            match api.client().update_user(&user_id, &body).await {
                Ok(updated) => {
                    query.set(users::keys::me(), &updated);
                    query.apply(&users::invalidates_after_user_update());
                    auth.with_mut(|state| state.user = Some(updated));
                    show_snackbar(&mut snackbar, Severity::Success, "Profilen ble oppdatert");
                    inline_error.set(None);
                }
                Err(e) => inline_error.set(report_error(&mut snackbar, &e)),
            }
            saving.set(false);
        });
    };

    let d = draft();

    rsx! {
        Paper {
            form {
                class: "flex flex-col gap-3",
                onsubmit: handle_submit,
                h3 { class: "m-0 text-base font-semibold", "Profil" }
                div {
                    class: "grid gap-3 md:grid-cols-2",
                    Field { label: "Fornavn", html_for: "profile-first",
                        Input { id: "profile-first", value: d.first_name.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.first_name = e.value()) }
                    }
                    Field { label: "Etternavn", html_for: "profile-last",
                        Input { id: "profile-last", value: d.last_name.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.last_name = e.value()) }
                    }
                    Field { label: "E-post", html_for: "profile-email",
                        Input { id: "profile-email", r#type: "email", value: d.email.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.email = e.value()) }
                    }
                    Field { label: "Mobil", html_for: "profile-cell",
                        Input { id: "profile-cell", r#type: "tel", value: d.cell.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.cell = e.value()) }
                    }
                    Field { label: "Allergier", html_for: "profile-allergy",
                        Input { id: "profile-allergy", value: d.allergy.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.allergy = e.value()) }
                    }
                    Field { label: "Kjøkkenredskap", html_for: "profile-tool",
                        Input { id: "profile-tool", value: d.tool.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.tool = e.value()) }
                    }
                }
                Checkbox {
                    label: "Vis navnet mitt på offentlige deltakerlister",
                    checked: d.public_event_registrations,
                    on_change: move |v| draft.with_mut(|d| d.public_event_registrations = v),
                }
                if let Some(err) = inline_error() {
                    div { class: "error-box", "{err}" }
                }
                Button { r#type: "submit", disabled: saving(), "Lagre profil" }
            }
        }
    }
}

#[component]
fn NotificationSettings(linked_slack: bool) -> Element {
    let api = use_api();

    let choices = use_query(users::keys::notification_setting_choices, move || {
        let client = api.client();
        async move { client.get_notification_setting_choices().await }
    });
    let settings = use_query(users::keys::notification_settings, move || {
        let client = api.client();
        async move { client.get_notification_settings().await }
    });

    let rows = match (&*choices.read(), &*settings.read()) {
        (Some(Err(error)), _) | (_, Some(Err(error))) => {
            return rsx! { ErrorMessage { error: error.clone() } };
        }
        (Some(Ok(choices)), Some(Ok(settings))) => setting_rows(choices, settings),
        _ => return rsx! { Loading {} },
    };

    let channels: Vec<Channel> = Channel::ALL
        .into_iter()
        .filter(|c| *c != Channel::Slack || linked_slack)
        .collect();

    rsx! {
        Paper {
            class: "flex flex-col gap-2",
            h3 { class: "m-0 text-base font-semibold", "Varsler" }
            if !linked_slack {
                p { class: "m-0 text-xs text-neutral-500", "Koble til Slack for å få varsler der." }
            }
            for (choice, setting) in rows {
                SettingRow {
                    key: "{choice.notification_type}",
                    label: choice.label,
                    setting,
                    channels: channels.clone(),
                }
            }
        }
    }
}

#[component]
fn SettingRow(label: String, setting: NotificationSetting, channels: Vec<Channel>) -> Element {
    let api = use_api();
    let query = use_query_client();
    let mut snackbar = use_snackbar();
    let setting = use_prop_signal(setting);

    let save = move |channel: Channel, on: bool| {
        let mut next = setting();
        channel.set(&mut next, on);
        spawn(async move {
            match api.client().update_notification_settings(&next).await {
                Ok(list) => query.set(users::keys::notification_settings(), &list),
                Err(e) => {
                    report_error(&mut snackbar, &e);
                }
            }
        });
    };

    rsx! {
        div {
            class: "flex flex-wrap items-center gap-4 border-b border-neutral-100 py-1 text-sm",
            span { class: "flex-1", "{label}" }
            for channel in channels {
                Checkbox {
                    key: "{channel.label()}",
                    label: channel.label().to_string(),
                    checked: channel.get(&setting.read()),
                    on_change: move |on| save(channel, on),
                }
            }
        }
    }
}

#[component]
fn ClaimBadge() -> Element {
    let api = use_api();
    let query = use_query_client();
    let mut snackbar = use_snackbar();
    let mut flag = use_signal(String::new);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let value = flag().trim().to_string();
        if value.is_empty() {
            return;
        }
        spawn(async move {
            match api.client().create_user_badge(&value).await {
                Ok(badge) => {
                    query.apply(&badges::invalidates_after_badge_claim());
                    let message = format!("Du fikk badgen «{}»", badge.title);
                    show_snackbar(&mut snackbar, Severity::Success, &message);
                    flag.set(String::new());
                }
                Err(e) => {
                    report_error(&mut snackbar, &e);
                }
            }
        });
    };

    rsx! {
        Paper {
            form {
                class: "flex flex-col gap-2",
                onsubmit: handle_submit,
                h3 { class: "m-0 text-base font-semibold", "Har du funnet et flagg?" }
                div {
                    class: "flex gap-2",
                    Input {
                        class: "flex-1",
                        placeholder: "flag{{...}}",
                        value: flag(),
                        oninput: move |evt: FormEvent| flag.set(evt.value()),
                    }
                    Button { r#type: "submit", "Løs inn" }
                }
            }
        }
    }
}

#[component]
fn AccountActions() -> Element {
    let api = use_api();
    let query = use_query_client();
    let auth = use_auth();
    let nav = use_navigator();
    let mut snackbar = use_snackbar();
    let mut confirm_delete = use_signal(|| false);
    let mut busy = use_signal(|| false);

    let export = move |_: MouseEvent| {
        spawn(async move {
            busy.set(true);
            match api.client().export_user_data().await {
                Ok(response) => show_snackbar(&mut snackbar, Severity::Success, &response.detail),
                Err(e) => {
                    report_error(&mut snackbar, &e);
                }
            }
            busy.set(false);
        });
    };

    let delete = move |_: MouseEvent| {
        if !confirm_delete() {
            confirm_delete.set(true);
            return;
        }
        spawn(async move {
            busy.set(true);
            match api.client().delete_user(None).await {
                Ok(_) => {
                    tracing::info!("Account deleted");
                    log_out(auth, query);
                    show_snackbar(&mut snackbar, Severity::Info, "Brukeren din er slettet");
                    nav.replace(Route::Landing {});
                }
                Err(e) => {
                    report_error(&mut snackbar, &e);
                    busy.set(false);
                }
            }
            confirm_delete.set(false);
        });
    };

    rsx! {
        Paper {
            class: "flex flex-col gap-2",
            h3 { class: "m-0 text-base font-semibold", "Dine data" }
            p { class: "m-0 text-sm text-neutral-600", "Få tilsendt alt vi har lagret om deg på e-post, eller slett brukeren din for godt." }
            div {
                class: "flex flex-wrap gap-2",
                Button { variant: ButtonVariant::Outline, disabled: busy(), onclick: export, "Last ned dataene mine" }
                Button {
                    variant: ButtonVariant::Destructive,
                    disabled: busy(),
                    onclick: delete,
                    if confirm_delete() { "Bekreft sletting" } else { "Slett brukeren" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            user_id: "olan".to_string(),
            first_name: "Ola".to_string(),
            last_name: "Nordmann".to_string(),
            email: "ola@stud.ntnu.no".to_string(),
            allergy: "Nøtter".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_profile_update_sends_only_changes() {
        let user = user();
        let mut draft = ProfileDraft::from_user(&user);
        assert_eq!(draft.to_update(&user), Err("Ingen endringer å lagre"));

        draft.allergy = " ".to_string();
        draft.public_event_registrations = true;
        let update = draft.to_update(&user).unwrap();
        assert_eq!(update.allergy.as_deref(), Some(""));
        assert_eq!(update.public_event_registrations, Some(true));
        assert_eq!(update.first_name, None);
        assert_eq!(update.email, None);
    }

    #[test]
    fn test_profile_update_validates() {
        let user = user();
        let mut draft = ProfileDraft::from_user(&user);
        draft.email = "ola".to_string();
        assert_eq!(draft.to_update(&user), Err("Skriv inn en gyldig e-postadresse"));
        draft.email = user.email.clone();
        draft.first_name = String::new();
        assert!(draft.to_update(&user).is_err());
    }

    #[test]
    fn test_setting_rows_default_untouched_types() {
        let choices = vec![
            NotificationSettingChoice { notification_type: "EVENT_INFO".to_string(), label: "Info".to_string() },
            NotificationSettingChoice { notification_type: "STRIKE".to_string(), label: "Prikker".to_string() },
        ];
        let settings = vec![NotificationSetting {
            notification_type: "STRIKE".to_string(),
            email: false,
            website: true,
            slack: true,
        }];
        let rows = setting_rows(&choices, &settings);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].1.email && rows[0].1.website && !rows[0].1.slack);
        assert_eq!(rows[1].1, settings[0]);

        let mut setting = rows[0].1.clone();
        Channel::Slack.set(&mut setting, true);
        assert!(Channel::Slack.get(&setting));
        assert_eq!(setting.notification_type, "EVENT_INFO");
    }
}
