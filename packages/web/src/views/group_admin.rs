//! Leader tools on the group page: editing the group, managing members,
//! writing laws and handing out fines. Members can also defend themselves
//! against their own fines here.

use api::models::{
    Group, GroupFine, GroupFineCreate, GroupFineDefenseMutate, GroupFineMutate,
    GroupFineStatistics, GroupLaw, GroupLawMutate, GroupMutate, Membership, MembershipType,
};
use api::resources::{groups, memberships};
use dioxus::prelude::*;
use store::Filters;
use ui::components::{Button, ButtonVariant, Input, LoadMore, ModalOverlay, Paper, Textarea};
use ui::{
    report_error, show_snackbar, use_api, use_paginated, use_query, use_query_client,
    use_snackbar, Severity,
};

use super::admin::{Checkbox, Field};
use super::{format_date, use_prop_signal, ErrorMessage, Loading};

fn optional(value: &str) -> Option<String> {
    match value.trim() {
        "" => None,
        value => Some(value.to_string()),
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
struct GroupDraft {
    name: String,
    description: String,
    contact_email: String,
    image: String,
    fines_activated: bool,
    fine_info: String,
    fines_admin: String,
}

impl GroupDraft {
    fn from_group(group: &Group) -> Self {
        GroupDraft {
            name: group.name.clone(),
            description: group.description.clone(),
            contact_email: group.contact_email.clone().unwrap_or_default(),
            image: group.image.clone().unwrap_or_default(),
            fines_activated: group.fines_activated,
            fine_info: group.fine_info.clone(),
            fines_admin: group
                .fines_admin
                .as_ref()
                .map(|u| u.user_id.clone())
                .unwrap_or_default(),
        }
    }

    /// Blank optional fields are cleared on the server. The image alt text
    /// is not editable here and is carried over from `group`.
    fn to_mutate(&self, group: &Group) -> Result<GroupMutate, &'static str> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Gruppen må ha et navn");
        }
        let contact_email = optional(&self.contact_email);
        if contact_email.as_deref().is_some_and(|e| !e.contains('@')) {
            return Err("Kontakt-e-posten er ugyldig");
        }
        Ok(GroupMutate {
            name: name.to_string(),
            description: self.description.clone(),
            contact_email,
            image: optional(&self.image),
            image_alt: group.image_alt.clone(),
            fines_activated: self.fines_activated,
            fine_info: self.fine_info.clone(),
            fines_admin: optional(&self.fines_admin),
        })
    }
}

#[component]
pub(super) fn EditGroup(group: Group) -> Element {
    let mut open = use_signal(|| false);

    rsx! {
        Button {
            variant: ButtonVariant::Outline,
            onclick: move |_| open.set(true),
            "Rediger gruppe"
        }
        if open() {
            EditGroupDialog { group, on_close: move |_| open.set(false) }
        }
    }
}

#[component]
fn EditGroupDialog(group: Group, on_close: EventHandler<()>) -> Element {
    let api = use_api();
    let query = use_query_client();
    let mut snackbar = use_snackbar();
    let initial = GroupDraft::from_group(&group);
    let mut draft = use_signal(move || initial);
    let mut saving = use_signal(|| false);
    let mut inline_error = use_signal(|| Option::<String>::None);
    let title = format!("Rediger {}", group.name);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let body = match draft.read().to_mutate(&group) {
            Ok(body) => body,
            Err(message) => {
                inline_error.set(Some(message.to_string()));
                return;
            }
        };
        let slug = group.slug.clone();
        spawn(async move {
            saving.set(true);
            match api.client().update_group(&slug, &body).await {
                Ok(updated) => {
                    query.set(groups::keys::detail(&slug), &updated);
                    query.apply(&groups::invalidates_after_group_update());
                    show_snackbar(&mut snackbar, Severity::Success, "Gruppen ble oppdatert");
                    on_close.call(());
                }
                Err(e) => inline_error.set(report_error(&mut snackbar, &e)),
            }
            saving.set(false);
        });
    };

    let d = draft();

    rsx! {
        ModalOverlay {
            title,
            on_close: move |_| on_close.call(()),
            form {
                class: "flex flex-col gap-3 p-4",
                onsubmit: handle_submit,
                Field { label: "Navn", html_for: "group-name",
                    Input { id: "group-name", value: d.name.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.name = e.value()) }
                }
                Field { label: "Beskrivelse", html_for: "group-description",
                    Textarea { id: "group-description", rows: 6, value: d.description.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.description = e.value()) }
                }
                Field { label: "Kontakt-e-post", html_for: "group-email",
                    Input { id: "group-email", r#type: "email", value: d.contact_email.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.contact_email = e.value()) }
                }
                Field { label: "Bilde-URL", html_for: "group-image",
                    Input { id: "group-image", value: d.image.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.image = e.value()) }
                }
                Checkbox {
                    label: "Bøter er aktivert",
                    checked: d.fines_activated,
                    on_change: move |v| draft.with_mut(|d| d.fines_activated = v),
                }
                if d.fines_activated {
                    Field { label: "Bøtesjef (brukernavn)", html_for: "group-fines-admin",
                        Input { id: "group-fines-admin", value: d.fines_admin.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.fines_admin = e.value()) }
                    }
                    Field { label: "Informasjon om bøter", html_for: "group-fine-info",
                        Textarea { id: "group-fine-info", rows: 3, value: d.fine_info.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.fine_info = e.value()) }
                    }
                }
                if let Some(err) = inline_error() {
                    div { class: "error-box", "{err}" }
                }
                Button { r#type: "submit", disabled: saving(), "Lagre" }
            }
        }
    }
}

#[component]
pub(super) fn AddMember(slug: String) -> Element {
    let api = use_api();
    let query = use_query_client();
    let mut snackbar = use_snackbar();
    let mut user_id = use_signal(String::new);
    let mut saving = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let new_member = user_id().trim().to_string();
        if new_member.is_empty() {
            return;
        }
        let slug = slug.clone();
        spawn(async move {
            saving.set(true);
            match api.client().create_membership(&slug, &new_member).await {
                Ok(membership) => {
                    query.apply(&memberships::invalidates_after_membership_change(&slug));
                    let message = format!("{} ble lagt til", membership.user.full_name());
                    show_snackbar(&mut snackbar, Severity::Success, &message);
                    user_id.set(String::new());
                }
                Err(e) => {
                    report_error(&mut snackbar, &e);
                }
            }
            saving.set(false);
        });
    };

    rsx! {
        form {
            class: "mb-3 flex items-center gap-2",
            onsubmit: handle_submit,
            Input {
                class: "flex-1",
                placeholder: "Brukernavn på nytt medlem",
                value: user_id(),
                oninput: move |evt: FormEvent| user_id.set(evt.value()),
            }
            Button { r#type: "submit", disabled: saving(), "Legg til" }
        }
    }
}

fn toggled(membership_type: MembershipType) -> MembershipType {
    match membership_type {
        MembershipType::Leader => MembershipType::Member,
        MembershipType::Member => MembershipType::Leader,
    }
}

#[component]
pub(super) fn MemberActions(slug: String, membership: Membership) -> Element {
    let api = use_api();
    let query = use_query_client();
    let mut snackbar = use_snackbar();
    let mut busy = use_signal(|| false);
    let mut confirm_delete = use_signal(|| false);

    let user_id = membership.user.user_id.clone();
    let next = toggled(membership.membership_type);

    let promote = {
        let slug = slug.clone();
        let user_id = user_id.clone();
        move |_: MouseEvent| {
            let slug = slug.clone();
            let user_id = user_id.clone();
            spawn(async move {
                busy.set(true);
                match api.client().update_membership(&slug, &user_id, next).await {
                    Ok(_) => query.apply(&memberships::invalidates_after_membership_update(&slug)),
                    Err(e) => {
                        report_error(&mut snackbar, &e);
                    }
                }
                busy.set(false);
            });
        }
    };

    let remove = move |_: MouseEvent| {
        if !confirm_delete() {
            confirm_delete.set(true);
            return;
        }
        let slug = slug.clone();
        let user_id = user_id.clone();
        spawn(async move {
            busy.set(true);
            match api.client().delete_membership(&slug, &user_id).await {
                Ok(_) => {
                    query.apply(&memberships::invalidates_after_membership_change(&slug));
                    show_snackbar(&mut snackbar, Severity::Info, "Medlemmet ble fjernet");
                }
                Err(e) => {
                    report_error(&mut snackbar, &e);
                }
            }
            confirm_delete.set(false);
            busy.set(false);
        });
    };

    let promote_label = match next {
        MembershipType::Leader => "Gjør til leder",
        MembershipType::Member => "Gjør til medlem",
    };

    rsx! {
        div {
            class: "flex gap-2",
            Button { variant: ButtonVariant::Ghost, disabled: busy(), onclick: promote, "{promote_label}" }
            Button {
                variant: ButtonVariant::Destructive,
                disabled: busy(),
                onclick: remove,
                if confirm_delete() { "Bekreft" } else { "Fjern" }
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
struct LawDraft {
    paragraph: String,
    title: String,
    description: String,
    amount: String,
}

impl LawDraft {
    /// Whole paragraphs are headings and carry no fine.
    fn to_mutate(&self) -> Result<GroupLawMutate, &'static str> {
        let paragraph = self
            .paragraph
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p > 0.0)
            .ok_or("Paragrafen må være et positivt tall, for eksempel 2.1")?;
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Loven må ha en tittel");
        }
        let amount = if paragraph.fract() == 0.0 {
            0
        } else {
            match self.amount.trim() {
                "" => 0,
                value => value.parse::<u32>().map_err(|_| "Antall bøter må være et heltall")?,
            }
        };
        Ok(GroupLawMutate {
            paragraph,
            title: title.to_string(),
            description: self.description.trim().to_string(),
            amount,
        })
    }
}

#[component]
pub(super) fn NewLaw(slug: String) -> Element {
    let api = use_api();
    let query = use_query_client();
    let mut snackbar = use_snackbar();
    let mut draft = use_signal(LawDraft::default);
    let mut saving = use_signal(|| false);
    let mut inline_error = use_signal(|| Option::<String>::None);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let body = match draft.read().to_mutate() {
            Ok(body) => body,
            Err(message) => {
                inline_error.set(Some(message.to_string()));
                return;
            }
        };
        let slug = slug.clone();
        spawn(async move {
            saving.set(true);
            match api.client().create_group_law(&slug, &body).await {
                Ok(_) => {
                    query.apply(&groups::invalidates_after_law_change(&slug));
                    show_snackbar(&mut snackbar, Severity::Success, "Loven ble lagt til");
                    draft.set(LawDraft::default());
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
                h3 { class: "m-0 text-base font-semibold", "Ny lov" }
                div {
                    class: "grid gap-3 md:grid-cols-[8rem_1fr_8rem]",
                    Field { label: "Paragraf", html_for: "law-paragraph",
                        Input { id: "law-paragraph", value: d.paragraph.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.paragraph = e.value()) }
                    }
                    Field { label: "Tittel", html_for: "law-title",
                        Input { id: "law-title", value: d.title.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.title = e.value()) }
                    }
                    Field { label: "Bøter", html_for: "law-amount",
                        Input { id: "law-amount", r#type: "number", value: d.amount.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.amount = e.value()) }
                    }
                }
                Field { label: "Beskrivelse", html_for: "law-description",
                    Textarea { id: "law-description", rows: 2, value: d.description.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.description = e.value()) }
                }
                if let Some(err) = inline_error() {
                    div { class: "error-box", "{err}" }
                }
                Button { r#type: "submit", disabled: saving(), "Legg til lov" }
            }
        }
    }
}

#[component]
pub(super) fn DeleteLaw(slug: String, law_id: String) -> Element {
    let api = use_api();
    let query = use_query_client();
    let mut snackbar = use_snackbar();
    let mut confirm = use_signal(|| false);

    let delete = move |_: MouseEvent| {
        if !confirm() {
            confirm.set(true);
            return;
        }
        let slug = slug.clone();
        let law_id = law_id.clone();
        spawn(async move {
            match api.client().delete_group_law(&slug, &law_id).await {
                Ok(_) => {
                    query.apply(&groups::invalidates_after_law_change(&slug));
                    show_snackbar(&mut snackbar, Severity::Info, "Loven ble slettet");
                }
                Err(e) => {
                    report_error(&mut snackbar, &e);
                }
            }
            confirm.set(false);
        });
    };

    rsx! {
        Button {
            variant: ButtonVariant::Ghost,
            onclick: delete,
            if confirm() { "Bekreft" } else { "Slett" }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
struct FineDraft {
    /// Space or comma separated user ids.
    users: String,
    law_id: String,
    amount: String,
    reason: String,
}

impl FineDraft {
    /// Picking a law fills in its amount; the law title becomes the
    /// description of the fine.
    fn choose_law(&mut self, laws: &[GroupLaw], law_id: &str) {
        self.law_id = law_id.to_string();
        if let Some(law) = laws.iter().find(|l| l.id == law_id) {
            self.amount = law.amount.to_string();
        }
    }

    fn to_create(&self, laws: &[GroupLaw]) -> Result<GroupFineCreate, &'static str> {
        let user: Vec<String> = self
            .users
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .collect();
        if user.is_empty() {
            return Err("Velg minst én person som skal få boten");
        }
        let law = laws
            .iter()
            .find(|l| l.id == self.law_id)
            .ok_or("Velg hvilken lov som er brutt")?;
        let amount = self
            .amount
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|a| *a > 0)
            .ok_or("Antall bøter må være et positivt heltall")?;
        Ok(GroupFineCreate {
            user,
            amount,
            description: format!("§{} {}", law.paragraph, law.title),
            reason: self.reason.trim().to_string(),
            image: None,
        })
    }
}

#[component]
pub(super) fn NewFine(slug: String) -> Element {
    let slug = use_prop_signal(slug);
    let api = use_api();
    let laws = use_query(
        move || groups::keys::laws(&slug()),
        move || {
            let slug = slug();
            let client = api.client();
            async move { client.get_group_laws(&slug).await }
        },
    );

    let laws = match &*laws.read() {
        Some(Ok(laws)) => laws.clone(),
        // The law tab shows the load state
        _ => return rsx! {},
    };
    rsx! { FineForm { slug: slug(), laws } }
}

#[component]
fn FineForm(slug: String, laws: Vec<GroupLaw>) -> Element {
    let api = use_api();
    let query = use_query_client();
    let mut snackbar = use_snackbar();
    let mut draft = use_signal(FineDraft::default);
    let mut saving = use_signal(|| false);
    let mut inline_error = use_signal(|| Option::<String>::None);

    let fineable: Vec<GroupLaw> = laws.into_iter().filter(|l| !l.is_heading()).collect();
    let choices = fineable.clone();

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let body = match draft.read().to_create(&fineable) {
            Ok(body) => body,
            Err(message) => {
                inline_error.set(Some(message.to_string()));
                return;
            }
        };
        let slug = slug.clone();
        spawn(async move {
            saving.set(true);
            match api.client().create_group_fine(&slug, &body).await {
                Ok(_) => {
                    query.apply(&groups::invalidates_after_fine_change(&slug));
                    show_snackbar(&mut snackbar, Severity::Success, "Boten ble registrert");
                    draft.set(FineDraft::default());
                    inline_error.set(None);
                }
                Err(e) => inline_error.set(report_error(&mut snackbar, &e)),
            }
            saving.set(false);
        });
    };

    let d = draft();
    let options = choices.clone();

    rsx! {
        Paper {
            form {
                class: "flex flex-col gap-3",
                onsubmit: handle_submit,
                h3 { class: "m-0 text-base font-semibold", "Gi bot" }
                Field { label: "Brukernavn", html_for: "fine-users",
                    Input { id: "fine-users", placeholder: "olan, karin", value: d.users.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.users = e.value()) }
                }
                Field { label: "Lov", html_for: "fine-law",
                    select {
                        id: "fine-law",
                        class: "border border-neutral-300 rounded px-2 py-2 text-sm",
                        onchange: move |e: FormEvent| draft.with_mut(|d| d.choose_law(&choices, &e.value())),
                        option { value: "", selected: d.law_id.is_empty(), "Velg lov" }
                        for law in options {
                            option {
                                key: "{law.id}",
                                value: law.id.clone(),
                                selected: d.law_id == law.id,
                                "§{law.paragraph} {law.title}"
                            }
                        }
                    }
                }
                Field { label: "Antall bøter", html_for: "fine-amount",
                    Input { id: "fine-amount", r#type: "number", value: d.amount.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.amount = e.value()) }
                }
                Field { label: "Begrunnelse", html_for: "fine-reason",
                    Textarea { id: "fine-reason", rows: 2, value: d.reason.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.reason = e.value()) }
                }
                if let Some(err) = inline_error() {
                    div { class: "error-box", "{err}" }
                }
                Button { r#type: "submit", disabled: saving(), "Gi bot" }
            }
        }
    }
}

/// Where a fine is in its life: given, approved by the fines admin, paid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FineStage {
    NotApproved,
    Approved,
    Payed,
}

impl FineStage {
    const ALL: [FineStage; 3] = [FineStage::NotApproved, FineStage::Approved, FineStage::Payed];

    fn label(self, stats: Option<&GroupFineStatistics>) -> String {
        let (title, count) = match self {
            FineStage::NotApproved => ("Ikke godkjent", stats.map(|s| s.not_approved)),
            FineStage::Approved => ("Ikke betalt", stats.map(|s| s.approved_and_not_payed)),
            FineStage::Payed => ("Betalt", stats.map(|s| s.payed)),
        };
        match count {
            Some(count) => format!("{title} ({count})"),
            None => title.to_string(),
        }
    }

    fn filters(self) -> Filters {
        match self {
            FineStage::NotApproved => Filters::new().with("approved", false).with("payed", false),
            FineStage::Approved => Filters::new().with("approved", true).with("payed", false),
            FineStage::Payed => Filters::new().with("payed", true),
        }
    }

    /// The change that moves a fine on, and its button text.
    fn advance(self) -> Option<(GroupFineMutate, &'static str)> {
        match self {
            FineStage::NotApproved => Some((
                GroupFineMutate { approved: Some(true), ..Default::default() },
                "Godkjenn",
            )),
            FineStage::Approved => Some((
                GroupFineMutate { payed: Some(true), ..Default::default() },
                "Marker som betalt",
            )),
            FineStage::Payed => None,
        }
    }
}

/// Every fine in the group, by stage, for the fines admin.
#[component]
pub(super) fn FineAdmin(slug: String) -> Element {
    let slug = use_prop_signal(slug);
    let api = use_api();
    let mut stage = use_signal(|| FineStage::NotApproved);

    let stats = use_query(
        move || groups::keys::fines_statistics(&slug()),
        move || {
            let slug = slug();
            let client = api.client();
            async move { client.get_group_fines_statistics(&slug).await }
        },
    );
    let list = use_paginated(
        move || groups::keys::fines_list(&slug(), &stage().filters()),
        move |page| {
            let slug = slug.peek().clone();
            let filters = stage.peek().filters().page(page);
            let client = api.client();
            async move { client.get_group_fines(&slug, &filters).await }
        },
    );

    let stats = match &*stats.read() {
        Some(Ok(stats)) => Some(stats.clone()),
        _ => None,
    };

    rsx! {
        div {
            class: "mb-4 flex flex-col gap-2",
            h3 { class: "m-0 text-base font-semibold", "Alle bøter" }
            div {
                class: "tab-bar",
                for s in FineStage::ALL {
                    button {
                        class: if s == stage() { "tab active" } else { "tab" },
                        onclick: move |_| stage.set(s),
                        {s.label(stats.as_ref())}
                    }
                }
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
                    empty_text: "Ingen bøter her",
                    on_load_more: move |_| list.load_more(),
                    div {
                        class: "flex flex-col gap-2",
                        for fine in list.items() {
                            FineAdminRow { key: "{fine.id}", slug: slug(), stage: stage(), fine }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn FineAdminRow(slug: String, stage: FineStage, fine: GroupFine) -> Element {
    let api = use_api();
    let query = use_query_client();
    let mut snackbar = use_snackbar();
    let mut busy = use_signal(|| false);
    let mut confirm_delete = use_signal(|| false);

    let advance = stage.advance();
    let fine_id = fine.id.clone();

    let move_on = {
        let slug = slug.clone();
        let fine_id = fine_id.clone();
        let change = advance.as_ref().map(|(change, _)| change.clone());
        move |_: MouseEvent| {
            let Some(change) = change.clone() else {
                return;
            };
            let slug = slug.clone();
            let fine_id = fine_id.clone();
            spawn(async move {
                busy.set(true);
                match api.client().update_group_fine(&slug, &fine_id, &change).await {
                    Ok(_) => query.apply(&groups::invalidates_after_fine_change(&slug)),
                    Err(e) => {
                        report_error(&mut snackbar, &e);
                    }
                }
                busy.set(false);
            });
        }
    };

    let remove = move |_: MouseEvent| {
        if !confirm_delete() {
            confirm_delete.set(true);
            return;
        }
        let slug = slug.clone();
        let fine_id = fine_id.clone();
        spawn(async move {
            busy.set(true);
            match api.client().delete_group_fine(&slug, &fine_id).await {
                Ok(_) => {
                    query.apply(&groups::invalidates_after_fine_change(&slug));
                    show_snackbar(&mut snackbar, Severity::Info, "Boten ble slettet");
                }
                Err(e) => {
                    report_error(&mut snackbar, &e);
                }
            }
            confirm_delete.set(false);
            busy.set(false);
        });
    };

    let given = fine.created_at.as_ref().map(format_date).unwrap_or_default();
    let given_by = fine.created_by.as_ref().map(|u| u.full_name()).unwrap_or_default();

    rsx! {
        Paper {
            class: "flex flex-wrap items-start gap-3 text-sm",
            div {
                class: "flex flex-1 flex-col gap-1 min-w-0",
                div {
                    class: "flex justify-between font-medium",
                    span { {fine.user.full_name()} }
                    span { "{fine.amount} bøter" }
                }
                span { "{fine.description}" }
                if !fine.reason.is_empty() {
                    span { class: "text-neutral-600", "{fine.reason}" }
                }
                if !fine.defense.is_empty() {
                    span { class: "text-neutral-600", "Forsvar: {fine.defense}" }
                }
                span { class: "text-xs text-neutral-500", "Gitt {given} av {given_by}" }
            }
            if let Some((_, text)) = advance {
                Button { variant: ButtonVariant::Outline, disabled: busy(), onclick: move_on, "{text}" }
            }
            Button {
                variant: ButtonVariant::Destructive,
                disabled: busy(),
                onclick: remove,
                if confirm_delete() { "Bekreft" } else { "Slett" }
            }
        }
    }
}

/// The fined user's own defense. Only open until the fine is approved.
#[component]
pub(super) fn FineDefense(slug: String, fine: GroupFine) -> Element {
    let api = use_api();
    let query = use_query_client();
    let mut snackbar = use_snackbar();
    let saved = fine.defense.clone();
    let mut defense = use_signal(move || saved);
    let mut saving = use_signal(|| false);

    if fine.approved {
        return rsx! {
            if !fine.defense.is_empty() {
                span { class: "text-neutral-600", "Forsvar: {fine.defense}" }
            }
        };
    }

    let fine_id = fine.id.clone();
    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let body = GroupFineDefenseMutate {
            defense: defense().trim().to_string(),
        };
        let slug = slug.clone();
        let fine_id = fine_id.clone();
        spawn(async move {
            saving.set(true);
            match api.client().update_group_fine_defense(&slug, &fine_id, &body).await {
                Ok(_) => {
                    query.apply(&groups::invalidates_after_fine_change(&slug));
                    show_snackbar(&mut snackbar, Severity::Success, "Forsvaret ble lagret");
                }
                Err(e) => {
                    report_error(&mut snackbar, &e);
                }
            }
            saving.set(false);
        });
    };

    let unchanged = defense().trim() == fine.defense.trim();

    rsx! {
        form {
            class: "flex flex-col gap-2",
            onsubmit: handle_submit,
            Textarea {
                rows: 2,
                placeholder: "Skriv et forsvar",
                value: defense(),
                oninput: move |evt: FormEvent| defense.set(evt.value()),
            }
            Button {
                r#type: "submit",
                variant: ButtonVariant::Outline,
                disabled: saving() || unchanged,
                "Lagre forsvar"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::models::UserBase;

    fn law(id: &str, paragraph: f64, amount: u32) -> GroupLaw {
        GroupLaw {
            id: id.to_string(),
            paragraph,
            title: format!("Lov {id}"),
            amount,
            ..Default::default()
        }
    }

    #[test]
    fn test_group_draft_clears_blank_fields() {
        let group = Group {
            slug: "index".to_string(),
            name: "Index".to_string(),
            contact_email: Some("index@tihlde.org".to_string()),
            image_alt: Some("Logo".to_string()),
            fines_admin: Some(UserBase { user_id: "olan".to_string(), ..Default::default() }),
            ..Default::default()
        };
        let mut draft = GroupDraft::from_group(&group);
        assert_eq!(draft.fines_admin, "olan");

        draft.contact_email = "  ".to_string();
        draft.fines_admin = String::new();
        let body = draft.to_mutate(&group).unwrap();
        assert_eq!(body.contact_email, None);
        assert_eq!(body.fines_admin, None);
        assert_eq!(body.image_alt.as_deref(), Some("Logo"));

        draft.name = " ".to_string();
        assert_eq!(draft.to_mutate(&group), Err("Gruppen må ha et navn"));
        draft.name = "Index".to_string();
        draft.contact_email = "index".to_string();
        assert_eq!(draft.to_mutate(&group), Err("Kontakt-e-posten er ugyldig"));
    }

    #[test]
    fn test_membership_toggle() {
        assert_eq!(toggled(MembershipType::Member), MembershipType::Leader);
        assert_eq!(toggled(MembershipType::Leader), MembershipType::Member);
    }

    #[test]
    fn test_law_headings_carry_no_fine() {
        let draft = LawDraft {
            paragraph: "3".to_string(),
            title: "Oppførsel".to_string(),
            amount: "5".to_string(),
            ..Default::default()
        };
        let body = draft.to_mutate().unwrap();
        assert_eq!(body.paragraph, 3.0);
        assert_eq!(body.amount, 0);

        let draft = LawDraft {
            paragraph: "3,2".to_string(),
            title: "For sent".to_string(),
            amount: "2".to_string(),
            ..Default::default()
        };
        let body = draft.to_mutate().unwrap();
        assert_eq!(body.paragraph, 3.2);
        assert_eq!(body.amount, 2);

        let draft = LawDraft { paragraph: "x".to_string(), title: "A".to_string(), ..Default::default() };
        assert!(draft.to_mutate().is_err());
    }

    #[test]
    fn test_fine_stages() {
        assert_eq!(FineStage::NotApproved.filters().get("approved"), Some("false"));
        assert_eq!(FineStage::Approved.filters().get("payed"), Some("false"));
        assert_eq!(FineStage::Payed.filters().get("approved"), None);

        let (change, _) = FineStage::NotApproved.advance().unwrap();
        assert_eq!(change.approved, Some(true));
        assert_eq!(change.payed, None);
        let (change, _) = FineStage::Approved.advance().unwrap();
        assert_eq!(change.payed, Some(true));
        assert!(FineStage::Payed.advance().is_none());

        let stats = GroupFineStatistics { not_approved: 3, approved_and_not_payed: 1, payed: 7 };
        assert_eq!(FineStage::NotApproved.label(Some(&stats)), "Ikke godkjent (3)");
        assert_eq!(FineStage::Payed.label(None), "Betalt");
        assert_ne!(
            groups::keys::fines_list("index", &FineStage::Approved.filters()),
            groups::keys::fines_list("index", &FineStage::Payed.filters())
        );
    }

    #[test]
    fn test_fine_from_law() {
        let laws = vec![law("a", 1.1, 2), law("b", 1.2, 3)];
        let mut draft = FineDraft { users: "olan, karin  per".to_string(), ..Default::default() };
        assert_eq!(draft.to_create(&laws), Err("Velg hvilken lov som er brutt"));

        draft.choose_law(&laws, "b");
        assert_eq!(draft.amount, "3");
        let body = draft.to_create(&laws).unwrap();
        assert_eq!(body.user, vec!["olan", "karin", "per"]);
        assert_eq!(body.amount, 3);
        assert_eq!(body.description, "§1.2 Lov b");

        draft.users = " , ".to_string();
        assert_eq!(draft.to_create(&laws), Err("Velg minst én person som skal få boten"));
    }
}
