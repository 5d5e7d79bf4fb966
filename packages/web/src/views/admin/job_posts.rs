use api::models::{JobPost, JobPostMutate, JobPostType};
use api::resources::job_posts;
use dioxus::prelude::*;
use store::Filters;
use ui::components::{Button, ButtonVariant, Input, LoadMore, Paper, Textarea};
use ui::{
    report_error, show_snackbar, use_api, use_paginated, use_query, use_query_client, use_snackbar,
    Severity,
};

use super::{use_draft, AdminPage, Checkbox, Field, JOB_POST_ADMIN};
use crate::views::{parse_input_datetime, to_input_datetime, use_prop_signal, ErrorMessage, Loading};

const CLASSES: [u8; 5] = [1, 2, 3, 4, 5];

#[derive(Clone, Debug, PartialEq)]
struct JobPostDraft {
    title: String,
    ingress: String,
    body: String,
    company: String,
    location: String,
    email: String,
    link: String,
    image: String,
    image_alt: String,
    deadline: String,
    is_continuously_hiring: bool,
    job_type: JobPostType,
    class_start: u8,
    class_end: u8,
}

impl Default for JobPostDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            ingress: String::new(),
            body: String::new(),
            company: String::new(),
            location: String::new(),
            email: String::new(),
            link: String::new(),
            image: String::new(),
            image_alt: String::new(),
            deadline: String::new(),
            is_continuously_hiring: false,
            job_type: JobPostType::default(),
            class_start: 1,
            class_end: 5,
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl JobPostDraft {
    fn from_post(post: &JobPost) -> Self {
        Self {
            title: post.title.clone(),
            ingress: post.ingress.clone(),
            body: post.body.clone(),
            company: post.company.clone(),
            location: post.location.clone(),
            email: post.email.clone(),
            link: post.link.clone(),
            image: post.image.clone().unwrap_or_default(),
            image_alt: post.image_alt.clone().unwrap_or_default(),
            deadline: post.deadline.as_ref().map(to_input_datetime).unwrap_or_default(),
            is_continuously_hiring: post.is_continuously_hiring,
            job_type: post.job_type,
            class_start: post.class_start,
            class_end: post.class_end,
        }
    }

    fn to_mutate(&self) -> Result<JobPostMutate, &'static str> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Annonsen må ha en tittel");
        }
        if self.company.trim().is_empty() {
            return Err("Oppgi bedriften som annonserer");
        }
        if self.class_start > self.class_end {
            return Err("Fra klasse kan ikke være høyere enn til klasse");
        }
        let deadline = if self.deadline.trim().is_empty() {
            None
        } else {
            Some(parse_input_datetime(&self.deadline).ok_or("Ugyldig søknadsfrist")?)
        };
        if deadline.is_none() && !self.is_continuously_hiring {
            return Err("Sett en søknadsfrist eller velg løpende opptak");
        }

        Ok(JobPostMutate {
            title: title.to_string(),
            ingress: self.ingress.trim().to_string(),
            body: self.body.clone(),
            company: self.company.trim().to_string(),
            location: self.location.trim().to_string(),
            email: self.email.trim().to_string(),
            link: self.link.trim().to_string(),
            image: optional(&self.image),
            image_alt: optional(&self.image_alt),
            deadline,
            is_continuously_hiring: self.is_continuously_hiring,
            job_type: self.job_type,
            class_start: self.class_start,
            class_end: self.class_end,
        })
    }
}

fn job_type_from_str(value: &str) -> JobPostType {
    JobPostType::ALL
        .into_iter()
        .find(|t| t.as_str() == value)
        .unwrap_or_default()
}

#[component]
pub fn JobPostAdmin() -> Element {
    let mut selected = use_signal(|| Option::<i64>::None);

    let editor = match selected() {
        None => rsx! {
            JobPostForm { post: None, on_saved: move |id| selected.set(Some(id)), on_deleted: move |_| selected.set(None) }
        },
        Some(id) => rsx! {
            JobPostLoader { id, on_saved: move |id| selected.set(Some(id)), on_deleted: move |_| selected.set(None) }
        },
    };

    rsx! {
        AdminPage {
            access: JOB_POST_ADMIN,
            title: "Annonser",
            div {
                class: "grid gap-4 md:grid-cols-[1fr_2fr]",
                AdminJobPostList { selected: selected(), on_select: move |id| selected.set(id) }
                {editor}
            }
        }
    }
}

#[component]
fn AdminJobPostList(selected: Option<i64>, on_select: EventHandler<Option<i64>>) -> Element {
    let api = use_api();
    let filters = Filters::new().with("expired", "true");
    let key_filters = filters.clone();
    let list = use_paginated(
        move || job_posts::keys::list(&key_filters),
        move |page| {
            let client = api.client();
            let filters = filters.page(page);
            async move { client.get_job_posts(&filters).await }
        },
    );

    rsx! {
        div {
            class: "flex flex-col gap-2",
            Button { onclick: move |_| on_select.call(None), "Ny annonse" }
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
                    empty_text: "Ingen annonser",
                    on_load_more: move |_| list.load_more(),
                    for post in list.items() {
                        button {
                            key: "{post.id}",
                            class: if selected == Some(post.id) { "admin-item active" } else { "admin-item" },
                            onclick: move |_| on_select.call(Some(post.id)),
                            strong { "{post.title}" }
                            span { class: "text-xs text-neutral-500", "{post.company}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn JobPostLoader(id: i64, on_saved: EventHandler<i64>, on_deleted: EventHandler<()>) -> Element {
    let api = use_api();
    let id = use_prop_signal(id);
    let post = use_query(
        move || job_posts::keys::detail(id()),
        move || {
            let id = id();
            let client = api.client();
            async move { client.get_job_post(id).await }
        },
    );

    let view = match &*post.read() {
        None => rsx! { Loading {} },
        Some(Err(error)) => rsx! { ErrorMessage { error: error.clone() } },
        Some(Ok(post)) => rsx! { JobPostForm { post: Some(post.clone()), on_saved, on_deleted } },
    };
    view
}

#[component]
fn JobPostForm(post: Option<JobPost>, on_saved: EventHandler<i64>, on_deleted: EventHandler<()>) -> Element {
    let api = use_api();
    let query = use_query_client();
    let mut snackbar = use_snackbar();
    let post_id = post.as_ref().map(|p| p.id);
    let mut draft = use_draft(post.as_ref().map(JobPostDraft::from_post).unwrap_or_default());
    let mut saving = use_signal(|| false);
    let mut confirm_delete = use_signal(|| false);
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
        spawn(async move {
            saving.set(true);
            let client = api.client();
            let result = match post_id {
                Some(id) => client.update_job_post(id, &body).await,
                None => client.create_job_post(&body).await,
            };
            match result {
                Ok(saved) => {
                    query.apply(&job_posts::invalidates_after_job_post_change());
                    query.set(job_posts::keys::detail(saved.id), &saved);
                    show_snackbar(&mut snackbar, Severity::Success, "Annonsen ble lagret");
                    inline_error.set(None);
                    on_saved.call(saved.id);
                }
                Err(e) => inline_error.set(report_error(&mut snackbar, &e)),
            }
            saving.set(false);
        });
    };

    let delete = move |_: MouseEvent| {
        let Some(id) = post_id else {
            return;
        };
        if !confirm_delete() {
            confirm_delete.set(true);
            return;
        }
        spawn(async move {
            match api.client().delete_job_post(id).await {
                Ok(_) => {
                    query.apply(&job_posts::invalidates_after_job_post_change());
                    show_snackbar(&mut snackbar, Severity::Info, "Annonsen ble slettet");
                    confirm_delete.set(false);
                    on_deleted.call(());
                }
                Err(e) => {
                    report_error(&mut snackbar, &e);
                }
            }
        });
    };

    let d = draft();

    rsx! {
        Paper {
            form {
                class: "flex flex-col gap-3",
                onsubmit: handle_submit,
                Field { label: "Tittel", html_for: "job-title",
                    Input { id: "job-title", value: d.title.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.title = e.value()) }
                }
                div {
                    class: "grid gap-3 md:grid-cols-2",
                    Field { label: "Bedrift", html_for: "job-company",
                        Input { id: "job-company", value: d.company.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.company = e.value()) }
                    }
                    Field { label: "Sted", html_for: "job-location",
                        Input { id: "job-location", value: d.location.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.location = e.value()) }
                    }
                }
                Field { label: "Ingress", html_for: "job-ingress",
                    Input { id: "job-ingress", value: d.ingress.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.ingress = e.value()) }
                }
                Field { label: "Beskrivelse", html_for: "job-body",
                    Textarea { id: "job-body", rows: 10, value: d.body.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.body = e.value()) }
                }
                div {
                    class: "grid gap-3 md:grid-cols-2",
                    Field { label: "Kontakt e-post", html_for: "job-email",
                        Input { id: "job-email", r#type: "email", value: d.email.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.email = e.value()) }
                    }
                    Field { label: "Søknadslenke", html_for: "job-link",
                        Input { id: "job-link", r#type: "url", value: d.link.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.link = e.value()) }
                    }
                    Field { label: "Logo (URL)", html_for: "job-image",
                        Input { id: "job-image", value: d.image.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.image = e.value()) }
                    }
                    Field { label: "Alternativ bildetekst", html_for: "job-image-alt",
                        Input { id: "job-image-alt", value: d.image_alt.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.image_alt = e.value()) }
                    }
                }
                div {
                    class: "grid gap-3 md:grid-cols-3",
                    Field { label: "Stillingstype", html_for: "job-type",
                        select {
                            id: "job-type",
                            class: "border border-neutral-300 rounded px-2 py-2 text-sm",
                            onchange: move |e: FormEvent| draft.with_mut(|d| d.job_type = job_type_from_str(&e.value())),
                            for t in JobPostType::ALL {
                                option { value: t.as_str(), selected: d.job_type == t, {t.label()} }
                            }
                        }
                    }
                    Field { label: "Fra klasse", html_for: "job-class-start",
                        select {
                            id: "job-class-start",
                            class: "border border-neutral-300 rounded px-2 py-2 text-sm",
                            onchange: move |e: FormEvent| draft.with_mut(|d| d.class_start = e.value().parse().unwrap_or(1)),
                            for class in CLASSES {
                                option { value: "{class}", selected: d.class_start == class, "{class}. klasse" }
                            }
                        }
                    }
                    Field { label: "Til klasse", html_for: "job-class-end",
                        select {
                            id: "job-class-end",
                            class: "border border-neutral-300 rounded px-2 py-2 text-sm",
                            onchange: move |e: FormEvent| draft.with_mut(|d| d.class_end = e.value().parse().unwrap_or(5)),
                            for class in CLASSES {
                                option { value: "{class}", selected: d.class_end == class, "{class}. klasse" }
                            }
                        }
                    }
                }
                Field { label: "Søknadsfrist", html_for: "job-deadline",
                    Input { id: "job-deadline", r#type: "datetime-local", value: d.deadline.clone(), oninput: move |e: FormEvent| draft.with_mut(|d| d.deadline = e.value()) }
                }
                Checkbox { label: "Løpende opptak", checked: d.is_continuously_hiring, on_change: move |v| draft.with_mut(|d| d.is_continuously_hiring = v) }
                if let Some(err) = inline_error() {
                    div { class: "error-box", "{err}" }
                }
                div {
                    class: "flex gap-2",
                    Button { r#type: "submit", disabled: saving(), if post_id.is_some() { "Lagre" } else { "Opprett" } }
                    if post_id.is_some() {
                        Button {
                            variant: ButtonVariant::Destructive,
                            onclick: delete,
                            if confirm_delete() { "Bekreft sletting" } else { "Slett" }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> JobPostDraft {
        JobPostDraft {
            title: "Sommerjobb".to_string(),
            company: "Bedrift AS".to_string(),
            deadline: "2026-03-01T23:59".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_to_mutate() {
        let body = draft().to_mutate().unwrap();
        assert_eq!(body.class_start, 1);
        assert_eq!(body.class_end, 5);
        assert!(body.deadline.is_some());
        assert!(body.image.is_none());
    }

    #[test]
    fn test_deadline_or_continuous_hiring() {
        let mut d = draft();
        d.deadline.clear();
        assert_eq!(d.to_mutate(), Err("Sett en søknadsfrist eller velg løpende opptak"));
        d.is_continuously_hiring = true;
        assert!(d.to_mutate().unwrap().deadline.is_none());
    }

    #[test]
    fn test_class_range_checked() {
        let mut d = draft();
        d.class_start = 4;
        d.class_end = 2;
        assert!(d.to_mutate().is_err());
    }

    #[test]
    fn test_job_type_from_str() {
        assert_eq!(job_type_from_str("SUMMER_JOB"), JobPostType::SummerJob);
        assert_eq!(job_type_from_str("ukjent"), JobPostType::FullTime);
    }
}
