use api::models::{Gallery, Picture};
use api::resources::gallery;
use api::UploadFile;
use dioxus::prelude::*;
use store::Filters;
use ui::components::{FileUpload, LoadMore, ModalOverlay, Paper};
use ui::{
    has_access, report_error, show_snackbar, use_api, use_auth, use_paginated, use_query,
    use_query_client, use_snackbar, Severity,
};

use super::{format_date, use_prop_signal, ErrorMessage, Loading};
use crate::Route;

/// Groups allowed to add pictures to a gallery.
const PICTURE_UPLOADERS: &[&str] = &["HS", "Index", "Promo"];

#[component]
pub fn Galleries() -> Element {
    let api = use_api();
    let list = use_paginated(
        || gallery::keys::list(&Filters::new()),
        move |page| {
            let client = api.client();
            async move { client.get_galleries(&Filters::new().page(page)).await }
        },
    );

    rsx! {
        h1 { class: "page-title", "Galleri" }
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
                empty_text: "Ingen album",
                on_load_more: move |_| list.load_more(),
                div {
                    class: "card-grid",
                    for album in list.items() {
                        GalleryCard { key: "{album.id}", album }
                    }
                }
            }
        }
    }
}

#[component]
fn GalleryCard(album: Gallery) -> Element {
    let created = album.created_at.as_ref().map(format_date).unwrap_or_default();

    rsx! {
        Link {
            to: Route::GalleryDetail { id: album.id.clone() },
            class: "no-underline text-inherit",
            Paper {
                class: "flex h-full flex-col gap-2 hover:shadow-md transition-shadow",
                if let Some(image) = album.image.clone() {
                    img { class: "card-image", src: "{image}", alt: album.image_alt.clone().unwrap_or_default() }
                }
                h3 { class: "m-0 text-base font-semibold", "{album.title}" }
                span { class: "text-xs text-neutral-500", "{created}" }
            }
        }
    }
}

#[component]
pub fn GalleryDetail(id: String) -> Element {
    let gallery_id = use_prop_signal(id);
    let api = use_api();
    let auth = use_auth();

    let album = use_query(
        move || gallery::keys::detail(&gallery_id()),
        move || {
            let id = gallery_id();
            let client = api.client();
            async move { client.get_gallery(&id).await }
        },
    );

    let album = match &*album.read() {
        None => return rsx! { Loading {} },
        Some(Err(error)) => return rsx! { ErrorMessage { error: error.clone() } },
        Some(Ok(album)) => album.clone(),
    };
    let state = auth();
    let can_upload = state.user.is_some() && has_access(state.groups(), PICTURE_UPLOADERS);

    rsx! {
        h1 { class: "page-title", "{album.title}" }
        if !album.description.is_empty() {
            p { class: "mb-4 text-neutral-700", "{album.description}" }
        }
        if can_upload {
            PictureUpload { gallery_id: album.id.clone() }
        }
        Pictures { gallery_id: album.id.clone() }
    }
}

#[component]
fn Pictures(gallery_id: String) -> Element {
    let gallery_id = use_prop_signal(gallery_id);
    let api = use_api();
    let mut selected = use_signal(|| Option::<Picture>::None);

    let list = use_paginated(
        move || gallery::keys::pictures_list(&gallery_id(), &Filters::new()),
        move |page| {
            let id = gallery_id.peek().clone();
            let client = api.client();
            async move { client.get_pictures(&id, &Filters::new().page(page)).await }
        },
    );

    if let Some(error) = list.error() {
        return rsx! { ErrorMessage { error } };
    }
    if list.is_loading() {
        return rsx! { Loading {} };
    }

    rsx! {
        LoadMore {
            has_next_page: list.has_next_page(),
            is_fetching: list.is_fetching(),
            is_empty: list.is_empty(),
            empty_text: "Albumet har ingen bilder",
            on_load_more: move |_| list.load_more(),
            div {
                class: "grid grid-cols-2 gap-2 md:grid-cols-4",
                for picture in list.items() {
                    button {
                        key: "{picture.id}",
                        class: "border-none bg-transparent p-0 cursor-pointer",
                        onclick: {
                            let picture = picture.clone();
                            move |_: MouseEvent| selected.set(Some(picture.clone()))
                        },
                        img {
                            class: "aspect-square w-full rounded object-cover",
                            src: "{picture.image}",
                            alt: "{picture.image_alt}",
                        }
                    }
                }
            }
        }
        if let Some(picture) = selected() {
            ModalOverlay {
                title: picture.title.clone(),
                on_close: move |_| selected.set(None),
                div {
                    class: "flex flex-col gap-2 p-4",
                    img { class: "max-h-[80vh] w-full object-contain", src: "{picture.image}", alt: "{picture.image_alt}" }
                    if !picture.description.is_empty() {
                        p { class: "m-0 text-sm text-neutral-700", "{picture.description}" }
                    }
                }
            }
        }
    }
}

#[component]
fn PictureUpload(gallery_id: String) -> Element {
    let gallery_id = use_prop_signal(gallery_id);
    let api = use_api();
    let query = use_query_client();
    let mut snackbar = use_snackbar();
    let mut uploading = use_signal(|| false);

    let upload = move |files: Vec<UploadFile>| {
        if files.is_empty() {
            return;
        }
        let id = gallery_id();
        let count = files.len();
        spawn(async move {
            uploading.set(true);
            match api.client().upload_pictures(&id, files).await {
                Ok(_) => {
                    query.apply(&gallery::invalidates_after_picture_change(&id));
                    let message = format!("{count} bilder lastet opp");
                    show_snackbar(&mut snackbar, Severity::Success, &message);
                }
                Err(e) => {
                    report_error(&mut snackbar, &e);
                }
            }
            uploading.set(false);
        });
    };

    rsx! {
        Paper {
            class: "mb-4 flex items-center gap-3",
            FileUpload {
                label: "Last opp bilder",
                accept: "image/*",
                multiple: true,
                disabled: uploading(),
                on_files: upload,
            }
            if uploading() {
                span { class: "text-sm text-neutral-500", "Laster opp..." }
            }
        }
    }
}
