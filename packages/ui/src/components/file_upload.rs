use api::UploadFile;
use dioxus::prelude::*;

/// Best-effort MIME type from a file name, for the multipart part header.
fn guess_content_type(name: &str) -> Option<&'static str> {
    let ext = name.rsplit_once('.')?.1.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        _ => return None,
    };
    Some(mime)
}

fn to_upload(name: String, bytes: Vec<u8>) -> UploadFile {
    let content_type = guess_content_type(&name);
    let file = UploadFile::new(name, bytes);
    match content_type {
        Some(mime) => file.with_content_type(mime),
        None => file,
    }
}

/// File picker that reads the chosen files into memory and hands them over
/// as [`UploadFile`]s.
#[component]
pub fn FileUpload(
    #[props(default = "Velg fil".to_string())] label: String,
    #[props(default)] accept: String,
    #[props(default)] multiple: bool,
    #[props(default)] disabled: bool,
    on_files: EventHandler<Vec<UploadFile>>,
) -> Element {
    let mut reading = use_signal(|| false);

    let onchange = move |evt: FormEvent| async move {
        let files = evt.files();
        if files.is_empty() {
            return;
        }
        reading.set(true);
        let mut uploads = Vec::with_capacity(files.len());
        for file in files {
            let name = file.name();
            match file.read_bytes().await {
                Ok(bytes) => uploads.push(to_upload(name, bytes.to_vec())),
                Err(e) => tracing::error!("Failed to read {}: {}", name, e),
            }
        }
        reading.set(false);
        if !uploads.is_empty() {
            on_files.call(uploads);
        }
    };

    rsx! {
        label {
            class: "inline-flex items-center gap-2 rounded border border-dashed border-neutral-400 px-4 py-3 text-sm text-neutral-700 cursor-pointer hover:bg-neutral-50",
            input {
                class: "hidden",
                r#type: "file",
                accept: "{accept}",
                multiple,
                disabled: disabled || reading(),
                onchange: onchange,
            }
            if reading() { "Leser fil..." } else { "{label}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(guess_content_type("bilde.JPG"), Some("image/jpeg"));
        assert_eq!(guess_content_type("referat.pdf"), Some("application/pdf"));
        assert_eq!(guess_content_type("README"), None);
        assert_eq!(guess_content_type("arkiv.zip"), None);
    }

    #[test]
    fn test_upload_carries_guessed_type() {
        let upload = to_upload("logo.png".to_string(), vec![1, 2, 3]);
        assert_eq!(upload.name, "logo.png");
        assert_eq!(upload.content_type.as_deref(), Some("image/png"));
        assert_eq!(upload.bytes, vec![1, 2, 3]);
    }
}
