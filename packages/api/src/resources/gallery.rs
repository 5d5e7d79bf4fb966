//! # Galleries and pictures
//!
//! Pictures are uploaded as multipart files to `galleries/{id}/pictures/`;
//! the other endpoints take JSON.

use store::{Filters, Invalidation, PaginationResponse};

use crate::client::ApiClient;
use crate::error::{ApiError, RequestResponse};
use crate::fetch::{Method, UploadFile};
use crate::models::{Gallery, GalleryMutate, Picture, PictureMutate};
use crate::transport::Transport;

pub const GALLERY_ENDPOINT: &str = "galleries";
pub const PICTURES_ENDPOINT: &str = "pictures";

pub mod keys {
    use store::{Filters, QueryKey};

    pub fn all() -> QueryKey {
        QueryKey::new("gallery")
    }

    pub fn list(filters: &Filters) -> QueryKey {
        all().push_str("list").push_filters(filters)
    }

    pub fn detail(id: &str) -> QueryKey {
        all().push_str(id)
    }

    pub fn pictures(gallery_id: &str) -> QueryKey {
        detail(gallery_id).push_str("pictures")
    }

    pub fn pictures_list(gallery_id: &str, filters: &Filters) -> QueryKey {
        pictures(gallery_id).push_str("list").push_filters(filters)
    }

    pub fn picture(gallery_id: &str, picture_id: &str) -> QueryKey {
        pictures(gallery_id).push_str(picture_id)
    }
}

fn pictures_path(gallery_id: &str) -> String {
    format!("{GALLERY_ENDPOINT}/{gallery_id}/{PICTURES_ENDPOINT}/")
}

impl<T: Transport> ApiClient<T> {
    pub async fn get_galleries(&self, filters: &Filters) -> Result<PaginationResponse<Gallery>, ApiError> {
        self.get(&format!("{GALLERY_ENDPOINT}/"), filters).await
    }

    pub async fn get_gallery(&self, id: &str) -> Result<Gallery, ApiError> {
        self.get(&format!("{GALLERY_ENDPOINT}/{id}/"), &Filters::new())
            .await
    }

    pub async fn create_gallery(&self, gallery: &GalleryMutate) -> Result<Gallery, ApiError> {
        self.post(&format!("{GALLERY_ENDPOINT}/"), gallery).await
    }

    pub async fn update_gallery(&self, id: &str, gallery: &GalleryMutate) -> Result<Gallery, ApiError> {
        self.put(&format!("{GALLERY_ENDPOINT}/{id}/"), gallery).await
    }

    pub async fn delete_gallery(&self, id: &str) -> Result<RequestResponse, ApiError> {
        self.delete(&format!("{GALLERY_ENDPOINT}/{id}/")).await
    }

    pub async fn get_pictures(
        &self,
        gallery_id: &str,
        filters: &Filters,
    ) -> Result<PaginationResponse<Picture>, ApiError> {
        self.get(&pictures_path(gallery_id), filters).await
    }

    pub async fn get_picture(&self, gallery_id: &str, picture_id: &str) -> Result<Picture, ApiError> {
        self.get(&format!("{}{picture_id}/", pictures_path(gallery_id)), &Filters::new())
            .await
    }

    pub async fn upload_pictures(
        &self,
        gallery_id: &str,
        files: Vec<UploadFile>,
    ) -> Result<RequestResponse, ApiError> {
        self.fetch_files(Method::Post, &pictures_path(gallery_id), files)
            .await
    }

    pub async fn update_picture(
        &self,
        gallery_id: &str,
        picture_id: &str,
        picture: &PictureMutate,
    ) -> Result<Picture, ApiError> {
        self.put(&format!("{}{picture_id}/", pictures_path(gallery_id)), picture)
            .await
    }

    pub async fn delete_picture(&self, gallery_id: &str, picture_id: &str) -> Result<RequestResponse, ApiError> {
        self.delete(&format!("{}{picture_id}/", pictures_path(gallery_id)))
            .await
    }
}

/// After create, update or delete. Saved galleries are seeded under
/// [`keys::detail`] by the caller.
pub fn invalidates_after_gallery_change() -> Invalidation {
    Invalidation::new().invalidate(keys::list(&Filters::new()))
}

/// After upload, update or delete of a picture.
pub fn invalidates_after_picture_change(gallery_id: &str) -> Invalidation {
    Invalidation::new().invalidate(keys::pictures(gallery_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::RequestBody;
    use crate::transport::MockTransport;
    use store::{ApiConfig, QueryCache};

    #[tokio::test]
    async fn test_upload_pictures_is_multipart() {
        let mock = MockTransport::new();
        mock.respond_json(201, r#"{"detail": "2 bilder lastet opp"}"#);
        let api = ApiClient::new(mock.clone(), ApiConfig::new("https://api.example.org/"))
            .with_token(Some("t".into()));

        let files = vec![
            UploadFile::new("a.jpg", vec![0xff, 0xd8]).with_content_type("image/jpeg"),
            UploadFile::new("b.jpg", vec![0xff, 0xd8]).with_content_type("image/jpeg"),
        ];
        let res = api.upload_pictures("g1", files).await.unwrap();
        assert_eq!(res.detail, "2 bilder lastet opp");

        let req = mock.last_request().unwrap();
        assert_eq!(req.url, "https://api.example.org/galleries/g1/pictures/");
        assert!(req.header("Content-Type").is_none());
        assert!(matches!(req.body, RequestBody::Multipart(ref files) if files.len() == 2));
    }

    #[test]
    fn test_picture_change_keeps_gallery_detail() {
        let cache = QueryCache::new();
        cache.set(keys::detail("g1"), &1);
        cache.set(keys::pictures_list("g1", &Filters::new().page(2)), &1);
        cache.set(keys::picture("g1", "p1"), &1);

        cache.apply(&invalidates_after_picture_change("g1"));
        assert!(cache.is_fresh(&keys::detail("g1")));
        assert!(!cache.is_fresh(&keys::pictures_list("g1", &Filters::new().page(2))));
        assert!(!cache.is_fresh(&keys::picture("g1", "p1")));
    }
}
