//! One module per REST resource.
//!
//! Each module carries the endpoint constants, a `keys` submodule building
//! the [`store::QueryKey`]s its queries are cached under, the typed
//! [`ApiClient`](crate::ApiClient) methods, and an `invalidates_after_*`
//! function per mutation returning the cache changes to apply on success.

pub mod badges;
pub mod events;
pub mod feedback;
pub mod forms;
pub mod gallery;
pub mod groups;
pub mod job_posts;
pub mod memberships;
pub mod misc;
pub mod news;
pub mod notifications;
pub mod qr_codes;
pub mod reactions;
pub mod short_links;
pub mod strikes;
pub mod toddel;
pub mod users;
