//! Client-side data layer primitives: cache keys, the query cache,
//! pagination envelopes and application configuration.

pub mod cache;
pub mod config;
pub mod key;
pub mod pagination;

pub use cache::{Invalidation, QueryCache};
pub use config::{ApiConfig, AppConfig, CacheConfig, ConfigError, SnackbarConfig};
pub use key::{Filters, KeyPart, QueryKey};
pub use pagination::{Pages, PaginationResponse};
