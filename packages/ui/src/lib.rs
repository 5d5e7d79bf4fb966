//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const TAILWIND_CSS: Asset = asset!("/assets/tailwind.css");

mod time;

mod api_client;
pub use api_client::{use_api, ApiHandle, ApiProvider};

mod auth;
pub use auth::{log_in, log_out, use_auth, AuthProvider, AuthState, LogoutButton};

pub mod query;
pub use query::{
    use_paginated, use_query, use_query_client, PaginatedQuery, QueryClient, QueryProvider,
};

pub mod snackbar;
pub use snackbar::{
    inline_message, report_error, show_snackbar, use_snackbar, Severity, Snackbar, SnackbarProvider,
    SnackbarQueue,
};

pub mod require_auth;
pub use require_auth::{decide_access, has_access, Access, RequireAuth, ACCESS_GROUPS};

mod markdown;
pub use markdown::{render_markdown, Markdown};

mod navbar;
pub use navbar::Navbar;
