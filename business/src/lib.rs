//! Business layer for the user directory client.
//!
//! - [`view`]: the pure list view engine (filter, sort, paginate).
//! - [`directory`]: shell-owned state that mirrors the server collection.
//! - [`api`] / [`http`]: the users REST API and its transport.
//!
//! Rendering code should only read [`View`]s and call [`UserDirectory`]
//! methods; it should not reimplement any of the projection rules.

pub mod api;
mod config;
pub mod directory;
mod error;
pub mod http;
pub mod user;
pub mod view;

pub use api::{ApiResult, UsersApi, UsersApiError};
pub use config::{BusinessConfig, DEFAULT_API_BASE_URL};
pub use directory::UserDirectory;
pub use error::{ValidationError, ViewError};
pub use user::{Timestamp, User, UserDraft, UserId, is_valid_email};
pub use view::{
    DEFAULT_ITEMS_PER_PAGE, PAGE_WINDOW, PaginationInfo, SortKey, View, ViewState, compute_view,
};
