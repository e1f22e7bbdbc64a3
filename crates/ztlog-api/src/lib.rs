//! Client library for the ZTLog blog admin API.
//!
//! This crate provides:
//! - A token store mirroring the bearer credential into durable storage
//! - An HTTP client that attaches the credential and normalizes envelopes
//! - Typed resource clients for auth, contents, tags and the dashboard
//! - A session context that logs out exactly once per credential expiry

mod envelope;
mod error;
mod events;
mod http;
mod models;
mod navigation;
mod resources;
mod runtime;
mod session;
mod token_store;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use envelope::{Ack, ApiResponse, Page, SUCCESS_CODE};
pub use error::{ApiError, ApiResult, AUTH_EXPIRED_MESSAGE};
pub use events::{AuthEvents, AuthExpired, ListenerId};
pub use http::{ApiClient, JSON_CONTENT_TYPE};
pub use models::{
    display_date, parse_timestamp, Content, ContentDraft, ContentRef, DashboardStats, LoginData,
    Tag, TagKey, TagRef,
};
pub use navigation::{HistoryNavigator, Navigator, Route};
pub use resources::{AuthApi, ContentsApi, DashboardApi, TagsApi};
pub use runtime::AdminServices;
pub use session::{SessionContext, SessionStatus};
pub use token_store::{TokenSnapshot, TokenStore};
