//! Typed clients, one per backend resource collection.
//!
//! Each is a thin pass-through over [`ApiClient`](crate::ApiClient) with
//! fixed paths and payload shapes. Pagination is the `no` query parameter;
//! the backend owns page size and ordering.

mod auth;
mod contents;
mod dashboard;
mod tags;

pub use auth::AuthApi;
pub use contents::ContentsApi;
pub use dashboard::DashboardApi;
pub use tags::TagsApi;

fn page_query(page: u32) -> [(&'static str, String); 1] {
    [("no", page.max(1).to_string())]
}
