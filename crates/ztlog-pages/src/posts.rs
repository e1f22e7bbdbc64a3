//! Post list screen.

use crate::confirm::Confirmation;
use crate::list_state::ListState;
use crate::messages;
use crate::mount::MountHandle;
use crate::outcome::Outcome;
use crate::paged::{settle_reload, PagedList};
use crate::pager::Pager;
use tracing::{debug, info};
use ztlog_api::{AdminServices, Content};

pub struct PostListController {
    services: AdminServices,
    mount: MountHandle,
    list: PagedList<Content>,
    search: String,
    notice: Option<String>,
}

impl PostListController {
    pub fn new(services: AdminServices, page_size: u32) -> Self {
        Self {
            services,
            mount: MountHandle::new(),
            list: PagedList::new("posts", page_size),
            search: String::new(),
            notice: None,
        }
    }

    pub fn mount_handle(&self) -> MountHandle {
        self.mount.clone()
    }

    pub async fn load(&mut self, page: u32) -> Outcome {
        let page = page.max(1);
        self.list.begin();
        let result = self.services.contents.list(page).await;
        if !self.mount.is_mounted() {
            debug!(page, "Post list unmounted, dropping response");
            return Outcome::Discarded;
        }
        self.list.finish(page, result)
    }

    /// Go to `page` if it is within the pager's bounds.
    pub async fn change_page(&mut self, page: u32) -> Outcome {
        if !self.pager().contains(page) {
            return Outcome::Invalid(format!("1~{} 페이지만 있습니다.", self.list.total_pages()));
        }
        self.load(page).await
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Rows of the loaded page whose title contains the search text,
    /// ignoring case. Other pages are not searched.
    pub fn visible_posts(&self) -> Vec<&Content> {
        let needle = self.search.trim().to_lowercase();
        self.list
            .items()
            .iter()
            .filter(|post| needle.is_empty() || post.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Delete after confirmation, then reload the current page.
    pub async fn delete(&mut self, ctnt_no: i64, confirmation: &dyn Confirmation) -> Outcome {
        if !confirmation.confirm(messages::CONFIRM_DELETE) {
            return Outcome::Cancelled;
        }
        self.notice = None;

        let result = self.services.contents.delete(ctnt_no).await;
        if !self.mount.is_mounted() {
            return Outcome::Discarded;
        }
        if let Err(e) = result {
            let message = format!("{}{}", messages::POST_DELETE_FAILED_PREFIX, e);
            self.notice = Some(message.clone());
            return Outcome::Failed(message);
        }

        info!(ctnt_no, "Post deleted");
        let reload = self.load(self.list.current_page()).await;
        settle_reload(reload, &mut self.notice)
    }

    pub fn state(&self) -> ListState {
        self.list.state()
    }

    pub fn posts(&self) -> &[Content] {
        self.list.items()
    }

    pub fn total_count(&self) -> u64 {
        self.list.total_count()
    }

    pub fn total_pages(&self) -> u32 {
        self.list.total_pages()
    }

    pub fn current_page(&self) -> u32 {
        self.list.current_page()
    }

    pub fn pager(&self) -> Pager {
        self.list.pager()
    }

    pub fn error(&self) -> Option<&str> {
        self.list.error()
    }

    /// Message from the last failed mutation, or from a failed reload after
    /// a successful one.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::AutoConfirm;
    use crate::test_support::{posts, Harness};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use ztlog_api::testing::MockResponse;
    use ztlog_api::Route;

    #[tokio::test]
    async fn test_load_reports_counts() {
        let h = Harness::logged_in().await;
        h.server
            .on("GET", "/v1/contents", MockResponse::page(posts(1..=5), 42));
        let mut list = PostListController::new(h.services.clone(), 10);

        assert!(list.load(1).await.is_done());
        assert_eq!(list.posts().len(), 5);
        assert_eq!(list.total_count(), 42);
        assert_eq!(list.total_pages(), 5);
        assert!(list.pager().is_visible());
    }

    #[tokio::test]
    async fn test_search_filters_current_page_only() {
        let h = Harness::logged_in().await;
        h.server.on(
            "GET",
            "/v1/contents",
            MockResponse::page(
                json!([
                    { "ctntNo": 1, "title": "Rust ownership" },
                    { "ctntNo": 2, "title": "Go channels" },
                    { "ctntNo": 3, "title": "async RUST" }
                ]),
                3,
            ),
        );
        let mut list = PostListController::new(h.services.clone(), 10);
        list.load(1).await;

        list.set_search("rust");
        let ids: Vec<i64> = list.visible_posts().iter().map(|p| p.ctnt_no).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(h.server.hits("GET", "/v1/contents"), 1);

        list.set_search("");
        assert_eq!(list.visible_posts().len(), 3);
    }

    #[tokio::test]
    async fn test_change_page_respects_bounds() {
        let h = Harness::logged_in().await;
        h.server
            .on("GET", "/v1/contents", MockResponse::page(posts(1..=10), 25));
        let mut list = PostListController::new(h.services.clone(), 10);
        list.load(1).await;

        assert!(matches!(list.change_page(4).await, Outcome::Invalid(_)));
        assert!(list.change_page(3).await.is_done());
        assert_eq!(list.current_page(), 3);
        assert_eq!(
            h.server
                .last_request("GET", "/v1/contents")
                .unwrap()
                .query
                .as_deref(),
            Some("no=3")
        );
    }

    #[tokio::test]
    async fn test_declined_delete_sends_nothing() {
        let h = Harness::logged_in().await;
        h.server
            .on("GET", "/v1/contents", MockResponse::page(posts(1..=3), 3));
        let mut list = PostListController::new(h.services.clone(), 10);
        list.load(1).await;

        let asked = AtomicUsize::new(0);
        let decline = |prompt: &str| {
            assert_eq!(prompt, messages::CONFIRM_DELETE);
            asked.fetch_add(1, Ordering::SeqCst);
            false
        };
        assert_eq!(list.delete(2, &decline).await, Outcome::Cancelled);
        assert_eq!(asked.load(Ordering::SeqCst), 1);
        assert_eq!(h.server.hits("DELETE", "/v1/contents/2"), 0);
    }

    #[tokio::test]
    async fn test_delete_reloads_current_page() {
        let h = Harness::logged_in().await;
        h.server
            .on("GET", "/v1/contents", MockResponse::page(posts(1..=3), 3));
        h.server
            .on("GET", "/v1/contents", MockResponse::page(posts(1..=2), 2));
        h.server
            .on("DELETE", "/v1/contents/3", MockResponse::success(json!(null)));
        let mut list = PostListController::new(h.services.clone(), 10);
        list.load(1).await;

        assert!(list.delete(3, &AutoConfirm(true)).await.is_done());
        assert_eq!(h.server.hits("GET", "/v1/contents"), 2);
        assert_eq!(list.total_count(), 2);
        assert_eq!(list.posts().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_succeeds_even_when_reload_fails() {
        let h = Harness::logged_in().await;
        h.server
            .on("GET", "/v1/contents", MockResponse::page(posts(1..=3), 3));
        h.server
            .on("GET", "/v1/contents", MockResponse::raw(500, ""));
        h.server
            .on("DELETE", "/v1/contents/3", MockResponse::success(json!(null)));
        let mut list = PostListController::new(h.services.clone(), 10);
        list.load(1).await;

        assert_eq!(list.delete(3, &AutoConfirm(true)).await, Outcome::Done);
        assert_eq!(h.server.hits("DELETE", "/v1/contents/3"), 1);
        assert_eq!(list.state(), ListState::Errored);
        assert_eq!(list.error(), Some("API 오류 (500)"));
        assert_eq!(
            list.notice(),
            Some("목록을 새로고침하지 못했습니다: API 오류 (500)")
        );
        assert_eq!(list.posts().len(), 3);
    }

    #[tokio::test]
    async fn test_list_shape_without_total_still_loads() {
        let h = Harness::logged_in().await;
        h.server.on(
            "GET",
            "/v1/contents",
            MockResponse::json(200, json!({ "list": posts(1..=4) })),
        );
        let mut list = PostListController::new(h.services.clone(), 10);

        assert!(list.load(1).await.is_done());
        assert_eq!(list.posts().len(), 4);
        assert_eq!(list.total_count(), 4);
        assert_eq!(list.total_pages(), 1);
        assert!(!list.pager().is_visible());
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_rows_and_sets_notice() {
        let h = Harness::logged_in().await;
        h.server
            .on("GET", "/v1/contents", MockResponse::page(posts(1..=3), 3));
        h.server.on(
            "DELETE",
            "/v1/contents/3",
            MockResponse::json(409, json!({ "message": "댓글이 있는 글입니다." })),
        );
        let mut list = PostListController::new(h.services.clone(), 10);
        list.load(1).await;

        let outcome = list.delete(3, &AutoConfirm(true)).await;
        assert_eq!(
            outcome,
            Outcome::Failed("삭제 실패: 댓글이 있는 글입니다.".to_string())
        );
        assert_eq!(list.notice(), Some("삭제 실패: 댓글이 있는 글입니다."));
        assert_eq!(list.posts().len(), 3);
        assert_eq!(h.server.hits("GET", "/v1/contents"), 1);
    }

    #[tokio::test]
    async fn test_expired_session_redirects_once() {
        let h = Harness::logged_in().await;
        h.server
            .on("GET", "/v1/contents", MockResponse::json(401, json!({})));
        let mut list = PostListController::new(h.services.clone(), 10);

        let outcome = list.load(1).await;
        assert_eq!(outcome, Outcome::Failed(ztlog_api::AUTH_EXPIRED_MESSAGE.to_string()));
        assert_eq!(list.state(), ListState::Errored);
        assert!(!h.services.session.is_authenticated());
        assert_eq!(h.nav.history(), vec![Route::Login]);
    }
}
