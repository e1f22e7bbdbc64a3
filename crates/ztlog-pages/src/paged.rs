//! Shared state of a paginated list screen.

use crate::list_state::{ListPhase, ListState};
use crate::messages;
use crate::outcome::Outcome;
use crate::pager::Pager;
use tracing::warn;
use ztlog_api::{ApiResult, Page};

/// Outcome of a mutation that already succeeded, given the reload that
/// followed it. A failed reload leaves the list Errored and is reported
/// through `notice`; the mutation itself still counts as done.
pub(crate) fn settle_reload(reload: Outcome, notice: &mut Option<String>) -> Outcome {
    match reload {
        Outcome::Discarded => Outcome::Discarded,
        Outcome::Failed(message) => {
            warn!(error = %message, "Reload after mutation failed");
            *notice = Some(format!("{}{}", messages::LIST_RELOAD_FAILED_PREFIX, message));
            Outcome::Done
        }
        _ => Outcome::Done,
    }
}

#[derive(Debug)]
pub struct PagedList<T> {
    phase: ListPhase,
    page_size: u32,
    items: Vec<T>,
    current_page: u32,
    total_pages: u32,
    total_count: u64,
    error: Option<String>,
}

impl<T> PagedList<T> {
    pub fn new(screen: &'static str, page_size: u32) -> Self {
        Self {
            phase: ListPhase::new(screen),
            page_size: page_size.max(1),
            items: Vec::new(),
            current_page: 1,
            total_pages: 1,
            total_count: 0,
            error: None,
        }
    }

    pub(crate) fn begin(&mut self) {
        self.phase.begin();
        self.error = None;
    }

    /// Apply a page answer. A failure keeps the previous rows on screen.
    pub(crate) fn finish(&mut self, page: u32, result: ApiResult<Page<T>>) -> Outcome {
        match result {
            Ok(loaded) => {
                self.total_pages = loaded.page_count(self.page_size);
                self.total_count = loaded.total_elements;
                self.items = loaded.content;
                self.current_page = page;
                self.phase.succeed();
                Outcome::Done
            }
            Err(e) => {
                let message = e.to_string();
                self.error = Some(message.clone());
                self.phase.fail();
                Outcome::Failed(message)
            }
        }
    }

    pub fn state(&self) -> ListState {
        self.phase.state()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Server-reported total across all pages.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn pager(&self) -> Pager {
        Pager::new(self.current_page, self.total_pages)
    }
}
