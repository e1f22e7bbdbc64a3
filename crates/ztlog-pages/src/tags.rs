//! Tag management screen.

use crate::confirm::Confirmation;
use crate::list_state::ListState;
use crate::messages;
use crate::mount::MountHandle;
use crate::outcome::Outcome;
use crate::paged::{settle_reload, PagedList};
use crate::pager::Pager;
use crate::validation::validate_tag_name;
use tracing::{debug, info};
use ztlog_api::{Ack, AdminServices, ApiResult, Tag};

/// Inline rename in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEdit {
    pub tag_no: i64,
    pub name: String,
}

pub struct TagController {
    services: AdminServices,
    mount: MountHandle,
    list: PagedList<Tag>,
    editing: Option<TagEdit>,
    notice: Option<String>,
}

impl TagController {
    pub fn new(services: AdminServices, page_size: u32) -> Self {
        Self {
            services,
            mount: MountHandle::new(),
            list: PagedList::new("tags", page_size),
            editing: None,
            notice: None,
        }
    }

    pub fn mount_handle(&self) -> MountHandle {
        self.mount.clone()
    }

    pub async fn load(&mut self, page: u32) -> Outcome {
        let page = page.max(1);
        self.list.begin();
        let result = self.services.tags.list(page).await;
        if !self.mount.is_mounted() {
            debug!(page, "Tag list unmounted, dropping response");
            return Outcome::Discarded;
        }
        self.list.finish(page, result)
    }

    pub async fn change_page(&mut self, page: u32) -> Outcome {
        if !self.pager().contains(page) {
            return Outcome::Invalid(format!("1~{} 페이지만 있습니다.", self.list.total_pages()));
        }
        self.load(page).await
    }

    pub async fn add(&mut self, name: &str) -> Outcome {
        let name = match validate_tag_name(name) {
            Ok(name) => name,
            Err(message) => return self.reject(message),
        };
        self.notice = None;

        let result = self.services.tags.create(&name).await;
        self.after_mutation(result, messages::TAG_ADD_FAILED_PREFIX)
            .await
    }

    /// Open the inline editor for a loaded tag.
    pub fn start_edit(&mut self, tag_no: i64) -> bool {
        let Some(tag) = self.list.items().iter().find(|t| t.tag_no == tag_no) else {
            return false;
        };
        self.editing = Some(TagEdit {
            tag_no,
            name: tag.tag_name.clone(),
        });
        true
    }

    /// Fetch a tag and open the inline editor for it. Works for tags that
    /// are not on the loaded page.
    pub async fn open_edit(&mut self, tag_no: i64) -> Outcome {
        let result = self.services.tags.get(tag_no).await;
        if !self.mount.is_mounted() {
            return Outcome::Discarded;
        }
        match result {
            Ok(tag) => {
                self.editing = Some(TagEdit {
                    tag_no: tag.tag_no,
                    name: tag.tag_name,
                });
                Outcome::Done
            }
            Err(e) => {
                let message = format!("{}{}", messages::TAG_LOAD_FAILED_PREFIX, e);
                self.notice = Some(message.clone());
                Outcome::Failed(message)
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn editing(&self) -> Option<&TagEdit> {
        self.editing.as_ref()
    }

    pub async fn rename(&mut self, tag_no: i64, name: &str) -> Outcome {
        let name = match validate_tag_name(name) {
            Ok(name) => name,
            Err(message) => return self.reject(message),
        };
        self.notice = None;

        let result = self.services.tags.update(tag_no, &name).await;
        let outcome = self
            .after_mutation(result, messages::TAG_UPDATE_FAILED_PREFIX)
            .await;
        if outcome.is_done() {
            self.editing = None;
        }
        outcome
    }

    pub async fn delete(&mut self, tag_no: i64, confirmation: &dyn Confirmation) -> Outcome {
        if !confirmation.confirm(messages::CONFIRM_DELETE) {
            return Outcome::Cancelled;
        }
        self.notice = None;

        let result = self.services.tags.delete(tag_no).await;
        self.after_mutation(result, messages::TAG_DELETE_FAILED_PREFIX)
            .await
    }

    /// Reload after a successful mutation; never patch rows locally.
    async fn after_mutation(&mut self, result: ApiResult<Ack>, failure_prefix: &str) -> Outcome {
        if !self.mount.is_mounted() {
            return Outcome::Discarded;
        }
        if let Err(e) = result {
            let message = format!("{}{}", failure_prefix, e);
            self.notice = Some(message.clone());
            return Outcome::Failed(message);
        }
        info!("Tag mutation applied, reloading");
        let reload = self.load(self.list.current_page()).await;
        settle_reload(reload, &mut self.notice)
    }

    fn reject(&mut self, message: String) -> Outcome {
        self.notice = Some(message.clone());
        Outcome::Invalid(message)
    }

    pub fn state(&self) -> ListState {
        self.list.state()
    }

    pub fn tags(&self) -> &[Tag] {
        self.list.items()
    }

    pub fn total_count(&self) -> u64 {
        self.list.total_count()
    }

    pub fn pager(&self) -> Pager {
        self.list.pager()
    }

    pub fn error(&self) -> Option<&str> {
        self.list.error()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }
}
