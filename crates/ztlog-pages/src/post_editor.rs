//! New-post and edit-post screens.

use crate::list_state::{ListPhase, ListState};
use crate::messages;
use crate::mount::MountHandle;
use crate::outcome::Outcome;
use crate::validation::{derive_subtitle, validate_post};
use tracing::{debug, info};
use ztlog_api::{AdminServices, ContentDraft, Route, Tag};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(i64),
}

pub struct PostEditorController {
    services: AdminServices,
    mode: EditorMode,
    mount: MountHandle,
    phase: ListPhase,
    title: String,
    body: String,
    sub_title: String,
    selected_tags: Vec<i64>,
    all_tags: Vec<Tag>,
    error: Option<String>,
}

impl PostEditorController {
    pub fn create(services: AdminServices) -> Self {
        Self::with_mode(services, EditorMode::Create)
    }

    pub fn edit(services: AdminServices, ctnt_no: i64) -> Self {
        Self::with_mode(services, EditorMode::Edit(ctnt_no))
    }

    fn with_mode(services: AdminServices, mode: EditorMode) -> Self {
        Self {
            services,
            mode,
            mount: MountHandle::new(),
            phase: ListPhase::new("post_editor"),
            title: String::new(),
            body: String::new(),
            sub_title: String::new(),
            selected_tags: Vec::new(),
            all_tags: Vec::new(),
            error: None,
        }
    }

    pub fn mount_handle(&self) -> MountHandle {
        self.mount.clone()
    }

    /// Load the tag catalogue, plus the post itself when editing.
    ///
    /// In create mode a failed tag load is ignored and the form stays usable.
    pub async fn load(&mut self) -> Outcome {
        self.phase.begin();
        self.error = None;

        match self.mode {
            EditorMode::Create => {
                let result = self.services.tags.list(1).await;
                if !self.mount.is_mounted() {
                    return Outcome::Discarded;
                }
                match result {
                    Ok(page) => self.all_tags = page.content,
                    Err(e) => debug!(error = %e, "Tag catalogue unavailable"),
                }
                self.phase.succeed();
                Outcome::Done
            }
            EditorMode::Edit(ctnt_no) => {
                let result = tokio::try_join!(
                    self.services.contents.get(ctnt_no),
                    self.services.tags.list(1),
                );
                if !self.mount.is_mounted() {
                    return Outcome::Discarded;
                }
                match result {
                    Ok((post, tags)) => {
                        self.title = post.title.clone();
                        self.set_body(post.body.clone());
                        self.selected_tags = post.tag_numbers();
                        self.all_tags = tags.content;
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
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replace the body and re-derive the sub-title from it.
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
        self.sub_title = derive_subtitle(&self.body);
    }

    /// Select the tag if unselected, otherwise unselect it.
    pub fn toggle_tag(&mut self, tag_no: i64) {
        match self.selected_tags.iter().position(|t| *t == tag_no) {
            Some(index) => {
                self.selected_tags.remove(index);
            }
            None => self.selected_tags.push(tag_no),
        }
    }

    /// Validate, save and go back to the post list.
    pub async fn submit(&mut self) -> Outcome {
        if let Err(message) = validate_post(&self.title, &self.body) {
            self.error = Some(message.clone());
            return Outcome::Invalid(message);
        }
        self.error = None;

        let draft = ContentDraft::new(self.title.trim(), self.sub_title.trim(), self.body.clone())
            .with_tags(self.selected_tags.iter().copied());

        let (result, fallback) = match self.mode {
            EditorMode::Create => (
                self.services.contents.create(&draft).await,
                messages::POST_SAVE_FAILED,
            ),
            EditorMode::Edit(ctnt_no) => (
                self.services.contents.update(&draft.for_update(ctnt_no)).await,
                messages::POST_UPDATE_FAILED,
            ),
        };

        if !self.mount.is_mounted() {
            return Outcome::Discarded;
        }

        match result {
            Ok(_) => {
                info!(mode = ?self.mode, "Post saved");
                self.services.navigator().navigate(Route::Posts);
                Outcome::Done
            }
            Err(e) => {
                let message = Some(e.to_string())
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| fallback.to_string());
                self.error = Some(message.clone());
                Outcome::Failed(message)
            }
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn state(&self) -> ListState {
        self.phase.state()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn sub_title(&self) -> &str {
        &self.sub_title
    }

    pub fn selected_tags(&self) -> &[i64] {
        &self.selected_tags
    }

    pub fn all_tags(&self) -> &[Tag] {
        &self.all_tags
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
