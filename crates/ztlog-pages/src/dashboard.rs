//! Dashboard: counters, recent posts and the tag cloud, loaded together.

use crate::list_state::{ListPhase, ListState};
use crate::mount::MountHandle;
use crate::outcome::Outcome;
use tracing::debug;
use ztlog_api::{AdminServices, Content, DashboardStats, Tag};

/// Number of posts shown in the "recent" panel.
pub const RECENT_POST_COUNT: usize = 5;

pub struct DashboardController {
    services: AdminServices,
    mount: MountHandle,
    phase: ListPhase,
    stats: DashboardStats,
    recent_posts: Vec<Content>,
    tags: Vec<Tag>,
    error: Option<String>,
}

impl DashboardController {
    pub fn new(services: AdminServices) -> Self {
        Self {
            services,
            mount: MountHandle::new(),
            phase: ListPhase::new("dashboard"),
            stats: DashboardStats::default(),
            recent_posts: Vec::new(),
            tags: Vec::new(),
            error: None,
        }
    }

    pub fn mount_handle(&self) -> MountHandle {
        self.mount.clone()
    }

    /// Fetch stats, the first post page and the first tag page concurrently.
    /// Any failure errors the whole screen.
    pub async fn load(&mut self) -> Outcome {
        self.phase.begin();
        self.error = None;

        let result = tokio::try_join!(
            self.services.dashboard.main(),
            self.services.contents.list(1),
            self.services.tags.list(1),
        );

        if !self.mount.is_mounted() {
            debug!("Dashboard unmounted, dropping response");
            return Outcome::Discarded;
        }

        match result {
            Ok((stats, posts, tags)) => {
                self.stats = stats;
                self.recent_posts = posts.content.into_iter().take(RECENT_POST_COUNT).collect();
                self.tags = tags.content;
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

    pub fn stats(&self) -> &DashboardStats {
        &self.stats
    }

    pub fn recent_posts(&self) -> &[Content] {
        &self.recent_posts
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
