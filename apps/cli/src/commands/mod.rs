//! CLI command implementations.

mod account;
mod auth;
mod dashboard;
mod posts;
mod tags;

pub use account::{account_password, account_withdraw};
pub use auth::{login, logout, signup, status};
pub use dashboard::dashboard;
pub use posts::{posts_create, posts_delete, posts_edit, posts_list, posts_show, PostInput};
pub use tags::{tags_add, tags_delete, tags_list, tags_rename};

use crate::output::OutputFormat;
use crate::terminal::TerminalNavigator;
use anyhow::{Context as _, Result};
use std::sync::Arc;
use ztlog_api::AdminServices;
use ztlog_config::{Config, Paths};
use ztlog_storage::create_storage;

/// Shared state for one CLI invocation.
pub struct AppContext {
    pub services: AdminServices,
    pub navigator: Arc<TerminalNavigator>,
    pub config: Config,
    pub format: OutputFormat,
}

impl AppContext {
    /// Open the credential file and wire the client objects around it.
    pub fn open(paths: &Paths, config: Config, format: OutputFormat) -> Result<Self> {
        paths.ensure_dirs()?;
        let storage = create_storage(&paths.credentials_file()).with_context(|| {
            format!(
                "failed to open credential store at {}",
                paths.credentials_file().display()
            )
        })?;

        let navigator = Arc::new(TerminalNavigator::new());
        let services =
            AdminServices::new(config.api_base_url.clone(), storage, navigator.clone());

        Ok(Self {
            services,
            navigator,
            config,
            format,
        })
    }

    /// Fail unless a credential is stored.
    pub fn require_login(&self) -> Result<()> {
        if !self.services.session.require_authenticated() {
            anyhow::bail!("로그인이 필요합니다. 'ztlog login'을 먼저 실행하세요.");
        }
        Ok(())
    }

    pub fn page_size(&self) -> u32 {
        self.config.page_size
    }
}
