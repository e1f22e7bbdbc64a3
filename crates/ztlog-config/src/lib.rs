//! Configuration, filesystem layout, and logging bootstrap for the ZTLog admin client.

mod config;
mod error;
mod logging;
mod paths;

pub use config::{Config, DEFAULT_API_BASE_URL, DEFAULT_LOG_LEVEL, DEFAULT_PAGE_SIZE};
pub use error::{CoreError, CoreResult};
pub use logging::init_logging;
pub use paths::Paths;
