//! Screen controllers for the ZTLog admin client.
//!
//! Each controller owns one screen's state: it loads data when mounted,
//! holds form input, calls the resource clients and turns their errors into
//! messages. Lists are always reloaded after a mutation. A front-end renders
//! the controller state and supplies the [`Confirmation`] and
//! [`Navigator`](ztlog_api::Navigator) seams.

mod confirm;
mod dashboard;
mod list_state;
mod login;
pub mod messages;
mod mount;
mod outcome;
mod paged;
mod pager;
mod post_editor;
mod posts;
mod settings;
mod tags;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use confirm::{AutoConfirm, Confirmation};
pub use dashboard::{DashboardController, RECENT_POST_COUNT};
pub use list_state::{list_machine, ListMachine, ListMachineInput, ListMachineState, ListState};
pub use login::LoginController;
pub use mount::MountHandle;
pub use outcome::Outcome;
pub use paged::PagedList;
pub use pager::Pager;
pub use post_editor::{EditorMode, PostEditorController};
pub use posts::PostListController;
pub use settings::{PasswordForm, SettingsController};
pub use tags::{TagController, TagEdit};
