//! Navigation seam between the session/controllers and a front-end.

use parking_lot::Mutex;
use std::fmt;

/// Screens of the admin client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Posts,
    PostNew,
    PostEdit(i64),
    Tags,
    Settings,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Dashboard => "/admin".to_string(),
            Route::Posts => "/admin/posts".to_string(),
            Route::PostNew => "/admin/posts/new".to_string(),
            Route::PostEdit(id) => format!("/admin/posts/{}", id),
            Route::Tags => "/admin/categories".to_string(),
            Route::Settings => "/admin/settings".to_string(),
        }
    }

    /// Whether the route sits behind the login guard.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Performs navigation. Implemented by the front-end.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that only records where it was sent.
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    history: Mutex<Vec<Route>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<Route> {
        self.history.lock().clone()
    }

    pub fn last(&self) -> Option<Route> {
        self.history.lock().last().copied()
    }

    pub fn count(&self, route: Route) -> usize {
        self.history.lock().iter().filter(|r| **r == route).count()
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, route: Route) {
        self.history.lock().push(route);
    }
}
