//! Terminal implementations of the navigation and confirmation seams.

use parking_lot::Mutex;
use std::io::{self, BufRead, Write};
use tracing::debug;
use ztlog_api::{Navigator, Route};
use ztlog_pages::Confirmation;

/// Records where the controllers asked to go. A one-shot command has no
/// screens to switch, so the last route only decides the closing hint.
#[derive(Debug, Default)]
pub struct TerminalNavigator {
    last: Mutex<Option<Route>>,
}

impl TerminalNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<Route> {
        *self.last.lock()
    }

    pub fn sent_to_login(&self) -> bool {
        self.last() == Some(Route::Login)
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        debug!(route = %route, "Navigate");
        *self.last.lock() = Some(route);
    }
}

/// `[y/N]` prompt on stdin, or a fixed yes for `--yes`.
#[derive(Debug, Clone, Copy)]
pub struct PromptConfirm {
    assume_yes: bool,
}

impl PromptConfirm {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Confirmation for PromptConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{} [y/N] ", prompt);
        io::stdout().flush().ok();

        match read_line() {
            Ok(input) => is_yes(&input),
            Err(_) => false,
        }
    }
}

fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Print `label` and read one trimmed line from stdin.
pub fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    read_line()
}

/// Read a secret without echo.
pub fn prompt_secret(label: &str) -> io::Result<String> {
    rpassword::prompt_password(label)
}

fn read_line() -> io::Result<String> {
    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
