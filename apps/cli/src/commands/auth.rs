//! Authentication commands.

use super::AppContext;
use crate::output::{self, OutputFormat};
use crate::terminal::{prompt, prompt_secret};
use anyhow::Result;
use ztlog_api::SessionStatus;
use ztlog_pages::{LoginController, SettingsController};

/// Login with user ID and password.
pub async fn login(ctx: &AppContext, user_id: Option<String>) -> Result<()> {
    if ctx.services.session.is_authenticated() {
        output::print_success("Already logged in", &ctx.format);
        return Ok(());
    }

    let user_id = match user_id {
        Some(user_id) => user_id,
        None => prompt("User ID: ")?,
    };
    let password = prompt_secret("Password: ")?;

    let mut controller = LoginController::new(ctx.services.clone());
    let outcome = controller.submit(&user_id, &password).await;
    output::report(outcome, &format!("Logged in as {}", user_id), &ctx.format)
}

/// Create an account. Does not log in.
pub async fn signup(ctx: &AppContext, username: Option<String>) -> Result<()> {
    let username = match username {
        Some(username) => username,
        None => prompt("Username: ")?,
    };
    let password = prompt_secret("Password: ")?;

    let mut controller = LoginController::new(ctx.services.clone());
    let outcome = controller.signup(&username, &password).await;
    output::report(
        outcome,
        "Account created. Run 'ztlog login' to sign in.",
        &ctx.format,
    )
}

/// Logout and clear the stored credential.
pub async fn logout(ctx: &AppContext) -> Result<()> {
    if !ctx.services.session.is_authenticated() {
        output::print_success("Not logged in", &ctx.format);
        return Ok(());
    }
    let mut controller = SettingsController::new(ctx.services.clone());
    let outcome = controller.logout().await;
    output::report(outcome, "Logged out successfully", &ctx.format)
}

/// Show the backend and whether a credential is stored.
pub async fn status(ctx: &AppContext) -> Result<()> {
    let status = ctx.services.session.status();
    let logged_in = status == SessionStatus::LoggedIn;

    match ctx.format {
        OutputFormat::Text => {
            println!("API:      {}", ctx.services.client.base_url());
            println!(
                "Auth:     {}",
                if logged_in { "logged in" } else { "not logged in" }
            );
        }
        OutputFormat::Json => {
            output::print_json(&serde_json::json!({
                "api_base_url": ctx.services.client.base_url(),
                "logged_in": logged_in,
            }))?;
        }
    }

    Ok(())
}
