//! Account settings commands.

use super::AppContext;
use crate::output;
use crate::terminal::{prompt, prompt_secret};
use anyhow::Result;
use ztlog_pages::{messages, SettingsController};

/// Change the password. All three values are read without echo.
pub async fn account_password(ctx: &AppContext) -> Result<()> {
    ctx.require_login()?;

    let mut controller = SettingsController::new(ctx.services.clone());
    {
        let form = controller.password_form_mut();
        form.current = prompt_secret("Current password: ")?;
        form.new = prompt_secret("New password: ")?;
        form.confirm = prompt_secret("Confirm new password: ")?;
    }

    let outcome = controller.change_password().await;
    output::report(outcome, messages::PASSWORD_CHANGED, &ctx.format)
}

/// Delete the account. The phrase is prompted for unless given.
pub async fn account_withdraw(ctx: &AppContext, phrase: Option<String>) -> Result<()> {
    ctx.require_login()?;

    let phrase = match phrase {
        Some(phrase) => phrase,
        None => prompt(&format!(
            "계정을 삭제하려면 '{}'를 입력하세요: ",
            messages::WITHDRAW_PHRASE
        ))?,
    };

    let mut controller = SettingsController::new(ctx.services.clone());
    let outcome = controller.withdraw(&phrase).await;
    output::report(outcome, "Account deleted", &ctx.format)
}
