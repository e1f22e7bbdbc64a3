//! Tag commands.

use super::AppContext;
use crate::output::{self, OutputFormat};
use crate::terminal::PromptConfirm;
use anyhow::Result;
use ztlog_api::display_date;
use ztlog_pages::{Outcome, TagController};

pub async fn tags_list(ctx: &AppContext, page: u32) -> Result<()> {
    ctx.require_login()?;

    let mut controller = TagController::new(ctx.services.clone(), ctx.page_size());
    if let Outcome::Failed(message) = controller.load(page).await {
        anyhow::bail!(message);
    }

    match ctx.format {
        OutputFormat::Text => {
            if controller.tags().is_empty() {
                println!("No tags found");
            } else {
                println!("{:<6} {:<20} {:<6} {}", "ID", "Name", "Posts", "Created");
                println!("{}", "-".repeat(50));
                for tag in controller.tags() {
                    println!(
                        "{:<6} {:<20} {:<6} {}",
                        tag.tag_no,
                        tag.tag_name,
                        tag.content_count(),
                        display_date(tag.inp_dttm.as_deref())
                    );
                }
            }
            output::print_pager(&controller.pager(), controller.total_count());
        }
        OutputFormat::Json => {
            output::print_json(&serde_json::json!({
                "tags": controller.tags(),
                "page": controller.pager(),
                "total_count": controller.total_count(),
            }))?;
        }
    }

    Ok(())
}

pub async fn tags_add(ctx: &AppContext, name: &str) -> Result<()> {
    ctx.require_login()?;

    let mut controller = TagController::new(ctx.services.clone(), ctx.page_size());
    let outcome = controller.add(name).await;
    warn_on_notice(&outcome, &controller, &ctx.format);
    output::report(outcome, &format!("Tag '{}' added", name.trim()), &ctx.format)
}

pub async fn tags_rename(ctx: &AppContext, tag_no: i64, name: &str) -> Result<()> {
    ctx.require_login()?;

    let mut controller = TagController::new(ctx.services.clone(), ctx.page_size());
    if let Outcome::Failed(message) = controller.open_edit(tag_no).await {
        anyhow::bail!(message);
    }
    let previous = controller
        .editing()
        .map(|edit| edit.name.clone())
        .unwrap_or_default();

    let outcome = controller.rename(tag_no, name).await;
    warn_on_notice(&outcome, &controller, &ctx.format);
    output::report(
        outcome,
        &format!("Tag '{}' renamed to '{}'", previous, name.trim()),
        &ctx.format,
    )
}

pub async fn tags_delete(ctx: &AppContext, tag_no: i64, yes: bool) -> Result<()> {
    ctx.require_login()?;

    let mut controller = TagController::new(ctx.services.clone(), ctx.page_size());
    let outcome = controller.delete(tag_no, &PromptConfirm::new(yes)).await;
    warn_on_notice(&outcome, &controller, &ctx.format);
    output::report(outcome, "Tag deleted", &ctx.format)
}

/// A saved change whose list refresh failed still succeeds; say so.
fn warn_on_notice(outcome: &Outcome, controller: &TagController, format: &OutputFormat) {
    if let (Outcome::Done, Some(notice)) = (outcome, controller.notice()) {
        output::print_warning(notice, format);
    }
}
