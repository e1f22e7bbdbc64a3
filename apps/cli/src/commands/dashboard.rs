//! Dashboard command.

use super::AppContext;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use ztlog_api::display_date;
use ztlog_pages::{DashboardController, Outcome};

pub async fn dashboard(ctx: &AppContext) -> Result<()> {
    ctx.require_login()?;

    let mut controller = DashboardController::new(ctx.services.clone());
    if let Outcome::Failed(message) = controller.load().await {
        anyhow::bail!(message);
    }

    let stats = controller.stats();
    match ctx.format {
        OutputFormat::Text => {
            output::print_heading("Dashboard");
            output::print_row("Posts", &stats.total_post_count.to_string());
            output::print_row("Tags", &stats.total_tag_count.to_string());
            output::print_row("Views", &stats.total_view_count.to_string());
            output::print_row("Comments", &stats.total_comment_count.to_string());

            output::print_heading("Recent posts");
            if controller.recent_posts().is_empty() {
                println!("No posts yet");
            }
            for post in controller.recent_posts() {
                println!(
                    "{:<6} {:<40} {}",
                    post.ctnt_no,
                    output::truncate(&post.title, 40),
                    display_date(post.inp_dttm.as_deref())
                );
            }

            output::print_heading("Tags");
            let names: Vec<String> = controller
                .tags()
                .iter()
                .map(|tag| format!("{} ({})", tag.tag_name, tag.content_count()))
                .collect();
            if names.is_empty() {
                println!("No tags yet");
            } else {
                println!("{}", names.join(", "));
            }
        }
        OutputFormat::Json => {
            output::print_json(&serde_json::json!({
                "stats": stats,
                "recent_posts": controller.recent_posts(),
                "tags": controller.tags(),
            }))?;
        }
    }

    Ok(())
}
