//! Post commands.

use super::AppContext;
use crate::output::{self, OutputFormat};
use crate::terminal::PromptConfirm;
use anyhow::{Context as _, Result};
use std::path::PathBuf;
use ztlog_api::display_date;
use ztlog_pages::{Outcome, PostEditorController, PostListController};

/// Editor fields given on the command line. `None` leaves a field unchanged
/// when editing.
#[derive(Debug, Default)]
pub struct PostInput {
    pub title: Option<String>,
    pub body: Option<String>,
    pub body_file: Option<PathBuf>,
    pub tags: Option<Vec<i64>>,
}

impl PostInput {
    fn body(&self) -> Result<Option<String>> {
        match (&self.body, &self.body_file) {
            (Some(body), _) => Ok(Some(body.clone())),
            (None, Some(path)) => std::fs::read_to_string(path)
                .map(Some)
                .with_context(|| format!("failed to read {}", path.display())),
            (None, None) => Ok(None),
        }
    }

    fn apply(&self, editor: &mut PostEditorController) -> Result<()> {
        if let Some(title) = &self.title {
            editor.set_title(title.clone());
        }
        if let Some(body) = self.body()? {
            editor.set_body(body);
        }
        if let Some(wanted) = &self.tags {
            let selected = editor.selected_tags().to_vec();
            for tag_no in selected.iter().filter(|t| !wanted.contains(*t)) {
                editor.toggle_tag(*tag_no);
            }
            for tag_no in wanted.iter().filter(|t| !selected.contains(*t)) {
                editor.toggle_tag(*tag_no);
            }
        }
        Ok(())
    }
}

/// List one page of posts, optionally filtered by title.
pub async fn posts_list(ctx: &AppContext, page: u32, search: Option<String>) -> Result<()> {
    ctx.require_login()?;

    let mut controller = PostListController::new(ctx.services.clone(), ctx.page_size());
    if let Outcome::Failed(message) = controller.load(page).await {
        anyhow::bail!(message);
    }
    if let Some(search) = search {
        controller.set_search(search);
    }

    let posts = controller.visible_posts();
    match ctx.format {
        OutputFormat::Text => {
            if posts.is_empty() {
                println!("No posts found");
            } else {
                println!("{:<6} {:<40} {:<20} {}", "ID", "Title", "Tags", "Created");
                println!("{}", "-".repeat(80));
                for post in &posts {
                    let tags: Vec<&str> = post
                        .tags
                        .iter()
                        .filter_map(|t| t.tag_name.as_deref())
                        .collect();
                    println!(
                        "{:<6} {:<40} {:<20} {}",
                        post.ctnt_no,
                        output::truncate(&post.title, 40),
                        output::truncate(&tags.join(","), 20),
                        display_date(post.inp_dttm.as_deref())
                    );
                }
            }
            output::print_pager(&controller.pager(), controller.total_count());
        }
        OutputFormat::Json => {
            output::print_json(&serde_json::json!({
                "posts": posts,
                "page": controller.pager(),
                "total_count": controller.total_count(),
            }))?;
        }
    }

    Ok(())
}

/// Show one post with its tags.
pub async fn posts_show(ctx: &AppContext, ctnt_no: i64) -> Result<()> {
    ctx.require_login()?;

    let mut editor = PostEditorController::edit(ctx.services.clone(), ctnt_no);
    if let Outcome::Failed(message) = editor.load().await {
        anyhow::bail!(message);
    }

    let tag_names: Vec<&str> = editor
        .all_tags()
        .iter()
        .filter(|tag| editor.selected_tags().contains(&tag.tag_no))
        .map(|tag| tag.tag_name.as_str())
        .collect();

    match ctx.format {
        OutputFormat::Text => {
            output::print_heading("Post");
            output::print_row("ID", &ctnt_no.to_string());
            output::print_row("Title", editor.title());
            output::print_row("Summary", editor.sub_title());
            output::print_row("Tags", &tag_names.join(", "));
            output::print_divider();
            println!("{}", editor.body());
        }
        OutputFormat::Json => {
            output::print_json(&serde_json::json!({
                "ctntNo": ctnt_no,
                "title": editor.title(),
                "subTitle": editor.sub_title(),
                "body": editor.body(),
                "tags": editor.selected_tags(),
            }))?;
        }
    }

    Ok(())
}

pub async fn posts_create(ctx: &AppContext, input: PostInput) -> Result<()> {
    ctx.require_login()?;

    let mut editor = PostEditorController::create(ctx.services.clone());
    editor.load().await;
    input.apply(&mut editor)?;

    let outcome = editor.submit().await;
    output::report(outcome, "Post created", &ctx.format)
}

pub async fn posts_edit(ctx: &AppContext, ctnt_no: i64, input: PostInput) -> Result<()> {
    ctx.require_login()?;

    let mut editor = PostEditorController::edit(ctx.services.clone(), ctnt_no);
    if let Outcome::Failed(message) = editor.load().await {
        anyhow::bail!(message);
    }
    input.apply(&mut editor)?;

    let outcome = editor.submit().await;
    output::report(outcome, "Post updated", &ctx.format)
}

pub async fn posts_delete(ctx: &AppContext, ctnt_no: i64, yes: bool) -> Result<()> {
    ctx.require_login()?;

    let mut controller = PostListController::new(ctx.services.clone(), ctx.page_size());
    let outcome = controller.delete(ctnt_no, &PromptConfirm::new(yes)).await;
    if let (Outcome::Done, Some(notice)) = (&outcome, controller.notice()) {
        output::print_warning(notice, &ctx.format);
    }
    output::report(outcome, "Post deleted", &ctx.format)
}
