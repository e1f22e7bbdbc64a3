//! Output formatting for the CLI.

use clap::ValueEnum;
use serde::Serialize;
use ztlog_pages::{Outcome, Pager};

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print a serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a success message.
pub fn print_success(message: &str, format: &OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", message),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({ "status": "success", "message": message })
            );
        }
    }
}

/// Print an error message.
pub fn print_error(message: &str, format: &OutputFormat) {
    match format {
        OutputFormat::Text => eprintln!("Error: {}", message),
        OutputFormat::Json => {
            eprintln!(
                "{}",
                serde_json::json!({ "status": "error", "message": message })
            );
        }
    }
}

/// Print a non-fatal warning to stderr.
pub fn print_warning(message: &str, format: &OutputFormat) {
    match format {
        OutputFormat::Text => eprintln!("Warning: {}", message),
        OutputFormat::Json => {
            eprintln!(
                "{}",
                serde_json::json!({ "status": "warning", "message": message })
            );
        }
    }
}

/// Report a controller outcome. Failures become errors so the process exits
/// non-zero.
pub fn report(outcome: Outcome, success: &str, format: &OutputFormat) -> anyhow::Result<()> {
    match outcome {
        Outcome::Done => {
            print_success(success, format);
            Ok(())
        }
        Outcome::Cancelled => {
            print_success("취소되었습니다.", format);
            Ok(())
        }
        Outcome::Invalid(message) | Outcome::Failed(message) => anyhow::bail!(message),
        Outcome::Discarded => anyhow::bail!("요청이 취소되었습니다."),
    }
}

/// Print a table row.
pub fn print_row(label: &str, value: &str) {
    println!("  {:<16} {}", format!("{}:", label), value);
}

/// Print a divider line.
pub fn print_divider() {
    println!("{}", "-".repeat(50));
}

/// Print a heading.
pub fn print_heading(text: &str) {
    println!("\n{}", text);
    print_divider();
}

/// `Page 2 of 5 (42 total)`, or nothing when there is a single page.
pub fn print_pager(pager: &Pager, total: u64) {
    if pager.is_visible() {
        println!(
            "\nPage {} of {} ({} total)",
            pager.current,
            pager.total,
            total
        );
    } else {
        println!("\n{} total", total);
    }
}

/// Cut `text` to `width` characters, marking the cut.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
