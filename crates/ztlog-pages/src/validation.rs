//! Client-side form checks. Each returns the message to show, before any
//! request is sent.

use crate::messages;
use regex::Regex;
use std::sync::OnceLock;

pub const TAG_NAME_MAX_CHARS: usize = 15;
pub const POST_TITLE_MAX_CHARS: usize = 100;
pub const SUBTITLE_MAX_CHARS: usize = 100;
pub const PASSWORD_MIN_CHARS: usize = 8;

pub fn validate_login(user_id: &str, password: &str) -> Result<(), String> {
    if user_id.is_empty() || password.is_empty() {
        return Err(messages::LOGIN_REQUIRED_FIELDS.to_string());
    }
    Ok(())
}

/// Trimmed tag name of 1..=15 characters.
pub fn validate_tag_name(name: &str) -> Result<String, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(messages::TAG_NAME_REQUIRED.to_string());
    }
    if name.chars().count() > TAG_NAME_MAX_CHARS {
        return Err(messages::TAG_NAME_TOO_LONG.to_string());
    }
    Ok(name.to_string())
}

/// Title and body required; title at most 100 characters after trimming.
pub fn validate_post(title: &str, body: &str) -> Result<(), String> {
    let title = title.trim();
    if title.is_empty() || body.trim().is_empty() {
        return Err(messages::POST_REQUIRED_FIELDS.to_string());
    }
    if title.chars().count() > POST_TITLE_MAX_CHARS {
        return Err(messages::POST_TITLE_TOO_LONG.to_string());
    }
    Ok(())
}

pub fn validate_password_change(current: &str, new: &str, confirm: &str) -> Result<(), String> {
    if current.is_empty() || new.is_empty() || confirm.is_empty() {
        return Err(messages::PASSWORD_REQUIRED_FIELDS.to_string());
    }
    if new.chars().count() < PASSWORD_MIN_CHARS {
        return Err(messages::PASSWORD_TOO_SHORT.to_string());
    }
    if new != confirm {
        return Err(messages::PASSWORD_MISMATCH.to_string());
    }
    Ok(())
}

pub fn validate_withdraw_phrase(typed: &str) -> Result<(), String> {
    if typed != messages::WITHDRAW_PHRASE {
        return Err(messages::WITHDRAW_PHRASE_MISMATCH.to_string());
    }
    Ok(())
}

fn markup_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]*>").expect("markup pattern is valid"))
}

fn whitespace_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

/// Plain-text excerpt of a markup body: tags become spaces, whitespace runs
/// collapse, the result is trimmed and cut to 100 characters.
pub fn derive_subtitle(body: &str) -> String {
    let plain = markup_pattern().replace_all(body, " ");
    let collapsed = whitespace_pattern().replace_all(&plain, " ");
    collapsed.trim().chars().take(SUBTITLE_MAX_CHARS).collect()
}
