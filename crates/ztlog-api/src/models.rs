//! Backend entity and payload types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Parse a backend timestamp (`2025-01-15T10:30:00`, optionally with
/// fractional seconds, or the space-separated form).
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value.trim(), format).ok())
}

/// `YYYY-MM-DD` for display; the raw value when it does not parse.
pub fn display_date(value: Option<&str>) -> String {
    match value {
        Some(raw) => parse_timestamp(raw)
            .map(|ts| ts.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| raw.to_string()),
        None => "-".to_string(),
    }
}

/// Tag reference embedded in a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRef {
    pub tag_no: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
}

/// A blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub ctnt_no: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub sub_title: Option<String>,
    /// Rich-text markup; opaque to this client.
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub inp_dttm: Option<String>,
    #[serde(default)]
    pub upd_dttm: Option<String>,
    #[serde(default)]
    pub tags: Vec<TagRef>,
}

impl Content {
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        self.inp_dttm.as_deref().and_then(parse_timestamp)
    }

    pub fn tag_numbers(&self) -> Vec<i64> {
        self.tags.iter().map(|t| t.tag_no).collect()
    }
}

/// Post reference embedded in a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRef {
    #[serde(default)]
    pub ctnt_no: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub tag_no: i64,
    pub tag_name: String,
    #[serde(default)]
    pub contents: Vec<ContentRef>,
    #[serde(default)]
    pub inp_dttm: Option<String>,
}

impl Tag {
    /// Number of posts using this tag.
    pub fn content_count(&self) -> usize {
        self.contents.len()
    }
}

/// Aggregate counters from `GET /v1/main`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default, alias = "totalPosts")]
    pub total_post_count: u64,
    #[serde(default, alias = "totalTags")]
    pub total_tag_count: u64,
    #[serde(default, alias = "totalViews")]
    pub total_view_count: u64,
    #[serde(default, alias = "totalComments")]
    pub total_comment_count: u64,
}

/// `data` of a login answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub access_token: String,
}

/// Tag key used in post payloads: `{tagNo}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagKey {
    pub tag_no: i64,
}

/// Body of `POST /v1/contents` and `PUT /v1/contents`.
///
/// `ctnt_no` is set only for updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ctnt_no: Option<i64>,
    pub title: String,
    pub sub_title: String,
    pub body: String,
    pub tags: Vec<TagKey>,
}

impl ContentDraft {
    pub fn new(title: impl Into<String>, sub_title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            ctnt_no: None,
            title: title.into(),
            sub_title: sub_title.into(),
            body: body.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tags(mut self, tag_numbers: impl IntoIterator<Item = i64>) -> Self {
        self.tags = tag_numbers.into_iter().map(|tag_no| TagKey { tag_no }).collect();
        self
    }

    pub fn for_update(mut self, ctnt_no: i64) -> Self {
        self.ctnt_no = Some(ctnt_no);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_content_decodes_backend_fields() {
        let content: Content = serde_json::from_value(json!({
            "ctntNo": 12,
            "title": "Hello",
            "subTitle": "first post",
            "body": "<p>hi</p>",
            "inpDttm": "2025-01-15T10:30:00",
            "tags": [{ "tagNo": 3, "tagName": "rust" }]
        }))
        .unwrap();

        assert_eq!(content.ctnt_no, 12);
        assert_eq!(content.tag_numbers(), vec![3]);
        assert_eq!(content.author, None);
        assert_eq!(
            content.created_at().unwrap().format("%Y-%m-%d").to_string(),
            "2025-01-15"
        );
    }

    #[test]
    fn test_tag_content_count() {
        let tag: Tag = serde_json::from_value(json!({
            "tagNo": 1,
            "tagName": "rust",
            "contents": [{ "ctntNo": 1 }, { "ctntNo": 2 }]
        }))
        .unwrap();
        assert_eq!(tag.content_count(), 2);

        let bare: Tag = serde_json::from_value(json!({ "tagNo": 2, "tagName": "go" })).unwrap();
        assert_eq!(bare.content_count(), 0);
    }

    #[test]
    fn test_dashboard_stats_accepts_both_spellings() {
        let counted: DashboardStats = serde_json::from_value(json!({
            "totalPostCount": 10, "totalTagCount": 4, "totalViewCount": 99, "totalCommentCount": 1
        }))
        .unwrap();
        let short: DashboardStats = serde_json::from_value(json!({
            "totalPosts": 10, "totalTags": 4, "totalViews": 99, "totalComments": 1
        }))
        .unwrap();
        assert_eq!(counted, short);

        let partial: DashboardStats = serde_json::from_value(json!({ "totalPosts": 2 })).unwrap();
        assert_eq!(partial.total_tag_count, 0);
    }

    #[test]
    fn test_create_draft_omits_id() {
        let draft = ContentDraft::new("Title", "sub", "<p>body</p>").with_tags([1, 2]);
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Title",
                "subTitle": "sub",
                "body": "<p>body</p>",
                "tags": [{ "tagNo": 1 }, { "tagNo": 2 }]
            })
        );

        let update = serde_json::to_value(draft.for_update(7)).unwrap();
        assert_eq!(update["ctntNo"], 7);
    }

    #[test]
    fn test_display_date() {
        assert_eq!(display_date(Some("2025-01-15 10:30:00")), "2025-01-15");
        assert_eq!(display_date(Some("yesterday")), "yesterday");
        assert_eq!(display_date(None), "-");
    }
}
