//! Response envelopes.
//!
//! Every endpoint answers `{code, message, data}`. List endpoints are looser:
//! rows arrive as `data.content`, `data.list`, a top-level `list`, or a bare
//! array, and the total as `totalElements`, `count` or `totalCount`.
//! [`Page::from_body`] folds all of these into one [`Page`].

use crate::error::{ApiError, ApiResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `code` value the backend uses for a successful call.
pub const SUCCESS_CODE: &str = "SUCCESS";

const NO_DATA_MESSAGE: &str = "응답에 데이터가 없습니다.";
const ROW_KEYS: [&str; 2] = ["content", "list"];
const TOTAL_KEYS: [&str; 3] = ["totalElements", "count", "totalCount"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

/// Envelope whose payload is not inspected.
pub type Ack = ApiResponse<Value>;

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.code.as_deref() == Some(SUCCESS_CODE)
    }

    /// Unwrap `data`, failing when the envelope carries none.
    pub fn into_data(self) -> ApiResult<T> {
        match self.data {
            Some(data) => Ok(data),
            None => Err(ApiError::request_failed(
                None,
                self.message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| NO_DATA_MESSAGE.to_string()),
            )),
        }
    }
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
}

impl<T: DeserializeOwned> Page<T> {
    /// Decode a list endpoint body in any of the accepted shapes.
    ///
    /// Rows are looked up in `data` first, then at the top level. A missing
    /// total falls back to the number of rows.
    pub fn from_body(body: Value) -> ApiResult<Self> {
        let data = body.get("data").filter(|d| !d.is_null());
        let Some(rows) = data.and_then(rows_of).or_else(|| rows_of(&body)) else {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or(NO_DATA_MESSAGE);
            return Err(ApiError::request_failed(None, message));
        };

        let content: Vec<T> = serde_json::from_value(rows.clone())
            .map_err(|e| ApiError::request_failed(None, format!("응답 형식 오류: {}", e)))?;

        let holders = [data, Some(&body)];
        let total_elements = holders
            .iter()
            .flatten()
            .find_map(|holder| total_of(holder))
            .unwrap_or(content.len() as u64);
        let total_pages = holders
            .iter()
            .flatten()
            .find_map(|holder| holder.get("totalPages").and_then(Value::as_u64))
            .map(|pages| u32::try_from(pages).unwrap_or(u32::MAX));

        Ok(Self {
            content,
            total_elements,
            total_pages,
        })
    }
}

fn rows_of(value: &Value) -> Option<&Value> {
    if value.is_array() {
        return Some(value);
    }
    ROW_KEYS
        .iter()
        .find_map(|key| value.get(key).filter(|rows| rows.is_array()))
}

fn total_of(value: &Value) -> Option<u64> {
    TOTAL_KEYS
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_u64))
}

impl<T> Page<T> {
    /// Page count: `totalPages` when sent, else `ceil(totalElements / page_size)`.
    /// Never less than 1.
    pub fn page_count(&self, page_size: u32) -> u32 {
        let count = match self.total_pages {
            Some(pages) => pages,
            None => {
                let size = u64::from(page_size.max(1));
                u32::try_from(self.total_elements.div_ceil(size)).unwrap_or(u32::MAX)
            }
        };
        count.max(1)
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
            total_pages: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(body: Value) -> ApiResult<Page<Value>> {
        Page::from_body(body)
    }

    #[test]
    fn test_page_count_derived_from_total() {
        let page = page(json!({
            "code": "SUCCESS",
            "data": { "content": [1, 2, 3, 4, 5], "totalElements": 42 }
        }))
        .unwrap();

        assert_eq!(page.content.len(), 5);
        assert_eq!(page.page_count(10), 5);
    }

    #[test]
    fn test_page_count_prefers_server_value() {
        let page = page(json!({
            "data": { "content": [], "totalElements": 42, "totalPages": 3 }
        }))
        .unwrap();
        assert_eq!(page.page_count(10), 3);
    }

    #[test]
    fn test_page_count_minimum_one() {
        let empty = Page::<u8>::default();
        assert_eq!(empty.page_count(10), 1);
        assert_eq!(
            Page::<u8> {
                total_pages: Some(0),
                ..Page::default()
            }
            .page_count(10),
            1
        );
    }

    #[test]
    fn test_page_count_exact_multiple() {
        let page = Page::<u8> {
            total_elements: 30,
            ..Page::default()
        };
        assert_eq!(page.page_count(10), 3);
        assert_eq!(page.page_count(0), 30);
    }

    #[test]
    fn test_top_level_list_is_accepted() {
        let page = page(json!({ "list": [{ "tagNo": 1 }, { "tagNo": 2 }] })).unwrap();
        assert_eq!(page.content.len(), 2);
        assert_eq!(page.total_elements, 2);
        assert_eq!(page.page_count(10), 1);
    }

    #[test]
    fn test_data_list_and_bare_array_are_accepted() {
        let nested = page(json!({ "data": { "list": [1, 2, 3], "count": 13 } })).unwrap();
        assert_eq!(nested.content.len(), 3);
        assert_eq!(nested.total_elements, 13);

        let bare = page(json!([1, 2])).unwrap();
        assert_eq!(bare.total_elements, 2);

        let data_array = page(json!({ "data": [1], "totalCount": 7 })).unwrap();
        assert_eq!(data_array.content.len(), 1);
        assert_eq!(data_array.total_elements, 7);
    }

    #[test]
    fn test_missing_total_falls_back_to_row_count() {
        let page = page(json!({ "data": { "content": [1, 2, 3] } })).unwrap();
        assert_eq!(page.total_elements, 3);
    }

    #[test]
    fn test_total_keys_in_order() {
        let page = page(json!({
            "data": { "content": [1], "count": 5, "totalCount": 9 }
        }))
        .unwrap();
        assert_eq!(page.total_elements, 5);
    }

    #[test]
    fn test_body_without_rows_uses_server_message() {
        let err = page(json!({ "code": "FAIL", "message": "권한이 없습니다." })).unwrap_err();
        assert!(matches!(err, ApiError::RequestFailed { status: None, .. }));
        assert_eq!(err.to_string(), "권한이 없습니다.");

        let err = page(json!({ "data": { "totalElements": 3 } })).unwrap_err();
        assert_eq!(err.to_string(), NO_DATA_MESSAGE);
    }

    #[test]
    fn test_undecodable_rows_fail() {
        let result: ApiResult<Page<u8>> = Page::from_body(json!({ "list": ["x"] }));
        assert!(result.unwrap_err().to_string().starts_with("응답 형식 오류"));
    }

    #[test]
    fn test_missing_data_uses_server_message() {
        let body: ApiResponse<u8> = serde_json::from_value(json!({
            "code": "FAIL",
            "message": "없는 글입니다."
        }))
        .unwrap();
        assert!(!body.is_success());
        assert_eq!(body.into_data().unwrap_err().to_string(), "없는 글입니다.");
    }
}
