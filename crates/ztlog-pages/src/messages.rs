//! User-facing messages.

pub const LOGIN_REQUIRED_FIELDS: &str = "아이디와 비밀번호를 입력해주세요.";
pub const LOGIN_FAILED: &str = "로그인에 실패했습니다.";
pub const LOGIN_ERROR: &str = "로그인 중 오류가 발생했습니다.";
pub const SIGNUP_FAILED: &str = "회원가입에 실패했습니다.";

pub const POST_REQUIRED_FIELDS: &str = "제목과 내용을 입력해주세요.";
pub const POST_TITLE_TOO_LONG: &str = "제목은 100자 이내로 입력해주세요.";
pub const POST_SAVE_FAILED: &str = "저장 중 오류가 발생했습니다.";
pub const POST_UPDATE_FAILED: &str = "수정 중 오류가 발생했습니다.";
pub const POST_DELETE_FAILED_PREFIX: &str = "삭제 실패: ";

pub const TAG_NAME_REQUIRED: &str = "태그 이름을 입력해주세요.";
pub const TAG_NAME_TOO_LONG: &str = "태그 이름은 최대 15자입니다.";
pub const TAG_ADD_FAILED_PREFIX: &str = "태그 추가 실패: ";
pub const TAG_UPDATE_FAILED_PREFIX: &str = "태그 수정 실패: ";
pub const TAG_DELETE_FAILED_PREFIX: &str = "태그 삭제 실패: ";

pub const TAG_LOAD_FAILED_PREFIX: &str = "태그 조회 실패: ";

/// Shown when a change was saved but the list could not be refreshed.
pub const LIST_RELOAD_FAILED_PREFIX: &str = "목록을 새로고침하지 못했습니다: ";

pub const CONFIRM_DELETE: &str = "정말 삭제하시겠습니까?";

pub const PASSWORD_REQUIRED_FIELDS: &str = "모든 항목을 입력해 주세요.";
pub const PASSWORD_TOO_SHORT: &str = "새 비밀번호는 8자 이상이어야 합니다.";
pub const PASSWORD_MISMATCH: &str = "새 비밀번호가 일치하지 않습니다.";
pub const PASSWORD_CHANGED: &str = "비밀번호가 변경되었습니다.";
pub const PASSWORD_CHANGE_FAILED: &str = "비밀번호 변경에 실패했습니다. 다시 시도해 주세요.";

/// Text the operator must type to confirm withdrawal.
pub const WITHDRAW_PHRASE: &str = "탈퇴합니다";
pub const WITHDRAW_PHRASE_MISMATCH: &str = "'탈퇴합니다'를 정확히 입력해 주세요.";
pub const WITHDRAW_FAILED: &str = "회원 탈퇴에 실패했습니다. 다시 시도해 주세요.";
