//! # 문자열 유틸리티
//!
//! 요청 필드 검증과 정리에 사용하는 공통 함수들입니다.

use serde::Deserialize;
use validator::ValidationErrors;
use crate::core::errors::AppError;

/// 필수 문자열 필드 검증 및 정리
///
/// 값이 없거나 공백뿐이면 `message`를 담은 ValidationError를 반환하고,
/// 유효한 경우 앞뒤 공백을 제거한 문자열을 반환합니다.
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::require_field;
///
/// assert_eq!(require_field(Some("  Kim  "), "Doctor name is required.").unwrap(), "Kim");
/// assert!(require_field(None, "Doctor name is required.").is_err());
/// ```
pub fn require_field(value: Option<&str>, message: &str) -> Result<String, AppError> {
    match value.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed.to_string()),
        _ => Err(AppError::ValidationError(message.to_string())),
    }
}

/// 필수 비밀번호 필드 검증
///
/// 비밀번호는 공백도 의미가 있으므로 잘라내지 않고 원본 그대로 반환합니다.
/// 공백만으로 구성된 값은 비어 있는 것으로 취급합니다.
pub fn require_secret(value: Option<&str>, message: &str) -> Result<String, AppError> {
    match value {
        Some(secret) if is_valid_string(secret) => Ok(secret.to_string()),
        _ => Err(AppError::ValidationError(message.to_string())),
    }
}

/// 선택적 문자열 필드 정리
///
/// None 값이거나 빈 문자열/공백만 있는 경우 None을 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 반환합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 문자열이 유효한지 확인 (빈 문자열이 아니고 공백만으로 구성되지 않음)
pub fn is_valid_string(value: &str) -> bool {
    !value.trim().is_empty()
}

/// 선택적 문자열 필드를 위한 serde deserializer
///
/// `#[serde(default, deserialize_with = "deserialize_optional_string")]`와 함께 사용합니다.
///
/// ```text
/// {"name": "  Kim  "} → Some("Kim")
/// {"name": ""}        → None
/// {"name": null}      → None
/// ```
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// `validator` 검증 결과에서 첫 번째 사용자 메시지를 꺼냅니다.
///
/// 메시지가 지정되지 않은 규칙만 실패한 경우 전체 에러 문자열을 사용합니다.
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|field_errors| field_errors.iter())
        .find_map(|error| error.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}
