// 목적:
// - 필드 값이 정수 배열인지 검증한다.
//
// 설명:
// - 목록이 아니면 NotAnArray, 정수가 아닌 첫 원소에서 NonIntegerElement로 즉시 중단한다.
// - 숫자 문자열, 소수부가 0인 실수, bool은 정수로 인정하지 않는다.
// - 필드 검증기는 오류를 레코드에 붙이고, 설정 시 같은 메시지를 error 로그로 남긴다.
//
// 디자인 패턴:
// - 실패 빠르게(Fail Fast) + 검증기 객체(Validator Object).
//
// 참조:
// - src_rs/core/codec.rs
// - src_rs/core/lifecycle.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::codec::{as_strict_integer, render_element};
use crate::core::errors::ArrayError;
use crate::core::record::Record;

/// 값이 엄격한 정수로만 이루어진 목록인지 검증한다.
pub fn validate_is_integer_array(value: &Value) -> Result<(), ArrayError> {
    let Value::Array(items) = value else {
        return Err(ArrayError::NotAnArray);
    };

    match items.iter().find(|item| as_strict_integer(item).is_none()) {
        Some(item) => Err(ArrayError::NonIntegerElement(describe_element(item))),
        None => Ok(()),
    }
}

/// 검증 실패를 필드 이름이 포함된 사용자 메시지로 만든다.
pub fn error_message(field: &str, error: &ArrayError) -> String {
    match error {
        ArrayError::NotAnArray => format!("{} must be an array of integers.", field),
        ArrayError::NonIntegerElement(element) => {
            format!("{}: value {} is not an integer.", field, element)
        }
        other => format!("{}: {}", field, other),
    }
}

fn describe_element(value: &Value) -> String {
    render_element(value).unwrap_or_else(|| value.to_string())
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// 레코드 필드에 적용하는 정수 배열 검증기다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntArrayValidator {
    #[serde(default = "default_skip_on_empty")]
    pub skip_on_empty: bool,
    #[serde(default)]
    pub log_category: Option<String>,
}

fn default_skip_on_empty() -> bool {
    true
}

impl Default for IntArrayValidator {
    fn default() -> Self {
        Self {
            skip_on_empty: default_skip_on_empty(),
            log_category: None,
        }
    }
}

impl IntArrayValidator {
    pub fn new(skip_on_empty: bool) -> Self {
        Self {
            skip_on_empty,
            log_category: None,
        }
    }

    pub fn with_log_category(mut self, category: impl Into<String>) -> Self {
        self.log_category = Some(category.into());
        self
    }

    /// 레코드의 필드를 검증하고 실패 시 오류를 레코드에 추가한다.
    ///
    /// 필드가 없으면 null로 간주한다. 검증 통과 여부를 반환한다.
    pub fn validate_attribute(&self, record: &mut Record, field: &str) -> bool {
        let value = record.get(field).cloned().unwrap_or(Value::Null);
        if self.skip_on_empty && is_empty_value(&value) {
            return true;
        }

        match validate_is_integer_array(&value) {
            Ok(()) => true,
            Err(error) => {
                let message = error_message(field, &error);
                if let Some(category) = &self.log_category {
                    tracing::error!(category = %category, field, record_id = record.id, "{}", message);
                }
                record.add_error(field, message);
                false
            }
        }
    }
}
