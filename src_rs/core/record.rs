// 목적:
// - 저장소와 파이프라인이 주고받는 레코드 모델을 정의한다.
//
// 설명:
// - 필드 값은 호스트가 넘기는 동적 값(serde_json::Value)으로 보관한다.
// - 검증 오류는 레코드에 누적되고 호출자에게 그대로 전달된다.
//
// 참조:
// - src_rs/core/lifecycle.rs
// - src_rs/core/validation.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::errors::FieldError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    #[serde(default)]
    pub fields: Map<String, Value>,
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

impl Record {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            fields: Map::new(),
            errors: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: &str, value: Value) -> Self {
        self.fields.insert(field.to_string(), value);
        self
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn set(&mut self, field: &str, value: Value) {
        self.fields.insert(field.to_string(), value);
    }

    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }
}
