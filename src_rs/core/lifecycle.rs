// 목적:
// - int[] 필드 하나에 대한 적재/저장/검증 단계를 명시적으로 제공한다.
//
// 설명:
// - attach: 레코드에 설정된 필드가 있는지 확인한다.
// - after_find / after_update: 텍스트 리터럴을 정수 목록으로 변환한다.
// - before_update: 목록을 텍스트 리터럴로 변환하고, 실패하면 값을 그대로 둔다.
// - validate: 필드 검증기에 위임한다.
//
// 디자인 패턴:
// - 명시적 파이프라인 단계(Explicit Pipeline Stage).
//
// 참조:
// - src_rs/core/codec.rs
// - src_rs/core/validation.rs
// - src_rs/index/postgres_repo.rs

use serde_json::Value;

use crate::core::codec::{decode_with, encode_value, DecodeMode};
use crate::core::errors::{CoreError, CoreResult};
use crate::core::record::Record;
use crate::core::validation::IntArrayValidator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntArrayField {
    field: String,
    mode: DecodeMode,
    validator: IntArrayValidator,
}

impl IntArrayField {
    pub fn new(field: &str) -> Self {
        Self {
            field: field.to_string(),
            mode: DecodeMode::default(),
            validator: IntArrayValidator::default(),
        }
    }

    pub fn with_mode(mut self, mode: DecodeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_validator(mut self, validator: IntArrayValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn mode(&self) -> DecodeMode {
        self.mode
    }

    /// 레코드가 설정된 필드를 가지고 있는지 확인한다.
    pub fn attach(&self, record: &Record) -> CoreResult<()> {
        if record.has_field(&self.field) {
            return Ok(());
        }

        Err(CoreError::InvalidConfig(format!(
            "레코드(id={})에 '{}' 필드가 없습니다",
            record.id, self.field
        )))
    }

    /// 저장소에서 읽은 직후 호출한다.
    pub fn after_find(&self, record: &mut Record) -> CoreResult<()> {
        self.to_native(record)
    }

    /// 저장 직전에 호출한다. 목록이 아니면 값을 바꾸지 않는다.
    pub fn before_update(&self, record: &mut Record) {
        let Some(value) = record.get(&self.field) else {
            return;
        };

        match encode_value(value) {
            Ok(literal) => record.set(&self.field, Value::String(literal)),
            Err(error) => {
                tracing::debug!(
                    field = %self.field,
                    record_id = record.id,
                    error = %error,
                    "리터럴 변환을 건너뜁니다"
                );
            }
        }
    }

    /// 저장 직후 호출한다.
    pub fn after_update(&self, record: &mut Record) -> CoreResult<()> {
        self.to_native(record)
    }

    /// 필드 값을 검증하고 통과 여부를 반환한다.
    pub fn validate(&self, record: &mut Record) -> bool {
        self.validator.validate_attribute(record, &self.field)
    }

    fn to_native(&self, record: &mut Record) -> CoreResult<()> {
        let literal = match record.get(&self.field) {
            Some(Value::String(literal)) => literal.clone(),
            _ => return Ok(()),
        };

        let values = decode_with(&literal, self.mode)?;
        record.set(
            &self.field,
            Value::Array(values.into_iter().map(Value::from).collect()),
        );
        Ok(())
    }
}
