// 목적:
// - 레코드 적재/저장/검증 작업의 파이프라인을 실행한다.
//
// 설명:
// - JSON 페이로드로 작업을 받아 페이로드 검증 -> 저장소 준비 -> 단계 실행 순서로 처리한다.
// - validate 작업은 DB 없이 필드 검증만 수행한다.
//
// 디자인 패턴:
// - 파이프라인(Pipeline).
//
// 참조:
// - src_rs/index/postgres_repo.rs
// - src_rs/core/lifecycle.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Instant;

use crate::core::codec::DecodeMode;
use crate::core::errors::{CoreError, CoreResult, FieldError};
use crate::core::lifecycle::IntArrayField;
use crate::core::record::Record;
use crate::core::validation::IntArrayValidator;
use crate::index::postgres_repo::{validate_schema, PostgresRepository};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgresConfigPayload {
    pub dsn: String,
    pub table: String,
    pub key_column: String,
    pub array_columns: Vec<String>,
    pub pool_min: u32,
    pub pool_max: u32,
    pub connect_timeout_ms: u64,
    pub statement_timeout_ms: u64,
    #[serde(default)]
    pub strict_decode: bool,
    #[serde(default = "default_skip_on_empty")]
    pub skip_on_empty: bool,
    #[serde(default)]
    pub log_category: Option<String>,
}

fn default_skip_on_empty() -> bool {
    true
}

impl PostgresConfigPayload {
    /// 설정된 배열 컬럼마다 필드 바인딩을 만든다.
    pub fn field_bindings(&self) -> Vec<IntArrayField> {
        let validator = IntArrayValidator {
            skip_on_empty: self.skip_on_empty,
            log_category: self.log_category.clone(),
        };

        self.array_columns
            .iter()
            .map(|column| {
                IntArrayField::new(column)
                    .with_mode(DecodeMode::from_strict_flag(self.strict_decode))
                    .with_validator(validator.clone())
            })
            .collect()
    }

    fn validate(&self) -> CoreResult<()> {
        if self.dsn.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "postgres.dsn은 비어 있을 수 없습니다".to_string(),
            ));
        }

        if self.pool_max == 0 {
            return Err(CoreError::InvalidConfig(
                "postgres.pool_max는 1 이상이어야 합니다".to_string(),
            ));
        }

        validate_schema(&self.table, &self.key_column, &self.field_bindings())
    }

    async fn connect(&self) -> CoreResult<PostgresRepository> {
        PostgresRepository::new(
            &self.dsn,
            &self.table,
            &self.key_column,
            self.field_bindings(),
            self.pool_min,
            self.pool_max,
            self.connect_timeout_ms,
            self.statement_timeout_ms,
        )
        .await
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadRequestPayload {
    pub id: i64,
    pub postgres: PostgresConfigPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadResultPayload {
    pub record: Option<Record>,
    pub elapsed_ms: u128,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveRequestPayload {
    pub record: Record,
    pub postgres: PostgresConfigPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveResultPayload {
    pub id: i64,
    pub rows_affected: u64,
    pub record: Record,
    pub elapsed_ms: u128,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequestPayload {
    pub fields: Map<String, Value>,
    pub columns: Vec<String>,
    #[serde(default = "default_skip_on_empty")]
    pub skip_on_empty: bool,
    #[serde(default)]
    pub log_category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResultPayload {
    pub valid: bool,
    pub errors: Vec<FieldError>,
}

/// 키로 레코드를 읽는다.
pub async fn execute_load(payload: LoadRequestPayload) -> CoreResult<LoadResultPayload> {
    payload.postgres.validate()?;

    let started = Instant::now();
    let repository = payload.postgres.connect().await?;
    let record = repository.find_by_id(payload.id).await?;

    tracing::info!(
        table = %payload.postgres.table,
        record_id = payload.id,
        found = record.is_some(),
        "레코드 적재 완료"
    );

    Ok(LoadResultPayload {
        record,
        elapsed_ms: started.elapsed().as_millis(),
    })
}

/// 레코드의 배열 컬럼을 저장한다.
pub async fn execute_save(payload: SaveRequestPayload) -> CoreResult<SaveResultPayload> {
    payload.postgres.validate()?;

    let started = Instant::now();
    let repository = payload.postgres.connect().await?;
    let mut record = payload.record;
    let rows_affected = repository.update(&mut record).await?;

    tracing::info!(
        table = %payload.postgres.table,
        record_id = record.id,
        rows_affected,
        "레코드 저장 완료"
    );

    Ok(SaveResultPayload {
        id: record.id,
        rows_affected,
        record,
        elapsed_ms: started.elapsed().as_millis(),
    })
}

/// DB 없이 필드 값만 검증한다.
pub fn execute_validate(payload: ValidateRequestPayload) -> CoreResult<ValidateResultPayload> {
    if payload.columns.is_empty() {
        return Err(CoreError::InvalidInput(
            "columns는 최소 1개 이상이어야 합니다".to_string(),
        ));
    }

    let validator = IntArrayValidator {
        skip_on_empty: payload.skip_on_empty,
        log_category: payload.log_category,
    };

    let mut record = Record {
        id: 0,
        fields: payload.fields,
        errors: Vec::new(),
    };
    for column in &payload.columns {
        validator.validate_attribute(&mut record, column);
    }

    Ok(ValidateResultPayload {
        valid: !record.has_errors(),
        errors: record.errors,
    })
}
