// 목적:
// - PostgreSQL int[] 컬럼을 가진 테이블의 조회/갱신을 담당한다.
//
// 설명:
// - 조회: 배열 컬럼을 `::text`로 읽고 after_find 단계로 정수 목록으로 바꾼다.
// - 갱신: 검증 -> before_update -> UPDATE -> after_update 순서로 처리한다.
// - 갱신이 실패하면 호출자의 레코드는 변경되지 않는다.
// - 테이블/컬럼명은 실행 시 검증해 SQL 주입 위험을 줄인다.
//
// 디자인 패턴:
// - 저장소 패턴(Repository Pattern).
//
// 참조:
// - src_rs/index/sql.rs
// - src_rs/core/lifecycle.rs

use std::str::FromStr;

use serde_json::Value;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use crate::core::errors::{CoreError, CoreResult};
use crate::core::lifecycle::IntArrayField;
use crate::core::record::Record;
use crate::index::sql::{build_select_sql, build_update_sql, validate_identifier};

pub struct PostgresRepository {
    pool: PgPool,
    table: String,
    key_column: String,
    fields: Vec<IntArrayField>,
}

impl PostgresRepository {
    #[allow(clippy::too_many_arguments)]
    pub async fn new(
        dsn: &str,
        table: &str,
        key_column: &str,
        fields: Vec<IntArrayField>,
        pool_min: u32,
        pool_max: u32,
        connect_timeout_ms: u64,
        statement_timeout_ms: u64,
    ) -> CoreResult<Self> {
        if dsn.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "postgres.dsn은 비어 있을 수 없습니다".to_string(),
            ));
        }

        validate_schema(table, key_column, &fields)?;

        // statement_timeout은 시작 파라미터로 넘겨 풀의 모든 연결에 적용한다.
        let connect_options = PgConnectOptions::from_str(dsn)
            .map_err(|error| CoreError::InvalidConfig(format!("postgres.dsn 해석 실패: {}", error)))?
            .options([("statement_timeout", statement_timeout_ms.max(1).to_string())]);

        let pool = PgPoolOptions::new()
            .min_connections(pool_min)
            .max_connections(pool_max.max(pool_min).max(1))
            .acquire_timeout(std::time::Duration::from_millis(connect_timeout_ms.max(1)))
            .connect_with(connect_options)
            .await
            .map_err(|error| CoreError::Db(format!("Postgres 연결 실패: {}", error)))?;

        tracing::debug!(table, key_column, columns = fields.len(), "Postgres 저장소 준비 완료");

        Ok(Self {
            pool,
            table: table.to_string(),
            key_column: key_column.to_string(),
            fields,
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// 키로 한 행을 읽어 배열 컬럼을 정수 목록으로 변환한 레코드를 반환한다.
    pub async fn find_by_id(&self, id: i64) -> CoreResult<Option<Record>> {
        let sql = build_select_sql(&self.table, &self.key_column, &self.column_names());

        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| CoreError::Db(format!("{} 조회 실패: {}", self.table, error)))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut record = self.map_row(&row)?;
        for field in &self.fields {
            field.after_find(&mut record)?;
        }

        Ok(Some(record))
    }

    /// 레코드의 배열 컬럼을 저장한다. 검증 오류가 있으면 아무것도 쓰지 않는다.
    pub async fn update(&self, record: &mut Record) -> CoreResult<u64> {
        let mut staged = record.clone();
        staged.clear_errors();

        for field in &self.fields {
            field.attach(&staged)?;
            field.validate(&mut staged);
        }
        if staged.has_errors() {
            record.errors = staged.errors.clone();
            return Err(CoreError::Validation(staged.errors));
        }

        for field in &self.fields {
            field.before_update(&mut staged);
        }

        let literals = self
            .fields
            .iter()
            .map(|field| bind_literal(&staged, field.field()))
            .collect::<CoreResult<Vec<_>>>()?;

        let sql = build_update_sql(&self.table, &self.key_column, &self.column_names());
        let mut query = sqlx::query(&sql);
        for literal in literals {
            query = query.bind(literal);
        }

        let result = query
            .bind(staged.id)
            .execute(&self.pool)
            .await
            .map_err(|error| CoreError::Db(format!("{} 갱신 실패: {}", self.table, error)))?;

        for field in &self.fields {
            field.after_update(&mut staged)?;
        }

        tracing::debug!(
            table = %self.table,
            record_id = staged.id,
            rows_affected = result.rows_affected(),
            "레코드 갱신 완료"
        );

        *record = staged;
        Ok(result.rows_affected())
    }

    fn column_names(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|field| field.field().to_string())
            .collect()
    }

    fn map_row(&self, row: &PgRow) -> CoreResult<Record> {
        let id = row.try_get::<i64, _>(self.key_column.as_str()).map_err(|error| {
            CoreError::Db(format!("{}.{} 파싱 실패: {}", self.table, self.key_column, error))
        })?;

        let mut record = Record::new(id);
        for field in &self.fields {
            let raw = row
                .try_get::<Option<String>, _>(field.field())
                .map_err(|error| {
                    CoreError::Db(format!("{}.{} 파싱 실패: {}", self.table, field.field(), error))
                })?;
            record.set(field.field(), raw.map(Value::String).unwrap_or(Value::Null));
        }

        Ok(record)
    }
}

/// 테이블/키/배열 컬럼 식별자를 모두 검증한다.
pub fn validate_schema(table: &str, key_column: &str, fields: &[IntArrayField]) -> CoreResult<()> {
    validate_identifier(table, "postgres.table")?;
    validate_identifier(key_column, "postgres.key_column")?;

    if fields.is_empty() {
        return Err(CoreError::InvalidConfig(
            "postgres.array_columns는 최소 1개 이상이어야 합니다".to_string(),
        ));
    }

    for field in fields {
        validate_identifier(field.field(), "postgres.array_columns")?;
        if field.field() == key_column {
            return Err(CoreError::InvalidConfig(format!(
                "키 컬럼은 배열 컬럼으로 사용할 수 없습니다: {}",
                key_column
            )));
        }
    }

    Ok(())
}

/// before_update를 거친 필드 값을 바인딩 가능한 리터럴로 꺼낸다.
fn bind_literal(record: &Record, field: &str) -> CoreResult<Option<String>> {
    match record.get(field) {
        Some(Value::String(literal)) => Ok(Some(literal.clone())),
        Some(Value::Null) | None => Ok(None),
        Some(other) => Err(CoreError::InvalidInput(format!(
            "{} 값을 int[] 리터럴로 변환할 수 없습니다: {}",
            field, other
        ))),
    }
}
