// 목적:
// - SQL 관련 공통 유틸리티를 제공한다.
//
// 설명:
// - 동적 테이블/컬럼 식별자 검증과 int[] 컬럼 조회/갱신 SQL 생성을 담당한다.
// - int[] 컬럼은 조회 시 `::text`, 갱신 시 `$n::int[]`로 텍스트 리터럴을 주고받는다.
//
// 디자인 패턴:
// - 가드 함수(Guard Function).
//
// 참조:
// - src_rs/index/postgres_repo.rs

use crate::core::errors::{CoreError, CoreResult};

/// 테이블/컬럼 식별자의 허용 문자를 검증한다.
pub fn validate_identifier(value: &str, field_name: &str) -> CoreResult<()> {
    if value.trim().is_empty() {
        return Err(CoreError::InvalidConfig(format!(
            "{}는 비어 있을 수 없습니다",
            field_name
        )));
    }

    let valid = value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '_');

    if !valid {
        return Err(CoreError::InvalidConfig(format!(
            "{}에는 영문/숫자/밑줄만 사용할 수 있습니다: {}",
            field_name, value
        )));
    }

    Ok(())
}

/// 키로 한 행을 읽는 SELECT 문을 만든다. 키는 bigint, 배열 컬럼은 텍스트 리터럴로 읽는다.
pub fn build_select_sql(table: &str, key_column: &str, array_columns: &[String]) -> String {
    let mut projections = vec![format!("{}::bigint AS {}", key_column, key_column)];
    projections.extend(
        array_columns
            .iter()
            .map(|column| format!("{}::text AS {}", column, column)),
    );

    format!(
        "SELECT {} FROM {} WHERE {} = $1",
        projections.join(", "),
        table,
        key_column
    )
}

/// 배열 컬럼을 갱신하는 UPDATE 문을 만든다. 키는 마지막 바인딩이다.
pub fn build_update_sql(table: &str, key_column: &str, array_columns: &[String]) -> String {
    let assignments = array_columns
        .iter()
        .enumerate()
        .map(|(index, column)| format!("{} = ${}::int[]", column, index + 1))
        .collect::<Vec<_>>();

    format!(
        "UPDATE {} SET {} WHERE {} = ${}",
        table,
        assignments.join(", "),
        key_column,
        array_columns.len() + 1
    )
}
