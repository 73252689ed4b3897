// 목적:
// - Rust 코어 계층의 표준 오류 타입을 정의한다.
//
// 설명:
// - 배열 코덱/검증 오류(ArrayError)와 입력/설정/DB/직렬화 오류(CoreError)를 구분한다.
// - 검증 실패는 필드 단위 오류 목록으로 호출자에게 돌려준다.
//
// 디자인 패턴:
// - 도메인 오류 열거형(Domain Error Enum).
//
// 참조:
// - src_rs/core/codec.rs
// - src_rs/core/validation.rs
// - src_rs/index/postgres_repo.rs

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 정수 배열 변환/검증 과정에서 발생하는 오류다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArrayError {
    #[error("값이 배열이 아닙니다")]
    NotAnArray,
    #[error("정수가 아닌 값이 포함되어 있습니다: {0}")]
    NonIntegerElement(String),
    #[error("배열에 담을 수 없는 원소입니다: index={index}")]
    UnsupportedElement { index: usize },
    #[error("배열 리터럴 원소를 정수로 해석할 수 없습니다: index={index}, token={token:?}")]
    MalformedElement { index: usize, token: String },
}

/// 레코드의 특정 필드에 붙는 검증 오류다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// 코어 계층에서 공통으로 사용하는 오류 열거형이다.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("입력값이 유효하지 않습니다: {0}")]
    InvalidInput(String),
    #[error("설정값이 유효하지 않습니다: {0}")]
    InvalidConfig(String),
    #[error("데이터베이스 작업에 실패했습니다: {0}")]
    Db(String),
    #[error("직렬화/역직렬화에 실패했습니다: {0}")]
    Serialization(String),
    #[error("런타임 처리 중 오류가 발생했습니다: {0}")]
    Runtime(String),
    #[error(transparent)]
    Array(#[from] ArrayError),
    #[error("검증에 실패했습니다: {}", summarize(.0))]
    Validation(Vec<FieldError>),
}

pub type CoreResult<T> = Result<T, CoreError>;

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|error| format!("{}: {}", error.field, error.message))
        .collect::<Vec<_>>()
        .join("; ")
}
