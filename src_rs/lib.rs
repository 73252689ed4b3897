#![allow(non_local_definitions)]

// 목적:
// - PostgreSQL int[] 코덱 Rust 확장 모듈의 진입점을 제공한다.
//
// 설명:
// - 코어(코덱/검증/필드 단계)와 저장소 계층은 항상 빌드한다.
// - Python 바인딩은 `python` 기능을 켰을 때만 빌드한다.
//
// 디자인 패턴:
// - 계층형 모듈 구조(api/core/index).
//
// 참조:
// - src_rs/api/codec_bridge.rs
// - src_rs/core/codec.rs

#[cfg(feature = "python")]
use pyo3::prelude::*;
#[cfg(feature = "python")]
use pyo3::types::PyModule;

#[cfg(feature = "python")]
pub mod api;
pub mod core;
pub mod index;

pub use crate::core::codec::{decode, decode_with, encode, encode_value, DecodeMode};
pub use crate::core::errors::{ArrayError, CoreError, CoreResult, FieldError};
pub use crate::core::lifecycle::IntArrayField;
pub use crate::core::record::Record;
pub use crate::core::validation::{validate_is_integer_array, IntArrayValidator};

#[cfg(feature = "python")]
use api::codec_bridge::PyIntArrayCodec;
#[cfg(feature = "python")]
use api::record_bridge::PyRecordBridge;

#[cfg(feature = "python")]
#[pymodule]
fn _pg_int_array(m: &Bound<'_, PyModule>) -> PyResult<()> {
    crate::core::logging::init_tracing();
    m.add_class::<PyIntArrayCodec>()?;
    m.add_class::<PyRecordBridge>()?;
    Ok(())
}
