// 목적:
// - Python에서 호출 가능한 레코드 적재/저장/검증 브릿지 클래스를 제공한다.
//
// 설명:
// - JSON 페이로드를 입력받아 Rust 레코드 파이프라인을 실행하고,
//   결과를 JSON 문자열로 반환한다.
//
// 디자인 패턴:
// - 파사드(Facade) + 실패 빠르게(Fail Fast).
//
// 참조:
// - src_rs/core/record_pipeline.rs

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::runtime::{Builder, Runtime};

use crate::core::errors::CoreError;
use crate::core::record_pipeline::{
    execute_load, execute_save, execute_validate, LoadRequestPayload, SaveRequestPayload,
    ValidateRequestPayload,
};

/// Python에 노출되는 레코드 브릿지 클래스다.
#[pyclass(name = "RecordBridge")]
#[derive(Default)]
pub struct PyRecordBridge {}

#[pymethods]
impl PyRecordBridge {
    /// 레코드 브릿지 객체를 생성한다.
    #[new]
    pub fn new() -> Self {
        Self {}
    }

    /// 적재 페이로드(JSON)를 실행하고 결과 JSON을 반환한다.
    pub fn load(&self, py: Python<'_>, payload_json: &str) -> PyResult<String> {
        let payload: LoadRequestPayload = parse_payload(payload_json, "적재")?;
        let runtime = create_runtime().map_err(PyRuntimeError::new_err)?;
        let result = py
            .detach(|| runtime.block_on(execute_load(payload)))
            .map_err(to_py_error)?;

        to_json(&result, "적재")
    }

    /// 저장 페이로드(JSON)를 실행하고 결과 JSON을 반환한다.
    pub fn save(&self, py: Python<'_>, payload_json: &str) -> PyResult<String> {
        let payload: SaveRequestPayload = parse_payload(payload_json, "저장")?;
        let runtime = create_runtime().map_err(PyRuntimeError::new_err)?;
        let result = py
            .detach(|| runtime.block_on(execute_save(payload)))
            .map_err(to_py_error)?;

        to_json(&result, "저장")
    }

    /// 검증 페이로드(JSON)를 실행하고 결과 JSON을 반환한다.
    pub fn validate(&self, payload_json: &str) -> PyResult<String> {
        let payload: ValidateRequestPayload = parse_payload(payload_json, "검증")?;
        let result = execute_validate(payload).map_err(to_py_error)?;

        to_json(&result, "검증")
    }
}

fn parse_payload<T: DeserializeOwned>(payload_json: &str, label: &str) -> PyResult<T> {
    serde_json::from_str(payload_json).map_err(|error| {
        PyValueError::new_err(format!(
            "{} 페이로드 JSON 파싱에 실패했습니다: {}",
            label, error
        ))
    })
}

fn to_json<T: Serialize>(result: &T, label: &str) -> PyResult<String> {
    serde_json::to_string(result)
        .map_err(|error| PyRuntimeError::new_err(format!("{} 결과 직렬화 실패: {}", label, error)))
}

fn to_py_error(error: CoreError) -> PyErr {
    match error {
        CoreError::InvalidInput(_)
        | CoreError::InvalidConfig(_)
        | CoreError::Array(_)
        | CoreError::Validation(_) => PyValueError::new_err(error.to_string()),
        other => PyRuntimeError::new_err(other.to_string()),
    }
}

fn create_runtime() -> Result<Runtime, String> {
    Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|error| format!("Tokio 런타임 생성 실패: {}", error))
}
