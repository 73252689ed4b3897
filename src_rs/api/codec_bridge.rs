// 목적:
// - Python에서 호출 가능한 int[] 코덱/검증 클래스를 제공한다.
//
// 설명:
// - Python 값을 동적 값으로 변환할 때 bool/int/float 구분을 유지해 엄격한 정수 검증이 가능하게 한다.
// - numpy int64 1차원 배열은 정수 목록으로 받는다.
//
// 디자인 패턴:
// - 파사드(Facade).
//
// 참조:
// - src_rs/core/codec.rs
// - src_rs/core/validation.rs

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyFloat, PyInt, PyList, PyString, PyTuple};
use serde_json::{Number, Value};

use crate::core::codec::{decode_with, encode_value, DecodeMode};
use crate::core::errors::ArrayError;
use crate::core::lifecycle::IntArrayField;
use crate::core::record::Record;
use crate::core::validation::IntArrayValidator;

/// Python에 노출되는 int[] 코덱 클래스다.
#[pyclass(name = "IntArrayCodec")]
pub struct PyIntArrayCodec {
    binding: IntArrayField,
}

#[pymethods]
impl PyIntArrayCodec {
    #[new]
    #[pyo3(signature = (field = "pgarray", strict = false, skip_on_empty = true, log_category = None))]
    pub fn new(field: &str, strict: bool, skip_on_empty: bool, log_category: Option<String>) -> Self {
        let validator = IntArrayValidator {
            skip_on_empty,
            log_category,
        };

        Self {
            binding: IntArrayField::new(field)
                .with_mode(DecodeMode::from_strict_flag(strict))
                .with_validator(validator),
        }
    }

    /// 설정된 필드 이름을 반환한다.
    #[getter]
    pub fn field(&self) -> String {
        self.binding.field().to_string()
    }

    /// 배열 리터럴을 정수 목록으로 변환한다.
    pub fn decode(&self, literal: &str) -> PyResult<Vec<i64>> {
        decode_with(literal, self.binding.mode()).map_err(to_py_error)
    }

    /// 배열 리터럴을 numpy int64 배열로 변환한다.
    pub fn decode_ndarray<'py>(
        &self,
        py: Python<'py>,
        literal: &str,
    ) -> PyResult<Bound<'py, PyArray1<i64>>> {
        let values = decode_with(literal, self.binding.mode()).map_err(to_py_error)?;
        Ok(PyArray1::from_vec(py, values))
    }

    /// 목록을 배열 리터럴로 변환한다. 목록이 아니면 TypeError를 던진다.
    pub fn encode(&self, value: &Bound<'_, PyAny>) -> PyResult<String> {
        let value = to_field_value(value)?;
        encode_value(&value).map_err(to_py_error)
    }

    /// 값을 검증하고 실패 시 오류 메시지를, 통과 시 None을 반환한다.
    pub fn validate(&self, value: &Bound<'_, PyAny>) -> PyResult<Option<String>> {
        let mut record = Record::new(0).with_field(self.binding.field(), to_field_value(value)?);
        self.binding.validate(&mut record);
        Ok(record.errors.into_iter().next().map(|error| error.message))
    }
}

fn to_py_error(error: ArrayError) -> PyErr {
    match error {
        ArrayError::NotAnArray => PyTypeError::new_err(error.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

/// Python 값을 동적 필드 값으로 변환한다.
pub fn to_field_value(value: &Bound<'_, PyAny>) -> PyResult<Value> {
    if value.is_none() {
        return Ok(Value::Null);
    }

    // bool은 int의 하위 타입이라 먼저 확인한다.
    if value.is_instance_of::<PyBool>() {
        return Ok(Value::Bool(value.extract::<bool>()?));
    }

    if value.is_instance_of::<PyInt>() {
        if let Ok(integer) = value.extract::<i64>() {
            return Ok(Value::from(integer));
        }
        return Ok(float_value(value.extract::<f64>()?));
    }

    if value.is_instance_of::<PyFloat>() {
        return Ok(float_value(value.extract::<f64>()?));
    }

    if value.is_instance_of::<PyString>() {
        return Ok(Value::String(value.extract::<String>()?));
    }

    if value.is_instance_of::<PyList>() || value.is_instance_of::<PyTuple>() {
        let items = value
            .try_iter()?
            .map(|item| item.and_then(|item| to_field_value(&item)))
            .collect::<PyResult<Vec<_>>>()?;
        return Ok(Value::Array(items));
    }

    if let Ok(array) = value.extract::<PyReadonlyArray1<i64>>() {
        let items = array.as_array().iter().copied().map(Value::from).collect();
        return Ok(Value::Array(items));
    }

    Ok(Value::String(value.str()?.to_string()))
}

fn float_value(float: f64) -> Value {
    Number::from_f64(float)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(float.to_string()))
}
