// 목적:
// - PostgreSQL int[] 텍스트 리터럴과 정수 목록 간 변환을 제공한다.
//
// 설명:
// - decode: `{5,4,79}` -> [5, 4, 79]. 기본(Lenient) 모드는 잘못된 토큰을 0으로 강제 변환한다.
// - Strict 모드는 빈 리터럴을 빈 목록으로, 잘못된 토큰을 오류로 처리한다.
// - encode: 정수 목록 -> `{5,4,79}`. 동적 값은 목록일 때만 변환한다.
//
// 디자인 패턴:
// - 순수 함수(Pure Function) 코덱.
//
// 참조:
// - src_rs/core/lifecycle.rs
// - src_rs/index/postgres_repo.rs

use serde_json::Value;

use crate::core::errors::ArrayError;

const LITERAL_OPEN: char = '{';
const LITERAL_CLOSE: char = '}';
const LITERAL_SEPARATOR: char = ',';

/// 배열 리터럴 해석 방식이다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodeMode {
    /// 기존 동작 호환. `{}` -> [0], 해석 불가 토큰 -> 0.
    #[default]
    Lenient,
    /// `{}` -> [], 해석 불가 토큰은 오류.
    Strict,
}

impl DecodeMode {
    pub fn from_strict_flag(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::Lenient
        }
    }
}

/// 배열 리터럴을 정수 목록으로 변환한다(Lenient 모드).
///
/// 양 끝의 `{`, `}` 문자를 개수/순서와 상관없이 모두 제거한 뒤 `,`로 분리한다.
/// 빈 리터럴은 빈 토큰 하나로 분리되므로 `[0]`이 된다.
pub fn decode(literal: &str) -> Vec<i64> {
    trim_braces(literal)
        .split(LITERAL_SEPARATOR)
        .map(coerce_integer)
        .collect()
}

/// 지정한 모드로 배열 리터럴을 변환한다.
pub fn decode_with(literal: &str, mode: DecodeMode) -> Result<Vec<i64>, ArrayError> {
    match mode {
        DecodeMode::Lenient => Ok(decode(literal)),
        DecodeMode::Strict => decode_strict(literal),
    }
}

fn decode_strict(literal: &str) -> Result<Vec<i64>, ArrayError> {
    let body = trim_braces(literal.trim());
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    body.split(LITERAL_SEPARATOR)
        .enumerate()
        .map(|(index, token)| {
            token
                .trim()
                .parse::<i64>()
                .map_err(|_| ArrayError::MalformedElement {
                    index,
                    token: token.to_string(),
                })
        })
        .collect()
}

/// 정수 목록을 배열 리터럴로 변환한다.
pub fn encode(values: &[i64]) -> String {
    let parts = values
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>();

    format!("{}{}{}", LITERAL_OPEN, parts.join(","), LITERAL_CLOSE)
}

/// 동적 값을 배열 리터럴로 변환한다. 목록이 아니면 `NotAnArray`를 반환한다.
pub fn encode_value(value: &Value) -> Result<String, ArrayError> {
    let Value::Array(items) = value else {
        return Err(ArrayError::NotAnArray);
    };

    let parts = items
        .iter()
        .enumerate()
        .map(|(index, item)| render_element(item).ok_or(ArrayError::UnsupportedElement { index }))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(format!("{}{}{}", LITERAL_OPEN, parts.join(","), LITERAL_CLOSE))
}

/// 원소가 엄격한 정수(i64로 저장된 정수)인지 판정한다.
pub fn as_strict_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        _ => None,
    }
}

/// 오류 메시지/리터럴에 넣을 원소 문자열을 만든다.
pub fn render_element(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some(String::new()),
        Value::Number(number) => Some(render_number(number)),
        Value::String(text) => Some(text.clone()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn render_number(number: &serde_json::Number) -> String {
    if let Some(integer) = number.as_i64() {
        return integer.to_string();
    }
    if let Some(integer) = number.as_u64() {
        return integer.to_string();
    }
    match number.as_f64() {
        Some(float) if float.is_finite() && float.fract() == 0.0 && float.abs() < 1e15 => {
            format!("{}", float as i64)
        }
        Some(float) => float.to_string(),
        None => number.to_string(),
    }
}

fn trim_braces(literal: &str) -> &str {
    literal.trim_matches(|ch| ch == LITERAL_OPEN || ch == LITERAL_CLOSE)
}

/// 문자열 -> 정수 강제 변환(PHP 7.1+ `(int)` 캐스트 규칙).
///
/// 선행 공백 뒤의 가장 긴 숫자 접두사만 사용하고 나머지는 무시한다.
/// 소수점/지수가 있으면 실수로 해석한 뒤 정수부를 취하고, 범위를 넘으면 i64 경계로 고정한다.
/// 무한대는 0이 된다. 숫자 접두사가 없으면 0이다.
fn coerce_integer(token: &str) -> i64 {
    let rest = token.trim_start_matches([' ', '\t', '\n', '\r', '\x0b', '\x0c']);
    let bytes = rest.as_bytes();
    let digits_from = |start: usize| {
        start
            + bytes[start..]
                .iter()
                .take_while(|byte| byte.is_ascii_digit())
                .count()
    };

    let int_start = usize::from(matches!(bytes.first(), Some(b'-' | b'+')));
    let mut end = digits_from(int_start);
    let int_digits = end - int_start;
    let mut is_float = false;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if int_digits > 0 || frac_end > end + 1 {
            is_float = true;
            end = frac_end;
        }
    }

    if int_digits == 0 && !is_float {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'-' | b'+')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            is_float = true;
            end = exp_end;
        }
    }

    let numeric = &rest[..end];
    if is_float {
        return numeric.parse::<f64>().map(cap_float).unwrap_or(0);
    }

    parse_saturating(numeric)
}

fn parse_saturating(numeric: &str) -> i64 {
    let (negative, digits) = match numeric.as_bytes().first() {
        Some(b'-') => (true, &numeric[1..]),
        Some(b'+') => (false, &numeric[1..]),
        _ => (false, numeric),
    };

    let mut value: i64 = 0;
    for byte in digits.bytes() {
        let digit = i64::from(byte - b'0');
        let next = value.checked_mul(10).and_then(|shifted| {
            if negative {
                shifted.checked_sub(digit)
            } else {
                shifted.checked_add(digit)
            }
        });
        match next {
            Some(next) => value = next,
            None => return if negative { i64::MIN } else { i64::MAX },
        }
    }

    value
}

fn cap_float(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    if value >= i64::MAX as f64 {
        return i64::MAX;
    }
    if value < i64::MIN as f64 {
        return i64::MIN;
    }
    value.trunc() as i64
}
