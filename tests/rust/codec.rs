use _pg_int_array::{decode, decode_with, encode, encode_value, ArrayError, DecodeMode};
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case("{5,4,79}", vec![5, 4, 79])]
#[case("{-1,0,1}", vec![-1, 0, 1])]
#[case("{42}", vec![42])]
#[case("5,4", vec![5, 4])]
#[case("{{5,4}}", vec![5, 4])]
#[case("}5,4{", vec![5, 4])]
fn decode_reads_array_literals(#[case] literal: &str, #[case] expected: Vec<i64>) {
    assert_eq!(decode(literal), expected);
}

#[rstest]
#[case("{5,foo,79}", vec![5, 0, 79])]
#[case("{12abc,3}", vec![12, 3])]
#[case("{ 7,8}", vec![7, 8])]
#[case("{1.9}", vec![1])]
#[case("{1e3,1.5e2}", vec![1000, 150])]
#[case("{1e999}", vec![0])]
#[case("{99999999999999999999}", vec![i64::MAX])]
fn lenient_decode_coerces_malformed_tokens(#[case] literal: &str, #[case] expected: Vec<i64>) {
    assert_eq!(decode(literal), expected);
}

// 빈 리터럴은 왕복되지 않는다. Lenient는 기존 동작([0])을 유지하고, Strict는 []를 돌려준다.
#[rstest]
#[case("{}")]
#[case("")]
fn empty_literal_is_a_mode_decision(#[case] literal: &str) {
    assert_eq!(decode(literal), vec![0]);
    assert_eq!(decode_with(literal, DecodeMode::Lenient).unwrap(), vec![0]);
    assert_eq!(decode_with(literal, DecodeMode::Strict).unwrap(), Vec::<i64>::new());
}

#[rstest]
#[case("{5,foo,79}", 1, "foo")]
#[case("{1,}", 1, "")]
#[case("{12abc}", 0, "12abc")]
#[case("{99999999999999999999}", 0, "99999999999999999999")]
fn strict_decode_rejects_malformed_tokens(
    #[case] literal: &str,
    #[case] index: usize,
    #[case] token: &str,
) {
    assert_eq!(
        decode_with(literal, DecodeMode::Strict),
        Err(ArrayError::MalformedElement {
            index,
            token: token.to_string(),
        })
    );
}

#[test]
fn strict_decode_tolerates_whitespace_around_tokens() {
    assert_eq!(
        decode_with(" {1, 2 ,3} ", DecodeMode::Strict).unwrap(),
        vec![1, 2, 3]
    );
}

#[rstest]
#[case(vec![5, 4, 79], "{5,4,79}")]
#[case(vec![], "{}")]
#[case(vec![-3], "{-3}")]
#[case(vec![i64::MIN, i64::MAX], "{-9223372036854775808,9223372036854775807}")]
fn encode_writes_array_literals(#[case] values: Vec<i64>, #[case] expected: &str) {
    assert_eq!(encode(&values), expected);
}

#[rstest]
#[case(vec![1, 2, 3])]
#[case(vec![0])]
#[case(vec![i64::MIN, -1, 0, 1, i64::MAX])]
fn non_empty_arrays_round_trip(#[case] values: Vec<i64>) {
    assert_eq!(decode(&encode(&values)), values);
    assert_eq!(decode_with(&encode(&values), DecodeMode::Strict).unwrap(), values);
}

#[test]
fn empty_array_round_trips_only_in_strict_mode() {
    assert_eq!(decode(&encode(&[])), vec![0]);
    assert_eq!(
        decode_with(&encode(&[]), DecodeMode::Strict).unwrap(),
        Vec::<i64>::new()
    );
}

#[rstest]
#[case(json!(42))]
#[case(json!("{1,2}"))]
#[case(json!(null))]
#[case(json!({"a": 1}))]
fn encode_value_rejects_non_lists(#[case] value: serde_json::Value) {
    assert_eq!(encode_value(&value), Err(ArrayError::NotAnArray));
}

#[test]
fn encode_value_joins_list_elements() {
    assert_eq!(encode_value(&json!([5, 4, 79])).unwrap(), "{5,4,79}");
    assert_eq!(encode_value(&json!([])).unwrap(), "{}");
    assert_eq!(encode_value(&json!([1, "2", true, null])).unwrap(), "{1,2,1,}");
}

#[test]
fn encode_value_rejects_nested_containers() {
    assert_eq!(
        encode_value(&json!([1, [2]])),
        Err(ArrayError::UnsupportedElement { index: 1 })
    );
}
