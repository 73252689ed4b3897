use std::io;
use std::sync::{Arc, Mutex};

use _pg_int_array::{validate_is_integer_array, ArrayError, IntArrayValidator, Record};
use rstest::rstest;
use serde_json::{json, Value};

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn validate_with_log(validator: &IntArrayValidator, record: &mut Record) -> String {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        validator.validate_attribute(record, "tags");
    });
    log.contents()
}

#[rstest]
#[case(json!([1, 2, 3]))]
#[case(json!([]))]
#[case(json!([-9223372036854775808i64, 9223372036854775807i64]))]
fn integer_lists_pass(#[case] value: Value) {
    assert_eq!(validate_is_integer_array(&value), Ok(()));
}

#[rstest]
#[case(json!("not a list"))]
#[case(json!(5))]
#[case(json!(null))]
#[case(json!({"0": 1}))]
fn non_lists_fail(#[case] value: Value) {
    assert_eq!(validate_is_integer_array(&value), Err(ArrayError::NotAnArray));
}

#[rstest]
#[case(json!([1, "2", 3]), "2")]
#[case(json!([1, 2.0]), "2")]
#[case(json!([1.5]), "1.5")]
#[case(json!([true]), "1")]
#[case(json!([18446744073709551615u64]), "18446744073709551615")]
fn first_non_integer_element_is_reported(#[case] value: Value, #[case] element: &str) {
    assert_eq!(
        validate_is_integer_array(&value),
        Err(ArrayError::NonIntegerElement(element.to_string()))
    );
}

#[test]
fn validation_stops_at_first_violation() {
    assert_eq!(
        validate_is_integer_array(&json!([1, "a", "b"])),
        Err(ArrayError::NonIntegerElement("a".to_string()))
    );
}

#[test]
fn validator_attaches_message_to_field() {
    let validator = IntArrayValidator::default();
    let mut record = Record::new(7).with_field("tags", json!([1, "2", 3]));

    assert!(!validator.validate_attribute(&mut record, "tags"));
    assert_eq!(record.errors.len(), 1);
    assert_eq!(record.errors[0].field, "tags");
    assert_eq!(record.errors[0].message, "tags: value 2 is not an integer.");
}

#[test]
fn validator_reports_non_list() {
    let validator = IntArrayValidator::default();
    let mut record = Record::new(7).with_field("tags", json!(12));

    assert!(!validator.validate_attribute(&mut record, "tags"));
    assert_eq!(record.errors[0].message, "tags must be an array of integers.");
}

#[rstest]
#[case(json!(null))]
#[case(json!(""))]
#[case(json!([]))]
fn empty_values_are_skipped_by_default(#[case] value: Value) {
    let validator = IntArrayValidator::default();
    let mut record = Record::new(1).with_field("tags", value);

    assert!(validator.validate_attribute(&mut record, "tags"));
    assert!(!record.has_errors());
}

#[test]
fn empty_values_fail_when_not_skipped() {
    let validator = IntArrayValidator::new(false);
    let mut record = Record::new(1).with_field("tags", Value::Null);

    assert!(!validator.validate_attribute(&mut record, "tags"));
    assert!(record.has_errors());

    let mut record = Record::new(1).with_field("tags", json!([]));
    assert!(validator.validate_attribute(&mut record, "tags"));
}

#[test]
fn missing_field_is_treated_as_null() {
    let mut record = Record::new(1);
    assert!(IntArrayValidator::default().validate_attribute(&mut record, "tags"));
    assert!(!IntArrayValidator::new(false).validate_attribute(&mut record, "tags"));
}

#[test]
fn log_category_duplicates_message_as_error_event() {
    let validator = IntArrayValidator::default().with_log_category("pgarray");
    let mut record = Record::new(1).with_field("tags", json!(["x"]));

    let output = validate_with_log(&validator, &mut record);
    assert_eq!(record.errors.len(), 1);
    assert_eq!(output.lines().count(), 1);
    assert!(output.contains("ERROR"));
    assert!(output.contains("category=pgarray"));
    assert!(output.contains("tags: value x is not an integer."));
}

#[test]
fn no_log_category_emits_no_event() {
    let validator = IntArrayValidator::default();
    let mut record = Record::new(1).with_field("tags", json!(["x"]));

    let output = validate_with_log(&validator, &mut record);
    assert_eq!(record.errors.len(), 1);
    assert!(output.is_empty());
}

#[test]
fn passing_value_emits_no_event_even_with_category() {
    let validator = IntArrayValidator::default().with_log_category("pgarray");
    let mut record = Record::new(1).with_field("tags", json!([1, 2]));

    assert!(validate_with_log(&validator, &mut record).is_empty());
    assert!(!record.has_errors());
}
