//! Built-in validators.
//!
//! Every validator is a plain function with the uniform shape
//! `fn(&Params, &str, Option<&str>) -> Result<(), ValidationError>`:
//! it inspects one field of the working set, never mutates anything,
//! and reports the first constraint violation. [`Registry::new`]
//! registers each one under its schema-facing rule name.
//!
//! An absent field reads as JSON null here, so a type rule declared
//! without `required` still fails loudly when the field is missing and
//! the skip decision did not apply (which requires `required` to be in
//! the list).
//!
//! [`Registry::new`]: crate::Registry::new

use std::sync::LazyLock;

use serde_json::Value;

use crate::Params;
use crate::error::{SchemaError, ValidationError};

static EMAIL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap()
});

static NULL: Value = Value::Null;

/// The field's current value, with absence reading as null.
fn value_of<'a>(params: &'a Params, field: &str) -> &'a Value {
    params.get(field).unwrap_or(&NULL)
}

/// Presence check shared with the pipeline's skip decision: a JSON
/// null value counts as absent, the same as a missing key.
pub(crate) fn is_present(params: &Params, field: &str) -> bool {
    params.get(field).is_some_and(|value| !value.is_null())
}

/// True for JSON integers and for strings that parse as a
/// locale-independent `i64` (surrounding whitespace tolerated).
fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_i64() || n.is_u64(),
        Value::String(s) => s.trim().parse::<i64>().is_ok(),
        _ => false,
    }
}

// ============================================================================
// PRESENCE AND TYPE RULES
// ============================================================================

/// `required`: fails when the field is absent or null.
pub fn required(params: &Params, field: &str, _argument: Option<&str>) -> Result<(), ValidationError> {
    if is_present(params, field) {
        Ok(())
    } else {
        Err(ValidationError::required(field.to_owned()))
    }
}

/// `int`: fails unless the value is an integer or an integer string.
pub fn int(params: &Params, field: &str, _argument: Option<&str>) -> Result<(), ValidationError> {
    if is_integer(value_of(params, field)) {
        Ok(())
    } else {
        Err(ValidationError::not_int(field.to_owned()))
    }
}

/// `string`: fails unless the value is a JSON string.
pub fn string(params: &Params, field: &str, _argument: Option<&str>) -> Result<(), ValidationError> {
    match value_of(params, field) {
        Value::String(_) => Ok(()),
        _ => Err(ValidationError::not_string(field.to_owned())),
    }
}

/// `array`: fails unless the value is a JSON array.
///
/// With the argument `int`, every element must also satisfy the integer
/// check; the error cites the first offending element. Other argument
/// values impose no element constraint.
pub fn array(params: &Params, field: &str, argument: Option<&str>) -> Result<(), ValidationError> {
    let Value::Array(items) = value_of(params, field) else {
        return Err(ValidationError::not_array(field.to_owned()));
    };

    if argument == Some("int") {
        if let Some(bad) = items.iter().find(|element| !is_integer(element)) {
            return Err(ValidationError::bad_element(field.to_owned(), bad));
        }
    }

    Ok(())
}

// ============================================================================
// FORMAT RULES
// ============================================================================

/// `email`: fails unless the value is a string matching the email
/// grammar. Surrounding whitespace is tolerated; the `email` sanitizer
/// removes it afterwards.
pub fn email(params: &Params, field: &str, _argument: Option<&str>) -> Result<(), ValidationError> {
    match value_of(params, field) {
        Value::String(s) if EMAIL_REGEX.is_match(s.trim()) => Ok(()),
        _ => Err(ValidationError::invalid_email(field.to_owned())),
    }
}

/// `date`: fails unless the value is a strict `YYYY-MM-DD` calendar
/// date: exact length, zero-padded fields, month 1-12, day valid for
/// that month and year. Overflow dates such as `2023-02-30` never
/// parse in the first place.
pub fn date(params: &Params, field: &str, _argument: Option<&str>) -> Result<(), ValidationError> {
    match value_of(params, field) {
        Value::String(s) if is_calendar_date(s) => Ok(()),
        _ => Err(ValidationError::invalid_date(field.to_owned())),
    }
}

/// Parses a two-digit numeric field from a byte slice at the given
/// offset. Expects exactly two ASCII digit bytes.
fn parse_two_digits(bytes: &[u8], offset: usize) -> Option<u8> {
    if offset + 2 > bytes.len() {
        return None;
    }
    let d1 = bytes[offset].wrapping_sub(b'0');
    let d2 = bytes[offset + 1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

fn is_calendar_date(input: &str) -> bool {
    let bytes = input.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }

    let Some(century) = parse_two_digits(bytes, 0) else {
        return false;
    };
    let Some(year_low) = parse_two_digits(bytes, 2) else {
        return false;
    };
    let Some(month) = parse_two_digits(bytes, 5) else {
        return false;
    };
    let Some(day) = parse_two_digits(bytes, 8) else {
        return false;
    };

    let year = u16::from(century) * 100 + u16::from(year_low);
    (1..=12).contains(&month) && day >= 1 && day <= days_in_month(year, month)
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

fn is_leap_year(year: u16) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

// ============================================================================
// LENGTH RULES
// ============================================================================

/// `minLength:N`: fails when a string value has fewer than N Unicode
/// scalar values. Length is counted in chars, never bytes. Non-string
/// values fail with a type error under the same rule code.
///
/// # Panics
///
/// Panics with [`SchemaError::MissingArgument`] /
/// [`SchemaError::InvalidArgument`] when the argument is absent or not
/// an unsigned integer; the schema author has to supply a bound.
pub fn min_length(params: &Params, field: &str, argument: Option<&str>) -> Result<(), ValidationError> {
    let min = length_bound("minLength", argument);
    match value_of(params, field) {
        Value::String(s) => {
            let actual = s.chars().count();
            if actual >= min {
                Ok(())
            } else {
                Err(ValidationError::min_length(field.to_owned(), min, actual))
            }
        }
        _ => Err(ValidationError::type_mismatch(
            "minLength",
            field.to_owned(),
            "string",
        )),
    }
}

/// `maxLength:N`: fails when a string value has more than N Unicode
/// scalar values. Counterpart of [`min_length`]; same argument and
/// panic contract.
pub fn max_length(params: &Params, field: &str, argument: Option<&str>) -> Result<(), ValidationError> {
    let max = length_bound("maxLength", argument);
    match value_of(params, field) {
        Value::String(s) => {
            let actual = s.chars().count();
            if actual <= max {
                Ok(())
            } else {
                Err(ValidationError::max_length(field.to_owned(), max, actual))
            }
        }
        _ => Err(ValidationError::type_mismatch(
            "maxLength",
            field.to_owned(),
            "string",
        )),
    }
}

/// Resolves the integer argument of a length rule, panicking on schema
/// faults.
fn length_bound(rule: &str, argument: Option<&str>) -> usize {
    let Some(raw) = argument else {
        panic!(
            "{}",
            SchemaError::MissingArgument {
                rule: rule.to_owned()
            }
        );
    };
    match raw.parse() {
        Ok(bound) => bound,
        Err(_) => panic!(
            "{}",
            SchemaError::InvalidArgument {
                rule: rule.to_owned(),
                argument: raw.to_owned(),
            }
        ),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: serde_json::Value) -> Params {
        value.as_object().cloned().unwrap()
    }

    // --- required ---

    #[test]
    fn required_present() {
        let p = params(json!({"age": 1}));
        assert!(required(&p, "age", None).is_ok());
    }

    #[test]
    fn required_rejects_null() {
        let p = params(json!({"age": null}));
        assert!(required(&p, "age", None).is_err());
    }

    #[test]
    fn required_absent() {
        let p = params(json!({}));
        let error = required(&p, "age", None).unwrap_err();
        assert_eq!(error.code, "required");
        assert_eq!(error.field(), Some("age"));
    }

    // --- int ---

    #[test]
    fn int_accepts_numbers_and_numeric_strings() {
        let p = params(json!({"a": 42, "b": "-7", "c": " 30 ", "d": 0}));
        assert!(int(&p, "a", None).is_ok());
        assert!(int(&p, "b", None).is_ok());
        assert!(int(&p, "c", None).is_ok());
        assert!(int(&p, "d", None).is_ok());
    }

    #[test]
    fn int_rejects_floats_text_and_absence() {
        let p = params(json!({"a": 1.5, "b": "12abc", "c": true}));
        assert!(int(&p, "a", None).is_err());
        assert!(int(&p, "b", None).is_err());
        assert!(int(&p, "c", None).is_err());
        assert!(int(&p, "missing", None).is_err());
    }

    // --- string ---

    #[test]
    fn string_type_check() {
        let p = params(json!({"s": "hi", "n": 5}));
        assert!(string(&p, "s", None).is_ok());
        let error = string(&p, "n", None).unwrap_err();
        assert_eq!(error.code, "string");
    }

    // --- array ---

    #[test]
    fn array_accepts_any_elements_without_argument() {
        let p = params(json!({"tags": ["a", 1, null]}));
        assert!(array(&p, "tags", None).is_ok());
    }

    #[test]
    fn array_rejects_non_arrays() {
        let p = params(json!({"tags": "a,b"}));
        let error = array(&p, "tags", None).unwrap_err();
        assert_eq!(error.code, "array");
    }

    #[test]
    fn array_int_checks_every_element() {
        let p = params(json!({"ids": ["1", 2, "3"]}));
        assert!(array(&p, "ids", Some("int")).is_ok());
    }

    #[test]
    fn array_int_cites_first_bad_element() {
        let p = params(json!({"ids": ["1", "2", "x"]}));
        let error = array(&p, "ids", Some("int")).unwrap_err();
        assert_eq!(error.field(), Some("ids"));
        assert_eq!(error.param("element"), Some("\"x\""));
    }

    #[test]
    fn array_unknown_argument_skips_element_check() {
        let p = params(json!({"ids": ["x"]}));
        assert!(array(&p, "ids", Some("uuid")).is_ok());
    }

    // --- email ---

    #[test]
    fn email_accepts_common_addresses() {
        let p = params(json!({"e": "user@example.com", "padded": " a@b.com "}));
        assert!(email(&p, "e", None).is_ok());
        assert!(email(&p, "padded", None).is_ok());
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        let p = params(json!({"a": "invalid", "b": "@example.com", "c": "user@", "d": 9}));
        for field in ["a", "b", "c", "d"] {
            assert!(email(&p, field, None).is_err(), "field {field}");
        }
    }

    // --- date ---

    #[test]
    fn date_accepts_valid_days() {
        let p = params(json!({"a": "2023-01-31", "b": "2024-02-29", "c": "2000-02-29"}));
        assert!(date(&p, "a", None).is_ok());
        assert!(date(&p, "b", None).is_ok());
        assert!(date(&p, "c", None).is_ok());
    }

    #[test]
    fn date_rejects_overflow_days() {
        let p = params(json!({"a": "2023-02-30", "b": "2023-02-29", "c": "1900-02-29", "d": "2023-04-31"}));
        for field in ["a", "b", "c", "d"] {
            assert!(date(&p, field, None).is_err(), "field {field}");
        }
    }

    #[test]
    fn date_requires_zero_padded_fields() {
        let p = params(json!({"a": "2023-2-03", "b": "2023-02-3", "c": "23-02-03"}));
        for field in ["a", "b", "c"] {
            assert!(date(&p, field, None).is_err(), "field {field}");
        }
    }

    #[test]
    fn date_rejects_out_of_range_fields() {
        let p = params(json!({"a": "2023-13-01", "b": "2023-00-10", "c": "2023-01-00"}));
        for field in ["a", "b", "c"] {
            assert!(date(&p, field, None).is_err(), "field {field}");
        }
    }

    // --- length ---

    #[test]
    fn min_length_counts_codepoints_not_bytes() {
        // three 3-byte characters: 9 bytes, 3 chars
        let p = params(json!({"name": "日本語"}));
        assert!(min_length(&p, "name", Some("3")).is_ok());
        assert!(min_length(&p, "name", Some("4")).is_err());
    }

    #[test]
    fn max_length_counts_codepoints_not_bytes() {
        let p = params(json!({"name": "日本語"}));
        assert!(max_length(&p, "name", Some("3")).is_ok());
        assert!(max_length(&p, "name", Some("2")).is_err());
    }

    #[test]
    fn length_errors_carry_bounds() {
        let p = params(json!({"name": "ab"}));
        let error = min_length(&p, "name", Some("3")).unwrap_err();
        assert_eq!(error.param("min"), Some("3"));
        assert_eq!(error.param("actual"), Some("2"));
    }

    #[test]
    fn length_on_non_string_fails_under_rule_code() {
        let p = params(json!({"n": 7}));
        let error = min_length(&p, "n", Some("2")).unwrap_err();
        assert_eq!(error.code, "minLength");
    }

    #[test]
    #[should_panic(expected = "requires an argument")]
    fn min_length_without_argument_is_a_fault() {
        let p = params(json!({"name": "ab"}));
        let _ = min_length(&p, "name", None);
    }

    #[test]
    #[should_panic(expected = "cannot use argument")]
    fn min_length_with_bad_argument_is_a_fault() {
        let p = params(json!({"name": "ab"}));
        let _ = min_length(&p, "name", Some("three"));
    }
}
