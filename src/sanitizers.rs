//! Built-in sanitizers.
//!
//! A sanitizer is a total function `fn(&Value) -> Value`: it returns
//! the replacement value for a field after the rule of the same name
//! has passed validation, and it never fails. The pipeline writes the
//! replacement back into the working set before the next rule reads
//! the field.
//!
//! Values a sanitizer has no sensible interpretation for pass through
//! unchanged (`string`/`email` on non-strings) or collapse to the
//! neutral element (`int` on anything non-numeric becomes 0).

use serde_json::Value;

// ============================================================================
// INT
// ============================================================================

/// `int`: coerces the value to a JSON integer.
///
/// The scalar is rendered to text, everything but ASCII digits and
/// sign characters is dropped, and the leading signed-integer prefix
/// of what remains is parsed. Anything unparseable becomes 0.
/// Idempotent: an already-coerced value maps to itself.
///
/// # Examples
///
/// ```
/// use fieldsift::sanitizers;
/// use serde_json::json;
///
/// assert_eq!(sanitizers::int(&json!(" 42abc ")), json!(42));
/// assert_eq!(sanitizers::int(&json!("-7")), json!(-7));
/// assert_eq!(sanitizers::int(&json!("junk")), json!(0));
/// ```
#[must_use]
pub fn int(value: &Value) -> Value {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(true) => "1".to_owned(),
        _ => String::new(),
    };

    let filtered: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+' || *c == '-')
        .collect();

    Value::Number(leading_integer(&filtered).into())
}

/// Parses the leading `[+-]?digits` prefix, 0 when there is none.
fn leading_integer(text: &str) -> i64 {
    let (sign, digits_part) = match text.as_bytes().first() {
        Some(b'-') => (-1, &text[1..]),
        Some(b'+') => (1, &text[1..]),
        _ => (1, text),
    };

    let digits: &str = digits_part
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .unwrap_or("");

    digits.parse::<i64>().map_or(0, |magnitude| sign * magnitude)
}

// ============================================================================
// STRING
// ============================================================================

/// Characters dropped by the `string` sanitizer, besides ASCII control
/// characters. The set targets text destined for unescaped output; see
/// the README for the exact contract.
const UNSAFE_CHARS: &[char] = &['<', '>', '"', '\'', '`'];

/// `string`: drops unsafe characters, then trims surrounding
/// whitespace.
///
/// Removed: ASCII control characters and the [`UNSAFE_CHARS`] set.
/// Filtering before trimming keeps the function idempotent (stripping
/// an inner character can expose new boundary whitespace). Non-string
/// values pass through unchanged.
///
/// # Examples
///
/// ```
/// use fieldsift::sanitizers;
/// use serde_json::json;
///
/// assert_eq!(sanitizers::string(&json!("  Bob  ")), json!("Bob"));
/// assert_eq!(sanitizers::string(&json!("a<b>c")), json!("abc"));
/// ```
#[must_use]
pub fn string(value: &Value) -> Value {
    match value {
        Value::String(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| !c.is_control() && !UNSAFE_CHARS.contains(c))
                .collect();
            Value::String(cleaned.trim().to_owned())
        }
        other => other.clone(),
    }
}

// ============================================================================
// EMAIL
// ============================================================================

/// True for characters that may appear in an email address.
fn is_email_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+/=?^_`{|}~@.[]-".contains(c)
}

/// `email`: trims surrounding whitespace and drops every character
/// not legal in an email address. Non-string values pass through
/// unchanged.
///
/// # Examples
///
/// ```
/// use fieldsift::sanitizers;
/// use serde_json::json;
///
/// assert_eq!(sanitizers::email(&json!(" a@b.com ")), json!("a@b.com"));
/// assert_eq!(sanitizers::email(&json!("us er@(ex)ample.com")), json!("user@example.com"));
/// ```
#[must_use]
pub fn email(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.trim().chars().filter(|c| is_email_char(*c)).collect()),
        other => other.clone(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
