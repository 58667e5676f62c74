//! Input sanitizing
//!
//! [`sanitize`] dispatches on a closed set of [`SanitizeMode`]s. Each mode is
//! an independent transform; a value that fails a mode's rules comes back as
//! `null` (or `false` for [`SanitizeMode::Boolean`]) rather than as an error.
//! Only an unknown mode tag is an error.

use crate::core::collections::scalar_to_string;
use crate::utils::error::{BoxError, Result};
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

// A `<` only opens a tag when a name, `/`, `!` or `?` follows it.
static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--.*?-->|<[A-Za-z/!?][^>]*(?:>|$)").expect("tag pattern is valid")
});

static INT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?)(\d+)").expect("integer pattern is valid"));

const TRUTHY_TOKENS: [&str; 5] = ["true", "yes", "Y", "1", "TRUE"];

/// Punctuation allowed in URLs besides ASCII letters and digits.
const URL_PUNCTUATION: &str = "$-_.+!*'(),{}|\\^~[]`<>#%\";/?:@&=";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SanitizeMode {
    /// Positive user id, anything else becomes `null`.
    User,
    /// Markup stripped, HTML specials and quotes escaped.
    #[default]
    SafeString,
    Integer,
    /// Currently returns the value untouched.
    Alphanum,
    Url,
    /// Russian mobile number in `7XXXXXXXXXX` form.
    Mobile,
    Boolean,
}

impl SanitizeMode {
    pub const ALL: [SanitizeMode; 7] = [
        SanitizeMode::User,
        SanitizeMode::SafeString,
        SanitizeMode::Integer,
        SanitizeMode::Alphanum,
        SanitizeMode::Url,
        SanitizeMode::Mobile,
        SanitizeMode::Boolean,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SanitizeMode::User => "user",
            SanitizeMode::SafeString => "safeString",
            SanitizeMode::Integer => "integer",
            SanitizeMode::Alphanum => "alphanum",
            SanitizeMode::Url => "url",
            SanitizeMode::Mobile => "mobile",
            SanitizeMode::Boolean => "boolean",
        }
    }
}

impl fmt::Display for SanitizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SanitizeMode {
    type Err = BoxError;

    fn from_str(tag: &str) -> Result<Self> {
        SanitizeMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == tag)
            .ok_or_else(|| BoxError::UnknownSanitizeMode {
                mode: tag.to_string(),
            })
    }
}

/// Applies `mode` to `value`. `null` passes through every mode unchanged.
pub fn sanitize(value: &Value, mode: SanitizeMode) -> Value {
    if value.is_null() {
        return Value::Null;
    }

    match mode {
        SanitizeMode::User => match parse_int(value) {
            id if id > 0 => Value::from(id),
            _ => Value::Null,
        },
        SanitizeMode::SafeString => Value::String(safe_string(&scalar_to_string(value))),
        SanitizeMode::Integer => Value::from(parse_int(value)),
        SanitizeMode::Alphanum => value.clone(),
        SanitizeMode::Url => Value::String(sanitize_url(&scalar_to_string(value))),
        SanitizeMode::Mobile => sanitize_mobile(&scalar_to_string(value))
            .map(Value::String)
            .unwrap_or(Value::Null),
        SanitizeMode::Boolean => Value::Bool(is_truthy_token(value)),
    }
}

/// Parses `tag` into a [`SanitizeMode`] and applies it.
pub fn sanitize_with_tag(value: &Value, tag: &str) -> Result<Value> {
    let mode = tag.parse::<SanitizeMode>()?;
    Ok(sanitize(value, mode))
}

/// Best-effort integer conversion: leading digits of a string (after optional
/// whitespace and sign), truncated floats, `1`/`0` for booleans. Anything that
/// does not start like a number is `0`.
pub fn parse_int(value: &Value) -> i64 {
    match value {
        Value::Null => 0,
        Value::Bool(flag) => i64::from(*flag),
        Value::Number(n) => n
            .as_i64()
            .unwrap_or_else(|| n.as_f64().map(|f| f as i64).unwrap_or(0)),
        Value::String(s) => parse_int_prefix(s),
        Value::Array(items) => i64::from(!items.is_empty()),
        Value::Object(members) => i64::from(!members.is_empty()),
    }
}

fn parse_int_prefix(text: &str) -> i64 {
    let Some(caps) = INT_PREFIX.captures(text) else {
        return 0;
    };

    let negative = &caps[1] == "-";
    match caps[2].parse::<i64>() {
        Ok(n) if negative => -n,
        Ok(n) => n,
        // 溢位時取極值
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    }
}

/// Strips markup, escapes HTML special characters (quotes included) and
/// backslash-escapes what is left for embedding in quoted strings.
pub fn safe_string(text: &str) -> String {
    let stripped = TAG_PATTERN.replace_all(text, "");

    let mut escaped = String::with_capacity(stripped.len());
    for c in stripped.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            c => escaped.push(c),
        }
    }

    add_slashes(&escaped)
}

fn add_slashes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '\'' | '"' => {
                result.push('\\');
                result.push(c);
            }
            '\0' => result.push_str("\\0"),
            c => result.push(c),
        }
    }
    result
}

/// Drops every character that cannot appear in a URL.
pub fn sanitize_url(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || URL_PUNCTUATION.contains(*c))
        .collect()
}

/// Normalizes a Russian mobile number to `7XXXXXXXXXX`.
///
/// Only digits are considered. Ten-digit numbers must start with `9` and get
/// a `7` prepended; eleven-digit numbers have a leading `8` replaced with `7`
/// and must then start with `79`. Everything else is rejected.
pub fn sanitize_mobile(text: &str) -> Option<String> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.trim_start_matches('0');

    let normalized = match digits.len() {
        10 if digits.starts_with('9') => format!("7{}", digits),
        11 if digits.starts_with('8') => format!("7{}", &digits[1..]),
        11 => digits.to_string(),
        _ => {
            tracing::debug!("Rejecting mobile number with {} digits", digits.len());
            return None;
        }
    };

    if !normalized.starts_with("79") {
        tracing::debug!("Rejecting mobile number outside the 79 range");
        return None;
    }

    Some(normalized)
}

/// `true`, `1` and the tokens `"true"`, `"yes"`, `"Y"`, `"1"`, `"TRUE"`.
pub fn is_truthy_token(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64() == Some(1.0),
        Value::String(s) => TRUTHY_TOKENS.contains(&s.as_str()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mode_tags_round_trip() {
        for mode in SanitizeMode::ALL {
            assert_eq!(mode.as_str().parse::<SanitizeMode>().unwrap(), mode);
        }
        assert!(matches!(
            "email".parse::<SanitizeMode>(),
            Err(BoxError::UnknownSanitizeMode { .. })
        ));
        assert!("SafeString".parse::<SanitizeMode>().is_err());
    }

    #[test]
    fn test_sanitize_user() {
        assert_eq!(sanitize(&json!("42"), SanitizeMode::User), json!(42));
        assert_eq!(sanitize(&json!(0), SanitizeMode::User), Value::Null);
        assert_eq!(sanitize(&json!("-3"), SanitizeMode::User), Value::Null);
        assert_eq!(sanitize(&json!("abc"), SanitizeMode::User), Value::Null);
    }

    #[test]
    fn test_sanitize_integer() {
        assert_eq!(sanitize(&json!("12abc"), SanitizeMode::Integer), json!(12));
        assert_eq!(sanitize(&json!("  -7"), SanitizeMode::Integer), json!(-7));
        assert_eq!(sanitize(&json!("abc"), SanitizeMode::Integer), json!(0));
        assert_eq!(sanitize(&json!(3.9), SanitizeMode::Integer), json!(3));
        assert_eq!(sanitize(&json!(true), SanitizeMode::Integer), json!(1));
        assert_eq!(
            sanitize(&json!("99999999999999999999"), SanitizeMode::Integer),
            json!(i64::MAX)
        );
    }

    #[test]
    fn test_safe_string() {
        assert_eq!(safe_string("<b>hi</b>"), "hi");
        assert_eq!(safe_string("a & b"), "a &amp; b");
        assert_eq!(safe_string(r#"say "hi" it's"#), "say &quot;hi&quot; it&#039;s");
        assert_eq!(safe_string(r"C:\temp"), r"C:\\temp");
        assert_eq!(safe_string("x <!-- hidden --> y"), "x  y");
        assert_eq!(safe_string("5 > 3"), "5 &gt; 3");
        assert_eq!(safe_string("open <script"), "open ");
    }

    #[test]
    fn test_safe_string_keeps_bare_angle_brackets() {
        assert_eq!(safe_string("a < b"), "a &lt; b");
        assert_eq!(safe_string("1 < 2 and 3 > 2"), "1 &lt; 2 and 3 &gt; 2");
        assert_eq!(safe_string("price < 100"), "price &lt; 100");
        assert_eq!(safe_string("x<"), "x&lt;");
        assert_eq!(safe_string("<3 <i>love</i>"), "&lt;3 love");
        assert_eq!(safe_string("a <b>bold</b> < c"), "a bold &lt; c");
    }

    #[test]
    fn test_sanitize_url() {
        assert_eq!(
            sanitize_url("https://example.com/a b?q=ü&x=1"),
            "https://example.com/ab?q=&x=1"
        );
    }

    #[test]
    fn test_sanitize_mobile() {
        assert_eq!(sanitize_mobile("89161234567").as_deref(), Some("79161234567"));
        assert_eq!(sanitize_mobile("79161234567").as_deref(), Some("79161234567"));
        assert_eq!(sanitize_mobile("9161234567").as_deref(), Some("79161234567"));
        assert_eq!(sanitize_mobile("+7 (916) 123-45-67").as_deref(), Some("79161234567"));
        assert_eq!(sanitize_mobile("8 916 123 45 67").as_deref(), Some("79161234567"));
        assert_eq!(sanitize_mobile("12345"), None);
        assert_eq!(sanitize_mobile("4951234567"), None);
        assert_eq!(sanitize_mobile("84951234567"), None);
        assert_eq!(sanitize_mobile("19161234567"), None);
        assert_eq!(sanitize_mobile("791612345678"), None);
        assert_eq!(sanitize_mobile(""), None);
    }

    #[test]
    fn test_sanitize_mobile_via_dispatch() {
        assert_eq!(
            sanitize(&json!("89161234567"), SanitizeMode::Mobile),
            json!("79161234567")
        );
        assert_eq!(sanitize(&json!("12345"), SanitizeMode::Mobile), Value::Null);
        assert_eq!(sanitize(&json!(9161234567_i64), SanitizeMode::Mobile), json!("79161234567"));
    }

    #[test]
    fn test_sanitize_boolean() {
        for truthy in [json!(true), json!("true"), json!("yes"), json!("Y"), json!(1), json!("1"), json!("TRUE")] {
            assert_eq!(sanitize(&truthy, SanitizeMode::Boolean), json!(true), "{}", truthy);
        }
        for falsy in [json!(false), json!("no"), json!("True"), json!(2), json!("y"), json!([])] {
            assert_eq!(sanitize(&falsy, SanitizeMode::Boolean), json!(false), "{}", falsy);
        }
    }

    #[test]
    fn test_null_and_alphanum_pass_through() {
        for mode in SanitizeMode::ALL {
            assert_eq!(sanitize(&Value::Null, mode), Value::Null);
        }
        assert_eq!(sanitize(&json!("a-b c!"), SanitizeMode::Alphanum), json!("a-b c!"));
    }

    #[test]
    fn test_sanitize_with_tag() {
        assert_eq!(sanitize_with_tag(&json!("7"), "integer").unwrap(), json!(7));
        assert!(matches!(
            sanitize_with_tag(&json!("7"), "float"),
            Err(BoxError::UnknownSanitizeMode { .. })
        ));
    }
}
