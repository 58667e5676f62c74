use serde_json::{json, Value};
use web_box::core::sanitize::sanitize_with_tag;
use web_box::core::strings::{capitalize, first_wrapped_string, is_ends_with, is_starts_with, length_of, lowercase};
use web_box::{sanitize, BoxError, SanitizeMode};

#[test]
fn test_sanitize_mobile_numbers() {
    let cases = vec![
        ("89161234567", json!("79161234567")),
        ("+7 916 123-45-67", json!("79161234567")),
        ("916 123 45 67", json!("79161234567")),
        ("12345", Value::Null),
        ("8 495 123-45-67", Value::Null),
        ("+1 (916) 123-45-67", Value::Null),
    ];

    for (input, expected) in cases {
        assert_eq!(
            sanitize(&json!(input), SanitizeMode::Mobile),
            expected,
            "Failed to sanitize: {}",
            input
        );
    }
}

#[test]
fn test_sanitize_safe_string_strips_and_escapes() {
    assert_eq!(sanitize(&json!("<b>hi</b>"), SanitizeMode::SafeString), json!("hi"));
    assert_eq!(
        sanitize(&json!(r#"<a href="x">Tom & "Jerry"</a>"#), SanitizeMode::SafeString),
        json!("Tom &amp; &quot;Jerry&quot;")
    );
    assert_eq!(
        sanitize(&json!("O'Reilly"), SanitizeMode::SafeString),
        json!("O&#039;Reilly")
    );
}

#[test]
fn test_sanitize_safe_string_escapes_comparisons() {
    let cases = vec![
        ("a < b", "a &lt; b"),
        ("1 < 2 and 3 > 2", "1 &lt; 2 and 3 &gt; 2"),
        ("price < 100", "price &lt; 100"),
        ("x <= y <i>maybe</i>", "x &lt;= y maybe"),
        ("unclosed <div class", "unclosed "),
    ];

    for (input, expected) in cases {
        assert_eq!(
            sanitize(&json!(input), SanitizeMode::SafeString),
            json!(expected),
            "Failed to sanitize: {}",
            input
        );
    }
}

#[test]
fn test_sanitize_by_tag() {
    let cases = vec![
        ("user", json!("15"), json!(15)),
        ("user", json!("-15"), Value::Null),
        ("integer", json!("42px"), json!(42)),
        ("integer", json!("px"), json!(0)),
        ("alphanum", json!("keep me!"), json!("keep me!")),
        ("url", json!("/path with spaces/ok"), json!("/pathwithspaces/ok")),
        ("boolean", json!("yes"), json!(true)),
        ("boolean", json!("no"), json!(false)),
        ("safeString", json!(12), json!("12")),
    ];

    for (tag, input, expected) in cases {
        assert_eq!(
            sanitize_with_tag(&input, tag).unwrap(),
            expected,
            "mode {} on {}",
            tag,
            input
        );
    }
}

#[test]
fn test_unknown_mode_is_an_error() {
    let err = sanitize_with_tag(&json!("x"), "phone").unwrap_err();
    match err {
        BoxError::UnknownSanitizeMode { mode } => assert_eq!(mode, "phone"),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_string_helpers_on_multibyte_text() {
    let text = "Добро пожаловать";

    assert!(is_starts_with(text, "Добро"));
    assert!(is_ends_with(text, "пожаловать"));
    assert_eq!(length_of(text), 16);
    assert_eq!(capitalize("добро"), "Добро");
    assert_eq!(capitalize("hELLO"), "HELLO");
    assert_eq!(lowercase("ДОБРО"), "добро");
}

#[test]
fn test_first_wrapped_string() {
    assert_eq!(first_wrapped_string("a [b] c", "[", "]"), "b");
    assert_eq!(first_wrapped_string("This is a [custom] string", "[", "]"), "custom");
    assert_eq!(first_wrapped_string("nothing here", "[", "]"), "");
    assert_eq!(first_wrapped_string("dangling [end", "[", "]"), "");
    assert_eq!(first_wrapped_string("[]", "[", "]"), "");
}
