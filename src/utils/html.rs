//! HTML escaping for user-supplied text.
//!
//! Everything the operator types (captions, links, bio text) ends up inside
//! the public page markup, so it is escaped before it reaches the template.

use serde_json::Value;
use std::fmt::Display;

/// Escapes the textual form of `value` for safe insertion into HTML.
///
/// Replacements are applied in a fixed order: `&`, `<`, `>`, `"`, `'`.
/// The ampersand goes first so the entities produced by later steps are not
/// escaped a second time.
///
/// # Examples
///
/// ```
/// use linkbio::utils::html::escape_html;
///
/// assert_eq!(escape_html("<b>Tom & Jerry</b>"), "&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;");
/// assert_eq!(escape_html(42), "42");
/// ```
pub fn escape_html(value: impl Display) -> String {
    value
        .to_string()
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escapes an opaque JSON display field.
///
/// Strings are escaped by content (no surrounding quotes), `null` becomes the
/// text `null`, and every other value is escaped in its JSON text form.
pub fn escape_value(value: &Value) -> String {
    match value {
        Value::String(s) => escape_html(s),
        other => escape_html(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_escapes_angle_brackets() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
    }

    #[test]
    fn test_escapes_ampersand() {
        assert_eq!(escape_html("a & b"), "a &amp; b");
    }

    #[test]
    fn test_escapes_quotes() {
        assert_eq!(escape_html("\"hello\""), "&quot;hello&quot;");
        assert_eq!(escape_html("it's"), "it&#39;s");
    }

    #[test]
    fn test_ampersand_is_not_double_escaped() {
        assert_eq!(escape_html("<&>"), "&lt;&amp;&gt;");
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_plain_string_unchanged() {
        assert_eq!(escape_html("hello world"), "hello world");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_non_strings_use_text_form() {
        assert_eq!(escape_html(42), "42");
        assert_eq!(escape_html(1.5), "1.5");
        assert_eq!(escape_value(&Value::Null), "null");
        assert_eq!(escape_value(&json!(7)), "7");
        assert_eq!(escape_value(&json!(true)), "true");
    }

    #[test]
    fn test_json_string_is_escaped_without_quotes() {
        assert_eq!(escape_value(&json!("a<b")), "a&lt;b");
        assert_eq!(escape_value(&json!(["x"])), "[&quot;x&quot;]");
    }

    #[test]
    fn test_neutralises_xss_payload() {
        let escaped = escape_html(r#"<img src=x onerror="alert(1)">"#);
        for raw in ['<', '>', '"', '\''] {
            assert!(!escaped.contains(raw), "raw {raw:?} survived: {escaped}");
        }
    }

    #[test]
    fn test_no_reserved_characters_survive() {
        let inputs = ["<>&\"'", "''\"\"", "a&&b", "<<<", "x > y && y < z"];
        for input in inputs {
            let escaped = escape_html(input);
            let stripped = escaped
                .replace("&amp;", "")
                .replace("&lt;", "")
                .replace("&gt;", "")
                .replace("&quot;", "")
                .replace("&#39;", "");
            for raw in ['<', '>', '&', '"', '\''] {
                assert!(!stripped.contains(raw), "{input:?} -> {escaped:?}");
            }
        }
    }
}
