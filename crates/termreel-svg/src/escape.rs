//! Markup escaping for text content and attribute values.

/// Escape a string for use as element text content.
///
/// `&`, `<` and `>` are replaced. Quotes are legal in text content and
/// pass through.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_text_into(&mut out, text);
    out
}

/// Escape text content, appending to an existing buffer.
pub fn escape_text_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

/// Escape a string for use inside a double-quoted attribute value.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    escape_attr_into(&mut out, value);
    out
}

/// Escape an attribute value, appending to an existing buffer.
pub fn escape_attr_into(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
        assert_eq!(escape_text("plain"), "plain");
        assert_eq!(escape_text(""), "");
    }

    #[test]
    fn test_escape_text_keeps_quotes() {
        assert_eq!(escape_text(r#"echo "hi""#), r#"echo "hi""#);
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape_attr("it's"), "it&#39;s");
        assert_eq!(escape_attr("<tag>"), "&lt;tag&gt;");
    }

    #[test]
    fn test_escape_preserves_unicode() {
        assert_eq!(escape_text("λ → 世界"), "λ → 世界");
        assert_eq!(escape_attr("café"), "café");
    }

    #[test]
    fn test_escape_into_appends() {
        let mut out = String::from("x=");
        escape_attr_into(&mut out, "\"y\"");
        assert_eq!(out, "x=&quot;y&quot;");
    }
}
