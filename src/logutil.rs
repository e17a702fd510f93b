//! Helpers for keeping log lines single-line when they carry player input.

/// Escape a string for single-line logging. Newlines, carriage returns,
/// tabs, and backslashes become their two-character escape forms; other
/// control characters are rendered as `\xNN`. Input longer than the
/// preview cap is truncated with an ellipsis.
pub fn escape_log(s: &str) -> String {
    const MAX_PREVIEW: usize = 200;
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 8);
    for (count, ch) in s.chars().enumerate() {
        if count >= MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                use std::fmt::Write;
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape_log;

    #[test]
    fn control_characters_become_escapes() {
        assert_eq!(escape_log("go\nnorth\r\tnow"), "go\\nnorth\\r\\tnow");
    }

    #[test]
    fn long_input_is_truncated() {
        let long = "x".repeat(500);
        let escaped = escape_log(&long);
        assert!(escaped.chars().count() <= 201);
        assert!(escaped.ends_with('…'));
    }
}
