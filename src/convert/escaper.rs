//! ASCII-safe rendering of decoded text.
//!
//! Every code point is handled on its own. Tab, line feed, carriage return and
//! printable ASCII pass through; anything else becomes the escape sequence it
//! would have inside a double-quoted ASCII string literal:
//!
//! | code point              | escape        |
//! |-------------------------|---------------|
//! | BEL, BS, VT, FF         | `\a` `\b` `\v` `\f` |
//! | other C0 controls, DEL  | `\xhh`        |
//! | up to U+FFFF            | `\uhhhh`      |
//! | above U+FFFF            | `\Uhhhhhhhh`  |
//!
//! Hex digits are lowercase.

use std::fmt::Write;

/// True for code points that are copied to the output unchanged.
pub fn passes_through(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | ' '..='~')
}

/// Append the ASCII form of `c` to `out`.
pub fn escape_char_into(c: char, out: &mut String) {
    if passes_through(c) {
        out.push(c);
        return;
    }

    let code = c as u32;
    let _ = match c {
        '\u{07}' => out.write_str("\\a"),
        '\u{08}' => out.write_str("\\b"),
        '\u{0B}' => out.write_str("\\v"),
        '\u{0C}' => out.write_str("\\f"),
        _ if code < 0x20 || code == 0x7F => write!(out, "\\x{:02x}", code),
        _ if code < 0x1_0000 => write!(out, "\\u{:04x}", code),
        _ => write!(out, "\\U{:08x}", code),
    };
}

pub fn escape_char(c: char) -> String {
    let mut out = String::with_capacity(10);
    escape_char_into(c, &mut out);
    out
}

/// Escape a whole string. Pure per-code-point map, no context carried over.
pub fn escape_str(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        escape_char_into(c, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        let printable: String = (32u8..=126).map(char::from).collect();
        assert_eq!(escape_str(&printable), printable);
        assert_eq!(escape_str("a\tb\nc\r\n"), "a\tb\nc\r\n");
        assert_eq!(escape_str("var x=1;"), "var x=1;");
    }

    #[test]
    fn test_already_escaped_text_is_unchanged() {
        let escaped = escape_str("中文");
        assert_eq!(escape_str(&escaped), escaped);
    }

    #[test]
    fn test_named_control_escapes() {
        assert_eq!(escape_char('\u{07}'), "\\a");
        assert_eq!(escape_char('\u{08}'), "\\b");
        assert_eq!(escape_char('\u{0B}'), "\\v");
        assert_eq!(escape_char('\u{0C}'), "\\f");
    }

    #[test]
    fn test_hex_control_escapes() {
        assert_eq!(escape_char('\0'), "\\x00");
        assert_eq!(escape_char('\u{1B}'), "\\x1b");
        assert_eq!(escape_char('\u{1F}'), "\\x1f");
        assert_eq!(escape_char('\u{7F}'), "\\x7f");
    }

    #[test]
    fn test_unicode_escapes() {
        assert_eq!(escape_char('\u{80}'), "\\u0080");
        assert_eq!(escape_char('é'), "\\u00e9");
        assert_eq!(escape_char('中'), "\\u4e2d");
        assert_eq!(escape_char('\u{FEFF}'), "\\ufeff");
        assert_eq!(escape_char('\u{FFFF}'), "\\uffff");
        assert_eq!(escape_char('😀'), "\\U0001f600");
        assert_eq!(escape_char('\u{10FFFF}'), "\\U0010ffff");
    }

    #[test]
    fn test_mixed_text() {
        assert_eq!(
            escape_str("中文\"abc\"测试"),
            "\\u4e2d\\u6587\"abc\"\\u6d4b\\u8bd5"
        );
        assert_eq!(escape_str("中文"), "\\u4e2d\\u6587");
    }

    #[test]
    fn test_output_is_ascii() {
        let input = "héllo\u{0}\u{7F}wörld 😀 中文\u{2028}";
        assert!(escape_str(input).is_ascii());
    }

    #[test]
    fn test_concatenation_property() {
        let samples = ["", "abc", "中", "\u{0}\n", "😀x", "\u{7F}é\t"];
        for a in samples {
            for b in samples {
                let joined = format!("{}{}", a, b);
                assert_eq!(
                    escape_str(&joined),
                    format!("{}{}", escape_str(a), escape_str(b)),
                    "escape({:?} + {:?})",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_passes_through_classification() {
        assert!(passes_through('\t'));
        assert!(passes_through('\n'));
        assert!(passes_through('\r'));
        assert!(passes_through(' '));
        assert!(passes_through('~'));
        assert!(!passes_through('\u{0B}'));
        assert!(!passes_through('\u{7F}'));
        assert!(!passes_through('é'));
    }
}
