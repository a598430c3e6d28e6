//! Line splitting and character helpers shared by the file formats.

/// Characters that editors silently prepend or leave behind in CSV exports.
/// Only these are trimmed from dictionary keys; a plain space can be a key.
const INVISIBLE: &[char] = &['\u{FEFF}', '\u{200B}', '\u{200C}', '\u{200D}', '\u{2060}'];

/// Split text into lines on any run of `\r` / `\n`, so CRLF, LF and CR files
/// all read the same. Empty lines are dropped.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(['\r', '\n']).filter(|line| !line.is_empty())
}

/// Trim BOM and zero-width characters from both ends, leaving whitespace alone.
pub fn trim_invisible(s: &str) -> &str {
    s.trim_matches(INVISIBLE)
}

/// Format a code point as `0x` followed by at least four lowercase hex digits.
pub fn code_point_hex(c: char) -> String {
    format!("0x{:04x}", c as u32)
}

/// Split on commas, trimming whitespace that surrounds each comma.
///
/// Whitespace at the outer ends of `s` is kept, so a single-space list `" "`
/// yields `[" "]` rather than an empty value.
pub(crate) fn split_list(s: &str) -> Vec<&str> {
    let parts: Vec<&str> = s.split(',').collect();
    let last = parts.len().saturating_sub(1);
    parts
        .into_iter()
        .enumerate()
        .map(|(i, part)| {
            let part = if i > 0 { part.trim_start() } else { part };
            if i < last {
                part.trim_end()
            } else {
                part
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_all_line_endings() {
        let crlf: Vec<_> = split_lines("a\r\nb\r\n").collect();
        let lf: Vec<_> = split_lines("a\nb\n").collect();
        let cr: Vec<_> = split_lines("a\rb\r").collect();
        assert_eq!(crlf, vec!["a", "b"]);
        assert_eq!(lf, crlf);
        assert_eq!(cr, crlf);
    }

    #[test]
    fn test_split_lines_skips_blank_lines() {
        let lines: Vec<_> = split_lines("a\n\n\nb").collect();
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_trim_invisible_keeps_spaces() {
        assert_eq!(trim_invisible("\u{FEFF}М "), "М ");
        assert_eq!(trim_invisible(" "), " ");
        assert_eq!(trim_invisible("\u{200B}0\u{200B}"), "0");
    }

    #[test]
    fn test_code_point_hex() {
        assert_eq!(code_point_hex('A'), "0x0041");
        assert_eq!(code_point_hex('М'), "0x041c");
        assert_eq!(code_point_hex('😀'), "0x1f600");
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("А, В ,Е"), vec!["А", "В", "Е"]);
        assert_eq!(split_list(" "), vec![" "]);
        assert_eq!(split_list("78,79"), vec!["78", "79"]);
    }
}
