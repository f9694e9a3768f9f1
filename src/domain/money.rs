// Money is integer pence end to end; floats never touch a cost.

/// "£123.45" for display. Negative amounts never occur (validated on input)
/// but render sensibly anyway.
pub fn format_pence(pence: i64) -> String {
    let sign = if pence < 0 { "-" } else { "" };
    let abs = pence.abs();
    format!("{sign}£{}.{:02}", abs / 100, abs % 100)
}

/// Parse a form amount like "45", "45.5" or "45.50" into pence.
/// Returns None for anything malformed or negative.
pub fn parse_pounds(input: &str) -> Option<i64> {
    let s = input.trim();
    if s.is_empty() || s.starts_with('-') || s.starts_with('+') {
        return None;
    }
    let (whole, frac) = match s.split_once('.') {
        // A trailing dot ("45.") is malformed rather than silently zero.
        Some((_, "")) => return None,
        Some((w, f)) => (w, f),
        None => (s, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    let pounds: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().ok()?
    };
    let pence: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().ok()? * 10,
        2 => frac.parse().ok()?,
        _ => return None,
    };
    pounds.checked_mul(100)?.checked_add(pence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_pence_as_pounds() {
        assert_eq!(format_pence(0), "£0.00");
        assert_eq!(format_pence(4550), "£45.50");
        assert_eq!(format_pence(5), "£0.05");
    }

    #[test]
    fn parses_common_forms() {
        assert_eq!(parse_pounds("45"), Some(4500));
        assert_eq!(parse_pounds("45.5"), Some(4550));
        assert_eq!(parse_pounds("45.50"), Some(4550));
        assert_eq!(parse_pounds(".99"), Some(99));
        assert_eq!(parse_pounds(" 0.05 "), Some(5));
    }

    #[test]
    fn rejects_malformed_amounts() {
        for s in ["", "-1", "45.505", "abc", "4 5", "45.", "45.a"] {
            assert_eq!(parse_pounds(s), None, "{s:?} should not parse");
        }
    }
}
