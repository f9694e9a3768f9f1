// UK postcode validation per the Royal Mail format, e.g. "SW1A 1AA",
// "M1 1AE", "B33 8TH", plus the BFPO and GIR 0AA special cases.

use regex::Regex;
use std::sync::OnceLock;

use crate::errors::ServerError;

fn postcode_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([A-Z]{1,2}\d[A-Z\d]?\s?\d[A-Z]{2}|BFPO\s?\d{1,4}|GIR\s?0AA)$")
            .expect("postcode pattern is valid")
    })
}

pub fn is_valid(postcode: &str) -> bool {
    postcode_regex().is_match(postcode.trim().to_uppercase().as_str())
}

/// Upper-cases and re-inserts the single space before the three-character
/// inward code: "sw1a1aa" -> "SW1A 1AA".
pub fn format(postcode: &str) -> String {
    let compact: String = postcode
        .trim()
        .to_uppercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if compact.len() >= 3 {
        let split = compact.len() - 3;
        format!("{} {}", &compact[..split], &compact[split..])
    } else {
        compact
    }
}

/// Validates and normalises in one step, for create/update paths.
pub fn validate_and_format(postcode: &str) -> Result<String, ServerError> {
    if !is_valid(postcode) {
        return Err(ServerError::BadRequest(format!(
            "'{}' is not a valid UK postcode",
            postcode.trim()
        )));
    }
    Ok(format(postcode))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_royal_mail_examples() {
        for pc in ["SW1A 1AA", "M1 1AE", "B33 8TH", "CR2 6XH", "DN55 1PT", "GIR 0AA"] {
            assert!(is_valid(pc), "{pc} should be valid");
        }
    }

    #[test]
    fn accepts_lowercase_and_missing_space() {
        assert!(is_valid("sw1a1aa"));
        assert!(is_valid("m11ae"));
    }

    #[test]
    fn rejects_garbage() {
        for pc in ["", "12345", "ABC", "SW1A 1A", "1A 1AA"] {
            assert!(!is_valid(pc), "{pc} should be invalid");
        }
    }

    #[test]
    fn formats_to_standard_shape() {
        assert_eq!(format("sw1a1aa"), "SW1A 1AA");
        assert_eq!(format(" m1 1ae "), "M1 1AE");
    }

    #[test]
    fn validate_and_format_round_trips() {
        assert_eq!(validate_and_format("dn551pt").unwrap(), "DN55 1PT");
        assert!(validate_and_format("not a postcode").is_err());
    }
}
