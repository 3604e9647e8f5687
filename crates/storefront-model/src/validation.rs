//! Field validators for the create forms
//!
//! Rules:
//! - floor area: non-empty, parses as a finite number
//! - email: contains `@`, at least three non-digit characters, a local part
//!   that is not all digits, and none of the disallowed punctuation
//! - rating: integer within `0..=5`

use once_cell::sync::Lazy;
use regex::Regex;

/// Lowest accepted star rating
pub const MIN_RATING: i64 = 0;
/// Highest accepted star rating
pub const MAX_RATING: i64 = 5;

/// Punctuation that may not appear anywhere in an email
static DISALLOWED_EMAIL_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[~`!#$%^&*+=\-\[\]\\';,/{}|":<>?]"#).expect("static pattern compiles")
});

/// Validate a star rating
#[inline]
#[must_use]
pub fn validate_rating(rating: i64) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&rating)
}

/// Validate floor area text as typed into the form
#[must_use]
pub fn validate_floor_area(text: &str) -> bool {
    parse_floor_area(text).is_some()
}

/// Parse floor area text, `None` when invalid
#[must_use]
pub fn parse_floor_area(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Validate an email address
#[must_use]
pub fn validate_email(email: &str) -> bool {
    if DISALLOWED_EMAIL_CHARS.is_match(email) {
        return false;
    }

    let non_digits = email.chars().filter(|c| !c.is_ascii_digit()).count();
    if non_digits < 3 {
        return false;
    }

    match email.split_once('@') {
        Some((local, _)) => !(local.is_empty() || local.chars().all(|c| c.is_ascii_digit())),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn email_examples() {
        assert!(validate_email("a@b"));
        assert!(validate_email("shop.manager@example.com"));
        assert!(!validate_email("noAtSign"));
        assert!(!validate_email("bad!char@x"));
        assert!(!validate_email("first-last@example.com"));
        assert!(!validate_email("12345@example.com"));
        assert!(!validate_email("1@2"));
        assert!(!validate_email("@example.com"));
    }

    #[test]
    fn floor_area_examples() {
        assert!(!validate_floor_area(""));
        assert!(!validate_floor_area("   "));
        assert!(validate_floor_area("12.5"));
        assert!(validate_floor_area("120"));
        assert!(!validate_floor_area("abc"));
        assert!(!validate_floor_area("NaN"));
        assert!(!validate_floor_area("inf"));
        assert_eq!(parse_floor_area(" 80 "), Some(80.0));
    }

    #[test]
    fn rating_bounds() {
        assert!(validate_rating(0));
        assert!(validate_rating(5));
        assert!(!validate_rating(-1));
        assert!(!validate_rating(6));
    }

    proptest! {
        #[test]
        fn prop_rating_matches_range(r in -100i64..100) {
            prop_assert_eq!(validate_rating(r), (0..=5).contains(&r));
        }

        #[test]
        fn prop_email_without_at_is_invalid(s in "[a-zA-Z0-9._ ]{0,24}") {
            prop_assert!(!validate_email(&s));
        }

        #[test]
        fn prop_disallowed_char_rejects(
            local in "[a-z]{2,8}",
            domain in "[a-z]{2,8}",
            bad in prop::sample::select(vec!['!', '#', '$', '%', '-', '/', '?', '|', ':', ';']),
        ) {
            let email = format!("{local}{bad}@{domain}");
            prop_assert!(!validate_email(&email));
        }

        #[test]
        fn prop_finite_numbers_are_valid_floor_area(v in -1.0e9f64..1.0e9) {
            prop_assert!(validate_floor_area(&v.to_string()));
        }
    }
}
