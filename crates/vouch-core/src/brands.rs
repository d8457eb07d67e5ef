//! # Standard Brands
//!
//! The refinements shared by every schema built on this crate.
//!
//! | Brand              | Base     | Predicate                               |
//! |--------------------|----------|-----------------------------------------|
//! | `NonEmptyString50` | `String` | 1 to 50 characters inclusive            |
//! | `EmailAddress`     | `String` | contains an RFC 5322 style address      |
//! | `Char`             | `String` | exactly one character                   |
//! | `PositiveInt`      | `i128`   | `n >= 0` (zero is accepted)             |
//!
//! `Timestamp` lives in [`crate::temporal`].
//!
//! Lengths count Unicode scalar values, not bytes.

use std::sync::OnceLock;

use regex::Regex;

use crate::define_brand;

define_brand! {
    /// A string of 1 to 50 characters.
    pub NonEmptyString50: String = |s| (1..=50).contains(&s.chars().count())
}

define_brand! {
    /// A string containing an email address.
    ///
    /// The pattern is a conservative RFC 5322 derivative: a dot-atom or
    /// quoted local part, `@`, then a dotted domain or a bracketed IPv4
    /// literal. Matching is case-insensitive and unanchored.
    pub EmailAddress: String = |s| email_pattern().map_or(false, |re| re.is_match(s))
}

define_brand! {
    /// A string of exactly one character.
    pub Char: String = |s| s.chars().count() == 1
}

define_brand! {
    /// A non-negative integer. Zero is accepted despite the name.
    ///
    /// The base is `i128` so every integer serde_json parses exactly
    /// reaches the predicate.
    pub PositiveInt: i128 = |n| *n >= 0
}

const EMAIL_PATTERN: &str = r#"(?i)(?:[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*|"(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21\x23-\x5b\x5d-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])*")@(?:(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?|\[(?:(?:(2(5[0-5]|[0-4][0-9])|1[0-9][0-9]|[1-9]?[0-9]))\.){3}(?:(2(5[0-5]|[0-4][0-9])|1[0-9][0-9]|[1-9]?[0-9])|[a-z0-9-]*[a-z0-9]:(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21-\x5a\x53-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])+)\])"#;

static EMAIL_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn email_pattern() -> Option<&'static Regex> {
    EMAIL_RE
        .get_or_init(|| match Regex::new(EMAIL_PATTERN) {
            Ok(re) => Some(re),
            Err(error) => {
                tracing::error!(%error, "email pattern failed to compile; rejecting all addresses");
                None
            }
        })
        .as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand::{brand, Branded};
    use crate::decoder::Decoder;
    use crate::error::ErrorKind;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn email_pattern_compiles() {
        assert!(email_pattern().is_some());
    }

    #[test]
    fn non_empty_string_50_boundaries() {
        let d = brand::<NonEmptyString50>();
        assert!(d.decode(&json!("")).is_err());
        assert!(d.decode(&json!("a")).is_ok());
        assert!(d.decode(&json!("a".repeat(50))).is_ok());
        assert!(d.decode(&json!("a".repeat(51))).is_err());
    }

    #[test]
    fn non_empty_string_50_counts_characters() {
        assert!(Branded::<NonEmptyString50>::new("é".repeat(50)).is_ok());
    }

    #[test]
    fn non_empty_string_50_shape() {
        let errors = brand::<NonEmptyString50>().decode(&json!(42)).unwrap_err();
        assert_eq!(errors.errors()[0].kind(), ErrorKind::ShapeMismatch);
        assert_eq!(errors.errors()[0].message(), "expected string, got number");
    }

    #[test]
    fn email_accepts_common_addresses() {
        let d = brand::<EmailAddress>();
        for ok in [
            "a@b.com",
            "first.last@example.co.uk",
            "User+tag@Sub.Example.ORG",
            "\"quoted\"@example.com",
            "ops@[192.168.0.1]",
        ] {
            assert!(d.decode(&json!(ok)).is_ok(), "expected {ok} to be accepted");
        }
    }

    #[test]
    fn email_rejects_non_addresses() {
        let d = brand::<EmailAddress>();
        for bad in ["Helloworld", "bad", "a@", "@b.com", "a@-b.com", ""] {
            assert!(d.decode(&json!(bad)).is_err(), "expected {bad} to be rejected");
        }
    }

    #[test]
    fn email_default_message_echoes_input() {
        let errors = brand::<EmailAddress>().decode(&json!("bad")).unwrap_err();
        assert_eq!(errors.errors()[0].message(), "Invalid value for EmailAddress: bad");
    }

    #[test]
    fn char_is_exactly_one() {
        let d = brand::<Char>();
        assert!(d.decode(&json!("H")).is_ok());
        assert!(d.decode(&json!("ß")).is_ok());
        assert!(d.decode(&json!("")).is_err());
        assert!(d.decode(&json!("HJ")).is_err());
    }

    #[test]
    fn positive_int_accepts_zero() {
        let d = brand::<PositiveInt>();
        assert!(d.decode(&json!(0)).is_ok());
        assert!(d.decode(&json!(7)).is_ok());
        assert!(d.decode(&json!(-1)).is_err());
        assert!(d.decode(&json!(1.5)).is_err());
    }

    #[test]
    fn positive_int_accepts_integers_beyond_i64() {
        let d = brand::<PositiveInt>();
        let big = d.decode(&json!(10_000_000_000_000_000_000u64)).unwrap();
        assert_eq!(*big.get(), 10_000_000_000_000_000_000);
        assert_eq!(serde_json::to_value(&big).unwrap(), json!(10_000_000_000_000_000_000u64));
        assert!(d.decode(&json!(1e20)).is_ok());
        assert!(d.decode(&json!(-1e20)).is_err());
    }

    proptest! {
        #[test]
        fn non_empty_string_50_iff_length_in_range(s in "\\PC{0,60}") {
            let n = s.chars().count();
            let ok = brand::<NonEmptyString50>().decode(&json!(s)).is_ok();
            prop_assert_eq!(ok, (1..=50).contains(&n));
        }

        #[test]
        fn positive_int_iff_non_negative(n in any::<i64>()) {
            let ok = brand::<PositiveInt>().decode(&json!(n)).is_ok();
            prop_assert_eq!(ok, n >= 0);
        }

        #[test]
        fn positive_int_accepts_every_u64(n in any::<u64>()) {
            prop_assert!(brand::<PositiveInt>().decode(&json!(n)).is_ok());
        }

        #[test]
        fn char_iff_single_character(s in "\\PC{0,3}") {
            let single = s.chars().count() == 1;
            let ok = brand::<Char>().decode(&json!(s)).is_ok();
            prop_assert_eq!(ok, single);
        }
    }
}
