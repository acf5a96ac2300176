//! Unit tests for the currency codec.

use super::*;

mod decode_tests {
    use super::*;

    #[test]
    fn strips_dollar_sign_and_point() {
        assert_eq!(decode_to_cents("$1.23").unwrap(), 123);
    }

    #[test]
    fn accepts_large_amounts() {
        assert_eq!(decode_to_cents("$1,234.56").unwrap(), 123456);
    }

    #[test]
    fn accepts_three_character_minimum() {
        assert_eq!(decode_to_cents("105").unwrap(), 105);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(decode_to_cents("  $7.10 ").unwrap(), 710);
    }

    #[test]
    fn rejects_single_digit() {
        assert!(matches!(
            decode_to_cents("5"),
            Err(InventoryError::Format(_))
        ));
    }

    #[test]
    fn rejects_two_characters() {
        assert!(decode_to_cents("$5").is_err());
        assert!(decode_to_cents("99").is_err());
    }

    #[test]
    fn short_check_applies_after_trimming() {
        assert!(decode_to_cents("  $5  ").is_err());
    }

    #[test]
    fn rejects_bare_symbol() {
        assert!(decode_to_cents("$").is_err());
    }

    #[test]
    fn rejects_text_without_digits() {
        assert!(decode_to_cents("free").is_err());
    }

    #[test]
    fn rejects_overflowing_amounts() {
        assert!(decode_to_cents("$99999999999999999999999.00").is_err());
    }
}

mod encode_tests {
    use super::*;

    #[test]
    fn pads_single_digit_cents() {
        assert_eq!(encode_from_cents(5), "$0.05");
    }

    #[test]
    fn pads_two_digit_cents() {
        assert_eq!(encode_from_cents(42), "$0.42");
    }

    #[test]
    fn formats_zero() {
        assert_eq!(encode_from_cents(0), "$0.00");
    }

    #[test]
    fn formats_dollars_and_cents() {
        assert_eq!(encode_from_cents(150), "$1.50");
        assert_eq!(encode_from_cents(5000), "$50.00");
        assert_eq!(encode_from_cents(123456), "$1234.56");
    }
}

#[test]
fn decode_inverts_encode_above_the_floor() {
    for cents in [10, 99, 100, 101, 999, 1000, 5000, 123456, 9_876_543] {
        assert_eq!(decode_to_cents(&encode_from_cents(cents)).unwrap(), cents);
    }
}
