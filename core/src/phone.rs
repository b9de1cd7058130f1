//! Phone-number input normalisation (`010-1234-5678` style).

/// Maximum digits kept from the input.
pub const MAX_PHONE_DIGITS: usize = 11;

/// Keep ASCII digits (max 11) and re-insert dashes after the 3rd and 7th.
///
/// `"01012345678"` → `"010-1234-5678"`, `"010abc1234"` → `"010-1234"`.
pub fn format_phone_input(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_PHONE_DIGITS)
        .collect();

    match digits.len() {
        0..=3 => digits,
        4..=7 => format!("{}-{}", &digits[..3], &digits[3..]),
        _ => format!("{}-{}-{}", &digits[..3], &digits[3..7], &digits[7..]),
    }
}
