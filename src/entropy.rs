//! Entropy calculator - theoretical entropy with shape penalties.

use crate::patterns;

/// Estimated entropy of a password in bits.
///
/// Charset-size entropy (`log2(charset^length)`) discounted for repeated
/// runs, keyboard/sequential substrings and the letters-then-digits shape.
/// Penalty factors compose multiplicatively; the result is floored at 0.
pub fn entropy_bits(password: &str) -> f64 {
    let length = password.chars().count();
    if length == 0 {
        return 0.0;
    }

    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_other = password
        .chars()
        .any(|c| !c.is_lowercase() && !c.is_uppercase() && !c.is_ascii_digit());

    let mut charset_size = 0u32;
    if has_lower {
        charset_size += 26;
    }
    if has_upper {
        charset_size += 26;
    }
    if has_digit {
        charset_size += 10;
    }
    if has_other {
        charset_size += 33;
    }
    // Guard against log2(0)
    if charset_size == 0 {
        charset_size = 10;
    }

    let mut bits = f64::from(charset_size).log2() * length as f64;

    let repeated = total_repeated_chars(password);
    bits *= 1.0 - (repeated as f64 / length as f64) * 0.25;

    let lower = password.to_lowercase();
    let keyboard_len = patterns::longest_keyboard_match(&lower).map(str::len);
    let sequential_len = patterns::longest_sequential_match(&lower).map(str::len);
    if let Some(pattern_len) = keyboard_len.max(sequential_len) {
        let ratio = (pattern_len as f64 / length as f64).min(1.0);
        bits *= 1.0 - (0.2 + 0.1 * ratio);
    }

    if patterns::WORD_DIGITS_RE.is_match(password) {
        bits *= 0.9;
    }

    bits.max(0.0)
}

/// Total characters covered by maximal same-character runs of length >= 2.
fn total_repeated_chars(password: &str) -> usize {
    let chars: Vec<char> = password.chars().collect();
    let mut total = 0;
    let mut i = 0;
    while i < chars.len() {
        let mut j = i + 1;
        while j < chars.len() && chars[j] == chars[i] {
            j += 1;
        }
        if j - i >= 2 {
            total += j - i;
        }
        i = j;
    }
    total
}
