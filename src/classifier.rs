//! Heuristic classifier - decides whether a word or whole password is
//! common, using exact and fuzzy rules against the reference data store.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::patterns;
use crate::refdata;
use crate::types::WordConfidence;

/// `letters` then one to four digits, lowercase input.
static SHORT_WORD_DIGITS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-z]+)(\d{1,4})$").expect("valid regex"));

/// Graded judgement of how likely a single word is to appear in cracking
/// dictionaries.
///
/// Exact dictionary hits and known prefixes are definite; everything else
/// is graded by length alone, shorter words being more likely to be
/// guessable.
pub fn is_common_word(word: &str) -> WordConfidence {
    let length = word.chars().count();
    if length < 3 {
        return WordConfidence::No;
    }

    let lower = word.to_lowercase();
    if refdata::dictionary_category(&lower).is_some()
        || refdata::OTHER_COMMON_WORDS.contains(lower.as_str())
        || refdata::COMMON_PREFIXES.iter().any(|p| lower.starts_with(p))
    {
        return WordConfidence::Yes;
    }

    if length <= 5 {
        WordConfidence::Medium
    } else if length >= 8 {
        WordConfidence::No
    } else {
        WordConfidence::Low
    }
}

/// Whole-password commonness check, case-insensitive.
///
/// Exact-match-biased: composite rules require the prefix/word plus suffix
/// to cover the whole password, so arbitrary text containing short common
/// substrings does not trip them.
pub fn is_likely_common_password(password: &str) -> bool {
    let lower = password.to_lowercase();
    let length = lower.chars().count();
    if length == 0 {
        return false;
    }

    // 1. exact match against the common list
    if refdata::is_common_listed(&lower) {
        return true;
    }

    // 2. prefix + suffix concatenation
    for prefix in refdata::COMMON_PREFIXES {
        if let Some(rest) = lower.strip_prefix(prefix) {
            if refdata::COMMON_SUFFIXES.iter().any(|s| *s == rest) {
                return true;
            }
        }
    }

    // 3. dictionary word + suffix
    for words in refdata::WORD_CATEGORIES.values() {
        for word in words {
            if let Some(rest) = lower.strip_prefix(word) {
                if refdata::COMMON_SUFFIXES.iter().any(|s| *s == rest) {
                    return true;
                }
            }
        }
    }

    // 4. common password with a "!" tail or leading capital
    for common in refdata::COMMON_PASSWORDS.iter() {
        if lower.len() == common.len() + 1 && lower.starts_with(common) && lower.ends_with('!') {
            return true;
        }
        if password.len() == common.len() && capitalize(common) == password {
            return true;
        }
    }

    // 5. keyboard walk of length >= 4 covering at least half the password
    if let Some(hit) = patterns::longest_keyboard_match(&lower) {
        if hit.len() >= 4 && hit.len() * 2 >= length {
            return true;
        }
    }

    // 6. sequential run covering at least half the password
    if let Some(hit) = patterns::longest_sequential_match(&lower) {
        if hit.len() * 2 >= length {
            return true;
        }
    }

    // 7. repeated-character run covering at least half the password
    if let Some((_, run)) = patterns::longest_repeat_run(&lower) {
        if run >= 3 && run * 2 >= length {
            return true;
        }
    }

    // 8. bare year
    if patterns::YEAR_RE.is_match(&lower) {
        return true;
    }

    // 9. leet-speak family
    if patterns::matches_leet_family(&lower) {
        return true;
    }

    // 10. short single-class password
    if length < 8
        && (lower.chars().all(|c| c.is_alphabetic()) || lower.chars().all(|c| c.is_ascii_digit()))
    {
        return true;
    }

    // 11. high-risk word with a short digit tail
    if let Some(caps) = SHORT_WORD_DIGITS_RE.captures(&lower) {
        if refdata::HIGH_RISK_WORDS.contains(&&caps[1]) {
            return true;
        }
    }

    false
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
