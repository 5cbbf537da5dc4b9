//! Pattern detector - finds keyboard walks, sequential runs, repeats,
//! leet-speak and word/number/date formulas.
//!
//! Keyboard and sequential detection are longest-match-wins linear scans
//! over the static tables in [`crate::refdata`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::classifier;
use crate::refdata;
use crate::types::{PatternKind, PatternMatch, WordConfidence};

/// A detected pattern together with its score contribution.
#[derive(Debug, Clone)]
pub struct PatternFinding {
    pub pattern: PatternMatch,
    pub delta: i64,
}

/// `letters` then `digits` covering the whole input.
pub(crate) static WORD_DIGITS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]+)(\d+)$").expect("valid regex"));

static WORD_SYMBOL_DIGITS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]+)([^A-Za-z0-9]+)(\d+)$").expect("valid regex"));

static ALTERNATING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[A-Za-z][0-9])+$|^(?:[0-9][A-Za-z])+$").expect("valid regex"));

/// Bare 4-digit year, 1900s or 2000s.
pub(crate) static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(19|20)\d{2}$").expect("valid regex"));

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}[/\-.]\d{1,2}[/\-.](\d{4}|\d{2})$").expect("valid regex"));

/// Leet-speak shapes of the classic high-risk words.
static LEET_FAMILY: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)^p[a@4][s$5][s$5]w[o0]rd").expect("valid regex"),
        Regex::new(r"(?i)^[a@4]dm[i1!]n").expect("valid regex"),
        Regex::new(r"(?i)^t[e3][s$5]t").expect("valid regex"),
    ]
});

const LEET_CHARS: &[char] = &['@', '0', '1', '3', '4', '$', '5', '7', '!'];

/// Checks the input against the fixed leet-speak regex family.
pub(crate) fn matches_leet_family(lower: &str) -> bool {
    LEET_FAMILY.iter().any(|re| re.is_match(lower))
}

/// Maps leet substitution characters back to the letters they stand for.
pub(crate) fn leet_normalize(lower: &str) -> String {
    lower
        .chars()
        .map(|c| match c {
            '@' | '4' => 'a',
            '0' => 'o',
            '1' => 'l',
            '!' => 'i',
            '3' => 'e',
            '$' | '5' => 's',
            '7' => 't',
            other => other,
        })
        .collect()
}

/// Longest keyboard-adjacency table entry contained in the input.
pub(crate) fn longest_keyboard_match(lower: &str) -> Option<&'static str> {
    refdata::KEYBOARD_PATTERNS
        .iter()
        .copied()
        .filter(|entry| lower.contains(entry))
        .max_by_key(|entry| entry.len())
}

/// Longest window of any base sequential run contained in the input.
///
/// Pure search over the static table, longest window first, no scan state.
pub(crate) fn longest_sequential_match(lower: &str) -> Option<&'static str> {
    let mut best: Option<&'static str> = None;
    for &base in refdata::SEQUENTIAL_PATTERNS {
        let max_window = base.len().min(lower.len());
        'windows: for window in (3..=max_window).rev() {
            if best.is_some_and(|b| b.len() >= window) {
                break;
            }
            for start in 0..=(base.len() - window) {
                let candidate = &base[start..start + window];
                if lower.contains(candidate) {
                    best = Some(candidate);
                    break 'windows;
                }
            }
        }
    }
    best
}

/// Longest maximal run of one repeated character, if of length >= 2.
pub(crate) fn longest_repeat_run(password: &str) -> Option<(char, usize)> {
    let chars: Vec<char> = password.chars().collect();
    let mut best: Option<(char, usize)> = None;
    let mut i = 0;
    while i < chars.len() {
        let mut j = i + 1;
        while j < chars.len() && chars[j] == chars[i] {
            j += 1;
        }
        let run = j - i;
        if run >= 2 && best.map(|(_, len)| len).unwrap_or(0) < run {
            best = Some((chars[i], run));
        }
        i = j;
    }
    best
}

/// Runs every detector over the password and returns the findings in a
/// fixed order. Deltas are the score adjustments of the composite scorer.
pub fn detect_patterns(password: &str) -> Vec<PatternFinding> {
    let length = password.chars().count();
    if length == 0 {
        return Vec::new();
    }
    let lower = password.to_lowercase();
    let length_f = length as f64;
    let mut findings = Vec::new();

    if let Some(hit) = longest_keyboard_match(&lower) {
        let ratio = (hit.len() as f64 / length_f).min(1.0);
        findings.push(PatternFinding {
            pattern: PatternMatch {
                kind: PatternKind::Keyboard,
                description: format!("Keyboard walk \"{hit}\""),
                span_ratio: ratio,
            },
            delta: -((25.0 * ratio).round().min(25.0) as i64),
        });
    }

    if let Some((_, run)) = longest_repeat_run(password) {
        if run >= 3 {
            findings.push(PatternFinding {
                pattern: PatternMatch {
                    kind: PatternKind::Repeating,
                    description: "Repeated character run".to_string(),
                    span_ratio: (run as f64 / length_f).min(1.0),
                },
                delta: -15,
            });
        }
    }

    if let Some(hit) = longest_sequential_match(&lower) {
        let ratio = (hit.len() as f64 / length_f).min(1.0);
        findings.push(PatternFinding {
            pattern: PatternMatch {
                kind: PatternKind::Sequential,
                description: format!("Sequential run \"{hit}\""),
                span_ratio: ratio,
            },
            delta: -((20.0 * ratio).round().min(20.0) as i64),
        });
    }

    if length >= 4 && ALTERNATING_RE.is_match(password) {
        findings.push(PatternFinding {
            pattern: PatternMatch {
                kind: PatternKind::Alternating,
                description: "Alternating letters and digits".to_string(),
                span_ratio: 1.0,
            },
            delta: -15,
        });
    }

    if is_leet_variant(&lower) {
        findings.push(PatternFinding {
            pattern: PatternMatch {
                kind: PatternKind::Leet,
                description: "Leet-speak variant of a common word".to_string(),
                span_ratio: 1.0,
            },
            delta: -10,
        });
    }

    if WORD_SYMBOL_DIGITS_RE.is_match(password) {
        findings.push(PatternFinding {
            pattern: PatternMatch {
                kind: PatternKind::WordPlusSymbolNumber,
                description: "Word, symbols, then numbers".to_string(),
                span_ratio: 1.0,
            },
            delta: -15,
        });
    }

    if let Some(caps) = WORD_DIGITS_RE.captures(password) {
        findings.push(word_plus_number_finding(&caps[1], &caps[2], length));
    }

    if YEAR_RE.is_match(password) || DATE_RE.is_match(password) {
        findings.push(PatternFinding {
            pattern: PatternMatch {
                kind: PatternKind::Date,
                description: "Date or year".to_string(),
                span_ratio: 1.0,
            },
            delta: -20,
        });
    }

    if password.chars().all(|c| c.is_alphabetic()) {
        findings.push(PatternFinding {
            pattern: PatternMatch {
                kind: PatternKind::SingleCharsetType,
                description: "Letters only".to_string(),
                span_ratio: 1.0,
            },
            delta: -20,
        });
    } else if password.chars().all(|c| c.is_ascii_digit()) {
        findings.push(PatternFinding {
            pattern: PatternMatch {
                kind: PatternKind::SingleCharsetType,
                description: "Digits only".to_string(),
                span_ratio: 1.0,
            },
            delta: -30,
        });
    }

    findings
}

/// Leet finding needs at least one substitution character, so plain
/// dictionary words are not double-labelled.
fn is_leet_variant(lower: &str) -> bool {
    if !lower.chars().any(|c| LEET_CHARS.contains(&c)) {
        return false;
    }
    if matches_leet_family(lower) {
        return true;
    }
    let normalized = leet_normalize(lower);
    normalized != *lower
        && (refdata::COMMON_PASSWORDS.contains(normalized.as_str())
            || refdata::OTHER_COMMON_WORDS.contains(normalized.as_str())
            || refdata::dictionary_category(&normalized).is_some())
}

/// Word+number sub-policy: penalty scales with how common the letter part
/// is; genuinely uncommon words are rewarded, with the digit suffix judged
/// on its own.
fn word_plus_number_finding(word: &str, digits: &str, total_length: usize) -> PatternFinding {
    let word_lower = word.to_lowercase();
    let length_f = total_length as f64;

    let (delta, description) = if refdata::HIGH_RISK_WORDS.contains(&word_lower.as_str()) {
        (-25, "High-risk word followed by numbers".to_string())
    } else if let Some(category) = refdata::dictionary_category(&word_lower) {
        (
            -25,
            format!("Dictionary word ({category}) followed by numbers"),
        )
    } else {
        match classifier::is_common_word(&word_lower) {
            WordConfidence::Yes => (-20, "Common word followed by numbers".to_string()),
            confidence @ (WordConfidence::Medium | WordConfidence::Low) => (
                -((10.0 * confidence.weight()).round() as i64),
                "Possibly common word followed by numbers".to_string(),
            ),
            WordConfidence::No => {
                // Uncommon words are rewarded; the digit suffix is then
                // judged on its own.
                let mut delta = 5i64;
                let description;
                if let Some(run) = longest_digit_sequence_run(digits) {
                    let penalty = ((run as f64 / length_f) * 20.0).min(10.0).round() as i64;
                    let bonus = digits.len().min(3) as i64;
                    delta += bonus - penalty;
                    description = "Uncommon word with sequential number suffix".to_string();
                } else if digits.len() >= 3
                    && digits.chars().all(|c| c == digits.chars().next().unwrap_or('0'))
                {
                    delta -= 5;
                    description = "Uncommon word with repeated number suffix".to_string();
                } else {
                    if digits.len() >= 3 {
                        delta += ((digits.len() as i64) - 2).min(5);
                    }
                    description = "Uncommon word followed by numbers".to_string();
                }
                (delta, description)
            }
        }
    };

    PatternFinding {
        pattern: PatternMatch {
            kind: PatternKind::WordPlusNumber,
            description,
            span_ratio: 1.0,
        },
        delta,
    }
}

/// Longest strictly ascending or descending digit run of length >= 3.
fn longest_digit_sequence_run(digits: &str) -> Option<usize> {
    let values: Vec<i32> = digits.chars().filter_map(|c| c.to_digit(10)).map(|d| d as i32).collect();
    if values.len() < 3 {
        return None;
    }
    let mut best = 0usize;
    for direction in [1i32, -1i32] {
        let mut run = 1usize;
        for pair in values.windows(2) {
            if pair[1] - pair[0] == direction {
                run += 1;
                best = best.max(run);
            } else {
                run = 1;
            }
        }
    }
    if best >= 3 { Some(best) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding_of(password: &str, kind: PatternKind) -> Option<PatternFinding> {
        detect_patterns(password)
            .into_iter()
            .find(|f| f.pattern.kind == kind)
    }

    #[test]
    fn test_keyboard_walk_longest_match_wins() {
        let finding = finding_of("qwerty123", PatternKind::Keyboard).unwrap();
        assert!(finding.pattern.description.contains("qwerty"));
        assert!((finding.pattern.span_ratio - 6.0 / 9.0).abs() < 1e-9);
        assert_eq!(finding.delta, -17);
    }

    #[test]
    fn test_sequential_run_longest_window() {
        let finding = finding_of("xx123456xx", PatternKind::Sequential).unwrap();
        assert!(finding.pattern.description.contains("123456"));
        assert!((finding.pattern.span_ratio - 0.6).abs() < 1e-9);
        assert_eq!(finding.delta, -12);
    }

    #[test]
    fn test_descending_sequence_detected() {
        let finding = finding_of("zz98765zz", PatternKind::Sequential).unwrap();
        assert!(finding.pattern.description.contains("98765"));
    }

    #[test]
    fn test_repeating_run() {
        let finding = finding_of("aaabcd!x", PatternKind::Repeating).unwrap();
        assert_eq!(finding.delta, -15);
        // Runs of two are not a repeating pattern
        assert!(finding_of("aabcd!xy", PatternKind::Repeating).is_none());
    }

    #[test]
    fn test_alternating_letters_and_digits() {
        assert!(finding_of("a1b2c3", PatternKind::Alternating).is_some());
        assert!(finding_of("1a2b3c", PatternKind::Alternating).is_some());
        assert!(finding_of("ab12cd", PatternKind::Alternating).is_none());
    }

    #[test]
    fn test_leet_variant_of_common_word() {
        assert!(finding_of("p@ssw0rd", PatternKind::Leet).is_some());
        assert!(finding_of("adm1n", PatternKind::Leet).is_some());
        // Plain words are not leet
        assert!(finding_of("password", PatternKind::Leet).is_none());
    }

    #[test]
    fn test_word_symbol_number_formula() {
        let finding = finding_of("horse!!42", PatternKind::WordPlusSymbolNumber).unwrap();
        assert_eq!(finding.delta, -15);
    }

    #[test]
    fn test_word_plus_number_high_risk() {
        let finding = finding_of("admin123", PatternKind::WordPlusNumber).unwrap();
        assert_eq!(finding.delta, -25);
    }

    #[test]
    fn test_word_plus_number_dictionary_category() {
        let finding = finding_of("monkey123", PatternKind::WordPlusNumber).unwrap();
        assert_eq!(finding.delta, -25);
        assert!(finding.pattern.description.contains("animals"));
    }

    #[test]
    fn test_word_plus_number_graded_confidence() {
        // "house" is unknown and 5 chars long: Medium confidence, -7
        let finding = finding_of("house991", PatternKind::WordPlusNumber).unwrap();
        assert_eq!(finding.delta, -7);
        // "strange" is unknown and 7 chars long: Low confidence, -4
        let finding = finding_of("strange99", PatternKind::WordPlusNumber).unwrap();
        assert_eq!(finding.delta, -4);
    }

    #[test]
    fn test_word_plus_number_uncommon_word_sequential_suffix() {
        // +5 uncommon reward, +3 length bonus, -5 sequential-run penalty
        let finding = finding_of("blorptext123", PatternKind::WordPlusNumber).unwrap();
        assert_eq!(finding.delta, 3);
    }

    #[test]
    fn test_word_plus_number_uncommon_word_repeated_suffix() {
        // +5 uncommon reward, -5 repeated-digit penalty
        let finding = finding_of("blorptext111", PatternKind::WordPlusNumber).unwrap();
        assert_eq!(finding.delta, 0);
    }

    #[test]
    fn test_word_plus_number_uncommon_word_plain_suffix() {
        // +5 uncommon reward, +1 suffix-length bonus
        let finding = finding_of("blorptext957", PatternKind::WordPlusNumber).unwrap();
        assert_eq!(finding.delta, 6);
    }

    #[test]
    fn test_date_patterns() {
        assert_eq!(finding_of("1990", PatternKind::Date).unwrap().delta, -20);
        assert!(finding_of("12/25/1990", PatternKind::Date).is_some());
        assert!(finding_of("3-7-99", PatternKind::Date).is_some());
        assert!(finding_of("covers1990", PatternKind::Date).is_none());
    }

    #[test]
    fn test_single_charset_type() {
        let finding = finding_of("zqwvkjhm", PatternKind::SingleCharsetType).unwrap();
        assert_eq!(finding.delta, -20);
        let finding = finding_of("8264097", PatternKind::SingleCharsetType).unwrap();
        assert_eq!(finding.delta, -30);
        assert!(finding_of("zqwvkjh7", PatternKind::SingleCharsetType).is_none());
    }

    #[test]
    fn test_clean_password_has_no_findings() {
        assert!(detect_patterns("Xk9#mQ2!vL7$").is_empty());
    }

    #[test]
    fn test_empty_password_has_no_findings() {
        assert!(detect_patterns("").is_empty());
    }

    #[test]
    fn test_digit_sequence_run_scan() {
        assert_eq!(longest_digit_sequence_run("123"), Some(3));
        assert_eq!(longest_digit_sequence_run("987"), Some(3));
        assert_eq!(longest_digit_sequence_run("1234"), Some(4));
        assert_eq!(longest_digit_sequence_run("957"), None);
        assert_eq!(longest_digit_sequence_run("12"), None);
    }
}
