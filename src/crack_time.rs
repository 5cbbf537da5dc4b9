//! Crack-time estimator - converts adjusted entropy, score and detected
//! patterns into attack-speed projections and human time strings.

use once_cell::sync::Lazy;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};

use crate::classifier;
use crate::patterns;
use crate::types::{CrackTimeEstimate, PasswordAssessment, PatternKind};

/// Guesses per second for a rate-limited online attack.
const ONLINE_RATE: f64 = 1e3;
/// Guesses per second for an offline attack on a fast hash.
const OFFLINE_RATE: f64 = 1e9;
/// Guesses per second for an optimized GPU/ASIC rig.
const OPTIMIZED_RATE: f64 = 5e10;

const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 3_600.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
const SECONDS_PER_WEEK: f64 = 604_800.0;
const SECONDS_PER_MONTH: f64 = 2_629_746.0;
const SECONDS_PER_YEAR: f64 = 31_556_952.0;

/// The ubiquitous "Capital, lowercase, digits, symbol at the end" shape.
static FOUR_CLASS_FORMULA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-z]+\d+[^A-Za-z0-9]+$").expect("valid regex"));

/// Projects how long the password would survive three attack speeds.
///
/// A password judged common is assumed to be known to attackers and
/// short-circuits to a single guess at each rate. Otherwise the adjusted
/// entropy is scaled by score and length, and the combination count is
/// discounted for every weakening pattern present.
pub fn estimate_crack_time(
    assessment: &PasswordAssessment,
    password: &SecretString,
) -> CrackTimeEstimate {
    if assessment.is_common {
        return CrackTimeEstimate {
            online_seconds: 1.0 / ONLINE_RATE,
            offline_seconds: 1.0 / OFFLINE_RATE,
            optimized_seconds: 1.0 / OPTIMIZED_RATE,
        };
    }

    let pwd = password.expose_secret();
    let length = assessment.length;
    let score_ratio = f64::from(assessment.score.value()) / 100.0;
    let length_factor = if length <= 20 { 1.0 } else { 0.8 };
    let effective_entropy =
        (assessment.adjusted_entropy_bits * (0.7 + 0.3 * score_ratio) * length_factor).min(100.0);
    let combinations = effective_entropy.exp2();

    let mut adjustment = 1.0f64;

    if assessment
        .patterns
        .iter()
        .any(|p| p.kind == PatternKind::Keyboard)
    {
        adjustment *= 0.3;
    }

    if let Some(sequential) = assessment
        .patterns
        .iter()
        .find(|p| p.kind == PatternKind::Sequential)
    {
        adjustment *= 0.4 + 0.3 * (1.0 - sequential.span_ratio);
    }

    if let Some(caps) = patterns::WORD_DIGITS_RE.captures(pwd) {
        adjustment *= if classifier::is_likely_common_password(&caps[1]) {
            0.15
        } else {
            0.5
        };
    }

    if assessment.has_upper && assessment.has_lower && assessment.has_digit && assessment.has_symbol
    {
        adjustment *= if FOUR_CLASS_FORMULA_RE.is_match(pwd) {
            0.6
        } else {
            1.2
        };
    }

    if length >= 16 {
        adjustment *= 1.3;
    }
    if length <= 8 {
        adjustment *= 0.5;
    }

    let adjustment = adjustment.max(0.05);

    CrackTimeEstimate {
        online_seconds: combinations / ONLINE_RATE * adjustment,
        offline_seconds: combinations / OFFLINE_RATE * adjustment,
        optimized_seconds: combinations / OPTIMIZED_RATE * adjustment,
    }
}

/// Formats a duration in seconds as a human time string.
///
/// Sub-millisecond durations read "instantly"; buckets then grow from
/// milliseconds through months; beyond a year the value is rounded ever
/// more coarsely, capping at "1M+ years".
pub fn format_duration(seconds: f64) -> String {
    if seconds.is_nan() || seconds.is_infinite() {
        return "virtually forever".to_string();
    }
    if seconds < 0.001 {
        return "instantly".to_string();
    }
    if seconds < 1.0 {
        return plural((seconds * 1000.0).round(), "millisecond");
    }
    if seconds < SECONDS_PER_MINUTE {
        return plural(seconds.round(), "second");
    }
    if seconds < SECONDS_PER_HOUR {
        return plural((seconds / SECONDS_PER_MINUTE).round(), "minute");
    }
    if seconds < SECONDS_PER_DAY {
        return plural((seconds / SECONDS_PER_HOUR).round(), "hour");
    }
    if seconds < SECONDS_PER_WEEK {
        return plural((seconds / SECONDS_PER_DAY).round(), "day");
    }
    if seconds < SECONDS_PER_MONTH {
        return plural((seconds / SECONDS_PER_WEEK).round(), "week");
    }
    if seconds < SECONDS_PER_YEAR {
        return plural((seconds / SECONDS_PER_MONTH).round(), "month");
    }

    let years = seconds / SECONDS_PER_YEAR;
    if years > 1_000_000.0 {
        "1M+ years".to_string()
    } else if years >= 10_000.0 {
        format!("{}K years", ((years / 10_000.0).round() * 10.0) as u64)
    } else if years >= 1_000.0 {
        plural((years / 1_000.0).round() * 1_000.0, "year")
    } else if years >= 100.0 {
        plural((years / 100.0).round() * 100.0, "year")
    } else if years >= 10.0 {
        plural((years / 10.0).round() * 10.0, "year")
    } else {
        plural(years.round().max(1.0), "year")
    }
}

fn plural(value: f64, unit: &str) -> String {
    let value = value as u64;
    if value == 1 {
        format!("1 {unit}")
    } else {
        format!("{value} {unit}s")
    }
}
