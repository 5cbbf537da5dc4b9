//! Core types produced by the assessment pipeline.

#[cfg(feature = "serde")]
use serde::Serialize;

/// Composite password score, always clamped to `[1, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
pub struct Score(u8);

impl Score {
    pub const MIN: Score = Score(1);
    pub const MAX: Score = Score(100);

    /// Builds a score from a raw running total, clamping to `[1, 100]`.
    pub fn clamped(raw: i64) -> Self {
        Score(raw.clamp(1, 100) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// Ordered strength label derived from the clamped score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "camelCase"))]
pub enum StrengthTier {
    VeryWeak,
    Weak,
    Moderate,
    Strong,
    VeryStrong,
    Excellent,
}

impl StrengthTier {
    /// Classifies a clamped score into a tier.
    ///
    /// Thresholds shift up by 10 when patterns were detected and by a
    /// further 10 when the password is common, so a flagged password needs
    /// a higher raw score to reach the same tier.
    pub fn classify(score: Score, has_patterns: bool, is_common: bool) -> Self {
        let mut adj = 0i32;
        if has_patterns {
            adj += 10;
        }
        if is_common {
            adj += 10;
        }
        let score = i32::from(score.value());
        if score >= 90 + adj {
            StrengthTier::Excellent
        } else if score >= 80 + adj {
            StrengthTier::VeryStrong
        } else if score >= 70 + adj {
            StrengthTier::Strong
        } else if score >= 50 + adj {
            StrengthTier::Moderate
        } else if score >= 30 + adj {
            StrengthTier::Weak
        } else {
            StrengthTier::VeryWeak
        }
    }
}

impl std::fmt::Display for StrengthTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            StrengthTier::VeryWeak => "Very weak",
            StrengthTier::Weak => "Weak",
            StrengthTier::Moderate => "Moderate",
            StrengthTier::Strong => "Strong",
            StrengthTier::VeryStrong => "Very strong",
            StrengthTier::Excellent => "Excellent",
        };
        f.write_str(label)
    }
}

/// Graded confidence that a word is common.
///
/// This is a tagged value with an associated weight, not a boolean: the
/// scorer consumes the weight as a penalty multiplier, and coercing the
/// intermediate grades to true/false would change scoring output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WordConfidence {
    No,
    Low,
    Medium,
    Yes,
}

impl WordConfidence {
    /// Numeric penalty weight associated with the grade.
    pub fn weight(&self) -> f64 {
        match self {
            WordConfidence::No => 0.0,
            WordConfidence::Low => 0.4,
            WordConfidence::Medium => 0.7,
            WordConfidence::Yes => 1.0,
        }
    }

    pub fn is_definite(&self) -> bool {
        matches!(self, WordConfidence::Yes)
    }
}

/// Kind of weakness pattern found in a password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "camelCase"))]
pub enum PatternKind {
    Keyboard,
    Sequential,
    Repeating,
    Leet,
    WordPlusNumber,
    WordPlusSymbolNumber,
    Date,
    Alternating,
    SingleCharsetType,
}

/// A single detected pattern with the fraction of the password it covers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "camelCase"))]
pub struct PatternMatch {
    pub kind: PatternKind,
    pub description: String,
    /// Fraction of password length covered by the match, in `[0, 1]`.
    pub span_ratio: f64,
}

/// Full result of a password assessment.
///
/// Pure function output: recomputed from scratch on every call, owned by
/// the caller. Invariants: `score` is clamped to `[1, 100]` and
/// `adjusted_entropy_bits <= entropy_bits`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "camelCase"))]
pub struct PasswordAssessment {
    pub score: Score,
    pub tier: StrengthTier,
    #[cfg_attr(feature = "serde", serde(rename = "entropy"))]
    pub entropy_bits: f64,
    #[cfg_attr(feature = "serde", serde(rename = "adjustedEntropy"))]
    pub adjusted_entropy_bits: f64,
    pub patterns: Vec<PatternMatch>,
    pub issues: Vec<String>,
    pub has_upper: bool,
    pub has_lower: bool,
    pub has_digit: bool,
    pub has_symbol: bool,
    pub length: usize,
    pub is_common: bool,
}

impl PasswordAssessment {
    /// The all-minimum assessment returned for degenerate inputs.
    pub(crate) fn degenerate(issue: impl Into<String>) -> Self {
        PasswordAssessment {
            score: Score::MIN,
            tier: StrengthTier::VeryWeak,
            entropy_bits: 0.0,
            adjusted_entropy_bits: 0.0,
            patterns: Vec::new(),
            issues: vec![issue.into()],
            has_upper: false,
            has_lower: false,
            has_digit: false,
            has_symbol: false,
            length: 0,
            is_common: false,
        }
    }
}

/// Crack-time projections for three attack speeds, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "camelCase"))]
pub struct CrackTimeEstimate {
    #[cfg_attr(feature = "serde", serde(rename = "online"))]
    pub online_seconds: f64,
    #[cfg_attr(feature = "serde", serde(rename = "offline"))]
    pub offline_seconds: f64,
    #[cfg_attr(feature = "serde", serde(rename = "optimized"))]
    pub optimized_seconds: f64,
}

impl CrackTimeEstimate {
    pub fn online_display(&self) -> String {
        crate::crack_time::format_duration(self.online_seconds)
    }

    pub fn offline_display(&self) -> String {
        crate::crack_time::format_duration(self.offline_seconds)
    }

    pub fn optimized_display(&self) -> String {
        crate::crack_time::format_duration(self.optimized_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_clamps_both_ends() {
        assert_eq!(Score::clamped(-40).value(), 1);
        assert_eq!(Score::clamped(0).value(), 1);
        assert_eq!(Score::clamped(55).value(), 55);
        assert_eq!(Score::clamped(140).value(), 100);
    }

    #[test]
    fn test_tier_thresholds_unflagged() {
        assert_eq!(
            StrengthTier::classify(Score::clamped(95), false, false),
            StrengthTier::Excellent
        );
        assert_eq!(
            StrengthTier::classify(Score::clamped(80), false, false),
            StrengthTier::VeryStrong
        );
        assert_eq!(
            StrengthTier::classify(Score::clamped(70), false, false),
            StrengthTier::Strong
        );
        assert_eq!(
            StrengthTier::classify(Score::clamped(50), false, false),
            StrengthTier::Moderate
        );
        assert_eq!(
            StrengthTier::classify(Score::clamped(30), false, false),
            StrengthTier::Weak
        );
        assert_eq!(
            StrengthTier::classify(Score::clamped(29), false, false),
            StrengthTier::VeryWeak
        );
    }

    #[test]
    fn test_tier_thresholds_shift_when_flagged() {
        // 85 is VeryStrong clean, Strong with patterns, Moderate when also common
        assert_eq!(
            StrengthTier::classify(Score::clamped(85), false, false),
            StrengthTier::VeryStrong
        );
        assert_eq!(
            StrengthTier::classify(Score::clamped(85), true, false),
            StrengthTier::Strong
        );
        assert_eq!(
            StrengthTier::classify(Score::clamped(85), true, true),
            StrengthTier::Moderate
        );
    }

    #[test]
    fn test_confidence_weights() {
        assert_eq!(WordConfidence::No.weight(), 0.0);
        assert_eq!(WordConfidence::Low.weight(), 0.4);
        assert_eq!(WordConfidence::Medium.weight(), 0.7);
        assert_eq!(WordConfidence::Yes.weight(), 1.0);
        assert!(WordConfidence::Yes.is_definite());
        assert!(!WordConfidence::Medium.is_definite());
    }

    #[test]
    fn test_tier_ordering() {
        assert!(StrengthTier::VeryWeak < StrengthTier::Weak);
        assert!(StrengthTier::VeryStrong < StrengthTier::Excellent);
    }
}
