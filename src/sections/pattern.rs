//! Pattern section - applies the detector's score deltas.

use secrecy::{ExposeSecret, SecretString};

use super::SectionOutcome;
use crate::patterns::detect_patterns;
use crate::types::PatternMatch;

/// Runs the pattern detector and folds every finding into the score.
///
/// Only penalizing findings produce feedback; bonus findings (uncommon
/// word rewards) adjust the score silently.
pub fn pattern_section(password: &SecretString) -> (SectionOutcome, Vec<PatternMatch>) {
    let findings = detect_patterns(password.expose_secret());
    let mut outcome = SectionOutcome::default();
    let mut matches = Vec::with_capacity(findings.len());

    for finding in findings {
        outcome.delta += finding.delta;
        if finding.delta < 0 {
            outcome.issues.push(finding.pattern.description.clone());
        }
        matches.push(finding.pattern);
    }

    (outcome, matches)
}
