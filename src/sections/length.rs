//! Length section - length bonus and consistency bonus.

use secrecy::{ExposeSecret, SecretString};

use super::SectionOutcome;

const MIN_COMFORTABLE_LENGTH: usize = 6;

/// Scores password length.
///
/// Banded length bonus plus a flat consistency bonus of one point per
/// character up to 10, so longer passwords never score below shorter
/// variants with identical patterns.
pub fn length_section(password: &SecretString) -> SectionOutcome {
    let length = password.expose_secret().chars().count();
    let mut outcome = SectionOutcome::default();

    if length >= 16 {
        outcome.delta += 30;
    } else if length >= 12 {
        outcome.delta += 25;
    } else if length >= 8 {
        outcome.delta += 15;
    } else if length >= MIN_COMFORTABLE_LENGTH {
        outcome.delta += 10;
    } else {
        outcome.delta += 5;
        outcome.issues.push("Password is too short".to_string());
    }

    outcome.delta += length.min(10) as i64;
    outcome
}
