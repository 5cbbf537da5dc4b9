//! Common password section - penalty for passwords attackers already know.

use secrecy::{ExposeSecret, SecretString};

use super::SectionOutcome;
use crate::classifier::is_likely_common_password;

const COMMON_PASSWORD_PENALTY: i64 = 40;

/// Checks the password against the common-password heuristics.
///
/// Returns the outcome and whether the password was judged common.
pub fn common_password_section(password: &SecretString) -> (SectionOutcome, bool) {
    if is_likely_common_password(password.expose_secret()) {
        let outcome = SectionOutcome {
            delta: -COMMON_PASSWORD_PENALTY,
            issues: vec!["Password matches a known common password".to_string()],
        };
        (outcome, true)
    } else {
        (SectionOutcome::default(), false)
    }
}
