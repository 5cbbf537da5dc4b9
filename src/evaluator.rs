//! Password assessment - main evaluation pipeline.

use secrecy::{ExposeSecret, SecretString};

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::entropy::entropy_bits;
use crate::sections::{
    character_variety_section, common_password_section, length_section, pattern_section,
};
use crate::types::{PasswordAssessment, Score, StrengthTier};

/// Entropy cap reported for very weak patterned passwords, in bits.
const ADJUSTED_ENTROPY_CAP: f64 = 40.0;

/// Assesses password strength and returns a detailed assessment.
///
/// Pure function of its input and the reference data store; identical
/// input always yields an identical assessment. An empty password returns
/// the degenerate minimum assessment rather than an error.
///
/// # Arguments
/// * `password` - The password to assess
/// * `token` - Optional cancellation token (async feature only)
pub fn assess_password(
    password: &SecretString,
    #[cfg(feature = "async")] token: Option<CancellationToken>,
) -> PasswordAssessment {
    let pwd = password.expose_secret();
    if pwd.is_empty() {
        return PasswordAssessment::degenerate("Password is empty");
    }

    let length = pwd.chars().count();
    let has_upper = pwd.chars().any(|c| c.is_uppercase());
    let has_lower = pwd.chars().any(|c| c.is_lowercase());
    let has_digit = pwd.chars().any(|c| c.is_ascii_digit());
    let has_symbol = pwd.chars().any(|c| !c.is_alphanumeric());
    let entropy = entropy_bits(pwd);

    let mut score: i64 = 0;
    let mut issues: Vec<String> = Vec::new();

    #[cfg(feature = "async")]
    if token.as_ref().is_some_and(|t| t.is_cancelled()) {
        return PasswordAssessment::degenerate("Assessment cancelled");
    }

    let outcome = character_variety_section(password);
    score += outcome.delta;
    issues.extend(outcome.issues);

    let outcome = length_section(password);
    score += outcome.delta;
    issues.extend(outcome.issues);

    score += if entropy > 90.0 {
        20
    } else if entropy > 70.0 {
        15
    } else if entropy > 50.0 {
        10
    } else if entropy > 30.0 {
        5
    } else {
        0
    };

    #[cfg(feature = "async")]
    if token.as_ref().is_some_and(|t| t.is_cancelled()) {
        return PasswordAssessment::degenerate("Assessment cancelled");
    }

    let (outcome, is_common) = common_password_section(password);
    score += outcome.delta;
    issues.extend(outcome.issues);

    #[cfg(feature = "async")]
    if token.as_ref().is_some_and(|t| t.is_cancelled()) {
        return PasswordAssessment::degenerate("Assessment cancelled");
    }

    let (outcome, patterns) = pattern_section(password);
    score += outcome.delta;
    issues.extend(outcome.issues);

    let mut score = Score::clamped(score);

    // A fully diverse, long, clean password never scores below 65
    if has_upper
        && has_lower
        && has_digit
        && has_symbol
        && length >= 12
        && patterns.is_empty()
        && !is_common
    {
        score = score.max(Score::clamped(65));
    }

    let tier = StrengthTier::classify(score, !patterns.is_empty(), is_common);

    let adjusted_entropy = if !patterns.is_empty() && score.value() < 25 {
        entropy.min(ADJUSTED_ENTROPY_CAP)
    } else {
        entropy
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
        "password assessed: score {}, {} patterns, common: {}",
        score.value(),
        patterns.len(),
        is_common
    );

    PasswordAssessment {
        score,
        tier,
        entropy_bits: entropy,
        adjusted_entropy_bits: adjusted_entropy,
        patterns,
        issues,
        has_upper,
        has_lower,
        has_digit,
        has_symbol,
        length,
        is_common,
    }
}

/// Assesses a list of passwords in order through the same pipeline.
pub fn assess_many(passwords: &[SecretString]) -> Vec<PasswordAssessment> {
    passwords
        .iter()
        .map(|password| {
            #[cfg(feature = "async")]
            let assessment = assess_password(password, None);

            #[cfg(not(feature = "async"))]
            let assessment = assess_password(password);

            assessment
        })
        .collect()
}

/// Async version that sends the assessment via channel.
#[cfg(feature = "async")]
pub async fn assess_password_tx(
    password: &SecretString,
    token: CancellationToken,
    tx: mpsc::Sender<PasswordAssessment>,
) {
    use std::time::Duration;

    #[cfg(feature = "tracing")]
    tracing::info!("assessment is about to start...");

    tokio::time::sleep(Duration::from_millis(300)).await;
    let assessment = assess_password(password, Some(token));

    if let Err(e) = tx.send(assessment).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password assessment result: {}", e);
        #[cfg(not(feature = "tracing"))]
        let _ = e;
    }
}


#[cfg(all(test, feature = "async"))]
mod async_tests {
    use super::*;

    #[tokio::test]
    async fn test_assess_with_cancellation() {
        let token = CancellationToken::new();
        token.cancel();

        let pwd = SecretString::new("SomePassword123!".to_string().into());
        let assessment = assess_password(&pwd, Some(token));

        assert_eq!(assessment.score.value(), 1);
        assert!(assessment
            .issues
            .iter()
            .any(|i| i.contains("cancelled")));
    }

    #[tokio::test]
    async fn test_assess_without_cancellation() {
        let token = CancellationToken::new();

        let pwd = SecretString::new("TestPass123!".to_string().into());
        let assessment = assess_password(&pwd, Some(token));

        assert!(assessment.length > 0);
        assert!(!assessment.issues.iter().any(|i| i.contains("cancelled")));
    }

    #[tokio::test]
    async fn test_assess_password_tx() {
        let (tx, mut rx) = mpsc::channel(1);
        let token = CancellationToken::new();

        let pwd = SecretString::new("TestPass123!".to_string().into());

        assess_password_tx(&pwd, token, tx).await;

        let assessment = rx.recv().await.expect("Should receive assessment");
        assert!(assessment.length > 0);
    }
}
