//! Character variety section - diversity base score, symbol placement and
//! missing character type feedback.

use secrecy::{ExposeSecret, SecretString};

use super::SectionOutcome;

/// Scores character diversity.
///
/// Base score is 10 points per character class present. A lone symbol at
/// either edge of a short password is penalized, as is a sparse symbol
/// count in a long one. Missing classes produce feedback without a score
/// effect.
pub fn character_variety_section(password: &SecretString) -> SectionOutcome {
    let pwd = password.expose_secret();
    let chars: Vec<char> = pwd.chars().collect();
    let length = chars.len();

    let has_upper = pwd.chars().any(|c| c.is_uppercase());
    let has_lower = pwd.chars().any(|c| c.is_lowercase());
    let has_digit = pwd.chars().any(|c| c.is_ascii_digit());
    let has_special = pwd.chars().any(|c| !c.is_alphanumeric());
    let variety_count = [has_upper, has_lower, has_digit, has_special]
        .iter()
        .filter(|&&b| b)
        .count();

    let mut outcome = SectionOutcome {
        delta: (variety_count * 10) as i64,
        issues: Vec::new(),
    };

    let symbol_count = chars.iter().filter(|c| !c.is_alphanumeric()).count();
    if symbol_count == 1 && length < 16 && outcome.delta < 80 {
        let first_is_symbol = chars.first().is_some_and(|c| !c.is_alphanumeric());
        let last_is_symbol = chars.last().is_some_and(|c| !c.is_alphanumeric());
        if first_is_symbol || last_is_symbol {
            let penalty = ((10.0 - length as f64 / 4.0).round() as i64).max(3);
            outcome.delta -= penalty;
            outcome
                .issues
                .push("Distribute symbols through the password instead of the edges".to_string());
        }
    }
    if length > 20 && (symbol_count as f64) < length as f64 * 0.05 {
        outcome.delta -= 2;
        outcome
            .issues
            .push("Symbols are sparse for a password of this length".to_string());
    }

    let missing: Vec<_> = vec![
        if !has_upper { Some("uppercase") } else { None },
        if !has_lower { Some("lowercase") } else { None },
        if !has_digit { Some("numbers") } else { None },
        if !has_special { Some("special characters") } else { None },
    ]
    .into_iter()
    .flatten()
    .collect();

    if !missing.is_empty() {
        outcome.issues.push(format!("Missing: {}", missing.join(", ")));
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variety_base_scales_with_classes() {
        let one = character_variety_section(&SecretString::new("wkrmpdzu".to_string().into()));
        let two = character_variety_section(&SecretString::new("Wkrmpdzu".to_string().into()));
        let three = character_variety_section(&SecretString::new("Wkrmpdz7".to_string().into()));
        let four = character_variety_section(&SecretString::new("Wkrmp#z7".to_string().into()));
        assert_eq!(one.delta, 10);
        assert_eq!(two.delta, 20);
        assert_eq!(three.delta, 30);
        assert_eq!(four.delta, 40);
    }

    #[test]
    fn test_lone_edge_symbol_penalized() {
        let pwd = SecretString::new("Wkrmpdz7!".to_string().into());
        let outcome = character_variety_section(&pwd);
        // Base 40, minus max(3, round(10 - 9/4)) = 8
        assert_eq!(outcome.delta, 32);
        assert!(outcome.issues.iter().any(|i| i.contains("Distribute symbols")));
    }

    #[test]
    fn test_interior_symbol_not_penalized() {
        let pwd = SecretString::new("Wkrm#pdz7".to_string().into());
        let outcome = character_variety_section(&pwd);
        assert_eq!(outcome.delta, 40);
    }

    #[test]
    fn test_sparse_symbols_in_long_password() {
        let pwd = SecretString::new("Wkrmpdzuqblxcvfnghtse49200".to_string().into());
        let outcome = character_variety_section(&pwd);
        // Three classes, no symbols in 26 characters
        assert_eq!(outcome.delta, 28);
        assert!(outcome.issues.iter().any(|i| i.contains("sparse")));
    }

    #[test]
    fn test_missing_classes_flagged_without_score_effect() {
        let pwd = SecretString::new("wkrmpdzu".to_string().into());
        let outcome = character_variety_section(&pwd);
        assert_eq!(outcome.delta, 10);
        let missing = outcome.issues.iter().find(|i| i.starts_with("Missing:")).unwrap();
        assert!(missing.contains("uppercase"));
        assert!(missing.contains("numbers"));
        assert!(missing.contains("special characters"));
        assert!(!missing.contains("lowercase"));
    }
}
