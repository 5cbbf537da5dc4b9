//! Password generator - charset mode and pronounceable mode.

use rand::rngs::OsRng;
use rand::Rng;
use secrecy::SecretString;
use thiserror::Error;

use crate::crack_time::estimate_crack_time;
use crate::evaluator::assess_password;
use crate::types::{CrackTimeEstimate, PasswordAssessment};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Characters that read alike and are stripped by `exclude_similar`.
const SIMILAR: &str = "il1Lo0O";

const CONSONANTS: &[char] = &[
    'b', 'c', 'd', 'f', 'g', 'h', 'j', 'k', 'm', 'n', 'p', 'q', 'r', 's', 't', 'v', 'w', 'x',
    'y', 'z',
];
const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];
const PRONOUNCEABLE_SYMBOLS: &[char] = &['!', '@', '#', '$', '%'];

/// Supported password length range.
pub const MIN_LENGTH: usize = 4;
pub const MAX_LENGTH: usize = 128;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Password length {0} outside supported range 4-128")]
    InvalidLength(usize),
    #[error("No character classes selected, charset is empty")]
    EmptyCharset,
}

/// Configuration for password generation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct GeneratorConfig {
    pub length: usize,
    pub include_uppercase: bool,
    pub include_lowercase: bool,
    pub include_numbers: bool,
    pub include_symbols: bool,
    pub exclude_similar: bool,
    pub pronounceable: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            length: 16,
            include_uppercase: true,
            include_lowercase: true,
            include_numbers: true,
            include_symbols: true,
            exclude_similar: false,
            pronounceable: false,
        }
    }
}

/// A generated password with its self-assessment.
#[derive(Debug, Clone)]
pub struct GeneratedPassword {
    pub password: SecretString,
    pub assessment: PasswordAssessment,
    pub crack_time: CrackTimeEstimate,
}

/// Default cryptographically secure RNG.
fn csprng() -> impl rand::CryptoRng + Rng {
    OsRng
}

/// Generates a password from the configuration.
///
/// # Errors
///
/// Returns [`GeneratorError::InvalidLength`] when `length` is outside
/// `4..=128` and [`GeneratorError::EmptyCharset`] when no character class
/// is selected in charset mode.
pub fn generate(config: &GeneratorConfig) -> Result<SecretString, GeneratorError> {
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&config.length) {
        return Err(GeneratorError::InvalidLength(config.length));
    }

    let rng = &mut csprng();
    let password = if config.pronounceable {
        pronounceable(config, rng)
    } else {
        let charset = build_charset(config);
        if charset.is_empty() {
            return Err(GeneratorError::EmptyCharset);
        }
        (0..config.length)
            .map(|_| charset[rng.gen_range(0..charset.len())])
            .collect()
    };

    Ok(SecretString::new(password.into()))
}

/// Generates a password and assesses it in one call.
pub fn generate_checked(config: &GeneratorConfig) -> Result<GeneratedPassword, GeneratorError> {
    let password = generate(config)?;

    #[cfg(feature = "async")]
    let assessment = assess_password(&password, None);

    #[cfg(not(feature = "async"))]
    let assessment = assess_password(&password);

    let crack_time = estimate_crack_time(&assessment, &password);
    Ok(GeneratedPassword {
        password,
        assessment,
        crack_time,
    })
}

fn build_charset(config: &GeneratorConfig) -> Vec<char> {
    let mut charset = String::new();
    if config.include_uppercase {
        charset.push_str(UPPERCASE);
    }
    if config.include_lowercase {
        charset.push_str(LOWERCASE);
    }
    if config.include_numbers {
        charset.push_str(DIGITS);
    }
    if config.include_symbols {
        charset.push_str(SYMBOLS);
    }

    let mut chars: Vec<char> = charset.chars().collect();
    if config.exclude_similar {
        chars.retain(|c| !SIMILAR.contains(*c));
    }
    chars
}

/// Alternating consonant/vowel scheme, with room reserved for one digit
/// and one symbol when the respective classes are enabled.
fn pronounceable(config: &GeneratorConfig, rng: &mut impl Rng) -> String {
    let mut reserved = 0;
    if config.include_numbers {
        reserved += 1;
    }
    if config.include_symbols {
        reserved += 1;
    }
    let letter_count = config.length - reserved.min(config.length);

    let mut password = String::with_capacity(config.length + 1);
    for _ in 0..config.length.div_ceil(2) {
        password.push(CONSONANTS[rng.gen_range(0..CONSONANTS.len())]);
        password.push(VOWELS[rng.gen_range(0..VOWELS.len())]);
    }
    password.truncate(letter_count);

    if config.include_numbers && password.len() < config.length {
        password.push((b'0' + rng.gen_range(0..10u8)) as char);
    }
    if config.include_symbols && password.len() < config.length {
        password.push(PRONOUNCEABLE_SYMBOLS[rng.gen_range(0..PRONOUNCEABLE_SYMBOLS.len())]);
    }

    password.truncate(config.length);
    password
}
