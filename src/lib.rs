//! Password strength assessment library
//!
//! This library provides heuristic password strength assessment,
//! crack-time estimation and constrained random password generation.
//!
//! # Features
//!
//! - `async` (default): Enables async assessment with cancellation support
//! - `tracing`: Enables logging via tracing crate
//! - `serde`: Enables serde derives on the public types
//!
//! # Environment Variables
//!
//! - `PWD_AUDIT_COMMON_LIST`: Optional extension file for the built-in
//!   common-password list (default: `./assets/common-passwords.txt`)
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_audit::{assess_many, estimate_crack_time};
//! use secrecy::SecretString;
//!
//! let password = SecretString::new("MyP@ssw0rd!".to_string().into());
//!
//! let assessment = assess_many(std::slice::from_ref(&password))
//!     .pop()
//!     .expect("one assessment");
//! let estimate = estimate_crack_time(&assessment, &password);
//!
//! println!("Score: {}", assessment.score.value());
//! println!("Tier: {}", assessment.tier);
//! println!("Offline crack time: {}", estimate.offline_display());
//! ```

// Internal modules
mod classifier;
mod crack_time;
mod entropy;
mod evaluator;
mod generator;
mod patterns;
mod refdata;
mod sections;
mod types;

// Public API
pub use classifier::{is_common_word, is_likely_common_password};
pub use crack_time::{estimate_crack_time, format_duration};
pub use entropy::entropy_bits;
pub use evaluator::{assess_many, assess_password};
pub use generator::{
    generate, generate_checked, GeneratedPassword, GeneratorConfig, GeneratorError, MAX_LENGTH,
    MIN_LENGTH,
};
pub use refdata::{
    get_common_list_path, init_common_list, init_common_list_from_path, is_common_listed,
    WordlistError,
};
pub use types::{
    CrackTimeEstimate, PasswordAssessment, PatternKind, PatternMatch, Score, StrengthTier,
    WordConfidence,
};

#[cfg(feature = "async")]
pub use evaluator::assess_password_tx;
