//! Password scoring sections
//!
//! Each section scores a specific aspect of password strength and reports
//! feedback for the issues it finds.

mod common;
mod length;
mod pattern;
mod variety;

pub use common::common_password_section;
pub use length::length_section;
pub use pattern::pattern_section;
pub use variety::character_variety_section;

/// Outcome of a scoring section: a signed score adjustment plus the
/// feedback entries the section produced.
#[derive(Debug, Default, PartialEq)]
pub struct SectionOutcome {
    pub delta: i64,
    pub issues: Vec<String>,
}
