//! Reference data store.
//!
//! Static word categories, common-password list, keyboard and sequential
//! pattern tables, and prefix/suffix fragments. Built once, never mutated
//! after load, safe to share across concurrent assessments.
//!
//! The built-in common-password list can be extended once per process from
//! an external newline-delimited file, see [`init_common_list`].

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use thiserror::Error;

static EXTRA_COMMON_PASSWORDS: RwLock<Option<HashSet<String>>> = RwLock::new(None);

#[derive(Error, Debug)]
pub enum WordlistError {
    #[error("Word list file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read word list file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Word list file is empty")]
    EmptyFile,
}

/// Categorized dictionary words commonly reused inside passwords.
pub(crate) static WORD_CATEGORIES: Lazy<HashMap<&'static str, HashSet<&'static str>>> =
    Lazy::new(|| {
        let mut categories = HashMap::new();
        categories.insert(
            "names",
            collect(&[
                "michael", "jennifer", "thomas", "jessica", "daniel", "ashley", "matthew",
                "amanda", "joshua", "sarah", "david", "james", "robert", "maria", "anna",
                "kevin", "laura", "brian", "emma", "oliver", "jack", "hannah", "andrew",
                "nicole", "michelle",
            ]),
        );
        categories.insert(
            "animals",
            collect(&[
                "monkey", "dragon", "tiger", "eagle", "panther", "dolphin", "horse", "falcon",
                "wolf", "shark", "lion", "bear", "cobra", "raven", "panda", "rabbit", "turtle",
                "spider", "scorpion", "phoenix",
            ]),
        );
        categories.insert(
            "sports",
            collect(&[
                "football", "baseball", "soccer", "hockey", "tennis", "boxing", "rugby",
                "cricket", "racing", "karate", "yankees", "lakers", "arsenal", "chelsea",
                "liverpool", "cowboys", "steelers", "dodgers", "jordan", "ferrari",
            ]),
        );
        categories.insert(
            "colors",
            collect(&[
                "red", "blue", "green", "yellow", "purple", "orange", "silver", "golden",
                "black", "white", "pink", "violet", "crimson", "scarlet",
            ]),
        );
        categories.insert(
            "seasons",
            collect(&[
                "summer", "winter", "spring", "autumn", "january", "february", "march",
                "april", "june", "july", "august", "september", "october", "november",
                "december", "monday", "friday", "sunday",
            ]),
        );
        categories.insert(
            "tech",
            collect(&[
                "computer", "internet", "windows", "google", "apple", "samsung", "android",
                "iphone", "gaming", "laptop", "server", "network", "system", "digital",
                "mobile", "online", "pokemon", "starwars", "batman", "superman",
            ]),
        );
        categories
    });

/// Built-in most-common password list.
pub(crate) static COMMON_PASSWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    collect(&[
        "123456", "password", "123456789", "12345678", "12345", "1234567", "qwerty",
        "abc123", "football", "monkey", "letmein", "111111", "mustang", "access",
        "shadow", "master", "michael", "superman", "696969", "123123", "batman",
        "trustno1", "dragon", "baseball", "iloveyou", "sunshine", "princess", "welcome",
        "admin", "login", "starwars", "whatever", "qazwsx", "654321", "jordan",
        "harley", "password1", "password123", "robert", "matthew", "daniel", "andrew",
        "hunter", "buster", "soccer", "hockey", "killer", "george", "charlie",
        "thomas", "jessica", "pepper", "joshua", "1111", "zaq12wsx", "ginger",
        "summer", "ashley", "nicole", "chelsea", "biteme", "freedom", "secret",
        "jordan23", "michelle", "flower", "passw0rd", "hello", "cheese", "amanda",
        "qwertyuiop", "1q2w3e4r", "pokemon", "iloveu", "000000", "asdfgh", "zxcvbn",
        "dallas", "austin", "thunder", "taylor", "matrix", "abcdef",
    ])
});

/// Common standalone password words outside the categorized dictionaries.
pub(crate) static OTHER_COMMON_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    collect(&[
        "letmein", "iloveyou", "trustno1", "whatever", "sunshine", "princess",
        "shadow", "master", "hunter", "killer", "mustang", "harley", "banana",
        "chocolate", "freedom", "diamond", "flower", "ginger", "pepper", "cheese",
        "ninja", "money", "love", "sex", "god",
    ])
});

/// Keyboard-adjacency substrings, mixed lengths.
pub(crate) const KEYBOARD_PATTERNS: &[&str] = &[
    "qwertyuiop",
    "asdfghjkl",
    "zxcvbnm",
    "1qaz2wsx",
    "1q2w3e4r",
    "qwerty",
    "asdfgh",
    "zxcvbn",
    "qazwsx",
    "123qwe",
    "azerty",
    "qwertz",
    "poiuy",
    "lkjhg",
    "mnbvc",
    "asdf",
    "zxcv",
    "1qaz",
    "2wsx",
    "wasd",
    "qwe",
    "asd",
    "zxc",
];

/// Base sequential runs. Searched longest-window-first, so earlier entries
/// only establish category order, not match priority.
pub(crate) const SEQUENTIAL_PATTERNS: &[&str] = &[
    "0123456789",
    "abcdefghijklmnopqrstuvwxyz",
    "9876543210",
    "zyxwvutsrqponmlkjihgfedcba",
];

/// Fragments that frequently start real-world passwords.
pub(crate) const COMMON_PREFIXES: &[&str] = &[
    "pass", "admin", "user", "login", "welcome", "root", "super", "test", "guest",
    "master", "secret", "letme", "ilove", "qwerty", "abc",
];

/// Fragments that frequently end real-world passwords.
pub(crate) const COMMON_SUFFIXES: &[&str] = &[
    "123456", "12345", "1234", "123", "12", "1", "01", "007", "69", "420", "666",
    "777", "2023", "2024", "2025", "00", "11", "22", "99", "88", "xyz", "abc", "!",
];

/// Fixed high-risk words for the word+number formula.
pub(crate) const HIGH_RISK_WORDS: &[&str] = &[
    "password", "admin", "user", "login", "welcome", "manager", "secure", "security",
    "test", "server", "database", "account",
];

fn collect(words: &[&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

/// Returns the category name of a dictionary word, if any.
pub(crate) fn dictionary_category(word: &str) -> Option<&'static str> {
    WORD_CATEGORIES
        .iter()
        .find(|(_, words)| words.contains(word))
        .map(|(category, _)| *category)
}

/// Returns the common-list extension file path.
///
/// Priority:
/// 1. Environment variable `PWD_AUDIT_COMMON_LIST`
/// 2. Default path `./assets/common-passwords.txt`
pub fn get_common_list_path() -> PathBuf {
    std::env::var("PWD_AUDIT_COMMON_LIST")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./assets/common-passwords.txt"))
}

/// Extends the built-in common-password list from an external file.
///
/// Optional: the built-in list is always active, with or without this call.
/// Idempotent: the extension is loaded at most once per process.
///
/// # Errors
///
/// Returns error if the file does not exist, cannot be read, or is empty.
pub fn init_common_list() -> Result<usize, WordlistError> {
    let path = get_common_list_path();
    init_common_list_from_path(&path)
}

/// Extends the built-in common-password list from a specific file path.
///
/// Use this when the path is known directly instead of relying on the
/// `PWD_AUDIT_COMMON_LIST` environment variable.
///
/// # Errors
///
/// Returns error if the file does not exist, cannot be read, or is empty.
pub fn init_common_list_from_path<P: AsRef<std::path::Path>>(
    path: P,
) -> Result<usize, WordlistError> {
    {
        let guard = EXTRA_COMMON_PASSWORDS.read().unwrap();
        if let Some(extra) = guard.as_ref() {
            return Ok(extra.len());
        }
    }

    let path = path.as_ref();

    if !path.exists() {
        #[cfg(feature = "tracing")]
        tracing::error!("Common list initialization FAILED: FileNotFound {:?}", path);
        return Err(WordlistError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;

    if content.trim().is_empty() {
        #[cfg(feature = "tracing")]
        tracing::error!("Common list initialization FAILED: Empty file {:?}", path);
        return Err(WordlistError::EmptyFile);
    }

    let set: HashSet<String> = content
        .lines()
        .map(|l| l.trim().to_lowercase())
        .filter(|l| !l.is_empty())
        .collect();

    let count = set.len();
    {
        let mut guard = EXTRA_COMMON_PASSWORDS.write().unwrap();
        *guard = Some(set);
    }

    #[cfg(feature = "tracing")]
    tracing::info!("Common list extended: {} passwords from {:?}", count, path);

    Ok(count)
}

/// Checks if a password is on the common list (case-insensitive).
///
/// Covers the built-in list plus the file extension, if loaded.
pub fn is_common_listed(password: &str) -> bool {
    let lower = password.to_lowercase();
    if COMMON_PASSWORDS.contains(lower.as_str()) {
        return true;
    }
    let guard = EXTRA_COMMON_PASSWORDS.read().unwrap();
    guard
        .as_ref()
        .map(|extra| extra.contains(&lower))
        .unwrap_or(false)
}

/// Resets the common-list extension for testing purposes.
#[cfg(test)]
pub(crate) fn reset_common_list_for_testing() {
    let mut guard = EXTRA_COMMON_PASSWORDS.write().unwrap();
    *guard = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper to safely set env var in tests
    fn set_env(key: &str, value: &str) {
        // SAFETY: This is only for testing purposes in single-threaded test context
        unsafe {
            std::env::set_var(key, value);
        }
    }

    /// Helper to safely remove env var in tests
    fn remove_env(key: &str) {
        // SAFETY: This is only for testing purposes in single-threaded test context
        unsafe {
            std::env::remove_var(key);
        }
    }

    fn setup_with_tempfile(passwords: &[&str]) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        for pwd in passwords {
            writeln!(temp_file, "{}", pwd).expect("Failed to write");
        }
        temp_file
    }

    #[test]
    #[serial]
    fn test_get_common_list_path_default() {
        remove_env("PWD_AUDIT_COMMON_LIST");

        let path = get_common_list_path();
        assert_eq!(path, PathBuf::from("./assets/common-passwords.txt"));
    }

    #[test]
    #[serial]
    fn test_get_common_list_path_from_env() {
        let custom_path = "/custom/path/common.txt";
        set_env("PWD_AUDIT_COMMON_LIST", custom_path);

        let path = get_common_list_path();
        assert_eq!(path, PathBuf::from(custom_path));

        remove_env("PWD_AUDIT_COMMON_LIST");
    }

    #[test]
    #[serial]
    fn test_init_common_list_file_not_found() {
        reset_common_list_for_testing();
        set_env("PWD_AUDIT_COMMON_LIST", "/nonexistent/path/common.txt");

        let result = init_common_list();
        assert!(matches!(result, Err(WordlistError::FileNotFound(_))));

        remove_env("PWD_AUDIT_COMMON_LIST");
    }

    #[test]
    #[serial]
    fn test_init_common_list_empty_file() {
        reset_common_list_for_testing();
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        write!(temp_file, "").expect("Failed to write empty content");

        let path = temp_file.path().to_str().unwrap();
        set_env("PWD_AUDIT_COMMON_LIST", path);

        let result = init_common_list();
        assert!(matches!(result, Err(WordlistError::EmptyFile)));

        remove_env("PWD_AUDIT_COMMON_LIST");
    }

    #[test]
    #[serial]
    fn test_init_common_list_success_and_idempotent() {
        reset_common_list_for_testing();
        let temp_file = setup_with_tempfile(&["hunter2", "correcthorse"]);

        let count = init_common_list_from_path(temp_file.path()).unwrap();
        assert_eq!(count, 2);
        assert!(is_common_listed("hunter2"));
        assert!(is_common_listed("CORRECTHORSE"));

        // Second init is a no-op and keeps the loaded extension
        let other = setup_with_tempfile(&["onlyonce"]);
        let count = init_common_list_from_path(other.path()).unwrap();
        assert_eq!(count, 2);
        assert!(!is_common_listed("onlyonce"));

        reset_common_list_for_testing();
    }

    #[test]
    #[serial]
    fn test_builtin_list_always_active() {
        reset_common_list_for_testing();
        assert!(is_common_listed("password"));
        assert!(is_common_listed("QWERTY"));
        assert!(!is_common_listed("Xk9#mQ2!vL7$"));
    }

    #[test]
    fn test_dictionary_category_lookup() {
        assert_eq!(dictionary_category("monkey"), Some("animals"));
        assert_eq!(dictionary_category("summer"), Some("seasons"));
        assert_eq!(dictionary_category("blorptext"), None);
    }

    #[test]
    fn test_tables_are_lowercase() {
        for (_, words) in WORD_CATEGORIES.iter() {
            for word in words {
                assert_eq!(*word, word.to_lowercase());
            }
        }
        for pwd in COMMON_PASSWORDS.iter() {
            assert_eq!(*pwd, pwd.to_lowercase());
        }
    }
}
