//! Random credential strings for teacher and student portal accounts.

use crate::config::DEFAULT_PASSWORD_LENGTH;
use crate::utils::random::random_string_from;

const LETTERS_AND_DIGITS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const WITH_SYMBOLS: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%";

/// Smallest length that can hold one lowercase, one uppercase and one digit.
pub const MIN_PASSWORD_LENGTH: usize = 3;

#[derive(Debug, Clone, Copy)]
pub struct PasswordGenerator {
    length: usize,
    symbols: bool,
}

impl Default for PasswordGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_PASSWORD_LENGTH)
    }
}

impl PasswordGenerator {
    /// Lengths below [`MIN_PASSWORD_LENGTH`] are raised to it.
    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(MIN_PASSWORD_LENGTH),
            symbols: false,
        }
    }

    /// Also draw from `!@#$%`.
    pub fn with_symbols(mut self) -> Self {
        self.symbols = true;
        self
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Regenerates until the composition rule holds.
    pub fn generate(&self) -> String {
        let alphabet = if self.symbols {
            WITH_SYMBOLS
        } else {
            LETTERS_AND_DIGITS
        };

        loop {
            let candidate = random_string_from(alphabet, self.length);
            if meets_composition_rules(&candidate) {
                return candidate;
            }
        }
    }
}

/// Shorthand for a default-length password without symbols.
pub fn generate_password() -> String {
    PasswordGenerator::default().generate()
}

pub fn meets_composition_rules(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_password_is_twelve_chars() {
        let password = generate_password();
        assert_eq!(password.len(), 12);
        assert!(meets_composition_rules(&password));
    }

    #[test]
    fn every_length_meets_composition() {
        for length in 3..=24 {
            for _ in 0..20 {
                let password = PasswordGenerator::new(length).generate();
                assert_eq!(password.len(), length);
                assert!(meets_composition_rules(&password), "{password}");
            }
        }
    }

    #[test]
    fn short_lengths_are_raised() {
        for length in 0..MIN_PASSWORD_LENGTH {
            let password = PasswordGenerator::new(length).generate();
            assert_eq!(password.len(), MIN_PASSWORD_LENGTH);
            assert!(meets_composition_rules(&password));
        }
    }

    #[test]
    fn plain_passwords_are_alphanumeric() {
        let password = PasswordGenerator::new(64).generate();
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn symbols_stay_in_allowed_set() {
        let password = PasswordGenerator::new(200).with_symbols().generate();
        assert!(
            password
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "!@#$%".contains(c))
        );
        assert!(meets_composition_rules(&password));
    }

    #[test]
    fn composition_rule_rejects_missing_classes() {
        assert!(!meets_composition_rules("abcdef"));
        assert!(!meets_composition_rules("ABC123"));
        assert!(!meets_composition_rules("abcDEF"));
        assert!(meets_composition_rules("aB3"));
    }
}
