// Field patterns shared by the entity validators, compiled once.

use regex::Regex;
use std::sync::LazyLock;

/// URL-safe event identifier: lowercase letters, digits, hyphens.
pub static SLUG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").unwrap());

/// 24-hour clock time, `HH:MM`.
pub static TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-1]?[0-9]|2[0-3]):[0-5][0-9]$").unwrap());

/// Loose email shape: something@something.something, no whitespace.
pub static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_accepts_24h_clock() {
        for ok in ["00:00", "9:30", "09:30", "18:00", "23:59"] {
            assert!(TIME.is_match(ok), "{ok} should match");
        }
        for bad in ["24:00", "18:60", "7pm", "18", "18:0", ""] {
            assert!(!TIME.is_match(bad), "{bad} should not match");
        }
    }

    #[test]
    fn email_rejects_whitespace_and_missing_domain() {
        assert!(EMAIL.is_match("dev@example.com"));
        assert!(!EMAIL.is_match("dev example.com"));
        assert!(!EMAIL.is_match("dev@example"));
        assert!(!EMAIL.is_match("@example.com"));
    }
}
