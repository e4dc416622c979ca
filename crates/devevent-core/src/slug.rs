// Slug derivation
//
// Used as the fallback identifier when an event is created without an
// explicit slug. Uniqueness is not checked here; the unique index on
// `events.slug` is the final arbiter and a collision surfaces as a
// duplicate-key error at persistence time.

/// Derive a URL-safe, lowercase, hyphen-separated identifier from a title.
///
/// Lowercases, trims, strips everything outside `[a-z0-9\s-]`, collapses
/// whitespace runs to one hyphen, collapses hyphen runs, and trims
/// leading/trailing hyphens. A title with no usable characters yields an
/// empty string, which the event validator then rejects on slug length.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_hyphen = false;
    for ch in lowered.trim().chars() {
        let mapped = match ch {
            'a'..='z' | '0'..='9' => Some(ch),
            c if c.is_whitespace() => None,
            '-' => None,
            _ => continue,
        };
        match mapped {
            Some(c) => {
                if pending_hyphen && !out.is_empty() {
                    out.push('-');
                }
                pending_hyphen = false;
                out.push(c);
            }
            // Whitespace and literal hyphens both separate words; runs
            // collapse into a single hyphen.
            None => pending_hyphen = true,
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns;

    #[test]
    fn derives_hyphenated_lowercase() {
        assert_eq!(slugify("  Hello, World!!  "), "hello-world");
        assert_eq!(slugify("Frontend Developers Meetup"), "frontend-developers-meetup");
        assert_eq!(slugify("UI/UX Design Workshop"), "uiux-design-workshop");
    }

    #[test]
    fn collapses_hyphen_and_whitespace_runs() {
        assert_eq!(slugify("a  -  b"), "a-b");
        assert_eq!(slugify("a---b"), "a-b");
        assert_eq!(slugify("--a--"), "a");
    }

    #[test]
    fn strips_leading_and_trailing_hyphens() {
        assert_eq!(slugify(" - Rust 2026 - "), "rust-2026");
    }

    #[test]
    fn unusable_titles_reduce_to_empty() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("   "), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn output_always_matches_slug_pattern_or_is_empty() {
        for title in [
            "  Hello, World!!  ",
            "Tech Career Fair 2026",
            "AI & Machine Learning Summit",
            "C++ / Rust interop night",
            "émigré café",
        ] {
            let slug = slugify(title);
            if !slug.is_empty() {
                assert!(patterns::SLUG.is_match(&slug), "{title:?} -> {slug:?}");
                assert!(!slug.contains("--"));
                assert!(!slug.starts_with('-') && !slug.ends_with('-'));
            }
        }
    }
}
