// src/view/heading_slugs.rs
//! Anchor slugs for headings.
//!
//! One [`HeadingSlugger`] lives for one render run and is handed to every
//! heading. Slugs only need to be unique within the run, not stable across
//! runs.

use crate::constants::HEADING_SLUG_MAX_LEN;
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct HeadingSlugger {
    seen: HashSet<String>,
}

impl HeadingSlugger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slug for `text` not handed out before in this run.
    ///
    /// The first use of a base slug gets it bare; later ones get `_0`,
    /// `_1`, ... appended.
    pub fn slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        if self.seen.insert(base.clone()) {
            return base;
        }

        let mut n = 0usize;
        loop {
            let candidate = format!("{}_{}", base, n);
            if self.seen.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Lowercase, every run of non-alphanumerics turned into one `-`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut in_gap = false;
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() {
            slug.push(c);
            in_gap = false;
        } else if !in_gap {
            slug.push('-');
            in_gap = true;
        }
    }
    slug.chars().take(HEADING_SLUG_MAX_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_headings_get_suffixes() {
        let mut slugger = HeadingSlugger::new();
        assert_eq!(slugger.slug("Setup"), "setup");
        assert_eq!(slugger.slug("Setup"), "setup_0");
        assert_eq!(slugger.slug("Setup"), "setup_1");
        assert_eq!(slugger.slug("Usage"), "usage");
    }

    #[test]
    fn separators_collapse() {
        assert_eq!(slugify("Hello,  World & Friends"), "hello-world-friends");
        assert_eq!(slugify("a".repeat(80).as_str()).len(), HEADING_SLUG_MAX_LEN);
    }

    #[test]
    fn a_suffixed_slug_does_not_collide_with_a_literal_one() {
        let mut slugger = HeadingSlugger::new();
        assert_eq!(slugger.slug("setup_0"), "setup-0");
        assert_eq!(slugger.slug("Setup"), "setup");
        assert_eq!(slugger.slug("Setup"), "setup_0");
    }
}
