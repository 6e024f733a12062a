//! Entity name normalisation before evidence matching.
//!
//! Candidate lists spell miRNAs `hsa-mir-21`, while some evidence sources
//! key them as `hsa-miR-21`. One substring rewrite bridges the two; which
//! spelling a table is matched with is decided by its [`KeyCasing`].

use novapair_common::KeyCasing;

/// Maps a raw candidate id to its normalised spelling.
pub trait NameNormaliser {
    fn normalise(&self, raw: &str) -> String;
}

impl<F> NameNormaliser for F
where
    F: Fn(&str) -> String,
{
    fn normalise(&self, raw: &str) -> String {
        self(raw)
    }
}

/// Replaces every occurrence of one substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstringNormaliser {
    from: String,
    to: String,
}

impl SubstringNormaliser {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl Default for SubstringNormaliser {
    /// `mir` → `miR`
    fn default() -> Self {
        Self::new("mir", "miR")
    }
}

impl NameNormaliser for SubstringNormaliser {
    fn normalise(&self, raw: &str) -> String {
        // an empty pattern would splice `to` between every character
        if self.from.is_empty() {
            return raw.to_string();
        }
        raw.replace(&self.from, &self.to)
    }
}

/// The spelling of a candidate id that a table with `casing` is keyed by.
pub fn keyed_id<'a>(raw: &'a str, normalised: &'a str, casing: KeyCasing) -> &'a str {
    match casing {
        KeyCasing::Normalised => normalised,
        KeyCasing::Raw => raw,
    }
}
