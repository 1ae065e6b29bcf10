//! Outcome label canonicalization.
//!
//! Bookmakers do not always agree on outcome labels ("Draw" vs "Tie"). Two
//! labels for the same outcome would otherwise become two table entries and
//! understate the implied probability sum, so configured aliases are mapped
//! onto one canonical label before best prices are merged. With no aliases
//! configured, labels are matched by exact string equality.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Maps outcome label aliases onto canonical labels.
#[derive(Debug, Clone, Default)]
pub struct OutcomeCanonicalizer {
    /// Lowercased, trimmed alias -> canonical label.
    aliases: HashMap<String, String>,
}

impl OutcomeCanonicalizer {
    /// Creates a canonicalizer that matches labels exactly.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a canonicalizer from an alias -> canonical map.
    #[must_use]
    pub fn from_aliases(aliases: &BTreeMap<String, String>) -> Self {
        let mut canonicalizer = Self::new();
        for (alias, canonical) in aliases {
            canonicalizer.add_alias(alias, canonical);
        }
        canonicalizer
    }

    /// Adds an alias. Matching is case-insensitive on the alias side.
    pub fn add_alias(&mut self, alias: &str, canonical: &str) {
        debug!(alias, canonical, "Registered outcome alias");
        self.aliases
            .insert(Self::key(alias), canonical.to_string());
    }

    /// Builder form of [`Self::add_alias`].
    #[must_use]
    pub fn with_alias(mut self, alias: &str, canonical: &str) -> Self {
        self.add_alias(alias, canonical);
        self
    }

    /// Returns true when no aliases are configured.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Returns the canonical label for `name`, borrowing when unchanged.
    #[must_use]
    pub fn canonicalize<'a>(&'a self, name: &'a str) -> Cow<'a, str> {
        if self.aliases.is_empty() {
            return Cow::Borrowed(name);
        }
        match self.aliases.get(&Self::key(name)) {
            Some(canonical) => Cow::Borrowed(canonical.as_str()),
            None => Cow::Borrowed(name),
        }
    }

    fn key(label: &str) -> String {
        label.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_by_default() {
        let canonicalizer = OutcomeCanonicalizer::new();
        assert!(canonicalizer.is_identity());
        assert_eq!(canonicalizer.canonicalize("Draw"), "Draw");
        assert_eq!(canonicalizer.canonicalize("draw"), "draw");
    }

    #[test]
    fn test_alias_is_case_insensitive() {
        let canonicalizer = OutcomeCanonicalizer::new().with_alias("Tie", "Draw");
        assert_eq!(canonicalizer.canonicalize("Tie"), "Draw");
        assert_eq!(canonicalizer.canonicalize("TIE"), "Draw");
        assert_eq!(canonicalizer.canonicalize(" tie "), "Draw");
        assert_eq!(canonicalizer.canonicalize("Team X"), "Team X");
    }

    #[test]
    fn test_from_aliases_map() {
        let mut aliases = BTreeMap::new();
        aliases.insert("Man Utd".to_string(), "Manchester United".to_string());
        aliases.insert("X".to_string(), "Draw".to_string());

        let canonicalizer = OutcomeCanonicalizer::from_aliases(&aliases);
        assert!(!canonicalizer.is_identity());
        assert_eq!(canonicalizer.canonicalize("man utd"), "Manchester United");
        assert_eq!(canonicalizer.canonicalize("x"), "Draw");
    }
}
