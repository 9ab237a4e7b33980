//! Sets of payload strings accepted in each mission phase.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vocabulary(BTreeSet<String>);

impl Vocabulary {
    /// Default navigation commands voted on in phase 1.
    pub fn phase1_default() -> Self {
        ["go left", "go right", "go straight"].into_iter().collect()
    }

    /// Default drop commands accepted in phase 2.
    pub fn phase2_default() -> Self {
        ["drop left", "drop right"].into_iter().collect()
    }

    pub fn contains(&self, payload: &str) -> bool {
        self.0.contains(payload)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let phase1 = Vocabulary::phase1_default();
        assert_eq!(phase1.len(), 3);
        assert!(phase1.contains("go straight"));
        assert!(!phase1.contains("drop left"));

        let phase2 = Vocabulary::phase2_default();
        assert!(phase2.contains("drop right"));
        assert!(!phase2.contains("go left"));
    }

    #[test]
    fn test_exact_match_only() {
        let vocab = Vocabulary::phase1_default();
        assert!(!vocab.contains("Go Left"));
        assert!(!vocab.contains("go left "));
    }
}
