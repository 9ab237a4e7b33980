//! Phase-1 vote ledger and its majority rule.

/// Append-only list of accepted votes, capped at a fixed target.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteLedger {
    votes: Vec<String>,
    target: usize,
}

impl VoteLedger {
    pub fn new(target: usize) -> Self {
        Self {
            votes: Vec::with_capacity(target),
            target,
        }
    }

    /// Append a vote. Returns `false` once the ledger is full.
    pub fn push(&mut self, vote: impl Into<String>) -> bool {
        if self.is_full() {
            return false;
        }
        self.votes.push(vote.into());
        true
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn is_full(&self) -> bool {
        self.votes.len() >= self.target
    }

    pub fn votes(&self) -> &[String] {
        &self.votes
    }

    /// Most common vote. Ties go to the value that was first appended.
    pub fn majority(&self) -> Option<&str> {
        majority(&self.votes)
    }
}

/// Most common element; among equal counts the earliest distinct value wins.
pub fn majority<S: AsRef<str>>(votes: &[S]) -> Option<&str> {
    let mut tally: Vec<(&str, usize)> = Vec::new();
    for vote in votes {
        let vote = vote.as_ref();
        match tally.iter_mut().find(|(value, _)| *value == vote) {
            Some((_, count)) => *count += 1,
            None => tally.push((vote, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (value, count) in tally {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}
