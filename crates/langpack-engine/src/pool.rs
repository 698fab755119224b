//! Candidate pools — multiple strings behind one key, picked by policy.

use rand::{Rng, RngCore};

/// How a pool picks its next candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoolPolicy {
    /// Uniform pick on every roll; no cursor state.
    Random,
    /// Walk forward through the candidates, wrapping at the end.
    #[default]
    Sequential,
    /// Walk backward through the candidates, wrapping at the start.
    SequentialReversed,
}

impl PoolPolicy {
    /// Parse a policy name, case-insensitively. Unknown names yield `None`;
    /// callers substitute [`PoolPolicy::Sequential`] and warn.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_uppercase().as_str() {
            "RANDOM" => Some(PoolPolicy::Random),
            "SEQUENTIAL" => Some(PoolPolicy::Sequential),
            "SEQUENTIAL_REVERSED" => Some(PoolPolicy::SequentialReversed),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PoolPolicy::Random => "RANDOM",
            PoolPolicy::Sequential => "SEQUENTIAL",
            PoolPolicy::SequentialReversed => "SEQUENTIAL_REVERSED",
        }
    }
}

/// An ordered collection of candidate strings for one key.
///
/// Rolling reads the next candidate per the policy and, for the sequential
/// policies, advances the cursor. Randomness comes from the caller, so
/// rolls are deterministic under a seeded rng.
#[derive(Debug)]
pub struct StringPool {
    candidates: Vec<String>,
    policy: PoolPolicy,
    cursor: usize,
}

impl StringPool {
    pub fn new(policy: PoolPolicy) -> Self {
        Self {
            candidates: Vec::new(),
            policy,
            cursor: 0,
        }
    }

    /// Pick the next candidate. An empty pool yields `None`, never an error.
    pub fn roll(&mut self, rng: &mut dyn RngCore) -> Option<&str> {
        if self.candidates.is_empty() {
            return None;
        }
        let picked = match self.policy {
            PoolPolicy::Random => rng.gen_range(0..self.candidates.len()),
            PoolPolicy::Sequential => {
                let picked = self.cursor;
                self.cursor = if self.cursor == self.candidates.len() - 1 {
                    0
                } else {
                    self.cursor + 1
                };
                picked
            }
            PoolPolicy::SequentialReversed => {
                let picked = self.cursor;
                self.cursor = if self.cursor == 0 {
                    self.candidates.len() - 1
                } else {
                    self.cursor - 1
                };
                picked
            }
        };
        self.candidates.get(picked).map(String::as_str)
    }

    /// Append a candidate. The cursor resets to the policy's starting
    /// position — rotation begins over after any mutation.
    pub fn add(&mut self, candidate: impl Into<String>) {
        self.candidates.push(candidate.into());
        self.cursor = match self.policy {
            PoolPolicy::SequentialReversed => self.candidates.len() - 1,
            _ => 0,
        };
    }

    pub fn clear(&mut self) {
        self.candidates.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn policy(&self) -> PoolPolicy {
        self.policy
    }
}
