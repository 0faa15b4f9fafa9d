//! Scoreboard domain entity
//!
//! The part of a feed snapshot that the change detector looks at: the rank
//! order of item ids and their popularity, nothing else.

use std::collections::HashSet;

use crate::error::DomainError;

use super::Post;

/// Ordered ranking of item ids paired with their popularity metric
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    ids: Vec<String>,
    votes: Vec<i64>,
}

impl Scoreboard {
    /// Build a scoreboard from parallel id/vote columns.
    ///
    /// Both columns must have the same length and every id must appear once.
    pub fn try_new(ids: Vec<String>, votes: Vec<i64>) -> Result<Self, DomainError> {
        if ids.len() != votes.len() {
            return Err(DomainError::InvariantViolation(format!(
                "scoreboard has {} ids but {} votes",
                ids.len(),
                votes.len()
            )));
        }

        let repeated = {
            let mut seen = HashSet::with_capacity(ids.len());
            ids.iter().find(|id| !seen.insert(id.as_str())).cloned()
        };
        if let Some(dup) = repeated {
            return Err(DomainError::InvariantViolation(format!(
                "scoreboard lists id '{}' more than once",
                dup
            )));
        }

        Ok(Self { ids, votes })
    }

    /// The scoreboard of nothing; the reference before the first commit.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Extract the scoreboard of a ranked post list, keeping its order.
    pub fn try_from_posts(posts: &[Post]) -> Result<Self, DomainError> {
        let (ids, votes) = posts.iter().map(|p| (p.id.clone(), p.ups)).unzip();
        Self::try_new(ids, votes)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn votes(&self) -> &[i64] {
        &self.votes
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate `(rank, id, votes)` in rank order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &str, i64)> + '_ {
        self.ids
            .iter()
            .zip(self.votes.iter())
            .enumerate()
            .map(|(idx, (id, votes))| (idx, id.as_str(), *votes))
    }
}
