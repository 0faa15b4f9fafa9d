//! Diff engine
//!
//! Scores how much a feed visibly changed between two scoreboards. The score
//! approximates what a reader of the rendered page would notice: rank churn
//! plus colour-intensity churn, eased through a smoothstep so that small
//! wobbles stay near zero and large reshuffles saturate at one.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::entities::Scoreboard;

use super::normalize::{normalize, normalize_votes, smoothstep};
use super::refresh_config::{DELTA_CUTOFF, DELTA_MAX, DELTA_MIN};

/// How far a never-seen item is considered to have moved.
///
/// A new item at rank `idx` contributes `max(0, base - idx)` rank steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewItemPenalty {
    /// `base` is the number of items in the previous scoreboard
    #[default]
    PreviousLen,
    /// `base` is a fixed number
    Fixed(usize),
}

impl NewItemPenalty {
    /// The small constant base older deployments used (size of the scoreboard
    /// record rather than of the ranking).
    pub const LEGACY: Self = NewItemPenalty::Fixed(2);

    /// The configured base when it does not track the previous feed size
    pub fn fixed_base(&self) -> Option<usize> {
        match self {
            NewItemPenalty::PreviousLen => None,
            NewItemPenalty::Fixed(base) => Some(*base),
        }
    }

    fn base(&self, prev: &Scoreboard) -> usize {
        match self {
            NewItemPenalty::PreviousLen => prev.len(),
            NewItemPenalty::Fixed(base) => *base,
        }
    }
}

impl fmt::Display for NewItemPenalty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NewItemPenalty::PreviousLen => write!(f, "previous-len"),
            NewItemPenalty::Fixed(base) => write!(f, "fixed({})", base),
        }
    }
}

impl FromStr for NewItemPenalty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "previous-len" | "previous_len" | "" => Ok(NewItemPenalty::PreviousLen),
            "legacy" => Ok(NewItemPenalty::LEGACY),
            other => other
                .parse::<usize>()
                .map(NewItemPenalty::Fixed)
                .map_err(|_| {
                    format!(
                        "unknown new-item penalty '{}', expected previous-len, legacy or a number",
                        other
                    )
                }),
        }
    }
}

/// Every stage of one diff, for logging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaReport {
    /// Raw sum of rank and vote-bucket changes
    pub delta: f64,
    /// `delta` mapped onto `[0, 1]`
    pub delta_norm: f64,
    /// `delta_norm` through the smoothstep; the significance score
    pub delta_smooth: f64,
}

impl DeltaReport {
    pub fn is_significant(&self) -> bool {
        self.delta_smooth > DELTA_CUTOFF
    }
}

/// Compares scoreboards
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffEngine {
    new_item_penalty: NewItemPenalty,
}

impl DiffEngine {
    pub fn new(new_item_penalty: NewItemPenalty) -> Self {
        Self { new_item_penalty }
    }

    pub fn new_item_penalty(&self) -> NewItemPenalty {
        self.new_item_penalty
    }

    /// Score the change from `prev` to `cur`, walking `cur` in rank order.
    pub fn compare(&self, prev: &Scoreboard, cur: &Scoreboard) -> DeltaReport {
        let prev_rank: HashMap<&str, usize> =
            prev.entries().map(|(idx, id, _)| (id, idx)).collect();
        let penalty_base = self.new_item_penalty.base(prev);

        let mut raw: u64 = 0;
        for (idx, id, votes) in cur.entries() {
            let cur_votes_norm = normalize_votes(votes);

            let (didx, dvotes_norm) = match prev_rank.get(id) {
                Some(&prev_idx) => {
                    let prev_votes_norm = normalize_votes(prev.votes()[prev_idx]);
                    (
                        idx.abs_diff(prev_idx),
                        (prev_votes_norm - cur_votes_norm).unsigned_abs(),
                    )
                }
                None => (penalty_base.saturating_sub(idx), cur_votes_norm.unsigned_abs()),
            };

            raw += didx as u64 + dvotes_norm;
        }

        let delta = raw as f64;
        let delta_norm = normalize(DELTA_MIN, DELTA_MAX, delta);
        DeltaReport {
            delta,
            delta_norm,
            delta_smooth: smoothstep(delta_norm),
        }
    }
}

/// Significance of the change from `prev` to `cur`, in `[0, 1]`.
pub fn compute_delta(prev: &Scoreboard, cur: &Scoreboard) -> f64 {
    DiffEngine::default().compare(prev, cur).delta_smooth
}
