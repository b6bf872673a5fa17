//! Multi-selection bet slip
//!
//! One selection per match: picking a match that is already on the slip
//! removes it. Odds multiply into an accumulator.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::curve::round2;

/// Unique id of a selection within a slip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BetId(u64);

impl fmt::Display for BetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bet-{}", self.0)
    }
}

/// A selection on the slip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BetSelection {
    pub id: BetId,
    pub match_label: String,
    pub odds: f64,
}

/// What `add_or_toggle` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlipChange {
    Added(BetId),
    /// The match was already selected; its entry was removed.
    Removed(BetId),
}

/// Total odds and potential payout, both rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlipTotals {
    pub total_odds: f64,
    pub payout: f64,
}

/// A placed accumulator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BetReceipt {
    pub selections: Vec<BetSelection>,
    pub total_odds: f64,
    pub stake: f64,
    pub payout: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SlipError {
    #[error("odds must be a positive number, got {0}")]
    InvalidOdds(f64),
    #[error("Please select at least one bet to place.")]
    Empty,
    #[error("stake must be a positive number")]
    InvalidStake,
}

/// Ordered set of selections for the current session view.
#[derive(Debug, Clone, Default)]
pub struct BetSlip {
    entries: Vec<BetSelection>,
    next_id: u64,
}

impl BetSlip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a selection, or remove the existing one for the same match.
    pub fn add_or_toggle(&mut self, match_label: impl Into<String>, odds: f64) -> Result<SlipChange, SlipError> {
        let match_label = match_label.into();
        if let Some(idx) = self.entries.iter().position(|e| e.match_label == match_label) {
            let removed = self.entries.remove(idx);
            return Ok(SlipChange::Removed(removed.id));
        }

        if !(odds.is_finite() && odds > 0.0) {
            return Err(SlipError::InvalidOdds(odds));
        }

        self.next_id += 1;
        let id = BetId(self.next_id);
        self.entries.push(BetSelection {
            id,
            match_label,
            odds,
        });
        Ok(SlipChange::Added(id))
    }

    /// Remove a selection by id. Unknown ids are ignored.
    pub fn remove(&mut self, id: BetId) -> Option<BetSelection> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(idx))
    }

    pub fn selections(&self) -> &[BetSelection] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Product of all odds, rounded to cents; 1.00 when empty.
    pub fn total_odds(&self) -> f64 {
        round2(self.entries.iter().map(|e| e.odds).product())
    }

    /// Totals for `stake`.
    ///
    /// Payout is 0.00 when the slip is empty or the stake is not a positive
    /// number.
    pub fn compute_totals(&self, stake: f64) -> SlipTotals {
        let total_odds = self.total_odds();
        let payout = if self.is_empty() || !is_valid_stake(stake) {
            0.0
        } else {
            round2(total_odds * stake)
        };
        SlipTotals { total_odds, payout }
    }

    /// Place the accumulator and clear the slip.
    pub fn place(&mut self, stake: f64) -> Result<BetReceipt, SlipError> {
        if self.is_empty() {
            return Err(SlipError::Empty);
        }
        if !is_valid_stake(stake) {
            return Err(SlipError::InvalidStake);
        }

        let totals = self.compute_totals(stake);
        let receipt = BetReceipt {
            selections: std::mem::take(&mut self.entries),
            total_odds: totals.total_odds,
            stake,
            payout: totals.payout,
        };
        info!(
            selections = receipt.selections.len(),
            total_odds = receipt.total_odds,
            stake,
            payout = receipt.payout,
            "Bet placed"
        );
        Ok(receipt)
    }
}

fn is_valid_stake(stake: f64) -> bool {
    stake.is_finite() && stake > 0.0
}
