//! Aviator stake controls and the simulated wallet.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use aviator_shared::constants::CURRENCY;

/// Smallest stake the controls allow.
pub const MIN_STAKE: f64 = 10.0;

/// Increment applied by the plus/minus buttons.
pub const STAKE_STEP: f64 = 10.0;

/// Preset stakes offered next to the input.
pub const QUICK_AMOUNTS: [f64; 4] = [100.0, 200.0, 500.0, 1000.0];

/// Balance every new wallet starts with.
pub const STARTING_BALANCE: f64 = 500.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WagerError {
    #[error("Please enter a valid bet amount.")]
    InvalidAmount,
    #[error("Insufficient funds: attempted {attempted:.2} KES, balance {balance:.2} KES")]
    InsufficientFunds { attempted: f64, balance: f64 },
}

/// The stake field of a betting block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StakeInput {
    amount: f64,
}

impl Default for StakeInput {
    fn default() -> Self {
        Self { amount: MIN_STAKE }
    }
}

impl StakeInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn increment(&mut self) {
        self.amount += STAKE_STEP;
    }

    /// Step down, never below the minimum.
    pub fn decrement(&mut self) {
        self.amount = (self.amount - STAKE_STEP).max(MIN_STAKE);
    }

    /// Jump to a preset amount. Non-finite values are ignored.
    pub fn set_quick(&mut self, amount: f64) {
        if amount.is_finite() {
            self.amount = amount;
        }
    }

    /// Free-text entry. Unparseable or too-small values snap to the minimum.
    pub fn set_text(&mut self, raw: &str) {
        self.amount = match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v >= MIN_STAKE => v,
            _ => MIN_STAKE,
        };
    }

    /// Text for the place-bet button.
    pub fn button_label(&self) -> String {
        format!("Bet {:.2} {CURRENCY}", self.amount)
    }
}

/// Client-side balance. Nothing here is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    balance: f64,
}

impl Default for Wallet {
    fn default() -> Self {
        Self::with_balance(STARTING_BALANCE)
    }
}

impl Wallet {
    pub fn with_balance(balance: f64) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn balance_label(&self) -> String {
        format!("{:.2}", self.balance)
    }

    /// Deduct `amount`. The balance is left untouched on error.
    pub fn place(&mut self, amount: f64) -> Result<f64, WagerError> {
        if !(amount.is_finite() && amount > 0.0) {
            return Err(WagerError::InvalidAmount);
        }
        if amount > self.balance {
            warn!(attempted = amount, balance = self.balance, "Insufficient funds");
            return Err(WagerError::InsufficientFunds {
                attempted: amount,
                balance: self.balance,
            });
        }
        self.balance -= amount;
        info!(amount, balance = self.balance, "Stake placed");
        Ok(self.balance)
    }
}
