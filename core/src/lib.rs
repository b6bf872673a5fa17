//! Aviator Core - crash-curve round engine
//!
//! This crate holds everything behind the Aviator game view: the round state
//! machine, the curve and aeroplane geometry, the renderer that turns a round
//! into draw commands, and the side panels (bet slip, stake controls, account
//! service).
//!
//! # Architecture
//!
//! - [`RoundEngine`] - `Idle -> Playing -> Crashed -> Playing` state machine
//! - [`CrashSource`] - Where crash targets come from (fixed cycle or seeded)
//! - [`TimerQueue`] - Cancellable one-shot timers on the host clock
//! - [`render()`] - Pure `RoundState -> Vec<DrawCommand>` renderer
//! - [`Runtime`] - Host frame loop tying engine, renderer and [`Surface`]

pub mod auth;
pub mod bet_slip;
pub mod config;
pub mod crash;
pub mod curve;
#[cfg(test)]
mod integration;
pub mod render;
pub mod round;
pub mod runtime;
pub mod surface;
#[cfg(test)]
pub mod test_utils;
pub mod timer;
pub mod wager;

pub use auth::{AuthConfig, AuthError, AuthOutcome, AuthRoute, AuthService, FormError, RegistrationForm};
pub use bet_slip::{BetId, BetReceipt, BetSelection, BetSlip, SlipChange, SlipError, SlipTotals};
pub use config::{Config, ConfigError};
pub use crash::{CrashMode, CrashSource, FixedSequence, SeededCrashSource};
pub use curve::{CurveGeometry, CurveParams, multiplier_at};
pub use render::{DrawCommand, RenderConfig, render};
pub use round::{CrashReport, EngineConfig, RoundEngine, RoundState, RoundStatus, TickOutcome};
pub use runtime::{FrameReport, Runtime, RuntimeConfig};
pub use surface::{HeadlessSurface, Surface, SurfaceSize};
pub use timer::{TimerHandle, TimerQueue};
pub use wager::{StakeInput, Wallet, WagerError};
