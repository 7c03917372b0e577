//! Cosmic Coin Flip - a browser coin toss with stats and bulk generation
//!
//! Core modules:
//! - `engine`: Outcome draws, rotation continuity, batch generation
//! - `stats`: Running counts and streak tracking
//! - `session`: Single controller owning all flip state
//! - `export`: Text/CSV rendering of batch results
//! - `interpret`: Optional AI interpretation capability
//! - `coins`: Selectable coin designs
//! - `settings`: Persisted user preferences

pub mod coins;
pub mod engine;
pub mod export;
pub mod interpret;
pub mod session;
pub mod settings;
pub mod stats;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use coins::{COINS, CoinDefinition};
pub use engine::{BatchResult, Side, flip_batch, flip_once, parse_batch_count};
pub use export::{BatchLabels, ExportFormat};
pub use interpret::{InterpretError, Interpreter, OfflineInterpreter, interpret_or_fallback};
pub use session::{FlipEvent, FlipRecord, FlipSession};
pub use settings::Settings;
pub use stats::Statistics;

/// Flip configuration constants
pub mod consts {
    /// Degrees in a full turn
    pub const FULL_TURN: f64 = 360.0;

    /// Residue (degrees) at which the heads face points at the viewer
    pub const HEADS_RESIDUE: f64 = 0.0;
    /// Residue (degrees) at which the tails face points at the viewer
    pub const TAILS_RESIDUE: f64 = 180.0;

    /// Whole extra turns added to every single flip (inclusive range)
    pub const MIN_SPINS: u32 = 10;
    pub const MAX_SPINS: u32 = 19;

    /// Batch size bounds
    pub const MIN_BATCH: usize = 1;
    pub const MAX_BATCH: usize = 10_000;
    /// Batch size the page starts with
    pub const DEFAULT_BATCH: usize = 10;

    /// Animation length the page waits before settling a flip (ms)
    pub const SETTLE_DELAY_MS: u32 = 2500;

    /// A streak longer than this gets a banner
    pub const HOT_STREAK: u32 = 2;
}

/// Angle reduced to [0, 360)
#[inline]
pub fn residue(angle: f64) -> f64 {
    angle.rem_euclid(consts::FULL_TURN)
}

/// Wall-clock time in milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Wall-clock time in milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_residue_wraps_into_turn() {
        assert_eq!(residue(0.0), 0.0);
        assert_eq!(residue(540.0), 180.0);
        assert_eq!(residue(3600.0), 0.0);
        assert_eq!(residue(-90.0), 270.0);
    }
}
