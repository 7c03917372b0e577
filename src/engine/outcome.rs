//! Single flip outcome and rotation continuity

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::residue;

/// Which face the coin settled on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Heads,
    Tails,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Heads => "HEADS",
            Side::Tails => "TAILS",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "heads" | "h" => Some(Side::Heads),
            "tails" | "t" => Some(Side::Tails),
            _ => None,
        }
    }

    /// Residue (degrees) the coin must rest at to show this face
    pub fn target_residue(&self) -> f64 {
        match self {
            Side::Heads => HEADS_RESIDUE,
            Side::Tails => TAILS_RESIDUE,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fair draw between the two faces
#[inline]
pub fn draw_side<R: Rng + ?Sized>(rng: &mut R) -> Side {
    if rng.random_bool(0.5) {
        Side::Heads
    } else {
        Side::Tails
    }
}

/// Final rotation for a toss of `spins` whole turns that lands on `side`.
///
/// Only ever moves forward: the correction onto the target face is always in
/// [0, 360), so the result is never below `previous + spins * 360`.
pub fn settle_rotation(previous: f64, spins: u32, side: Side) -> f64 {
    let base = previous + f64::from(spins) * FULL_TURN;
    let mut adjustment = side.target_residue() - residue(base);
    if adjustment < 0.0 {
        adjustment += FULL_TURN;
    }
    base + adjustment
}

/// Flip once, returning the drawn side and the new cumulative rotation
pub fn flip_once<R: Rng + ?Sized>(previous_rotation: f64, rng: &mut R) -> (Side, f64) {
    let side = draw_side(rng);
    let spins = rng.random_range(MIN_SPINS..=MAX_SPINS);
    let rotation = settle_rotation(previous_rotation, spins, side);
    log::debug!("Flip: {side} after {spins} spins, rotation {previous_rotation} -> {rotation}");
    (side, rotation)
}
