//! Running flip statistics
//!
//! A left fold over settled outcomes. `apply` is pure: callers keep the
//! authoritative copy and replace it with the returned value.

use serde::{Deserialize, Serialize};

use crate::consts::HOT_STREAK;
use crate::engine::Side;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub heads: u32,
    pub tails: u32,
    pub total: u32,
    /// Consecutive most-recent flips sharing `streak_side`
    pub current_streak: u32,
    pub streak_side: Option<Side>,
}

impl Statistics {
    /// Zero state: no flips, no streak
    pub fn reset() -> Self {
        Self::default()
    }

    /// Fold a whole sequence of outcomes from the zero state
    pub fn from_sides<I: IntoIterator<Item = Side>>(sides: I) -> Self {
        sides.into_iter().fold(Self::reset(), Self::apply)
    }

    /// State after one more settled flip
    pub fn apply(self, side: Side) -> Self {
        let current_streak = if self.streak_side == Some(side) {
            self.current_streak + 1
        } else {
            1
        };
        Self {
            heads: self.heads + u32::from(side == Side::Heads),
            tails: self.tails + u32::from(side == Side::Tails),
            total: self.total + 1,
            current_streak,
            streak_side: Some(side),
        }
    }

    pub fn heads_percent(&self) -> f64 {
        self.percent(self.heads)
    }

    pub fn tails_percent(&self) -> f64 {
        self.percent(self.tails)
    }

    fn percent(&self, count: u32) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(count) / f64::from(self.total) * 100.0
        }
    }

    /// Whether the streak is long enough to call out
    pub fn is_hot_streak(&self) -> bool {
        self.current_streak > HOT_STREAK
    }
}
