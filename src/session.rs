//! Flip session controller
//!
//! Owns every piece of mutable state the page shows: rotation, in-flight
//! flag, statistics, history, selected coin and the last batch. All changes
//! go through the transition methods below, one flip at a time.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::coins::{self, CoinDefinition};
use crate::engine::{BatchResult, Side, flip_batch, flip_once};
use crate::export::{BatchLabels, ExportFormat};
use crate::stats::Statistics;

/// One settled flip in the history log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlipRecord {
    pub id: u64,
    pub side: Side,
    /// Unix timestamp (ms) when the flip settled
    pub timestamp: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<String>,
}

/// Notifications for the audio/feedback surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipEvent {
    /// Coin left the thumb
    Started,
    /// Coin landed on this side
    Settled(Side),
}

/// Flip drawn but not yet settled
#[derive(Debug, Clone)]
struct PendingFlip {
    side: Side,
    question: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FlipSession<R = Pcg32> {
    rng: R,
    /// Cumulative coin rotation in degrees (animation target)
    rotation: f64,
    /// Face shown once the coin has settled
    shown_side: Side,
    pending: Option<PendingFlip>,
    stats: Statistics,
    /// Most recent first
    history: Vec<FlipRecord>,
    coin: &'static CoinDefinition,
    batch: BatchResult,
    events: Vec<FlipEvent>,
    next_id: u64,
}

impl FlipSession<Pcg32> {
    /// New session with a seeded PCG stream
    pub fn new(seed: u64) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> FlipSession<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            rotation: 0.0,
            shown_side: Side::Heads,
            pending: None,
            stats: Statistics::reset(),
            history: Vec::new(),
            coin: coins::default_coin(),
            batch: BatchResult::default(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Side shown on the settled coin (the previous result while flipping)
    pub fn shown_side(&self) -> Side {
        self.shown_side
    }

    pub fn is_flipping(&self) -> bool {
        self.pending.is_some()
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    pub fn history(&self) -> &[FlipRecord] {
        &self.history
    }

    pub fn latest(&self) -> Option<&FlipRecord> {
        self.history.first()
    }

    pub fn coin(&self) -> &'static CoinDefinition {
        self.coin
    }

    pub fn batch(&self) -> &BatchResult {
        &self.batch
    }

    /// Start a flip. Returns the drawn side and new rotation target, or
    /// `None` if a flip is already in flight.
    pub fn begin_flip(&mut self, question: Option<&str>) -> Option<(Side, f64)> {
        if self.is_flipping() {
            log::debug!("Flip ignored: previous flip still in flight");
            return None;
        }

        let (side, rotation) = flip_once(self.rotation, &mut self.rng);
        self.rotation = rotation;
        self.pending = Some(PendingFlip {
            side,
            question: question
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(str::to_string),
        });
        self.events.push(FlipEvent::Started);
        Some((side, rotation))
    }

    /// Finish the in-flight flip: update stats and prepend a history record.
    /// Returns a copy of the new record, or `None` if nothing was in flight.
    pub fn settle(&mut self, now_ms: f64) -> Option<FlipRecord> {
        let PendingFlip { side, question } = self.pending.take()?;

        self.shown_side = side;
        self.stats = self.stats.apply(side);

        let record = FlipRecord {
            id: self.next_id,
            side,
            timestamp: now_ms,
            question,
            interpretation: None,
        };
        self.next_id += 1;
        self.history.insert(0, record.clone());
        self.events.push(FlipEvent::Settled(side));

        log::debug!(
            "Settled flip #{}: {} (streak {})",
            record.id,
            side,
            self.stats.current_streak
        );
        Some(record)
    }

    /// Attach an interpretation to a record that does not have one yet
    pub fn attach_interpretation(&mut self, id: u64, text: impl Into<String>) -> bool {
        match self.history.iter_mut().find(|r| r.id == id) {
            Some(record) if record.interpretation.is_none() => {
                record.interpretation = Some(text.into());
                true
            }
            _ => false,
        }
    }

    /// Clear stats and history and put the coin back at rest on heads.
    /// An in-flight flip is not cancelled; it still settles, so the rotation
    /// rests on the face it is about to land on instead.
    pub fn reset(&mut self) {
        self.stats = Statistics::reset();
        self.history.clear();
        self.rotation = match &self.pending {
            Some(pending) => pending.side.target_residue(),
            None => 0.0,
        };
        self.shown_side = Side::Heads;
        log::info!("Session stats reset");
    }

    /// Switch coin design. Refused while flipping or for unknown ids.
    pub fn select_coin(&mut self, id: &str) -> bool {
        if self.is_flipping() {
            return false;
        }
        match coins::find(id) {
            Some(coin) => {
                self.coin = coin;
                true
            }
            None => {
                log::warn!("Unknown coin id: {}", id);
                false
            }
        }
    }

    /// Restore a stored coin id, falling back to the default design.
    /// Returns the coin actually in use.
    pub fn restore_coin(&mut self, id: &str) -> &'static CoinDefinition {
        self.coin = coins::find_or_default(id);
        if self.coin.id != id {
            log::warn!("Stored coin {:?} unknown, using {}", id, self.coin.id);
        }
        self.coin
    }

    /// Replace the current batch with `count` fresh flips (clamped)
    pub fn run_batch(&mut self, count: i64) -> &BatchResult {
        self.batch = flip_batch(count, &mut self.rng);
        &self.batch
    }

    pub fn export_batch(&self, format: ExportFormat, labels: &BatchLabels) -> String {
        format.render(&self.batch.sides, labels)
    }

    /// Share message for the latest flip
    pub fn share_text(&self, page_url: &str) -> Option<String> {
        self.latest().map(|flip| {
            format!(
                "I just used the Cosmic Coin Flip and got {}! Flip a coin yourself here: {}",
                flip.side, page_url
            )
        })
    }

    /// Take queued notifications (oldest first)
    pub fn drain_events(&mut self) -> Vec<FlipEvent> {
        std::mem::take(&mut self.events)
    }
}
