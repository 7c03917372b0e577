//! Bulk flip generation

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::outcome::{Side, draw_side};
use crate::consts::{MAX_BATCH, MIN_BATCH};

/// Result of one bulk flip run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub sides: Vec<Side>,
    pub heads: usize,
    pub tails: usize,
}

impl BatchResult {
    /// Build from an existing sequence, counting each face
    pub fn from_sides(sides: Vec<Side>) -> Self {
        let heads = sides.iter().filter(|s| **s == Side::Heads).count();
        let tails = sides.len() - heads;
        Self { sides, heads, tails }
    }

    pub fn len(&self) -> usize {
        self.sides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sides.is_empty()
    }

    /// Share of heads in percent (0 for an empty batch)
    pub fn heads_percent(&self) -> f64 {
        percent(self.heads, self.len())
    }

    /// Share of tails in percent (0 for an empty batch)
    pub fn tails_percent(&self) -> f64 {
        percent(self.tails, self.len())
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Clamp a requested batch size into [MIN_BATCH, MAX_BATCH]
pub fn clamp_batch_count(requested: i64) -> usize {
    requested.clamp(MIN_BATCH as i64, MAX_BATCH as i64) as usize
}

/// Batch size from user-typed text.
///
/// Non-numeric input counts as the minimum; fractions truncate toward zero.
pub fn parse_batch_count(input: &str) -> usize {
    let Ok(value) = input.trim().parse::<f64>() else {
        return MIN_BATCH;
    };
    if value.is_nan() {
        return MIN_BATCH;
    }
    // Saturating float-to-int cast handles the infinities
    clamp_batch_count(value.trunc() as i64)
}

/// Generate `count` independent flips (clamped). Never computes rotation.
pub fn flip_batch<R: Rng + ?Sized>(count: i64, rng: &mut R) -> BatchResult {
    let count = clamp_batch_count(count);
    let mut sides = Vec::with_capacity(count);
    let mut heads = 0;
    for _ in 0..count {
        let side = draw_side(rng);
        if side == Side::Heads {
            heads += 1;
        }
        sides.push(side);
    }
    log::info!("Generated batch of {} flips ({} heads)", count, heads);
    BatchResult {
        sides,
        heads,
        tails: count - heads,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_flip_batch_clamps_low() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(flip_batch(0, &mut rng).len(), 1);
        assert_eq!(flip_batch(-25, &mut rng).len(), 1);
    }

    #[test]
    fn test_flip_batch_clamps_high() {
        let mut rng = Pcg32::seed_from_u64(1);
        let batch = flip_batch(50_000, &mut rng);
        assert_eq!(batch.len(), MAX_BATCH);
        assert_eq!(batch.heads + batch.tails, MAX_BATCH);
    }

    #[test]
    fn test_flip_batch_counts_match_sequence() {
        let mut rng = Pcg32::seed_from_u64(99);
        let batch = flip_batch(500, &mut rng);
        assert_eq!(batch, BatchResult::from_sides(batch.sides.clone()));
        let fraction = batch.heads as f64 / 500.0;
        assert!((0.4..=0.6).contains(&fraction));
    }

    #[test]
    fn test_parse_batch_count() {
        assert_eq!(parse_batch_count("25"), 25);
        assert_eq!(parse_batch_count(" 7 "), 7);
        assert_eq!(parse_batch_count("12.9"), 12);
        assert_eq!(parse_batch_count("0"), 1);
        assert_eq!(parse_batch_count("99999999999999999999"), MAX_BATCH);
        assert_eq!(parse_batch_count("lots"), 1);
        assert_eq!(parse_batch_count(""), 1);
        assert_eq!(parse_batch_count("NaN"), 1);
        assert_eq!(parse_batch_count("inf"), MAX_BATCH);
    }

    #[test]
    fn test_percentages() {
        let batch = BatchResult::from_sides(vec![Side::Heads, Side::Tails, Side::Heads, Side::Heads]);
        assert_eq!(batch.heads_percent(), 75.0);
        assert_eq!(batch.tails_percent(), 25.0);
        assert_eq!(BatchResult::default().heads_percent(), 0.0);
    }
}
