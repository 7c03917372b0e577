//! Outcome engine
//!
//! Pure functions only: every draw takes the caller's RNG, every result is
//! returned rather than stored. Single flips carry a rotation target for the
//! coin animation; batch flips never animate and never touch rotation.

pub mod batch;
pub mod outcome;

pub use batch::{BatchResult, clamp_batch_count, flip_batch, parse_batch_count};
pub use outcome::{Side, draw_side, flip_once, settle_rotation};
