//! Reordering engine.
//!
//! Turns a playlist's current order into a fair round-robin order across
//! contributors and compiles that permutation into single-item relocate
//! operations that can be replayed, one at a time, against a list whose
//! positions shift after every committed move.
//!
//! - `schedule` computes the desired permutation.
//! - `plan` compiles it into relocate operations.
//! - `simulate` replays operations in memory (preview and oracle).

mod plan;
mod schedule;
mod simulate;
mod types;

pub use plan::*;
pub use schedule::*;
pub use simulate::*;
pub use types::*;
