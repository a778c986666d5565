//! Playlist model, labels and the on-disk snapshot cache.

mod cache;
mod display;
mod model;

pub use cache::*;
pub use display::display_from_fields;
pub use model::*;
