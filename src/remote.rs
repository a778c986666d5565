//! Collaborators that own the real playlist.
//!
//! The reorder only needs two things from a music service: a way to read a
//! playlist page by page, and a single-item move that hands back the new
//! revision token. Both are traits so the runtime can drive a file-backed
//! library today and a network service later.

mod file;
#[cfg(test)]
mod memory;
mod source;

pub use file::*;
#[cfg(test)]
pub use memory::*;
pub use source::*;
