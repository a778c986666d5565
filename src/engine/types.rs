//! Engine value types and errors.

use std::fmt;

use thiserror::Error;

/// One element's move: where it sits now and where it must end up.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PermutationEntry {
    /// Index in the current sequence.
    pub origin: usize,
    /// Index in the desired sequence.
    pub destination: usize,
}

impl PermutationEntry {
    pub fn new(origin: usize, destination: usize) -> Self {
        Self {
            origin,
            destination,
        }
    }
}

/// Remove the element at `from` and reinsert it right before the element
/// that sits at `to` when the operation commits. `to == len` appends.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Relocate {
    pub from: usize,
    pub to: usize,
}

impl Relocate {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// Whether replaying this operation leaves the order unchanged.
    ///
    /// Inserting an element before itself, or before its right-hand
    /// neighbour, puts it back where it was.
    pub fn is_noop(&self) -> bool {
        self.from == self.to || self.from + 1 == self.to
    }
}

impl fmt::Display for Relocate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> before {}", self.from, self.to)
    }
}

/// Ordered relocate operations. Only valid against the sequence it was
/// compiled for.
pub type Plan = Vec<Relocate>;

/// How a permutation is turned into relocate operations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PlanStrategy {
    /// Settle destinations left to right, moving each element straight into
    /// its final slot.
    #[default]
    Settle,
    /// Send every element, in desired order, to the back of the list.
    AppendToBack,
}

/// Malformed permutation entries. No plan is produced for them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("destination {destination} is out of range for {len} entries")]
    DestinationOutOfRange { destination: usize, len: usize },
    #[error("origin {origin} is out of range for {len} entries")]
    OriginOutOfRange { origin: usize, len: usize },
    #[error("destination {0} appears more than once")]
    DuplicateDestination(usize),
    #[error("origin {0} appears more than once")]
    DuplicateOrigin(usize),
}

/// A plan that does not fit the sequence it is replayed against.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulateError {
    #[error("step {step} ({op}) is out of range for a list of {len}")]
    OutOfRange {
        step: usize,
        op: Relocate,
        len: usize,
    },
}
