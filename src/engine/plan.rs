//! Compile a permutation into relocate operations.
//!
//! The external list only supports moving one element at a time, and every
//! committed move shifts the positions of the elements it jumps over. The
//! planner therefore keeps, for every destination that has not been settled
//! yet, the position its element occupies *right now* and updates those
//! positions after each emitted operation.

use super::types::{PermutationEntry, Plan, PlanError, PlanStrategy, Relocate};

/// Current origins indexed by destination, after checking that `entries`
/// form a permutation of `0..entries.len()`.
fn origins_by_destination(entries: &[PermutationEntry]) -> Result<Vec<usize>, PlanError> {
    let len = entries.len();
    let mut origins: Vec<Option<usize>> = vec![None; len];
    let mut seen_origin = vec![false; len];

    for e in entries {
        if e.destination >= len {
            return Err(PlanError::DestinationOutOfRange {
                destination: e.destination,
                len,
            });
        }
        if e.origin >= len {
            return Err(PlanError::OriginOutOfRange {
                origin: e.origin,
                len,
            });
        }
        if origins[e.destination].is_some() {
            return Err(PlanError::DuplicateDestination(e.destination));
        }
        if seen_origin[e.origin] {
            return Err(PlanError::DuplicateOrigin(e.origin));
        }
        seen_origin[e.origin] = true;
        origins[e.destination] = Some(e.origin);
    }

    // `len` distinct in-range destinations fill every slot.
    Ok(origins.into_iter().flatten().collect())
}

/// Settle destinations left to right and return one operation per entry,
/// no-ops included, in the order they must be executed.
pub fn settle(entries: &[PermutationEntry]) -> Result<Plan, PlanError> {
    let mut origins = origins_by_destination(entries)?;
    Ok((0..origins.len())
        .map(|to| settle_at(&mut origins, to))
        .collect())
}

/// Emit the operation that puts the element for destination `to` in place
/// and shift the origins of the destinations after it.
///
/// With a valid permutation every unsettled origin is at least `to`, so only
/// the upward branch is taken while settling; the downward one keeps the
/// bookkeeping total for any origin array.
pub(super) fn settle_at(origins: &mut [usize], to: usize) -> Relocate {
    let from = origins[to];

    if from > to {
        // Moving up pushes [to, from) one slot to the right.
        for o in origins[to + 1..].iter_mut() {
            if *o >= to && *o < from {
                *o += 1;
            }
        }
        Relocate::new(from, to)
    } else if from < to {
        // Moving down pulls (from, to] one slot to the left. The element
        // has to land at `to`, so it is inserted before what sits at
        // `to + 1` now.
        for o in origins[to + 1..].iter_mut() {
            if *o > from && *o <= to {
                *o -= 1;
            }
        }
        Relocate::new(from, to + 1)
    } else {
        Relocate::new(from, to)
    }
}

/// Drop operations that would not change the order.
///
/// Must run after planning: the bookkeeping in [`settle`] needs every entry.
pub fn elide_noops(ops: Plan) -> Plan {
    ops.into_iter().filter(|op| !op.is_noop()).collect()
}

/// Compile `entries` with the default settle strategy.
pub fn compile(entries: &[PermutationEntry]) -> Result<Plan, PlanError> {
    settle(entries).map(elide_noops)
}

/// Compile `entries` by sending each element, in desired order, to the back
/// of the list. Uses more operations than [`compile`] but every operation
/// has the same shape.
pub fn compile_append(entries: &[PermutationEntry]) -> Result<Plan, PlanError> {
    let mut origins = origins_by_destination(entries)?;
    let len = origins.len();
    let mut ops = Vec::with_capacity(len);

    for d in 0..len {
        let from = origins[d];
        // Everything still waiting behind `from` moves up by one.
        for o in origins[d + 1..].iter_mut() {
            if *o > from {
                *o -= 1;
            }
        }
        ops.push(Relocate::new(from, len));
    }

    Ok(elide_noops(ops))
}

/// Compile `entries` with the given strategy.
pub fn compile_with(
    strategy: PlanStrategy,
    entries: &[PermutationEntry],
) -> Result<Plan, PlanError> {
    match strategy {
        PlanStrategy::Settle => compile(entries),
        PlanStrategy::AppendToBack => compile_append(entries),
    }
}
