use thiserror::Error;
use tracing::info;

use crate::engine::Relocate;
use crate::playlist::Revision;
use crate::remote::{PlaylistMutator, RemoteError};

/// A live run that stopped part way. Steps before `step` are committed, so
/// the remote playlist matches neither the old nor the new order.
#[derive(Debug, Error)]
#[error("failed to reorder at step {step}/{total}: {source}")]
pub struct ExecuteError {
    pub step: usize,
    pub total: usize,
    pub source: RemoteError,
}

/// Submit `plan` one move at a time, each against the revision the previous
/// move returned. Returns the final revision.
pub fn execute<M>(
    mutator: &mut M,
    playlist_id: &str,
    revision: Revision,
    plan: &[Relocate],
) -> Result<Revision, ExecuteError>
where
    M: PlaylistMutator + ?Sized,
{
    let total = plan.len();
    let mut revision = revision;

    for (i, op) in plan.iter().enumerate() {
        info!("reorder {}/{}: {}", i + 1, total, op);
        revision = mutator
            .relocate(playlist_id, &revision, op.from, op.to)
            .map_err(|source| ExecuteError {
                step: i + 1,
                total,
                source,
            })?;
    }

    Ok(revision)
}
