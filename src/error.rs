use thiserror::Error;

use crate::engine::{PlanError, SimulateError};
use crate::playlist::CacheError;
use crate::remote::RemoteError;
use crate::runtime::ExecuteError;

/// Everything that can stop a reorder run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("no playlist name provided (use --playlist or set playlist.name)")]
    MissingPlaylistName,
    #[error("no playlist source configured (use --source or set source.path)")]
    MissingSource,
    #[error("plan does not reproduce the interleaved order; refusing to run it")]
    PlanMismatch,
    #[error("invalid reorder input: {0}")]
    Plan(#[from] PlanError),
    #[error("plan does not fit the playlist: {0}")]
    Simulate(#[from] SimulateError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error("{0}; the playlist is partly reordered, refetch before trying again")]
    Execute(#[from] ExecuteError),
    #[error("failed to render settings: {0}")]
    Toml(#[from] toml::ser::Error),
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
