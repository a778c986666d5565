//! A playlist service backed by a JSON library file.
//!
//! Every committed move rewrites the file and bumps the playlist revision,
//! so it behaves like a remote service that chains revision tokens.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::{Relocate, SimulateError};
use crate::playlist::{Playlist, PlaylistSummary, Revision};

use super::source::{Page, PlaylistMutator, PlaylistSource, RemoteError};

/// On-disk layout of the library file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Library {
    pub user: String,
    pub playlists: Vec<Playlist>,
    /// Number of moves committed so far; feeds new revision tokens.
    #[serde(default)]
    pub commits: u64,
}

pub struct FileRemote {
    path: PathBuf,
    library: Library,
}

impl FileRemote {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, RemoteError> {
        let path = path.into();
        let bytes = fs::read(&path)?;
        let library = serde_json::from_slice(&bytes)?;
        debug!(path = %path.display(), "opened library");
        Ok(Self { path, library })
    }

    fn persist(&self) -> Result<(), RemoteError> {
        let data = serde_json::to_vec_pretty(&self.library)?;
        fs::write(&self.path, data)?;
        Ok(())
    }

    fn playlist(&self, id: &str) -> Result<&Playlist, RemoteError> {
        self.library
            .playlists
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| RemoteError::UnknownPlaylist(id.to_string()))
    }
}

#[cfg(test)]
impl FileRemote {
    /// Write `library` to `path` and open it.
    pub fn create(path: impl Into<PathBuf>, library: Library) -> Result<Self, RemoteError> {
        let remote = Self {
            path: path.into(),
            library,
        };
        remote.persist()?;
        Ok(remote)
    }

    pub fn library(&self) -> &Library {
        &self.library
    }
}

impl PlaylistSource for FileRemote {
    fn current_user(&self) -> Result<String, RemoteError> {
        Ok(self.library.user.clone())
    }

    fn playlists_for_user(&self, user: &str) -> Result<Vec<PlaylistSummary>, RemoteError> {
        Ok(self
            .library
            .playlists
            .iter()
            .filter(|p| p.owner == user)
            .map(Playlist::summary)
            .collect())
    }

    fn revision(&self, playlist_id: &str) -> Result<Revision, RemoteError> {
        Ok(self.playlist(playlist_id)?.revision.clone())
    }

    fn items_page(
        &self,
        playlist_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Page, RemoteError> {
        let pl = self.playlist(playlist_id)?;
        let total = pl.items.len();
        let start = offset.min(total);
        let end = start.saturating_add(limit).min(total);
        Ok(Page {
            items: pl.items[start..end].to_vec(),
            offset: start,
            total,
        })
    }
}

impl PlaylistMutator for FileRemote {
    fn relocate(
        &mut self,
        playlist_id: &str,
        revision: &Revision,
        from: usize,
        to: usize,
    ) -> Result<Revision, RemoteError> {
        let next = Revision(format!("rev-{}", self.library.commits + 1));

        let pl = self
            .library
            .playlists
            .iter_mut()
            .find(|p| p.id == playlist_id)
            .ok_or_else(|| RemoteError::UnknownPlaylist(playlist_id.to_string()))?;

        if pl.owner != self.library.user {
            let (name, owner, user) = (&pl.name, &pl.owner, &self.library.user);
            let msg = format!("{user} may not reorder {name:?}, owned by {owner}");
            return Err(RemoteError::Rejected(msg));
        }
        if pl.revision != *revision {
            return Err(RemoteError::StaleRevision {
                expected: revision.clone(),
                actual: pl.revision.clone(),
            });
        }

        Relocate::new(from, to)
            .apply_to(&mut pl.items)
            .map_err(|e| match e {
                SimulateError::OutOfRange { len, .. } => RemoteError::OutOfRange { from, to, len },
            })?;
        pl.revision = next.clone();
        self.library.commits += 1;

        self.persist()?;
        debug!(playlist_id, from, to, revision = %next, "committed move");
        Ok(next)
    }
}
