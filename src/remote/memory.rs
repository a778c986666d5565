//! In-memory service for tests, with optional failure injection.

use crate::engine::Relocate;
use crate::playlist::{Playlist, PlaylistSummary, Revision};

use super::source::{Page, PlaylistMutator, PlaylistSource, RemoteError};

pub struct MemoryRemote {
    pub user: String,
    pub playlists: Vec<Playlist>,
    /// Fail the relocate call with this zero-based index.
    pub fail_at: Option<usize>,
    pub relocate_calls: usize,
}

impl MemoryRemote {
    pub fn new(user: &str, playlists: Vec<Playlist>) -> Self {
        Self {
            user: user.to_string(),
            playlists,
            fail_at: None,
            relocate_calls: 0,
        }
    }

    fn find(&self, id: &str) -> Result<&Playlist, RemoteError> {
        self.playlists
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| RemoteError::UnknownPlaylist(id.to_string()))
    }
}

impl PlaylistSource for MemoryRemote {
    fn current_user(&self) -> Result<String, RemoteError> {
        Ok(self.user.clone())
    }

    fn playlists_for_user(&self, user: &str) -> Result<Vec<PlaylistSummary>, RemoteError> {
        Ok(self
            .playlists
            .iter()
            .filter(|p| p.owner == user)
            .map(Playlist::summary)
            .collect())
    }

    fn revision(&self, playlist_id: &str) -> Result<Revision, RemoteError> {
        Ok(self.find(playlist_id)?.revision.clone())
    }

    fn items_page(
        &self,
        playlist_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Page, RemoteError> {
        let pl = self.find(playlist_id)?;
        let start = offset.min(pl.items.len());
        let end = (start + limit).min(pl.items.len());
        Ok(Page {
            items: pl.items[start..end].to_vec(),
            offset: start,
            total: pl.items.len(),
        })
    }
}

impl PlaylistMutator for MemoryRemote {
    fn relocate(
        &mut self,
        playlist_id: &str,
        revision: &Revision,
        from: usize,
        to: usize,
    ) -> Result<Revision, RemoteError> {
        let call = self.relocate_calls;
        self.relocate_calls += 1;
        if self.fail_at == Some(call) {
            let msg = format!("injected failure on call {call}");
            return Err(RemoteError::Rejected(msg));
        }

        let pl = self
            .playlists
            .iter_mut()
            .find(|p| p.id == playlist_id)
            .ok_or_else(|| RemoteError::UnknownPlaylist(playlist_id.to_string()))?;
        if pl.revision != *revision {
            return Err(RemoteError::StaleRevision {
                expected: revision.clone(),
                actual: pl.revision.clone(),
            });
        }
        let len = pl.items.len();
        Relocate::new(from, to)
            .apply_to(&mut pl.items)
            .map_err(|_| RemoteError::OutOfRange { from, to, len })?;
        pl.revision = Revision(format!("mem-{}", call + 1));
        Ok(pl.revision.clone())
    }
}
