use std::io;

use thiserror::Error;
use tracing::{debug, info};

use crate::playlist::{Playlist, PlaylistItem, PlaylistSummary, Revision};

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("playlist {name:?} not found; available: [{}]", .available.join(", "))]
    PlaylistNotFound {
        name: String,
        available: Vec<String>,
    },
    #[error("no playlist with id {0:?}")]
    UnknownPlaylist(String),
    #[error("stale revision {expected}; the playlist is now at {actual}")]
    StaleRevision {
        expected: Revision,
        actual: Revision,
    },
    #[error("move {from} -> before {to} is out of range for {len} items")]
    OutOfRange { from: usize, to: usize, len: usize },
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("serde error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One page of playlist items.
#[derive(Debug, Clone)]
pub struct Page {
    pub items: Vec<PlaylistItem>,
    pub offset: usize,
    pub total: usize,
}

impl Page {
    /// Offset of the following page, or `None` when this was the last one.
    pub fn next_offset(&self) -> Option<usize> {
        let next = self.offset + self.items.len();
        (!self.items.is_empty() && next < self.total).then_some(next)
    }
}

/// Read access to a music service's playlists.
pub trait PlaylistSource {
    /// Id of the user the source is acting for.
    fn current_user(&self) -> Result<String, RemoteError>;
    fn playlists_for_user(&self, user: &str) -> Result<Vec<PlaylistSummary>, RemoteError>;
    /// Current revision of a playlist, without its items.
    fn revision(&self, playlist_id: &str) -> Result<Revision, RemoteError>;
    fn items_page(
        &self,
        playlist_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Page, RemoteError>;
}

/// The one mutation a playlist supports: move a single item.
pub trait PlaylistMutator {
    /// Move the item at `from` right before the item at `to`, against the
    /// playlist state named by `revision`. Returns the new revision.
    fn relocate(
        &mut self,
        playlist_id: &str,
        revision: &Revision,
        from: usize,
        to: usize,
    ) -> Result<Revision, RemoteError>;
}

/// Find `user`'s playlist called `name`.
pub fn find_playlist<S>(source: &S, user: &str, name: &str) -> Result<PlaylistSummary, RemoteError>
where
    S: PlaylistSource + ?Sized,
{
    debug!(user, name, "searching playlist");
    let playlists = source.playlists_for_user(user)?;
    match playlists.iter().position(|p| p.name == name) {
        Some(i) => Ok(playlists[i].clone()),
        None => Err(RemoteError::PlaylistNotFound {
            name: name.to_string(),
            available: playlists.into_iter().map(|p| p.name).collect(),
        }),
    }
}

/// Page through the items of `summary` and assemble the full playlist.
pub fn fetch_playlist<S>(
    source: &S,
    summary: &PlaylistSummary,
    page_size: usize,
) -> Result<Playlist, RemoteError>
where
    S: PlaylistSource + ?Sized,
{
    info!(id = %summary.id, "loading playlist contents");
    let limit = page_size.max(1);
    let mut items: Vec<PlaylistItem> = Vec::with_capacity(summary.total);

    let mut page = source.items_page(&summary.id, 0, limit)?;
    debug!(count = page.items.len(), "loaded first page");
    loop {
        let next = page.next_offset();
        items.append(&mut page.items);
        let Some(offset) = next else { break };
        page = source.items_page(&summary.id, offset, limit)?;
        debug!(count = page.items.len(), offset, "loaded page");
    }

    info!(count = items.len(), "done loading");
    Ok(Playlist {
        id: summary.id.clone(),
        name: summary.name.clone(),
        owner: summary.owner.clone(),
        revision: summary.revision.clone(),
        items,
    })
}
