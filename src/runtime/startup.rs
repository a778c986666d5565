use tracing::{info, warn};

use crate::config::Settings;
use crate::engine::PlanStrategy;
use crate::error::AppError;
use crate::playlist::{Playlist, PlaylistCache};
use crate::remote::{PlaylistSource, fetch_playlist, find_playlist};

/// Per-run parameters threaded through the pipeline.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// User the source acts for; playlists are looked up among theirs.
    pub user: String,
    pub playlist_name: String,
    pub dry_run: bool,
    pub strategy: PlanStrategy,
    pub verify: bool,
    pub page_size: usize,
}

impl RunContext {
    pub fn new<S>(source: &S, settings: &Settings, dry_run: bool) -> Result<Self, AppError>
    where
        S: PlaylistSource + ?Sized,
    {
        let playlist_name = settings
            .playlist
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .ok_or(AppError::MissingPlaylistName)?;
        let user = source.current_user()?;
        info!(user = %user, "acting as user");

        Ok(Self {
            user,
            playlist_name,
            dry_run,
            strategy: settings.plan.strategy.into(),
            verify: settings.plan.verify,
            page_size: settings.source.page_size,
        })
    }
}

/// Load the playlist named in `ctx`, from the cache when its revision still
/// matches the service, otherwise by paging through the source.
pub fn load_playlist<S>(
    source: &S,
    cache: Option<&PlaylistCache>,
    ctx: &RunContext,
) -> Result<Playlist, AppError>
where
    S: PlaylistSource + ?Sized,
{
    let summary = find_playlist(source, &ctx.user, &ctx.playlist_name)?;

    if let Some(cache) = cache {
        match cache.load(&summary.id) {
            Ok(Some(cached)) => {
                let current = source.revision(&summary.id)?;
                if cached.id == summary.id && cached.revision == current {
                    info!(revision = %current, "loaded playlist from cache");
                    return Ok(cached);
                }
                info!(
                    cached = %cached.revision,
                    current = %current,
                    "cached playlist is stale, refetching"
                );
            }
            Ok(None) => {}
            Err(e) => warn!("ignoring unreadable cache: {e}"),
        }
    }

    let playlist = fetch_playlist(source, &summary, ctx.page_size)?;

    if let Some(cache) = cache {
        if let Err(e) = cache.save(&playlist) {
            warn!("failed to cache playlist: {e}");
        }
    }

    Ok(playlist)
}
