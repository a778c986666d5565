use std::io::Write;

use clap::Parser;
use tracing::{debug, info, warn};

use crate::config::{PreviewSettings, Settings};
use crate::engine::{self, Plan};
use crate::error::AppError;
use crate::playlist::{PlaylistCache, PlaylistItem, Revision};
use crate::remote::{FileRemote, PlaylistMutator, PlaylistSource};

mod cli;
mod execute;
mod logging;
mod preview;
mod settings;
mod startup;

pub use cli::Cli;
pub use execute::{ExecuteError, execute};
pub use preview::render_preview;
pub use startup::{RunContext, load_playlist};

/// What a reorder run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Dry run: the preview was written, nothing was sent.
    Previewed { moves: usize },
    /// The playlist was already interleaved.
    Unchanged,
    /// Every move was committed.
    Applied { moves: usize, revision: Revision },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (mut settings, config_problem) = settings::load_settings();
    cli.apply_to(&mut settings);
    logging::init(&settings.log);
    if let Some(msg) = config_problem {
        warn!("{msg}");
    }

    if cli.print_config {
        print!("{}", settings.to_toml().map_err(AppError::from)?);
        return Ok(());
    }

    let Some(source_path) = settings.source.path.clone() else {
        return Err(AppError::MissingSource.into());
    };
    let mut remote = FileRemote::open(&source_path).map_err(AppError::from)?;
    let cache = open_cache(&settings);
    let ctx = RunContext::new(&remote, &settings, cli.dry)?;

    let mut out = std::io::stdout().lock();
    let outcome = reorder(
        &ctx,
        &mut remote,
        cache.as_ref(),
        &settings.preview,
        &mut out,
    )?;
    info!(?outcome, "done");

    Ok(())
}

fn open_cache(settings: &Settings) -> Option<PlaylistCache> {
    if !settings.cache.enabled {
        return None;
    }
    match settings.cache_dir() {
        Some(dir) => {
            let cache = PlaylistCache::new(dir);
            info!(dir = %cache.dir().display(), "using playlist cache");
            Some(cache)
        }
        None => {
            warn!("no cache directory could be resolved, caching disabled");
            None
        }
    }
}

/// Load, plan and either preview or apply the interleaved order.
pub fn reorder<R, W>(
    ctx: &RunContext,
    remote: &mut R,
    cache: Option<&PlaylistCache>,
    preview: &PreviewSettings,
    out: &mut W,
) -> Result<Outcome, AppError>
where
    R: PlaylistSource + PlaylistMutator + ?Sized,
    W: Write + ?Sized,
{
    let playlist = load_playlist(remote, cache, ctx)?;
    debug!(order = ?playlist.track_ids(), "current order");

    let entries = engine::schedule(&playlist.items, |item| item.added_by.clone());
    let plan: Plan = engine::compile_with(ctx.strategy, &entries)?;
    info!(
        items = playlist.items.len(),
        moves = plan.len(),
        strategy = ?ctx.strategy,
        "planned reorder"
    );

    let simulated = engine::apply(&plan, &playlist.items)?;
    if ctx.verify {
        let desired: Vec<&PlaylistItem> = engine::desired_order(&entries)
            .into_iter()
            .map(|o| &playlist.items[o])
            .collect();
        if !simulated.iter().eq(desired.into_iter()) {
            return Err(AppError::PlanMismatch);
        }
    }

    if ctx.dry_run {
        info!("dry run, not touching the playlist");
        for line in render_preview(&simulated, preview) {
            writeln!(out, "{line}")?;
        }
        return Ok(Outcome::Previewed { moves: plan.len() });
    }

    if plan.is_empty() {
        info!("playlist is already interleaved");
        return Ok(Outcome::Unchanged);
    }

    let revision = match execute(remote, &playlist.id, playlist.revision.clone(), &plan) {
        Ok(revision) => revision,
        Err(e) => {
            if let Some(cache) = cache {
                match cache.invalidate(&playlist.id) {
                    Ok(true) => warn!("dropped cached playlist after a partial reorder"),
                    Ok(false) => {}
                    Err(ce) => warn!("failed to drop cached playlist: {ce}"),
                }
            }
            return Err(e.into());
        }
    };

    if let Some(cache) = cache {
        let mut updated = playlist;
        updated.items = simulated;
        updated.revision = revision.clone();
        if let Err(e) = cache.save(&updated) {
            warn!("failed to cache reordered playlist: {e}");
        }
    }

    Ok(Outcome::Applied {
        moves: plan.len(),
        revision,
    })
}

#[cfg(test)]
mod tests;
