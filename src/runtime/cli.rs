use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{PlanStrategySetting, Settings};

#[derive(Parser, Debug, Default)]
#[command(
    author,
    version,
    about = "Reorder a shared playlist so contributors take turns"
)]
pub struct Cli {
    /// Name of the playlist to reorder
    #[arg(long)]
    pub playlist: Option<String>,
    /// Plan and preview the new order without touching the playlist
    #[arg(long, alias = "dry-run")]
    pub dry: bool,
    /// Library file served by the file-backed remote
    #[arg(long)]
    pub source: Option<PathBuf>,
    /// Always fetch the playlist, ignoring and not writing the snapshot cache
    #[arg(long)]
    pub no_cache: bool,
    /// How the new order is turned into moves
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,
    /// Print the effective settings as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Move each item straight into its final slot
    Settle,
    /// Send every item, in the new order, to the end of the playlist
    AppendToBack,
}

impl Cli {
    /// Fold command-line overrides into `settings`.
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(name) = &self.playlist {
            settings.playlist.name = Some(name.clone());
        }
        if let Some(path) = &self.source {
            settings.source.path = Some(path.clone());
        }
        if self.no_cache {
            settings.cache.enabled = false;
        }
        if let Some(s) = self.strategy {
            settings.plan.strategy = match s {
                StrategyArg::Settle => PlanStrategySetting::Settle,
                StrategyArg::AppendToBack => PlanStrategySetting::AppendToBack,
            };
        }
    }
}
