use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::engine::PlanStrategy;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/interlace/config.toml` or
/// `~/.config/interlace/config.toml`
///
/// Precedence (highest wins):
/// 1) Command-line flags
/// 2) Environment variables (prefix `INTERLACE__`, `__` as nested separator)
/// 3) Config file (if present)
/// 4) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub playlist: PlaylistSettings,
    pub source: SourceSettings,
    pub cache: CacheSettings,
    pub plan: PlanSettings,
    pub preview: PreviewSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaylistSettings {
    /// Name of the playlist to reorder when `--playlist` is not given.
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Library file served by the file-backed remote.
    pub path: Option<PathBuf>,
    /// Items requested per page when fetching a playlist.
    pub page_size: usize,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            path: None,
            page_size: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Whether fetched playlists are snapshotted to disk.
    pub enabled: bool,
    /// Snapshot directory. Defaults to `$XDG_CACHE_HOME/interlace`.
    pub dir: Option<PathBuf>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlanSettings {
    pub strategy: PlanStrategySetting,
    /// Replay the plan in memory and refuse to run it unless it reproduces
    /// the interleaved order.
    pub verify: bool,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            strategy: PlanStrategySetting::Settle,
            verify: true,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlanStrategySetting {
    #[serde(alias = "in-place", alias = "in_place")]
    Settle,
    #[serde(
        alias = "append_to_back",
        alias = "append",
        alias = "move-to-back",
        alias = "move_to_back"
    )]
    AppendToBack,
}

impl From<PlanStrategySetting> for PlanStrategy {
    fn from(s: PlanStrategySetting) -> Self {
        match s {
            PlanStrategySetting::Settle => PlanStrategy::Settle,
            PlanStrategySetting::AppendToBack => PlanStrategy::AppendToBack,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PreviewSettings {
    /// Columns of each dry-run preview line, in order.
    ///
    /// Example: ["position", "added-by", "track"]
    pub fields: Vec<PreviewField>,
    /// Separator used to join `fields`.
    pub separator: String,
    /// Which track fields make up the "track" column.
    ///
    /// Example: ["artist", "title"] -> "Artist - Title"
    pub track_fields: Vec<TrackDisplayField>,
    /// Separator used to join `track_fields`.
    pub track_separator: String,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            fields: vec![
                PreviewField::Position,
                PreviewField::AddedBy,
                PreviewField::Track,
            ],
            separator: " | ".to_string(),
            track_fields: vec![TrackDisplayField::Artist, TrackDisplayField::Title],
            track_separator: " - ".to_string(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PreviewField {
    #[serde(alias = "pos", alias = "index")]
    Position,
    #[serde(alias = "added_by", alias = "contributor")]
    AddedBy,
    Track,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackDisplayField {
    Title,
    Artist,
    Album,
    Id,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
