use crate::config::TrackDisplayField;

use super::model::Track;

/// Build a label for a track according to the provided `fields` and separator.
///
/// Empty or missing fields are skipped; falls back to the title when no
/// parts were produced.
pub fn display_from_fields(track: &Track, fields: &[TrackDisplayField], sep: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    for f in fields {
        let part = match f {
            TrackDisplayField::Title => Some(track.title.as_str()),
            TrackDisplayField::Artist => track.artist.as_deref(),
            TrackDisplayField::Album => track.album.as_deref(),
            TrackDisplayField::Id => Some(track.id.as_str()),
        };
        if let Some(p) = part.map(str::trim).filter(|s| !s.is_empty()) {
            parts.push(p.to_string());
        }
    }

    if parts.is_empty() {
        track.title.clone()
    } else {
        parts.join(sep)
    }
}
