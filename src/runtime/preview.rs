use crate::config::{PreviewField, PreviewSettings};
use crate::playlist::{PlaylistItem, display_from_fields};

/// One line per item of `items`: the configured columns joined by the
/// configured separator. Positions are zero-based and right-aligned.
pub fn render_preview(items: &[PlaylistItem], settings: &PreviewSettings) -> Vec<String> {
    let width = items.len().saturating_sub(1).to_string().len();

    items
        .iter()
        .enumerate()
        .map(|(pos, item)| {
            settings
                .fields
                .iter()
                .map(|f| match f {
                    PreviewField::Position => format!("{pos:>width$}"),
                    PreviewField::AddedBy => item.added_by.clone(),
                    PreviewField::Track => display_from_fields(
                        &item.track,
                        &settings.track_fields,
                        &settings.track_separator,
                    ),
                })
                .collect::<Vec<_>>()
                .join(&settings.separator)
        })
        .collect()
}
