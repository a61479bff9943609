use std::path::{Path, PathBuf};

use crate::config::CatalogSettings;

use super::model::{Catalog, CatalogError, TrackDescriptor};

/// Build the catalog from `[catalog]` settings, resolving relative asset
/// paths against `sounds_dir`.
///
/// Missing files are only logged: they show up later as a playback failure
/// when the sound is selected.
pub fn from_settings(settings: &CatalogSettings) -> Result<Catalog, CatalogError> {
    let sounds_dir = settings.sounds_dir();
    let tracks = settings
        .tracks
        .iter()
        .map(|t| {
            TrackDescriptor::new(
                t.id.trim(),
                t.label.as_str(),
                t.category.as_str(),
                resolve_asset(&sounds_dir, &t.asset),
            )
        })
        .collect();

    let catalog = Catalog::new(tracks)?;

    for t in catalog.tracks() {
        if !t.asset.is_file() {
            tracing::warn!(id = %t.id, asset = %t.asset.display(), "sound file not found");
        }
    }
    tracing::debug!(count = catalog.len(), "catalog loaded");

    Ok(catalog)
}

fn resolve_asset(sounds_dir: &Path, asset: &Path) -> PathBuf {
    if asset.is_absolute() {
        asset.to_path_buf()
    } else {
        sounds_dir.join(asset)
    }
}
