use std::collections::HashSet;
use std::path::PathBuf;

use rand::seq::IndexedRandom;
use thiserror::Error;

/// One selectable sound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackDescriptor {
    /// Stable key, never shown to the user.
    pub id: String,
    pub label: String,
    /// Usage hint such as "Sleeping" or "Comfort".
    pub category: String,
    /// Location of the audio file. Opaque to the playback controller.
    pub asset: PathBuf,
}

impl TrackDescriptor {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        category: impl Into<String>,
        asset: impl Into<PathBuf>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            category: category.into(),
            asset: asset.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate track id `{0}`")]
    DuplicateId(String),
    #[error("track at position {0} has an empty id")]
    EmptyId(usize),
}

/// Ordered list of tracks with unique ids.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tracks: Vec<TrackDescriptor>,
}

impl Catalog {
    pub fn new(tracks: Vec<TrackDescriptor>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(tracks.len());
        for (pos, t) in tracks.iter().enumerate() {
            if t.id.trim().is_empty() {
                return Err(CatalogError::EmptyId(pos));
            }
            if !seen.insert(t.id.as_str()) {
                return Err(CatalogError::DuplicateId(t.id.clone()));
            }
        }
        Ok(Self { tracks })
    }

    pub fn tracks(&self) -> &[TrackDescriptor] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&TrackDescriptor> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Index of `id` in catalog order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    /// Pick a track uniformly at random. Each call is independent.
    pub fn choose<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Option<&TrackDescriptor> {
        self.tracks.choose(rng)
    }
}
