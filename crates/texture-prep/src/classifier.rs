use crate::types::{Part, Slot, SourceMapping, TextureKind};
use std::path::{Path, PathBuf};

/// Part keywords in priority order. The first part with any matching
/// keyword wins, so `frame_wheel.png` is a frame texture.
const PART_KEYWORDS: [(Part, &[&str]); 4] = [
    (Part::Frame, &["frame"]),
    (Part::Gear, &["gear"]),
    (Part::Handlebar, &["handle", "bar"]),
    (Part::Wheels, &["wheel"]),
];

/// Tokens marking a metal-smoothness map.
const METAL_KEYWORDS: [&str; 2] = ["metal", "ms"];

/// Extensions the export pipeline can decode.
const SUPPORTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "tga"];

/// Classify a file name into one of the eight slots.
///
/// Plain case-insensitive substring checks, no tokenizing. Returns `None`
/// when no part keyword matches, whatever metal tokens are present.
pub fn classify(filename: &str) -> Option<Slot> {
    let name = filename.to_lowercase();

    let part = PART_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| name.contains(k)))
        .map(|(part, _)| *part)?;

    let kind = if METAL_KEYWORDS.iter().any(|k| name.contains(k)) {
        TextureKind::Metal
    } else {
        TextureKind::Base
    };

    Some(Slot::new(part, kind))
}

/// Classify the basename of `path`.
pub fn classify_path(path: &Path) -> Option<Slot> {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(classify)
}

/// Whether `path` has one of the extensions the tool decodes.
pub fn is_supported_texture(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| ext.eq_ignore_ascii_case(s))
        })
}

/// Outcome of sorting a batch of dropped files into slots.
#[derive(Debug, Clone, Default)]
pub struct BatchAssignment {
    /// Slot mapping built from the batch.
    pub mapping: SourceMapping,
    /// Assigned slots, in input order.
    pub assigned: Vec<(Slot, PathBuf)>,
    /// Paths that classified into a slot an earlier path already filled.
    pub duplicates: Vec<(Slot, PathBuf)>,
    /// Paths that matched no part keyword.
    pub unmatched: Vec<PathBuf>,
}

impl BatchAssignment {
    /// Every path that did not end up in the mapping.
    pub fn ignored(&self) -> impl Iterator<Item = &Path> + '_ {
        self.unmatched
            .iter()
            .map(PathBuf::as_path)
            .chain(self.duplicates.iter().map(|(_, p)| p.as_path()))
    }
}

/// Sort a batch of paths into slots.
///
/// The first path classified into a slot keeps it; later paths for the
/// same slot are recorded as duplicates and left out of the mapping.
pub fn classify_batch<I, P>(paths: I) -> BatchAssignment
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let mut batch = BatchAssignment::default();

    for path in paths {
        let path = path.into();
        match classify_path(&path) {
            Some(slot) if batch.mapping.contains(slot) => {
                log::debug!("{} -> {} (slot already filled, dropped)", path.display(), slot);
                batch.duplicates.push((slot, path));
            }
            Some(slot) => {
                log::debug!("{} -> {}", path.display(), slot);
                batch.mapping.set(slot, path.clone());
                batch.assigned.push((slot, path));
            }
            None => {
                log::debug!("{} -> unmatched", path.display());
                batch.unmatched.push(path);
            }
        }
    }

    batch
}
