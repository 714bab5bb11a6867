/// Error types for sorting and export.
pub mod error;

/// Slots, parts and export configuration.
pub mod types;

/// Filename heuristics that sort textures into slots.
pub mod classifier;

/// Brightness-to-alpha pixel transform for metallic maps.
pub mod alpha;

/// Per-part export of base and metallic maps.
pub mod exporter;

/// Export outcomes and the human-readable summary.
pub mod report;

/// Drag-and-drop payload parsing.
pub mod drop_payload;

pub use classifier::{classify, classify_batch, classify_path, BatchAssignment};
pub use drop_payload::split_drop_payload;
pub use error::TextureError;
pub use exporter::export;
pub use report::{ExportReport, HalfOutcome, PartOutcome};
pub use types::{ExportConfig, Part, Slot, SourceMapping, TextureKind};
