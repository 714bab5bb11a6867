use crate::error::TextureError;
use crate::types::{ExportConfig, Part};
use std::fmt;
use std::path::{Path, PathBuf};

/// What happened to one half (base or metal) of a part.
#[derive(Debug)]
pub enum HalfOutcome {
    /// No source was selected for this half.
    NotSelected,
    /// Written to the given output path.
    Processed(PathBuf),
    /// This half failed; the sibling half and other parts are unaffected.
    Failed(TextureError),
}

impl HalfOutcome {
    pub fn is_processed(&self) -> bool {
        matches!(self, HalfOutcome::Processed(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, HalfOutcome::Failed(_))
    }

    pub fn output(&self) -> Option<&Path> {
        match self {
            HalfOutcome::Processed(path) => Some(path),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&TextureError> {
        match self {
            HalfOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Result of exporting one part.
#[derive(Debug)]
pub enum PartOutcome {
    /// Neither slot of the part had a source.
    Skipped,
    Exported { base: HalfOutcome, metal: HalfOutcome },
}

/// Per-part results of an export, in [`Part::ALL`] order.
#[derive(Debug)]
pub struct ExportReport {
    pub output_directory: PathBuf,
    /// Bike number when rename mode was used.
    pub renamed_as: Option<String>,
    pub transparency_enabled: bool,
    pub parts: Vec<(Part, PartOutcome)>,
}

impl ExportReport {
    pub(crate) fn new(config: &ExportConfig) -> Self {
        Self {
            output_directory: config.output_directory.clone(),
            renamed_as: config
                .rename_enabled
                .then(|| config.identifier.clone()),
            transparency_enabled: config.transparency_enabled,
            parts: Vec::with_capacity(Part::ALL.len()),
        }
    }

    /// Outcome recorded for `part`.
    pub fn part(&self, part: Part) -> Option<&PartOutcome> {
        self.parts.iter().find(|(p, _)| *p == part).map(|(_, o)| o)
    }

    fn halves(&self) -> impl Iterator<Item = &HalfOutcome> + '_ {
        self.parts.iter().flat_map(|(_, outcome)| {
            let halves = match outcome {
                PartOutcome::Skipped => None,
                PartOutcome::Exported { base, metal } => Some([base, metal]),
            };
            halves.into_iter().flatten()
        })
    }

    /// Number of files written.
    pub fn processed_count(&self) -> usize {
        self.halves().filter(|h| h.is_processed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.halves().filter(|h| h.is_failed()).count()
    }

    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0
    }

    /// Paths of every written file, in processing order.
    pub fn outputs(&self) -> Vec<&Path> {
        self.halves().filter_map(HalfOutcome::output).collect()
    }
}

fn write_half(f: &mut fmt::Formatter<'_>, label: &str, half: &HalfOutcome) -> fmt::Result {
    match half {
        HalfOutcome::NotSelected => write!(f, "{} not selected", label),
        HalfOutcome::Processed(path) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_else(|| path.to_string_lossy());
            write!(f, "{} -> {}", label, name)
        }
        HalfOutcome::Failed(e) => write!(f, "{} failed: {}", label, e),
    }
}

impl fmt::Display for ExportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let naming = match &self.renamed_as {
            Some(id) => format!("bike {}", id),
            None => "original names".to_string(),
        };
        let transparency = if self.transparency_enabled { "on" } else { "off" };
        writeln!(
            f,
            "Exported to {} (naming: {}, transparency: {})",
            self.output_directory.display(),
            naming,
            transparency
        )?;

        for (part, outcome) in &self.parts {
            write!(f, "  {}: ", part)?;
            match outcome {
                PartOutcome::Skipped => f.write_str("skipped")?,
                PartOutcome::Exported { base, metal } => {
                    write_half(f, "base", base)?;
                    f.write_str(", ")?;
                    write_half(f, "metal", metal)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
