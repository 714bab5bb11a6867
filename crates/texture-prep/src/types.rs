use crate::error::TextureError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// A bike component that owns one base-color slot and one metallic slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Part {
    Frame,
    Gear,
    Handlebar,
    Wheels,
}

impl Part {
    /// All parts in export (and classification priority) order.
    pub const ALL: [Part; 4] = [Part::Frame, Part::Gear, Part::Handlebar, Part::Wheels];

    /// Name used in output file names.
    pub fn name(self) -> &'static str {
        match self {
            Part::Frame => "frame",
            Part::Gear => "gear",
            Part::Handlebar => "handlebar",
            Part::Wheels => "wheels",
        }
    }

    /// Base-color slot of this part.
    pub fn base_slot(self) -> Slot {
        Slot::new(self, TextureKind::Base)
    }

    /// Metallic slot of this part.
    pub fn metal_slot(self) -> Slot {
        Slot::new(self, TextureKind::Metal)
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which half of a part a texture fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextureKind {
    /// Diffuse / albedo map, copied verbatim.
    Base,
    /// Metal-smoothness map, optionally rewritten with brightness alpha.
    Metal,
}

impl TextureKind {
    /// Suffix token used by rename mode (`_D` / `_MS`).
    pub fn suffix(self) -> &'static str {
        match self {
            TextureKind::Base => "D",
            TextureKind::Metal => "MS",
        }
    }
}

impl fmt::Display for TextureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TextureKind::Base => "base",
            TextureKind::Metal => "metal",
        })
    }
}

/// One of the eight input roles a source file can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    FrameBase,
    FrameMetal,
    GearBase,
    GearMetal,
    HandlebarBase,
    HandlebarMetal,
    WheelsBase,
    WheelsMetal,
}

impl Slot {
    /// All slots, grouped by part with the base slot first.
    pub const ALL: [Slot; 8] = [
        Slot::FrameBase,
        Slot::FrameMetal,
        Slot::GearBase,
        Slot::GearMetal,
        Slot::HandlebarBase,
        Slot::HandlebarMetal,
        Slot::WheelsBase,
        Slot::WheelsMetal,
    ];

    /// Build the slot for a part/kind pair. Total over both enums.
    pub fn new(part: Part, kind: TextureKind) -> Slot {
        match (part, kind) {
            (Part::Frame, TextureKind::Base) => Slot::FrameBase,
            (Part::Frame, TextureKind::Metal) => Slot::FrameMetal,
            (Part::Gear, TextureKind::Base) => Slot::GearBase,
            (Part::Gear, TextureKind::Metal) => Slot::GearMetal,
            (Part::Handlebar, TextureKind::Base) => Slot::HandlebarBase,
            (Part::Handlebar, TextureKind::Metal) => Slot::HandlebarMetal,
            (Part::Wheels, TextureKind::Base) => Slot::WheelsBase,
            (Part::Wheels, TextureKind::Metal) => Slot::WheelsMetal,
        }
    }

    pub fn part(self) -> Part {
        match self {
            Slot::FrameBase | Slot::FrameMetal => Part::Frame,
            Slot::GearBase | Slot::GearMetal => Part::Gear,
            Slot::HandlebarBase | Slot::HandlebarMetal => Part::Handlebar,
            Slot::WheelsBase | Slot::WheelsMetal => Part::Wheels,
        }
    }

    pub fn kind(self) -> TextureKind {
        match self {
            Slot::FrameBase | Slot::GearBase | Slot::HandlebarBase | Slot::WheelsBase => {
                TextureKind::Base
            }
            Slot::FrameMetal | Slot::GearMetal | Slot::HandlebarMetal | Slot::WheelsMetal => {
                TextureKind::Metal
            }
        }
    }

    /// Snake-case key, e.g. `frame_metal`.
    pub fn key(self) -> &'static str {
        match self {
            Slot::FrameBase => "frame_base",
            Slot::FrameMetal => "frame_metal",
            Slot::GearBase => "gear_base",
            Slot::GearMetal => "gear_metal",
            Slot::HandlebarBase => "handlebar_base",
            Slot::HandlebarMetal => "handlebar_metal",
            Slot::WheelsBase => "wheels_base",
            Slot::WheelsMetal => "wheels_metal",
        }
    }

    /// Human-readable label, e.g. `Frame Base Colour`.
    pub fn label(self) -> &'static str {
        match self {
            Slot::FrameBase => "Frame Base Colour",
            Slot::FrameMetal => "Frame Metallic",
            Slot::GearBase => "Gear Base Colour",
            Slot::GearMetal => "Gear Metallic",
            Slot::HandlebarBase => "Handlebar Base Colour",
            Slot::HandlebarMetal => "Handlebar Metallic",
            Slot::WheelsBase => "Wheels Base Colour",
            Slot::WheelsMetal => "Wheels Metallic",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Slot {
    type Err = TextureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Slot::ALL
            .into_iter()
            .find(|slot| slot.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TextureError::UnknownSlot(s.to_string()))
    }
}

/// Source file chosen for each slot. Any slot may be unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMapping {
    paths: [Option<PathBuf>; 8],
}

impl SourceMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `path` to `slot`, returning the previous assignment.
    pub fn set(&mut self, slot: Slot, path: impl Into<PathBuf>) -> Option<PathBuf> {
        self.paths[slot.index()].replace(path.into())
    }

    pub fn get(&self, slot: Slot) -> Option<&Path> {
        self.paths[slot.index()].as_deref()
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.paths[slot.index()].is_some()
    }

    /// True when no slot has a path.
    pub fn is_empty(&self) -> bool {
        self.paths.iter().all(Option::is_none)
    }

    /// Number of slots with a path.
    pub fn len(&self) -> usize {
        self.paths.iter().filter(|p| p.is_some()).count()
    }

    /// Assigned slots in [`Slot::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &Path)> + '_ {
        Slot::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot).map(|p| (slot, p)))
    }
}

/// Settings for one export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Bike number. Must be all digits when `rename_enabled` is set.
    pub identifier: String,
    /// Replace source names with `{id}_{part}_{id}_{D|MS}.png`.
    pub rename_enabled: bool,
    /// Rewrite metallic-map alpha from pixel brightness.
    pub transparency_enabled: bool,
    /// Existing, writable directory receiving the outputs.
    pub output_directory: PathBuf,
}

impl ExportConfig {
    /// Rename and transparency both enabled (the tool's default mode).
    pub fn new(identifier: impl Into<String>, output_directory: impl Into<PathBuf>) -> Self {
        Self {
            identifier: identifier.into(),
            rename_enabled: true,
            transparency_enabled: true,
            output_directory: output_directory.into(),
        }
    }

    /// Check the bike number if rename mode needs it.
    pub fn validate(&self) -> Result<(), TextureError> {
        if self.rename_enabled && !is_valid_identifier(&self.identifier) {
            return Err(TextureError::InvalidIdentifier(self.identifier.clone()));
        }
        Ok(())
    }
}

/// A bike number is a non-empty run of ASCII digits.
pub fn is_valid_identifier(identifier: &str) -> bool {
    !identifier.is_empty() && identifier.bytes().all(|b| b.is_ascii_digit())
}
