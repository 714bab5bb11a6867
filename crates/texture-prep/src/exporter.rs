use crate::alpha::apply_brightness_alpha;
use crate::error::TextureError;
use crate::report::{ExportReport, HalfOutcome, PartOutcome};
use crate::types::{ExportConfig, Part, SourceMapping, TextureKind};
use image::ImageFormat;
use std::collections::HashSet;
use filetime::FileTime;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::process;

/// Write-check file names tried before giving up on a directory.
const PROBE_ATTEMPTS: usize = 16;

/// Export every part in `mapping` into `config.output_directory`.
///
/// Fails as a whole only when a precondition does not hold (bad bike
/// number, nothing selected, unwritable destination); nothing is written
/// in that case. Otherwise each half of each part is processed on its own
/// and its outcome is collected in the returned report.
pub fn export(mapping: &SourceMapping, config: &ExportConfig) -> Result<ExportReport, TextureError> {
    config.validate()?;
    if mapping.is_empty() {
        return Err(TextureError::NoFilesSelected);
    }
    check_destination(&config.output_directory)?;

    let mut written = HashSet::new();
    let report = Part::ALL
        .into_iter()
        .fold(ExportReport::new(config), |mut report, part| {
            let outcome = export_part(part, mapping, config, &mut written);
            report.parts.push((part, outcome));
            report
        });

    log::info!(
        "Exported {} file(s) to {} ({} failed)",
        report.processed_count(),
        config.output_directory.display(),
        report.failed_count()
    );

    Ok(report)
}

/// Output file name for one half of a part.
///
/// Rename mode yields `{id}_{part}_{id}_D.png` / `{id}_{part}_{id}_MS.png`;
/// otherwise the source's own file name is kept.
pub fn output_file_name(
    part: Part,
    kind: TextureKind,
    source: &Path,
    config: &ExportConfig,
) -> Result<String, TextureError> {
    if config.rename_enabled {
        let id = &config.identifier;
        return Ok(format!("{}_{}_{}_{}.png", id, part.name(), id, kind.suffix()));
    }
    source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| TextureError::MissingSourceFile(source.to_path_buf()))
}

/// The destination must already exist and accept new files.
fn check_destination(dir: &Path) -> Result<(), TextureError> {
    let unwritable = |message: String| TextureError::DestinationUnwritable {
        path: dir.to_path_buf(),
        message,
    };

    let meta = fs::metadata(dir).map_err(|e| unwritable(e.to_string()))?;
    if !meta.is_dir() {
        return Err(unwritable("not a directory".to_string()));
    }

    // A stale check file from a crashed run only means the next name is tried.
    for attempt in 0..PROBE_ATTEMPTS {
        let probe = dir.join(format!(".texture-prep-probe-{}-{}", process::id(), attempt));
        match OpenOptions::new().write(true).create_new(true).open(&probe) {
            Ok(file) => {
                drop(file);
                return fs::remove_file(&probe).map_err(|e| unwritable(e.to_string()));
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(unwritable(e.to_string())),
        }
    }
    Err(unwritable("no free name for the write check".to_string()))
}

fn export_part(
    part: Part,
    mapping: &SourceMapping,
    config: &ExportConfig,
    written: &mut HashSet<PathBuf>,
) -> PartOutcome {
    let base_src = mapping.get(part.base_slot());
    let metal_src = mapping.get(part.metal_slot());
    if base_src.is_none() && metal_src.is_none() {
        log::debug!("{}: nothing selected, skipping", part);
        return PartOutcome::Skipped;
    }

    let base = export_half(part, TextureKind::Base, base_src, config, written);
    let metal = export_half(part, TextureKind::Metal, metal_src, config, written);
    PartOutcome::Exported { base, metal }
}

fn export_half(
    part: Part,
    kind: TextureKind,
    source: Option<&Path>,
    config: &ExportConfig,
    written: &mut HashSet<PathBuf>,
) -> HalfOutcome {
    let Some(source) = source else {
        return HalfOutcome::NotSelected;
    };

    let result = output_file_name(part, kind, source, config).and_then(|name| {
        let dest = config.output_directory.join(name);
        check_source(source, &dest)?;
        if !written.insert(dest.clone()) {
            log::warn!(
                "{} {} overwrites an earlier output: {}",
                part,
                kind,
                dest.display()
            );
        }
        match kind {
            TextureKind::Base => copy_base(source, &dest)?,
            TextureKind::Metal => write_metal(source, &dest, config.transparency_enabled)?,
        }
        Ok(dest)
    });

    match result {
        Ok(dest) => {
            log::info!("{} {}: {} -> {}", part, kind, source.display(), dest.display());
            HalfOutcome::Processed(dest)
        }
        Err(e) => {
            log::warn!("{} {}: {}", part, kind, e);
            HalfOutcome::Failed(e)
        }
    }
}

/// The source must be a regular file distinct from its destination.
fn check_source(source: &Path, dest: &Path) -> Result<(), TextureError> {
    if !source.is_file() {
        return Err(TextureError::MissingSourceFile(source.to_path_buf()));
    }
    if let (Ok(a), Ok(b)) = (source.canonicalize(), dest.canonicalize()) {
        if a == b {
            return Err(TextureError::OutputOverwritesSource(source.to_path_buf()));
        }
    }
    Ok(())
}

/// Byte-for-byte copy keeping permission bits and access/modification times.
fn copy_base(source: &Path, dest: &Path) -> Result<(), TextureError> {
    // Read the times first, the copy itself may bump the source's atime.
    let meta = fs::metadata(source)?;
    fs::copy(source, dest)?;
    filetime::set_file_times(
        dest,
        FileTime::from_last_access_time(&meta),
        FileTime::from_last_modification_time(&meta),
    )?;
    Ok(())
}

/// Decode a metallic map as RGBA8 and save it as PNG, optionally with
/// brightness-derived alpha.
fn write_metal(source: &Path, dest: &Path, transparency: bool) -> Result<(), TextureError> {
    let img = image::open(source).map_err(|e| TextureError::ImageDecode {
        path: source.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut rgba = img.to_rgba8();
    if transparency {
        apply_brightness_alpha(&mut rgba);
    }

    log::debug!(
        "  {}×{} RGBA8, transparency {}",
        rgba.width(),
        rgba.height(),
        if transparency { "on" } else { "off" }
    );

    rgba.save_with_format(dest, ImageFormat::Png)
        .map_err(|e| TextureError::ImageEncode {
            path: dest.to_path_buf(),
            message: e.to_string(),
        })
}
