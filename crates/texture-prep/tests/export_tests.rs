//! End-to-end export scenarios against temporary directories.
//!
//! Source textures are synthesised in-test: base maps are arbitrary bytes
//! (they are copied, never decoded) and metallic maps are small RGBA PNGs.

use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgba, RgbaImage};
use texture_prep::{
    classify_batch, export, ExportConfig, HalfOutcome, Part, PartOutcome, Slot, SourceMapping,
    TextureError,
};

/// A 4×2 metallic map covering black, white, grays and colors with odd alpha.
fn metal_pixels() -> RgbaImage {
    let pixels = [
        [0, 0, 0, 255],
        [255, 255, 255, 0],
        [128, 128, 128, 17],
        [1, 1, 0, 255],
        [200, 10, 50, 3],
        [12, 34, 56, 78],
        [255, 0, 0, 255],
        [90, 91, 92, 128],
    ];
    let mut img = RgbaImage::new(4, 2);
    for (i, p) in pixels.iter().enumerate() {
        img.put_pixel(i as u32 % 4, i as u32 / 4, Rgba(*p));
    }
    img
}

fn write_metal(path: &Path) -> RgbaImage {
    let img = metal_pixels();
    img.save_with_format(path, ImageFormat::Png).unwrap();
    img
}

fn sorted_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

struct FrameFixture {
    _src: tempfile::TempDir,
    base: PathBuf,
    metal: PathBuf,
    mapping: SourceMapping,
}

fn frame_fixture() -> FrameFixture {
    let src = tempfile::tempdir().unwrap();
    let base = src.path().join("FrameColor.png");
    let metal = src.path().join("frame_MS.png");
    fs::write(&base, b"\x89PNG pretend base colour bytes").unwrap();
    write_metal(&metal);

    let mut mapping = SourceMapping::new();
    mapping.set(Slot::FrameBase, &base);
    mapping.set(Slot::FrameMetal, &metal);

    FrameFixture {
        _src: src,
        base,
        metal,
        mapping,
    }
}

#[test]
fn test_rename_scenario_frame_only() {
    let fx = frame_fixture();
    let out = tempfile::tempdir().unwrap();
    let config = ExportConfig::new("42", out.path());

    let report = export(&fx.mapping, &config).unwrap();

    assert_eq!(
        sorted_names(out.path()),
        vec!["42_frame_42_D.png", "42_frame_42_MS.png"]
    );
    assert_eq!(
        fs::read(out.path().join("42_frame_42_D.png")).unwrap(),
        fs::read(&fx.base).unwrap()
    );

    match report.part(Part::Frame) {
        Some(PartOutcome::Exported { base, metal }) => {
            assert!(base.is_processed());
            assert!(metal.is_processed());
        }
        other => panic!("unexpected frame outcome: {:?}", other),
    }
    for part in [Part::Gear, Part::Handlebar, Part::Wheels] {
        assert!(matches!(report.part(part), Some(PartOutcome::Skipped)));
    }
    assert_eq!(report.processed_count(), 2);
    assert!(!report.has_failures());
}

#[test]
fn test_metal_alpha_from_brightness() {
    let fx = frame_fixture();
    let out = tempfile::tempdir().unwrap();
    export(&fx.mapping, &ExportConfig::new("42", out.path())).unwrap();

    let input = image::open(&fx.metal).unwrap().to_rgba8();
    let output = image::open(out.path().join("42_frame_42_MS.png"))
        .unwrap()
        .to_rgba8();
    assert_eq!(input.dimensions(), output.dimensions());

    for (src, dst) in input.pixels().zip(output.pixels()) {
        let [r, g, b, _] = src.0;
        let sum = u32::from(r) + u32::from(g) + u32::from(b);
        let expected = (f64::from(sum) / 3.0).round() as u8;
        assert_eq!(&dst.0[..3], &src.0[..3]);
        assert_eq!(dst.0[3], expected, "pixel {:?}", src);
    }

    assert_eq!(output.get_pixel(0, 0).0[3], 0);
    assert_eq!(output.get_pixel(1, 0).0[3], 255);
}

#[test]
fn test_export_is_idempotent() {
    let fx = frame_fixture();
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    export(&fx.mapping, &ExportConfig::new("9", first.path())).unwrap();
    export(&fx.mapping, &ExportConfig::new("9", second.path())).unwrap();

    let names = sorted_names(first.path());
    assert_eq!(names, sorted_names(second.path()));
    for name in names {
        assert_eq!(
            fs::read(first.path().join(&name)).unwrap(),
            fs::read(second.path().join(&name)).unwrap(),
            "{} differs",
            name
        );
    }
}

#[test]
fn test_pass_through_names() {
    let fx = frame_fixture();
    let out = tempfile::tempdir().unwrap();
    let mut config = ExportConfig::new("", out.path());
    config.rename_enabled = false;

    let report = export(&fx.mapping, &config).unwrap();

    assert_eq!(
        sorted_names(out.path()),
        vec!["FrameColor.png", "frame_MS.png"]
    );
    assert!(report.to_string().contains("naming: original names"));
}

#[test]
fn test_invalid_identifier_touches_nothing() {
    let fx = frame_fixture();
    let out = tempfile::tempdir().unwrap();
    let config = ExportConfig::new("abc", out.path());

    let err = export(&fx.mapping, &config).unwrap_err();

    assert!(matches!(err, TextureError::InvalidIdentifier(ref id) if id == "abc"));
    assert!(sorted_names(out.path()).is_empty());
}

#[test]
fn test_unwritable_destination_aborts() {
    let fx = frame_fixture();
    let out = tempfile::tempdir().unwrap();
    let missing = out.path().join("not-created");

    let err = export(&fx.mapping, &ExportConfig::new("1", &missing)).unwrap_err();

    assert!(matches!(err, TextureError::DestinationUnwritable { .. }));
    assert!(!missing.exists());
}

#[test]
fn test_drop_batch_then_export() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let files: Vec<PathBuf> = ["FrameColor.png", "frame_MS.png", "randomfile.png"]
        .iter()
        .map(|n| src.path().join(n))
        .collect();
    fs::write(&files[0], b"base").unwrap();
    write_metal(&files[1]);
    fs::write(&files[2], b"noise").unwrap();

    let batch = classify_batch(files.clone());
    assert_eq!(batch.assigned.len(), 2);
    assert_eq!(batch.unmatched, vec![files[2].clone()]);

    let report = export(&batch.mapping, &ExportConfig::new("5", out.path())).unwrap();
    assert_eq!(
        sorted_names(out.path()),
        vec!["5_frame_5_D.png", "5_frame_5_MS.png"]
    );
    assert_eq!(report.outputs().len(), 2);
}

#[test]
fn test_missing_part_does_not_stop_others() {
    let fx = frame_fixture();
    let out = tempfile::tempdir().unwrap();
    let mut mapping = fx.mapping.clone();
    mapping.set(Slot::GearBase, "/definitely/not/here/gear.png");

    let report = export(&mapping, &ExportConfig::new("8", out.path())).unwrap();

    match report.part(Part::Gear) {
        Some(PartOutcome::Exported { base, metal }) => {
            assert!(matches!(
                base,
                HalfOutcome::Failed(TextureError::MissingSourceFile(_))
            ));
            assert!(matches!(metal, HalfOutcome::NotSelected));
        }
        other => panic!("unexpected gear outcome: {:?}", other),
    }
    assert_eq!(report.processed_count(), 2);
    assert_eq!(report.failed_count(), 1);
    assert!(out.path().join("8_frame_8_MS.png").exists());
}

#[test]
fn test_base_copy_keeps_modification_time() {
    let fx = frame_fixture();
    let out = tempfile::tempdir().unwrap();
    let old = filetime::FileTime::from_unix_time(1_000_000_000, 0);
    filetime::set_file_mtime(&fx.base, old).unwrap();

    export(&fx.mapping, &ExportConfig::new("42", out.path())).unwrap();

    let meta = fs::metadata(out.path().join("42_frame_42_D.png")).unwrap();
    assert_eq!(filetime::FileTime::from_last_modification_time(&meta), old);
}

#[test]
fn test_directory_as_source_is_missing_file() {
    let fx = frame_fixture();
    let out = tempfile::tempdir().unwrap();
    let not_a_file = tempfile::tempdir().unwrap();
    let mut mapping = fx.mapping.clone();
    mapping.set(Slot::WheelsMetal, not_a_file.path());

    let report = export(&mapping, &ExportConfig::new("4", out.path())).unwrap();

    match report.part(Part::Wheels) {
        Some(PartOutcome::Exported { base, metal }) => {
            assert!(matches!(base, HalfOutcome::NotSelected));
            assert!(matches!(
                metal,
                HalfOutcome::Failed(TextureError::MissingSourceFile(p)) if p == not_a_file.path()
            ));
        }
        other => panic!("unexpected wheels outcome: {:?}", other),
    }
    assert_eq!(
        sorted_names(out.path()),
        vec!["4_frame_4_D.png", "4_frame_4_MS.png"]
    );
}

#[cfg(unix)]
#[test]
fn test_read_only_destination_aborts() {
    use std::os::unix::fs::PermissionsExt;

    let fx = frame_fixture();
    let out = tempfile::tempdir().unwrap();
    fs::set_permissions(out.path(), fs::Permissions::from_mode(0o555)).unwrap();

    // Root ignores directory permissions; nothing to check there.
    let canary = out.path().join("canary");
    if fs::write(&canary, b"").is_ok() {
        fs::remove_file(&canary).unwrap();
        fs::set_permissions(out.path(), fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let result = export(&fx.mapping, &ExportConfig::new("42", out.path()));
    let names = sorted_names(out.path());
    fs::set_permissions(out.path(), fs::Permissions::from_mode(0o755)).unwrap();

    assert!(matches!(result, Err(TextureError::DestinationUnwritable { .. })));
    assert!(names.is_empty());
}
