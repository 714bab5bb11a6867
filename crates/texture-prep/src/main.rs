use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use texture_prep::{
    classifier, classify_batch, export, split_drop_payload, BatchAssignment, ExportConfig, Slot,
    SourceMapping, TextureError,
};

#[derive(Parser)]
#[command(name = "texture-prep")]
#[command(about = "Sort bike part textures into slots and export them for a bike number", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Suppress progress output (only show errors)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which slot each file would be sorted into
    Classify {
        /// Texture files to sort
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Export base and metallic maps into an output directory
    Export {
        /// Texture files to auto-sort into slots
        files: Vec<PathBuf>,

        /// Existing output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Bike number used in renamed outputs (digits only)
        #[arg(short, long, default_value = "")]
        bike: String,

        /// Keep source file names instead of renaming
        #[arg(long)]
        no_rename: bool,

        /// Keep metallic-map alpha instead of deriving it from brightness
        #[arg(long)]
        no_transparency: bool,

        /// Assign a file to a slot explicitly, e.g. frame_metal=shiny.png
        #[arg(short, long = "slot", value_name = "SLOT=PATH", value_parser = parse_slot_arg)]
        slots: Vec<(Slot, PathBuf)>,

        /// Drag-and-drop payload (brace-quoted paths allowed) to auto-sort
        #[arg(long, value_name = "PAYLOAD")]
        drop: Option<String>,
    },
}

fn parse_slot_arg(s: &str) -> Result<(Slot, PathBuf), String> {
    let (slot, path) = s
        .split_once('=')
        .ok_or_else(|| format!("expected SLOT=PATH, got {:?}", s))?;
    let slot = slot.parse::<Slot>().map_err(|e| e.to_string())?;
    if path.trim().is_empty() {
        return Err(format!("missing path for {}", slot));
    }
    Ok((slot, PathBuf::from(path.trim())))
}

fn print_batch(batch: &BatchAssignment) {
    for (slot, path) in &batch.assigned {
        println!("{:<22} {}", slot.label(), path.display());
    }
    for (slot, path) in &batch.duplicates {
        println!("ignored (duplicate {}) {}", slot, path.display());
    }
    for path in &batch.unmatched {
        println!("ignored (unmatched) {}", path.display());
    }
}

fn warn_unsupported(files: &[PathBuf]) {
    for path in files {
        if !classifier::is_supported_texture(path) {
            log::warn!("{} is not a png/jpg/jpeg/tga file", path.display());
        }
    }
}

/// Returns the process exit code.
fn run(command: Commands, quiet: bool) -> Result<i32, TextureError> {
    match command {
        Commands::Classify { files } => {
            warn_unsupported(&files);
            let batch = classify_batch(files);
            print_batch(&batch);
            Ok(0)
        }
        Commands::Export {
            mut files,
            output,
            bike,
            no_rename,
            no_transparency,
            slots,
            drop,
        } => {
            if let Some(payload) = drop {
                files.extend(split_drop_payload(&payload));
            }
            warn_unsupported(&files);

            let mut mapping = SourceMapping::new();
            if !files.is_empty() {
                let batch = classify_batch(files);
                if !quiet {
                    print_batch(&batch);
                }
                mapping = batch.mapping;
            }
            for (slot, path) in slots {
                if let Some(previous) = mapping.set(slot, path) {
                    log::info!("{} overrides {}", slot, previous.display());
                }
            }

            for (slot, path) in mapping.iter() {
                log::debug!("{:<22} {}", slot.label(), path.display());
            }

            let config = ExportConfig {
                identifier: bike.trim().to_string(),
                rename_enabled: !no_rename,
                transparency_enabled: !no_transparency,
                output_directory: output,
            };
            let report = export(&mapping, &config)?;
            if !quiet {
                print!("{}", report);
            }
            Ok(if report.has_failures() { 2 } else { 0 })
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging (suppressed if --quiet), RUST_LOG overrides the default
    if !cli.quiet {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    match run(cli.command, cli.quiet) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
