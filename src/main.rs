use clap::{Parser, Subcommand};
use photoprep::batch::{self, FailedEntry, PhotoInput};
use photoprep::imaging::{read_orientation, ImageCodec, RustBackend};
use photoprep::pipeline::PhotoPipeline;
use photoprep::{config, output};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "photoprep")]
#[command(about = "Prepare listing photos: crop, normalize, and compress for upload")]
#[command(long_about = "\
Prepare listing photos: crop, normalize, and compress for upload

Every photo is rotated upright (EXIF), center-cropped to the configured
aspect ratio, and compressed to fit the byte budget. The photo named with
--main-photo is additionally resized to the exact main-image dimensions.

Output is one JPEG per input photo plus a report.json describing what was
produced, including any photos that could not be brought under budget.

Run 'photoprep gen-config' to generate a documented photoprep.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (defaults to photoprep.toml in the current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Prepare photos (files or directories) for upload
    Prepare {
        /// Photo files or directories to prepare
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(long, default_value = "prepared")]
        out: PathBuf,

        /// The main listing photo (must also appear in the inputs)
        #[arg(long)]
        main_photo: Option<PathBuf>,

        /// Override the byte budget from config
        #[arg(long)]
        budget: Option<usize>,
    },
    /// Show a photo's dimensions and EXIF orientation without processing it
    Inspect {
        /// Photo file
        file: PathBuf,
    },
    /// Print a stock photoprep.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_config_file(path)?,
        None => config::load_config(Path::new("."))?,
    };

    match cli.command {
        Command::Prepare {
            inputs,
            out,
            main_photo,
            budget,
        } => {
            init_thread_pool(&config.processing);

            let mut settings = config.pipeline_settings();
            if let Some(budget) = budget {
                settings.budget_bytes = budget;
            }

            let files = collect_photo_files(&inputs);
            if files.is_empty() {
                return Err("no photo files found in the given inputs".into());
            }

            let (photo_inputs, unreadable) = read_photo_inputs(&files, main_photo.as_deref());

            let pipeline = PhotoPipeline::new(RustBackend, settings);
            let mut result = batch::prepare_batch(&pipeline, photo_inputs);
            result.failures.extend(unreadable);

            std::fs::create_dir_all(&out)?;
            for prepared in &result.photos {
                let stem = Path::new(&prepared.id)
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| prepared.id.clone());
                std::fs::write(out.join(format!("{stem}.jpg")), &prepared.photo.data)?;
            }

            let report = result.report();
            let json = serde_json::to_string_pretty(&report)?;
            std::fs::write(out.join("report.json"), json)?;
            output::print_report(&report);
        }
        Command::Inspect { file } => {
            let data = std::fs::read(&file)?;
            let image = RustBackend.decode(&data)?;
            let orientation = read_orientation(&data);
            output::print_inspect(
                &file,
                data.len(),
                (image.width(), image.height()),
                orientation,
            );
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

/// Read each file into a [`PhotoInput`], recording unreadable files as
/// per-photo failures instead of aborting the batch.
fn read_photo_inputs(
    files: &[PathBuf],
    main_photo: Option<&Path>,
) -> (Vec<PhotoInput>, Vec<FailedEntry>) {
    let mut inputs = Vec::with_capacity(files.len());
    let mut failures = Vec::new();
    for path in files {
        match std::fs::read(path) {
            Ok(bytes) => inputs.push(PhotoInput {
                id: file_name(path),
                bytes,
                is_main: main_photo == Some(path.as_path()),
                crop: None,
            }),
            Err(e) => failures.push(FailedEntry {
                id: file_name(path),
                error: format!("could not read file: {e}"),
            }),
        }
    }
    (inputs, failures)
}

/// Expand the input list: files pass through, directories are walked for
/// photo files (by extension), sorted for stable ordering.
fn collect_photo_files(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(input)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .map(|e| e.into_path())
                .filter(|p| has_photo_extension(p))
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(input.clone());
        }
    }
    files
}

fn has_photo_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| {
            matches!(
                e.to_ascii_lowercase().as_str(),
                "jpg" | "jpeg" | "png" | "webp"
            )
        })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
