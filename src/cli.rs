use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use virtual_image::{Image, ImageError, ImageFormat, ImageOptions, PngBaseline, VirtualImage};

#[derive(Parser)]
#[command(name = "vimg")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect and copy PNG/JPEG files without decoding them", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print dimensions read from the container framing
    Info {
        path: PathBuf,

        /// Source format; guessed from the extension or magic bytes if absent
        #[arg(short, long)]
        format: Option<ImageFormat>,

        /// Read PNG dimensions from the IHDR chunk of a full file
        #[arg(long)]
        ihdr: bool,

        #[arg(long)]
        json: bool,
    },

    /// Re-emit an image's bytes through the image contract
    Copy {
        input: PathBuf,

        output: PathBuf,

        #[arg(short, long)]
        format: Option<ImageFormat>,

        #[arg(long)]
        ihdr: bool,

        /// Target format; must match the source
        #[arg(long)]
        to: Option<ImageFormat>,

        #[arg(long, default_value = "1.0")]
        quality: f32,

        /// Save through the asynchronous sink
        #[arg(long = "async")]
        use_async: bool,
    },
}

impl Cli {
    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            "debug"
        } else if self.verbose {
            "info"
        } else {
            "warn"
        }
    }
}

impl Commands {
    /// Runs the command; human-readable output goes to `out`.
    pub fn run(self, out: &mut dyn Write) -> Result<()> {
        match self {
            Commands::Info {
                path,
                format,
                ihdr,
                json,
            } => {
                let image = load(&path, format, ihdr)?;
                write_info(&path, &image, json, out)
            }
            Commands::Copy {
                input,
                output,
                format,
                ihdr,
                to,
                quality,
                use_async,
            } => {
                let image = load(&input, format, ihdr)?;
                let target = to.unwrap_or(image.format());
                if use_async {
                    copy_async(&image, &output, target, quality)?;
                } else {
                    image
                        .save_to_path(&output, target, quality)
                        .with_context(|| format!("Failed to save {}", output.display()))?;
                }
                tracing::info!(
                    input = %input.display(),
                    output = %output.display(),
                    bytes = image.bytes().len(),
                    "copied"
                );
                Ok(())
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InfoReport {
    pub path: PathBuf,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub size: usize,
}

impl InfoReport {
    pub fn new(path: &Path, image: &VirtualImage) -> Self {
        let dimensions = image.dimensions();
        Self {
            path: path.to_path_buf(),
            format: image.format(),
            width: dimensions.width,
            height: dimensions.height,
            size: image.bytes().len(),
        }
    }
}

/// Explicit flag first, then file extension, then magic bytes.
pub fn resolve_format(
    explicit: Option<ImageFormat>,
    path: &Path,
    data: &[u8],
) -> Option<ImageFormat> {
    explicit
        .or_else(|| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .and_then(ImageFormat::from_extension)
        })
        .or_else(|| ImageFormat::sniff(data))
}

fn load(path: &Path, format: Option<ImageFormat>, ihdr: bool) -> Result<VirtualImage> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let Some(format) = resolve_format(format, path, &data) else {
        bail!(
            "Cannot tell the format of {}; pass --format png|jpeg",
            path.display()
        );
    };

    let baseline = if ihdr {
        PngBaseline::IhdrPayload
    } else {
        PngBaseline::BufferStart
    };
    let options = ImageOptions::new()
        .with_format(format)
        .with_png_baseline(baseline);

    VirtualImage::with_options(data, options)
        .with_context(|| format!("Failed to read dimensions from {}", path.display()))
}

fn write_info(path: &Path, image: &VirtualImage, json: bool, out: &mut dyn Write) -> Result<()> {
    let report = InfoReport::new(path, image);

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        writeln!(out, "{}", report.path.display())?;
        writeln!(out, "  Format: {}", report.format)?;
        writeln!(out, "  Size:   {}x{}", report.width, report.height)?;
        writeln!(out, "  Bytes:  {}", report.size)?;
        if image.dimensions().is_empty() {
            writeln!(out, "  (no dimension marker found)")?;
        }
    }
    Ok(())
}

fn copy_async(image: &VirtualImage, output: &Path, target: ImageFormat, quality: f32) -> Result<()> {
    if target != image.format() {
        return Err(ImageError::UnsupportedConversion {
            from: image.format(),
            to: target,
        })
        .context("Refusing to create output");
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    runtime.block_on(async {
        let mut file = tokio::fs::File::create(output)
            .await
            .with_context(|| format!("Failed to create {}", output.display()))?;
        image
            .save_async(&mut file, target, quality)
            .await
            .with_context(|| format!("Failed to save {}", output.display()))?;
        file.flush().await?;
        anyhow::Ok(())
    })
}
