use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};

use prior_depth_rs::depth_pipeline::{
    ColorMap, ConversionConfig, ImageWriter, NpyReader, NpyToTiffPipeline, OutputMode, Sample,
    StandardTiffWriter, TiffCompression,
};
use prior_depth_rs::logger;

#[derive(Parser)]
#[command(name = "prior-depth", about = "Decode NPY depth data and render it as TIFF")]
struct Cli {
    /// TIFF compression
    #[arg(long, value_enum, default_value_t = CompressionArg::None, global = true)]
    compression: CompressionArg,

    /// Log timing of each pipeline step
    #[arg(long, global = true)]
    timings: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render an NPY array
    Render {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, value_enum, default_value_t = ModeArg::Native)]
        colormap: ModeArg,
    },
    /// Recolor a prior depth NPY with the ramp (RGB priors use their red channel)
    Prior { input: PathBuf, output: PathBuf },
    /// Render the RGB image and recolored prior of a sample directory
    Sample { dir: PathBuf, out_dir: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Native,
    Ramp,
    Grayscale,
}

impl From<ModeArg> for OutputMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Native => OutputMode::Native,
            ModeArg::Ramp => OutputMode::Colorized(ColorMap::Ramp),
            ModeArg::Grayscale => OutputMode::Colorized(ColorMap::Grayscale),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CompressionArg {
    None,
    Lzw,
    Deflate,
}

impl From<CompressionArg> for TiffCompression {
    fn from(compression: CompressionArg) -> Self {
        match compression {
            CompressionArg::None => TiffCompression::None,
            CompressionArg::Lzw => TiffCompression::Lzw,
            CompressionArg::Deflate => TiffCompression::Deflate,
        }
    }
}

fn convert(input: &Path, output: &Path, config: ConversionConfig, timings: bool) -> anyhow::Result<()> {
    let pipeline = NpyToTiffPipeline::new(config);
    if !timings {
        return pipeline
            .convert_file(input, output)
            .with_context(|| format!("converting {}", input.display()));
    }

    pipeline
        .convert_file_with_timings(input, output)
        .with_context(|| format!("converting {}", input.display()))?
        .log_summary();
    Ok(())
}

fn render_sample(dir: &Path, out_dir: &Path, config: &ConversionConfig) -> anyhow::Result<()> {
    let sample = Sample::discover(dir)?;
    let loaded = sample.load(&NpyReader)?;
    let inputs = loaded.model_inputs()?;
    info!(
        "Model inputs ready: rgb {:?}, prior_depth {:?}",
        inputs.rgb_shape(),
        inputs.prior_shape()
    );

    std::fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let outputs = [
        ("rgb.tiff", loaded.rgb.clone()),
        ("prior.tiff", loaded.prior_preview(ColorMap::Ramp)),
    ];
    for (name, image) in outputs {
        let path = out_dir.join(name);
        let mut file = std::fs::File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        StandardTiffWriter.write_image(&image, &mut file, config)?;
        info!(output = %path.display(), "Wrote {}x{} image", image.width(), image.height());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let cli = Cli::parse();

    let builder = ConversionConfig::builder().compression(cli.compression.into());

    let result = match &cli.command {
        Command::Render {
            input,
            output,
            colormap,
        } => convert(input, output, builder.output_mode((*colormap).into()).build(), cli.timings),
        Command::Prior { input, output } => convert(
            input,
            output,
            builder.output_mode(OutputMode::Colorized(ColorMap::Ramp)).build(),
            cli.timings,
        ),
        Command::Sample { dir, out_dir } => render_sample(dir, out_dir, &builder.build()),
    };

    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}
