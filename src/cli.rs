use crate::cdf::EmpiricalCdf;
use crate::metrics::{self, PercentileMethod};
use crate::model::{CdfConfig, FormatArg, InputFormat, PlotConfig, PlotStyle, SparseSize};
use crate::sampler::{self, DenseRegion, SamplingPolicy};
use crate::{export, loader, text_summary};
use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "plot-latencies",
    version,
    about = "Plot latency samples over time as a line or stem chart"
)]
pub struct PlotCli {
    /// File with one latency value (nanoseconds) per line
    pub latency_file: PathBuf,

    /// Use a logarithmic y axis: true or false
    #[arg(required = true, action = clap::ArgAction::Set)]
    pub log_scale: bool,

    /// Draw one marker and vertical line per sample instead of a line
    #[arg(long)]
    pub stem: bool,

    /// Image to write (defaults to the input's base name with a .png extension)
    #[arg(short, long, conflicts_with = "show")]
    pub output: Option<PathBuf>,

    /// Show the plot in the terminal instead of writing an image
    #[arg(long)]
    pub show: bool,

    /// Resolution of the saved image (1 to 2400)
    #[arg(long, default_value_t = 300, value_parser = clap::value_parser!(u32).range(1..=2400))]
    pub dpi: u32,

    /// Input layout; auto reads one value per line
    #[arg(long, value_enum, default_value_t = FormatArg::Auto)]
    pub format: FormatArg,
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "latency-cdf",
    version,
    about = "Summarize latency samples and export a downsampled CDF as CSV"
)]
pub struct CdfCli {
    /// Latency file; `.log` files are read as `<label>,<latency>` lines
    pub input_file: PathBuf,

    /// CSV file to write
    pub output_file: PathBuf,

    /// Input layout; auto picks log for `.log` files and table otherwise
    #[arg(long, value_enum, default_value_t = FormatArg::Auto)]
    pub format: FormatArg,

    /// CDF fraction separating the dense region from the sparse one
    #[arg(long, default_value_t = 1.0)]
    pub threshold: f64,

    /// Which side of the threshold is kept in full
    #[arg(long, value_enum, default_value_t = DenseRegion::Above)]
    pub dense_region: DenseRegion,

    /// Approximate number of sparse points to keep
    #[arg(long, default_value_t = 2000, conflicts_with = "sparse_frac")]
    pub target_points: usize,

    /// Share of sparse points to keep, instead of --target-points
    #[arg(long)]
    pub sparse_frac: Option<f64>,

    /// Divide latencies by this before writing (1000 turns ns into us)
    #[arg(long, default_value_t = 1000.0)]
    pub unit_divisor: f64,

    /// Seed for the sparse sampling draw
    #[arg(long)]
    pub seed: Option<u64>,

    /// Interpolation used for the tail percentiles
    #[arg(long, value_enum, default_value_t = PercentileMethod::Linear)]
    pub percentile_method: PercentileMethod,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Set up `env_logger` with `info` as the default level; `RUST_LOG` overrides it.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();
}

/// Exit code for a failed argument parse: help and version are not failures.
pub fn usage_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

/// Build a `PlotConfig` from CLI arguments.
pub fn build_plot_config(args: &PlotCli) -> PlotConfig {
    let output = if args.show {
        None
    } else {
        Some(
            args.output
                .clone()
                .unwrap_or_else(|| crate::plot::default_output_path(&args.latency_file)),
        )
    };
    PlotConfig {
        input: args.latency_file.clone(),
        format: args
            .format
            .resolve(&args.latency_file, |_| InputFormat::Plain),
        style: if args.stem {
            PlotStyle::Stem
        } else {
            PlotStyle::Line
        },
        log_scale: args.log_scale,
        output,
        dpi: args.dpi,
    }
}

/// Build a `CdfConfig` from CLI arguments.
pub fn build_cdf_config(args: &CdfCli) -> CdfConfig {
    CdfConfig {
        input: args.input_file.clone(),
        output: args.output_file.clone(),
        format: args.format.resolve(&args.input_file, InputFormat::detect),
        threshold: args.threshold,
        dense_region: args.dense_region,
        sparse_size: match args.sparse_frac {
            Some(frac) => SparseSize::Fraction(frac),
            None => SparseSize::TargetPoints(args.target_points),
        },
        unit_divisor: args.unit_divisor,
        seed: args.seed,
        percentile_method: args.percentile_method,
        json: args.json,
    }
}

/// Sampling policy for a CDF with `cdf_len` points.
pub fn sampling_policy(cfg: &CdfConfig, cdf_len: usize) -> SamplingPolicy {
    let base = match cfg.sparse_size {
        SparseSize::TargetPoints(n) => SamplingPolicy::targeting(n, cdf_len),
        SparseSize::Fraction(sparse_frac) => SamplingPolicy {
            sparse_frac,
            ..SamplingPolicy::default()
        },
    };
    SamplingPolicy {
        threshold: cfg.threshold,
        dense_region: cfg.dense_region,
        ..base
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[cfg(feature = "plot")]
pub fn run_plot(args: PlotCli) -> Result<()> {
    let cfg = build_plot_config(&args);
    log::debug!("plot config: {:?}", cfg);

    let loaded = loader::load_samples(&cfg.input, cfg.format)
        .with_context(|| format!("failed to load {}", cfg.input.display()))?;
    if loaded.samples.is_empty() {
        anyhow::bail!("no latency samples in {}", cfg.input.display());
    }

    let scale = crate::plot::resolve_scale(&loaded.samples, cfg.log_scale);
    match cfg.output.as_deref() {
        Some(path) => {
            crate::render::render_png(&loaded.samples, cfg.style, scale, path, cfg.dpi)
                .with_context(|| format!("failed to render {}", path.display()))?;
            println!("Plot saved to {}", path.display());
        }
        None => show_interactive(&loaded.samples, cfg.style, scale)?,
    }
    Ok(())
}

#[cfg(all(feature = "plot", feature = "tui"))]
fn show_interactive(samples: &[f64], style: PlotStyle, scale: crate::plot::AxisScale) -> Result<()> {
    crate::tui::show(samples, style, scale)
}

#[cfg(all(feature = "plot", not(feature = "tui")))]
fn show_interactive(_samples: &[f64], _style: PlotStyle, _scale: crate::plot::AxisScale) -> Result<()> {
    // Fallback when built without TUI support.
    Err(anyhow::anyhow!(
        "interactive display needs the `tui` feature; use --output to save an image"
    ))
}

pub fn run_cdf(args: CdfCli) -> Result<()> {
    let cfg = build_cdf_config(&args);
    log::debug!("cdf config: {:?}", cfg);
    export::validate_divisor(cfg.unit_divisor).context("invalid --unit-divisor")?;

    let loaded = loader::load_samples(&cfg.input, cfg.format)
        .with_context(|| format!("failed to load {}", cfg.input.display()))?;
    let summary = metrics::compute_latency_summary(&loaded.samples, cfg.percentile_method)
        .with_context(|| format!("no latency samples in {}", cfg.input.display()))?;

    if !cfg.json {
        for line in text_summary::build_text_summary(&summary).lines {
            println!("{}", line);
        }
    }

    let cdf = EmpiricalCdf::from_samples(&loaded.samples);
    let policy = sampling_policy(&cfg, cdf.len());
    let mut rng = seeded_rng(cfg.seed);
    let sampled = sampler::sample_cdf(cdf.points(), &policy, &mut rng)
        .context("failed to downsample CDF")?;

    export::export_cdf_csv(&cfg.output, &sampled, cfg.unit_divisor)
        .with_context(|| format!("failed to export CSV to {}", cfg.output.display()))?;
    log::info!(
        "wrote {} of {} CDF points to {}",
        sampled.len(),
        cdf.len(),
        cfg.output.display()
    );

    if cfg.json {
        let report = text_summary::JsonReport {
            config: &cfg,
            summary: &summary,
            cdf_points: cdf.len(),
            sampled_points: sampled.len(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}
