use crate::metrics::PercentileMethod;
use crate::sampler::DenseRegion;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How a latency file is laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum InputFormat {
    /// One value per line; unparseable lines are skipped with a warning.
    Plain,
    /// `<anything>,<value>` per line; any malformed line is fatal.
    Log,
    /// Whitespace or comma separated numeric table, loaded in bulk.
    Table,
}

impl InputFormat {
    /// Resolve the format of a CDF input from its file name: `.log` files are
    /// two-column logs, everything else is a numeric table.
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("log") => InputFormat::Log,
            _ => InputFormat::Table,
        }
    }
}

/// Format selection as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FormatArg {
    #[default]
    Auto,
    Plain,
    Log,
    Table,
}

impl FormatArg {
    /// Resolve to a concrete format, falling back to `auto` when asked.
    pub fn resolve(self, path: &Path, auto: impl FnOnce(&Path) -> InputFormat) -> InputFormat {
        match self {
            FormatArg::Auto => auto(path),
            FormatArg::Plain => InputFormat::Plain,
            FormatArg::Log => InputFormat::Log,
            FormatArg::Table => InputFormat::Table,
        }
    }
}

/// One point of an empirical CDF.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CdfPoint {
    pub value: f64,
    /// Fraction of samples at or below `value`, in `(0, 1]`.
    pub fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencySummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub p90: f64,
    pub p99: f64,
    pub p9999: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PlotStyle {
    /// Samples joined by a line, in file order.
    #[default]
    Line,
    /// One marker and vertical line per sample.
    Stem,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlotConfig {
    pub input: PathBuf,
    pub format: InputFormat,
    pub style: PlotStyle,
    pub log_scale: bool,
    /// Rasterize to this path; `None` shows the plot interactively.
    pub output: Option<PathBuf>,
    pub dpi: u32,
}

/// Size of the sparse sample, either as a point budget or a raw fraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SparseSize {
    /// Keep roughly this many sparse points: `sparse_frac = n / len(cdf)`.
    TargetPoints(usize),
    Fraction(f64),
}

#[derive(Debug, Clone, Serialize)]
pub struct CdfConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: InputFormat,
    pub threshold: f64,
    pub dense_region: DenseRegion,
    pub sparse_size: SparseSize,
    /// Written latencies are `value / unit_divisor` (ns -> us by default).
    pub unit_divisor: f64,
    pub seed: Option<u64>,
    pub percentile_method: PercentileMethod,
    pub json: bool,
}
