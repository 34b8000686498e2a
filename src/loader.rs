//! Latency file loading.
//!
//! The format is always chosen by the caller; nothing here looks at file names.

use crate::error::LoadError;
use crate::model::InputFormat;
use std::path::Path;

/// A line that plain-mode loading could not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number.
    pub line: usize,
    pub content: String,
}

/// Samples in file order, plus whatever plain mode skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Loaded {
    pub samples: Vec<f64>,
    pub skipped: Vec<SkippedLine>,
}

/// Read `path` and parse it as `format`.
pub fn load_samples(path: &Path, format: InputFormat) -> Result<Loaded, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let loaded = parse_samples(&text, format)?;
    log::debug!(
        "loaded {} samples from {} as {:?} ({} skipped)",
        loaded.samples.len(),
        path.display(),
        format,
        loaded.skipped.len()
    );
    Ok(loaded)
}

/// Parse file contents that are already in memory.
pub fn parse_samples(text: &str, format: InputFormat) -> Result<Loaded, LoadError> {
    match format {
        InputFormat::Plain => Ok(parse_plain(text)),
        InputFormat::Log => parse_log(text).map(|samples| Loaded {
            samples,
            skipped: Vec::new(),
        }),
        InputFormat::Table => parse_table(text).map(|samples| Loaded {
            samples,
            skipped: Vec::new(),
        }),
    }
}

fn parse_value(token: &str) -> Option<f64> {
    token.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_plain(text: &str) -> Loaded {
    let mut loaded = Loaded::default();
    for (idx, line) in text.lines().enumerate() {
        match parse_value(line) {
            Some(v) => loaded.samples.push(v),
            None => {
                log::warn!("Could not convert line to a number: {}", line.trim());
                loaded.skipped.push(SkippedLine {
                    line: idx + 1,
                    content: line.to_string(),
                });
            }
        }
    }
    loaded
}

fn parse_log(text: &str) -> Result<Vec<f64>, LoadError> {
    let mut samples = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let token = line
            .trim()
            .split(',')
            .nth(1)
            .ok_or_else(|| LoadError::MissingColumn {
                line: idx + 1,
                content: line.to_string(),
            })?;
        let value = parse_value(token).ok_or_else(|| LoadError::InvalidValue {
            line: idx + 1,
            token: token.to_string(),
        })?;
        samples.push(value);
    }
    Ok(samples)
}

fn parse_table(text: &str) -> Result<Vec<f64>, LoadError> {
    let mut samples = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let data = line.split('#').next().unwrap_or_default();
        for token in data
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
        {
            let value = parse_value(token).ok_or_else(|| LoadError::InvalidValue {
                line: idx + 1,
                token: token.to_string(),
            })?;
            samples.push(value);
        }
    }
    Ok(samples)
}
