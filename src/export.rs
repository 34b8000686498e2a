//! CSV export of (sampled) CDF curves.

use crate::error::ExportError;
use crate::model::CdfPoint;
use std::io::Write;
use std::path::Path;

pub const CSV_HEADER: [&str; 2] = ["latency", "cdf"];

/// Write `points` to `path` as `latency,cdf` rows.
pub fn export_cdf_csv(path: &Path, points: &[CdfPoint], unit_divisor: f64) -> Result<(), ExportError> {
    // Validate before `File::create` truncates an existing output.
    validate_divisor(unit_divisor)?;
    let file = std::fs::File::create(path).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    write_cdf_csv(file, points, unit_divisor)
}

/// Write `points` to any sink. Latencies are divided by `unit_divisor` and
/// printed with four decimals; fractions keep their shortest round-trip form.
pub fn write_cdf_csv<W: Write>(sink: W, points: &[CdfPoint], unit_divisor: f64) -> Result<(), ExportError> {
    validate_divisor(unit_divisor)?;
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(sink);
    wtr.write_record(CSV_HEADER)?;
    for p in points {
        wtr.write_record([
            format!("{:.4}", p.value / unit_divisor),
            format_fraction(p.fraction),
        ])?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// A divisor must be finite and strictly positive.
pub fn validate_divisor(unit_divisor: f64) -> Result<(), ExportError> {
    if !unit_divisor.is_finite() || unit_divisor <= 0.0 {
        return Err(ExportError::InvalidDivisor(unit_divisor));
    }
    Ok(())
}

fn format_fraction(fraction: f64) -> String {
    format!("{:?}", fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(points: &[CdfPoint], divisor: f64) -> String {
        let mut buf = Vec::new();
        write_cdf_csv(&mut buf, points, divisor).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn writes_header_and_rows() {
        let points = [
            CdfPoint {
                value: 1234.0,
                fraction: 0.25,
            },
            CdfPoint {
                value: 98765.0,
                fraction: 1.0,
            },
        ];
        assert_eq!(
            render(&points, 1000.0),
            "latency,cdf\n1.2340,0.25\n98.7650,1.0\n"
        );
    }

    #[test]
    fn divisor_of_one_keeps_units() {
        let points = [CdfPoint {
            value: 3.0,
            fraction: 1.0 / 3.0,
        }];
        assert_eq!(render(&points, 1.0), "latency,cdf\n3.0000,0.3333333333333333\n");
    }

    #[test]
    fn empty_curve_is_header_only() {
        assert_eq!(render(&[], 1000.0), "latency,cdf\n");
    }

    #[test]
    fn bad_divisor_leaves_existing_file_alone() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "previous results\n").unwrap();

        for divisor in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                export_cdf_csv(&path, &[], divisor),
                Err(ExportError::InvalidDivisor(_))
            ));
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous results\n");
    }

    #[test]
    fn rejects_zero_divisor() {
        let mut buf = Vec::new();
        assert!(matches!(
            write_cdf_csv(&mut buf, &[], 0.0),
            Err(ExportError::InvalidDivisor(_))
        ));
    }
}
