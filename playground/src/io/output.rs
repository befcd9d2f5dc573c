//! Output formatting and logging utilities

use basis::Plane;
use color_eyre::eyre::{Result, WrapErr};
use nalgebra::DMatrix;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::time::SystemTime as StdSystemTime;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    fmt::format::Writer, fmt::layer, fmt::time::FormatTime, layer::SubscriberExt,
    util::SubscriberInitExt, Layer, Registry,
};

/// Custom time formatter that shows only seconds
struct SecondPrecisionTimer;

impl FormatTime for SecondPrecisionTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let now = StdSystemTime::now();
        let duration = now
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default();

        // Format as HH:MM:SS (only seconds precision)
        let total_seconds = duration.as_secs();
        let hours = (total_seconds / 3600) % 24;
        let minutes = (total_seconds / 60) % 60;
        let seconds = total_seconds % 60;

        write!(w, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Setup output logging to file or stdout
pub fn setup_output(output_path: Option<&String>, verbose: u8) -> Result<()> {
    let level = level_for(verbose);
    match output_path {
        Some(path) => {
            let log = File::create(path)
                .wrap_err_with(|| format!("Could not create output file: {}", path))?;
            let file_layer = layer()
                .with_writer(log)
                .with_timer(SecondPrecisionTimer)
                .with_ansi(false)
                .with_filter(level);
            Registry::default().with(file_layer).init();
            info!("Output will be written to: {}", path);
        }
        None => {
            let stdout_layer = layer()
                .with_writer(std::io::stdout)
                .with_timer(SecondPrecisionTimer)
                .with_ansi(true)
                .with_filter(level);
            Registry::default().with(stdout_layer).init();
        }
    }
    Ok(())
}

/// Write a sampled slice as a whitespace separated table: one line per
/// sample, `a b value` with `a`, `b` the in-plane coordinates.
pub fn write_plane<W: Write>(
    writer: &mut W,
    values: &DMatrix<f64>,
    plane: Plane,
    offset: f64,
    bounds: [f64; 2],
) -> Result<()> {
    let axis = basis::linspace(bounds[0], bounds[1], values.nrows());
    let (first, second) = match plane {
        Plane::X => ("y", "z"),
        Plane::Y => ("x", "z"),
        Plane::Z => ("x", "y"),
    };
    writeln!(writer, "# slice normal to {:?} at {:.6} bohr", plane, offset)?;
    writeln!(writer, "# {} {} value", first, second)?;
    for (i, a) in axis.iter().enumerate() {
        for (j, b) in axis.iter().enumerate() {
            writeln!(writer, "{:.6} {:.6} {:.10e}", a, b, values[(i, j)])?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_plane() {
        let values = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let mut out = Vec::new();
        write_plane(&mut out, &values, Plane::Z, 0.5, [-1.0, 1.0]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2 + 4);
        assert_eq!(lines[1], "# x y value");
        assert_eq!(lines[3], "-1.000000 1.000000 2.0000000000e0");
        assert_eq!(lines[4], "1.000000 -1.000000 3.0000000000e0");
    }

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(0), LevelFilter::INFO);
        assert_eq!(level_for(1), LevelFilter::DEBUG);
        assert_eq!(level_for(5), LevelFilter::TRACE);
    }
}
