//! Output formatting and logging utilities

use crate::ccd_impl::{CcdOutcome, ConvergenceStatus};
use color_eyre::eyre::Result;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::time::SystemTime as StdSystemTime;
use tracing::info;
use tracing_subscriber::{
    fmt::format::Writer, fmt::layer, fmt::time::FormatTime, layer::SubscriberExt,
    util::SubscriberInitExt, Registry,
};

/// Custom time formatter that shows only seconds
struct SecondPrecisionTimer;

impl FormatTime for SecondPrecisionTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let now = StdSystemTime::now();
        let duration = now
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default();

        let total_seconds = duration.as_secs();
        let hours = (total_seconds / 3600) % 24;
        let minutes = (total_seconds / 60) % 60;
        let seconds = total_seconds % 60;

        write!(w, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

/// Where log records end up
enum LogTarget {
    File(File, String),
    Stdout,
}

/// Open the requested log file, falling back to stdout when it cannot be created.
fn open_log_target(output_path: Option<&String>) -> LogTarget {
    match output_path {
        Some(path) => match File::create(path) {
            Ok(log) => LogTarget::File(log, path.clone()),
            Err(err) => {
                eprintln!(
                    "Could not create output file {}: {}; logging to stdout",
                    path, err
                );
                LogTarget::Stdout
            }
        },
        None => LogTarget::Stdout,
    }
}

/// Setup output logging to file or stdout
pub fn setup_output(output_path: Option<&String>) {
    match open_log_target(output_path) {
        LogTarget::File(log, path) => {
            let file_layer = layer()
                .with_writer(log)
                .with_timer(SecondPrecisionTimer)
                .with_ansi(false);
            Registry::default().with(file_layer).init();
            info!("Output will be written to: {}", path);
        }
        LogTarget::Stdout => {
            let stdout_layer = layer()
                .with_writer(std::io::stdout)
                .with_timer(SecondPrecisionTimer)
                .with_ansi(true);
            Registry::default().with(stdout_layer).init();
            info!("Output will be printed to stdout");
        }
    }
}

/// Write a plain-text summary of a CCD run
pub fn write_summary<W: Write>(
    writer: &mut W,
    outcome: &CcdOutcome,
    reference_energy: Option<f64>,
) -> Result<()> {
    let status = match outcome.status {
        ConvergenceStatus::Converged => "converged",
        ConvergenceStatus::MaxIterationsExceeded => "iteration-limit-exceeded",
    };
    writeln!(writer, "CCD status:             {}", status)?;
    writeln!(writer, "Iterations:             {}", outcome.iterations)?;
    writeln!(writer, "Final |ΔE|:             {:.3e}", outcome.energy_diff)?;
    writeln!(writer, "MBPT2 energy:           {:.10}", outcome.mbpt2_energy)?;
    writeln!(writer, "CCD correlation energy: {:.10}", outcome.energy)?;
    if let Some(e_ref) = reference_energy {
        writeln!(writer, "Reference energy:       {:.10}", e_ref)?;
        writeln!(writer, "Total CCD energy:       {:.10}", e_ref + outcome.energy)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwritable_log_path_falls_back_to_stdout() {
        let path = std::env::temp_dir()
            .join("ccd-missing-dir")
            .join("nested")
            .join("run.log")
            .to_string_lossy()
            .into_owned();
        assert!(matches!(open_log_target(Some(&path)), LogTarget::Stdout));
        assert!(matches!(open_log_target(None), LogTarget::Stdout));
    }

    #[test]
    fn test_log_file_is_created() {
        let path = std::env::temp_dir()
            .join(format!("ccd-log-{}.log", std::process::id()))
            .to_string_lossy()
            .into_owned();
        match open_log_target(Some(&path)) {
            LogTarget::File(_, opened) => assert_eq!(opened, path),
            LogTarget::Stdout => panic!("expected a log file at {}", path),
        }
        let _ = std::fs::remove_file(&path);
    }
}
