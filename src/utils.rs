use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::cli::Args;
use crate::error::NoticeLevel;
use crate::session::Notice;

/// Create a styled progress bar
pub fn create_progress_bar(total: u64) -> Result<ProgressBar> {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.blue} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}",
        )?
        .progress_chars("#>-"),
    );
    Ok(pb)
}

/// Format duration in a human-readable way
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if total_secs >= 60 {
        let mins = total_secs / 60;
        let secs = total_secs % 60;
        format!("{}m {}s", mins, secs)
    } else if total_secs > 0 {
        format!("{}.{:03}s", total_secs, millis)
    } else {
        format!("{}ms", duration.as_millis())
    }
}

/// Format a byte count with a binary unit
pub fn format_bytes(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;

    let value = bytes as f64;
    if value >= MIB {
        format!("{:.1} MiB", value / MIB)
    } else if value >= KIB {
        format!("{:.1} KiB", value / KIB)
    } else {
        format!("{} B", bytes)
    }
}

/// Validate command line arguments
pub fn validate_inputs(args: &Args) -> Result<()> {
    if let Some(input_path) = &args.input_path {
        if !input_path.exists() {
            return Err(anyhow::anyhow!(
                "Input file does not exist: {}",
                input_path.display()
            ));
        }
        if !input_path.is_file() {
            return Err(anyhow::anyhow!(
                "Input path is not a file: {}",
                input_path.display()
            ));
        }
    }

    if args.output_dir.exists() && !args.output_dir.is_dir() {
        return Err(anyhow::anyhow!(
            "Output path exists but is not a directory: {}",
            args.output_dir.display()
        ));
    }

    if let Some(archive) = &args.inspect {
        if !archive.is_file() {
            return Err(anyhow::anyhow!(
                "Archive to inspect does not exist: {}",
                archive.display()
            ));
        }
    }

    Ok(())
}

/// Print verbose information if verbose mode is enabled
pub fn verbose_println(verbose: bool, message: &str) {
    if verbose {
        println!("{} {}", style("[VERBOSE]").dim(), message);
    }
}

/// Print warning message
pub fn warn_println(message: &str) {
    println!("{} {}", style("[WARNING]").yellow().bold(), message);
}

/// Print error message
pub fn error_println(message: &str) {
    eprintln!("{} {}", style("[ERROR]").red().bold(), message);
}

/// Print a notice with a style matching its level
pub fn print_notice(notice: &Notice) {
    let message = format!("{}: {}", notice.title, notice.description);
    match notice.level {
        NoticeLevel::Success => println!("{} {}", style("✓").green().bold(), message),
        NoticeLevel::Info => println!("{} {}", style("[INFO]").cyan(), message),
        NoticeLevel::Warning => warn_println(&message),
        NoticeLevel::Error => error_println(&message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
        assert_eq!(format_duration(Duration::from_secs(1)), "1.000s");
        assert_eq!(format_duration(Duration::from_secs(65)), "1m 5s");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KiB");
        assert_eq!(format_bytes(3 * 1024 * 1024 / 2), "1.5 MiB");
    }

    #[test]
    fn test_validate_missing_input() {
        let args = Args {
            input_path: Some(PathBuf::from("/definitely/not/here.png")),
            ..Default::default()
        };
        assert!(validate_inputs(&args).is_err());
    }

    #[test]
    fn test_validate_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("logo.png");
        std::fs::write(&input, b"bytes").unwrap();

        let args = Args {
            input_path: Some(input),
            output_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        assert!(validate_inputs(&args).is_ok());

        let args = Args {
            input_path: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        assert!(validate_inputs(&args).is_err());
    }

    #[test]
    fn test_validate_output_is_file() {
        let dir = tempfile::tempdir().unwrap();
        let not_a_dir = dir.path().join("out");
        std::fs::write(&not_a_dir, b"").unwrap();

        let args = Args {
            output_dir: not_a_dir,
            ..Default::default()
        };
        assert!(validate_inputs(&args).is_err());
    }
}
