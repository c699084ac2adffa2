use anyhow::{Context, Result};
use console::style;
use std::time::Instant;

use iconpack::catalog::specs_for;
use iconpack::cli::Args;
use iconpack::image_processing::{RenderOptions, SourceImage};
use iconpack::packager::{archive_file_name, list_archive_files};
use iconpack::report::{catalog_table, preview_table};
use iconpack::utils::{
    create_progress_bar, format_bytes, format_duration, print_notice, validate_inputs,
    verbose_println,
};
use iconpack::{IconError, JsonMessage, Notice, Session};

/// Report a failed action and turn it into the process error
fn action_failed(err: IconError, json: bool) -> anyhow::Error {
    if json {
        JsonMessage::notice(&Notice::from(&err));
    }
    anyhow::Error::new(err)
}

fn emit_notice(notice: &Notice, json: bool) {
    if json {
        JsonMessage::notice(notice);
    } else {
        print_notice(notice);
    }
}

/// Handle --inspect: list the files stored in an existing archive
fn handle_inspect(args: &Args) -> Result<()> {
    let Some(path) = &args.inspect else {
        return Ok(());
    };
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read archive: {}", path.display()))?;
    let files = list_archive_files(&bytes)
        .with_context(|| format!("Failed to read archive: {}", path.display()))?;

    println!(
        "{}",
        style(format!("{} ({} files)", path.display(), files.len()))
            .bold()
            .cyan()
    );
    for file in files {
        println!("  {}", file);
    }
    Ok(())
}

fn main() -> Result<()> {
    let start_time = Instant::now();
    let mut args = Args::parse_with_sources();
    args.load_and_merge_config()?;
    let json = args.json_progress;

    if !json {
        println!("{}", style("iconpack - App Icon Generator").bold().blue());
        println!();
    }

    if args.list_catalog {
        catalog_table(&args.listed_specs()).printstd();
        return Ok(());
    }

    validate_inputs(&args)?;

    if args.inspect.is_some() {
        return handle_inspect(&args);
    }

    let verbose = args.verbose && !json;
    let input_path = args
        .input_path
        .clone()
        .context("No input image specified (use -i/--input)")?;

    if verbose {
        println!("{}", style("Configuration:").bold());
        println!("  Input: {}", input_path.display());
        println!("  Output directory: {}", args.output_dir.display());
        println!("  Platform: {}", args.platform);
        println!("  Filter: {:?}", args.filter);
        if args.dry_run {
            println!("  Dry run mode: enabled (no archive will be written)");
        }
        println!();
    }

    let mut session = Session::new(RenderOptions {
        filter: args.filter,
    });
    session.select_platform(args.platform);

    let archive_path = args.archive_path(&archive_file_name(args.platform));
    if !args.dry_run && archive_path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Archive already exists: {} (use --force to overwrite)",
            archive_path.display()
        ));
    }

    // Upload
    let source = SourceImage::open(&input_path)
        .map_err(|e| action_failed(e, json))
        .with_context(|| format!("Failed to load image: {}", input_path.display()))?;
    let notice = session.set_image(source);
    emit_notice(&notice, json);

    // Generate
    let total = specs_for(args.platform).len();
    let progress = if json {
        None
    } else {
        Some(create_progress_bar(total as u64)?)
    };
    let notice = session
        .generate_with_progress(|done, total, icon| {
            if let Some(pb) = &progress {
                pb.inc(1);
                pb.set_message(icon.label());
                pb.suspend(|| {
                    verbose_println(
                        verbose,
                        &format!(
                            "Rendered {} ({}, {})",
                            icon.label(),
                            icon.dimensions,
                            format_bytes(icon.png.len())
                        ),
                    )
                });
            } else {
                JsonMessage::icon_rendered(icon).emit();
                JsonMessage::progress(done, total, icon.label());
            }
        })
        .map_err(|e| action_failed(e, json))?;
    if let Some(pb) = &progress {
        pb.finish_with_message("done");
    }
    emit_notice(&notice, json);

    if args.preview && !json {
        println!();
        preview_table(session.current_icons()).printstd();
    }

    // Download
    let artifact = session.download().map_err(|e| action_failed(e, json))?;
    let entries = session.current_icons().len();

    if args.dry_run {
        verbose_println(verbose, "Dry run mode: skipping archive write");
    } else {
        std::fs::create_dir_all(&args.output_dir).context("Failed to create output directory")?;
        std::fs::write(&archive_path, &artifact.bytes)
            .with_context(|| format!("Failed to write archive: {}", archive_path.display()))?;
    }

    let elapsed = start_time.elapsed();
    if json {
        JsonMessage::Archive {
            path: archive_path.display().to_string(),
            file_name: artifact.file_name.clone(),
            entries,
            bytes: artifact.bytes.len(),
            written: !args.dry_run,
        }
        .emit();
        JsonMessage::summary(args.platform, entries, elapsed.as_secs_f64());
        return Ok(());
    }

    emit_notice(&Notice::archive_ready(&artifact, entries), json);
    println!();
    let header = if args.dry_run {
        style("Dry Run Results Summary:").bold().cyan()
    } else {
        style("Results Summary:").bold().green()
    };
    println!("{}", header);
    println!("  Platform: {}", style(args.platform).bold());
    println!("  Icons: {}", style(entries).bold().green());
    let archive_label = if args.dry_run { "Would write" } else { "Archive" };
    println!(
        "  {}: {} ({})",
        archive_label,
        style(archive_path.display()).bold(),
        format_bytes(artifact.bytes.len())
    );
    println!("  Total time: {}", format_duration(elapsed));

    Ok(())
}
