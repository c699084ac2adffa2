use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::catalog::{all_specs, specs_for, IconSpec, Platform};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeFilter {
    /// Nearest neighbour (hard pixel edges, good for pixel art)
    #[value(name = "nearest")]
    Nearest,
    /// Bilinear interpolation (fast, slightly soft)
    #[value(name = "bilinear")]
    Bilinear,
    /// Catmull-Rom bicubic (sharp, mild ringing)
    #[value(name = "catmull-rom")]
    CatmullRom,
    /// Lanczos with a 3-lobe window (best for downscaling photos and artwork)
    #[default]
    #[value(name = "lanczos3")]
    Lanczos3,
}

#[derive(Parser, Debug)]
#[command(
    name = "iconpack",
    about = "Generate iOS or Android app icons from a single image",
    long_about = "
iconpack - App Icon Generator

Resizes one source image into every icon size of the iOS or Android catalog and
packages the PNG files into a ZIP archive (iOSIcons.zip or AndroidIcons.zip).
The source is stretched to fill each target size; crop it to a square first if
the aspect ratio matters.

Example Usage:
  # iOS icons (default platform), archive written to the current directory
  iconpack -i logo.png

  # Android icons into ./dist with a preview table
  iconpack -i logo.png -p android -o dist --preview

  # Pixel art: keep hard edges
  iconpack -i sprite.png --filter nearest

  # Show the full catalog
  iconpack --list-catalog

  # List the files inside an existing archive
  iconpack --inspect dist/AndroidIcons.zip

  # Render everything but do not write the archive
  iconpack -i logo.png --dry-run --verbose"
)]
pub struct Args {
    /// Source image (PNG, JPEG, WebP, TIFF, ...)
    #[arg(
        short = 'i',
        long = "input",
        required_unless_present_any = ["list_catalog", "inspect", "config_file"],
        value_name = "FILE"
    )]
    pub input_path: Option<PathBuf>,

    /// Output directory for the archive
    #[arg(short = 'o', long = "output", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Target platform
    #[arg(short = 'p', long = "platform", default_value = "ios")]
    pub platform: Platform,

    /// Resampling filter used when scaling the source
    #[arg(long = "filter", default_value = "lanczos3", value_name = "FILTER")]
    pub filter: ResizeFilter,

    /// Print a table of the generated icons
    #[arg(long = "preview")]
    pub preview: bool,

    /// Print the icon catalog and exit
    #[arg(long = "list-catalog")]
    pub list_catalog: bool,

    /// List the files of an existing archive and exit
    #[arg(long = "inspect", value_name = "ZIP")]
    pub inspect: Option<PathBuf>,

    /// Overwrite the archive if it already exists
    #[arg(long = "force")]
    pub force: bool,

    /// Render icons but do not write the archive
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Emit progress and results as JSON lines on stdout
    #[arg(long = "json-progress")]
    pub json_progress: bool,

    /// JSON configuration file; command-line flags take precedence
    #[arg(long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    #[arg(skip)]
    pub explicit: ExplicitOptions,
}

/// Options whose value came from the command line rather than a clap default
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExplicitOptions {
    pub input: bool,
    pub output: bool,
    pub platform: bool,
    pub filter: bool,
    pub preview: bool,
    pub force: bool,
    pub dry_run: bool,
    pub verbose: bool,
}

impl ExplicitOptions {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let given = |id: &str| matches.value_source(id) == Some(ValueSource::CommandLine);
        Self {
            input: given("input_path"),
            output: given("output_dir"),
            platform: given("platform"),
            filter: given("filter"),
            preview: given("preview"),
            force: given("force"),
            dry_run: given("dry_run"),
            verbose: given("verbose"),
        }
    }
}

impl Args {
    /// Parse `itr` and record which options were given explicitly
    pub fn try_parse_with_sources<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(itr)?;
        let mut args = Self::from_arg_matches(&matches)?;
        args.explicit = ExplicitOptions::from_matches(&matches);
        Ok(args)
    }

    /// Parse the process arguments, exiting with clap's message on error
    pub fn parse_with_sources() -> Self {
        Self::try_parse_with_sources(std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    /// Path the archive is written to
    pub fn archive_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    /// Entries shown by `--list-catalog`: one platform when `-p` was given, all otherwise
    pub fn listed_specs(&self) -> Vec<IconSpec> {
        if self.explicit.platform {
            specs_for(self.platform)
        } else {
            all_specs().to_vec()
        }
    }
}


// Default implementation for tests
#[cfg(test)]
impl Default for Args {
    fn default() -> Self {
        Self {
            input_path: None,
            output_dir: PathBuf::from("."),
            platform: Platform::Ios,
            filter: ResizeFilter::Lanczos3,
            preview: false,
            list_catalog: false,
            inspect: None,
            force: false,
            dry_run: false,
            json_progress: false,
            config_file: None,
            verbose: false,
            explicit: ExplicitOptions::default(),
        }
    }
}
