use crate::catalog::Platform;
use crate::cli::{Args, ResizeFilter};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Saved settings file
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    pub name: Option<String>,
    pub config: IconConfigJson,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconConfigJson {
    pub input_path: Option<String>,
    pub output_path: Option<String>,
    pub platform: Option<Platform>,
    pub filter: Option<ResizeFilter>,
    pub preview: Option<bool>,
    pub force: Option<bool>,
    pub dry_run: Option<bool>,
    pub verbose: Option<bool>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

impl Args {
    /// Load configuration from a JSON file and merge with command-line arguments
    /// Command-line arguments take precedence over config file values
    pub fn load_and_merge_config(&mut self) -> Result<()> {
        if let Some(config_path) = self.config_file.clone() {
            let config = ConfigFile::load(&config_path)?;
            self.merge_from_config(config.config);

            if self.verbose && !self.json_progress {
                eprintln!("Loaded configuration from: {:?}", config_path);
            }
        }
        Ok(())
    }

    /// Apply config values for every option not set on the command line
    pub fn merge_from_config(&mut self, config: IconConfigJson) {
        let explicit = self.explicit;

        if !explicit.input {
            if let Some(input) = config.input_path {
                self.input_path = Some(PathBuf::from(input));
            }
        }

        if !explicit.output {
            if let Some(output) = config.output_path {
                self.output_dir = PathBuf::from(output);
            }
        }

        if !explicit.platform {
            if let Some(platform) = config.platform {
                self.platform = platform;
            }
        }

        if !explicit.filter {
            if let Some(filter) = config.filter {
                self.filter = filter;
            }
        }

        if !explicit.preview {
            self.preview = config.preview.unwrap_or(self.preview);
        }

        if !explicit.force {
            self.force = config.force.unwrap_or(self.force);
        }

        if !explicit.dry_run {
            self.dry_run = config.dry_run.unwrap_or(self.dry_run);
        }

        if !explicit.verbose {
            self.verbose = config.verbose.unwrap_or(self.verbose);
        }
    }
}
