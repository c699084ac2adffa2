// Library exports for reuse by the CLI and other front ends
pub mod catalog;
pub mod cli;
pub mod config_file;
pub mod error;
pub mod image_processing;
pub mod json_output;
pub mod packager;
pub mod report;
pub mod session;
pub mod utils;

// Re-export commonly used types
pub use catalog::{all_specs, specs_for, Density, Dimensions, IconSpec, Idiom, Platform};
pub use cli::ResizeFilter;
pub use error::{IconError, NoticeLevel, Result};
pub use image_processing::{render, RenderOptions, RenderedIcon, Renderer, SourceImage};
pub use json_output::JsonMessage;
pub use packager::{build_archive, filename_for, list_archive_files, Archive, ArchiveArtifact};
pub use session::{Notice, Session, SharedSession};
