//! Archive naming and ZIP packaging of rendered icons.
//!
//! Every archive holds one folder (`iOSIcons` or `AndroidIcons`) with one PNG
//! per icon. Filenames must be unique inside an archive; a collision aborts
//! packaging instead of replacing the earlier entry.

use std::collections::HashSet;
use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

use crate::catalog::{Platform, PlatformTag};
use crate::error::{IconError, Result};
use crate::image_processing::RenderedIcon;

/// Folder label used inside the archive and for its suggested name
pub fn folder_label(platform: Platform) -> &'static str {
    match platform {
        Platform::Ios => "iOSIcons",
        Platform::Android => "AndroidIcons",
    }
}

/// Suggested download name, e.g. `iOSIcons.zip`
pub fn archive_file_name(platform: Platform) -> String {
    format!("{}.zip", folder_label(platform))
}

/// Archive filename for one icon.
///
/// iOS icons use `Icon-{size}@{scale}.png` with the scale defaulting to `1x`;
/// Android icons use `Icon-{density}.png`.
pub fn filename_for(icon: &RenderedIcon, platform: Platform) -> Result<String> {
    match (platform, icon.spec.tag) {
        (Platform::Ios, PlatformTag::Idiom(_)) => Ok(format!(
            "Icon-{}@{}.png",
            icon.spec.size,
            icon.spec.scale_or_default()
        )),
        (Platform::Android, PlatformTag::Density(density)) => Ok(format!("Icon-{}.png", density)),
        _ => Err(IconError::PlatformMismatch {
            label: icon.label(),
            platform,
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// In-memory archive: one folder of uniquely named entries
#[derive(Debug, Clone)]
pub struct Archive {
    folder: &'static str,
    entries: Vec<ArchiveEntry>,
    names: HashSet<String>,
}

impl Archive {
    pub fn new(platform: Platform) -> Self {
        Self {
            folder: folder_label(platform),
            entries: Vec::new(),
            names: HashSet::new(),
        }
    }

    /// Build the archive for `icons`, in icon order
    pub fn assemble(icons: &[RenderedIcon], platform: Platform) -> Result<Self> {
        if icons.is_empty() {
            return Err(IconError::Packaging);
        }

        let mut archive = Self::new(platform);
        for icon in icons {
            archive.insert(filename_for(icon, platform)?, icon.png.clone())?;
        }
        Ok(archive)
    }

    /// Add an entry, failing if the name is already taken
    pub fn insert(&mut self, file_name: String, bytes: Vec<u8>) -> Result<()> {
        if !self.names.insert(file_name.clone()) {
            return Err(IconError::DuplicateFilename(file_name));
        }
        self.entries.push(ArchiveEntry { file_name, bytes });
        Ok(())
    }

    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    pub fn suggested_file_name(&self) -> String {
        format!("{}.zip", self.folder)
    }

    /// Serialize as ZIP. Timestamps are pinned to the ZIP epoch so the same
    /// entries always produce the same bytes.
    pub fn to_zip_bytes(&self) -> Result<Vec<u8>> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer.add_directory(format!("{}/", self.folder), options)?;

        for entry in &self.entries {
            writer.start_file(format!("{}/{}", self.folder, entry.file_name), options)?;
            writer.write_all(&entry.bytes)?;
        }

        Ok(writer.finish()?.into_inner())
    }
}

/// Archive bytes plus the name suggested to the save collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Build the ZIP blob for `icons`
pub fn build_archive(icons: &[RenderedIcon], platform: Platform) -> Result<Vec<u8>> {
    Archive::assemble(icons, platform)?.to_zip_bytes()
}

/// Build the ZIP blob together with its suggested download name
pub fn package(icons: &[RenderedIcon], platform: Platform) -> Result<ArchiveArtifact> {
    let archive = Archive::assemble(icons, platform)?;
    Ok(ArchiveArtifact {
        file_name: archive.suggested_file_name(),
        bytes: archive.to_zip_bytes()?,
    })
}

/// File entries of a ZIP blob in stored order, directories skipped
pub fn list_archive_files(bytes: &[u8]) -> Result<Vec<String>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut names = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let file = archive.by_index(i)?;
        if !file.is_dir() {
            names.push(file.name().to_string());
        }
    }
    Ok(names)
}
