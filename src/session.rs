//! Session state driven by the user actions: upload, select platform,
//! generate and download.
//!
//! Each action either succeeds, replacing the state it owns, or fails and
//! leaves every piece of state as it was. Generated icons remember the
//! platform they were rendered for, so switching platforms without generating
//! again still downloads the previous set under its own names.

use std::sync::{Arc, Mutex, MutexGuard, TryLockError};

use serde::Serialize;

use crate::catalog::{specs_for, Platform};
use crate::error::{IconError, NoticeLevel, Result};
use crate::image_processing::{RenderOptions, RenderedIcon, Renderer, SourceImage};
use crate::packager::{self, ArchiveArtifact};

/// Transient user-facing message produced at an action boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn image_loaded(source: &SourceImage) -> Self {
        Self::new(
            NoticeLevel::Info,
            "Image loaded",
            format!("{}x{} source image ready", source.width(), source.height()),
        )
    }

    pub fn icons_generated(platform: Platform, count: usize) -> Self {
        Self::new(
            NoticeLevel::Success,
            "Icons generated",
            format!("Successfully generated {} {} icons!", count, platform),
        )
    }

    pub fn archive_ready(artifact: &ArchiveArtifact, count: usize) -> Self {
        Self::new(
            NoticeLevel::Success,
            "Archive ready",
            format!("{} with {} icons", artifact.file_name, count),
        )
    }
}

impl From<&IconError> for Notice {
    fn from(err: &IconError) -> Self {
        let description = match err {
            IconError::EmptyInput => "Please upload an image first!".to_string(),
            IconError::Packaging => "Generate icons before downloading!".to_string(),
            other => other.to_string(),
        };
        Self::new(err.level(), err.title(), description)
    }
}

/// Icons from the last successful generate, with the platform they belong to
#[derive(Debug, Clone)]
struct GeneratedSet {
    platform: Platform,
    icons: Vec<RenderedIcon>,
}

pub struct Session {
    renderer: Renderer,
    current_image: Option<SourceImage>,
    generated: Option<GeneratedSet>,
    selected_platform: Platform,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl Session {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            renderer: Renderer::new(options),
            current_image: None,
            generated: None,
            selected_platform: Platform::default(),
        }
    }

    /// Decode `bytes` and make it the current image. On failure the previous
    /// image stays in place.
    pub fn upload(&mut self, bytes: &[u8]) -> Result<Notice> {
        let source = SourceImage::decode(bytes)?;
        Ok(self.set_image(source))
    }

    pub fn set_image(&mut self, source: SourceImage) -> Notice {
        let notice = Notice::image_loaded(&source);
        self.current_image = Some(source);
        notice
    }

    pub fn select_platform(&mut self, platform: Platform) {
        self.selected_platform = platform;
    }

    pub fn selected_platform(&self) -> Platform {
        self.selected_platform
    }

    pub fn current_image(&self) -> Option<&SourceImage> {
        self.current_image.as_ref()
    }

    /// Icons from the last successful generate, in catalog order
    pub fn current_icons(&self) -> &[RenderedIcon] {
        self.generated
            .as_ref()
            .map(|set| set.icons.as_slice())
            .unwrap_or(&[])
    }

    /// Platform the current icons were generated for
    pub fn generated_platform(&self) -> Option<Platform> {
        self.generated.as_ref().map(|set| set.platform)
    }

    pub fn generate(&mut self) -> Result<Notice> {
        self.generate_with_progress(|_, _, _| {})
    }

    /// Regenerate the full icon set for the selected platform. The previous
    /// set is only replaced once every icon has rendered.
    pub fn generate_with_progress<F>(&mut self, progress: F) -> Result<Notice>
    where
        F: FnMut(usize, usize, &RenderedIcon),
    {
        let platform = self.selected_platform;
        let specs = specs_for(platform);
        let icons =
            self.renderer
                .render_with_progress(self.current_image.as_ref(), &specs, progress)?;

        let notice = Notice::icons_generated(platform, icons.len());
        self.generated = Some(GeneratedSet { platform, icons });
        Ok(notice)
    }

    /// Package the current icons. The archive follows the platform the icons
    /// were generated for, not the currently selected one.
    pub fn download(&self) -> Result<ArchiveArtifact> {
        let set = self.generated.as_ref().ok_or(IconError::Packaging)?;
        packager::package(&set.icons, set.platform)
    }
}

/// Session shared between owners. Actions never wait on each other: a
/// generate request arriving while the session is held is rejected.
#[derive(Clone, Default)]
pub struct SharedSession {
    inner: Arc<Mutex<Session>>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub fn try_generate(&self) -> Result<Notice> {
        let mut session = match self.inner.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => return Err(IconError::GenerationInProgress),
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
        };
        session.generate()
    }

    /// Run `f` with exclusive access to the session
    pub fn with<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut session = self.lock();
        f(&mut session)
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
