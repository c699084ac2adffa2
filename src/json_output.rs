//! JSON output for GUI integration
//!
//! When --json-progress flag is enabled, all progress and status information
//! is emitted as JSON lines to stdout, suppressing all other output.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::catalog::Platform;
use crate::image_processing::RenderedIcon;
use crate::session::Notice;

/// Last progress emission timestamp (milliseconds since epoch)
/// Used for throttling progress updates to ~25 FPS (40ms between updates)
static LAST_PROGRESS_MS: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JsonMessage {
    /// Progress update
    Progress {
        current: usize,
        total: usize,
        message: String,
    },
    /// One icon rendered and encoded
    IconRendered {
        label: String,
        width: u32,
        height: u32,
        bytes: usize,
    },
    /// User-facing notice from an action
    Notice(Notice),
    /// Archive written (or simulated in dry-run mode)
    Archive {
        path: String,
        file_name: String,
        entries: usize,
        bytes: usize,
        written: bool,
    },
    /// Run summary
    Summary {
        platform: Platform,
        icons: usize,
        duration_secs: f64,
    },
}

impl JsonMessage {
    /// Emit JSON message to stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }

    /// Create and emit progress message (throttled to ~25 FPS for smooth GUI updates)
    ///
    /// The final progress (current == total) is always emitted to ensure 100% completion.
    pub fn progress(current: usize, total: usize, message: impl Into<String>) {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        let last_ms = LAST_PROGRESS_MS.load(Ordering::Relaxed);

        if now_ms.saturating_sub(last_ms) >= 40 || current == total {
            LAST_PROGRESS_MS.store(now_ms, Ordering::Relaxed);
            Self::Progress {
                current,
                total,
                message: message.into(),
            }
            .emit();
        }
    }

    pub fn icon_rendered(icon: &RenderedIcon) -> Self {
        Self::IconRendered {
            label: icon.label(),
            width: icon.dimensions.width,
            height: icon.dimensions.height,
            bytes: icon.png.len(),
        }
    }

    pub fn notice(notice: &Notice) {
        Self::Notice(notice.clone()).emit();
    }

    pub fn summary(platform: Platform, icons: usize, duration_secs: f64) {
        Self::Summary {
            platform,
            icons,
            duration_secs,
        }
        .emit();
    }
}
