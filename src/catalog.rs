//! Static catalog of icon outputs for iOS and Android.
//!
//! Entries are stored in a fixed order which drives preview order and archive
//! naming. The two platform families never share an entry: iOS entries carry an
//! idiom tag and Android entries carry a density tag.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::{IconError, Result};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Display, EnumString, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Apple app icons (idiom tagged entries)
    #[default]
    #[value(name = "ios")]
    Ios,
    /// Android launcher icons (density tagged entries)
    #[value(name = "android")]
    Android,
}

/// iOS device class an icon is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Idiom {
    Universal,
    Iphone,
    Ipad,
    IosMarketing,
}

/// Android screen density bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Density {
    Ldpi,
    Mdpi,
    Hdpi,
    Xhdpi,
    Xxhdpi,
    Xxxhdpi,
    Playstore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformTag {
    Idiom(Idiom),
    Density(Density),
}

impl PlatformTag {
    pub fn platform(&self) -> Platform {
        match self {
            PlatformTag::Idiom(_) => Platform::Ios,
            PlatformTag::Density(_) => Platform::Android,
        }
    }
}

/// Pixel size of a rendered icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// One target output of the catalog.
///
/// `size` keeps the original descriptor (e.g. `"83.5x83.5"`) because archive
/// filenames are built from it; the pixel size comes from [`IconSpec::dimensions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconSpec {
    pub size: &'static str,
    pub tag: PlatformTag,
    pub scale: Option<&'static str>,
    pub marketing: bool,
}

impl IconSpec {
    pub const fn ios(size: &'static str, idiom: Idiom, scale: Option<&'static str>) -> Self {
        Self {
            size,
            tag: PlatformTag::Idiom(idiom),
            scale,
            marketing: false,
        }
    }

    pub const fn android(size: &'static str, density: Density) -> Self {
        Self {
            size,
            tag: PlatformTag::Density(density),
            scale: None,
            marketing: false,
        }
    }

    const fn marketing(mut self) -> Self {
        self.marketing = true;
        self
    }

    pub fn platform(&self) -> Platform {
        self.tag.platform()
    }

    pub fn idiom(&self) -> Option<Idiom> {
        match self.tag {
            PlatformTag::Idiom(idiom) => Some(idiom),
            PlatformTag::Density(_) => None,
        }
    }

    pub fn density(&self) -> Option<Density> {
        match self.tag {
            PlatformTag::Density(density) => Some(density),
            PlatformTag::Idiom(_) => None,
        }
    }

    /// Scale factor used for naming, `1x` when the entry has none
    pub fn scale_or_default(&self) -> &'static str {
        self.scale.unwrap_or("1x")
    }

    /// Pixel dimensions parsed from the size descriptor
    pub fn dimensions(&self) -> Result<Dimensions> {
        parse_size_descriptor(self.size)
    }

    /// Preview label: `{size}@{scale}` for iOS, the density name for Android
    pub fn label(&self) -> String {
        match self.tag {
            PlatformTag::Idiom(_) => format!("{}@{}", self.size, self.scale_or_default()),
            PlatformTag::Density(density) => density.to_string(),
        }
    }
}

/// Parse a `WIDTHxHEIGHT` descriptor into pixel dimensions.
///
/// Fractional components are rounded to the nearest pixel, so `"83.5x83.5"`
/// yields 84x84.
pub fn parse_size_descriptor(size: &str) -> Result<Dimensions> {
    let invalid = || IconError::InvalidSize(size.to_string());

    let (w, h) = size.split_once('x').ok_or_else(invalid)?;
    let to_pixels = |part: &str| -> Result<u32> {
        let value = part.trim().parse::<f64>().map_err(|_| invalid())?;
        if !value.is_finite() || value <= 0.0 {
            return Err(invalid());
        }
        let rounded = value.round();
        if rounded < 1.0 || rounded > u32::MAX as f64 {
            return Err(invalid());
        }
        Ok(rounded as u32)
    };

    Ok(Dimensions {
        width: to_pixels(w)?,
        height: to_pixels(h)?,
    })
}

static CATALOG: [IconSpec; 31] = [
    // iOS, current sizes
    IconSpec::ios("40x40", Idiom::Universal, Some("2x")),
    IconSpec::ios("60x60", Idiom::Universal, Some("3x")),
    IconSpec::ios("58x58", Idiom::Universal, Some("2x")),
    IconSpec::ios("87x87", Idiom::Universal, Some("3x")),
    IconSpec::ios("76x76", Idiom::Universal, Some("2x")),
    IconSpec::ios("114x114", Idiom::Universal, Some("3x")),
    IconSpec::ios("80x80", Idiom::Universal, Some("2x")),
    IconSpec::ios("120x120", Idiom::Universal, Some("3x")),
    IconSpec::ios("120x120", Idiom::Universal, Some("2x")),
    IconSpec::ios("180x180", Idiom::Universal, Some("3x")),
    IconSpec::ios("128x128", Idiom::Universal, Some("2x")),
    IconSpec::ios("192x192", Idiom::Universal, Some("3x")),
    IconSpec::ios("136x136", Idiom::Universal, Some("2x")),
    IconSpec::ios("152x152", Idiom::Universal, Some("2x")),
    IconSpec::ios("167x167", Idiom::Universal, Some("2x")),
    IconSpec::ios("1024x1024", Idiom::IosMarketing, Some("1x")).marketing(),
    // iOS, legacy iPad / iPhone sizes
    IconSpec::ios("20x20", Idiom::Ipad, None),
    IconSpec::ios("29x29", Idiom::Ipad, None),
    IconSpec::ios("40x40", Idiom::Ipad, None),
    IconSpec::ios("50x50", Idiom::Ipad, None),
    IconSpec::ios("72x72", Idiom::Ipad, None),
    IconSpec::ios("76x76", Idiom::Ipad, None),
    IconSpec::ios("83.5x83.5", Idiom::Ipad, Some("2x")),
    IconSpec::ios("57x57", Idiom::Iphone, None),
    // Android
    IconSpec::android("36x36", Density::Ldpi),
    IconSpec::android("48x48", Density::Mdpi),
    IconSpec::android("72x72", Density::Hdpi),
    IconSpec::android("96x96", Density::Xhdpi),
    IconSpec::android("144x144", Density::Xxhdpi),
    IconSpec::android("192x192", Density::Xxxhdpi),
    IconSpec::android("512x512", Density::Playstore),
];

/// Every catalog entry in its fixed order
pub fn all_specs() -> &'static [IconSpec] {
    &CATALOG
}

/// Catalog entries belonging to `platform`, in catalog order
pub fn specs_for(platform: Platform) -> Vec<IconSpec> {
    all_specs()
        .iter()
        .filter(|spec| spec.platform() == platform)
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_platform_counts() {
        assert_eq!(specs_for(Platform::Ios).len(), 24);
        assert_eq!(specs_for(Platform::Android).len(), 7);
        assert_eq!(all_specs().len(), 31);
    }

    #[test]
    fn test_filter_keeps_catalog_order() {
        let ios = specs_for(Platform::Ios);
        let expected: Vec<_> = all_specs().iter().take(24).copied().collect();
        assert_eq!(ios, expected);

        let android: Vec<String> = specs_for(Platform::Android)
            .iter()
            .map(|s| s.label())
            .collect();
        assert_eq!(
            android,
            vec!["ldpi", "mdpi", "hdpi", "xhdpi", "xxhdpi", "xxxhdpi", "playstore"]
        );
    }

    #[test]
    fn test_families_are_exclusive() {
        for spec in specs_for(Platform::Ios) {
            assert!(spec.idiom().is_some());
            assert!(spec.density().is_none());
        }
        for spec in specs_for(Platform::Android) {
            assert!(spec.density().is_some());
            assert!(spec.scale.is_none());
        }
    }

    #[test]
    fn test_every_entry_parses() {
        for spec in all_specs() {
            let dims = spec.dimensions().unwrap();
            assert!(dims.width > 0 && dims.height > 0, "{}", spec.size);
        }
    }

    #[test]
    fn test_labels_unique_per_platform() {
        for platform in [Platform::Ios, Platform::Android] {
            let specs = specs_for(platform);
            let labels: HashSet<String> = specs.iter().map(|s| s.label()).collect();
            assert_eq!(labels.len(), specs.len());
        }
    }

    #[test]
    fn test_marketing_entry() {
        let marketing: Vec<_> = all_specs().iter().filter(|s| s.marketing).collect();
        assert_eq!(marketing.len(), 1);
        assert_eq!(marketing[0].size, "1024x1024");
        assert_eq!(marketing[0].idiom(), Some(Idiom::IosMarketing));
    }

    #[test]
    fn test_parse_size_descriptor() {
        assert_eq!(
            parse_size_descriptor("40x40").unwrap(),
            Dimensions { width: 40, height: 40 }
        );
        assert_eq!(
            parse_size_descriptor("83.5x83.5").unwrap(),
            Dimensions { width: 84, height: 84 }
        );
        assert_eq!(
            parse_size_descriptor("1024x512").unwrap(),
            Dimensions { width: 1024, height: 512 }
        );
    }

    #[test]
    fn test_parse_size_descriptor_invalid() {
        for bad in ["", "40", "40x", "x40", "0x40", "-5x5", "axb", "0.4x0.4", "NaNx1", "infx1"] {
            assert!(
                matches!(parse_size_descriptor(bad), Err(IconError::InvalidSize(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_default_scale_label() {
        let spec = IconSpec::ios("29x29", Idiom::Ipad, None);
        assert_eq!(spec.scale_or_default(), "1x");
        assert_eq!(spec.label(), "29x29@1x");
    }

    #[test]
    fn test_platform_strings() {
        assert_eq!(Platform::default(), Platform::Ios);
        assert_eq!(Platform::Ios.to_string(), "ios");
        assert_eq!("android".parse::<Platform>().unwrap(), Platform::Android);
        assert_eq!("iOS".parse::<Platform>().unwrap(), Platform::Ios);
        assert_eq!(Idiom::IosMarketing.to_string(), "ios-marketing");
        assert_eq!(Density::Xxxhdpi.to_string(), "xxxhdpi");
    }
}
