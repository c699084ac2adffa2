pub mod encode;
pub mod resize;

use fast_image_resize::Resizer;
use image::error::{DecodingError, ImageFormatHint};
use image::{DynamicImage, ImageError, RgbaImage};
use std::path::Path;

use crate::catalog::{Dimensions, IconSpec};
use crate::cli::ResizeFilter;
use crate::error::{IconError, Result};

/// Decoded source raster, kept as RGBA so transparent sources survive resizing.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    pixels: RgbaImage,
}

impl SourceImage {
    /// Decode raw bytes in any format the `image` crate understands
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes).map_err(IconError::Decode)?;
        Self::from_decoded(img)
    }

    /// A decoder that yields no pixels counts as unreadable input
    fn from_decoded(img: DynamicImage) -> Result<Self> {
        if img.width() == 0 || img.height() == 0 {
            return Err(IconError::Decode(ImageError::Decoding(DecodingError::new(
                ImageFormatHint::Unknown,
                format!("decoded image is {}x{}", img.width(), img.height()),
            ))));
        }
        Self::from_rgba(img.to_rgba8())
    }

    /// Read a file from disk and decode it
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::decode(&bytes)
    }

    pub fn from_rgba(pixels: RgbaImage) -> Result<Self> {
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(IconError::InvalidSize(format!("{}x{}", width, height)));
        }
        Ok(Self { pixels })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// One encoded output for a catalog entry
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedIcon {
    pub spec: IconSpec,
    pub dimensions: Dimensions,
    pub png: Vec<u8>,
}

impl RenderedIcon {
    pub fn label(&self) -> String {
        self.spec.label()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub filter: ResizeFilter,
}

/// Renders catalog entries one after another from a single source image.
///
/// The resizer keeps only scratch buffers between entries; every entry gets
/// its own freshly allocated destination surface.
pub struct Renderer {
    options: RenderOptions,
    resizer: Resizer,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            resizer: Resizer::new(),
        }
    }

    pub fn render(
        &mut self,
        source: Option<&SourceImage>,
        specs: &[IconSpec],
    ) -> Result<Vec<RenderedIcon>> {
        self.render_with_progress(source, specs, |_, _, _| {})
    }

    /// Render `specs` in order, calling `progress(done, total, icon)` after
    /// each entry has been encoded.
    pub fn render_with_progress<F>(
        &mut self,
        source: Option<&SourceImage>,
        specs: &[IconSpec],
        mut progress: F,
    ) -> Result<Vec<RenderedIcon>>
    where
        F: FnMut(usize, usize, &RenderedIcon),
    {
        let source = source.ok_or(IconError::EmptyInput)?;
        let total = specs.len();
        let mut icons = Vec::with_capacity(total);

        for spec in specs {
            let icon = self.render_one(source, spec)?;
            progress(icons.len() + 1, total, &icon);
            icons.push(icon);
        }

        Ok(icons)
    }

    fn render_one(&mut self, source: &SourceImage, spec: &IconSpec) -> Result<RenderedIcon> {
        let dimensions = spec.dimensions()?;
        let surface = resize::stretch_resize(
            &mut self.resizer,
            source.pixels(),
            dimensions,
            self.options.filter,
        )?;
        let png = encode::encode_png(&surface)?;

        Ok(RenderedIcon {
            spec: *spec,
            dimensions,
            png,
        })
    }
}

/// Render with default options
pub fn render(source: Option<&SourceImage>, specs: &[IconSpec]) -> Result<Vec<RenderedIcon>> {
    Renderer::default().render(source, specs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{specs_for, Density, Idiom, Platform};
    use image::{ImageBuffer, ImageFormat, Rgba};
    use std::io::Cursor;

    fn create_test_source(width: u32, height: u32) -> SourceImage {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8, 255])
        });
        SourceImage::from_rgba(img).unwrap()
    }

    fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = image::DynamicImage::ImageRgba8(create_test_source(width, height).pixels().clone());
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    #[test]
    fn test_decode_png() {
        let source = SourceImage::decode(&encoded(30, 20, ImageFormat::Png)).unwrap();
        assert_eq!((source.width(), source.height()), (30, 20));
    }

    #[test]
    fn test_decode_garbage() {
        let result = SourceImage::decode(b"definitely not an image");
        assert!(matches!(result, Err(IconError::Decode(_))));
    }

    #[test]
    fn test_zero_size_decode_is_unreadable() {
        let result = SourceImage::from_decoded(DynamicImage::new_rgba8(0, 12));
        let err = result.unwrap_err();
        assert!(matches!(err, IconError::Decode(_)));
        assert_eq!(err.title(), "Unreadable image");
    }

    #[test]
    fn test_zero_size_pixels_rejected() {
        let empty = RgbaImage::new(5, 0);
        assert!(matches!(
            SourceImage::from_rgba(empty),
            Err(IconError::InvalidSize(_))
        ));
    }

    #[test]
    fn test_open_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, encoded(12, 9, ImageFormat::Png)).unwrap();
        let source = SourceImage::open(&path).unwrap();
        assert_eq!((source.width(), source.height()), (12, 9));

        assert!(matches!(
            SourceImage::open(&dir.path().join("missing.png")),
            Err(IconError::Io(_))
        ));
    }

    #[test]
    fn test_render_without_source() {
        let specs = specs_for(Platform::Ios);
        assert!(matches!(render(None, &specs), Err(IconError::EmptyInput)));
    }

    #[test]
    fn test_render_empty_specs() {
        let source = create_test_source(16, 16);
        let icons = render(Some(&source), &[]).unwrap();
        assert!(icons.is_empty());
    }

    #[test]
    fn test_render_exact_dimensions() {
        let source = create_test_source(64, 48);
        let specs = specs_for(Platform::Android);
        let icons = render(Some(&source), &specs).unwrap();

        assert_eq!(icons.len(), specs.len());
        for (icon, spec) in icons.iter().zip(specs.iter()) {
            assert_eq!(icon.spec, *spec);
            let decoded = image::load_from_memory(&icon.png).unwrap();
            let expected = spec.dimensions().unwrap();
            assert_eq!((decoded.width(), decoded.height()), (expected.width, expected.height));
            assert_eq!(icon.dimensions, expected);
        }
    }

    #[test]
    fn test_fractional_descriptor_rounds() {
        let source = create_test_source(40, 40);
        let spec = IconSpec::ios("83.5x83.5", Idiom::Ipad, Some("2x"));
        let icons = render(Some(&source), &[spec]).unwrap();
        let decoded = image::load_from_memory(&icons[0].png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (84, 84));
        assert_eq!(icons[0].label(), "83.5x83.5@2x");
    }

    #[test]
    fn test_invalid_descriptor_fails() {
        let source = create_test_source(10, 10);
        let spec = IconSpec::android("0x0", Density::Mdpi);
        assert!(matches!(
            render(Some(&source), &[spec]),
            Err(IconError::InvalidSize(_))
        ));
    }

    #[test]
    fn test_render_is_deterministic() {
        let source = create_test_source(90, 70);
        let specs = specs_for(Platform::Android);
        let first = render(Some(&source), &specs).unwrap();
        let second = Renderer::default().render(Some(&source), &specs).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_progress_is_ordered() {
        let source = create_test_source(20, 20);
        let specs = specs_for(Platform::Android);
        let mut seen = Vec::new();
        Renderer::default()
            .render_with_progress(Some(&source), &specs, |done, total, icon| {
                seen.push((done, total, icon.label()));
            })
            .unwrap();

        assert_eq!(seen.len(), 7);
        assert_eq!(seen[0], (1, 7, "ldpi".to_string()));
        assert_eq!(seen[6], (7, 7, "playstore".to_string()));
    }

    #[test]
    fn test_transparent_source_keeps_alpha() {
        let img: RgbaImage = ImageBuffer::from_pixel(32, 32, Rgba([0, 0, 0, 0]));
        let source = SourceImage::from_rgba(img).unwrap();
        let icons = Renderer::new(RenderOptions {
            filter: ResizeFilter::Nearest,
        })
        .render(Some(&source), &[IconSpec::android("48x48", Density::Mdpi)])
        .unwrap();
        let decoded = image::load_from_memory(&icons[0].png).unwrap().to_rgba8();
        assert!(decoded.pixels().all(|p| p[3] == 0));
    }
}
