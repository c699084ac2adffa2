use fast_image_resize::images::{Image, ImageRef};
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::RgbaImage;
use std::num::NonZeroU32;

use crate::catalog::Dimensions;
use crate::cli::ResizeFilter;
use crate::error::{IconError, Result};

impl ResizeFilter {
    fn resize_alg(&self) -> ResizeAlg {
        match self {
            ResizeFilter::Nearest => ResizeAlg::Nearest,
            ResizeFilter::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
            ResizeFilter::CatmullRom => ResizeAlg::Convolution(FilterType::CatmullRom),
            ResizeFilter::Lanczos3 => ResizeAlg::Convolution(FilterType::Lanczos3),
        }
    }
}

/// Stretch the whole source onto a fresh surface of exactly `target` pixels.
///
/// The aspect ratio is not preserved. The destination buffer starts fully
/// transparent and is owned by the returned image, so nothing carries over
/// between calls.
pub fn stretch_resize(
    resizer: &mut Resizer,
    img: &RgbaImage,
    target: Dimensions,
    filter: ResizeFilter,
) -> Result<RgbaImage> {
    let (src_width, src_height) = img.dimensions();

    let dst_width = NonZeroU32::new(target.width)
        .ok_or_else(|| IconError::Resize("Target width is zero".to_string()))?;
    let dst_height = NonZeroU32::new(target.height)
        .ok_or_else(|| IconError::Resize("Target height is zero".to_string()))?;

    if src_width == target.width && src_height == target.height {
        return Ok(img.clone());
    }

    let src_image = ImageRef::new(src_width, src_height, img.as_raw(), PixelType::U8x4)
        .map_err(|e| IconError::Resize(e.to_string()))?;

    let mut dst_image = Image::new(dst_width.get(), dst_height.get(), PixelType::U8x4);

    let options = ResizeOptions::new().resize_alg(filter.resize_alg());
    resizer
        .resize(&src_image, &mut dst_image, &options)
        .map_err(|e| IconError::Resize(e.to_string()))?;

    RgbaImage::from_raw(target.width, target.height, dst_image.into_vec()).ok_or_else(|| {
        IconError::Resize(format!(
            "Resized buffer does not match {}x{}",
            target.width, target.height
        ))
    })
}
