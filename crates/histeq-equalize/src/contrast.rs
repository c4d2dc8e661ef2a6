//! Contrast enhancement entry points
//!
//! Grayscale images are equalized directly. Color images are converted
//! to HSL or YUV, the lightness or luma plane is equalized, and the result
//! is converted back to RGB. Color conversion runs on the calling thread;
//! only the equalized plane is distributed across workers.

use crate::equalizer::Equalizer;
use crate::EqualizeResult;
use histeq_color::{HslImage, YuvImage};
use histeq_core::{Image, ImageKind};

/// Color model used to pick the channel that gets equalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorModel {
    /// Equalize lightness, keep hue and saturation
    Hsl,
    /// Equalize luma, keep both chroma planes
    Yuv,
}

/// Equalize a grayscale image.
///
/// # Errors
///
/// Returns a core `UnsupportedKind` error for color input.
pub fn contrast_enhancement_gray(image: &Image, equalizer: &dyn Equalizer) -> EqualizeResult<Image> {
    let plane = image.gray()?;
    let out = equalizer.equalize(plane)?;
    Ok(Image::from_gray(image.width(), image.height(), out)?)
}

/// Equalize the lightness of a color image in HSL space.
pub fn contrast_enhancement_hsl(image: &Image, equalizer: &dyn Equalizer) -> EqualizeResult<Image> {
    let hsl = HslImage::from_rgb(image)?;
    let lightness = equalizer.equalize(hsl.lightness())?;
    Ok(hsl.with_lightness(lightness)?.to_rgb()?)
}

/// Equalize the luma of a color image in YUV space.
pub fn contrast_enhancement_yuv(image: &Image, equalizer: &dyn Equalizer) -> EqualizeResult<Image> {
    let yuv = YuvImage::from_rgb(image)?;
    let luma = equalizer.equalize(yuv.luma())?;
    Ok(yuv.with_luma(luma)?.to_rgb()?)
}

/// Equalize any image: gray directly, color through `model`.
pub fn contrast_enhancement(
    image: &Image,
    model: ColorModel,
    equalizer: &dyn Equalizer,
) -> EqualizeResult<Image> {
    match (image.kind(), model) {
        (ImageKind::Gray, _) => contrast_enhancement_gray(image, equalizer),
        (ImageKind::Rgb, ColorModel::Hsl) => contrast_enhancement_hsl(image, equalizer),
        (ImageKind::Rgb, ColorModel::Yuv) => contrast_enhancement_yuv(image, equalizer),
    }
}
