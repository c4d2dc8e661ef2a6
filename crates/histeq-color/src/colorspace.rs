//! Color space conversion
//!
//! Provides the two color models used to pick the channel that receives
//! equalization:
//! - RGB <-> HSL (Hue, Saturation, Lightness); lightness is equalized
//! - RGB <-> YUV (BT.601 luma and chroma); luma is equalized
//!
//! Pixel-level functions convert one sample triple; the image-level
//! types [`HslImage`] and [`YuvImage`] hold whole planes.

use crate::{ColorError, ColorResult};
use histeq_core::{Image, PixelBuffer};

/// HSL color representation
///
/// - `h`: Hue in range [0.0, 1.0]
/// - `s`: Saturation in range [0.0, 1.0]
/// - `l`: Lightness scaled to [0, 255]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: u8,
}

/// YUV color representation, all components in [0, 255]
///
/// - `y`: Luma
/// - `u`: Blue-difference chroma, offset by 128
/// - `v`: Red-difference chroma, offset by 128
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Yuv {
    pub y: u8,
    pub u: u8,
    pub v: u8,
}

/// Convert RGB values to HSL
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let var_r = r as f32 / 255.0;
    let var_g = g as f32 / 255.0;
    let var_b = b as f32 / 255.0;

    let var_min = var_r.min(var_g).min(var_b);
    let var_max = var_r.max(var_g).max(var_b);
    let del_max = var_max - var_min;

    let l = (var_max + var_min) / 2.0;

    let (mut h, s) = if del_max == 0.0 {
        (0.0, 0.0)
    } else {
        let s = if l < 0.5 {
            del_max / (var_max + var_min)
        } else {
            del_max / (2.0 - var_max - var_min)
        };

        let del_r = ((var_max - var_r) / 6.0 + del_max / 2.0) / del_max;
        let del_g = ((var_max - var_g) / 6.0 + del_max / 2.0) / del_max;
        let del_b = ((var_max - var_b) / 6.0 + del_max / 2.0) / del_max;

        let h = if var_r == var_max {
            del_b - del_g
        } else if var_g == var_max {
            1.0 / 3.0 + del_r - del_b
        } else {
            2.0 / 3.0 + del_g - del_r
        };
        (h, s)
    };

    if h < 0.0 {
        h += 1.0;
    }
    if h > 1.0 {
        h -= 1.0;
    }

    Hsl {
        h,
        s,
        l: (l * 255.0) as u8,
    }
}

fn hue_to_rgb(v1: f32, v2: f32, mut vh: f32) -> f32 {
    if vh < 0.0 {
        vh += 1.0;
    }
    if vh > 1.0 {
        vh -= 1.0;
    }
    if 6.0 * vh < 1.0 {
        return v1 + (v2 - v1) * 6.0 * vh;
    }
    if 2.0 * vh < 1.0 {
        return v2;
    }
    if 3.0 * vh < 2.0 {
        return v1 + (v2 - v1) * (2.0 / 3.0 - vh) * 6.0;
    }
    v1
}

/// Convert HSL values to RGB
pub fn hsl_to_rgb(hsl: Hsl) -> (u8, u8, u8) {
    let Hsl { h, s, l } = hsl;
    let l = l as f32 / 255.0;

    if s == 0.0 {
        let v = (l * 255.0) as u8;
        return (v, v, v);
    }

    let var_2 = if l < 0.5 {
        l * (1.0 + s)
    } else {
        (l + s) - (s * l)
    };
    let var_1 = 2.0 * l - var_2;

    let r = 255.0 * hue_to_rgb(var_1, var_2, h + 1.0 / 3.0);
    let g = 255.0 * hue_to_rgb(var_1, var_2, h);
    let b = 255.0 * hue_to_rgb(var_1, var_2, h - 1.0 / 3.0);
    (r as u8, g as u8, b as u8)
}

/// Convert RGB to YUV (BT.601, chroma offset by 128)
pub fn rgb_to_yuv(r: u8, g: u8, b: u8) -> Yuv {
    let (r, g, b) = (r as f64, g as f64, b as f64);
    Yuv {
        y: (0.299 * r + 0.587 * g + 0.114 * b) as u8,
        u: (-0.169 * r - 0.331 * g + 0.499 * b + 128.0) as u8,
        v: (0.499 * r - 0.418 * g - 0.0813 * b + 128.0) as u8,
    }
}

/// Convert YUV to RGB, clipping each component to [0, 255]
pub fn yuv_to_rgb(yuv: Yuv) -> (u8, u8, u8) {
    let y = yuv.y as f64;
    let cb = yuv.u as f64 - 128.0;
    let cr = yuv.v as f64 - 128.0;

    let r = (y + 1.402 * cr) as i32;
    let g = (y - 0.344 * cb - 0.714 * cr) as i32;
    let b = (y + 1.772 * cb) as i32;
    (clip(r), clip(g), clip(b))
}

#[inline]
fn clip(x: i32) -> u8 {
    x.clamp(0, 255) as u8
}

/// A color image in HSL form: float hue and saturation planes plus an
/// 8-bit lightness plane.
#[derive(Debug, Clone, PartialEq)]
pub struct HslImage {
    width: u32,
    height: u32,
    hue: Vec<f32>,
    saturation: Vec<f32>,
    lightness: PixelBuffer,
}

impl HslImage {
    /// Convert an RGB image to HSL.
    ///
    /// # Errors
    ///
    /// Returns a core `UnsupportedKind` error for grayscale input.
    pub fn from_rgb(image: &Image) -> ColorResult<Self> {
        let (r, g, b) = image.rgb()?;
        let n = image.pixel_count();
        let mut hue = Vec::with_capacity(n);
        let mut saturation = Vec::with_capacity(n);
        let mut lightness = Vec::with_capacity(n);

        for i in 0..n {
            let hsl = rgb_to_hsl(r[i], g[i], b[i]);
            hue.push(hsl.h);
            saturation.push(hsl.s);
            lightness.push(hsl.l);
        }

        Ok(Self {
            width: image.width(),
            height: image.height(),
            hue,
            saturation,
            lightness: lightness.into(),
        })
    }

    /// The lightness plane.
    pub fn lightness(&self) -> &PixelBuffer {
        &self.lightness
    }

    /// Replace the lightness plane, keeping hue and saturation.
    pub fn with_lightness(mut self, lightness: PixelBuffer) -> ColorResult<Self> {
        if lightness.len() != self.lightness.len() {
            return Err(ColorError::InvalidParameters(format!(
                "lightness plane has {} samples, expected {}",
                lightness.len(),
                self.lightness.len()
            )));
        }
        self.lightness = lightness;
        Ok(self)
    }

    /// Convert back to an RGB image of the same size.
    pub fn to_rgb(&self) -> ColorResult<Image> {
        let n = self.lightness.len();
        let mut r = Vec::with_capacity(n);
        let mut g = Vec::with_capacity(n);
        let mut b = Vec::with_capacity(n);

        for i in 0..n {
            let (pr, pg, pb) = hsl_to_rgb(Hsl {
                h: self.hue[i],
                s: self.saturation[i],
                l: self.lightness[i],
            });
            r.push(pr);
            g.push(pg);
            b.push(pb);
        }

        Ok(Image::from_rgb(
            self.width,
            self.height,
            r.into(),
            g.into(),
            b.into(),
        )?)
    }
}

/// A color image in YUV form: three 8-bit planes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YuvImage {
    width: u32,
    height: u32,
    y: PixelBuffer,
    u: PixelBuffer,
    v: PixelBuffer,
}

impl YuvImage {
    /// Convert an RGB image to YUV.
    pub fn from_rgb(image: &Image) -> ColorResult<Self> {
        let (r, g, b) = image.rgb()?;
        let n = image.pixel_count();
        let mut y = Vec::with_capacity(n);
        let mut u = Vec::with_capacity(n);
        let mut v = Vec::with_capacity(n);

        for i in 0..n {
            let yuv = rgb_to_yuv(r[i], g[i], b[i]);
            y.push(yuv.y);
            u.push(yuv.u);
            v.push(yuv.v);
        }

        Ok(Self {
            width: image.width(),
            height: image.height(),
            y: y.into(),
            u: u.into(),
            v: v.into(),
        })
    }

    /// The luma plane.
    pub fn luma(&self) -> &PixelBuffer {
        &self.y
    }

    /// Replace the luma plane, keeping both chroma planes.
    pub fn with_luma(mut self, luma: PixelBuffer) -> ColorResult<Self> {
        if luma.len() != self.y.len() {
            return Err(ColorError::InvalidParameters(format!(
                "luma plane has {} samples, expected {}",
                luma.len(),
                self.y.len()
            )));
        }
        self.y = luma;
        Ok(self)
    }

    /// Convert back to an RGB image of the same size.
    pub fn to_rgb(&self) -> ColorResult<Image> {
        let n = self.y.len();
        let mut r = Vec::with_capacity(n);
        let mut g = Vec::with_capacity(n);
        let mut b = Vec::with_capacity(n);

        for i in 0..n {
            let (pr, pg, pb) = yuv_to_rgb(Yuv {
                y: self.y[i],
                u: self.u[i],
                v: self.v[i],
            });
            r.push(pr);
            g.push(pg);
            b.push(pb);
        }

        Ok(Image::from_rgb(
            self.width,
            self.height,
            r.into(),
            g.into(),
            b.into(),
        )?)
    }
}

/// Size and kind of an image, for callers that only need to check shape.
pub fn same_shape(a: &Image, b: &Image) -> bool {
    a.width() == b.width() && a.height() == b.height() && a.kind() == b.kind()
}
