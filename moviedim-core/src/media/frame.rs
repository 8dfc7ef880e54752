//! Single-channel luminance frames.

use crate::error::{CoreError, CoreResult};

/// A decoded video frame reduced to 8-bit luminance, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LumaFrame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl LumaFrame {
    /// Wraps an existing luminance buffer. The buffer must hold exactly
    /// `width * height` samples.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> CoreResult<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(CoreError::Decode(format!(
                "Luma buffer holds {} samples, expected {} for {}x{}",
                pixels.len(),
                expected,
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Converts packed 8-bit RGB (`rgb24`) to luminance with BT.601 weights.
    pub fn from_rgb24(width: u32, height: u32, rgb: &[u8]) -> CoreResult<Self> {
        let expected = width as usize * height as usize * 3;
        if rgb.len() != expected {
            return Err(CoreError::Decode(format!(
                "rgb24 buffer holds {} bytes, expected {} for {}x{}",
                rgb.len(),
                expected,
                width,
                height
            )));
        }

        let pixels = rgb
            .chunks_exact(3)
            .map(|px| rgb_to_luma(px[0], px[1], px[2]))
            .collect();

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A frame where every pixel has the same luminance.
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self {
            width,
            height,
            pixels: vec![value; width as usize * height as usize],
        }
    }

    /// Paints a rectangle, clipped to the frame.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, value: u8) {
        let x = x.min(self.width);
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for row in y.min(self.height)..y_end {
            let start = row as usize * self.width as usize;
            self.pixels[start + x as usize..start + x_end as usize].fill(value);
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Iterates over the rows of the frame.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks_exact panics on a zero chunk size
        self.pixels.chunks_exact(self.width.max(1) as usize)
    }
}

/// BT.601 luma, the same weighting OpenCV uses for its RGB to gray conversion.
pub fn rgb_to_luma(r: u8, g: u8, b: u8) -> u8 {
    let y = 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
    y.round().clamp(0.0, 255.0) as u8
}
