//! Black/content thresholding of luminance frames.

use crate::media::LumaFrame;

/// Inclusive pixel rectangle, in frame coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

/// Smallest rectangle holding every pixel brighter than `threshold`.
///
/// A pixel equal to the threshold is black. Returns `None` when the frame has
/// no content at all.
pub fn content_extent(frame: &LumaFrame, threshold: u8) -> Option<PixelRect> {
    let mut extent: Option<PixelRect> = None;

    for (y, row) in frame.rows().enumerate() {
        let Some(first) = row.iter().position(|&p| p > threshold) else {
            continue;
        };
        // position() found a match, so rposition() will too
        let last = row.iter().rposition(|&p| p > threshold).unwrap_or(first);
        let (y, first, last) = (y as u32, first as u32, last as u32);

        extent = Some(match extent {
            None => PixelRect {
                min_x: first,
                min_y: y,
                max_x: last,
                max_y: y,
            },
            Some(rect) => PixelRect {
                min_x: rect.min_x.min(first),
                min_y: rect.min_y,
                max_x: rect.max_x.max(last),
                max_y: y,
            },
        });
    }

    extent
}
