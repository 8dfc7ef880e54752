//! Accumulated visible region across sampled frames.

use super::threshold::PixelRect;

/// Bounding box of every content pixel seen so far.
///
/// Starts at the empty extremes (min at the full frame extent, max at zero),
/// so visible dimensions stay non-positive until a frame contributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleBoundingBox {
    min_x: i64,
    min_y: i64,
    max_x: i64,
    max_y: i64,
    contributions: usize,
}

impl VisibleBoundingBox {
    /// An empty box for frames of the given size.
    pub fn empty(frame_width: u32, frame_height: u32) -> Self {
        Self {
            min_x: i64::from(frame_width),
            min_y: i64::from(frame_height),
            max_x: 0,
            max_y: 0,
            contributions: 0,
        }
    }

    /// Grows the box to cover `rect`.
    pub fn include(&mut self, rect: PixelRect) {
        self.min_x = self.min_x.min(i64::from(rect.min_x));
        self.min_y = self.min_y.min(i64::from(rect.min_y));
        self.max_x = self.max_x.max(i64::from(rect.max_x));
        self.max_y = self.max_y.max(i64::from(rect.max_y));
        self.contributions += 1;
    }

    /// True once at least one frame had content.
    pub fn has_content(&self) -> bool {
        self.contributions > 0
    }

    /// Number of frames that contributed content.
    pub fn contributions(&self) -> usize {
        self.contributions
    }

    /// `(max_x - min_x + 1, max_y - min_y + 1)`.
    pub fn visible_dimensions(&self) -> (i64, i64) {
        (
            self.max_x - self.min_x + 1,
            self.max_y - self.min_y + 1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> PixelRect {
        PixelRect {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    #[test]
    fn empty_box_has_non_positive_dimensions() {
        let bbox = VisibleBoundingBox::empty(1920, 1080);
        assert!(!bbox.has_content());
        let (w, h) = bbox.visible_dimensions();
        assert!(w <= 0 && h <= 0);
    }

    #[test]
    fn grows_monotonically() {
        let mut bbox = VisibleBoundingBox::empty(100, 100);
        bbox.include(rect(10, 20, 30, 40));
        assert_eq!(bbox.visible_dimensions(), (21, 21));

        // A smaller rectangle inside does not shrink the box
        bbox.include(rect(15, 25, 20, 30));
        assert_eq!(bbox.visible_dimensions(), (21, 21));

        bbox.include(rect(5, 20, 30, 60));
        assert_eq!(bbox.visible_dimensions(), (26, 41));
        assert_eq!(bbox.contributions(), 3);
    }

    #[test]
    fn single_pixel() {
        let mut bbox = VisibleBoundingBox::empty(10, 10);
        bbox.include(rect(4, 4, 4, 4));
        assert_eq!(bbox.visible_dimensions(), (1, 1));
    }
}
