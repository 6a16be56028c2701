use serde::{Deserialize, Serialize};

/// Rectangle in pixel space (always u32 coordinates)
///
/// Covers columns `x..x + width` and rows `y..y + height`, end exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whole canvas starting at the origin
    pub fn full_canvas(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// One past the last column
    pub fn x_end(&self) -> u32 {
        self.x + self.width
    }

    /// One past the last row
    pub fn y_end(&self) -> u32 {
        self.y + self.height
    }

    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.x_end() && py >= self.y && py < self.y_end()
    }

    /// Split at the (floored) midpoint into top-left, top-right, bottom-left,
    /// bottom-right. Quadrants tile the rectangle exactly; some may be empty
    /// when a side is a single pixel.
    pub fn quadrants(&self) -> [PixelRect; 4] {
        let left = self.width / 2;
        let top = self.height / 2;
        let mid_x = self.x + left;
        let mid_y = self.y + top;
        [
            PixelRect::new(self.x, self.y, left, top),
            PixelRect::new(mid_x, self.y, self.width - left, top),
            PixelRect::new(self.x, mid_y, left, self.height - top),
            PixelRect::new(mid_x, mid_y, self.width - left, self.height - top),
        ]
    }
}
