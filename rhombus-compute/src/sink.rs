use rhombus_core::PixelRect;

/// Destination for rendered colors.
///
/// Coordinates are canvas pixels; runs and boxes are given in the same
/// end-exclusive convention as `PixelRect`.
pub trait PixelSink {
    fn plot(&mut self, x: u32, y: u32, color: u32);

    /// Paint columns `x_start..=x_end` of row `y`.
    fn hline(&mut self, x_start: u32, x_end: u32, y: u32, color: u32) {
        for x in x_start..=x_end {
            self.plot(x, y, color);
        }
    }

    fn fill_rect(&mut self, rect: PixelRect, color: u32) {
        if rect.is_empty() {
            return;
        }
        for y in rect.y..rect.y_end() {
            self.hline(rect.x, rect.x_end() - 1, y, color);
        }
    }
}

/// Row-major color buffer covering the whole canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl ColorBuffer {
    /// Marks pixels no renderer has written yet
    pub const UNPAINTED: u32 = u32::MAX;

    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Self::UNPAINTED; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn row(&self, y: u32) -> &[u32] {
        let start = (y as usize) * (self.width as usize);
        &self.pixels[start..start + self.width as usize]
    }

    pub fn unpainted_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p == Self::UNPAINTED).count()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + x as usize
    }
}

impl PixelSink for ColorBuffer {
    fn plot(&mut self, x: u32, y: u32, color: u32) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.pixels[idx] = color;
        }
    }

    fn hline(&mut self, x_start: u32, x_end: u32, y: u32, color: u32) {
        if y >= self.height || x_start >= self.width {
            return;
        }
        let x_end = x_end.min(self.width - 1);
        if x_end < x_start {
            return;
        }
        let start = self.index(x_start, y);
        let end = self.index(x_end, y);
        self.pixels[start..=end].fill(color);
    }
}
