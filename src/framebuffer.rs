//! Fixed-size color-indexed pixel grid.

use alloc::vec;
use alloc::vec::Vec;

use crate::color::TermColor;

/// Row-major grid of palette cells.
///
/// The buffer is allocated once and reused across frames; a render call treats
/// it as scratch space and overwrites every cell. One render-and-display
/// sequence owns it exclusively.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    cells: Vec<TermColor>,
}

impl Framebuffer {
    /// Allocates a black buffer. Dimensions come in as `u8` because cell
    /// positions must stay addressable by single-byte terminal coordinates.
    pub fn new(width: u8, height: u8) -> Self {
        let (width, height) = (width as usize, height as usize);
        Self {
            width,
            height,
            cells: vec![TermColor::Black; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cells in row-major order, top row first.
    pub fn cells(&self) -> &[TermColor] {
        &self.cells
    }

    /// Sets every cell, no partial clear.
    pub fn clear(&mut self, color: TermColor) {
        self.cells.fill(color);
    }

    /// Writes one cell from real-valued screen coordinates.
    ///
    /// Coordinates are truncated toward zero. Negative or out-of-range
    /// positions are dropped without error; off-screen geometry is expected
    /// input here, not a fault.
    pub fn paint(&mut self, x: f32, y: f32, color: TermColor) {
        if x >= 0.0 && y >= 0.0 {
            let (x, y) = (x as usize, y as usize);
            if x < self.width && y < self.height {
                self.cells[y * self.width + x] = color;
            }
        }
    }

    /// Cell at integer coordinates.
    ///
    /// # Panics
    ///
    /// If the coordinates lie outside the grid.
    pub fn get(&self, x: usize, y: usize) -> TermColor {
        assert!(x < self.width && y < self.height);
        self.cells[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_truncates_toward_zero() {
        let mut frame = Framebuffer::new(4, 4);
        frame.paint(1.9, 2.9, TermColor::Red);
        assert_eq!(frame.get(1, 2), TermColor::Red);
        assert_eq!(frame.get(2, 3), TermColor::Black);
    }

    #[test]
    fn paint_drops_negative_coordinates() {
        let mut frame = Framebuffer::new(4, 4);
        // -0.5 would truncate to 0 without the sign check.
        frame.paint(-0.5, 0.0, TermColor::Red);
        frame.paint(0.0, -0.5, TermColor::Red);
        assert!(frame.cells().iter().all(|&c| c == TermColor::Black));
    }

    #[test]
    fn paint_drops_out_of_range_coordinates() {
        let mut frame = Framebuffer::new(4, 4);
        frame.paint(4.0, 1.0, TermColor::Red);
        frame.paint(1.0, 4.0, TermColor::Red);
        frame.paint(f32::NAN, 1.0, TermColor::Red);
        assert!(frame.cells().iter().all(|&c| c == TermColor::Black));
    }

    #[test]
    fn clear_fills_every_cell() {
        let mut frame = Framebuffer::new(3, 2);
        frame.paint(1.0, 1.0, TermColor::Red);
        frame.clear(TermColor::Blue);
        assert!(frame.cells().iter().all(|&c| c == TermColor::Blue));
        assert_eq!(frame.cells().len(), 6);
    }
}
