use super::colors::Rgb;
use super::drawbuffer::DrawBuffer;
use super::error::Result;
use super::geometry::{Bounds2D, Idx, Rectangle};
use super::tuxel::Tuxel;

/// A 2d grid of `Tuxel`s that gets flushed to the terminal by a `Renderer`.
pub(crate) struct Canvas {
    grid: Vec<Vec<Tuxel>>,
    rectangle: Rectangle,
}

impl Canvas {
    pub(crate) fn new(width: usize, height: usize) -> Self {
        let rectangle = Rectangle(Idx(0, 0), Bounds2D(width, height));
        let grid = (0..height)
            .map(|y| (0..width).map(|x| Tuxel::new(Idx(x, y))).collect())
            .collect();
        Self { grid, rectangle }
    }

    /// Borrow a rectangular region of the canvas for drawing. Fails if the region does not fit.
    pub(crate) fn get_draw_buffer(&mut self, r: Rectangle) -> Result<DrawBuffer<'_>> {
        self.rectangle.contains_or_err(&r)?;
        Ok(DrawBuffer::new(self, r))
    }

    pub(crate) fn get_layer(&mut self) -> DrawBuffer<'_> {
        let r = self.rectangle;
        DrawBuffer::new(self, r)
    }

    pub(crate) fn dimensions(&self) -> (usize, usize) {
        (self.rectangle.width(), self.rectangle.height())
    }

    pub(crate) fn clear(&mut self) {
        for tuxel in self.grid.iter_mut().flatten() {
            tuxel.clear();
        }
    }

    pub(crate) fn rows(&self) -> impl Iterator<Item = &[Tuxel]> {
        self.grid.iter().map(|row| row.as_slice())
    }

    /// The characters of row `y`.
    #[cfg(test)]
    pub(crate) fn row_text(&self, y: usize) -> String {
        self.grid
            .get(y)
            .map(|row| row.iter().map(Tuxel::content).collect())
            .unwrap_or_default()
    }

    pub(super) fn tuxel_mut(&mut self, idx: Idx) -> &mut Tuxel {
        &mut self.grid[idx.y()][idx.x()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Modifier {
    SetForegroundColor(Rgb),
    SetBackgroundColor(Rgb),
    Bold,
}
