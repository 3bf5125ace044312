use super::canvas::{Canvas, Modifier};
use super::geometry::{Idx, Position, Rectangle};
use super::tuxel::Tuxel;

/// A rectangular view into a `Canvas`. All coordinates used by its methods are relative to the
/// top left corner of the buffer's rectangle.
pub(crate) struct DrawBuffer<'a> {
    canvas: &'a mut Canvas,
    rectangle: Rectangle,
    border: bool,
}

impl<'a> DrawBuffer<'a> {
    pub(crate) fn new(canvas: &'a mut Canvas, rectangle: Rectangle) -> Self {
        Self {
            canvas,
            rectangle,
            border: false,
        }
    }

    pub(crate) fn rectangle(&self) -> Rectangle {
        self.rectangle
    }

    /// The area of the buffer that is not covered by its border.
    pub(crate) fn inner(&self) -> Rectangle {
        if self.border {
            self.rectangle.shrink_by(1, 1)
        } else {
            self.rectangle
        }
    }

    pub(crate) fn modify(&mut self, modifier: Modifier) {
        let r = self.rectangle;
        for y in 0..r.height() {
            for x in 0..r.width() {
                let tuxel = self.get_tuxel(Position::Idx(x, y));
                match modifier {
                    Modifier::SetForegroundColor(c) => tuxel.set_fgcolor(c),
                    Modifier::SetBackgroundColor(c) => tuxel.set_bgcolor(c),
                    Modifier::Bold => tuxel.set_bold(),
                }
            }
        }
    }

    pub(crate) fn fill(&mut self, c: char) {
        let inner = self.inner();
        let (x0, y0) = (
            inner.x() - self.rectangle.x(),
            inner.y() - self.rectangle.y(),
        );
        for y in y0..y0 + inner.height() {
            for x in x0..x0 + inner.width() {
                self.get_tuxel(Position::Idx(x, y)).set_content(c);
            }
        }
    }

    pub(crate) fn write_left(&mut self, s: &str) {
        let y = self.rectangle.height() / 2;
        let (x, available_width) = self.available();
        for (offset, c) in s.chars().take(available_width).enumerate() {
            self.get_tuxel(Position::Idx(x + offset, y)).set_content(c);
        }
    }

    pub(crate) fn write_right(&mut self, s: &str) {
        let y = self.rectangle.height() / 2;
        let (x, available_width) = self.available();
        if available_width == 0 {
            return;
        }
        let last = x + available_width - 1;
        for (offset, c) in s.chars().rev().take(available_width).enumerate() {
            self.get_tuxel(Position::Idx(last - offset, y)).set_content(c);
        }
    }

    pub(crate) fn write_center(&mut self, s: &str) {
        let y = self.rectangle.height() / 2;
        let (x, available_width) = self.available();
        let len = s.chars().count();
        let x_offset = if len >= available_width {
            x
        } else {
            x + (available_width - len) / 2
        };
        for (offset, c) in s.chars().take(available_width).enumerate() {
            self.get_tuxel(Position::Idx(x_offset + offset, y))
                .set_content(c);
        }
    }

    /// Write `s` on the given row of the buffer, starting at the left edge.
    pub(crate) fn write_line(&mut self, y: usize, s: &str) {
        let (x, available_width) = self.available();
        if y >= self.rectangle.height() {
            return;
        }
        for (offset, c) in s.chars().take(available_width).enumerate() {
            self.get_tuxel(Position::Idx(x + offset, y)).set_content(c);
        }
    }

    pub(crate) fn draw_border(&mut self) {
        let box_corner = boxy::Char::upper_left(boxy::Weight::Doubled);
        let box_horizontal: char = boxy::Char::horizontal(boxy::Weight::Doubled).into();
        let box_vertical: char = boxy::Char::vertical(boxy::Weight::Doubled).into();
        if self.rectangle.height() < 2 || self.rectangle.width() < 2 {
            // can only draw a border around at least a 2x2 area
            return;
        }
        let (width, height) = (self.rectangle.width(), self.rectangle.height());

        // draw corners
        self.get_tuxel(Position::TopLeft)
            .set_content(box_corner.clone().into());
        self.get_tuxel(Position::TopRight)
            .set_content(box_corner.clone().rotate_cw(1).into());
        self.get_tuxel(Position::BottomRight)
            .set_content(box_corner.clone().rotate_cw(2).into());
        self.get_tuxel(Position::BottomLeft)
            .set_content(box_corner.clone().rotate_ccw(1).into());

        // draw non-corner top and bottom
        for x in 1..width - 1 {
            self.get_tuxel(Position::Idx(x, 0))
                .set_content(box_horizontal);
            self.get_tuxel(Position::Idx(x, height - 1))
                .set_content(box_horizontal);
        }

        // draw non-corner sides
        for y in 1..height - 1 {
            self.get_tuxel(Position::Idx(0, y)).set_content(box_vertical);
            self.get_tuxel(Position::Idx(width - 1, y))
                .set_content(box_vertical);
        }

        self.border = true;
    }

    fn available(&self) -> (usize, usize) {
        if self.border {
            (1, self.rectangle.width().saturating_sub(2))
        } else {
            (0, self.rectangle.width())
        }
    }

    fn get_tuxel(&mut self, pos: Position) -> &mut Tuxel {
        let (x, y) = self.rectangle.relative_idx(&pos);
        debug_assert!(x < self.rectangle.width() && y < self.rectangle.height());
        self.canvas
            .tuxel_mut(Idx(self.rectangle.x() + x, self.rectangle.y() + y))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tui::colors::Rgb;
    use crate::tui::geometry::Bounds2D;
    use rstest::*;

    fn rectangle(x: usize, y: usize, width: usize, height: usize) -> Rectangle {
        Rectangle(Idx(x, y), Bounds2D(width, height))
    }

    #[rstest]
    #[case::left("12", "12    ")]
    #[case::truncated("1234567", "123456")]
    fn write_left(#[case] s: &str, #[case] expected: &str) {
        let mut canvas = Canvas::new(6, 1);
        canvas.get_layer().write_left(s);
        assert_eq!(canvas.row_text(0), expected);
    }

    #[rstest]
    #[case::short("2", "     2")]
    #[case::full("131072", "131072")]
    #[case::keeps_low_digits("1234567", "234567")]
    fn write_right(#[case] s: &str, #[case] expected: &str) {
        let mut canvas = Canvas::new(6, 1);
        canvas.get_layer().write_right(s);
        assert_eq!(canvas.row_text(0), expected);
    }

    #[rstest]
    #[case::even("ab", "  ab  ")]
    #[case::odd("abc", " abc  ")]
    fn write_center(#[case] s: &str, #[case] expected: &str) {
        let mut canvas = Canvas::new(6, 1);
        canvas.get_layer().write_center(s);
        assert_eq!(canvas.row_text(0), expected);
    }

    #[test]
    fn border_and_fill_stay_inside() -> crate::tui::error::Result<()> {
        let mut canvas = Canvas::new(6, 4);
        {
            let mut buf = canvas.get_draw_buffer(rectangle(1, 0, 4, 3))?;
            buf.draw_border();
            buf.fill('x');
            assert_eq!(buf.inner(), rectangle(2, 1, 2, 1));
        }
        for y in 0..3 {
            let row: Vec<char> = canvas.row_text(y).chars().collect();
            assert_eq!(row[0], ' ');
            assert_eq!(row[5], ' ');
            assert!(row[1..5].iter().all(|c| *c != ' '), "row {}", y);
        }
        assert_eq!(canvas.row_text(1).chars().skip(2).take(2).collect::<String>(), "xx");
        assert_eq!(canvas.row_text(3), "      ");
        Ok(())
    }

    #[test]
    fn modify_only_touches_buffer() -> crate::tui::error::Result<()> {
        let mut canvas = Canvas::new(4, 1);
        let red = Rgb::new(255, 0, 0);
        canvas
            .get_draw_buffer(rectangle(1, 0, 2, 1))?
            .modify(Modifier::SetBackgroundColor(red));
        let colors: Vec<_> = canvas
            .rows()
            .flatten()
            .map(|t| t.colors().1)
            .collect();
        assert_eq!(colors, vec![None, Some(red), Some(red), None]);
        Ok(())
    }
}
