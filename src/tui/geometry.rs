use super::error::{InnerError, Result};

/// Idx encapsulates the x and y coordinates of a Tuxel on the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Idx(pub usize, pub usize);

impl Idx {
    #[inline(always)]
    pub(crate) fn x(&self) -> usize {
        self.0
    }

    #[inline(always)]
    pub(crate) fn y(&self) -> usize {
        self.1
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Bounds2D(pub usize, pub usize);

impl Bounds2D {
    #[inline(always)]
    pub(crate) fn width(&self) -> usize {
        self.0
    }

    #[inline(always)]
    pub(crate) fn height(&self) -> usize {
        self.1
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Rectangle(pub Idx, pub Bounds2D);

impl Rectangle {
    #[inline(always)]
    pub(crate) fn width(&self) -> usize {
        self.1 .0
    }

    #[inline(always)]
    pub(crate) fn height(&self) -> usize {
        self.1 .1
    }

    #[inline(always)]
    pub(crate) fn x(&self) -> usize {
        self.0 .0
    }

    #[inline(always)]
    pub(crate) fn y(&self) -> usize {
        self.0 .1
    }

    #[inline(always)]
    pub(crate) fn relative_idx(&self, pos: &Position) -> (usize, usize) {
        match pos {
            Position::TopLeft => (0, 0),
            Position::TopRight => (self.width() - 1, 0),
            Position::BottomLeft => (0, self.height() - 1),
            Position::BottomRight => (self.width() - 1, self.height() - 1),
            Position::Idx(x, y) => (*x, *y),
        }
    }

    /// The exclusive x and y extents of the rectangle.
    #[inline(always)]
    pub(crate) fn extents(&self) -> (usize, usize) {
        (self.0 .0 + self.1 .0, self.0 .1 + self.1 .1)
    }

    /// Shrink the rectangle by the given margins on every side, keeping its center.
    pub(crate) fn shrink_by(&self, x: usize, y: usize) -> Rectangle {
        Rectangle(
            Idx(self.x() + x, self.y() + y),
            Bounds2D(
                self.width().saturating_sub(2 * x),
                self.height().saturating_sub(2 * y),
            ),
        )
    }

    pub(crate) fn contains_or_err(&self, other: &Rectangle) -> Result<()> {
        let (x_extent, y_extent) = self.extents();
        let (other_x, other_y) = other.extents();
        if other.x() < self.x() || other_x > x_extent {
            return Err(InnerError::OutOfBoundsX(other_x).into());
        }
        if other.y() < self.y() || other_y > y_extent {
            return Err(InnerError::OutOfBoundsY(other_y).into());
        }
        Ok(())
    }
}

pub(crate) enum Position {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Idx(usize, usize),
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::*;

    fn rectangle(x: usize, y: usize, width: usize, height: usize) -> Rectangle {
        Rectangle(Idx(x, y), Bounds2D(width, height))
    }

    #[rstest]
    #[case::origin(rectangle(0, 0, 5, 5), (5, 5))]
    #[case::offset(rectangle(3, 2, 31, 11), (34, 13))]
    fn extents(#[case] r: Rectangle, #[case] expected: (usize, usize)) {
        assert_eq!(r.extents(), expected);
    }

    #[rstest]
    #[case::by_one(rectangle(0, 0, 10, 5), 1, 1, rectangle(1, 1, 8, 3))]
    #[case::horizontal_only(rectangle(2, 2, 10, 5), 2, 0, rectangle(4, 2, 6, 5))]
    #[case::collapses(rectangle(0, 0, 2, 2), 2, 2, rectangle(2, 2, 0, 0))]
    fn shrink_by(
        #[case] initial: Rectangle,
        #[case] x: usize,
        #[case] y: usize,
        #[case] expected: Rectangle,
    ) {
        assert_eq!(initial.shrink_by(x, y), expected);
    }

    #[rstest]
    #[case::same(rectangle(0, 0, 10, 10), rectangle(0, 0, 10, 10), true)]
    #[case::inside(rectangle(0, 0, 10, 10), rectangle(2, 3, 4, 4), true)]
    #[case::too_wide(rectangle(0, 0, 10, 10), rectangle(2, 3, 9, 4), false)]
    #[case::too_tall(rectangle(0, 0, 10, 10), rectangle(0, 8, 4, 3), false)]
    #[case::left_of(rectangle(5, 5, 10, 10), rectangle(4, 5, 1, 1), false)]
    fn contains(#[case] outer: Rectangle, #[case] inner: Rectangle, #[case] expected: bool) {
        assert_eq!(outer.contains_or_err(&inner).is_ok(), expected);
    }

    #[test]
    fn relative_idx_corners() {
        let r = rectangle(4, 4, 6, 3);
        assert_eq!(r.relative_idx(&Position::TopLeft), (0, 0));
        assert_eq!(r.relative_idx(&Position::TopRight), (5, 0));
        assert_eq!(r.relative_idx(&Position::BottomLeft), (0, 2));
        assert_eq!(r.relative_idx(&Position::BottomRight), (5, 2));
        assert_eq!(r.relative_idx(&Position::Idx(1, 1)), (1, 1));
    }
}
