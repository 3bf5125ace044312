/// The numeric value held by a tile. Empty cells hold 0.
pub(crate) type Card = u32;

/// Cell is a single slot of the board: either empty or a tile whose value is a power of two.
///
/// A cell also remembers whether it was produced by a merge during the move currently being
/// applied. That marker only lives for the duration of a single move; the board clears it before
/// the move returns.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Cell {
    value: Card,
    collapsed: bool,
}

impl Cell {
    pub(crate) const EMPTY: Cell = Cell {
        value: 0,
        collapsed: false,
    };

    pub(crate) fn new(value: Card) -> Self {
        debug_assert!(
            value == 0 || (value >= 2 && value.is_power_of_two()),
            "invalid tile value {}",
            value
        );
        Self {
            value,
            collapsed: false,
        }
    }

    #[inline(always)]
    pub(crate) fn value(&self) -> Card {
        self.value
    }

    #[inline(always)]
    pub(crate) fn is_empty(&self) -> bool {
        self.value == 0
    }

    #[inline(always)]
    pub(crate) fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Whether this cell may absorb `other` in the current move.
    pub(crate) fn can_merge(&self, other: &Cell) -> bool {
        !self.is_empty()
            && !self.is_collapsed()
            && !other.is_collapsed()
            && self.value == other.value
    }

    /// Doubles the tile and marks it as collapsed for the rest of the move.
    pub(crate) fn merged(&self) -> Cell {
        Cell {
            value: self.value * 2,
            collapsed: true,
        }
    }

    pub(crate) fn settle(&mut self) {
        self.collapsed = false;
    }
}

impl From<Card> for Cell {
    fn from(value: Card) -> Self {
        Cell::new(value)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "{:>6}", "")
        } else {
            write!(f, "{:>6}", self.value)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_is_empty() {
        assert_eq!(Cell::default(), Cell::EMPTY);
        assert!(Cell::EMPTY.is_empty());
    }

    #[test]
    fn merged_cell_cannot_merge_again() {
        let two = Cell::new(2);
        assert!(two.can_merge(&Cell::new(2)));

        let four = two.merged();
        assert_eq!(four.value(), 4);
        assert!(four.is_collapsed());
        assert!(!four.can_merge(&Cell::new(4)));
        assert!(!Cell::new(4).can_merge(&four));
    }

    #[test]
    fn empty_cells_never_merge() {
        assert!(!Cell::EMPTY.can_merge(&Cell::EMPTY));
        assert!(!Cell::new(2).can_merge(&Cell::EMPTY));
    }

    #[test]
    fn settle_clears_marker() {
        let mut c = Cell::new(8).merged();
        c.settle();
        assert_eq!(c, Cell::new(16));
    }

    #[test]
    fn display_right_aligns_value() {
        assert_eq!(format!("{}", Cell::new(2048)), "  2048");
        assert_eq!(format!("{}", Cell::EMPTY), "      ");
    }
}
