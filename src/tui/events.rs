use super::error::Result;
use crate::engine::board::Direction;

pub(crate) trait EventSource {
    /// Block until the next event the game cares about.
    fn next_event(&mut self) -> Result<Event>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Event {
    UserInput(Action),
    Resize,
}

/// Action is what a key press means to the game.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Reset,
    Exit,
    Ignore,
}

impl Action {
    pub(crate) fn direction(&self) -> Option<Direction> {
        match self {
            Self::MoveUp => Some(Direction::Up),
            Self::MoveDown => Some(Direction::Down),
            Self::MoveLeft => Some(Direction::Left),
            Self::MoveRight => Some(Direction::Right),
            _ => None,
        }
    }
}
