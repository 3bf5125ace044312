pub(crate) mod board;
pub(crate) mod cell;
pub(crate) mod game;
