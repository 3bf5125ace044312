use rand::RngCore;

use super::board::{Board, Direction, MoveOutcome, Score};

/// How many tiles a fresh board starts with.
const STARTING_TILES: usize = 2;

/// Decides whether a move earns a new tile.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub(crate) enum SpawnPolicy {
    /// Spawn whenever the board changed, whether by merging or by sliding.
    #[default]
    #[value(name = "any")]
    OnAnyChange,
    /// Spawn only when at least one merge happened.
    #[value(name = "merge")]
    OnMergeOnly,
}

impl SpawnPolicy {
    fn should_spawn(&self, outcome: &MoveOutcome) -> bool {
        match self {
            Self::OnAnyChange => outcome.changed(),
            Self::OnMergeOnly => outcome.merged,
        }
    }
}

/// Status of the game as shown to the player.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Status {
    Playing,
    Won,
    GameOver,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Playing => "playable",
            Self::Won => "won",
            Self::GameOver => "game over",
        };
        write!(f, "{}", s)
    }
}

/// Game is a play session: the board plus the random source that feeds the spawner.
pub(crate) struct Game {
    rng: Box<dyn RngCore>,
    board: Board,
    policy: SpawnPolicy,
}

impl Game {
    /// Initialize a new game using the given random number generator.
    pub(crate) fn new(rng: impl RngCore + 'static, policy: SpawnPolicy) -> Self {
        let mut game = Self {
            rng: Box::new(rng),
            board: Board::new(),
            policy,
        };
        game.reset();
        game
    }

    pub(crate) fn board(&self) -> &Board {
        &self.board
    }

    pub(crate) fn score(&self) -> Score {
        self.board.score()
    }

    pub(crate) fn policy(&self) -> SpawnPolicy {
        self.policy
    }

    /// Clears the board and places the starting tiles.
    pub(crate) fn reset(&mut self) {
        self.board.reset();
        for _ in 0..STARTING_TILES {
            let random_value = self.rng.next_u32();
            self.board.fill_random_cell(random_value);
        }
        log::info!("new game\n{}", self.board);
    }

    /// Shifts the board in the given direction, then spawns a tile if the spawn policy allows it.
    pub(crate) fn shift(&mut self, direction: Direction) -> MoveOutcome {
        let was_won = self.board.is_win();
        let outcome = self.board.shift(direction);
        if self.policy.should_spawn(&outcome) {
            let random_value = self.rng.next_u32();
            if !self.board.fill_random_cell(random_value) {
                log::warn!("no empty cell left to spawn into after shifting {}", direction);
            }
        }
        log::debug!(
            "shift {} -> {:?}, score {}\n{}",
            direction,
            outcome,
            self.board.score(),
            self.board
        );
        match self.status() {
            Status::Won if !was_won => log::info!("reached {}", self.board.max_tile()),
            Status::GameOver => log::info!("game over with score {}", self.board.score()),
            _ => (),
        }
        outcome
    }

    pub(crate) fn status(&self) -> Status {
        if self.board.is_win() {
            Status::Won
        } else if !self.board.can_move() {
            Status::GameOver
        } else {
            Status::Playing
        }
    }

    #[cfg(test)]
    pub(crate) fn set_board(&mut self, board: Board) {
        self.board = board;
    }
}
