use crate::engine::board::{COLUMNS, ROWS};
use crate::engine::game::{Game, Status};

use super::error::{Error, Result};
use crate::tui::canvas::{Canvas, Modifier};
use crate::tui::colors::{colors_from_value, Rgb};
use crate::tui::error::InnerError;
use crate::tui::events::{Action, Event, EventSource};
use crate::tui::geometry::{Bounds2D, Idx, Rectangle};
use crate::tui::renderer::Renderer;
use crate::tui::textbuffer::{HAlignment, TextBuffer};

/// Generates a 2048 TUI layout with one text row per board row.
///
///  2048                    score: 0
///  ╔═════════════════════════════╗
///  ║                             ║
///  ║ xxxxxx xxxxxx xxxxxx xxxxxx ║
///  ║                             ║
///  ║ xxxxxx xxxxxx xxxxxx xxxxxx ║
///  ║                             ║
///  ║ xxxxxx xxxxxx xxxxxx xxxxxx ║
///  ║                             ║
///  ║ xxxxxx xxxxxx xxxxxx xxxxxx ║
///  ║                             ║
///  ╚═════════════════════════════╝
///  status: playable
///  help text
///
const BOARD_FIXED_X_OFFSET: usize = 2;
const BOARD_FIXED_Y_OFFSET: usize = 1;
const BOARD_BORDER_WIDTH: usize = 1;
const BOARD_X_PADDING: usize = 1;
const BOARD_Y_PADDING: usize = 1;
const TILE_WIDTH: usize = 6;
const TILE_SPACING: usize = 1;
const BOARD_WIDTH: usize =
    2 * BOARD_BORDER_WIDTH + BOARD_X_PADDING + COLUMNS * (TILE_WIDTH + TILE_SPACING);
const BOARD_HEIGHT: usize = 2 * BOARD_BORDER_WIDTH + BOARD_Y_PADDING + 2 * ROWS;
const STATUS_Y: usize = BOARD_FIXED_Y_OFFSET + BOARD_HEIGHT;
const HELP_Y: usize = STATUS_Y + 1;
const HELP_HEIGHT: usize = 4;

const HELP_TEXT: &str = "arrow keys or h/j/k/l to move, r to reset, q or esc to exit";
const TOO_SMALL_TEXT: &str = "the terminal is too small for the board, try resizing it!";

/// The smallest terminal the full layout fits in.
fn minimum_size() -> (usize, usize) {
    (BOARD_FIXED_X_OFFSET + BOARD_WIDTH, HELP_Y + HELP_HEIGHT)
}

fn tile_rectangle(row: usize, column: usize) -> Rectangle {
    let x_offset = BOARD_FIXED_X_OFFSET + BOARD_BORDER_WIDTH + BOARD_X_PADDING;
    let y_offset = BOARD_FIXED_Y_OFFSET + BOARD_BORDER_WIDTH + BOARD_Y_PADDING;
    Rectangle(
        Idx(
            x_offset + (TILE_WIDTH + TILE_SPACING) * column,
            y_offset + 2 * row,
        ),
        Bounds2D(TILE_WIDTH, 1),
    )
}

/// Draws the title, board, status line and help text of `game` onto `canvas`.
fn draw_game(game: &Game, canvas: &mut Canvas) -> crate::tui::error::Result<()> {
    let (cwidth, cheight) = canvas.dimensions();
    let (min_width, min_height) = minimum_size();
    if cwidth < min_width || cheight < min_height {
        return Err(InnerError::TerminalTooSmall(min_width, min_height).into());
    }

    let mut title = canvas.get_draw_buffer(Rectangle(
        Idx(BOARD_FIXED_X_OFFSET, 0),
        Bounds2D(BOARD_WIDTH, 1),
    ))?;
    title.write_right(&format!("score: {}", game.score()));
    title.write_left("2048");
    title.modify(Modifier::Bold);

    let mut board = canvas.get_draw_buffer(Rectangle(
        Idx(BOARD_FIXED_X_OFFSET, BOARD_FIXED_Y_OFFSET),
        Bounds2D(BOARD_WIDTH, BOARD_HEIGHT),
    ))?;
    board.draw_border();
    board.fill(' ');
    board.modify(Modifier::SetForegroundColor(Rgb::new(90, 120, 160)));
    board.modify(Modifier::Bold);

    let (columns, rows) = game.board().dimensions();
    for row in 0..rows {
        for column in 0..columns {
            let value = game.board().get(row, column);
            if value == 0 {
                continue;
            }
            let mut tile = canvas.get_draw_buffer(tile_rectangle(row, column))?;
            let colors = colors_from_value(value);
            tile.modify(Modifier::SetBackgroundColor(colors.background));
            tile.modify(Modifier::SetForegroundColor(colors.foreground));
            tile.write_right(&format!("{}", value));
        }
    }

    let mut status = canvas.get_draw_buffer(Rectangle(
        Idx(BOARD_FIXED_X_OFFSET, STATUS_Y),
        Bounds2D(BOARD_WIDTH, 1),
    ))?;
    status.write_left(&format!("status: {}", game.status()));
    if game.status() != Status::Playing {
        status.modify(Modifier::Bold);
    }

    let mut help = TextBuffer::new(HAlignment::Left);
    help.write(HELP_TEXT);
    help.write(&format!(
        "{} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    ));
    help.flush(&mut canvas.get_draw_buffer(Rectangle(
        Idx(BOARD_FIXED_X_OFFSET, HELP_Y),
        Bounds2D(BOARD_WIDTH, HELP_HEIGHT),
    ))?);

    Ok(())
}

fn draw_too_small(canvas: &mut Canvas) {
    let mut message = TextBuffer::new(HAlignment::Center);
    message.write(TOO_SMALL_TEXT);
    message.flush(&mut canvas.get_layer());
}

pub(crate) struct Tui2048<R: Renderer, E: EventSource> {
    renderer: R,
    event_source: E,
    canvas: Canvas,
    game: Game,
}

impl<R: Renderer, E: EventSource> Tui2048<R, E> {
    pub(crate) fn new(game: Game, renderer: R, event_source: E) -> Result<Self> {
        let (width, height) = renderer.size_hint()?;
        Ok(Self {
            game,
            renderer,
            event_source,
            canvas: Canvas::new(width as usize, height as usize),
        })
    }

    /// Run consumes the Tui2048 instance and takes control of the terminal to begin gameplay. It
    /// returns once the player asks to exit.
    pub(crate) fn run(mut self) -> Result<()> {
        match self.inner_run() {
            Err(e) => {
                log::error!("{:?}", e);
                let _ = self.renderer.clear();
                Err(e)
            }
            Ok(_) => Ok(()),
        }
    }

    fn inner_run(&mut self) -> Result<()> {
        self.resize()?;

        loop {
            self.draw()?;
            self.renderer.render(&self.canvas)?;

            match self.event_source.next_event()? {
                Event::UserInput(Action::Exit) => break,
                Event::UserInput(action) => self.handle(action),
                Event::Resize => {
                    self.resize()?;
                    self.renderer.clear()?;
                }
            }
        }
        log::info!("exiting with score {}", self.game.score());
        Ok(())
    }
}

impl<R: Renderer, E: EventSource> Tui2048<R, E> {
    fn resize(&mut self) -> Result<()> {
        let (width, height) = self.renderer.size_hint()?;
        log::debug!("resizing canvas to {} x {}", width, height);
        self.canvas = Canvas::new(width as usize, height as usize);
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        self.canvas.clear();
        match draw_game(&self.game, &mut self.canvas).map_err(Error::from) {
            Ok(()) => Ok(()),
            Err(Error::TuiError { source }) if source.is_terminal_too_small() => {
                log::warn!("{}", source);
                self.canvas.clear();
                draw_too_small(&mut self.canvas);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn handle(&mut self, action: Action) {
        if let Some(direction) = action.direction() {
            self.game.shift(direction);
            return;
        }
        match action {
            Action::Reset => self.game.reset(),
            Action::Ignore => (),
            _ => unreachable!("moves and exit are handled by the caller"),
        }
    }
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use rand::rngs::mock::StepRng;
    use rstest::*;

    use super::*;
    use crate::engine::board::Board;
    use crate::engine::game::SpawnPolicy;

    type Frames = Rc<RefCell<Vec<Vec<String>>>>;

    struct RecordingRenderer {
        size: (u16, u16),
        frames: Frames,
    }

    impl Renderer for RecordingRenderer {
        fn size_hint(&self) -> crate::tui::error::Result<(u16, u16)> {
            Ok(self.size)
        }

        fn render(&mut self, c: &Canvas) -> crate::tui::error::Result<()> {
            let (_, height) = c.dimensions();
            self.frames
                .borrow_mut()
                .push((0..height).map(|y| c.row_text(y)).collect());
            Ok(())
        }

        fn clear(&mut self) -> crate::tui::error::Result<()> {
            Ok(())
        }
    }

    struct ScriptedEvents {
        events: VecDeque<Event>,
    }

    impl EventSource for ScriptedEvents {
        fn next_event(&mut self) -> crate::tui::error::Result<Event> {
            Ok(self
                .events
                .pop_front()
                .unwrap_or(Event::UserInput(Action::Exit)))
        }
    }

    fn run(game: Game, size: (u16, u16), events: Vec<Event>) -> Vec<Vec<String>> {
        let frames = Frames::default();
        let renderer = RecordingRenderer {
            size,
            frames: frames.clone(),
        };
        let events = ScriptedEvents {
            events: events.into(),
        };
        Tui2048::new(game, renderer, events)
            .expect("creating the ui")
            .run()
            .expect("running the ui");
        let recorded = frames.borrow().clone();
        recorded
    }

    fn zero_game() -> Game {
        Game::new(StepRng::new(0, 0), SpawnPolicy::OnAnyChange)
    }

    fn input(action: Action) -> Event {
        Event::UserInput(action)
    }

    /// The text of the tile field at the given board position.
    fn tile_text(frame: &[String], row: usize, column: usize) -> String {
        let r = tile_rectangle(row, column);
        frame[r.y()].chars().skip(r.x()).take(r.width()).collect()
    }

    fn board_text(frame: &[String]) -> Vec<Vec<String>> {
        (0..ROWS)
            .map(|r| (0..COLUMNS).map(|c| tile_text(frame, r, c)).collect())
            .collect()
    }

    const SIZE: (u16, u16) = (80, 24);

    #[test]
    fn renders_initial_board_then_exits() {
        let frames = run(zero_game(), SIZE, vec![]);
        assert_eq!(frames.len(), 1);
        let frame = &frames[0];
        assert!(frame[0].contains("2048"));
        assert!(frame[0].contains("score: 0"));
        assert_eq!(tile_text(frame, 0, 0), "     2");
        assert_eq!(tile_text(frame, 0, 1), "     2");
        assert_eq!(tile_text(frame, 3, 3), "      ");
        assert!(frame[STATUS_Y].contains("status: playable"));
        assert!(frame[HELP_Y].contains("arrow keys"));
    }

    #[test]
    fn move_merges_and_spawns() {
        let frames = run(zero_game(), SIZE, vec![input(Action::MoveLeft)]);
        assert_eq!(frames.len(), 2);
        let after = &frames[1];
        assert_eq!(tile_text(after, 0, 0), "     4");
        assert_eq!(tile_text(after, 0, 1), "     2");
        assert!(after[0].contains("score: 4"));
    }

    #[test]
    fn ignored_keys_leave_board_alone() {
        let frames = run(zero_game(), SIZE, vec![input(Action::Ignore)]);
        assert_eq!(frames.len(), 2);
        assert_eq!(board_text(&frames[0]), board_text(&frames[1]));
    }

    #[test]
    fn reset_restores_starting_board() {
        let frames = run(
            zero_game(),
            SIZE,
            vec![
                input(Action::MoveLeft),
                input(Action::MoveDown),
                input(Action::Reset),
            ],
        );
        assert_eq!(frames.len(), 4);
        assert_ne!(board_text(&frames[0]), board_text(&frames[2]));
        assert_eq!(board_text(&frames[0]), board_text(&frames[3]));
        assert!(frames[3][0].contains("score: 0"));
    }

    #[rstest]
    #[case::won(
        [[2048, 0, 0, 0], [0; 4], [0; 4], [0; 4]],
        "status: won"
    )]
    #[case::game_over(
        [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]],
        "status: game over"
    )]
    fn status_line(#[case] rows: [[u32; 4]; 4], #[case] expected: &str) {
        let mut game = zero_game();
        game.set_board(Board::from(rows));
        let frames = run(game, SIZE, vec![]);
        assert!(frames[0][STATUS_Y].contains(expected), "{:?}", frames[0][STATUS_Y]);
    }

    #[test]
    fn tiles_render_right_aligned() {
        let mut game = zero_game();
        game.set_board(Board::from([[131072, 2048, 16, 0], [0; 4], [0; 4], [0; 4]]));
        let frames = run(game, SIZE, vec![]);
        assert_eq!(
            board_text(&frames[0])[0],
            vec!["131072", "  2048", "    16", "      "]
        );
    }

    #[test]
    fn small_terminal_shows_message() {
        let frames = run(zero_game(), (20, 6), vec![input(Action::MoveLeft), Event::Resize]);
        assert_eq!(frames.len(), 3);
        for frame in frames {
            let text = frame.join(" ");
            assert!(text.contains("terminal is too"), "{:?}", frame);
            assert!(!text.contains("status:"));
        }
    }

    #[test]
    fn layout_fits_minimum_size() {
        let (width, height) = minimum_size();
        let frames = run(zero_game(), (width as u16, height as u16), vec![]);
        assert!(frames[0][STATUS_Y].contains("status: playable"));
    }
}
