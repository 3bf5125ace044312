use std::io::Write;

use crossterm::{
    cursor,
    event::{self, Event as CrossTermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{self, Attribute, Color},
    terminal, ExecutableCommand, QueueableCommand,
};

use super::canvas::Canvas;
use super::colors::Rgb;
use super::error::Result;
use super::events::{Action, Event, EventSource};
use super::renderer::Renderer;

/// Renders a `Canvas` to a terminal through crossterm. The terminal is switched to raw mode and
/// the alternate screen for as long as this value lives.
pub(crate) struct Crossterm<W: Write> {
    w: W,
}

impl<W: Write> Crossterm<W> {
    pub(crate) fn new(mut w: W) -> Result<Self> {
        terminal::enable_raw_mode()?;
        w.execute(terminal::EnterAlternateScreen)?;
        w.execute(cursor::Hide)?;
        Ok(Self { w })
    }

    fn queue_style(&mut self, fg: Option<Rgb>, bg: Option<Rgb>, bold: bool) -> Result<()> {
        self.w.queue(style::SetAttribute(Attribute::Reset))?;
        self.w.queue(style::ResetColor)?;
        if let Some(c) = fg {
            self.w.queue(style::SetForegroundColor(c.into()))?;
        }
        if let Some(c) = bg {
            self.w.queue(style::SetBackgroundColor(c.into()))?;
        }
        if bold {
            self.w.queue(style::SetAttribute(Attribute::Bold))?;
        }
        Ok(())
    }
}

impl<W: Write> Drop for Crossterm<W> {
    fn drop(&mut self) {
        let restored = self
            .w
            .execute(style::ResetColor)
            .and_then(|w| w.execute(cursor::Show))
            .and_then(|w| w.execute(terminal::LeaveAlternateScreen))
            .and_then(|_| terminal::disable_raw_mode());
        if let Err(e) = restored {
            log::error!("failed to restore terminal: {}", e);
        }
    }
}

impl<W: Write> Renderer for Crossterm<W> {
    fn size_hint(&self) -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    fn render(&mut self, c: &Canvas) -> Result<()> {
        self.w.queue(terminal::BeginSynchronizedUpdate)?;
        let mut current = None;
        for row in c.rows() {
            if let Some(first) = row.first() {
                let (x, y) = first.coordinates();
                self.w.queue(cursor::MoveTo(x as u16, y as u16))?;
            }
            for tuxel in row {
                let (fg, bg) = tuxel.colors();
                let style = (fg, bg, tuxel.bold());
                if current != Some(style) {
                    self.queue_style(fg, bg, tuxel.bold())?;
                    current = Some(style);
                }
                self.w.queue(style::Print(tuxel.content()))?;
            }
        }
        self.w.queue(style::SetAttribute(Attribute::Reset))?;
        self.w.queue(style::ResetColor)?;
        self.w.queue(terminal::EndSynchronizedUpdate)?;
        self.w.flush()?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.w.queue(style::SetBackgroundColor(Color::Reset))?;
        self.w.queue(terminal::Clear(terminal::ClearType::All))?;
        self.w.flush()?;
        Ok(())
    }
}

/// Reads terminal events from crossterm.
#[derive(Default)]
pub(crate) struct CrosstermEvents {}

impl EventSource for CrosstermEvents {
    /// Block until the next Crossterm event.
    fn next_event(&mut self) -> Result<Event> {
        loop {
            match event::read()? {
                CrossTermEvent::Key(ke) if ke.kind == KeyEventKind::Release => continue,
                CrossTermEvent::Key(ke) => {
                    let action = translate_key(ke);
                    log::trace!("key {:?} -> {:?}", ke.code, action);
                    return Ok(Event::UserInput(action));
                }
                CrossTermEvent::Resize(_, _) => return Ok(Event::Resize),
                _ => continue,
            };
        }
    }
}

/// Map a key press to the action it stands for.
pub(crate) fn translate_key(ke: KeyEvent) -> Action {
    if ke.code == KeyCode::Char('c') && ke.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Exit;
    }
    match ke.code {
        KeyCode::Left | KeyCode::Char('h') => Action::MoveLeft,
        KeyCode::Right | KeyCode::Char('l') => Action::MoveRight,
        KeyCode::Up | KeyCode::Char('k') => Action::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => Action::MoveDown,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Exit,
        KeyCode::Char('r') | KeyCode::Char('R') => Action::Reset,
        _ => Action::Ignore,
    }
}
