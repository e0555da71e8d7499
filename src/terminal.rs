//! Terminal presentation: board, status line, notices and the games list.
//!
//! Everything writes to a caller-supplied [`Write`] so the front end can be
//! exercised against a byte buffer.

#[cfg(test)]
#[path = "terminal_test.rs"]
mod terminal_test;

use std::fmt;
use std::io::{self, Write};

use canvas::render;
use canvas::surface::TextSurface;

use crate::command::HELP;
use crate::session::{Action, SessionController};
use crate::ticker::Scheduler;
use crate::transport::Transport;

/// Show whatever `action` asks for.
///
/// # Errors
///
/// Propagates write failures.
pub fn present<W: Write, T: Transport, S: Scheduler>(
    out: &mut W,
    session: &SessionController<T, S>,
    action: &Action,
) -> io::Result<()> {
    match action {
        Action::None => Ok(()),
        Action::RenderNeeded => draw_board(out, session),
        Action::Notify(notice) => writeln!(out, "! {notice}"),
        Action::GamesListed => list_games(out, session),
    }
}

/// Paint the board through a [`TextSurface`] and follow it with the status line.
///
/// # Errors
///
/// Propagates write failures.
pub fn draw_board<W: Write, T: Transport, S: Scheduler>(out: &mut W, session: &SessionController<T, S>) -> io::Result<()> {
    let mut surface = TextSurface::new();
    let Ok(()) = render::execute(&session.render(), &mut surface);
    write!(out, "{surface}")?;
    write_status(out, session)
}

/// # Errors
///
/// Propagates write failures.
pub fn write_status<W: Write, T: Transport, S: Scheduler>(out: &mut W, session: &SessionController<T, S>) -> io::Result<()> {
    let viewport = session.viewport();
    writeln!(
        out,
        "[{}] {} live | {}x{}px @ {}px/cell",
        session.state().label(),
        session.board().len(),
        viewport.width(),
        viewport.height(),
        viewport.cell_size(),
    )
}

/// One line per saved game; the current pick is starred.
///
/// # Errors
///
/// Propagates write failures.
pub fn list_games<W: Write, T: Transport, S: Scheduler>(out: &mut W, session: &SessionController<T, S>) -> io::Result<()> {
    let games = session.saved_games();
    if games.is_empty() {
        return writeln!(out, "no saved games listed");
    }
    let picked = session.selection().and_then(|selection| selection.saved_id.as_ref());
    for game in games {
        let marker = if picked == Some(&game.id) { '*' } else { ' ' };
        writeln!(out, "{marker} {:>6}  {}", game.id.to_string(), game.name)?;
    }
    Ok(())
}

/// # Errors
///
/// Propagates write failures.
pub fn print_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{HELP}")
}

/// # Errors
///
/// Propagates write failures.
pub fn print_error<W: Write>(out: &mut W, error: &dyn fmt::Display) -> io::Result<()> {
    writeln!(out, "error: {error}")
}
