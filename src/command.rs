//! Line-oriented user commands for the terminal front end.
//!
//! Each stdin line parses into one [`UserCommand`]; [`UserCommand::apply`]
//! forwards it to the session. Commands that only concern the host (`help`,
//! `quit`) are handled by the caller and apply as no-ops.

#[cfg(test)]
#[path = "command_test.rs"]
mod command_test;

use std::path::PathBuf;
use std::str::FromStr;

use canvas::camera::{Cell, PixelPoint};
use frames::GameId;

use crate::session::{Action, GameMode, SessionController, SessionError, UnknownMode};
use crate::ticker::Scheduler;
use crate::transport::Transport;

/// Usage text printed by `help`.
pub const HELP: &str = "\
commands:
  mode new|file|saved   open the game selection in a mode
  name <text>           set the game name (new, file)
  open <path>           choose a Life 1.06 file (file)
  pick <id>             choose a saved game (saved)
  go                    confirm the selection
  start | stop          run or pause the game
  toggle <x> <y>        flip a cell by grid coordinate
  click <px> <py>       flip the cell under a pixel
  zoom in|out           change the cell size
  resize <w> <h>        change the viewport size in pixels
  show                  redraw the board
  games                 list saved games
  help                  show this text
  quit                  leave";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{command}` needs {argument}")]
    MissingArgument { command: &'static str, argument: &'static str },
    #[error("`{command}`: `{value}` is not a whole number")]
    InvalidNumber { command: &'static str, value: String },
    #[error(transparent)]
    Mode(#[from] UnknownMode),
    #[error("zoom direction must be `in` or `out`, got `{0}`")]
    InvalidZoom(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    Mode(GameMode),
    Name(String),
    Open(PathBuf),
    Pick(GameId),
    Go,
    Start,
    Stop,
    Toggle(Cell),
    Click(PixelPoint),
    ZoomIn,
    ZoomOut,
    Resize { width: u32, height: u32 },
    Show,
    Games,
    Help,
    Quit,
}

impl FromStr for UserCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        match word {
            "" => Err(CommandError::Empty),
            "mode" => Ok(Self::Mode(required(rest, "mode", "new, file or saved")?.parse()?)),
            "name" => Ok(Self::Name(required(rest, "name", "a game name")?.to_owned())),
            "open" => Ok(Self::Open(PathBuf::from(required(rest, "open", "a file path")?))),
            "pick" => {
                let id = required(rest, "pick", "a game id")?;
                let Ok(id) = id.parse::<GameId>();
                Ok(Self::Pick(id))
            }
            "go" => Ok(Self::Go),
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            "toggle" => {
                let (x, y) = pair(rest, "toggle", "grid coordinates <x> <y>")?;
                Ok(Self::Toggle(Cell::new(x, y)))
            }
            "click" => {
                let (x, y) = pair(rest, "click", "pixel coordinates <px> <py>")?;
                Ok(Self::Click(PixelPoint::new(x, y)))
            }
            "zoom" => match required(rest, "zoom", "`in` or `out`")? {
                "in" => Ok(Self::ZoomIn),
                "out" => Ok(Self::ZoomOut),
                other => Err(CommandError::InvalidZoom(other.to_owned())),
            },
            "resize" => {
                let (width, height) = pair(rest, "resize", "a size <w> <h>")?;
                Ok(Self::Resize { width, height })
            }
            "show" => Ok(Self::Show),
            "games" => Ok(Self::Games),
            "help" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_owned())),
        }
    }
}

impl UserCommand {
    /// Run the command against `session`.
    ///
    /// `show` and `games` only ask the host to redraw; `help` and `quit` do
    /// nothing here.
    ///
    /// # Errors
    ///
    /// Whatever the session operation returns.
    pub fn apply<T: Transport, S: Scheduler>(self, session: &mut SessionController<T, S>) -> Result<Action, SessionError> {
        match self {
            Self::Mode(mode) => session.choose_mode(mode),
            Self::Name(name) => session.set_name(name),
            Self::Open(path) => session.select_file(path),
            Self::Pick(id) => session.select_saved(id),
            Self::Go => session.confirm_selection(),
            Self::Start => session.start(),
            Self::Stop => session.stop(),
            Self::Toggle(cell) => session.toggle_cell(cell),
            Self::Click(pixel) => session.click(pixel),
            Self::ZoomIn => Ok(session.zoom_in()),
            Self::ZoomOut => Ok(session.zoom_out()),
            Self::Resize { width, height } => session.resize(width, height),
            Self::Show => Ok(Action::RenderNeeded),
            Self::Games => Ok(Action::GamesListed),
            Self::Help | Self::Quit => Ok(Action::None),
        }
    }
}

fn required<'a>(rest: &'a str, command: &'static str, argument: &'static str) -> Result<&'a str, CommandError> {
    if rest.is_empty() { Err(CommandError::MissingArgument { command, argument }) } else { Ok(rest) }
}

fn pair<N: FromStr>(rest: &str, command: &'static str, argument: &'static str) -> Result<(N, N), CommandError> {
    let mut parts = rest.split_whitespace();
    let (Some(a), Some(b), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CommandError::MissingArgument { command, argument });
    };
    let number = |value: &str| value.parse::<N>().map_err(|_| CommandError::InvalidNumber { command, value: value.to_owned() });
    Ok((number(a)?, number(b)?))
}
