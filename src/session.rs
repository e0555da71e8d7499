//! Client session: game selection, run lifecycle and the authoritative board.
//!
//! SYSTEM CONTEXT
//! ==============
//! One [`SessionController`] owns everything mutable on the client: the
//! session state, the live-cell set last confirmed by the authority, the
//! saved-games list and the viewport. User commands, ticks and inbound
//! events are all handled on the caller's turn; nothing here blocks.
//!
//! LIFECYCLE
//! =========
//! ```text
//! Idle ──choose_mode──▶ AwaitingEntry ──game_created / game_loaded──▶ Stopped ◀──stop── Playing
//!                                                                       └────start────▶
//! ```
//! The board is replaced wholesale by every authoritative update and is never
//! edited locally; toggles wait for `point_toggeled`. Rejections from the
//! authority (`error`, `game_locked`) surface as [`Notice`]s and change nothing.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use canvas::camera::{Cell, PixelPoint, Viewport};
use canvas::consts::MAX_VIEWPORT_SIZE;
use canvas::render::{self, DrawCommand};
use frames::{GameId, GameSummary, Inbound, Outbound, WirePoint};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::lif::{self, ParseError};
use crate::ticker::{MOVE_INTERVAL, Scheduler, TickerHandle};
use crate::transport::{Transport, TransportError};

// =============================================================================
// ERRORS
// =============================================================================

/// Missing user input, or an action the current state does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("please enter a game name")]
    MissingName,
    #[error("please select a file to load")]
    MissingFile,
    #[error("please select a saved game")]
    MissingSavedGame,
    #[error("choose a game mode first")]
    NotSelecting,
    #[error("no game has been entered yet")]
    NotEntered,
    #[error("the board cannot be edited while the game is running")]
    EditWhileRunning,
    #[error("viewport {width}x{height} is larger than {max}px per side", max = MAX_VIEWPORT_SIZE)]
    ViewportTooLarge { width: u32, height: u32 },
}

/// Error returned by user-initiated session operations.
///
/// Every variant leaves the session as it was; the user fixes the input and
/// tries again.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("board file rejected: {0}")]
    Parse(#[from] ParseError),
    #[error("failed to read {}: {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error(transparent)]
    Transport(#[from] TransportError),
}

// =============================================================================
// SELECTION
// =============================================================================

/// How the next game is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Empty board under a new name.
    New,
    /// New game seeded from a Life 1.06 file.
    File,
    /// Reopen a stored game.
    Saved,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::New => "new",
            Self::File => "file",
            Self::Saved => "saved",
        })
    }
}

/// Error returned when a mode name is not `new`, `file` or `saved`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown game mode `{0}` (expected new, file or saved)")]
pub struct UnknownMode(pub String);

impl FromStr for GameMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "file" => Ok(Self::File),
            "saved" => Ok(Self::Saved),
            other => Err(UnknownMode(other.to_owned())),
        }
    }
}

/// The selection form: mode plus whatever the user has filled in so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSelection {
    pub mode: GameMode,
    pub name: Option<String>,
    pub file: Option<PathBuf>,
    pub saved_id: Option<GameId>,
}

impl GameSelection {
    #[must_use]
    pub fn new(mode: GameMode) -> Self {
        Self { mode, name: None, file: None, saved_id: None }
    }

    /// Validate the form and build the entry request.
    ///
    /// File mode reads and parses the board file here, so a bad file never
    /// produces a request.
    ///
    /// # Errors
    ///
    /// [`ValidationError`] for missing fields, [`SessionError::Io`] and
    /// [`SessionError::Parse`] for the board file.
    pub fn request(&self) -> Result<Outbound, SessionError> {
        match self.mode {
            GameMode::New => Ok(Outbound::NewGame { name: self.trimmed_name()?, board_actives: None }),
            GameMode::File => {
                let name = self.trimmed_name()?;
                let path = self.file.as_deref().ok_or(ValidationError::MissingFile)?;
                let board = lif::parse_file(path)?;
                Ok(Outbound::NewGame { name, board_actives: Some(board.wire_points()) })
            }
            GameMode::Saved => {
                let game_id = self.saved_id.clone().ok_or(ValidationError::MissingSavedGame)?;
                Ok(Outbound::LoadGame { game_id })
            }
        }
    }

    fn trimmed_name(&self) -> Result<String, ValidationError> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .ok_or(ValidationError::MissingName)
    }
}

// =============================================================================
// STATE
// =============================================================================

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing chosen yet.
    #[default]
    Idle,
    /// Filling in or waiting on a game selection.
    AwaitingEntry(GameSelection),
    /// Ticking: one `play_move` per interval; editing is disabled.
    Playing,
    /// Entered and editable, not ticking.
    Stopped,
}

impl SessionState {
    /// True only while [`SessionState::Playing`].
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Short name for logs and status lines.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingEntry(_) => "awaiting-entry",
            Self::Playing => "playing",
            Self::Stopped => "stopped",
        }
    }
}

/// A message for the user that does not come from their own input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The requested game is held by another client.
    Locked(String),
    /// The authority rejected a request.
    Rejected(String),
    /// The authority has no stored games.
    NoSavedGames,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locked(message) | Self::Rejected(message) => f.write_str(message),
            Self::NoSavedGames => f.write_str("No saved games found."),
        }
    }
}

/// What the host should do after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    /// Board or viewport changed; repaint.
    RenderNeeded,
    /// Show a notification.
    Notify(Notice),
    /// The saved-games list changed.
    GamesListed,
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Owns the session state, board, viewport and the transport/ticker seams.
pub struct SessionController<T, S> {
    id: Uuid,
    state: SessionState,
    board: HashSet<Cell>,
    viewport: Viewport,
    saved_games: Vec<GameSummary>,
    ticker: Option<TickerHandle>,
    next_ticker: u64,
    transport: T,
    scheduler: S,
}

impl<T: Transport, S: Scheduler> SessionController<T, S> {
    #[must_use]
    pub fn new(transport: T, scheduler: S, viewport: Viewport) -> Self {
        let id = Uuid::new_v4();
        info!(session = %id, "session created");
        Self {
            id,
            state: SessionState::Idle,
            board: HashSet::new(),
            viewport,
            saved_games: Vec::new(),
            ticker: None,
            next_ticker: 0,
            transport,
            scheduler,
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// The selection form, while one is open.
    #[must_use]
    pub fn selection(&self) -> Option<&GameSelection> {
        match &self.state {
            SessionState::AwaitingEntry(selection) => Some(selection),
            _ => None,
        }
    }

    /// Live cells as last confirmed by the authority.
    #[must_use]
    pub fn board(&self) -> &HashSet<Cell> {
        &self.board
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn saved_games(&self) -> &[GameSummary] {
        &self.saved_games
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Draw commands for the current board and viewport.
    #[must_use]
    pub fn render(&self) -> Vec<DrawCommand> {
        render::render(&self.board, &self.viewport)
    }

    // --- Selection ---

    /// Open the selection form in `mode`, keeping fields already filled in.
    ///
    /// Allowed from any state; a running ticker is cancelled without sending
    /// `stop`. Saved mode requests the stored games list.
    ///
    /// # Errors
    ///
    /// [`SessionError::Transport`] if the list request cannot be queued; the
    /// state is left unchanged in that case.
    pub fn choose_mode(&mut self, mode: GameMode) -> Result<Action, SessionError> {
        if mode == GameMode::Saved {
            self.emit(Outbound::GetAllGames {})?;
        }
        self.cancel_ticker();
        let selection = match std::mem::take(&mut self.state) {
            SessionState::AwaitingEntry(previous) => GameSelection { mode, ..previous },
            _ => GameSelection::new(mode),
        };
        self.state = SessionState::AwaitingEntry(selection);
        info!(session = %self.id, %mode, "game mode chosen");
        Ok(Action::None)
    }

    /// # Errors
    ///
    /// [`ValidationError::NotSelecting`] outside the selection form.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<Action, SessionError> {
        self.selection_mut()?.name = Some(name.into());
        Ok(Action::None)
    }

    /// # Errors
    ///
    /// [`ValidationError::NotSelecting`] outside the selection form.
    pub fn select_file(&mut self, path: impl Into<PathBuf>) -> Result<Action, SessionError> {
        self.selection_mut()?.file = Some(path.into());
        Ok(Action::None)
    }

    /// # Errors
    ///
    /// [`ValidationError::NotSelecting`] outside the selection form.
    pub fn select_saved(&mut self, id: GameId) -> Result<Action, SessionError> {
        self.selection_mut()?.saved_id = Some(id);
        Ok(Action::None)
    }

    /// Validate the form and send exactly one `new_game` or `load_game`.
    ///
    /// The session stays in `AwaitingEntry` until the authority confirms.
    ///
    /// # Errors
    ///
    /// Any [`SessionError`]; on error nothing is sent.
    pub fn confirm_selection(&mut self) -> Result<Action, SessionError> {
        let SessionState::AwaitingEntry(selection) = &self.state else {
            return Err(ValidationError::NotSelecting.into());
        };
        let request = selection.request()?;
        info!(session = %self.id, mode = %selection.mode, request = request.name(), "entry requested");
        self.emit(request)?;
        Ok(Action::None)
    }

    // --- Run lifecycle ---

    /// Begin ticking. No-op while already playing.
    ///
    /// # Errors
    ///
    /// [`ValidationError::NotEntered`] before a game has been entered.
    pub fn start(&mut self) -> Result<Action, SessionError> {
        match self.state {
            SessionState::Playing => return Ok(Action::None),
            SessionState::Stopped => {}
            SessionState::Idle | SessionState::AwaitingEntry(_) => return Err(ValidationError::NotEntered.into()),
        }
        let handle = TickerHandle::new(self.next_ticker);
        self.next_ticker += 1;
        self.scheduler.start(handle, MOVE_INTERVAL);
        self.ticker = Some(handle);
        self.state = SessionState::Playing;
        info!(session = %self.id, ticker = handle.id(), "game started");
        Ok(Action::None)
    }

    /// One ticker period elapsed. Sends `play_move` if `handle` is the live ticker.
    ///
    /// # Errors
    ///
    /// [`SessionError::Transport`] if the request cannot be queued.
    pub fn on_tick(&mut self, handle: TickerHandle) -> Result<Action, SessionError> {
        if !self.is_running() || self.ticker != Some(handle) {
            debug!(session = %self.id, ticker = handle.id(), "stale tick dropped");
            return Ok(Action::None);
        }
        self.emit(Outbound::PlayMove {})?;
        Ok(Action::None)
    }

    /// Stop ticking and send one `stop`. No-op unless playing.
    ///
    /// The ticker is cancelled before the request is queued, so no
    /// `play_move` follows it.
    ///
    /// # Errors
    ///
    /// [`SessionError::Transport`] if `stop` cannot be queued. The session is
    /// stopped locally either way.
    pub fn stop(&mut self) -> Result<Action, SessionError> {
        if !self.is_running() {
            return Ok(Action::None);
        }
        self.cancel_ticker();
        self.state = SessionState::Stopped;
        info!(session = %self.id, "game stopped");
        self.emit(Outbound::Stop {})?;
        Ok(Action::None)
    }

    // --- Editing ---

    /// Ask the authority to flip `cell`. The board changes on confirmation only.
    ///
    /// # Errors
    ///
    /// [`ValidationError::EditWhileRunning`] while playing,
    /// [`ValidationError::NotEntered`] before entry.
    pub fn toggle_cell(&mut self, cell: Cell) -> Result<Action, SessionError> {
        match self.state {
            SessionState::Stopped => {}
            SessionState::Playing => return Err(ValidationError::EditWhileRunning.into()),
            SessionState::Idle | SessionState::AwaitingEntry(_) => return Err(ValidationError::NotEntered.into()),
        }
        self.emit(Outbound::TogglePoint { point: cell.into() })?;
        Ok(Action::None)
    }

    /// Toggle the cell under a click at `pixel`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::toggle_cell`].
    pub fn click(&mut self, pixel: PixelPoint) -> Result<Action, SessionError> {
        let cell = self.viewport.pixel_to_grid(pixel);
        debug!(session = %self.id, px = pixel.x, py = pixel.y, x = cell.x, y = cell.y, "click");
        self.toggle_cell(cell)
    }

    // --- Viewport ---

    pub fn zoom_in(&mut self) -> Action {
        Self::repaint_if(self.viewport.zoom_in())
    }

    pub fn zoom_out(&mut self) -> Action {
        Self::repaint_if(self.viewport.zoom_out())
    }

    /// # Errors
    ///
    /// [`ValidationError::ViewportTooLarge`] past [`MAX_VIEWPORT_SIZE`] on
    /// either side; the viewport is left as it was.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<Action, SessionError> {
        if width > MAX_VIEWPORT_SIZE || height > MAX_VIEWPORT_SIZE {
            return Err(ValidationError::ViewportTooLarge { width, height }.into());
        }
        self.viewport.resize(width, height);
        Ok(Action::RenderNeeded)
    }

    // --- Inbound ---

    /// Apply an event from the authority.
    pub fn handle_inbound(&mut self, event: Inbound) -> Action {
        let name = event.name();
        debug!(session = %self.id, event = name, "inbound");
        match event {
            Inbound::GameCreated { board_actives } | Inbound::GameLoaded { board_actives } => {
                self.enter(name, board_actives)
            }
            Inbound::PlayedMove { board_actives }
            | Inbound::PlayStopped { board_actives }
            | Inbound::PointToggeled { board_actives } => self.refresh(name, board_actives),
            Inbound::GameLocked { message } => {
                warn!(session = %self.id, %message, "game locked");
                Action::Notify(Notice::Locked(message))
            }
            Inbound::Error { message } => {
                warn!(session = %self.id, %message, "request rejected");
                Action::Notify(Notice::Rejected(message))
            }
            Inbound::SavedGamesList { saved_games } => self.list_games(
                saved_games
                    .into_iter()
                    .map(|name| GameSummary { id: GameId::Name(name.clone()), name })
                    .collect(),
            ),
            Inbound::AllGamesFetched { games: Some(games) } => self.list_games(games),
            Inbound::AllGamesFetched { games: None } => {
                self.saved_games.clear();
                Action::Notify(Notice::NoSavedGames)
            }
        }
    }

    // --- Internals ---

    fn emit(&mut self, event: Outbound) -> Result<(), SessionError> {
        debug!(session = %self.id, event = event.name(), "outbound");
        self.transport.emit(event)?;
        Ok(())
    }

    fn selection_mut(&mut self) -> Result<&mut GameSelection, ValidationError> {
        match &mut self.state {
            SessionState::AwaitingEntry(selection) => Ok(selection),
            _ => Err(ValidationError::NotSelecting),
        }
    }

    fn cancel_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            self.scheduler.cancel(handle);
            debug!(session = %self.id, ticker = handle.id(), "ticker cancelled");
        }
    }

    fn replace_board(&mut self, points: Vec<WirePoint>) {
        self.board = points.into_iter().map(Cell::from).collect();
    }

    fn enter(&mut self, event: &str, points: Vec<WirePoint>) -> Action {
        if !matches!(self.state, SessionState::AwaitingEntry(_)) {
            warn!(session = %self.id, event, state = self.state.label(), "entry confirmation ignored");
            return Action::None;
        }
        self.replace_board(points);
        self.state = SessionState::Stopped;
        info!(session = %self.id, cells = self.board.len(), "game entered");
        Action::RenderNeeded
    }

    fn refresh(&mut self, event: &str, points: Vec<WirePoint>) -> Action {
        if !matches!(self.state, SessionState::Stopped | SessionState::Playing) {
            warn!(session = %self.id, event, state = self.state.label(), "board update ignored");
            return Action::None;
        }
        self.replace_board(points);
        Action::RenderNeeded
    }

    fn list_games(&mut self, games: Vec<GameSummary>) -> Action {
        self.saved_games = games;
        let first = self.saved_games.first().map(|game| game.id.clone());
        let known: Vec<GameId> = self.saved_games.iter().map(|game| game.id.clone()).collect();
        if let SessionState::AwaitingEntry(selection) = &mut self.state {
            let still_listed = selection.saved_id.as_ref().is_some_and(|id| known.contains(id));
            if !still_listed {
                selection.saved_id = first;
            }
        }
        Action::GamesListed
    }

    fn repaint_if(changed: bool) -> Action {
        if changed { Action::RenderNeeded } else { Action::None }
    }
}
