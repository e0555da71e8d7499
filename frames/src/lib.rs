//! Named-event wire model and JSON codec for the Life board transport.
//!
//! Every message is an envelope `{"event": <name>, "data": <payload>}`. The
//! client sends [`Outbound`] events and receives [`Inbound`] events; both are
//! adjacently tagged serde enums so the envelope shape is the enum shape.
//! Decoding checks the event name first so an unknown name is reported as
//! [`CodecError::UnknownEvent`] rather than a generic serde failure.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope key carrying the event name.
pub const EVENT_KEY: &str = "event";

/// Envelope key carrying the payload.
pub const DATA_KEY: &str = "data";

/// A grid coordinate as it travels on the wire: `[x, y]`.
pub type WirePoint = [i64; 2];

/// Error returned by [`decode_inbound`] and [`decode_outbound`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The text is not valid JSON or the payload does not match the event.
    #[error("invalid event JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The envelope has no string `event` field.
    #[error("event envelope has no `event` name")]
    MissingEvent,
    /// The event name is not part of the protocol.
    #[error("unknown event: {0}")]
    UnknownEvent(String),
}

// =============================================================================
// GAME IDS
// =============================================================================

/// Identifier of a stored game.
///
/// The authority uses numeric ids for `all_games_fetched` and plain names for
/// `saved_games_list`; both are sent back verbatim in `load_game`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GameId {
    Number(i64),
    Name(String),
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl FromStr for GameId {
    type Err = std::convert::Infallible;

    /// Integers become [`GameId::Number`], anything else a [`GameId::Name`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>().map_or_else(|_| Self::Name(s.to_owned()), Self::Number))
    }
}

/// One entry of `all_games_fetched`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub id: GameId,
    pub name: String,
}

// =============================================================================
// OUTBOUND
// =============================================================================

/// Client → authority events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum Outbound {
    /// Create a game, optionally seeded with live cells from a board file.
    NewGame {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        board_actives: Option<Vec<WirePoint>>,
    },
    /// Open a stored game.
    LoadGame { game_id: GameId },
    /// Ask for the stored games list.
    GetAllGames {},
    /// Advance the simulation one generation.
    PlayMove {},
    /// End the run.
    Stop {},
    /// Flip one cell.
    TogglePoint { point: WirePoint },
}

impl Outbound {
    /// Wire name of the event.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::NewGame { .. } => "new_game",
            Self::LoadGame { .. } => "load_game",
            Self::GetAllGames {} => "get_all_games",
            Self::PlayMove {} => "play_move",
            Self::Stop {} => "stop",
            Self::TogglePoint { .. } => "toggle_point",
        }
    }
}

/// Names accepted by [`decode_outbound`].
pub const OUTBOUND_EVENTS: [&str; 6] = ["new_game", "load_game", "get_all_games", "play_move", "stop", "toggle_point"];

// =============================================================================
// INBOUND
// =============================================================================

/// Authority → client events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum Inbound {
    /// Stored game names (each name doubles as its id).
    SavedGamesList {
        #[serde(rename = "savedGames")]
        saved_games: Vec<String>,
    },
    /// Stored games with ids. `games` is absent when the store is empty.
    AllGamesFetched {
        #[serde(default)]
        games: Option<Vec<GameSummary>>,
    },
    /// A `new_game` request succeeded.
    GameCreated { board_actives: Vec<WirePoint> },
    /// A `load_game` request succeeded.
    GameLoaded { board_actives: Vec<WirePoint> },
    /// Board after one generation.
    PlayedMove { board_actives: Vec<WirePoint> },
    /// Board after a stop.
    PlayStopped { board_actives: Vec<WirePoint> },
    /// Board after a toggle. The spelling is the protocol's.
    PointToggeled { board_actives: Vec<WirePoint> },
    /// Another client holds the requested game.
    GameLocked { message: String },
    /// Request rejected.
    Error { message: String },
}

impl Inbound {
    /// Wire name of the event.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SavedGamesList { .. } => "saved_games_list",
            Self::AllGamesFetched { .. } => "all_games_fetched",
            Self::GameCreated { .. } => "game_created",
            Self::GameLoaded { .. } => "game_loaded",
            Self::PlayedMove { .. } => "played_move",
            Self::PlayStopped { .. } => "play_stopped",
            Self::PointToggeled { .. } => "point_toggeled",
            Self::GameLocked { .. } => "game_locked",
            Self::Error { .. } => "error",
        }
    }
}

/// Names accepted by [`decode_inbound`].
pub const INBOUND_EVENTS: [&str; 9] = [
    "saved_games_list",
    "all_games_fetched",
    "game_created",
    "game_loaded",
    "played_move",
    "play_stopped",
    "point_toggeled",
    "game_locked",
    "error",
];

// =============================================================================
// CODEC
// =============================================================================

/// Encode an outbound event as envelope JSON text.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if serialization fails.
pub fn encode_outbound(event: &Outbound) -> Result<String, CodecError> {
    Ok(serde_json::to_string(event)?)
}

/// Encode an inbound event as envelope JSON text (used by fake authorities).
///
/// # Errors
///
/// Returns [`CodecError::Json`] if serialization fails.
pub fn encode_inbound(event: &Inbound) -> Result<String, CodecError> {
    Ok(serde_json::to_string(event)?)
}

/// Decode envelope JSON text into an inbound event.
///
/// Extra payload fields are ignored.
///
/// # Errors
///
/// [`CodecError::MissingEvent`] without a string `event` field,
/// [`CodecError::UnknownEvent`] for names outside [`INBOUND_EVENTS`], and
/// [`CodecError::Json`] for malformed text or payloads.
pub fn decode_inbound(text: &str) -> Result<Inbound, CodecError> {
    let value = checked_envelope(text, &INBOUND_EVENTS)?;
    Ok(Inbound::deserialize(value)?)
}

/// Decode envelope JSON text into an outbound event.
///
/// # Errors
///
/// Same as [`decode_inbound`], checked against [`OUTBOUND_EVENTS`].
pub fn decode_outbound(text: &str) -> Result<Outbound, CodecError> {
    let value = checked_envelope(text, &OUTBOUND_EVENTS)?;
    Ok(Outbound::deserialize(value)?)
}

fn checked_envelope(text: &str, known: &[&str]) -> Result<Value, CodecError> {
    let mut value: Value = serde_json::from_str(text)?;
    let name = value.get(EVENT_KEY).and_then(Value::as_str).ok_or(CodecError::MissingEvent)?;
    if !known.contains(&name) {
        return Err(CodecError::UnknownEvent(name.to_owned()));
    }
    // Payload-less events may arrive without `data`; adjacently tagged struct
    // variants still need an object to deserialize from.
    if let Value::Object(map) = &mut value {
        map.entry(DATA_KEY).or_insert_with(|| Value::Object(serde_json::Map::new()));
    }
    Ok(value)
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
