//! Terminal client for a shared, server-run Game of Life.
//!
//! The server owns the simulation. This crate selects or creates a game,
//! drives the run with a fixed-interval ticker, forwards cell edits, and
//! draws whatever board the server last confirmed.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`session`] | Session state machine and authoritative board |
//! | [`lif`] | Life 1.06 board-file parser |
//! | [`ticker`] | Recurring tick scheduling behind the [`ticker::Scheduler`] trait |
//! | [`transport`] | Outbound/inbound event adapters and the websocket connection |
//! | [`command`] | Line-oriented user commands |
//! | [`terminal`] | Text rendering of board, notices and lists |
//! | [`config`] | Flags and environment |
//! | [`app`] | The runtime loop |
//!
//! Grid geometry and draw commands live in the `canvas` crate; the wire
//! envelope lives in `frames`.

pub mod app;
pub mod command;
pub mod config;
pub mod lif;
pub mod session;
pub mod terminal;
pub mod ticker;
pub mod transport;
