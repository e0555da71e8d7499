//! Terminal runtime: one loop that serializes user input, ticks and inbound
//! events onto the session controller.
//!
//! LIFECYCLE
//! =========
//! 1. Connect to the server and wrap the connection in a [`SessionController`].
//! 2. `select!` over stdin lines, ticker deliveries and decoded inbound events;
//!    each is handled to completion before the next is taken.
//! 3. When the server closes the connection, reconnect with backoff up to
//!    `reconnect_attempts` times, keeping the session as it was.
//! 4. Exit on `quit`, end of input, or when reconnecting gives up.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::io::{self, Write};

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::command::UserCommand;
use crate::config::Config;
use crate::session::{Action, SessionController};
use crate::terminal;
use crate::ticker::{Scheduler, TokioScheduler};
use crate::transport::{self, Connection, Transport, TransportError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Whether the loop keeps going after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Run the client until the user quits or the connection is lost for good.
///
/// # Errors
///
/// [`AppError::Transport`] if the connection cannot be opened,
/// [`AppError::Io`] if stdin or stdout fail.
pub async fn run(config: Config) -> Result<(), AppError> {
    let Connection { transport, mut inbound } = transport::connect(&config.server_url).await?;
    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
    let mut session = SessionController::new(transport, TokioScheduler::new(tick_tx), config.viewport());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut out = io::stdout();
    terminal::print_help(&mut out)?;
    out.flush()?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("input closed");
                    break;
                };
                if handle_line(&mut out, &mut session, &line)? == Flow::Quit {
                    break;
                }
            }
            Some(handle) = tick_rx.recv() => {
                if let Err(error) = session.on_tick(handle) {
                    warn!(%error, "tick not delivered");
                    terminal::print_error(&mut out, &error)?;
                }
            }
            event = inbound.recv() => match event {
                Some(event) => {
                    let action = session.handle_inbound(event);
                    terminal::present(&mut out, &session, &action)?;
                }
                None => {
                    warn!("connection closed by server");
                    writeln!(out, "connection lost; reconnecting")?;
                    out.flush()?;
                    match transport::reconnect(&config.server_url, config.reconnect_attempts).await {
                        Ok(connection) => {
                            *session.transport_mut() = connection.transport;
                            inbound = connection.inbound;
                            // Ticks queued while reconnecting are stale.
                            while tick_rx.try_recv().is_ok() {}
                            writeln!(out, "reconnected")?;
                        }
                        Err(error) => {
                            writeln!(out, "connection closed: {error}")?;
                            break;
                        }
                    }
                }
            },
        }
        out.flush()?;
    }

    if let Err(error) = session.stop() {
        warn!(%error, "stop not delivered on exit");
    }
    info!(session = %session.session_id(), "client exiting");
    Ok(())
}

/// Parse and apply one input line, writing whatever it produces to `out`.
///
/// Parse and session errors are printed and the loop continues.
///
/// # Errors
///
/// Only write failures.
pub fn handle_line<W: Write, T: Transport, S: Scheduler>(
    out: &mut W,
    session: &mut SessionController<T, S>,
    line: &str,
) -> io::Result<Flow> {
    if line.trim().is_empty() {
        return Ok(Flow::Continue);
    }
    let command = match line.parse::<UserCommand>() {
        Ok(command) => command,
        Err(error) => {
            terminal::print_error(out, &error)?;
            return Ok(Flow::Continue);
        }
    };
    match command {
        UserCommand::Quit => return Ok(Flow::Quit),
        UserCommand::Help => terminal::print_help(out)?,
        command => match command.apply(session) {
            Ok(Action::None) => terminal::write_status(out, session)?,
            Ok(action) => terminal::present(out, session, &action)?,
            Err(error) => terminal::print_error(out, &error)?,
        },
    }
    Ok(Flow::Continue)
}
