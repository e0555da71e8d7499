use super::*;
use crate::session::SessionState;
use crate::ticker::ManualScheduler;
use crate::transport::RecordingTransport;
use canvas::camera::Viewport;
use frames::{Inbound, Outbound};

type TestSession = SessionController<RecordingTransport, ManualScheduler>;

fn session() -> TestSession {
    SessionController::new(RecordingTransport::new(), ManualScheduler::new(), Viewport::new(60, 60, 20))
}

fn feed(session: &mut TestSession, line: &str) -> (Flow, String) {
    let mut out = Vec::new();
    let flow = handle_line(&mut out, session, line).unwrap();
    (flow, String::from_utf8(out).unwrap())
}

#[test]
fn blank_lines_are_ignored() {
    let mut s = session();
    assert_eq!(feed(&mut s, "   "), (Flow::Continue, String::new()));
}

#[test]
fn quit_stops_the_loop() {
    let mut s = session();
    assert_eq!(feed(&mut s, "quit").0, Flow::Quit);
}

#[test]
fn parse_errors_are_printed() {
    let mut s = session();
    let (flow, out) = feed(&mut s, "fly away");
    assert_eq!(flow, Flow::Continue);
    assert_eq!(out, "error: unknown command `fly` (try `help`)\n");
}

#[test]
fn session_errors_are_printed() {
    let mut s = session();
    let (_, out) = feed(&mut s, "toggle 0 0");
    assert_eq!(out, "error: no game has been entered yet\n");
    assert!(s.transport().sent().is_empty());
}

#[test]
fn quiet_commands_print_status() {
    let mut s = session();
    let (_, out) = feed(&mut s, "mode new");
    assert_eq!(out, "[awaiting-entry] 0 live | 60x60px @ 20px/cell\n");
}

#[test]
fn full_flow_over_lines() {
    let mut s = session();
    feed(&mut s, "mode new");
    feed(&mut s, "name Blinker");
    feed(&mut s, "go");
    s.handle_inbound(Inbound::GameCreated { board_actives: vec![] });
    feed(&mut s, "toggle 0 0");
    feed(&mut s, "start");
    assert_eq!(s.state(), &SessionState::Playing);

    let (_, out) = feed(&mut s, "toggle 1 1");
    assert!(out.starts_with("error: "));

    feed(&mut s, "stop");
    assert_eq!(
        s.transport().sent(),
        &[
            Outbound::NewGame { name: "Blinker".to_owned(), board_actives: None },
            Outbound::TogglePoint { point: [0, 0] },
            Outbound::Stop {},
        ]
    );
}

#[test]
fn show_draws_board() {
    let mut s = session();
    let (_, out) = feed(&mut s, "show");
    // 60x60 at 20px: one cell either side of the origin.
    assert_eq!(out, "...\n...\n...\n[idle] 0 live | 60x60px @ 20px/cell\n");
}
