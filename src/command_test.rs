use super::*;
use crate::session::SessionState;
use crate::ticker::ManualScheduler;
use crate::transport::RecordingTransport;
use canvas::camera::Viewport;
use frames::Outbound;

fn parse(line: &str) -> Result<UserCommand, CommandError> {
    line.parse()
}

// =============================================================
// Parsing
// =============================================================

#[test]
fn parses_bare_words() {
    assert_eq!(parse("go"), Ok(UserCommand::Go));
    assert_eq!(parse("start"), Ok(UserCommand::Start));
    assert_eq!(parse("  stop  "), Ok(UserCommand::Stop));
    assert_eq!(parse("show"), Ok(UserCommand::Show));
    assert_eq!(parse("games"), Ok(UserCommand::Games));
    assert_eq!(parse("help"), Ok(UserCommand::Help));
    assert_eq!(parse("quit"), Ok(UserCommand::Quit));
    assert_eq!(parse("exit"), Ok(UserCommand::Quit));
}

#[test]
fn parses_mode() {
    assert_eq!(parse("mode saved"), Ok(UserCommand::Mode(GameMode::Saved)));
    assert_eq!(parse("mode"), Err(CommandError::MissingArgument { command: "mode", argument: "new, file or saved" }));
    assert_eq!(parse("mode load"), Err(CommandError::Mode(UnknownMode("load".to_owned()))));
}

#[test]
fn name_keeps_inner_spaces() {
    assert_eq!(parse("name  my  game "), Ok(UserCommand::Name("my  game".to_owned())));
}

#[test]
fn open_takes_rest_of_line() {
    assert_eq!(parse("open boards/gosper gun.lif"), Ok(UserCommand::Open(PathBuf::from("boards/gosper gun.lif"))));
}

#[test]
fn pick_accepts_numbers_and_names() {
    assert_eq!(parse("pick 7"), Ok(UserCommand::Pick(GameId::Number(7))));
    assert_eq!(parse("pick pulsar"), Ok(UserCommand::Pick(GameId::Name("pulsar".to_owned()))));
}

#[test]
fn parses_coordinates() {
    assert_eq!(parse("toggle -3 4"), Ok(UserCommand::Toggle(Cell::new(-3, 4))));
    assert_eq!(parse("click 45 59"), Ok(UserCommand::Click(PixelPoint::new(45, 59))));
    assert_eq!(parse("resize 640 480"), Ok(UserCommand::Resize { width: 640, height: 480 }));
}

#[test]
fn coordinate_errors() {
    assert!(matches!(parse("toggle 1"), Err(CommandError::MissingArgument { command: "toggle", .. })));
    assert!(matches!(parse("toggle 1 2 3"), Err(CommandError::MissingArgument { command: "toggle", .. })));
    assert_eq!(
        parse("toggle 1 y"),
        Err(CommandError::InvalidNumber { command: "toggle", value: "y".to_owned() })
    );
    assert!(matches!(parse("resize -1 10"), Err(CommandError::InvalidNumber { command: "resize", .. })));
}

#[test]
fn parses_zoom() {
    assert_eq!(parse("zoom in"), Ok(UserCommand::ZoomIn));
    assert_eq!(parse("zoom out"), Ok(UserCommand::ZoomOut));
    assert_eq!(parse("zoom sideways"), Err(CommandError::InvalidZoom("sideways".to_owned())));
}

#[test]
fn empty_and_unknown() {
    assert_eq!(parse("   "), Err(CommandError::Empty));
    assert_eq!(parse("jump 1"), Err(CommandError::Unknown("jump".to_owned())));
}

// =============================================================
// Apply
// =============================================================

#[test]
fn applies_through_the_session() {
    let mut session = SessionController::new(RecordingTransport::new(), ManualScheduler::new(), Viewport::new(100, 100, 20));
    for line in ["mode new", "name  Acorn ", "go"] {
        parse(line).unwrap().apply(&mut session).unwrap();
    }
    assert_eq!(
        session.transport().sent(),
        &[Outbound::NewGame { name: "Acorn".to_owned(), board_actives: None }]
    );
    assert!(matches!(session.state(), SessionState::AwaitingEntry(_)));
}

#[test]
fn host_commands_are_noops() {
    let mut session = SessionController::new(RecordingTransport::new(), ManualScheduler::new(), Viewport::new(100, 100, 20));
    assert_eq!(UserCommand::Show.apply(&mut session).unwrap(), Action::RenderNeeded);
    assert_eq!(UserCommand::Games.apply(&mut session).unwrap(), Action::GamesListed);
    assert_eq!(UserCommand::Help.apply(&mut session).unwrap(), Action::None);
    assert_eq!(UserCommand::Quit.apply(&mut session).unwrap(), Action::None);
    assert!(session.transport().sent().is_empty());
}

#[test]
fn session_errors_pass_through() {
    let mut session = SessionController::new(RecordingTransport::new(), ManualScheduler::new(), Viewport::new(100, 100, 20));
    let err = UserCommand::Start.apply(&mut session).unwrap_err();
    assert!(matches!(err, SessionError::Validation(_)));
}

#[test]
fn oversized_resize_is_rejected() {
    let mut session = SessionController::new(RecordingTransport::new(), ManualScheduler::new(), Viewport::new(100, 100, 20));
    let command = parse("resize 4294967295 4294967295").unwrap();
    let err = command.apply(&mut session).unwrap_err();
    assert_eq!(err.to_string(), "viewport 4294967295x4294967295 is larger than 4096px per side");
    assert_eq!(session.viewport().width(), 100);
}
