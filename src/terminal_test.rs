use super::*;
use crate::session::{GameMode, Notice};
use crate::ticker::ManualScheduler;
use crate::transport::RecordingTransport;
use canvas::camera::Viewport;
use frames::{GameId, GameSummary, Inbound};

type TestSession = SessionController<RecordingTransport, ManualScheduler>;

fn session() -> TestSession {
    SessionController::new(RecordingTransport::new(), ManualScheduler::new(), Viewport::new(100, 100, 20))
}

fn text(write: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
    let mut out = Vec::new();
    write(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn draws_board_centred_on_origin() {
    let mut s = session();
    s.choose_mode(GameMode::New).unwrap();
    s.set_name("X").unwrap();
    s.confirm_selection().unwrap();
    s.handle_inbound(Inbound::GameCreated { board_actives: vec![[0, 0], [2, -2]] });

    let shown = text(|out| present(out, &s, &Action::RenderNeeded));
    assert_eq!(shown, "....#\n.....\n..#..\n.....\n.....\n[stopped] 2 live | 100x100px @ 20px/cell\n");
}

#[test]
fn none_prints_nothing() {
    assert_eq!(text(|out| present(out, &session(), &Action::None)), "");
}

#[test]
fn notices_are_flagged() {
    let shown = text(|out| present(out, &session(), &Action::Notify(Notice::NoSavedGames)));
    assert_eq!(shown, "! No saved games found.\n");
}

#[test]
fn games_list_stars_current_pick() {
    let mut s = session();
    s.choose_mode(GameMode::Saved).unwrap();
    s.handle_inbound(Inbound::AllGamesFetched {
        games: Some(vec![
            GameSummary { id: GameId::Number(1), name: "glider".to_owned() },
            GameSummary { id: GameId::Number(12), name: "pulsar".to_owned() },
        ]),
    });
    let shown = text(|out| present(out, &s, &Action::GamesListed));
    assert_eq!(shown, "*      1  glider\n      12  pulsar\n");
}

#[test]
fn empty_games_list() {
    assert_eq!(text(|out| list_games(out, &session())), "no saved games listed\n");
}

#[test]
fn help_lists_commands() {
    let shown = text(|out| print_help(out));
    assert!(shown.contains("mode new|file|saved"));
    assert!(shown.contains("quit"));
}

#[test]
fn errors_are_prefixed() {
    assert_eq!(text(|out| print_error(out, &"bad input")), "error: bad input\n");
}
