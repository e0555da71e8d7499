use super::*;

fn parse(args: &[&str]) -> Config {
    let mut argv = vec!["lifeboard"];
    argv.extend_from_slice(args);
    Config::try_parse_from(argv).expect("valid args")
}

#[test]
fn explicit_flags_override_defaults() {
    let config = parse(&["--server-url", "wss://life.example/ws", "--width", "640", "--height", "480", "--cell-size", "10"]);
    assert_eq!(config.server_url, "wss://life.example/ws");
    assert_eq!((config.width, config.height, config.cell_size), (640, 480, 10));
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn viewport_uses_configured_size() {
    let config = parse(&["--width", "200", "--height", "100", "--cell-size", "25"]);
    let viewport = config.viewport();
    assert_eq!((viewport.width(), viewport.height(), viewport.cell_size()), (200, 100, 25));
}

#[test]
fn non_numeric_width_fails_to_parse() {
    assert!(Config::try_parse_from(["lifeboard", "--width", "wide"]).is_err());
}

#[test]
fn rejects_non_websocket_url() {
    let config = parse(&["--server-url", "http://127.0.0.1:8000"]);
    assert_eq!(config.validate(), Err(ConfigError::InvalidServerUrl("http://127.0.0.1:8000".to_owned())));
}

#[test]
fn rejects_empty_viewport() {
    let config = parse(&["--server-url", "ws://x/ws", "--width", "0"]);
    assert!(matches!(config.validate(), Err(ConfigError::EmptyViewport { width: 0, .. })));
}

#[test]
fn rejects_cell_size_off_step_or_out_of_range() {
    for size in ["3", "55", "12"] {
        let config = parse(&["--server-url", "ws://x/ws", "--width", "10", "--height", "10", "--cell-size", size]);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidCellSize(_))), "size {size}");
    }
}

#[test]
fn accepts_zoom_bounds() {
    for size in ["5", "50"] {
        let config = parse(&["--server-url", "ws://x/ws", "--width", "10", "--height", "10", "--cell-size", size]);
        assert_eq!(config.validate(), Ok(()));
    }
}

#[test]
fn rejects_oversized_viewport() {
    let config = parse(&["--server-url", "ws://x/ws", "--width", "100000", "--height", "10"]);
    assert_eq!(config.validate(), Err(ConfigError::ViewportTooLarge { width: 100_000, height: 10 }));

    let config = parse(&["--server-url", "ws://x/ws", "--width", "4096", "--height", "4096"]);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn reconnect_attempts_flag() {
    assert_eq!(parse(&["--reconnect-attempts", "0"]).reconnect_attempts, 0);
}
