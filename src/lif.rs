//! Life 1.06 board file parser.
//!
//! FORMAT
//! ======
//! ```text
//! #Life 1.06
//! 0 -1
//! 1 0
//! ```
//! A leading UTF-8 byte-order mark and everything before the first
//! `#Life 1.06` line are ignored. Each following
//! non-blank line holds at least two whitespace-separated signed integers;
//! the first two are a live cell's `x` and `y`, anything after is ignored.
//! Lines with fewer than two tokens are skipped. A token that is not an
//! integer fails the whole parse.

#[cfg(test)]
#[path = "lif_test.rs"]
mod lif_test;

use std::collections::HashSet;
use std::path::Path;

use canvas::camera::Cell;

/// Header line marker.
pub const LIFE_106_HEADER: &str = "#Life 1.06";

/// Error returned by [`parse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// No line starts with [`LIFE_106_HEADER`].
    #[error("not a Life 1.06 file: missing `#Life 1.06` header")]
    MissingHeader,
    /// A coordinate token is not a base-10 integer.
    #[error("line {line}: `{token}` is not an integer coordinate")]
    InvalidCoordinate { line: usize, token: String },
}

/// Live cells read from a board file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedBoard {
    pub active_cells: HashSet<Cell>,
}

impl ParsedBoard {
    /// Cells as sorted wire points, for seeding a `new_game` request.
    #[must_use]
    pub fn wire_points(&self) -> Vec<frames::WirePoint> {
        let mut points: Vec<frames::WirePoint> = self.active_cells.iter().copied().map(<[i64; 2]>::from).collect();
        points.sort_unstable();
        points
    }
}

/// Parse Life 1.06 text.
///
/// # Errors
///
/// [`ParseError::MissingHeader`] when no header line exists;
/// [`ParseError::InvalidCoordinate`] when a data line's first two tokens are
/// not both integers. Line numbers are 1-based.
pub fn parse(contents: &str) -> Result<ParsedBoard, ParseError> {
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);
    let mut lines = contents.lines().enumerate();
    lines
        .by_ref()
        .find(|(_, line)| line.starts_with(LIFE_106_HEADER))
        .ok_or(ParseError::MissingHeader)?;

    let mut active_cells = HashSet::new();
    for (index, line) in lines {
        let mut tokens = line.split_whitespace();
        let (Some(x), Some(y)) = (tokens.next(), tokens.next()) else {
            continue;
        };
        let line_no = index + 1;
        active_cells.insert(Cell::new(coordinate(x, line_no)?, coordinate(y, line_no)?));
    }

    Ok(ParsedBoard { active_cells })
}

/// Read and parse a board file.
///
/// # Errors
///
/// [`crate::session::SessionError::Io`] if the file cannot be read, otherwise
/// [`crate::session::SessionError::Parse`] as for [`parse`].
pub fn parse_file(path: &Path) -> Result<ParsedBoard, crate::session::SessionError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|source| crate::session::SessionError::Io { path: path.to_path_buf(), source })?;
    Ok(parse(&contents)?)
}

fn coordinate(token: &str, line: usize) -> Result<i64, ParseError> {
    token.parse().map_err(|_| ParseError::InvalidCoordinate { line, token: token.to_owned() })
}
