use sumten_core::{Coord, Coord2};
use thiserror::Error;

pub(crate) const HELP: &str = "\
commands:
  down R C          press on cell (R, C)
  up R C | up       release over cell (R, C), or over nothing
  pick R C R C      press on the first cell and release on the second
  cancel            lose the pointer mid-pick
  show              redraw the board
  restart           deal a new game
  help              this text
  quit              leave";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Down(Coord2),
    Up(Option<Coord2>),
    Pick(Coord2, Coord2),
    Cancel,
    Show,
    Restart,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub(crate) enum CommandError {
    #[error("unknown command `{0}`, type `help` for a list")]
    Unknown(String),
    #[error("`{command}` expects {expected}")]
    Arity {
        command: &'static str,
        expected: &'static str,
    },
    #[error("`{0}` is not a board coordinate")]
    BadCoord(String),
}

impl Command {
    /// Parses one input line; blank lines and `#` comments yield `None`.
    pub(crate) fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.split('#').next().unwrap_or_default();
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match head.to_ascii_lowercase().as_str() {
            "down" | "d" => match args.as_slice() {
                [row, col] => Self::Down(coords(row, col)?),
                _ => return Err(arity("down", "a row and a column")),
            },
            "up" | "u" => match args.as_slice() {
                [] | ["-"] => Self::Up(None),
                [row, col] => Self::Up(Some(coords(row, col)?)),
                _ => return Err(arity("up", "a row and a column, or nothing")),
            },
            "pick" | "p" => match args.as_slice() {
                [r1, c1, r2, c2] => Self::Pick(coords(r1, c1)?, coords(r2, c2)?),
                _ => return Err(arity("pick", "two rows and columns")),
            },
            "cancel" | "c" => Self::Cancel,
            "show" | "s" => Self::Show,
            "restart" | "r" => Self::Restart,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            _ => return Err(CommandError::Unknown(head.to_string())),
        };
        Ok(Some(command))
    }
}

fn arity(command: &'static str, expected: &'static str) -> CommandError {
    CommandError::Arity { command, expected }
}

fn coord(word: &str) -> Result<Coord, CommandError> {
    word.parse()
        .map_err(|_| CommandError::BadCoord(word.to_string()))
}

fn coords(row: &str, col: &str) -> Result<Coord2, CommandError> {
    Ok((coord(row)?, coord(col)?))
}
