use std::fmt;

use sumten_core::{CellState, CellView, GameSnapshot, GameStatus};

/// Plain-text frame: the sum line, the scoreboard, the grid, and any
/// end-of-game message.
pub(crate) struct TextFrame<'a>(pub(crate) &'a GameSnapshot);

impl fmt::Display for TextFrame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.0;
        let score = &snapshot.scoreboard;

        let check = if snapshot.sum_is_target { " \u{2713}" } else { "" };
        writeln!(f, "SUM: {}{}", snapshot.sum, check)?;
        writeln!(
            f,
            "Opened: {}/{}   Mistakes: {}/{}",
            score.opened, score.playable, score.mistakes, score.mistake_limit
        )?;

        f.write_str("   ")?;
        for col in 0..snapshot.size.1 {
            write!(f, " {col} ")?;
        }
        writeln!(f)?;
        for (row, cells) in snapshot.rows().enumerate() {
            write!(f, "{row:>2} ")?;
            for cell in cells {
                write_glyph(f, cell)?;
            }
            writeln!(f)?;
        }

        match score.status {
            GameStatus::Playing => Ok(()),
            GameStatus::Completed => {
                writeln!(f, "You have defeated {}% of users.", score.opened_percent)
            }
            GameStatus::Failed => {
                writeln!(f, "*** System Overload ***")?;
                writeln!(f, "You exploded. Restart to try again.")
            }
        }
    }
}

fn write_glyph(f: &mut fmt::Formatter<'_>, cell: &CellView) -> fmt::Result {
    let value = cell.value.map_or(' ', |value| char::from(b'0' + value));
    match cell.state {
        CellState::Covered => f.write_str(" # "),
        CellState::Revealed => write!(f, " {value} "),
        CellState::Selecting => write!(f, "[{value}]"),
        CellState::Success => write!(f, "<{value}>"),
        CellState::Cleared => f.write_str(" . "),
        CellState::Void => f.write_str("   "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sumten_core::{Board, GameSession, ValueGrid};

    fn values() -> ValueGrid {
        let mut values = [[1; 9]; 9];
        values[3][3] = 4;
        values[3][4] = 6;
        values[3][5] = 3;
        values
    }

    fn session() -> GameSession {
        GameSession::with_board(Board::from_values(&values()).unwrap(), 0)
    }

    #[test]
    fn draws_fresh_board() {
        let text = TextFrame(&session().snapshot()).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "SUM: --");
        assert_eq!(lines[1], "Opened: 8/80   Mistakes: 0/3");
        assert_eq!(lines[2], "    0  1  2  3  4  5  6  7  8 ");
        assert_eq!(lines[3], " 0  #  #  #  #  #  #  #  #  # ");
        assert_eq!(lines[6], " 3  #  #  #  4  6  3  #  #  # ");
        assert_eq!(lines[7], " 4  #  #  #  1     1  #  #  # ");
        assert_eq!(lines.len(), 12);
    }

    #[test]
    fn marks_selection_and_matched_pair() {
        let mut session = session();
        session.pointer_down((3, 3));
        let text = TextFrame(&session.snapshot()).to_string();
        assert!(text.contains("[4]"));

        session.pointer_up(Some((3, 4)));
        let text = TextFrame(&session.snapshot()).to_string();
        assert!(text.starts_with("SUM: 4 + 6 = 10 \u{2713}\n"));
        assert!(text.contains("<4><6>"));
    }

    #[test]
    fn shows_failure_message() {
        let mut session = session();
        for _ in 0..3 {
            session.pointer_down((3, 3));
            session.pointer_up(Some((3, 5)));
        }

        let text = TextFrame(&session.snapshot()).to_string();
        assert!(text.contains("Mistakes: 3/3"));
        assert!(text.contains("System Overload"));
    }

    #[test]
    fn shows_completion_message() {
        let mut values = [[1; 9]; 9];
        values[3][3] = 2;
        let session = GameSession::with_board(Board::from_values(&values).unwrap(), 0);

        let text = TextFrame(&session.snapshot()).to_string();
        assert!(text.ends_with("You have defeated 10% of users.\n"));
    }
}
