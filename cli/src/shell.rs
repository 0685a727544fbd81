use std::io::Write;
use std::thread;

use anyhow::Result;
use sumten_core::{GameSession, GameStatus, InputOutcome, TickOutcome};
use web_time::Instant;

use crate::command::{Command, HELP};
use crate::render::TextFrame;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Quit,
}

/// Drives a [`GameSession`] from text commands and wall-clock time.
#[derive(Debug)]
pub(crate) struct Shell {
    session: GameSession,
    json: bool,
    last_tick: Instant,
}

impl Shell {
    pub(crate) fn new(session: GameSession, json: bool) -> Self {
        Self {
            session,
            json,
            last_tick: Instant::now(),
        }
    }

    #[cfg(test)]
    pub(crate) fn session(&self) -> &GameSession {
        &self.session
    }

    pub(crate) fn run(&mut self, command: Command, out: &mut impl Write) -> Result<Flow> {
        self.tick();

        if self.session.status() == GameStatus::Failed
            && !matches!(command, Command::Restart | Command::Quit | Command::Help)
        {
            self.notice(out, "Game over. Type `restart` to play again.")?;
            return Ok(Flow::Continue);
        }

        let outcome = match command {
            Command::Down(coords) => Some(self.session.pointer_down(coords)),
            Command::Up(end) => Some(self.session.pointer_up(end)),
            Command::Pick(start, end) => Some(match self.session.pointer_down(start) {
                InputOutcome::PickStarted => self.session.pointer_up(Some(end)),
                outcome => outcome,
            }),
            Command::Cancel => Some(self.session.pointer_cancel()),
            Command::Restart => {
                self.session.restart();
                None
            }
            Command::Show => None,
            Command::Help => {
                self.notice(out, HELP)?;
                return Ok(Flow::Continue);
            }
            Command::Quit => return Ok(Flow::Quit),
        };

        if let Some(outcome) = outcome {
            log::debug!("{:?} -> {:?}", command, outcome);
            match outcome {
                InputOutcome::Matched => {
                    self.draw(out)?;
                    self.finish_resolution();
                }
                InputOutcome::Ignored => self.notice(out, "(ignored)")?,
                _ => {}
            }
        }

        self.draw(out)?;
        Ok(Flow::Continue)
    }

    /// Writes a message for the player; in JSON mode it becomes a `{"notice": ..}` line.
    fn notice(&self, out: &mut impl Write, text: &str) -> Result<()> {
        if self.json {
            writeln!(out, "{}", serde_json::json!({ "notice": text }))?;
        } else {
            writeln!(out, "{text}")?;
        }
        Ok(())
    }

    pub(crate) fn draw(&self, out: &mut impl Write) -> Result<()> {
        let snapshot = self.session.snapshot();
        if self.json {
            writeln!(out, "{}", serde_json::to_string(&snapshot)?)?;
        } else {
            write!(out, "{}", TextFrame(&snapshot))?;
        }
        out.flush()?;
        Ok(())
    }

    /// Waits out the resolution delay so the confirmed pair stays visible.
    fn finish_resolution(&mut self) {
        while let Some(remaining) = self.session.resolution_remaining() {
            thread::sleep(remaining);
            if let TickOutcome::Cascaded(cascade) | TickOutcome::Completed(cascade) = self.tick() {
                log::debug!("cascade applied: {:?}", cascade);
            }
        }
    }

    fn tick(&mut self) -> TickOutcome {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        self.session.advance(elapsed)
    }
}
