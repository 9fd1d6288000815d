//! Line-oriented console session: query destinations, play moves, print the board

use super::parser::{parse_console_command, ConsoleCommand};
use crate::game::{Game, MoveOutcome};
use crate::utils::{coord_to_square, move_to_coord, square_to_coord};
use std::io::{self, BufRead, Write};

fn outcome_name(outcome: MoveOutcome) -> &'static str {
    match outcome {
        MoveOutcome::Quiet => "quiet",
        MoveOutcome::Capture => "capture",
        MoveOutcome::EnPassant => "en passant",
        MoveOutcome::Castle => "castle",
    }
}

pub struct ConsoleSession {
    game: Game,
    running: bool,
}

impl Default for ConsoleSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleSession {
    pub fn new() -> Self {
        Self {
            game: Game::new(),
            running: true,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn handle_command(&mut self, cmd: ConsoleCommand) -> Vec<String> {
        let mut res = Vec::new();
        match cmd {
            ConsoleCommand::NewGame => {
                self.game = Game::new();
                res.push("info string new game".to_string());
            }
            ConsoleCommand::Board => {
                res.extend(self.game.board().to_string().lines().map(str::to_string));
                res.push(format!("turn {}", self.game.active_team()));
            }
            ConsoleCommand::Turn => {
                res.push(format!("turn {}", self.game.active_team()));
            }
            ConsoleCommand::Moves(coord) => {
                let square = match coord_to_square(&coord) {
                    Ok(sq) => sq,
                    Err(e) => {
                        res.push(format!("info string {}: {}", coord, e));
                        return res;
                    }
                };
                match self.game.select(square) {
                    Some(piece) => {
                        let mut dests = crate::movegen::legal_destinations(piece, self.game.board());
                        dests.sort_by_key(|sq| square_to_coord(*sq));
                        let names: Vec<String> = dests.into_iter().map(square_to_coord).collect();
                        res.push(format!("moves {}: {}", coord, names.join(" ")));
                    }
                    None => {
                        res.push(format!(
                            "info string no {} piece on {}",
                            self.game.active_team(),
                            coord
                        ));
                    }
                }
            }
            ConsoleCommand::Move(mv) => match self.game.apply_coord_move(&mv) {
                Ok(outcome) => {
                    res.push(format!("played {} ({})", mv, outcome_name(outcome)));
                    res.push(format!("turn {}", self.game.active_team()));
                }
                Err(e) => {
                    res.push(format!("info string invalid move {}: {}", mv, e));
                }
            },
            ConsoleCommand::History => {
                for (i, rec) in self.game.history().iter().enumerate() {
                    res.push(format!(
                        "{}. {} {}",
                        i + 1,
                        move_to_coord(rec.from, rec.to),
                        outcome_name(rec.outcome)
                    ));
                }
            }
            ConsoleCommand::Quit => {
                self.running = false;
            }
            ConsoleCommand::Unknown(s) => {
                res.push(format!("info string unknown command: {}", s));
            }
        }
        res
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

pub fn run_console_loop() -> io::Result<()> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let stdout = io::stdout();
    let mut writer = stdout.lock();

    let mut session = ConsoleSession::new();
    let mut buf = String::new();

    while session.is_running() {
        buf.clear();
        let n = reader.read_line(&mut buf)?;
        if n == 0 {
            break;
        }
        let line = buf.trim();
        if line.is_empty() {
            continue;
        }

        for r in process_console_line(line, &mut session) {
            writeln!(writer, "{}", r)?;
        }
        writer.flush()?;
    }

    Ok(())
}

pub fn process_console_line(line: &str, session: &mut ConsoleSession) -> Vec<String> {
    let cmd = parse_console_command(line);
    session.handle_command(cmd)
}
