//! Command parser for the text console

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ConsoleCommand {
    NewGame,
    Board,
    Turn,
    /// Destinations of the piece on the given square, e.g. `moves e2`
    Moves(String),
    /// Coordinate move, e.g. `move e2e4`
    Move(String),
    History,
    Quit,
    Unknown(String),
}

/// Parse one input line (simple whitespace tokenizer)
pub fn parse_console_command(line: &str) -> ConsoleCommand {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        ["new"] => ConsoleCommand::NewGame,
        ["board"] => ConsoleCommand::Board,
        ["turn"] => ConsoleCommand::Turn,
        ["moves", sq] => ConsoleCommand::Moves(sq.to_string()),
        ["move", mv] => ConsoleCommand::Move(mv.to_string()),
        ["history"] => ConsoleCommand::History,
        ["quit"] => ConsoleCommand::Quit,
        _ => ConsoleCommand::Unknown(line.trim().to_string()),
    }
}
