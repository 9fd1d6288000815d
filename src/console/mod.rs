pub mod parser;
pub mod session;

pub use parser::{parse_console_command, ConsoleCommand};
pub use session::{process_console_line, run_console_loop, ConsoleSession};
