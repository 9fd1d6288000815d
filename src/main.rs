//! Scacchiera text console entry point.

fn main() {
    if let Err(e) = scacchiera::console::run_console_loop() {
        eprintln!("console loop failed: {:?}", e);
    }
}
