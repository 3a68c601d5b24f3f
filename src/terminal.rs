//! Terminal management for step mode: raw mode RAII guard, line output, and panic hook.

use crossterm::{queue, terminal};
use std::io::{self, Write};

/// RAII guard that restores terminal state on drop (even on panic).
pub struct TerminalGuard {
    _private: (), // prevent construction outside this module
}

impl TerminalGuard {
    /// Enter raw mode so single key presses reach the stepper. Returns the guard.
    pub fn new() -> io::Result<Self> {
        install_panic_hook();
        terminal::enable_raw_mode()?;
        Ok(TerminalGuard { _private: () })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = io::stdout().flush();
    }
}

/// Install a custom panic hook that leaves raw mode before printing the
/// panic message.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = terminal::disable_raw_mode();
        default_hook(info);
    }));
}

/// Write one line, clearing whatever was on it before.
///
/// Uses `\r\n` because in raw mode `\n` only moves down, it doesn't return to column 0.
pub fn write_line<W: Write>(writer: &mut W, line: &str) -> io::Result<()> {
    queue!(writer, terminal::Clear(terminal::ClearType::CurrentLine))?;
    write!(writer, "{}\r\n", line)
}

/// Whether stdin is an interactive terminal.
pub fn stdin_is_terminal() -> bool {
    use std::io::IsTerminal;
    io::stdin().is_terminal()
}

/// Whether stdout is an interactive terminal.
pub fn stdout_is_terminal() -> bool {
    use std::io::IsTerminal;
    io::stdout().is_terminal()
}
