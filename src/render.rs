//! Output formatting for emitted paths and step-mode status lines.

use crossterm::style::{Color, Stylize};
use std::io::{self, Write};
use std::path::Path;

/// Configuration for the output pipeline.
pub struct RenderConfig {
    /// Whether to emit color styling.
    pub use_color: bool,
    /// Terminate each path with NUL and write raw bytes.
    pub null_separated: bool,
}

/// Sanitize control characters to avoid terminal control-sequence injection.
pub fn sanitize_terminal_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let code = c as u32;
                if code <= 0xFF {
                    out.push_str(&format!("\\x{:02X}", code));
                } else {
                    out.push_str(&format!("\\u{{{:X}}}", code));
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// Format one emitted path for terminal display. Directories get a trailing
/// separator and, with color on, blue bold styling.
pub fn format_path(path: &Path, is_dir: bool, config: &RenderConfig) -> String {
    let mut text = sanitize_terminal_text(&path.to_string_lossy());
    if is_dir && !text.ends_with(std::path::MAIN_SEPARATOR) {
        text.push(std::path::MAIN_SEPARATOR);
    }
    if config.use_color && is_dir {
        text.with(Color::Blue).bold().to_string()
    } else {
        text
    }
}

/// Write one emitted path to `writer`.
///
/// NUL-separated output writes the path bytes untouched so downstream tools
/// receive the exact name; line output is sanitized.
pub fn write_path<W: Write>(
    writer: &mut W,
    path: &Path,
    is_dir: bool,
    config: &RenderConfig,
) -> io::Result<()> {
    if config.null_separated {
        write_raw_path(writer, path)?;
        writer.write_all(b"\0")
    } else {
        writeln!(writer, "{}", format_path(path, is_dir, config))
    }
}

#[cfg(unix)]
fn write_raw_path<W: Write>(writer: &mut W, path: &Path) -> io::Result<()> {
    use std::os::unix::ffi::OsStrExt;
    writer.write_all(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
fn write_raw_path<W: Write>(writer: &mut W, path: &Path) -> io::Result<()> {
    writer.write_all(path.to_string_lossy().as_bytes())
}

/// Build a status line for step mode, e.g. `[dir] /photos/2023`.
pub fn status_line(tag: &str, detail: &str, use_color: bool) -> String {
    let tag = format!("[{}]", sanitize_terminal_text(tag));
    let detail = sanitize_terminal_text(detail);
    if use_color {
        format!("{} {}", tag.with(Color::DarkGrey), detail)
    } else {
        format!("{} {}", tag, detail)
    }
}

/// Help line listing step-mode keys.
pub fn help_line() -> &'static str {
    "d/Enter: next dir  |  f/Space: next file  |  r: reset  |  q/Esc: quit"
}
