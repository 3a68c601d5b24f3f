//! Interactive step mode: drives the manual cursor API from the keyboard.

use crate::render::{help_line, status_line};
use crate::terminal::{write_line, TerminalGuard};
use crate::traverse::TreeTraverser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io::{self, Write};
use std::path::PathBuf;

/// A single user request in step mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepCommand {
    NextDir,
    NextFile,
    Reset,
    Quit,
}

impl StepCommand {
    /// Map a key press to a command. Unbound keys map to `None`.
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Self::Quit),
            KeyCode::Char('d') | KeyCode::Char('n') | KeyCode::Enter => Some(Self::NextDir),
            KeyCode::Char('f') | KeyCode::Char(' ') => Some(Self::NextFile),
            KeyCode::Char('r') => Some(Self::Reset),
            KeyCode::Char('q') | KeyCode::Esc => Some(Self::Quit),
            _ => None,
        }
    }
}

/// What a step produced.
#[derive(Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Dir(PathBuf),
    File(PathBuf),
    /// The current directory has no more files. Queued directories may still
    /// turn out to hold nothing.
    NoMoreFiles,
    /// Nothing is left anywhere in the tree.
    Exhausted,
    Reset,
    Failed(String),
}

impl StepOutcome {
    pub fn describe(&self, use_color: bool) -> String {
        match self {
            Self::Dir(path) => status_line("dir", &path.to_string_lossy(), use_color),
            Self::File(path) => status_line("file", &path.to_string_lossy(), use_color),
            Self::NoMoreFiles => status_line("end", "no more files in this directory", use_color),
            Self::Exhausted => status_line("end", "traversal exhausted", use_color),
            Self::Reset => status_line("reset", "back at the root", use_color),
            Self::Failed(msg) => status_line("error", msg, use_color),
        }
    }
}

/// Apply one command to the traverser. `Quit` is handled by the caller and
/// maps to `None`.
pub fn execute(traverser: &mut TreeTraverser, command: StepCommand) -> Option<StepOutcome> {
    let outcome = match command {
        StepCommand::NextDir => match traverser.next_dir() {
            Ok(Some(dir)) => StepOutcome::Dir(dir),
            Ok(None) => StepOutcome::Exhausted,
            Err(e) => StepOutcome::Failed(e.to_string()),
        },
        StepCommand::NextFile => match traverser.next_file() {
            Ok(Some(file)) => StepOutcome::File(file),
            Ok(None) if traverser.is_exhausted() => StepOutcome::Exhausted,
            Ok(None) => StepOutcome::NoMoreFiles,
            Err(e) => StepOutcome::Failed(e.to_string()),
        },
        StepCommand::Reset => {
            traverser.reset();
            StepOutcome::Reset
        }
        StepCommand::Quit => return None,
    };
    Some(outcome)
}

/// Counters reported when step mode ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StepSummary {
    pub dirs: usize,
    pub files: usize,
    pub errors: usize,
}

impl StepSummary {
    fn record(&mut self, outcome: &StepOutcome) {
        match outcome {
            StepOutcome::Dir(_) => self.dirs += 1,
            StepOutcome::File(_) => self.files += 1,
            StepOutcome::Failed(_) => self.errors += 1,
            StepOutcome::Reset => {
                self.dirs = 0;
                self.files = 0;
            }
            StepOutcome::NoMoreFiles | StepOutcome::Exhausted => {}
        }
    }

    /// Process exit code: 1 if any step failed during the session.
    pub fn exit_code(&self) -> i32 {
        if self.errors > 0 {
            1
        } else {
            0
        }
    }
}

/// Run step mode until the user quits. Blocks on keyboard input.
pub fn run(traverser: &mut TreeTraverser, use_color: bool) -> io::Result<StepSummary> {
    let _guard = TerminalGuard::new()?;
    let mut stdout = io::stdout();
    let mut summary = StepSummary::default();

    write_line(&mut stdout, help_line())?;
    stdout.flush()?;

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        let Some(command) = StepCommand::from_key(&key) else {
            continue;
        };
        let Some(outcome) = execute(traverser, command) else {
            break;
        };
        summary.record(&outcome);
        write_line(&mut stdout, &outcome.describe(use_color))?;
        stdout.flush()?;
    }

    Ok(summary)
}
