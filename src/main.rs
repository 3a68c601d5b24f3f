#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufWriter, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use treecursor::cli::Args;
use treecursor::render::{write_path, RenderConfig};
use treecursor::{stepper, terminal, TreeTraverser};

/// Exit status after Ctrl-C, matching shell convention for SIGINT.
const EXIT_INTERRUPTED: i32 = 130;

fn main() {
    match run_app() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("treecursor: {e:#}");
            std::process::exit(1);
        }
    }
}

fn run_app() -> Result<i32> {
    let args = Args::parse().validated();
    init_logging(&args);

    let config = args.traverser_config();
    let mut traverser = TreeTraverser::new(&args.path, config)?;
    tracing::debug!(
        root = %traverser.root().display(),
        mode = ?traverser.config().mode,
        "starting traversal"
    );

    if args.step {
        anyhow::ensure!(
            terminal::stdin_is_terminal(),
            "--step requires an interactive terminal"
        );
        let use_color = !args.no_color && terminal::stdout_is_terminal();
        let summary = stepper::run(&mut traverser, use_color).context("step mode failed")?;
        tracing::info!(
            dirs = summary.dirs,
            files = summary.files,
            errors = summary.errors,
            "step mode finished"
        );
        return Ok(summary.exit_code());
    }

    list(&mut traverser, &args)
}

/// Install the process-wide subscriber. `TREECURSOR_LOG` wins over `-v`/`-q`.
fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_env("TREECURSOR_LOG")
        .unwrap_or_else(|_| EnvFilter::new(args.log_directive()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Print every emitted path. Returns the process exit code.
fn list(traverser: &mut TreeTraverser, args: &Args) -> Result<i32> {
    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = interrupted.clone();
    ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))
        .context("failed to install Ctrl-C handler")?;

    let render_config = RenderConfig {
        use_color: !args.no_color && terminal::stdout_is_terminal(),
        null_separated: args.null,
    };
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let (mut dirs, mut files, mut errors) = (0usize, 0usize, 0usize);
    while let Some(step) = traverser.next() {
        if interrupted.load(Ordering::Relaxed) {
            let _ = out.flush();
            tracing::info!(dirs, files, "interrupted");
            return Ok(EXIT_INTERRUPTED);
        }
        match step {
            Ok(path) => {
                let is_dir = traverser.current_dir() == Some(path.as_path());
                if is_dir {
                    dirs += 1;
                } else {
                    files += 1;
                }
                if let Err(e) = write_path(&mut out, &path, is_dir, &render_config) {
                    if e.kind() == io::ErrorKind::BrokenPipe {
                        return Ok(0);
                    }
                    return Err(e).context("failed to write output");
                }
            }
            Err(e) => {
                errors += 1;
                if !args.quiet {
                    let _ = out.flush();
                    eprintln!("treecursor: {e}");
                }
            }
        }
    }

    match out.flush() {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => return Ok(0),
        other => other.context("failed to write output")?,
    }
    tracing::info!(dirs, files, errors, "traversal finished");
    Ok(if errors > 0 { 1 } else { 0 })
}
