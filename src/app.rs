//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the interrupt handler,
//! and dispatches the selected subcommand to the library.

use anyhow::{Context, Result, bail};
use std::ffi::OsString;
use std::sync::{Arc, Mutex};
use tracing::{debug, error};

use pathtree::cli::{Args, Command, LsCommand, MvCommand};
use pathtree::config::CONFIG_ENV;
use pathtree::output as out;
use pathtree::{PathTreeError, TreeOps, Visit, WalkOutcome, default_config_path, load_config};

use crate::logging::init_tracing;

/// Exit status used when interrupted (128 + SIGINT).
const INTERRUPTED_EXIT: i32 = 130;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        print_config_location();
        return Ok(());
    }

    let Some(command) = args.command.clone() else {
        bail!("no subcommand given; run with --help for usage");
    };

    // Config file first, then CLI overrides (CLI wins).
    let (mut cfg, cfg_path) = load_config()?;
    args.apply_overrides(&mut cfg);
    cfg.validate().context("invalid settings after applying command-line flags")?;

    // Initialize logging and capture the guard so we can drop it on signal
    let guard_opt = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
        e
    })?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            out::print_warn("Received interrupt; exiting");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take(); // drop guard here to flush tracing_appender
            }
            std::process::exit(INTERRUPTED_EXIT);
        })
        .context("install interrupt handler")?;
    }

    debug!(
        config = %cfg_path.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "<defaults>".into()),
        root_style = %cfg.root_style,
        capacity = cfg.path_capacity,
        "Starting pathtree"
    );

    let ops = TreeOps::from_config(&cfg);
    let result = dispatch(&ops, &command).inspect_err(log_failure);

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}

fn print_config_location() {
    if let Some(p) = std::env::var_os(CONFIG_ENV) {
        out::print_info(&format!(
            "Using {CONFIG_ENV} (explicit):\n  {}\n",
            p.to_string_lossy()
        ));
        out::print_info(&format!(
            "To override, unset {CONFIG_ENV} or set it to another file."
        ));
        return;
    }
    match default_config_path() {
        Ok(p) => {
            out::print_info(&format!("Default pathtree config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file exists at that location.");
            } else {
                out::print_info("No config file exists there; built-in defaults apply.");
            }
        }
        Err(e) => out::print_error(&format!("Could not determine a default config path: {e}")),
    }
}

fn dispatch(ops: &TreeOps, command: &Command) -> Result<()> {
    match command {
        Command::Prettify(c) => {
            let canonical = if c.file {
                ops.prettify_file(&c.path)?
            } else {
                ops.prettify_dir(&c.path)?
            };
            out::print_user(&canonical);
        }
        Command::Mkdir(c) => {
            let dir = ops.prettify_dir(&c.path)?;
            ops.ensure_tree(&dir)?;
            out::print_user(&dir);
        }
        Command::Ls(c) => list(ops, c)?,
        Command::Mv(c) => relocate(ops, c)?,
        Command::Touch(c) => {
            let file = ops.prettify_file(&c.path)?;
            drop(ops.create_file_forced(&file)?);
            out::print_user(&file);
        }
    }
    Ok(())
}

fn list(ops: &TreeOps, c: &LsCommand) -> Result<()> {
    let mut buf = OsString::from(ops.prettify_dir(&c.dir)?);
    let mut entries = Vec::new();
    let mut remaining = c.limit;

    let outcome = ops.walk(&mut buf, |entry| {
        if remaining == Some(0) {
            return Visit::Stop;
        }
        entries.push(entry.to_path_buf());
        if let Some(n) = remaining.as_mut() {
            *n -= 1;
        }
        Visit::Continue
    })?;

    if c.sorted {
        entries.sort_by(|a, b| ops.compare(a, b));
    }
    for e in &entries {
        out::print_user(&e.to_string_lossy());
    }
    if outcome == WalkOutcome::Stopped {
        debug!(shown = entries.len(), "listing truncated by --limit");
    }
    Ok(())
}

fn relocate(ops: &TreeOps, c: &MvCommand) -> Result<()> {
    let from = ops.prettify_file(&c.from)?;
    let to = ops.prettify_file(&c.to)?;
    if c.force {
        ops.move_forced(&from, &to)?;
    } else {
        ops.move_file(&from, &to)?;
    }
    out::print_user(&format!("{from} -> {to}"));
    Ok(())
}

fn log_failure(e: &anyhow::Error) {
    let Some(pe) = e.downcast_ref::<PathTreeError>() else {
        error!(error = ?e, "Command failed");
        return;
    };
    let code = pe.code();
    let kind = pe.kind();
    match pe {
        PathTreeError::InvalidPath { path, reason }
        | PathTreeError::InvalidArgument { path, reason } => {
            error!(code, kind, path = %path, %reason, "Command failed")
        }
        PathTreeError::BufferTooSmall {
            path,
            needed,
            capacity,
        } => {
            error!(code, kind, path = %path, needed = *needed, capacity = *capacity, "Command failed")
        }
        PathTreeError::PathEscapesRoot { path } | PathTreeError::OutOfMemory { path } => {
            error!(code, kind, path = %path, "Command failed")
        }
        PathTreeError::Os { op, path, source } => {
            error!(code, kind, op = *op, path = %path.display(), error = %source, "Command failed")
        }
        PathTreeError::Visitor { path, message } => {
            error!(code, kind, path = %path, %message, "Command failed")
        }
    }
}
