//! CLI definition and parsing.
//! Defines Args (global flags) and Command (subcommands), plus parse().
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug.
//! - --print-config may be given without a subcommand.

use clap::{Args as ClapArgs, Parser, Subcommand, ValueHint};

use crate::config::types::{Config, LogLevel, parse_mode};
use crate::path::RootStyle;

/// Canonicalize paths and manage file trees.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "pathtree",
    author,
    version,
    about = "Canonical paths and safe file tree operations"
)]
pub struct Args {
    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        global = true,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, global = true, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Root detection: host, posix or drive.
    #[arg(long, global = true, value_name = "STYLE")]
    pub root_style: Option<RootStyle>,

    /// Maximum canonical path length in bytes.
    #[arg(long, global = true, value_name = "BYTES")]
    pub capacity: Option<usize>,

    /// Octal mode for directories created on demand (e.g. 0755).
    #[arg(long, global = true, value_name = "OCTAL", value_parser = parse_mode_arg)]
    pub mode: Option<u32>,

    /// Print where pathtree will look for the config file (or PATHTREE_CONFIG if set), then exit.
    #[arg(long, help = "Print the config file location used by pathtree and exit")]
    pub print_config: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the canonical form of a path
    Prettify(PrettifyCommand),

    /// Create a directory and every missing ancestor
    Mkdir(MkdirCommand),

    /// List the entries of one directory
    Ls(LsCommand),

    /// Move a file, optionally creating the destination's parent tree
    Mv(MvCommand),

    /// Create or truncate a file, creating its parent tree first
    Touch(TouchCommand),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct PrettifyCommand {
    #[arg(value_name = "PATH", value_hint = ValueHint::AnyPath)]
    pub path: String,

    /// Canonicalize as a file path (no trailing separator)
    #[arg(long)]
    pub file: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct MkdirCommand {
    #[arg(value_name = "PATH", value_hint = ValueHint::DirPath)]
    pub path: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct LsCommand {
    #[arg(value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub dir: String,

    /// Stop after this many entries
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Print entries in tree order (directories sort as if they ended in '/')
    #[arg(long)]
    pub sorted: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct MvCommand {
    #[arg(value_name = "FROM", value_hint = ValueHint::FilePath)]
    pub from: String,

    #[arg(value_name = "TO", value_hint = ValueHint::FilePath)]
    pub to: String,

    /// Create the destination's parent directories if missing
    #[arg(short, long)]
    pub force: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct TouchCommand {
    #[arg(value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub path: String,
}

fn parse_mode_arg(s: &str) -> Result<u32, String> {
    match parse_mode(s) {
        Some(m) if m <= 0o7777 => Ok(m),
        _ => Err(format!("invalid octal mode: '{s}'")),
    }
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(style) = self.root_style {
            cfg.root_style = style;
        }
        if let Some(cap) = self.capacity {
            cfg.path_capacity = cap;
        }
        if let Some(mode) = self.mode {
            cfg.dir_mode = mode;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
