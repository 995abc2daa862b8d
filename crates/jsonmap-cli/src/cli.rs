//! CLI argument definitions for the JSON field mapper.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use jsonmap_cli::inputs::SessionFiles;
use jsonmap_map::FanOutPolicy;

#[derive(Parser)]
#[command(
    name = "jsonmap",
    version,
    about = "Rename fields of nested JSON records by mapping them onto a target shape",
    long_about = "Rename fields of nested JSON records by mapping them onto a target shape.\n\n\
                  Rules come from a saved rules file and from replayed drag/drop commands.\n\
                  The transformed records can be previewed, inspected or stored."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// JSON configuration file with `mapper` and `gateway` sections.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the transformed records as indented JSON.
    Preview(SessionArgs),

    /// Print the source and target rows with their mapping status.
    Rows(SessionArgs),

    /// Print the connector links between mapped rows.
    Links(SessionArgs),

    /// Submit the transformed records to the storage endpoint.
    Save(SaveArgs),
}

#[derive(Args)]
pub struct SessionArgs {
    /// Source records: a JSON array of objects or a single object.
    #[arg(long = "source", value_name = "FILE")]
    pub source: PathBuf,

    /// Target shape: a JSON object.
    #[arg(long = "target", value_name = "FILE")]
    pub target: PathBuf,

    /// Saved rules, `{"rules": [...]}` or a bare array.
    #[arg(long = "rules", value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Drag/drop commands replayed after the rules are loaded.
    #[arg(long = "commands", value_name = "FILE")]
    pub commands: Option<PathBuf>,

    /// How repeated drops from one source field are stored.
    #[arg(long = "fan-out", value_enum)]
    pub fan_out: Option<FanOutArg>,
}

impl SessionArgs {
    pub fn files(&self) -> SessionFiles {
        SessionFiles {
            source: self.source.clone(),
            target: self.target.clone(),
            rules: self.rules.clone(),
            commands: self.commands.clone(),
        }
    }
}

#[derive(Args)]
pub struct SaveArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Storage endpoint URL.
    #[arg(long = "endpoint", value_name = "URL")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds.
    #[arg(long = "timeout", value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FanOutArg {
    /// Keep every target dropped from a source.
    Allow,
    /// A new drop replaces the rules of its source.
    Replace,
}

impl From<FanOutArg> for FanOutPolicy {
    fn from(arg: FanOutArg) -> Self {
        match arg {
            FanOutArg::Allow => FanOutPolicy::Allow,
            FanOutArg::Replace => FanOutPolicy::ReplaceExisting,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
