//! Clap derive structures for the `shellwatch` CLI.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// shellwatch -- poll Shelly Cloud H&T sensors from the command line
#[derive(Debug, Parser)]
#[command(
    name = "shellwatch",
    version,
    about = "Watch Shelly Cloud temperature/humidity sensors",
    long_about = "Polls the Shelly Cloud for the status of your H&T sensor fleet.\n\n\
        One coordinator per account keeps network traffic bounded: readings are\n\
        served from a cached snapshot refreshed at most once per update interval.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Account name from the config file
    #[arg(long, short = 'a', env = "SHELLY_ACCOUNT", global = true)]
    pub account: Option<String>,

    /// Cloud shard identifier (overrides account), e.g. shelly-32-eu
    #[arg(long, short = 's', env = "SHELLY_SERVER", global = true)]
    pub server: Option<String>,

    /// Auth token
    #[arg(long, env = "SHELLY_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Update interval in seconds (clamped to 10..=900)
    #[arg(long, short = 'i', global = true)]
    pub interval: Option<u64>,

    /// Fetch timeout in seconds (default 10)
    #[arg(long, env = "SHELLY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SHELLY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check that the account credentials work against the live cloud
    Validate,

    /// List discovered H&T sensors
    Devices(DevicesArgs),

    /// Read one measurement of one device
    Read(ReadArgs),

    /// Poll continuously, printing readings and firmware changes
    Watch(WatchArgs),

    /// Inspect the configuration
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct DevicesArgs {
    /// Include non-H&T devices on the account
    #[arg(long)]
    pub all: bool,
}

#[derive(Debug, Args)]
pub struct ReadArgs {
    /// Device identifier
    pub device_id: String,

    /// Which measurement to read
    #[arg(value_enum, default_value = "temperature")]
    pub measurement: MeasurementArg,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Stop after this many snapshot publications (default: run until Ctrl-C)
    #[arg(long)]
    pub updates: Option<u64>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,
    /// Show the loaded configuration (tokens redacted)
    Show,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MeasurementArg {
    #[value(alias = "temp", alias = "tmp")]
    Temperature,
    #[value(alias = "hum")]
    Humidity,
}

impl From<MeasurementArg> for shellwatch_core::Measurement {
    fn from(arg: MeasurementArg) -> Self {
        match arg {
            MeasurementArg::Temperature => Self::Temperature,
            MeasurementArg::Humidity => Self::Humidity,
        }
    }
}
