//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::time::Duration;

use autoslide_core::domain::TabRoute;
use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub mod values;

pub use global::{GlobalArgs, OutputFormat};
pub use values::{DragSpec, LayoutSpec, ResetSpec};

use values::parse_duration;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "autoslide",
    bin_name = "autoslide",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Interaction-aware auto-advancing carousel, on virtual time",
    long_about = "autoslide drives a carousel controller against a headless \
                  scroll surface and a virtual clock, so auto-advance, drag \
                  cooldowns and scroll fallbacks can be inspected offline.",
    after_help = "EXAMPLES:\n\
        \x20 autoslide simulate --slides a,b,c --drag 12s --until 30s\n\
        \x20 autoslide simulate --slides a,b,c --reject-index 1 --format json\n\
        \x20 autoslide tabs --path /store/42 --tab store=/store --tab home=/\n\
        \x20 autoslide completions bash > /usr/share/bash-completion/completions/autoslide",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a scripted session against a carousel controller.
    #[command(
        visible_alias = "sim",
        about = "Simulate a carousel on virtual time",
        after_help = "EXAMPLES:\n\
            \x20 autoslide simulate --slides a,b,c\n\
            \x20 autoslide simulate --slides a,b,c --drag 12s --until 26s\n\
            \x20 autoslide simulate --slides a,b,c --drag 6s..7s@0\n\
            \x20 autoslide simulate --slides a,b,c --reset-at 7s=x,y --unmount-at 20s\n\
            \x20 autoslide simulate --slides a,b --width 0 --layout-at 2s=320"
    )]
    Simulate(SimulateArgs),

    /// Resolve the highlighted bottom-navigation tab for route paths.
    #[command(
        about = "Derive the active tab for a path",
        after_help = "EXAMPLES:\n\
            \x20 autoslide tabs --path /store/42 --tab store=/store --tab home=/\n\
            \x20 autoslide tabs --path /deals --path /deals/7 --tab deals=/deals"
    )]
    Tabs(TabsArgs),

    /// Initialise an autoslide configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 autoslide init           # default location\n\
            \x20 autoslide init --local   # ./.autoslide.toml\n\
            \x20 autoslide -c my.toml init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 autoslide completions bash > ~/.local/share/bash-completion/completions/autoslide\n\
            \x20 autoslide completions zsh  > ~/.zfunc/_autoslide\n\
            \x20 autoslide completions fish > ~/.config/fish/completions/autoslide.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the autoslide configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 autoslide config get carousel.tick_interval_ms\n\
            \x20 autoslide config list\n\
            \x20 autoslide config path"
    )]
    Config(ConfigCommands),
}

// ── simulate ──────────────────────────────────────────────────────────────────

/// Arguments for `autoslide simulate`.
#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// Slide identifiers in display order.
    #[arg(
        short = 's',
        long = "slides",
        value_name = "SLIDES",
        value_delimiter = ',',
        required = true,
        help = "Comma-separated slide list"
    )]
    pub slides: Vec<String>,

    /// Measured slide width; 0 means layout has not happened yet.
    #[arg(
        short = 'w',
        long = "width",
        value_name = "PX",
        default_value_t = 320.0,
        help = "Measured slide width"
    )]
    pub width: f64,

    /// How long to run.
    #[arg(
        short = 'u',
        long = "until",
        value_name = "TIME",
        value_parser = parse_duration,
        default_value = "30s",
        help = "Virtual time to stop at"
    )]
    pub until: Duration,

    #[arg(
        long = "drag",
        value_name = "START[..END][@INDEX]",
        help = "User drag gesture (repeatable)"
    )]
    pub drags: Vec<DragSpec>,

    #[arg(
        long = "reset-at",
        value_name = "TIME=SLIDES",
        help = "Replace the slide list at TIME (repeatable)"
    )]
    pub resets: Vec<ResetSpec>,

    #[arg(
        long = "layout-at",
        value_name = "TIME=WIDTH",
        help = "Report a measured width at TIME (repeatable)"
    )]
    pub layouts: Vec<LayoutSpec>,

    #[arg(
        long = "reject-index",
        value_name = "INDEX",
        help = "Surface refuses index scrolls to INDEX (repeatable)"
    )]
    pub reject_index: Vec<usize>,

    #[arg(long = "reject-offsets", help = "Surface refuses offset scrolls too")]
    pub reject_offsets: bool,

    #[arg(
        long = "unmount-at",
        value_name = "TIME",
        value_parser = parse_duration,
        help = "Unmount the card at TIME"
    )]
    pub unmount_at: Option<Duration>,

    /// Overrides `carousel.tick_interval_ms`.
    #[arg(long = "tick", value_name = "TIME", value_parser = parse_duration)]
    pub tick: Option<Duration>,

    /// Overrides `carousel.cooldown_ms`.
    #[arg(long = "cooldown", value_name = "TIME", value_parser = parse_duration)]
    pub cooldown: Option<Duration>,

    /// Overrides `carousel.settle_delay_ms`.
    #[arg(long = "settle-delay", value_name = "TIME", value_parser = parse_duration)]
    pub settle_delay: Option<Duration>,

    /// Include every scroll command in the table output.
    #[arg(long = "commands", help = "Also print scroll commands")]
    pub show_commands: bool,

    #[arg(long = "format", value_enum, help = "Output format")]
    pub format: Option<ReportFormat>,
}

// ── tabs ──────────────────────────────────────────────────────────────────────

/// Arguments for `autoslide tabs`.
#[derive(Debug, Args)]
pub struct TabsArgs {
    /// Route paths to resolve, in order.
    #[arg(
        short = 'p',
        long = "path",
        value_name = "PATH",
        required = true,
        help = "Current route path (repeatable)"
    )]
    pub paths: Vec<String>,

    /// Tabs in declaration order; the first match wins.
    #[arg(
        short = 't',
        long = "tab",
        value_name = "ID=/PREFIX",
        required = true,
        help = "Tab id and route prefix (repeatable)"
    )]
    pub tabs: Vec<TabRoute>,

    #[arg(long = "format", value_enum, help = "Output format")]
    pub format: Option<ReportFormat>,
}

/// Output format for report-style commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable table.
    Table,
    /// JSON document.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `autoslide init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.autoslide.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `autoslide completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `autoslide config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `carousel.cooldown_ms`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
