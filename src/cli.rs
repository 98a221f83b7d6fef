use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "mathimg-batch.toml";

#[derive(Parser, Debug)]
#[command(
    name = "mathimg-batch",
    version,
    about = "Render a directory of MathML fixtures to SVG with mathimg"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "Config file (defaults to ./mathimg-batch.toml when present)"
    )]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the renderer and render every matching fixture
    Run {
        #[command(flatten)]
        opts: RunOpts,
        /// Skip the build step and use the existing binary
        #[arg(long, default_value_t = false)]
        no_build: bool,
        /// Print the planned invocations without building or rendering
        #[arg(long, default_value_t = false)]
        dry_run: bool,
        /// Maximum number of renderer processes alive at once
        #[arg(short = 'j', long)]
        jobs: Option<usize>,
        /// Kill an invocation that runs longer than this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
    /// List the fixtures that would be rendered
    List {
        #[command(flatten)]
        fixtures: FixtureOpts,
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Check fixtures, font, renderer binary and build tooling
    Doctor {
        #[command(flatten)]
        opts: RunOpts,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct FixtureOpts {
    /// Directory searched (recursively) for fixture files
    #[arg(long)]
    pub fixtures_dir: Option<PathBuf>,
    /// Regex matched against fixture file names
    #[arg(long)]
    pub pattern: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunOpts {
    #[command(flatten)]
    pub fixtures: FixtureOpts,
    /// Math font passed to the renderer as `-f`
    #[arg(short = 'f', long)]
    pub font: Option<String>,
    #[arg(long, default_value_t = false, overrides_with = "no_show_ink_bounds")]
    pub show_ink_bounds: bool,
    /// Turn off ink bounds set in the config file
    #[arg(long, default_value_t = false, overrides_with = "show_ink_bounds")]
    pub no_show_ink_bounds: bool,
    #[arg(long, default_value_t = false, overrides_with = "no_show_logical_bounds")]
    pub show_logical_bounds: bool,
    /// Turn off logical bounds set in the config file
    #[arg(long, default_value_t = false, overrides_with = "show_logical_bounds")]
    pub no_show_logical_bounds: bool,
    #[arg(
        long,
        default_value_t = false,
        overrides_with = "no_show_top_accent_attachment"
    )]
    pub show_top_accent_attachment: bool,
    /// Turn off top accent attachment set in the config file
    #[arg(
        long,
        default_value_t = false,
        overrides_with = "show_top_accent_attachment"
    )]
    pub no_show_top_accent_attachment: bool,
    /// Directory the renderer writes SVG files into
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
    /// Path to the renderer binary produced by the build step
    #[arg(long)]
    pub binary: Option<PathBuf>,
    /// Command used to build the renderer (split on whitespace)
    #[arg(long)]
    pub build_command: Option<String>,
}
