use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Lewis Structure Visualizer Contributors",
    version,
    about = "lewis - VSEPR geometry classification and orbital layout for Lewis structures produced by the structure solver.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for batch classification.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a molecule and compute the position and orbitals of every atom.
    Layout(LayoutArgs),
    /// Classify the geometry of many molecules in parallel.
    Classify(ClassifyArgs),
    /// Build the Lewis structure of a formula and write it as structure JSON.
    Solve(SolveArgs),
    /// Manage the local data directory holding the element table.
    Data(DataArgs),
}

/// Arguments for the `layout` subcommand.
#[derive(Args, Debug)]
pub struct LayoutArgs {
    // --- Core Arguments ---
    /// Path to the solver's structure JSON file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the scene JSON output. Only a summary is printed if omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to a layout configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Element table CSV (atomic number, symbol). Defaults to the data directory, then the built-in table.
    #[arg(long, value_name = "PATH")]
    pub elements: Option<PathBuf>,

    // --- Placement Overrides ---
    /// Override `placement.centralize` from the config file.
    #[command(flatten)]
    pub centralize: CentralizeFlag,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S placement.sp-orbital-shift=2.5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// A group to handle mutually exclusive flags for recentring diatomic molecules.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = false, multiple = false)]
pub struct CentralizeFlag {
    /// Move a two-atom molecule so that its bond midpoint is at the origin.
    #[arg(long)]
    pub centralize: bool,
    /// Keep the central atom of a two-atom molecule at the origin.
    #[arg(long)]
    pub no_centralize: bool,
}

impl CentralizeFlag {
    pub fn value(self) -> Option<bool> {
        if self.centralize {
            Some(true)
        } else if self.no_centralize {
            Some(false)
        } else {
            None
        }
    }
}

/// Arguments for the `classify` subcommand.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Structure JSON files to classify.
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Element table CSV (atomic number, symbol). Defaults to the data directory, then the built-in table.
    #[arg(long, value_name = "PATH")]
    pub elements: Option<PathBuf>,
}

/// Arguments for the `solve` subcommand.
#[derive(Args, Debug)]
pub struct SolveArgs {
    /// Molecular formula, e.g. H2O or XeF4. Parentheses are not supported.
    #[arg(value_name = "FORMULA")]
    pub formula: String,

    /// Net charge of the molecule or ion.
    #[arg(value_name = "CHARGE", default_value_t = 0, allow_negative_numbers = true)]
    pub charge: i32,

    /// Path for the structure JSON output. Written to stdout if omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Element table CSV (atomic number, symbol, electronegativity).
    #[arg(long, value_name = "PATH")]
    pub elements: Option<PathBuf>,
}

/// Arguments for the `data` subcommand.
#[derive(Args, Debug)]
pub struct DataArgs {
    #[command(subcommand)]
    pub command: DataCommands,
}

/// Available commands for data management.
#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Show the absolute path to the local data directory.
    Path,
    /// Set a custom absolute path for the local data directory.
    SetPath {
        /// The new path to use for storing data files.
        #[arg(required = true)]
        path: PathBuf,
    },
    /// Reset the data path to its default, OS-specific location.
    ResetPath,
}
