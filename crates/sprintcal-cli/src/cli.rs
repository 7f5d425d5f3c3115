use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sprintcal")]
#[command(about = "Plan sprints as colored ranges on a calendar", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to sprint data file (or set SPRINTCAL_FILE env var)
    #[arg(value_name = "FILE", env = "SPRINTCAL_FILE")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sprint operations
    Sprint(SprintCommand),
    /// Show which sprint owns a date
    Owner(OwnerArgs),
    /// Select a sprint by id or by a date it covers
    Select(SelectArgs),
    /// Month and year calendar views
    Calendar(CalendarCommand),
    /// Export all sprints as a JSON array
    Export(ExportArgs),
    /// Replace all sprints with the contents of an export file
    Import(ImportArgs),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// Sprint commands
#[derive(Args)]
pub struct SprintCommand {
    #[command(subcommand)]
    pub action: SprintAction,
}

#[derive(Subcommand)]
pub enum SprintAction {
    /// Create a new sprint
    Create(SprintCreateArgs),
    /// List sprints, latest start first
    List,
    /// Get a specific sprint
    Get {
        #[arg(long)]
        id: String,
    },
    /// Update a sprint
    Update(SprintUpdateArgs),
    /// Delete a sprint
    Delete {
        #[arg(long)]
        id: String,
        /// Currently selected sprint id
        #[arg(long)]
        selected: Option<String>,
    },
    /// Delete every sprint and reset the color rotation
    Clear,
}

#[derive(Args)]
pub struct SprintCreateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: Option<String>,
    /// Start date (YYYY-MM-DD). Defaults to the day after the last sprint ended
    #[arg(long)]
    pub start: Option<String>,
    /// End date (YYYY-MM-DD). Defaults to the configured sprint length
    #[arg(long)]
    pub end: Option<String>,
}

#[derive(Args)]
pub struct SprintUpdateArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long, conflicts_with = "clear_description")]
    pub description: Option<String>,
    #[arg(long)]
    pub clear_description: bool,
    #[arg(long)]
    pub start: Option<String>,
    #[arg(long)]
    pub end: Option<String>,
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Args)]
pub struct OwnerArgs {
    #[arg(long)]
    pub date: String,
    /// Currently selected sprint id
    #[arg(long)]
    pub selected: Option<String>,
}

#[derive(Args)]
pub struct SelectArgs {
    #[arg(long, conflicts_with = "date", required_unless_present = "date")]
    pub id: Option<String>,
    #[arg(long)]
    pub date: Option<String>,
    /// Currently selected sprint id
    #[arg(long)]
    pub selected: Option<String>,
}

// Calendar commands
#[derive(Args)]
pub struct CalendarCommand {
    #[command(subcommand)]
    pub action: CalendarAction,
}

#[derive(Subcommand)]
pub enum CalendarAction {
    /// One month, as whole weeks
    Month {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[arg(long)]
        selected: Option<String>,
    },
    /// All twelve months of a year
    Year {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        selected: Option<String>,
    },
}

#[derive(Args)]
pub struct ExportArgs {
    /// Write a dated export file into DIR instead of stdout.
    /// Without DIR, uses the configured download directory
    #[arg(long, value_name = "DIR", num_args = 0..=1)]
    pub out_dir: Option<Option<PathBuf>>,
}

#[derive(Args)]
pub struct ImportArgs {
    #[arg(long)]
    pub file: PathBuf,
    /// Currently selected sprint id
    #[arg(long)]
    pub selected: Option<String>,
}
