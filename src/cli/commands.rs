//! CLI subcommand definitions

use clap::{Args, Subcommand};

/// Main CLI commands
#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Fetch occupancy, append it to the history and publish (default)
    Collect,
    /// Publish the current history file without fetching
    Publish,
    /// Show average occupancy from the collected history
    Summary(SummaryArgs),
}

#[derive(Debug, Clone, Args)]
pub(crate) struct SummaryArgs {
    /// Venue id (0 = all venues, 1 Alcobendas, 2 Las Rozas, 4 Legazpi, 5 Chamberí)
    #[arg(short, long)]
    pub(crate) place: Option<u32>,

    /// Months (1-12) included in the weekday breakdown, comma separated
    #[arg(short, long, value_delimiter = ',', value_name = "MONTHS")]
    pub(crate) months: Vec<u32>,

    /// Days of daily evolution to show
    #[arg(short, long, default_value_t = 30)]
    pub(crate) days: u32,

    /// Output as JSON
    #[arg(short, long)]
    pub(crate) json: bool,
}

/// Normalized command with the default filled in
#[derive(Debug, Clone)]
pub(crate) enum RunCommand {
    Collect,
    Publish,
    Summary(SummaryArgs),
}

impl From<Option<Commands>> for RunCommand {
    fn from(cmd: Option<Commands>) -> Self {
        match cmd {
            Some(Commands::Collect) | None => RunCommand::Collect,
            Some(Commands::Publish) => RunCommand::Publish,
            Some(Commands::Summary(args)) => RunCommand::Summary(args),
        }
    }
}
