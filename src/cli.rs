use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Determines if the invocation only reads or edits configuration.
/// These run without loading a full (valid) configuration first.
pub fn is_config_operation(args: &Args) -> bool {
    args.new_api_key.is_some()
        || args.new_base_url.is_some()
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
        || args.list_config
}

/// Command-line client for the Vsports sports-data API.
///
/// Each subcommand maps to one API lookup and prints the JSON response on
/// stdout. Pass --cache to read from and populate the cache configured in
/// the [cache] table of the config file.
///
/// Examples:
///   vsports events-by-date 2025-01-24 --cache
///   vsports teams-by-tournament 118 --pretty
///   vsports squads 6
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Serve the lookup from the cache when possible and store fresh responses.
    #[arg(long, global = true, help_heading = "Output Options")]
    pub cache: bool,

    /// Pretty-print the JSON response.
    #[arg(long, short = 'p', global = true, help_heading = "Output Options")]
    pub pretty: bool,

    /// Save the API key to the config file.
    #[arg(long = "set-api-key", value_name = "API_KEY", help_heading = "Configuration")]
    pub new_api_key: Option<String>,

    /// Save the API base URL to the config file.
    #[arg(long = "set-base-url", value_name = "URL", help_heading = "Configuration")]
    pub new_base_url: Option<String>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Remove every cached response from the configured cache.
    #[arg(long = "clear-cache", help_heading = "Configuration")]
    pub clear_cache: bool,

    /// Also write logs to stderr, at debug level.
    #[arg(long = "debug", global = true, help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", global = true, help_heading = "Debug")]
    pub log_file: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List active tournaments, or show one tournament
    Tournaments { tournament_id: Option<u64> },
    /// Show a team
    Teams { team_id: u64 },
    /// List the teams of a tournament
    TeamsByTournament { tournament_id: u64 },
    /// List events between two dates (YYYY-MM-DD)
    EventsByDate {
        start_date: String,
        /// Last day to include, defaults to the start date
        #[arg(long)]
        end_date: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// List all events, or show one event
    Events { event_id: Option<u64> },
    /// Like `events`, with detailed information
    EventsDetailed { event_id: Option<u64> },
    /// List the occurrences of an event
    EventsOccurrences { event_id: u64 },
    /// List the events of a tournament
    EventsByTournament { tournament_id: u64 },
    /// List the events of a tournament grouped by period
    EventsByTournamentPeriods { tournament_id: u64 },
    /// List the events of a tournament with detailed information
    EventsByTournamentDetailed { tournament_id: u64 },
    /// Show a person
    Persons { person_id: u64 },
    /// Show the squad of a team
    Squads { team_id: u64 },
    /// Show the squad of a team with detailed information
    SquadsDetailed { team_id: u64 },
    /// Show the squad a team registered for a tournament
    SquadsByTournament { team_id: u64, tournament_id: u64 },
    /// Like `squads-by-tournament`, with detailed information
    SquadsByTournamentDetailed { team_id: u64, tournament_id: u64 },
    /// Show the standings of a tournament
    StandingsByTournament { tournament_id: u64 },
    /// Show the live standings of a tournament
    StandingsByTournamentLive { tournament_id: u64 },
    /// Show a venue
    Venues { venue_id: u64 },
    /// List the venues of a team
    VenuesByTeam { team_id: u64 },
}
