use crate::cli::{Args, Command};
use serde_json::Value;
use tracing::info;
use vsports::{AppError, Config, EventsQuery, VsportsClient};

/// Validates command line argument combinations.
///
/// Returns an error if incompatible arguments are used together.
pub fn validate_args(args: &Args) -> Result<(), AppError> {
    if args.new_log_file_path.is_some() && args.clear_log_file_path {
        return Err(AppError::config_error(
            "Cannot use both --set-log-file and --clear-log-file",
        ));
    }
    if args.command.is_some() && crate::cli::is_config_operation(args) {
        return Err(AppError::config_error(
            "Configuration flags cannot be combined with a lookup subcommand",
        ));
    }
    Ok(())
}

/// Handles the --list-config command.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    Config::display().await
}

/// Handles configuration update commands (--set-api-key, --set-base-url,
/// --set-log-file, --clear-log-file).
pub async fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    update_config_file(&Config::get_config_path(), args).await?;
    println!("Config updated successfully!");
    Ok(())
}

/// Applies the configuration flags to the file at `config_path`.
///
/// Starts from the existing file so unrelated settings survive the update.
/// Only a missing file falls back to defaults; a file that cannot be read
/// or parsed is reported and left untouched.
pub async fn update_config_file(config_path: &str, args: &Args) -> Result<(), AppError> {
    let mut config = match Config::load_from_path(config_path).await {
        Ok(config) => config,
        Err(AppError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Config::default(),
        Err(e) => {
            return Err(AppError::config_error(format!(
                "Cannot update {config_path}, existing file is invalid: {e}"
            )));
        }
    };

    if let Some(new_key) = &args.new_api_key {
        let new_key = new_key.trim();
        if new_key.is_empty() {
            return Err(AppError::invalid_input("api_key", "API key cannot be empty"));
        }
        config.api_key = new_key.to_string();
    }

    if let Some(new_base_url) = &args.new_base_url {
        vsports::config::validation::validate_base_url(new_base_url)?;
        config.base_url = new_base_url.clone();
    }

    if let Some(new_log_path) = &args.new_log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.save_to_path(config_path).await
}

/// Handles the --clear-cache command.
pub async fn handle_clear_cache_command(config: &Config) -> Result<(), AppError> {
    if config.cache.is_none() {
        println!("Caching is not configured, nothing to clear.");
        return Ok(());
    }

    let client = VsportsClient::from_config(config)?;
    client
        .clear_cache()
        .await
        .map_err(|e| AppError::config_error(format!("Failed to clear cache: {e}")))?;
    println!("Cache cleared.");
    Ok(())
}

/// Dispatches a lookup subcommand to the matching client method.
pub async fn run_lookup(
    client: &VsportsClient,
    command: &Command,
    usecache: bool,
) -> Result<Value, AppError> {
    match command {
        Command::Tournaments { tournament_id } => {
            client.tournaments(*tournament_id, usecache).await
        }
        Command::Teams { team_id } => client.teams(*team_id, usecache).await,
        Command::TeamsByTournament { tournament_id } => {
            client.teams_by_tournament(*tournament_id, usecache).await
        }
        Command::EventsByDate {
            start_date,
            end_date,
            page,
            page_size,
        } => {
            let mut query = EventsQuery::new(start_date.clone());
            if let Some(end_date) = end_date {
                query = query.end_date(end_date.clone());
            }
            if let Some(page) = page {
                query = query.page(*page);
            }
            if let Some(page_size) = page_size {
                query = query.page_size(*page_size);
            }
            client.events_by_date_range(&query, usecache).await
        }
        Command::Events { event_id } => client.events(*event_id, usecache).await,
        Command::EventsDetailed { event_id } => client.events_detailed(*event_id, usecache).await,
        Command::EventsOccurrences { event_id } => {
            client.events_occurrences(*event_id, usecache).await
        }
        Command::EventsByTournament { tournament_id } => {
            client.events_by_tournament(*tournament_id, usecache).await
        }
        Command::EventsByTournamentPeriods { tournament_id } => {
            client
                .events_by_tournament_periods(*tournament_id, usecache)
                .await
        }
        Command::EventsByTournamentDetailed { tournament_id } => {
            client
                .events_by_tournament_detailed(*tournament_id, usecache)
                .await
        }
        Command::Persons { person_id } => client.persons(*person_id, usecache).await,
        Command::Squads { team_id } => client.squads(*team_id, usecache).await,
        Command::SquadsDetailed { team_id } => client.squads_detailed(*team_id, usecache).await,
        Command::SquadsByTournament {
            team_id,
            tournament_id,
        } => {
            client
                .squads_by_tournament(*team_id, *tournament_id, usecache)
                .await
        }
        Command::SquadsByTournamentDetailed {
            team_id,
            tournament_id,
        } => {
            client
                .squads_by_tournament_detailed(*team_id, *tournament_id, usecache)
                .await
        }
        Command::StandingsByTournament { tournament_id } => {
            client.standings_by_tournament(*tournament_id, usecache).await
        }
        Command::StandingsByTournamentLive { tournament_id } => {
            client
                .standings_by_tournament_live(*tournament_id, usecache)
                .await
        }
        Command::Venues { venue_id } => client.venues(*venue_id, usecache).await,
        Command::VenuesByTeam { team_id } => client.venues_by_team(*team_id, usecache).await,
    }
}

/// Renders a response for stdout
pub fn render_json(value: &Value, pretty: bool) -> Result<String, AppError> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}

/// Handles a lookup subcommand: runs it and prints the JSON response.
pub async fn handle_lookup_command(
    config: &Config,
    command: &Command,
    args: &Args,
) -> Result<(), AppError> {
    let client = VsportsClient::from_config(config)?;
    if args.cache && !client.is_cache_enabled() {
        info!("--cache given but no [cache] table is configured; fetching directly");
    }

    let value = run_lookup(&client, command, args.cache).await?;
    println!("{}", render_json(&value, args.pretty)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serde_json::json;
    use tempfile::tempdir;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    #[test]
    fn test_validate_args_conflicts() {
        let args = Args::try_parse_from([
            "vsports",
            "--set-log-file",
            "/tmp/v.log",
            "--clear-log-file",
        ])
        .unwrap();
        assert!(validate_args(&args).is_err());

        let args = Args::try_parse_from(["vsports", "--list-config", "teams", "6"]).unwrap();
        assert!(validate_args(&args).is_err());

        let args = Args::try_parse_from(["vsports", "teams", "6", "--cache"]).unwrap();
        assert!(validate_args(&args).is_ok());
    }

    #[tokio::test]
    async fn test_update_config_keeps_cache_table() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path = config_path.to_str().unwrap();
        tokio::fs::write(
            config_path,
            "api_key = \"old_key\"\n\n[cache]\nhost = \"redis.local\"\nttl = 120\n",
        )
        .await
        .unwrap();

        let args = Args::try_parse_from(["vsports", "--set-api-key", " new_key "]).unwrap();
        update_config_file(config_path, &args).await.unwrap();

        let config = Config::load_from_path(config_path).await.unwrap();
        assert_eq!(config.api_key, "new_key");
        let cache = config.cache.unwrap();
        assert_eq!(cache.host, "redis.local");
        assert_eq!(cache.ttl, 120);
    }

    #[tokio::test]
    async fn test_update_config_creates_missing_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path = config_path.to_str().unwrap();

        let args = Args::try_parse_from(["vsports", "--set-api-key", "fresh_key"]).unwrap();
        update_config_file(config_path, &args).await.unwrap();

        let config = Config::load_from_path(config_path).await.unwrap();
        assert_eq!(config.api_key, "fresh_key");
    }

    #[tokio::test]
    async fn test_update_config_refuses_to_overwrite_invalid_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path = config_path.to_str().unwrap();
        let broken = "api_key = \"key\"\n[cache\nhost = \"redis.local\"\n";
        tokio::fs::write(config_path, broken).await.unwrap();

        let args = Args::try_parse_from(["vsports", "--set-base-url", "https://api.example.com"])
            .unwrap();
        let result = update_config_file(config_path, &args).await;

        assert!(matches!(result, Err(AppError::Config(_))));
        assert_eq!(tokio::fs::read_to_string(config_path).await.unwrap(), broken);
    }

    #[tokio::test]
    async fn test_update_config_rejects_blank_api_key() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path = config_path.to_str().unwrap();

        for key in ["", "   "] {
            let args = Args::try_parse_from(["vsports", "--set-api-key", key]).unwrap();
            let result = update_config_file(config_path, &args).await;
            assert!(matches!(result, Err(AppError::InvalidInput { .. })));
        }
        assert!(!temp_dir.path().join("config.toml").exists());
    }

    #[test]
    fn test_render_json() {
        let value = json!([{"name": "Benfica"}]);
        assert_eq!(render_json(&value, false).unwrap(), r#"[{"name":"Benfica"}]"#);
        assert!(render_json(&value, true).unwrap().contains("\n"));
    }

    #[tokio::test]
    async fn test_run_lookup_events_by_date_range() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events"))
            .and(query_param("start_date", "2025-01-24"))
            .and(query_param("end_date", "2025-01-26"))
            .and(query_param("page_size", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = VsportsClient::builder("test_api_key")
            .base_url(mock_server.uri())
            .build()
            .unwrap();
        let command = Command::EventsByDate {
            start_date: "2025-01-24".to_string(),
            end_date: Some("2025-01-26".to_string()),
            page: None,
            page_size: Some(10),
        };

        let value = run_lookup(&client, &command, false).await.unwrap();
        assert_eq!(value, json!([]));
    }
}
