//! URL building utilities for API endpoints

/// Joins the base URL and an endpoint path with exactly one slash.
///
/// # Example
/// ```
/// use vsports::data_fetcher::api::build_url;
///
/// let url = build_url("https://api.example.com/api/", "/teams/by/tournament/118");
/// assert_eq!(url, "https://api.example.com/api/teams/by/tournament/118");
/// ```
pub fn build_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

pub fn tournaments_endpoint(tournament_id: Option<u64>) -> String {
    match tournament_id {
        Some(id) => format!("tournaments/{id}"),
        None => "tournaments".to_string(),
    }
}

pub fn team_endpoint(team_id: u64) -> String {
    format!("teams/{team_id}")
}

/// # Example
/// ```
/// use vsports::data_fetcher::api::teams_by_tournament_endpoint;
///
/// assert_eq!(teams_by_tournament_endpoint(118), "teams/by/tournament/118");
/// ```
pub fn teams_by_tournament_endpoint(tournament_id: u64) -> String {
    format!("teams/by/tournament/{tournament_id}")
}

pub fn events_endpoint(event_id: Option<u64>) -> String {
    match event_id {
        Some(id) => format!("events/{id}"),
        None => "events".to_string(),
    }
}

pub fn events_detailed_endpoint(event_id: Option<u64>) -> String {
    match event_id {
        Some(id) => format!("events/{id}/detailed"),
        None => "events/detailed".to_string(),
    }
}

pub fn event_occurrences_endpoint(event_id: u64) -> String {
    format!("events/{event_id}/occurrences")
}

pub fn events_by_tournament_endpoint(tournament_id: u64) -> String {
    format!("events/by/tournament/{tournament_id}")
}

pub fn events_by_tournament_periods_endpoint(tournament_id: u64) -> String {
    format!("events/by/tournament/{tournament_id}/periods")
}

pub fn events_by_tournament_detailed_endpoint(tournament_id: u64) -> String {
    format!("events/by/tournament/{tournament_id}/detailed")
}

pub fn person_endpoint(person_id: u64) -> String {
    format!("persons/{person_id}")
}

pub fn squad_endpoint(team_id: u64) -> String {
    format!("squads/{team_id}")
}

pub fn squad_detailed_endpoint(team_id: u64) -> String {
    format!("squads/{team_id}/detailed")
}

pub fn squad_by_tournament_endpoint(team_id: u64, tournament_id: u64) -> String {
    format!("squads/{team_id}/by/tournament/{tournament_id}")
}

pub fn squad_by_tournament_detailed_endpoint(team_id: u64, tournament_id: u64) -> String {
    format!("squads/{team_id}/by/tournament/{tournament_id}/detailed")
}

pub fn standings_by_tournament_endpoint(tournament_id: u64) -> String {
    format!("standings/by/tournament/{tournament_id}")
}

pub fn standings_by_tournament_live_endpoint(tournament_id: u64) -> String {
    format!("standings/by/tournament/{tournament_id}/live")
}

pub fn venue_endpoint(venue_id: u64) -> String {
    format!("venues/{venue_id}")
}

pub fn venues_by_team_endpoint(team_id: u64) -> String {
    format!("venues/by/team/{team_id}")
}
