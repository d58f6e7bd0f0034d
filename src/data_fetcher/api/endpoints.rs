//! Lookup methods, one per remote resource.
//!
//! Every method validates its arguments, builds an [`ApiRequest`] and hands it
//! to [`VsportsClient::fetch`]. The returned JSON is passed through untouched.

use serde_json::Value;

use super::core::VsportsClient;
use super::request::{ApiRequest, EventsQuery};
use super::urls;
use super::validation::validate_id;
use crate::error::AppError;

fn optional_id(field: &str, id: Option<u64>) -> Result<Option<u64>, AppError> {
    id.map(|id| validate_id(field, id)).transpose()
}

impl VsportsClient {
    /// All active tournaments, or a single tournament when an id is given.
    pub async fn tournaments(
        &self,
        tournament_id: Option<u64>,
        usecache: bool,
    ) -> Result<Value, AppError> {
        let id = optional_id("tournament_id", tournament_id)?;
        self.fetch(&ApiRequest::new(urls::tournaments_endpoint(id)), usecache)
            .await
    }

    pub async fn teams(&self, team_id: u64, usecache: bool) -> Result<Value, AppError> {
        let id = validate_id("team_id", team_id)?;
        self.fetch(&ApiRequest::new(urls::team_endpoint(id)), usecache)
            .await
    }

    /// Teams taking part in a tournament. The remote service answers with an
    /// array of team objects, each carrying at least a `name`.
    pub async fn teams_by_tournament(
        &self,
        tournament_id: u64,
        usecache: bool,
    ) -> Result<Value, AppError> {
        let id = validate_id("tournament_id", tournament_id)?;
        self.fetch(
            &ApiRequest::new(urls::teams_by_tournament_endpoint(id)),
            usecache,
        )
        .await
    }

    /// Events on a single `YYYY-MM-DD` date.
    pub async fn events_by_date(&self, date: &str, usecache: bool) -> Result<Value, AppError> {
        self.events_by_date_range(&EventsQuery::new(date), usecache)
            .await
    }

    /// Events between two dates, optionally paged.
    pub async fn events_by_date_range(
        &self,
        query: &EventsQuery,
        usecache: bool,
    ) -> Result<Value, AppError> {
        let request = query.to_request()?;
        self.fetch(&request, usecache).await
    }

    /// The complete event list, or a single event when an id is given.
    pub async fn events(&self, event_id: Option<u64>, usecache: bool) -> Result<Value, AppError> {
        let id = optional_id("event_id", event_id)?;
        self.fetch(&ApiRequest::new(urls::events_endpoint(id)), usecache)
            .await
    }

    /// Like [`events`](Self::events) with detailed information.
    pub async fn events_detailed(
        &self,
        event_id: Option<u64>,
        usecache: bool,
    ) -> Result<Value, AppError> {
        let id = optional_id("event_id", event_id)?;
        self.fetch(
            &ApiRequest::new(urls::events_detailed_endpoint(id)),
            usecache,
        )
        .await
    }

    /// Occurrences (goals, cards, substitutions, ...) of an event.
    pub async fn events_occurrences(
        &self,
        event_id: u64,
        usecache: bool,
    ) -> Result<Value, AppError> {
        let id = validate_id("event_id", event_id)?;
        self.fetch(
            &ApiRequest::new(urls::event_occurrences_endpoint(id)),
            usecache,
        )
        .await
    }

    pub async fn events_by_tournament(
        &self,
        tournament_id: u64,
        usecache: bool,
    ) -> Result<Value, AppError> {
        let id = validate_id("tournament_id", tournament_id)?;
        self.fetch(
            &ApiRequest::new(urls::events_by_tournament_endpoint(id)),
            usecache,
        )
        .await
    }

    /// Tournament events grouped by period (round).
    pub async fn events_by_tournament_periods(
        &self,
        tournament_id: u64,
        usecache: bool,
    ) -> Result<Value, AppError> {
        let id = validate_id("tournament_id", tournament_id)?;
        self.fetch(
            &ApiRequest::new(urls::events_by_tournament_periods_endpoint(id)),
            usecache,
        )
        .await
    }

    pub async fn events_by_tournament_detailed(
        &self,
        tournament_id: u64,
        usecache: bool,
    ) -> Result<Value, AppError> {
        let id = validate_id("tournament_id", tournament_id)?;
        self.fetch(
            &ApiRequest::new(urls::events_by_tournament_detailed_endpoint(id)),
            usecache,
        )
        .await
    }

    pub async fn persons(&self, person_id: u64, usecache: bool) -> Result<Value, AppError> {
        let id = validate_id("person_id", person_id)?;
        self.fetch(&ApiRequest::new(urls::person_endpoint(id)), usecache)
            .await
    }

    /// Squad of a team. Members are listed under `squad`, each with a `type`
    /// such as `player` or `coach`.
    pub async fn squads(&self, team_id: u64, usecache: bool) -> Result<Value, AppError> {
        let id = validate_id("team_id", team_id)?;
        self.fetch(&ApiRequest::new(urls::squad_endpoint(id)), usecache)
            .await
    }

    pub async fn squads_detailed(&self, team_id: u64, usecache: bool) -> Result<Value, AppError> {
        let id = validate_id("team_id", team_id)?;
        self.fetch(&ApiRequest::new(urls::squad_detailed_endpoint(id)), usecache)
            .await
    }

    /// Squad a team registered for a specific tournament.
    pub async fn squads_by_tournament(
        &self,
        team_id: u64,
        tournament_id: u64,
        usecache: bool,
    ) -> Result<Value, AppError> {
        let team = validate_id("team_id", team_id)?;
        let tournament = validate_id("tournament_id", tournament_id)?;
        self.fetch(
            &ApiRequest::new(urls::squad_by_tournament_endpoint(team, tournament)),
            usecache,
        )
        .await
    }

    pub async fn squads_by_tournament_detailed(
        &self,
        team_id: u64,
        tournament_id: u64,
        usecache: bool,
    ) -> Result<Value, AppError> {
        let team = validate_id("team_id", team_id)?;
        let tournament = validate_id("tournament_id", tournament_id)?;
        self.fetch(
            &ApiRequest::new(urls::squad_by_tournament_detailed_endpoint(
                team, tournament,
            )),
            usecache,
        )
        .await
    }

    pub async fn standings_by_tournament(
        &self,
        tournament_id: u64,
        usecache: bool,
    ) -> Result<Value, AppError> {
        let id = validate_id("tournament_id", tournament_id)?;
        self.fetch(
            &ApiRequest::new(urls::standings_by_tournament_endpoint(id)),
            usecache,
        )
        .await
    }

    /// Standings including matches in progress. These change by the minute,
    /// so callers usually pass `usecache = false` here.
    pub async fn standings_by_tournament_live(
        &self,
        tournament_id: u64,
        usecache: bool,
    ) -> Result<Value, AppError> {
        let id = validate_id("tournament_id", tournament_id)?;
        self.fetch(
            &ApiRequest::new(urls::standings_by_tournament_live_endpoint(id)),
            usecache,
        )
        .await
    }

    pub async fn venues(&self, venue_id: u64, usecache: bool) -> Result<Value, AppError> {
        let id = validate_id("venue_id", venue_id)?;
        self.fetch(&ApiRequest::new(urls::venue_endpoint(id)), usecache)
            .await
    }

    pub async fn venues_by_team(&self, team_id: u64, usecache: bool) -> Result<Value, AppError> {
        let id = validate_id("team_id", team_id)?;
        self.fetch(&ApiRequest::new(urls::venues_by_team_endpoint(id)), usecache)
            .await
    }
}
