//! Request descriptions: an endpoint path plus its query parameters.

use serde_json::Value;
use std::collections::BTreeMap;

use super::validation::{validate_date, validate_date_range, validate_positive};
use crate::data_fetcher::cache::fingerprint;
use crate::error::AppError;

/// A GET request against the remote service, relative to the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub endpoint: String,
    pub params: BTreeMap<String, Value>,
}

impl ApiRequest {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Cache key for this request
    pub fn fingerprint(&self) -> String {
        fingerprint(&self.endpoint, &self.params)
    }

    /// Parameters as `(name, value)` pairs for the query string. Strings are
    /// sent bare, every other JSON value in its textual form.
    pub fn query_pairs(&self) -> Vec<(&str, String)> {
        self.params
            .iter()
            .map(|(key, value)| {
                let rendered = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.as_str(), rendered)
            })
            .collect()
    }
}

/// Parameters of an events-by-date lookup.
///
/// `end_date` defaults to `start_date`, so a bare query covers one day.
/// `page` and `page_size` are left out of the request when unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventsQuery {
    pub start_date: String,
    pub end_date: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl EventsQuery {
    pub fn new(start_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: None,
            page: None,
            page_size: None,
        }
    }

    pub fn end_date(mut self, end_date: impl Into<String>) -> Self {
        self.end_date = Some(end_date.into());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Validates the query and turns it into a request for `events`.
    pub fn to_request(&self) -> Result<ApiRequest, AppError> {
        let start = validate_date("start_date", &self.start_date)?;
        let end = match &self.end_date {
            Some(end_date) => validate_date("end_date", end_date)?,
            None => start,
        };
        validate_date_range(start, end)?;

        let mut request = ApiRequest::new("events")
            .with_param("start_date", start.to_string())
            .with_param("end_date", end.to_string());

        if let Some(page) = self.page {
            request = request.with_param("page", validate_positive("page", page)?);
        }
        if let Some(page_size) = self.page_size {
            request = request.with_param("page_size", validate_positive("page_size", page_size)?);
        }

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_day_query_repeats_start_date() {
        let request = EventsQuery::new("2025-01-24").to_request().unwrap();
        assert_eq!(request.endpoint, "events");
        assert_eq!(request.params.get("start_date"), Some(&json!("2025-01-24")));
        assert_eq!(request.params.get("end_date"), Some(&json!("2025-01-24")));
        assert!(!request.params.contains_key("page"));
        assert!(!request.params.contains_key("page_size"));
    }

    #[test]
    fn test_paged_range_query() {
        let request = EventsQuery::new("2025-01-24")
            .end_date("2025-01-31")
            .page(2)
            .page_size(25)
            .to_request()
            .unwrap();

        assert_eq!(
            request.query_pairs(),
            vec![
                ("end_date", "2025-01-31".to_string()),
                ("page", "2".to_string()),
                ("page_size", "25".to_string()),
                ("start_date", "2025-01-24".to_string()),
            ]
        );
    }

    #[test]
    fn test_fingerprint_of_single_day_query() {
        let request = EventsQuery::new("2025-01-24").to_request().unwrap();
        assert_eq!(
            request.fingerprint(),
            r#"vsports:events:{"end_date": "2025-01-24", "start_date": "2025-01-24"}"#
        );
    }

    #[test]
    fn test_invalid_queries_are_rejected() {
        assert!(EventsQuery::new("24/01/2025").to_request().is_err());
        assert!(
            EventsQuery::new("2025-01-24")
                .end_date("2025-01-20")
                .to_request()
                .is_err()
        );
        assert!(EventsQuery::new("2025-01-24").page(0).to_request().is_err());
        assert!(
            EventsQuery::new("2025-01-24")
                .page_size(0)
                .to_request()
                .is_err()
        );
    }

    #[test]
    fn test_request_without_params() {
        let request = ApiRequest::new("teams/by/tournament/118");
        assert!(request.query_pairs().is_empty());
        assert_eq!(request.fingerprint(), "vsports:teams/by/tournament/118:null");
    }
}
