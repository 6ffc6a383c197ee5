//! HTTP client for the UK coronavirus dashboard API.
//!
//! Wraps `reqwest` with the two `/v1/data` queries the dashboard needs:
//! a local-area new-cases series and the national series carrying the
//! hospital and cumulative-death figures.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::DataError;
use crate::parse_base_url;
use crate::types::{CaseRecord, NationalRecord};

const DEFAULT_BASE_URL: &str = "https://api.coronavirus.data.gov.uk/";

const CASES_STRUCTURE: &str = r#"{"date":"date","newCasesBySpecimenDate":"newCasesBySpecimenDate"}"#;
const NATIONAL_STRUCTURE: &str = r#"{"date":"date","newCasesBySpecimenDate":"newCasesBySpecimenDate","cumDailyNsoDeathsByDeathDate":"cumDailyNsoDeathsByDeathDate","hospitalCases":"hospitalCases"}"#;

/// Client for the UK coronavirus dashboard API.
///
/// Use [`CovidClient::new`] for production or [`CovidClient::with_base_url`]
/// to point at a mock server in tests.
pub struct CovidClient {
    client: Client,
    base_url: Url,
}

impl CovidClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, DataError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`DataError::BaseUrl`] if `base_url` is not a valid
    /// URL.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, DataError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        let base_url = parse_base_url(base_url)?;
        Ok(Self { client, base_url })
    }

    /// Daily new-case series for one lower-tier local authority area.
    ///
    /// # Errors
    ///
    /// - [`DataError::Http`] on network failure or non-2xx HTTP status.
    /// - [`DataError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn area_cases(&self, area: &str) -> Result<Vec<CaseRecord>, DataError> {
        tracing::debug!(area, "requesting local case series");
        let url = self.data_url(&format!("areaType=ltla;areaName={area}"), CASES_STRUCTURE);
        let body: SeriesResponse<CaseRecord> = self.request_json(url, "area_cases").await?;
        Ok(body.data)
    }

    /// Daily national series of new cases, cumulative deaths, and hospital
    /// cases.
    ///
    /// # Errors
    ///
    /// - [`DataError::Http`] on network failure or non-2xx HTTP status.
    /// - [`DataError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn national_series(&self, nation: &str) -> Result<Vec<NationalRecord>, DataError> {
        tracing::debug!(nation, "requesting national series");
        let url = self.data_url(
            &format!("areaType=overview;areaName={nation}"),
            NATIONAL_STRUCTURE,
        );
        let body: SeriesResponse<NationalRecord> =
            self.request_json(url, "national_series").await?;
        Ok(body.data)
    }

    fn data_url(&self, filters: &str, structure: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path("v1/data");
        url.query_pairs_mut()
            .append_pair("filters", filters)
            .append_pair("structure", structure);
        url
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, DataError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| DataError::Deserialize {
            context: context.to_owned(),
            source,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct SeriesResponse<T> {
    #[serde(default)]
    data: Vec<T>,
}
