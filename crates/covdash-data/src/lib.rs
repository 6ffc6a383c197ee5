//! External data sources for the dashboard.
//!
//! Typed reqwest clients for the UK coronavirus dashboard API and the
//! NewsAPI top-headlines endpoint, plus the pure computation that turns the
//! covid series into the four figures the dashboard displays.

use reqwest::Url;

pub mod covid;
pub mod error;
pub mod news;
pub mod snapshot;
pub mod types;

pub use covid::CovidClient;
pub use error::DataError;
pub use news::NewsClient;
pub use snapshot::{build_snapshot, CovidSnapshot};
pub use types::{Article, CaseRecord, NationalRecord};

/// Normalise a base URL so it ends with exactly one slash; relative joins
/// then resolve against the root rather than replacing a path segment.
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, DataError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| DataError::BaseUrl {
        url: base_url.to_owned(),
        reason: e.to_string(),
    })
}
