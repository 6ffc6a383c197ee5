use chrono::NaiveDate;
use serde::Deserialize;

/// One day of a local-area new-cases series.
///
/// The upstream API reports `null` for days that have no figure yet, so the
/// value is optional. Series may arrive descending or unordered; consumers
/// scan by date rather than assuming any order.
#[derive(Debug, Clone, Deserialize)]
pub struct CaseRecord {
    pub date: NaiveDate,
    #[serde(rename = "newCasesBySpecimenDate")]
    pub new_cases: Option<i64>,
}

/// One day of the national series: new cases plus the hospital and
/// cumulative-death figures that the dashboard reads at fixed lags.
#[derive(Debug, Clone, Deserialize)]
pub struct NationalRecord {
    pub date: NaiveDate,
    #[serde(rename = "newCasesBySpecimenDate")]
    pub new_cases: Option<i64>,
    #[serde(rename = "cumDailyNsoDeathsByDeathDate")]
    pub cumulative_deaths: Option<i64>,
    #[serde(rename = "hospitalCases")]
    pub hospital_cases: Option<i64>,
}

/// A headline returned by the news API. The title is guaranteed non-empty;
/// articles without a usable title are dropped at the client boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub description: Option<String>,
}
