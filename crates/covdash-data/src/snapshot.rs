//! Derivation of the dashboard's headline covid figures.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::types::{CaseRecord, NationalRecord};

/// Days before `today` covered by the trailing 7-day case window. Specimen
/// figures for the most recent days are still incomplete when published, so
/// the window starts 4 days back.
const CASE_WINDOW_OFFSETS: std::ops::RangeInclusive<u64> = 4..=10;

/// Hospital occupancy is read at a 2-day lag.
const HOSPITAL_LAG_DAYS: u64 = 2;

/// Death registrations settle slowly; the cumulative figure is read at a
/// 14-day lag.
const DEATHS_LAG_DAYS: u64 = 14;

/// The four figures shown on the dashboard.
///
/// A snapshot is rebuilt from scratch on every covid refresh — nothing is
/// carried over from the previous one. `hospital_cases` and
/// `cumulative_deaths` stay unset when the source series has no figure for
/// the lagged date; rendering must handle "no value yet".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CovidSnapshot {
    pub local_seven_day_cases: i64,
    pub national_seven_day_cases: i64,
    pub hospital_cases: Option<i64>,
    pub cumulative_deaths: Option<i64>,
}

/// Compute a fresh [`CovidSnapshot`] from the local and national series.
///
/// Both series are scanned in full for each date of interest — the upstream
/// API makes no ordering promise. Dates entirely absent from a series
/// contribute 0 to the case sums, as do present-but-null figures. When the
/// same date appears more than once, the last occurrence wins for the point
/// lookups.
#[must_use]
pub fn build_snapshot(
    local: &[CaseRecord],
    national: &[NationalRecord],
    today: NaiveDate,
) -> CovidSnapshot {
    let mut snapshot = CovidSnapshot::default();

    for offset in CASE_WINDOW_OFFSETS {
        let day = today - Days::new(offset);
        snapshot.local_seven_day_cases += local
            .iter()
            .filter(|record| record.date == day)
            .filter_map(|record| record.new_cases)
            .sum::<i64>();
        snapshot.national_seven_day_cases += national
            .iter()
            .filter(|record| record.date == day)
            .filter_map(|record| record.new_cases)
            .sum::<i64>();
    }

    let hospital_day = today - Days::new(HOSPITAL_LAG_DAYS);
    let deaths_day = today - Days::new(DEATHS_LAG_DAYS);
    for record in national {
        if record.date == hospital_day {
            snapshot.hospital_cases = record.hospital_cases;
        }
        if record.date == deaths_day {
            snapshot.cumulative_deaths = record.cumulative_deaths;
        }
    }

    snapshot
}
