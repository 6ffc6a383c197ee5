//! Scheduled-update descriptors and the display records derived from them.

use serde::Serialize;

/// A user request for a future data refresh.
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub name: String,
    /// Wall-clock target time as `"HH:MM"`.
    pub interval: String,
    pub repeat: bool,
    pub refresh_covid: bool,
    pub refresh_news: bool,
}

/// A scheduled update as tracked by the engine.
///
/// `name` is the composed display label; it doubles as the cancellation key
/// and stays fixed across repeat re-arms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledUpdate {
    pub name: String,
    pub display_interval: String,
    pub repeat: bool,
    pub refresh_covid: bool,
    pub refresh_news: bool,
}

impl ScheduledUpdate {
    /// Build the scheduled form of a request.
    ///
    /// The label appends `" | Repeating"`, `" | Updating Covid Data"`, and
    /// `" | Updating News"` for whichever flags are set, in that fixed order.
    #[must_use]
    pub fn from_request(request: &UpdateRequest) -> Self {
        let mut name = request.name.clone();
        if request.repeat {
            name.push_str(" | Repeating");
        }
        if request.refresh_covid {
            name.push_str(" | Updating Covid Data");
        }
        if request.refresh_news {
            name.push_str(" | Updating News");
        }
        Self {
            name,
            display_interval: request.interval.clone(),
            repeat: request.repeat,
            refresh_covid: request.refresh_covid,
            refresh_news: request.refresh_news,
        }
    }
}

/// Display record for one scheduled update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateEntry {
    pub title: String,
    pub content: String,
}

/// Display record for one headline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsItem {
    pub title: String,
    pub content: String,
}
