//! The scheduled-update engine for covdash.
//!
//! Accepts user-issued update requests (one-shot or repeating; covid-only,
//! news-only, or both), converts wall-clock `HH:MM` times into delays, and
//! executes due refreshes when the serving path polls. All mutable dashboard
//! state — task queue, update registry, news display list, seen titles,
//! covid snapshot — is owned by [`UpdateService`]; nothing runs in the
//! background.

pub mod error;
pub mod queue;
pub mod registry;
pub mod service;
pub mod updates;

pub use error::ScheduleError;
pub use queue::{TaskId, TaskQueue};
pub use registry::UpdateRegistry;
pub use service::{DashboardData, UpdateService};
pub use updates::{NewsItem, ScheduledUpdate, UpdateEntry, UpdateRequest};
