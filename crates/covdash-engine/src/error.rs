use covdash_core::ClockError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid update interval: {0}")]
    InvalidInterval(#[from] ClockError),

    #[error("an update named {0:?} is already scheduled")]
    DuplicateName(String),

    #[error("update requested neither covid data nor news")]
    NothingRequested,
}
