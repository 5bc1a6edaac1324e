// Errors surfaced by the chart pipeline
use crate::infrastructure::retry::FetchError;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("HTTP error {status} {reason}")]
    HttpStatus { status: u16, reason: String },

    #[error("failed to decode history response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("no UPS devices configured")]
    NoDevices,

    #[error("chart dispatcher is not running")]
    DispatcherClosed,

    #[error("chart dispatcher queue is full")]
    DispatcherBusy,
}

pub type DashboardResult<T> = Result<T, DashboardError>;
