// Source of historical samples for the charts
use crate::application::errors::DashboardResult;
use crate::domain::period::WindowPeriod;
use crate::domain::sample::Sample;
use async_trait::async_trait;

#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Samples for `device` within `period`, oldest first.
    async fn fetch_history(&self, device: &str, period: WindowPeriod) -> DashboardResult<Vec<Sample>>;
}
