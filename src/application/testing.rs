// Scripted history source for manager and dispatcher tests
use crate::application::errors::{DashboardError, DashboardResult};
use crate::application::history_source::HistorySource;
use crate::domain::period::WindowPeriod;
use crate::domain::sample::Sample;
use crate::infrastructure::render_surface::RenderSurface;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub enum Scripted {
    Samples(Vec<Sample>),
    Status(u16),
}

#[derive(Default)]
pub struct FakeHistorySource {
    responses: HashMap<(String, WindowPeriod), Scripted>,
    calls: Mutex<Vec<(String, WindowPeriod)>>,
    /// Page whose buttons are inspected while a fetch is in flight.
    watched: Option<RenderSurface>,
    buttons_disabled_during_fetch: Mutex<Vec<bool>>,
}

impl FakeHistorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, device: &str, period: WindowPeriod, response: Scripted) -> Self {
        self.responses.insert((device.to_string(), period), response);
        self
    }

    pub fn watching(mut self, surface: RenderSurface) -> Self {
        self.watched = Some(surface);
        self
    }

    pub fn calls(&self) -> Vec<(String, WindowPeriod)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn buttons_disabled_during_fetch(&self) -> Vec<bool> {
        self.buttons_disabled_during_fetch.lock().unwrap().clone()
    }
}

#[async_trait]
impl HistorySource for FakeHistorySource {
    async fn fetch_history(&self, device: &str, period: WindowPeriod) -> DashboardResult<Vec<Sample>> {
        self.calls.lock().unwrap().push((device.to_string(), period));

        if let Some(surface) = &self.watched {
            if let Some(panel) = surface.panel(device) {
                let disabled = panel.buttons.iter().all(|b| b.disabled);
                self.buttons_disabled_during_fetch.lock().unwrap().push(disabled);
            }
        }

        match self.responses.get(&(device.to_string(), period)) {
            Some(Scripted::Samples(samples)) => Ok(samples.clone()),
            Some(Scripted::Status(status)) => Err(DashboardError::HttpStatus {
                status: *status,
                reason: "Scripted".to_string(),
            }),
            None => Ok(Vec::new()),
        }
    }
}
