// Chart state manager - Loads, reloads and live-updates per-device charts
use crate::application::chart_backend::{Chart, ChartFactory, DashboardPage, UpdateMode};
use crate::application::errors::{DashboardError, DashboardResult};
use crate::application::history_source::HistorySource;
use crate::domain::chart::{chart_title, no_data_title, ChartConfig};
use crate::domain::device::chart_id;
use crate::domain::period::{Language, WindowPeriod};
use crate::domain::sample::{transform, ChartPoint, Metric, Sample};
use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Rendered,
    NoData,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    Updated { points: usize },
    NoData,
    Failed,
    /// The device's charts were never created.
    Skipped,
}

/// Owns every chart on the page and the period each device is showing.
pub struct ChartManager {
    source: Arc<dyn HistorySource>,
    factory: Arc<dyn ChartFactory>,
    page: Arc<dyn DashboardPage>,
    language: Language,
    charts: HashMap<String, Box<dyn Chart>>,
    periods: HashMap<String, WindowPeriod>,
}

/// Re-enables a device's period buttons when dropped.
struct ControlsGuard {
    page: Arc<dyn DashboardPage>,
    device: String,
}

impl Drop for ControlsGuard {
    fn drop(&mut self) {
        self.page.set_period_buttons_enabled(&self.device, true);
    }
}

impl ChartManager {
    pub fn new(
        source: Arc<dyn HistorySource>,
        factory: Arc<dyn ChartFactory>,
        page: Arc<dyn DashboardPage>,
        language: Language,
    ) -> Self {
        Self {
            source,
            factory,
            page,
            language,
            charts: HashMap::new(),
            periods: HashMap::new(),
        }
    }

    pub fn active_period(&self, device: &str) -> WindowPeriod {
        self.periods.get(device).copied().unwrap_or_default()
    }

    pub fn chart(&self, chart_id: &str) -> Option<&dyn Chart> {
        self.charts.get(chart_id).map(|c| c.as_ref())
    }

    /// Load the default window for every device.
    ///
    /// Fetches run concurrently and are applied in completion order; one
    /// device failing leaves the others alone.
    pub async fn initialize(&mut self, devices: &[String]) -> DashboardResult<HashMap<String, LoadOutcome>> {
        if devices.is_empty() {
            error!("No UPS devices configured, chart initialization aborted");
            self.page.show_fatal_error(&self.no_devices_message());
            return Err(DashboardError::NoDevices);
        }

        for device in devices {
            self.periods.insert(device.clone(), WindowPeriod::Day);
        }

        let source = self.source.clone();
        let mut loads: FuturesUnordered<_> = devices
            .iter()
            .map(|device| {
                let source = source.clone();
                async move {
                    let result = source.fetch_history(device, WindowPeriod::Day).await;
                    (device, result)
                }
            })
            .collect();

        let mut outcomes = HashMap::with_capacity(devices.len());
        while let Some((device, result)) = loads.next().await {
            let outcome = self.apply_initial(device, result);
            outcomes.insert(device.clone(), outcome);
        }

        info!("Initialized charts for {} devices", devices.len());
        Ok(outcomes)
    }

    pub async fn load_initial(&mut self, device: &str) -> LoadOutcome {
        let result = self.source.fetch_history(device, WindowPeriod::Day).await;
        self.apply_initial(device, result)
    }

    fn apply_initial(&mut self, device: &str, result: DashboardResult<Vec<Sample>>) -> LoadOutcome {
        let samples = match result {
            Ok(samples) => samples,
            Err(e) => {
                error!("Failed to load chart history for {}: {}", device, e);
                self.page.show_chart_error(device, &self.load_error_message(&e));
                return LoadOutcome::Failed;
            }
        };

        if samples.is_empty() {
            info!("No history found for {}", device);
            return LoadOutcome::NoData;
        }

        for metric in Metric::ALL {
            let id = chart_id(device, metric);
            let config = ChartConfig::for_metric(metric, WindowPeriod::Day, self.language);
            let points = transform(&samples, metric).collect();

            match self.factory.create(&id, config, points) {
                Some(chart) => {
                    self.charts.insert(id, chart);
                }
                None => warn!("Canvas {} not found, chart not created", id),
            }
        }

        debug!("Rendered {} samples for {}", samples.len(), device);
        LoadOutcome::Rendered
    }

    /// Reload both charts of `device` for `period`.
    ///
    /// The period buttons stay disabled while the fetch is in flight and are
    /// re-enabled on every exit path. On failure the charts keep their data.
    pub async fn switch_period(&mut self, device: &str, period: WindowPeriod) -> SwitchOutcome {
        let ids = Metric::ALL.map(|m| chart_id(device, m));
        if ids.iter().any(|id| !self.charts.contains_key(id)) {
            error!("Charts not found for {}, cannot switch to {}", device, period);
            return SwitchOutcome::Skipped;
        }

        self.page.set_period_buttons_enabled(device, false);
        let _controls = ControlsGuard {
            page: self.page.clone(),
            device: device.to_string(),
        };
        self.page.mark_active_period(device, period);
        self.periods.insert(device.to_string(), period);

        let samples = match self.source.fetch_history(device, period).await {
            Ok(samples) => samples,
            Err(e) => {
                error!("Failed to fetch {} history for {}: {}", period, device, e);
                return SwitchOutcome::Failed;
            }
        };

        if samples.is_empty() {
            info!("No history found for {} in period {}", device, period);
        }

        for metric in Metric::ALL {
            let Some(chart) = self.charts.get_mut(&chart_id(device, metric)) else {
                continue;
            };
            let title = if samples.is_empty() {
                no_data_title(metric, period, self.language)
            } else {
                chart_title(metric, period, self.language)
            };
            chart.replace_data(transform(&samples, metric).collect());
            chart.set_title(title);
            chart.update(UpdateMode::Default);
        }

        if samples.is_empty() {
            SwitchOutcome::NoData
        } else {
            SwitchOutcome::Updated {
                points: samples.len(),
            }
        }
    }

    pub fn append_live_point(&mut self, device: &str, sample: &Sample) -> usize {
        let now_ms = chrono::Utc::now().timestamp_millis();
        self.append_live_point_at(device, sample, now_ms)
    }

    /// Append `sample` to the device's charts and evict points that fell out
    /// of the active window. Returns how many charts took the point.
    pub fn append_live_point_at(&mut self, device: &str, sample: &Sample, now_ms: i64) -> usize {
        if sample.timestamp_ms().is_none() {
            warn!("Live sample for {} has out-of-range timestamp {}, skipped", device, sample.timestamp);
            return 0;
        }
        let cutoff = self.active_period(device).cutoff_ms(now_ms);
        let mut appended = 0;

        for metric in Metric::ALL {
            if !metric.is_reported(sample) {
                continue;
            }
            let Some(point) = ChartPoint::from_sample(sample, metric) else {
                continue;
            };
            let Some(chart) = self.charts.get_mut(&chart_id(device, metric)) else {
                continue;
            };
            chart.append_and_trim(&[point], cutoff);
            chart.update(UpdateMode::None);
            appended += 1;
        }

        appended
    }

    /// Apply one live feed message: the latest sample per device.
    pub fn apply_live_update(&mut self, update: &HashMap<String, Sample>) -> usize {
        let now_ms = chrono::Utc::now().timestamp_millis();
        update
            .iter()
            .map(|(device, sample)| self.append_live_point_at(device, sample, now_ms))
            .sum()
    }

    fn load_error_message(&self, err: &DashboardError) -> String {
        match self.language {
            Language::It => format!("Impossibile caricare lo storico. {}", err),
            Language::En => format!("Unable to load history. {}", err),
        }
    }

    fn no_devices_message(&self) -> String {
        match self.language {
            Language::It => "Errore di Dati: impossibile caricare i dati degli UPS, nessun dispositivo configurato.".to_string(),
            Language::En => "Data error: unable to load UPS data, no devices configured.".to_string(),
        }
    }
}
