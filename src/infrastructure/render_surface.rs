// In-memory dashboard page: canvases, period buttons, error panels
use crate::application::chart_backend::{Chart, ChartFactory, DashboardPage, UpdateMode};
use crate::domain::chart::{tooltip_label, ChartConfig};
use crate::domain::device::{Device, PeriodButton};
use crate::domain::period::WindowPeriod;
use crate::domain::sample::{ChartPoint, Metric};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Shared handle to the rendered page; cloning shares the same state.
#[derive(Debug, Clone, Default)]
pub struct RenderSurface {
    inner: Arc<RwLock<SurfaceState>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SurfaceState {
    pub fatal_error: Option<String>,
    pub devices: BTreeMap<String, DevicePanel>,
    pub charts: BTreeMap<String, RenderedChart>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DevicePanel {
    pub room: Option<String>,
    pub container_id: String,
    pub buttons_id: String,
    /// Canvas element ids still mounted in the container.
    pub canvases: Vec<String>,
    pub buttons: Vec<PeriodButton>,
    pub error: Option<String>,
}

/// What the last `update` drew for one chart.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedChart {
    pub id: String,
    pub title: String,
    pub config: ChartConfig,
    pub points: Vec<ChartPoint>,
    /// Local date-time of the newest point, tooltip formatted.
    pub latest_label: Option<String>,
    pub renders: u64,
    pub animated: bool,
}

impl RenderSurface {
    /// Page with one panel per device, as the dashboard template lays it out.
    pub fn new(devices: &[Device]) -> Self {
        let panels = devices
            .iter()
            .map(|device| {
                let panel = DevicePanel {
                    room: device.room.clone(),
                    container_id: device.container_id(),
                    buttons_id: device.buttons_id(),
                    canvases: Metric::ALL.iter().map(|&m| device.chart_id(m)).collect(),
                    buttons: PeriodButton::default_group(),
                    error: None,
                };
                (device.id.clone(), panel)
            })
            .collect();

        Self {
            inner: Arc::new(RwLock::new(SurfaceState {
                fatal_error: None,
                devices: panels,
                charts: BTreeMap::new(),
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SurfaceState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SurfaceState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> SurfaceState {
        self.read().clone()
    }

    pub fn chart(&self, chart_id: &str) -> Option<RenderedChart> {
        self.read().charts.get(chart_id).cloned()
    }

    pub fn panel(&self, device: &str) -> Option<DevicePanel> {
        self.read().devices.get(device).cloned()
    }

    fn has_canvas(&self, chart_id: &str) -> bool {
        self.read()
            .devices
            .values()
            .any(|panel| panel.canvases.iter().any(|c| c == chart_id))
    }

    fn publish(&self, chart: RenderedChart) {
        self.write().charts.insert(chart.id.clone(), chart);
    }

    fn with_panel(&self, device: &str, f: impl FnOnce(&mut DevicePanel)) {
        match self.write().devices.get_mut(device) {
            Some(panel) => f(panel),
            None => debug!("No panel on the page for device {}", device),
        }
    }
}

impl ChartFactory for RenderSurface {
    fn create(
        &self,
        chart_id: &str,
        config: ChartConfig,
        points: Vec<ChartPoint>,
    ) -> Option<Box<dyn Chart>> {
        if !self.has_canvas(chart_id) {
            return None;
        }

        let mut chart = SurfaceChart {
            id: chart_id.to_string(),
            title: config.title.clone(),
            config,
            points,
            renders: 0,
            surface: self.clone(),
        };
        chart.update(UpdateMode::Default);
        Some(Box::new(chart))
    }
}

impl DashboardPage for RenderSurface {
    fn show_chart_error(&self, device: &str, message: &str) {
        let mut state = self.write();
        let Some(panel) = state.devices.get_mut(device) else {
            debug!("No charts container for device {}", device);
            return;
        };
        // The message replaces the container content, canvases included
        let removed = std::mem::take(&mut panel.canvases);
        panel.error = Some(message.to_string());
        for canvas in removed {
            state.charts.remove(&canvas);
        }
    }

    fn show_fatal_error(&self, message: &str) {
        self.write().fatal_error = Some(message.to_string());
    }

    fn set_period_buttons_enabled(&self, device: &str, enabled: bool) {
        self.with_panel(device, |panel| {
            for button in &mut panel.buttons {
                button.disabled = !enabled;
            }
        });
    }

    fn mark_active_period(&self, device: &str, period: WindowPeriod) {
        self.with_panel(device, |panel| {
            for button in &mut panel.buttons {
                button.active = button.period == period;
            }
        });
    }
}

/// Chart drawn onto a [`RenderSurface`]; data lives here, the surface
/// only sees what each `update` renders.
struct SurfaceChart {
    id: String,
    title: String,
    config: ChartConfig,
    points: Vec<ChartPoint>,
    renders: u64,
    surface: RenderSurface,
}

impl Chart for SurfaceChart {
    fn points(&self) -> &[ChartPoint] {
        &self.points
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn replace_data(&mut self, points: Vec<ChartPoint>) {
        self.points = points;
    }

    fn append_and_trim(&mut self, points: &[ChartPoint], cutoff_ms: i64) {
        self.points.extend_from_slice(points);
        self.points.retain(|p| p.x > cutoff_ms);
    }

    fn set_title(&mut self, title: String) {
        self.title = title;
    }

    fn update(&mut self, mode: UpdateMode) {
        self.renders += 1;
        self.surface.publish(RenderedChart {
            id: self.id.clone(),
            title: self.title.clone(),
            config: self.config.clone(),
            points: self.points.clone(),
            latest_label: self.points.iter().map(|p| p.x).max().and_then(tooltip_label),
            renders: self.renders,
            animated: mode == UpdateMode::Default,
        });
    }
}

#[cfg(test)]
impl RenderSurface {
    /// Drop a canvas from the page, as if the template never rendered it.
    pub fn remove_canvas(&self, chart_id: &str) {
        for panel in self.write().devices.values_mut() {
            panel.canvases.retain(|c| c != chart_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::period::Language;

    fn surface() -> RenderSurface {
        RenderSurface::new(&[Device::new("apc", None), Device::new("eaton", Some("Lab".into()))])
    }

    fn voltage_config() -> ChartConfig {
        ChartConfig::for_metric(Metric::Voltage, WindowPeriod::Day, Language::It)
    }

    #[test]
    fn test_create_renders_once() {
        let surface = surface();
        let chart = surface
            .create("chart-voltage-apc", voltage_config(), vec![ChartPoint::new(1, 230.0)])
            .unwrap();

        assert_eq!(chart.title(), "Storico Tensione (24 Ore)");
        let rendered = surface.chart("chart-voltage-apc").unwrap();
        assert_eq!(rendered.renders, 1);
        assert!(rendered.animated);
        assert_eq!(rendered.points.len(), 1);
        assert!(rendered.latest_label.is_some());
    }

    #[test]
    fn test_create_without_canvas() {
        let surface = surface();
        assert!(surface.create("chart-voltage-ghost", voltage_config(), vec![]).is_none());
    }

    #[test]
    fn test_append_and_trim_is_strict() {
        let surface = surface();
        let mut chart = surface
            .create(
                "chart-voltage-apc",
                voltage_config(),
                vec![ChartPoint::new(100, 1.0), ChartPoint::new(200, 2.0)],
            )
            .unwrap();

        chart.append_and_trim(&[ChartPoint::new(300, 3.0)], 100);
        let xs: Vec<i64> = chart.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![200, 300]);

        chart.update(UpdateMode::None);
        let rendered = surface.chart("chart-voltage-apc").unwrap();
        assert_eq!(rendered.renders, 2);
        assert!(!rendered.animated);
    }

    #[test]
    fn test_buttons() {
        let surface = surface();
        surface.set_period_buttons_enabled("apc", false);
        surface.mark_active_period("apc", WindowPeriod::Month);

        let panel = surface.panel("apc").unwrap();
        assert!(panel.buttons.iter().all(|b| b.disabled));
        let active: Vec<WindowPeriod> = panel.buttons.iter().filter(|b| b.active).map(|b| b.period).collect();
        assert_eq!(active, vec![WindowPeriod::Month]);

        // Other devices are untouched
        assert!(surface.panel("eaton").unwrap().buttons.iter().all(|b| !b.disabled));
    }

    #[test]
    fn test_chart_error_replaces_container() {
        let surface = surface();
        surface.show_chart_error("eaton", "Impossibile caricare lo storico.");

        let panel = surface.panel("eaton").unwrap();
        assert_eq!(panel.error.as_deref(), Some("Impossibile caricare lo storico."));
        assert!(panel.canvases.is_empty());
        assert!(surface.create("chart-charge-eaton", voltage_config(), vec![]).is_none());
        assert!(surface.snapshot().fatal_error.is_none());
    }
}
