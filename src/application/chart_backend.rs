// Seams between the chart manager and whatever draws the page
use crate::domain::chart::ChartConfig;
use crate::domain::period::WindowPeriod;
use crate::domain::sample::ChartPoint;

/// How a chart redraws after its data changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Full redraw with transition animation.
    Default,
    /// Lightweight redraw, no animation (live updates).
    None,
}

/// A single-dataset time-series chart.
pub trait Chart: Send + Sync {
    fn points(&self) -> &[ChartPoint];

    fn title(&self) -> &str;

    fn replace_data(&mut self, points: Vec<ChartPoint>);

    /// Append `points`, then keep only points newer than `cutoff_ms`.
    fn append_and_trim(&mut self, points: &[ChartPoint], cutoff_ms: i64);

    fn set_title(&mut self, title: String);

    fn update(&mut self, mode: UpdateMode);
}

pub trait ChartFactory: Send + Sync {
    /// Build a chart on canvas `chart_id`; `None` when the canvas is not on the page.
    fn create(
        &self,
        chart_id: &str,
        config: ChartConfig,
        points: Vec<ChartPoint>,
    ) -> Option<Box<dyn Chart>>;
}

/// Non-chart parts of the dashboard page.
pub trait DashboardPage: Send + Sync {
    /// Replace a device's chart container content with an error message.
    fn show_chart_error(&self, device: &str, message: &str);

    /// Top-level error panel shown when nothing can be initialised.
    fn show_fatal_error(&self, message: &str);

    fn set_period_buttons_enabled(&self, device: &str, enabled: bool);

    /// Highlight the button for `period`, reset the others.
    fn mark_active_period(&self, device: &str, period: WindowPeriod);
}
