// UPS device domain model
use super::period::WindowPeriod;
use super::sample::Metric;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    pub id: String,
    pub room: Option<String>,
}

impl Device {
    pub fn new(id: impl Into<String>, room: Option<String>) -> Self {
        Self {
            id: id.into(),
            room,
        }
    }

    pub fn chart_id(&self, metric: Metric) -> String {
        chart_id(&self.id, metric)
    }

    pub fn buttons_id(&self) -> String {
        format!("{}-period-buttons", self.id)
    }

    pub fn container_id(&self) -> String {
        format!("{}-charts-container", self.id)
    }
}

/// Element id of the canvas holding `metric` for `device_id`.
pub fn chart_id(device_id: &str, metric: Metric) -> String {
    format!("{}-{}", metric.element_prefix(), device_id)
}

/// A period selector button inside a device's button group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodButton {
    pub period: WindowPeriod,
    pub disabled: bool,
    pub active: bool,
}

impl PeriodButton {
    /// The button group as the page first renders it: `1d` selected.
    pub fn default_group() -> Vec<PeriodButton> {
        WindowPeriod::ALL
            .iter()
            .map(|&period| PeriodButton {
                period,
                disabled: false,
                active: period == WindowPeriod::default(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_ids() {
        let device = Device::new("apc-3000", Some("Server room".to_string()));
        assert_eq!(device.chart_id(Metric::Voltage), "chart-voltage-apc-3000");
        assert_eq!(device.chart_id(Metric::Charge), "chart-charge-apc-3000");
        assert_eq!(device.buttons_id(), "apc-3000-period-buttons");
        assert_eq!(device.container_id(), "apc-3000-charts-container");
    }

    #[test]
    fn test_default_button_group() {
        let buttons = PeriodButton::default_group();
        assert_eq!(buttons.len(), 3);
        assert!(buttons[0].active);
        assert!(buttons.iter().skip(1).all(|b| !b.active && !b.disabled));
    }
}
