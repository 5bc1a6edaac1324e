// Chart display configuration
use super::period::{Language, WindowPeriod};
use super::sample::Metric;
use chrono::{Local, TimeZone};
use serde::Serialize;

/// Tooltip format for the time axis (`dd/MM/yyyy HH:mm`).
const TOOLTIP_FORMAT: &str = "%d/%m/%Y %H:%M";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    pub metric: Metric,
    pub title: String,
    pub dataset_label: String,
    pub border_color: String,
    pub background_color: String,
    pub tension: f64,
    pub fill: bool,
    pub point_radius: f64,
    pub x_axis: TimeAxis,
    pub y_axis: ValueAxis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueAxis {
    pub title: String,
    pub begin_at_zero: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Continuous time scale; the unit is picked by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeAxis {
    pub title: String,
    pub tooltip_format: String,
    pub hour_format: String,
    pub day_format: String,
    pub week_format: String,
    pub month_format: String,
}

impl Default for TimeAxis {
    fn default() -> Self {
        Self {
            title: "Tempo".to_string(),
            tooltip_format: "dd/MM/yyyy HH:mm".to_string(),
            hour_format: "HH:mm".to_string(),
            day_format: "dd/MM".to_string(),
            week_format: "dd/MM/yy".to_string(),
            month_format: "MMM yyyy".to_string(),
        }
    }
}

impl ChartConfig {
    /// Display configuration for `metric` titled for `period`.
    pub fn for_metric(metric: Metric, period: WindowPeriod, language: Language) -> Self {
        let title = chart_title(metric, period, language);
        match metric {
            Metric::Voltage => Self {
                metric,
                title,
                dataset_label: "Tensione Ingresso (V)".to_string(),
                border_color: "rgb(75, 192, 192)".to_string(),
                background_color: "rgba(75, 192, 192, 0.2)".to_string(),
                tension: 0.1,
                fill: true,
                point_radius: 0.0,
                x_axis: TimeAxis::default(),
                y_axis: ValueAxis {
                    title: "Tensione (V)".to_string(),
                    begin_at_zero: false,
                    min: None,
                    max: None,
                },
            },
            Metric::Charge => Self {
                metric,
                title,
                dataset_label: "Carica Batteria (%)".to_string(),
                border_color: "rgb(54, 162, 235)".to_string(),
                background_color: "rgba(54, 162, 235, 0.2)".to_string(),
                tension: 0.1,
                fill: true,
                point_radius: 0.0,
                x_axis: TimeAxis::default(),
                y_axis: ValueAxis {
                    title: "Carica (%)".to_string(),
                    begin_at_zero: true,
                    min: Some(0.0),
                    max: Some(100.0),
                },
            },
        }
    }
}

pub fn chart_title(metric: Metric, period: WindowPeriod, language: Language) -> String {
    let label = period.label(language);
    match (metric, language) {
        (Metric::Voltage, Language::It) => format!("Storico Tensione ({})", label),
        (Metric::Charge, Language::It) => format!("Storico Batteria ({})", label),
        (Metric::Voltage, Language::En) => format!("Voltage History ({})", label),
        (Metric::Charge, Language::En) => format!("Battery History ({})", label),
    }
}

/// Title shown when the backend returned no samples for `period`.
pub fn no_data_title(metric: Metric, period: WindowPeriod, language: Language) -> String {
    let suffix = match language {
        Language::It => "Dati non disponibili",
        Language::En => "No data available",
    };
    format!("{} - {}", chart_title(metric, period, language), suffix)
}

/// Full local date-time for a point's tooltip.
pub fn tooltip_label(x_ms: i64) -> Option<String> {
    Local
        .timestamp_millis_opt(x_ms)
        .single()
        .map(|t| t.format(TOOLTIP_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles() {
        assert_eq!(
            chart_title(Metric::Voltage, WindowPeriod::Day, Language::It),
            "Storico Tensione (24 Ore)"
        );
        assert_eq!(
            no_data_title(Metric::Charge, WindowPeriod::Week, Language::It),
            "Storico Batteria (1 Settimana) - Dati non disponibili"
        );
        assert_eq!(
            no_data_title(Metric::Voltage, WindowPeriod::Week, Language::En),
            "Voltage History (1 Week) - No data available"
        );
    }

    #[test]
    fn test_axis_rules() {
        let charge = ChartConfig::for_metric(Metric::Charge, WindowPeriod::Day, Language::It);
        assert!(charge.y_axis.begin_at_zero);
        assert_eq!(charge.y_axis.max, Some(100.0));

        let voltage = ChartConfig::for_metric(Metric::Voltage, WindowPeriod::Day, Language::It);
        assert!(!voltage.y_axis.begin_at_zero);
        assert_eq!(voltage.y_axis.max, None);
        assert_eq!(voltage.x_axis.tooltip_format, "dd/MM/yyyy HH:mm");
    }

    #[test]
    fn test_tooltip_label_shape() {
        let label = tooltip_label(1_700_000_000_000).unwrap();
        // dd/mm/yyyy hh:mm
        assert_eq!(label.len(), 16);
        assert_eq!(&label[2..3], "/");
        assert_eq!(&label[13..14], ":");
    }
}
