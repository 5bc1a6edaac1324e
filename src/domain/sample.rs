// UPS sample and chart point domain models
use serde::{Deserialize, Serialize};

/// One reading from the history endpoint or the live feed.
///
/// Live payloads may omit a metric; a missing value decodes as `0.0`,
/// which the charts treat as "not reported".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    #[serde(default)]
    pub input_voltage: f64,
    #[serde(default)]
    pub battery_charge: f64,
}

impl Sample {
    pub fn new(timestamp: i64, input_voltage: f64, battery_charge: f64) -> Self {
        Self {
            timestamp,
            input_voltage,
            battery_charge,
        }
    }

    /// `None` when the timestamp is too far out to fit in milliseconds.
    pub fn timestamp_ms(&self) -> Option<i64> {
        self.timestamp.checked_mul(1000)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Voltage,
    Charge,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Voltage, Metric::Charge];

    pub fn value(self, sample: &Sample) -> f64 {
        match self {
            Metric::Voltage => sample.input_voltage,
            Metric::Charge => sample.battery_charge,
        }
    }

    /// Zero, negative and NaN readings count as absent.
    pub fn is_reported(self, sample: &Sample) -> bool {
        self.value(sample) > 0.0
    }

    /// Prefix of the canvas element id for this metric.
    pub fn element_prefix(self) -> &'static str {
        match self {
            Metric::Voltage => "chart-voltage",
            Metric::Charge => "chart-charge",
        }
    }
}

/// A point on a time-scale chart: `x` in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: i64,
    pub y: f64,
}

impl ChartPoint {
    pub fn new(x: i64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_sample(sample: &Sample, metric: Metric) -> Option<Self> {
        sample
            .timestamp_ms()
            .map(|x| Self::new(x, metric.value(sample)))
    }
}

/// Map samples to chart points for one metric, keeping input order.
/// Samples whose timestamp overflows in milliseconds are dropped.
pub fn transform(samples: &[Sample], metric: Metric) -> impl Iterator<Item = ChartPoint> + '_ {
    samples.iter().filter_map(move |s| ChartPoint::from_sample(s, metric))
}
