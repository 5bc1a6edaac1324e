// Domain layer - Samples, periods, devices and chart display rules
pub mod chart;
pub mod device;
pub mod period;
pub mod sample;
