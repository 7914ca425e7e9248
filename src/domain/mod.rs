// Domain layer - Power telemetry models and pure rules
pub mod chart;
pub mod dashboard;
pub mod power;
pub mod region;
pub mod units;
