// Dashboard view models
use super::power::PowerTotals;
use super::units::format_power;
use serde::Serialize;

/// Per-region view used by the map and the region table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionView {
    pub name: String,
    /// Active power in MW, drives the map colouring.
    pub value: f64,
    pub active_power: f64,
    pub total_power: f64,
    pub active_power_rate: f64,
}

/// Index-aligned labels and values for the history chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySeries {
    pub timestamps: Vec<String>,
    pub active_power: Vec<String>,
}

impl HistorySeries {
    pub fn push(&mut self, timestamp: String, active_power: String) {
        self.timestamps.push(timestamp);
        self.active_power.push(active_power);
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSummary {
    pub total_active_power: f64,
    pub total_installed_power: f64,
    pub formatted_active_power: String,
    pub formatted_installed_power: String,
    pub utilization: f64,
}

impl From<PowerTotals> for GridSummary {
    fn from(totals: PowerTotals) -> Self {
        Self {
            total_active_power: totals.total_active_power,
            total_installed_power: totals.total_installed_power,
            formatted_active_power: format_power(totals.total_active_power),
            formatted_installed_power: format_power(totals.total_installed_power),
            utilization: totals.utilization(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionsDashboard {
    pub regions: Vec<RegionView>,
    pub totals: GridSummary,
}

impl RegionsDashboard {
    pub fn new(regions: Vec<RegionView>, totals: PowerTotals) -> Self {
        Self {
            regions,
            totals: totals.into(),
        }
    }
}
