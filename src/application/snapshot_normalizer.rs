// Snapshot normalizer - Raw snapshot to per-region views
use crate::domain::dashboard::RegionView;
use crate::domain::power::{PowerTotals, RawSnapshot, percentage, watts_to_megawatts};
use crate::domain::region;

/// Per-region views in input order. A snapshot without usable data yields no views.
pub fn normalize(snapshot: &RawSnapshot) -> Vec<RegionView> {
    let Some(readings) = snapshot.readings() else {
        tracing::debug!(
            "Snapshot has no usable data (result_code={:?})",
            snapshot.result_code
        );
        return Vec::new();
    };

    let totals = PowerTotals::sum(readings);

    let views: Vec<RegionView> = readings
        .iter()
        .map(|reading| RegionView {
            name: region::resolve(&reading.code),
            value: watts_to_megawatts(reading.state_realtime_power),
            active_power: reading.state_realtime_power,
            total_power: reading.state_installed_power,
            active_power_rate: percentage(reading.state_realtime_power, totals.total_active_power),
        })
        .collect();

    tracing::debug!("Normalized {} regions", views.len());
    views
}

/// Totals of a snapshot, zero when it carries no usable data.
pub fn totals(snapshot: &RawSnapshot) -> PowerTotals {
    snapshot.readings().map(PowerTotals::sum).unwrap_or_default()
}
