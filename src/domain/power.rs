// Power telemetry domain models
use serde::{Deserialize, Deserializer, Serialize};

/// Result code the backend uses for a successful snapshot.
pub const RESULT_CODE_OK: &str = "1";

const WATTS_PER_MEGAWATT: f64 = 1_000_000.0;

/// One reading per federative unit, in watts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionReading {
    pub code: String,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub state_realtime_power: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub state_installed_power: f64,
}

/// Upstream sends `null` for regions that have not reported yet.
fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
impl RegionReading {
    pub fn new(code: impl Into<String>, realtime_power: f64, installed_power: f64) -> Self {
        Self {
            code: code.into(),
            state_realtime_power: realtime_power,
            state_installed_power: installed_power,
        }
    }
}

/// Point-in-time reading across all regions as returned by the upstream API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSnapshot {
    #[serde(default)]
    pub result_code: Option<String>,
    #[serde(default)]
    pub result_msg: Option<String>,
    #[serde(default)]
    pub result_data: Option<Vec<RegionReading>>,
}

impl RawSnapshot {
    #[cfg(test)]
    pub fn ok(readings: Vec<RegionReading>) -> Self {
        Self {
            result_code: Some(RESULT_CODE_OK.to_string()),
            result_msg: None,
            result_data: Some(readings),
        }
    }

    /// Snapshot that carries no usable data.
    #[cfg(test)]
    pub fn empty(result_code: impl Into<String>) -> Self {
        Self {
            result_code: Some(result_code.into()),
            result_msg: None,
            result_data: None,
        }
    }

    /// Readings of a successful snapshot, `None` for anything else.
    pub fn readings(&self) -> Option<&[RegionReading]> {
        match (&self.result_code, &self.result_data) {
            (Some(code), Some(data)) if code == RESULT_CODE_OK => Some(data.as_slice()),
            _ => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.readings().is_some()
    }
}

/// Snapshot tagged with the time the backend stored it.
#[derive(Debug, Clone, PartialEq)]
pub struct TimestampedRecord {
    pub timestamp: String,
    pub data: RawSnapshot,
}

impl TimestampedRecord {
    pub fn new(timestamp: impl Into<String>, data: RawSnapshot) -> Self {
        Self {
            timestamp: timestamp.into(),
            data,
        }
    }
}

/// Grid-wide totals in watts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerTotals {
    pub total_active_power: f64,
    pub total_installed_power: f64,
}

impl PowerTotals {
    /// Sum over all readings. An empty slice yields zero totals.
    pub fn sum(readings: &[RegionReading]) -> Self {
        readings.iter().fold(Self::default(), |acc, r| Self {
            total_active_power: acc.total_active_power + r.state_realtime_power,
            total_installed_power: acc.total_installed_power + r.state_installed_power,
        })
    }

    /// Share of installed capacity currently generating, in percent.
    pub fn utilization(&self) -> f64 {
        percentage(self.total_active_power, self.total_installed_power)
    }
}

pub fn watts_to_megawatts(watts: f64) -> f64 {
    watts / WATTS_PER_MEGAWATT
}

/// `part / whole * 100`, defined as 0 when `whole` is zero.
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    let rate = part / whole * 100.0;
    if rate.is_finite() { rate } else { 0.0 }
}
