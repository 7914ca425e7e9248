// History normalizer - Stored snapshots to chart series
use crate::domain::dashboard::HistorySeries;
use crate::domain::power::{PowerTotals, TimestampedRecord, watts_to_megawatts};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

const LABEL_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Chronological series of aggregate active power (MW) with display labels.
///
/// Records are sorted by timestamp (stable for equal timestamps). Records with
/// an unusable snapshot or an unparseable timestamp are skipped.
pub fn normalize_history(records: &[TimestampedRecord], display_offset: FixedOffset) -> HistorySeries {
    let mut series = HistorySeries::default();
    if records.is_empty() {
        return series;
    }

    let mut dated: Vec<(DateTime<Utc>, &TimestampedRecord)> = records
        .iter()
        .filter_map(|record| match parse_timestamp(&record.timestamp) {
            Some(time) => Some((time, record)),
            None => {
                tracing::warn!("Skipping history record with bad timestamp: {}", record.timestamp);
                None
            }
        })
        .collect();
    dated.sort_by_key(|(time, _)| *time);

    for (time, record) in dated {
        let Some(readings) = record.data.readings() else {
            tracing::debug!("Skipping history record at {} without usable data", record.timestamp);
            continue;
        };

        let total = PowerTotals::sum(readings).total_active_power;
        series.push(
            format_label(time, display_offset),
            format!("{:.2}", watts_to_megawatts(total)),
        );
    }

    tracing::debug!(
        "Normalized history: {} of {} records usable",
        series.len(),
        records.len()
    );
    series
}

/// Parse RFC 3339 timestamps, or naive ISO-8601 ones as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Some(time.with_timezone(&Utc));
    }
    value
        .parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

fn format_label(time: DateTime<Utc>, offset: FixedOffset) -> String {
    time.with_timezone(&offset).format(LABEL_FORMAT).to_string()
}
