// Dashboard service - Use cases behind the dashboard endpoints
use crate::application::chart_builder;
use crate::application::history_normalizer::normalize_history;
use crate::application::power_data_source::{PowerDataSource, TransportError};
use crate::application::snapshot_normalizer;
use crate::domain::chart::ChartOption;
use crate::domain::dashboard::RegionsDashboard;
use crate::domain::power::RawSnapshot;
use chrono::FixedOffset;
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn PowerDataSource>,
    display_offset: FixedOffset,
    history_limit: u32,
}

impl DashboardService {
    pub fn new(
        source: Arc<dyn PowerDataSource>,
        display_offset: FixedOffset,
        history_limit: u32,
    ) -> Self {
        Self {
            source,
            display_offset,
            history_limit,
        }
    }

    pub async fn regions(&self) -> Result<RegionsDashboard, TransportError> {
        let snapshot = self.source.current_snapshot().await?;
        Ok(Self::regions_from(&snapshot))
    }

    pub async fn map_chart(&self) -> Result<ChartOption, TransportError> {
        let snapshot = self.source.current_snapshot().await?;
        let regions = snapshot_normalizer::normalize(&snapshot);
        Ok(chart_builder::build_map(&regions))
    }

    pub async fn history_chart(&self, limit: Option<u32>) -> Result<ChartOption, TransportError> {
        let limit = limit.unwrap_or(self.history_limit);
        let records = self.source.history(limit).await?;
        let series = normalize_history(&records, self.display_offset);
        Ok(chart_builder::build(&series))
    }

    /// Force the backend to pull a fresh snapshot and return its region views.
    pub async fn refresh(&self) -> Result<RegionsDashboard, TransportError> {
        let snapshot = self.source.fetch_now().await?;
        if !snapshot.is_valid() {
            tracing::warn!(
                "Forced refresh returned no usable data (result_code={:?}, msg={:?})",
                snapshot.result_code,
                snapshot.result_msg
            );
        }
        Ok(Self::regions_from(&snapshot))
    }

    pub async fn backend_health(&self) -> Result<serde_json::Value, TransportError> {
        self.source.health().await
    }

    fn regions_from(snapshot: &RawSnapshot) -> RegionsDashboard {
        RegionsDashboard::new(
            snapshot_normalizer::normalize(snapshot),
            snapshot_normalizer::totals(snapshot),
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::power::{RegionReading, TimestampedRecord};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory source that records the history limit it was asked for.
    pub(crate) struct StaticSource {
        pub snapshot: RawSnapshot,
        pub records: Vec<TimestampedRecord>,
        pub fail: bool,
        pub last_limit: Mutex<Option<u32>>,
    }

    impl StaticSource {
        pub fn new(snapshot: RawSnapshot, records: Vec<TimestampedRecord>) -> Self {
            Self {
                snapshot,
                records,
                fail: false,
                last_limit: Mutex::new(None),
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new(RawSnapshot::default(), Vec::new())
            }
        }

        fn check(&self) -> Result<(), TransportError> {
            if self.fail {
                return Err(TransportError::Status {
                    url: "http://backend/api/power-data".to_string(),
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl PowerDataSource for StaticSource {
        async fn current_snapshot(&self) -> Result<RawSnapshot, TransportError> {
            self.check()?;
            Ok(self.snapshot.clone())
        }

        async fn history(&self, limit: u32) -> Result<Vec<TimestampedRecord>, TransportError> {
            self.check()?;
            *self.last_limit.lock().unwrap() = Some(limit);
            Ok(self.records.clone())
        }

        async fn fetch_now(&self) -> Result<RawSnapshot, TransportError> {
            self.check()?;
            Ok(self.snapshot.clone())
        }

        async fn health(&self) -> Result<serde_json::Value, TransportError> {
            self.check()?;
            Ok(serde_json::json!({"status": "healthy", "background_task_running": true}))
        }
    }

    pub(crate) fn sample_source() -> StaticSource {
        let snapshot = RawSnapshot::ok(vec![
            RegionReading::new("35", 3_000_000.0, 6_000_000.0),
            RegionReading::new("43", 1_000_000.0, 2_000_000.0),
        ]);
        let records = vec![
            TimestampedRecord::new("2025-01-10T12:05:00", snapshot.clone()),
            TimestampedRecord::new("2025-01-10T12:00:00", RawSnapshot::empty("0")),
        ];
        StaticSource::new(snapshot, records)
    }

    fn service(source: StaticSource) -> (DashboardService, Arc<StaticSource>) {
        let source = Arc::new(source);
        let service = DashboardService::new(
            source.clone(),
            FixedOffset::east_opt(0).unwrap(),
            100,
        );
        (service, source)
    }

    #[tokio::test]
    async fn test_regions_with_totals() {
        let (service, _) = service(sample_source());
        let dashboard = service.regions().await.unwrap();

        assert_eq!(dashboard.regions.len(), 2);
        assert_eq!(dashboard.regions[1].name, "Rio Grande do Sul");
        assert_eq!(dashboard.totals.total_active_power, 4_000_000.0);
        assert_eq!(dashboard.totals.formatted_active_power, "4.00 MW");
        assert_eq!(dashboard.totals.utilization, 50.0);
    }

    #[tokio::test]
    async fn test_regions_without_data() {
        let (service, _) = service(StaticSource::new(RawSnapshot::empty("0"), Vec::new()));
        let dashboard = service.regions().await.unwrap();

        assert!(dashboard.regions.is_empty());
        assert_eq!(dashboard.totals.total_active_power, 0.0);
        assert_eq!(dashboard.totals.utilization, 0.0);
    }

    #[tokio::test]
    async fn test_history_chart_uses_default_limit() {
        let (service, source) = service(sample_source());
        let option = service.history_chart(None).await.unwrap();

        assert_eq!(*source.last_limit.lock().unwrap(), Some(100));
        assert_eq!(
            option.x_axis.unwrap().data.unwrap(),
            vec!["10/01/2025 12:05".to_string()]
        );
        assert_eq!(option.series.len(), 1);

        service.history_chart(Some(5)).await.unwrap();
        assert_eq!(*source.last_limit.lock().unwrap(), Some(5));
    }

    #[tokio::test]
    async fn test_history_chart_empty() {
        let (service, _) = service(StaticSource::new(RawSnapshot::default(), Vec::new()));
        let option = service.history_chart(None).await.unwrap();
        assert_eq!(option, chart_builder::build_empty());
    }

    #[tokio::test]
    async fn test_transport_error_passes_through() {
        let (service, _) = service(StaticSource::failing());

        let err = service.regions().await.unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 500, .. }));
        assert!(service.history_chart(None).await.is_err());
        assert!(service.refresh().await.is_err());
        assert!(service.backend_health().await.is_err());
    }

    #[tokio::test]
    async fn test_map_chart_and_health() {
        let (service, _) = service(sample_source());
        let option = service.map_chart().await.unwrap();
        assert_eq!(option.series[0].data.len(), 2);

        let health = service.backend_health().await.unwrap();
        assert_eq!(health["status"], "healthy");
    }
}
