// Application layer - Normalization pipeline and dashboard use cases
pub mod chart_builder;
pub mod dashboard_service;
pub mod history_normalizer;
pub mod power_data_source;
pub mod snapshot_normalizer;
