// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod power_api_client;
