pub mod config;
pub mod domain;
pub mod startup;
pub mod store;
pub mod telemetry;
