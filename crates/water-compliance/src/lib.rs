pub mod analysis;
pub mod config;
pub mod error;
pub mod table;
pub mod telemetry;
