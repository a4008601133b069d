//! Application services that orchestrate domain operations over ports.

mod config_service;

pub use config_service::ConfigService;
