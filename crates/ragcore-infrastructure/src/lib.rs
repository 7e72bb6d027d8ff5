//! Infrastructure layer for RAGCore: configuration, logging, Postgres
//! persistence, and the tagged provider factories that turn [`AppConfig`]
//! into a wired [`Services`] record.

pub mod bootstrap;
pub mod config;
pub mod database;
pub mod factory;
pub mod logging;
pub mod migrations;
pub mod repository;

pub use bootstrap::bootstrap_services;
pub use config::{AppConfig, ConfigLoader};
pub use database::{DatabasePool, PoolSettings};
pub use ragcore_application::services::Services;
