//! BookVoyage Core — error taxonomy, configuration, data directory layout.

pub mod config;
pub mod error;

pub use config::{BookVoyageConfig, DataPaths};
pub use error::{Error, Result};
