//! tooldebt - security tool debt dashboard over bundled persona datasets
//!
//! This library provides the data layer behind the dashboard: persona
//! datasets, inventory filtering and pagination, recommendations,
//! benchmarks, playbooks, report export and simulated mutations.

pub mod cli;
pub mod config;
pub mod core;
pub mod manager;
pub mod utils;

// Re-export core types and traits for easier use
pub use core::{
    data::{Persona, Session, Tool},
    dataset::Dataset,
    operations::DashboardService,
    traits::{DashboardQuery, PlaybookPlanner, ReportExporter, ToolMutation},
};
pub use utils::error::{AppError, AppResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
