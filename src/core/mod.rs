//! Core data layer
//!
//! Data structures, bundled datasets, the service traits and their
//! implementation, plus the playbook template and onboarding wizard state.

pub mod data;
pub mod dataset;
pub mod onboarding;
pub mod operations;
pub mod playbook;
pub mod traits;
