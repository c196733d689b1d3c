//! Core trait definitions for the dashboard data layer
//!
//! Every read takes the caller's [`Session`] so the active persona is always
//! explicit. Mutations are simulated and never change what later reads see.

use crate::core::data::{
    BenchmarkReport, DashboardData, IntegrationTestResult, InventoryFilters, InventoryPage,
    Playbook, Recommendation, Session, Tool, ToolDraft,
};
use crate::utils::error::AppResult;
use crate::utils::export::{ExportFormat, ReportBlob};
use async_trait::async_trait;

/// Read operations over the active persona's dataset
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    /// Company profile, normalized tools, owners, recommendations and the
    /// headline figures
    async fn get_dashboard(&self, session: &Session) -> AppResult<DashboardData>;

    /// Filter, then slice the 1-based `page`
    async fn get_inventory(
        &self,
        session: &Session,
        page: usize,
        page_size: usize,
        filters: &InventoryFilters,
    ) -> AppResult<InventoryPage>;

    /// Fails with `NotFound` when no tool in the active list has `id`
    async fn get_tool_by_id(&self, session: &Session, id: &str) -> AppResult<Tool>;

    /// Full list, independent of persona
    async fn get_recommendations(&self) -> AppResult<Vec<Recommendation>>;

    async fn get_benchmarks(&self, session: &Session) -> AppResult<BenchmarkReport>;
}

/// Playbook synthesis
#[async_trait]
pub trait PlaybookPlanner: Send + Sync {
    /// Fails with `NotFound` for an unknown recommendation
    async fn create_playbook_from_recommendation(&self, reco_id: &str) -> AppResult<Playbook>;
}

/// Report export
#[async_trait]
pub trait ReportExporter: Send + Sync {
    async fn export_report(&self, session: &Session, format: ExportFormat)
    -> AppResult<ReportBlob>;
}

/// Simulated mutations
#[async_trait]
pub trait ToolMutation: Send + Sync {
    /// Build a record with a fresh identity; nothing is stored
    async fn add_tool(&self, draft: ToolDraft) -> AppResult<Tool>;

    /// Merge `patch` over the existing tool; nothing is stored
    async fn update_tool(&self, session: &Session, id: &str, patch: ToolDraft) -> AppResult<Tool>;

    /// Always succeeds
    async fn delete_tool(&self, id: &str) -> AppResult<()>;

    async fn test_integration(
        &self,
        tool_id: &str,
        integration_id: &str,
    ) -> AppResult<IntegrationTestResult>;
}
