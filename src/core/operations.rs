//! Core operations implementation
//!
//! [`DashboardService`] implements every core trait over an immutable
//! [`Dataset`]. Its only mutable state is the random generator behind the
//! trend series, generated ids and integration test outcomes.

use crate::config::{Config, LatencyConfig, Operation};
use crate::core::data::{
    BenchmarkReport, DashboardData, IntegrationTestResult, InventoryFilters, InventoryPage,
    Playbook, Recommendation, Session, Tool, ToolDraft, generate_id,
};
use crate::core::dataset::Dataset;
use crate::core::playbook::build_playbook;
use crate::core::traits::{DashboardQuery, PlaybookPlanner, ReportExporter, ToolMutation};
use crate::utils::error::{AppError, AppResult};
use crate::utils::export::{ExportFormat, ReportBlob, render_report};
use crate::utils::pagination::paginate;
use crate::utils::search::SearchEngine;
use crate::utils::stats::{benchmark_report, debt_score_trend, projected_savings, total_spend};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

pub const INTEGRATION_SUCCESS_MESSAGE: &str = "Connection successful";
pub const INTEGRATION_FAILURE_MESSAGE: &str = "Connection failed - check credentials";

/// Main operations hub that implements all core traits
pub struct DashboardService {
    dataset: Dataset,
    latency: LatencyConfig,
    integration_success_rate: f64,
    rng: Mutex<StdRng>,
}

impl DashboardService {
    pub fn new(dataset: Dataset, latency: LatencyConfig, integration_success_rate: f64, rng: StdRng) -> Self {
        Self {
            dataset,
            latency,
            integration_success_rate,
            rng: Mutex::new(rng),
        }
    }

    /// Build from configuration: dataset directory or bundled data, latency
    /// settings and an optional fixed seed
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let dataset = match &config.general.data_dir {
            Some(dir) => {
                debug!(dir = %dir.display(), "loading datasets from directory");
                Dataset::load_dir(dir)?
            }
            None => Dataset::bundled()?,
        };
        let rng = match config.simulation.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self::new(
            dataset,
            config.latency.clone(),
            config.simulation.integration_success_rate,
            rng,
        ))
    }

    fn active_tools(&self, session: &Session) -> Vec<Tool> {
        self.dataset.tools(session.persona(), Utc::now())
    }

    async fn simulate_latency(&self, operation: Operation) {
        let delay = self.latency.delay_for(operation);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl DashboardQuery for DashboardService {
    async fn get_dashboard(&self, session: &Session) -> AppResult<DashboardData> {
        self.simulate_latency(Operation::Dashboard).await;
        debug!(persona = %session.persona(), "fetching dashboard data");

        let company = self.dataset.company(session.persona()).clone();
        let tools = self.active_tools(session);
        let recommendations = self.dataset.recommendations().to_vec();
        let debt_score_trend = debt_score_trend(company.debt_score, &mut *self.rng.lock());

        Ok(DashboardData {
            total_spend: total_spend(&tools),
            estimated_waste: company.estimated_waste,
            projected_savings: projected_savings(&recommendations),
            debt_score: company.debt_score,
            debt_score_trend,
            owners: self.dataset.owners().to_vec(),
            company,
            tools,
            recommendations,
        })
    }

    async fn get_inventory(
        &self,
        session: &Session,
        page: usize,
        page_size: usize,
        filters: &InventoryFilters,
    ) -> AppResult<InventoryPage> {
        self.simulate_latency(Operation::Inventory).await;
        debug!(persona = %session.persona(), page, page_size, ?filters, "fetching inventory");

        let filtered = SearchEngine::filter(self.active_tools(session), filters);
        Ok(InventoryPage {
            tools: paginate(&filtered, page, page_size),
            total: filtered.len(),
            page,
            page_size,
        })
    }

    async fn get_tool_by_id(&self, session: &Session, id: &str) -> AppResult<Tool> {
        self.simulate_latency(Operation::Tool).await;
        debug!(persona = %session.persona(), id, "fetching tool");

        self.active_tools(session)
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::not_found("Tool", id))
    }

    async fn get_recommendations(&self) -> AppResult<Vec<Recommendation>> {
        self.simulate_latency(Operation::Recommendations).await;
        debug!("fetching recommendations");
        Ok(self.dataset.recommendations().to_vec())
    }

    async fn get_benchmarks(&self, session: &Session) -> AppResult<BenchmarkReport> {
        self.simulate_latency(Operation::Benchmarks).await;
        debug!(persona = %session.persona(), "fetching benchmarks");

        let tools = self.active_tools(session);
        Ok(benchmark_report(self.dataset.company(session.persona()), &tools))
    }
}

#[async_trait]
impl PlaybookPlanner for DashboardService {
    async fn create_playbook_from_recommendation(&self, reco_id: &str) -> AppResult<Playbook> {
        self.simulate_latency(Operation::Playbook).await;
        debug!(reco_id, "creating playbook");

        let recommendation = self
            .dataset
            .find_recommendation(reco_id)
            .ok_or_else(|| AppError::not_found("Recommendation", reco_id))?;
        Ok(build_playbook(recommendation, Utc::now()))
    }
}

#[async_trait]
impl ReportExporter for DashboardService {
    async fn export_report(&self, session: &Session, format: ExportFormat) -> AppResult<ReportBlob> {
        self.simulate_latency(Operation::Export).await;
        debug!(persona = %session.persona(), %format, "exporting report");

        Ok(render_report(format, &self.active_tools(session)))
    }
}

#[async_trait]
impl ToolMutation for DashboardService {
    async fn add_tool(&self, draft: ToolDraft) -> AppResult<Tool> {
        self.simulate_latency(Operation::AddTool).await;

        let now = Utc::now();
        let id = generate_id("tool", now, &mut *self.rng.lock());
        let tool = Tool::from_draft(id, draft, now);
        info!(id = %tool.id, name = %tool.name, "adding tool (not persisted)");
        Ok(tool)
    }

    async fn update_tool(&self, session: &Session, id: &str, patch: ToolDraft) -> AppResult<Tool> {
        self.simulate_latency(Operation::UpdateTool).await;

        let existing = self
            .active_tools(session)
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::not_found("Tool", id))?;
        info!(persona = %session.persona(), id, "updating tool (not persisted)");
        Ok(existing.merged(patch, Utc::now()))
    }

    async fn delete_tool(&self, id: &str) -> AppResult<()> {
        self.simulate_latency(Operation::DeleteTool).await;
        info!(id, "deleting tool (not persisted)");
        Ok(())
    }

    async fn test_integration(
        &self,
        tool_id: &str,
        integration_id: &str,
    ) -> AppResult<IntegrationTestResult> {
        self.simulate_latency(Operation::TestIntegration).await;

        let (success, response_time) = {
            let mut rng = self.rng.lock();
            let roll: f64 = rng.random();
            let success = roll > 1.0 - self.integration_success_rate;
            (success, rng.random_range(0..200u32) + 50)
        };
        info!(tool_id, integration_id, success, response_time, "tested integration");

        let message = if success {
            INTEGRATION_SUCCESS_MESSAGE
        } else {
            INTEGRATION_FAILURE_MESSAGE
        };
        Ok(IntegrationTestResult {
            success,
            message: message.to_string(),
            response_time: Some(response_time),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::{Persona, ToolStatus};

    fn service() -> DashboardService {
        DashboardService::new(
            Dataset::bundled().unwrap(),
            LatencyConfig::disabled(),
            0.8,
            StdRng::seed_from_u64(11),
        )
    }

    fn session(persona: Persona) -> Session {
        Session::new(persona)
    }

    #[tokio::test]
    async fn test_dashboard_totals() {
        let service = service();
        let data = service.get_dashboard(&session(Persona::Startup)).await.unwrap();
        assert_eq!(data.tools.len(), 6);
        assert_eq!(data.total_spend, 140_900.0);
        assert_eq!(data.projected_savings, 1_815_000.0);
        assert_eq!(data.debt_score, 42.0);
        assert_eq!(data.estimated_waste, 38_000.0);
        assert_eq!(data.debt_score_trend.len(), 12);
        assert_eq!(data.owners.len(), 5);
    }

    #[tokio::test]
    async fn test_dashboard_follows_session() {
        let service = service();
        let mut session = Session::default();
        assert_eq!(service.get_dashboard(&session).await.unwrap().tools.len(), 16);
        session.set_persona(Persona::Midmarket);
        assert_eq!(service.get_dashboard(&session).await.unwrap().tools.len(), 10);
    }

    #[tokio::test]
    async fn test_inventory_category_filter() {
        let service = service();
        let filters = InventoryFilters {
            category: Some("SIEM".to_string()),
            ..Default::default()
        };
        let page = service
            .get_inventory(&session(Persona::Enterprise), 1, 10, &filters)
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert!(page.tools.iter().all(|t| t.category == "SIEM"));
    }

    #[tokio::test]
    async fn test_inventory_pages() {
        let service = service();
        let s = session(Persona::Enterprise);
        let filters = InventoryFilters::default();
        let first = service.get_inventory(&s, 1, 10, &filters).await.unwrap();
        let second = service.get_inventory(&s, 2, 10, &filters).await.unwrap();
        let third = service.get_inventory(&s, 3, 10, &filters).await.unwrap();
        assert_eq!(first.tools.len(), 10);
        assert_eq!(second.tools.len(), 6);
        assert!(third.tools.is_empty());
        assert_eq!(third.total, 16);
    }

    #[tokio::test]
    async fn test_tool_lookup() {
        let service = service();
        let s = session(Persona::Startup);
        let tool = service.get_tool_by_id(&s, "st-005").await.unwrap();
        assert_eq!(tool.category, "SIEM");

        let err = service.get_tool_by_id(&s, "ent-001").await.unwrap_err();
        assert_eq!(err, AppError::not_found("Tool", "ent-001"));
    }

    #[tokio::test]
    async fn test_playbook_unknown_recommendation() {
        let service = service();
        let err = service
            .create_playbook_from_recommendation("nonexistent-id")
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let playbook = service.create_playbook_from_recommendation("reco-002").await.unwrap();
        assert_eq!(playbook.recommendation_id, "reco-002");
        assert_eq!(playbook.steps.len(), 6);
    }

    #[tokio::test]
    async fn test_add_and_update_do_not_persist() {
        let service = service();
        let s = session(Persona::Startup);

        let added = service
            .add_tool(ToolDraft {
                name: Some("New Scanner".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(added.id.starts_with("tool-"));
        let inventory = service
            .get_inventory(&s, 1, 100, &InventoryFilters::default())
            .await
            .unwrap();
        assert_eq!(inventory.total, 6);

        let updated = service
            .update_tool(
                &s,
                "st-001",
                ToolDraft {
                    status: Some(ToolStatus::Inactive),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, ToolStatus::Inactive);
        let reread = service.get_tool_by_id(&s, "st-001").await.unwrap();
        assert_eq!(reread.status, ToolStatus::Active);

        let missing = service.update_tool(&s, "nope", ToolDraft::default()).await;
        assert!(missing.unwrap_err().is_not_found());

        service.delete_tool("nope").await.unwrap();
    }

    #[tokio::test]
    async fn test_integration_results_are_bounded() {
        let service = service();
        let mut successes = 0;
        for _ in 0..500 {
            let result = service.test_integration("st-001", "int-1").await.unwrap();
            let time = result.response_time.unwrap();
            assert!((50..250).contains(&time));
            if result.success {
                assert_eq!(result.message, INTEGRATION_SUCCESS_MESSAGE);
                successes += 1;
            } else {
                assert_eq!(result.message, INTEGRATION_FAILURE_MESSAGE);
            }
        }
        assert!((330..=470).contains(&successes), "successes = {}", successes);
    }

    #[tokio::test]
    async fn test_seeded_services_agree() {
        let a = service();
        let b = service();
        let s = session(Persona::Enterprise);
        assert_eq!(
            a.get_dashboard(&s).await.unwrap().debt_score_trend,
            b.get_dashboard(&s).await.unwrap().debt_score_trend
        );
    }
}
