//! Core data structures for the tool debt dashboard
//!
//! Dataset records (company, tools, owners, recommendations) keep the
//! snake_case field names of the bundled JSON. Query results exposed to
//! dashboard consumers use camelCase.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named preset selecting which bundled company/tool dataset is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    Startup,
    Midmarket,
    #[default]
    Enterprise,
}

impl Persona {
    pub const ALL: [Persona; 3] = [Persona::Startup, Persona::Midmarket, Persona::Enterprise];

    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::Startup => "startup",
            Persona::Midmarket => "midmarket",
            Persona::Enterprise => "enterprise",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Persona::Startup => "Startup",
            Persona::Midmarket => "Midmarket",
            Persona::Enterprise => "Enterprise",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            Persona::Startup => "45 employees, $5M revenue",
            Persona::Midmarket => "180 employees, $25M revenue",
            Persona::Enterprise => "2,500 employees, $500M revenue",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Persona {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "startup" => Ok(Persona::Startup),
            "midmarket" => Ok(Persona::Midmarket),
            "enterprise" => Ok(Persona::Enterprise),
            other => Err(format!(
                "Invalid persona: {} (expected startup, midmarket or enterprise)",
                other
            )),
        }
    }
}

/// Caller-owned query context. Every read goes through a session so the
/// active dataset is always explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Session {
    persona: Persona,
}

impl Session {
    pub fn new(persona: Persona) -> Self {
        Self { persona }
    }

    pub fn set_persona(&mut self, persona: Persona) {
        self.persona = persona;
    }

    pub fn persona(&self) -> Persona {
        self.persona
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    pub annual_revenue: f64,
    pub security_budget_pct: f64,
    pub number_of_cloud_accounts: u32,
    pub employee_count: u32,
    pub industry: String,
    pub compliance_requirements: Vec<String>,
    pub security_team_size: u32,
    pub annual_security_spend: f64,
    pub estimated_waste: f64,
    pub debt_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    #[default]
    Active,
    Pending,
    Inactive,
    Onboarding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStatus {
    NotStarted,
    BasicInfo,
    Documents,
    Integration,
    Testing,
    #[default]
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Contract,
    Sla,
    Sow,
    License,
    Other,
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "contract" => Ok(DocumentType::Contract),
            "sla" => Ok(DocumentType::Sla),
            "sow" => Ok(DocumentType::Sow),
            "license" => Ok(DocumentType::License),
            "other" => Ok(DocumentType::Other),
            other => Err(format!("Invalid document type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDocument {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DocumentType,
    pub file_url: String,
    pub upload_date: DateTime<Utc>,
    pub size: u64,
    pub status: DocumentStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationType {
    Api,
    LogSource,
    Webhook,
    Database,
    FileUpload,
}

impl FromStr for IntegrationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "api" => Ok(IntegrationType::Api),
            "log_source" => Ok(IntegrationType::LogSource),
            "webhook" => Ok(IntegrationType::Webhook),
            "database" => Ok(IntegrationType::Database),
            "file_upload" => Ok(IntegrationType::FileUpload),
            other => Err(format!("Invalid integration type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialType {
    ApiKey,
    Oauth,
    BasicAuth,
    Certificate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "type")]
    pub kind: CredentialType,
    pub encrypted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationStatus {
    #[default]
    Pending,
    Connected,
    Failed,
    Testing,
}

/// Outcome of a simulated connectivity check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationTestResult {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolIntegration {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: IntegrationType,
    pub endpoint: String,
    pub credentials: Credentials,
    pub status: IntegrationStatus,
    #[serde(default)]
    pub last_test: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_result: Option<IntegrationTestResult>,
}

/// Tool record as authored in the bundled datasets. Onboarding fields are
/// optional there and get filled in by [`Tool::from_raw`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTool {
    pub id: String,
    pub name: String,
    pub vendor: String,
    pub category: String,
    pub annual_cost_usd: f64,
    pub license_type: String,
    pub agents_installed: u32,
    pub utilisation_percent: f64,
    pub overlap_tags: Vec<String>,
    pub controls_covered: Vec<String>,
    pub last_active_date: String,
    pub renew_date: String,
    pub contract_terms: String,
    pub demo_notes: String,
    pub risk_coverage: f64,
    pub overlap_score: f64,
    #[serde(default)]
    pub status: Option<ToolStatus>,
    #[serde(default)]
    pub onboarding_status: Option<OnboardingStatus>,
    #[serde(default)]
    pub documents: Option<Vec<ToolDocument>>,
    #[serde(default)]
    pub integrations: Option<Vec<ToolIntegration>>,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Inventory item with every onboarding field resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub id: String,
    pub name: String,
    pub vendor: String,
    pub category: String,
    pub annual_cost_usd: f64,
    pub license_type: String,
    pub agents_installed: u32,
    pub utilisation_percent: f64,
    pub overlap_tags: Vec<String>,
    pub controls_covered: Vec<String>,
    pub last_active_date: String,
    pub renew_date: String,
    pub contract_terms: String,
    pub demo_notes: String,
    pub risk_coverage: f64,
    pub overlap_score: f64,
    pub status: ToolStatus,
    pub onboarding_status: OnboardingStatus,
    pub documents: Vec<ToolDocument>,
    pub integrations: Vec<ToolIntegration>,
    pub owner_id: String,
    pub created_date: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

/// Partial tool used for creation and patching. Unset fields fall back to
/// zero values on create and to the existing value on update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_cost_usd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agents_installed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utilisation_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlap_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controls_covered: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_active_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renew_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_terms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_coverage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlap_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ToolStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_status: Option<OnboardingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<ToolDocument>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrations: Option<Vec<ToolIntegration>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Tool {
    /// Resolve a dataset record, defaulting absent onboarding fields
    pub fn from_raw(raw: RawTool, now: DateTime<Utc>) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            vendor: raw.vendor,
            category: raw.category,
            annual_cost_usd: raw.annual_cost_usd,
            license_type: raw.license_type,
            agents_installed: raw.agents_installed,
            utilisation_percent: raw.utilisation_percent,
            overlap_tags: raw.overlap_tags,
            controls_covered: raw.controls_covered,
            last_active_date: raw.last_active_date,
            renew_date: raw.renew_date,
            contract_terms: raw.contract_terms,
            demo_notes: raw.demo_notes,
            risk_coverage: raw.risk_coverage,
            overlap_score: raw.overlap_score,
            status: raw.status.unwrap_or_default(),
            onboarding_status: raw.onboarding_status.unwrap_or_default(),
            documents: raw.documents.unwrap_or_default(),
            integrations: raw.integrations.unwrap_or_default(),
            owner_id: raw.owner_id.unwrap_or_default(),
            created_date: raw.created_date.unwrap_or(now),
            last_updated: raw.last_updated.unwrap_or(now),
        }
    }

    /// Build a brand new tool from a draft
    pub fn from_draft(id: String, draft: ToolDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name.unwrap_or_default(),
            vendor: draft.vendor.unwrap_or_default(),
            category: draft.category.unwrap_or_default(),
            annual_cost_usd: draft.annual_cost_usd.unwrap_or_default(),
            license_type: draft.license_type.unwrap_or_default(),
            agents_installed: draft.agents_installed.unwrap_or_default(),
            utilisation_percent: draft.utilisation_percent.unwrap_or_default(),
            overlap_tags: draft.overlap_tags.unwrap_or_default(),
            controls_covered: draft.controls_covered.unwrap_or_default(),
            last_active_date: draft
                .last_active_date
                .unwrap_or_else(|| now.format("%Y-%m-%d").to_string()),
            renew_date: draft.renew_date.unwrap_or_default(),
            contract_terms: draft.contract_terms.unwrap_or_default(),
            demo_notes: draft.demo_notes.unwrap_or_default(),
            risk_coverage: draft.risk_coverage.unwrap_or_default(),
            overlap_score: draft.overlap_score.unwrap_or_default(),
            status: draft.status.unwrap_or_default(),
            onboarding_status: draft.onboarding_status.unwrap_or_default(),
            documents: draft.documents.unwrap_or_default(),
            integrations: draft.integrations.unwrap_or_default(),
            owner_id: draft.owner_id.unwrap_or_default(),
            created_date: draft.created_date.unwrap_or(now),
            last_updated: draft.last_updated.unwrap_or(now),
        }
    }

    /// Overlay the set fields of `patch` onto a copy of this tool. The
    /// identity is never patched and `last_updated` is always `now`.
    pub fn merged(&self, patch: ToolDraft, now: DateTime<Utc>) -> Self {
        let base = self.clone();
        Self {
            id: base.id,
            name: patch.name.unwrap_or(base.name),
            vendor: patch.vendor.unwrap_or(base.vendor),
            category: patch.category.unwrap_or(base.category),
            annual_cost_usd: patch.annual_cost_usd.unwrap_or(base.annual_cost_usd),
            license_type: patch.license_type.unwrap_or(base.license_type),
            agents_installed: patch.agents_installed.unwrap_or(base.agents_installed),
            utilisation_percent: patch.utilisation_percent.unwrap_or(base.utilisation_percent),
            overlap_tags: patch.overlap_tags.unwrap_or(base.overlap_tags),
            controls_covered: patch.controls_covered.unwrap_or(base.controls_covered),
            last_active_date: patch.last_active_date.unwrap_or(base.last_active_date),
            renew_date: patch.renew_date.unwrap_or(base.renew_date),
            contract_terms: patch.contract_terms.unwrap_or(base.contract_terms),
            demo_notes: patch.demo_notes.unwrap_or(base.demo_notes),
            risk_coverage: patch.risk_coverage.unwrap_or(base.risk_coverage),
            overlap_score: patch.overlap_score.unwrap_or(base.overlap_score),
            status: patch.status.unwrap_or(base.status),
            onboarding_status: patch.onboarding_status.unwrap_or(base.onboarding_status),
            documents: patch.documents.unwrap_or(base.documents),
            integrations: patch.integrations.unwrap_or(base.integrations),
            owner_id: patch.owner_id.unwrap_or(base.owner_id),
            created_date: patch.created_date.unwrap_or(base.created_date),
            last_updated: now,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) [{}]", self.name, self.vendor, self.category)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: String,
    pub tools_owned: Vec<String>,
    pub budget_responsibility: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub confidence: f64,
    pub estimated_savings: f64,
    pub estimated_risk_delta: f64,
    pub effort_estimate: String,
    pub tools_affected: Vec<String>,
    pub category: String,
    pub business_impact: String,
    pub technical_requirements: Vec<String>,
    pub timeline: String,
    pub dependencies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InventoryFilters {
    pub category: Option<String>,
    pub search: Option<String>,
    pub min_cost: Option<f64>,
    pub max_cost: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryPage {
    pub tools: Vec<Tool>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub company: Company,
    pub tools: Vec<Tool>,
    pub owners: Vec<Owner>,
    pub recommendations: Vec<Recommendation>,
    pub total_spend: f64,
    pub estimated_waste: f64,
    pub projected_savings: f64,
    pub debt_score: f64,
    pub debt_score_trend: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybookStatus {
    #[default]
    Draft,
    Active,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Blocked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybookStep {
    pub id: String,
    pub title: String,
    pub description: String,
    pub owner: String,
    pub estimated_time: String,
    pub status: StepStatus,
    pub dependencies: Vec<String>,
    pub deliverables: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playbook {
    pub id: String,
    pub recommendation_id: String,
    pub title: String,
    pub description: String,
    pub steps: Vec<PlaybookStep>,
    pub created_at: DateTime<Utc>,
    pub status: PlaybookStatus,
    pub estimated_duration: String,
    pub total_savings: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PercentileBenchmark {
    pub percentile25: f64,
    pub percentile50: f64,
    pub percentile75: f64,
    pub percentile90: f64,
    pub current: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benchmarks {
    pub spend_per_employee: PercentileBenchmark,
    pub tools_per_employee: PercentileBenchmark,
    pub utilization_rate: PercentileBenchmark,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkReport {
    pub industry: String,
    pub company_size: u32,
    pub security_spend: f64,
    pub spend_per_employee: f64,
    pub benchmarks: Benchmarks,
}

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate `<prefix>-<unix millis>-<9 base36 chars>`
pub fn generate_id<R: Rng>(prefix: &str, now: DateTime<Utc>, rng: &mut R) -> String {
    let suffix: String = (0..9)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("{}-{}-{}", prefix, now.timestamp_millis(), suffix)
}
