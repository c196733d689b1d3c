//! In-memory state for onboarding a new tool
//!
//! A session walks through five steps, collects attachments and integration
//! test outcomes, and finally hands back a draft for `add_tool`.

use crate::core::data::{
    Credentials, DocumentStatus, DocumentType, IntegrationStatus, IntegrationTestResult,
    IntegrationType, OnboardingStatus, ToolDocument, ToolDraft, ToolIntegration, ToolStatus,
    generate_id,
};
use crate::utils::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    BasicInfo,
    Documents,
    Integration,
    Testing,
    Review,
}

impl OnboardingStep {
    pub const ALL: [OnboardingStep; 5] = [
        OnboardingStep::BasicInfo,
        OnboardingStep::Documents,
        OnboardingStep::Integration,
        OnboardingStep::Testing,
        OnboardingStep::Review,
    ];

    pub fn index(&self) -> usize {
        match self {
            OnboardingStep::BasicInfo => 0,
            OnboardingStep::Documents => 1,
            OnboardingStep::Integration => 2,
            OnboardingStep::Testing => 3,
            OnboardingStep::Review => 4,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            OnboardingStep::BasicInfo => "Basic Information",
            OnboardingStep::Documents => "Documents & Contracts",
            OnboardingStep::Integration => "Integration Setup",
            OnboardingStep::Testing => "Testing & Validation",
            OnboardingStep::Review => "Review & Submit",
        }
    }
}

impl fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} {}", self.index() + 1, Self::ALL.len(), self.title())
    }
}

/// Integration as entered by the user, before it is given an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewIntegration {
    pub name: String,
    pub kind: IntegrationType,
    pub endpoint: String,
    pub credentials: Credentials,
}

#[derive(Debug, Clone)]
pub struct OnboardingSession {
    id: Uuid,
    step: OnboardingStep,
    draft: ToolDraft,
    documents: Vec<ToolDocument>,
    integrations: Vec<ToolIntegration>,
    test_results: HashMap<String, IntegrationTestResult>,
}

impl OnboardingSession {
    pub fn new(now: DateTime<Utc>) -> Self {
        let draft = ToolDraft {
            last_active_date: Some(now.format("%Y-%m-%d").to_string()),
            status: Some(ToolStatus::Onboarding),
            onboarding_status: Some(OnboardingStatus::BasicInfo),
            created_date: Some(now),
            last_updated: Some(now),
            ..Default::default()
        };
        Self {
            id: Uuid::new_v4(),
            step: OnboardingStep::BasicInfo,
            draft,
            documents: Vec::new(),
            integrations: Vec::new(),
            test_results: HashMap::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn step(&self) -> OnboardingStep {
        self.step
    }

    pub fn is_first_step(&self) -> bool {
        self.step.index() == 0
    }

    pub fn is_last_step(&self) -> bool {
        self.step.index() + 1 == OnboardingStep::ALL.len()
    }

    /// Advance one step; stays on Review
    pub fn next(&mut self) -> OnboardingStep {
        if !self.is_last_step() {
            self.step = OnboardingStep::ALL[self.step.index() + 1];
        }
        self.step
    }

    /// Go back one step; stays on BasicInfo
    pub fn previous(&mut self) -> OnboardingStep {
        if !self.is_first_step() {
            self.step = OnboardingStep::ALL[self.step.index() - 1];
        }
        self.step
    }

    pub fn draft(&self) -> &ToolDraft {
        &self.draft
    }

    /// Overlay the set fields of `info` onto the draft. Status fields stay
    /// under the session's control.
    pub fn update_basic_info(&mut self, info: ToolDraft) {
        let draft = &mut self.draft;
        macro_rules! overlay {
            ($($field:ident),*) => {
                $(if info.$field.is_some() { draft.$field = info.$field; })*
            };
        }
        overlay!(
            name,
            vendor,
            category,
            annual_cost_usd,
            license_type,
            agents_installed,
            utilisation_percent,
            overlap_tags,
            controls_covered,
            last_active_date,
            renew_date,
            contract_terms,
            demo_notes,
            risk_coverage,
            overlap_score,
            owner_id
        );
    }

    pub fn documents(&self) -> &[ToolDocument] {
        &self.documents
    }

    pub fn integrations(&self) -> &[ToolIntegration] {
        &self.integrations
    }

    pub fn add_document<R: Rng>(
        &mut self,
        name: &str,
        kind: DocumentType,
        size: u64,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> &ToolDocument {
        let id = generate_id("doc", now, rng);
        let document = ToolDocument {
            file_url: format!("local://{}/{}", self.id, id),
            id,
            name: name.to_string(),
            kind,
            upload_date: now,
            size,
            status: DocumentStatus::Pending,
        };
        self.documents.push(document);
        &self.documents[self.documents.len() - 1]
    }

    /// Returns whether a document was removed
    pub fn remove_document(&mut self, id: &str) -> bool {
        let before = self.documents.len();
        self.documents.retain(|d| d.id != id);
        self.documents.len() != before
    }

    pub fn add_integration<R: Rng>(
        &mut self,
        integration: NewIntegration,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> &ToolIntegration {
        self.integrations.push(ToolIntegration {
            id: generate_id("int", now, rng),
            name: integration.name,
            kind: integration.kind,
            endpoint: integration.endpoint,
            credentials: integration.credentials,
            status: IntegrationStatus::Pending,
            last_test: String::new(),
            test_result: None,
        });
        &self.integrations[self.integrations.len() - 1]
    }

    /// Returns whether an integration was removed. Its test result goes too.
    pub fn remove_integration(&mut self, id: &str) -> bool {
        let before = self.integrations.len();
        self.integrations.retain(|i| i.id != id);
        self.test_results.remove(id);
        self.integrations.len() != before
    }

    /// Store the outcome of a connectivity check against an attached integration
    pub fn record_test_result(
        &mut self,
        integration_id: &str,
        result: IntegrationTestResult,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        let integration = self
            .integrations
            .iter_mut()
            .find(|i| i.id == integration_id)
            .ok_or_else(|| AppError::not_found("Integration", integration_id))?;

        integration.status = if result.success {
            IntegrationStatus::Connected
        } else {
            IntegrationStatus::Failed
        };
        integration.last_test = now.to_rfc3339();
        integration.test_result = Some(result.clone());
        self.test_results.insert(integration_id.to_string(), result);
        Ok(())
    }

    pub fn test_result(&self, integration_id: &str) -> Option<&IntegrationTestResult> {
        self.test_results.get(integration_id)
    }

    /// Finish the wizard, producing an approved, active draft
    pub fn submit(self) -> ToolDraft {
        ToolDraft {
            documents: Some(self.documents),
            integrations: Some(self.integrations),
            onboarding_status: Some(OnboardingStatus::Approved),
            status: Some(ToolStatus::Active),
            ..self.draft
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::CredentialType;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn api_integration() -> NewIntegration {
        NewIntegration {
            name: "Events API".to_string(),
            kind: IntegrationType::Api,
            endpoint: "https://api.example.com/v1/events".to_string(),
            credentials: Credentials {
                kind: CredentialType::ApiKey,
                encrypted: false,
            },
        }
    }

    #[test]
    fn test_new_session_defaults() {
        let now = "2024-03-05T10:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let session = OnboardingSession::new(now);
        assert_eq!(session.step(), OnboardingStep::BasicInfo);
        assert_eq!(session.draft().status, Some(ToolStatus::Onboarding));
        assert_eq!(session.draft().onboarding_status, Some(OnboardingStatus::BasicInfo));
        assert_eq!(session.draft().last_active_date.as_deref(), Some("2024-03-05"));
        assert!(session.documents().is_empty());
    }

    #[test]
    fn test_navigation_clamps_at_both_ends() {
        let mut session = OnboardingSession::new(Utc::now());
        assert_eq!(session.previous(), OnboardingStep::BasicInfo);

        let visited: Vec<OnboardingStep> = (0..4).map(|_| session.next()).collect();
        assert_eq!(visited, OnboardingStep::ALL[1..].to_vec());
        assert!(session.is_last_step());
        assert_eq!(session.next(), OnboardingStep::Review);

        assert_eq!(session.previous(), OnboardingStep::Testing);
    }

    #[test]
    fn test_basic_info_keeps_status_under_session_control() {
        let mut session = OnboardingSession::new(Utc::now());
        session.update_basic_info(ToolDraft {
            name: Some("Wiz".to_string()),
            annual_cost_usd: Some(30_000.0),
            status: Some(ToolStatus::Inactive),
            ..Default::default()
        });
        session.update_basic_info(ToolDraft {
            vendor: Some("Wiz Inc".to_string()),
            ..Default::default()
        });
        assert_eq!(session.draft().name.as_deref(), Some("Wiz"));
        assert_eq!(session.draft().vendor.as_deref(), Some("Wiz Inc"));
        assert_eq!(session.draft().annual_cost_usd, Some(30_000.0));
        assert_eq!(session.draft().status, Some(ToolStatus::Onboarding));
    }

    #[test]
    fn test_documents_add_and_remove() {
        let mut rng = StdRng::seed_from_u64(1);
        let now = Utc::now();
        let mut session = OnboardingSession::new(now);
        let id = session
            .add_document("msa.pdf", DocumentType::Contract, 2048, now, &mut rng)
            .id
            .clone();
        assert!(id.starts_with(&format!("doc-{}-", now.timestamp_millis())));
        assert_eq!(session.documents()[0].status, DocumentStatus::Pending);

        assert!(!session.remove_document("doc-missing"));
        assert!(session.remove_document(&id));
        assert!(session.documents().is_empty());
    }

    #[test]
    fn test_record_test_result() {
        let mut rng = StdRng::seed_from_u64(2);
        let now = Utc::now();
        let mut session = OnboardingSession::new(now);
        let id = session.add_integration(api_integration(), now, &mut rng).id.clone();
        assert!(id.starts_with("int-"));

        let result = IntegrationTestResult {
            success: false,
            message: "Connection failed - check credentials".to_string(),
            response_time: Some(120),
        };
        session.record_test_result(&id, result.clone(), now).unwrap();
        assert_eq!(session.test_result(&id), Some(&result));
        assert_eq!(session.integrations()[0].status, IntegrationStatus::Failed);
        assert!(!session.integrations()[0].last_test.is_empty());

        let err = session.record_test_result("int-missing", result, now).unwrap_err();
        assert!(err.is_not_found());

        assert!(session.remove_integration(&id));
        assert!(session.test_result(&id).is_none());
    }

    #[test]
    fn test_submit_carries_attachments() {
        let mut rng = StdRng::seed_from_u64(3);
        let now = Utc::now();
        let mut session = OnboardingSession::new(now);
        session.update_basic_info(ToolDraft {
            name: Some("Wiz".to_string()),
            ..Default::default()
        });
        session.add_document("sla.pdf", DocumentType::Sla, 10, now, &mut rng);
        session.add_integration(api_integration(), now, &mut rng);

        let draft = session.submit();
        assert_eq!(draft.name.as_deref(), Some("Wiz"));
        assert_eq!(draft.status, Some(ToolStatus::Active));
        assert_eq!(draft.onboarding_status, Some(OnboardingStatus::Approved));
        assert_eq!(draft.documents.map(|d| d.len()), Some(1));
        assert_eq!(draft.integrations.map(|i| i.len()), Some(1));
    }
}
