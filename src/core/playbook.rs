//! Migration playbook template
//!
//! Every recommendation gets the same six-phase plan. Only the header
//! (title, description, duration, savings) comes from the recommendation.

use crate::core::data::{Playbook, PlaybookStatus, PlaybookStep, Recommendation, StepStatus};
use chrono::{DateTime, Utc};

struct StepTemplate {
    title: &'static str,
    description: &'static str,
    owner: &'static str,
    estimated_time: &'static str,
    deliverables: &'static [&'static str],
}

const STEPS: [StepTemplate; 6] = [
    StepTemplate {
        title: "Assessment & Planning",
        description: "Conduct comprehensive assessment of current tools and create migration plan",
        owner: "Security Architect",
        estimated_time: "2-3 weeks",
        deliverables: &["Assessment report", "Migration plan", "Risk analysis"],
    },
    StepTemplate {
        title: "Stakeholder Communication",
        description: "Notify all stakeholders and obtain necessary approvals",
        owner: "CISO",
        estimated_time: "1 week",
        deliverables: &["Communication plan", "Approval documentation"],
    },
    StepTemplate {
        title: "Technical Implementation",
        description: "Execute the technical migration and configuration changes",
        owner: "Security Engineer",
        estimated_time: "3-4 weeks",
        deliverables: &["Migration scripts", "Configuration updates", "Test results"],
    },
    StepTemplate {
        title: "Testing & Validation",
        description: "Comprehensive testing of new configuration and validation of security controls",
        owner: "Security Operations",
        estimated_time: "1-2 weeks",
        deliverables: &["Test results", "Validation report", "Performance metrics"],
    },
    StepTemplate {
        title: "Decommission & Cleanup",
        description: "Remove old tools and clean up associated resources",
        owner: "Security Engineer",
        estimated_time: "1 week",
        deliverables: &["Decommission checklist", "Resource cleanup", "Documentation update"],
    },
    StepTemplate {
        title: "Monitoring & Optimization",
        description: "Monitor new setup and optimize based on performance metrics",
        owner: "Security Operations",
        estimated_time: "2-3 weeks",
        deliverables: &[
            "Monitoring dashboard",
            "Performance report",
            "Optimization recommendations",
        ],
    },
];

fn step_id(index: usize) -> String {
    format!("step-{}", index + 1)
}

/// The six template steps, each pending and depending on the one before
pub fn template_steps() -> Vec<PlaybookStep> {
    STEPS
        .iter()
        .enumerate()
        .map(|(index, template)| PlaybookStep {
            id: step_id(index),
            title: template.title.to_string(),
            description: template.description.to_string(),
            owner: template.owner.to_string(),
            estimated_time: template.estimated_time.to_string(),
            status: StepStatus::Pending,
            dependencies: index
                .checked_sub(1)
                .map(|previous| vec![step_id(previous)])
                .unwrap_or_default(),
            deliverables: template.deliverables.iter().map(|d| d.to_string()).collect(),
        })
        .collect()
}

/// Draft playbook for a recommendation
pub fn build_playbook(recommendation: &Recommendation, now: DateTime<Utc>) -> Playbook {
    Playbook {
        id: format!("playbook-{}", recommendation.id),
        recommendation_id: recommendation.id.clone(),
        title: format!("Playbook: {}", recommendation.title),
        description: recommendation.description.clone(),
        steps: template_steps(),
        created_at: now,
        status: PlaybookStatus::Draft,
        estimated_duration: recommendation.timeline.clone(),
        total_savings: recommendation.estimated_savings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::Dataset;

    #[test]
    fn test_steps_form_a_chain() {
        let steps = template_steps();
        assert_eq!(steps.len(), 6);
        assert!(steps[0].dependencies.is_empty());
        for pair in steps.windows(2) {
            assert_eq!(pair[1].dependencies, vec![pair[0].id.clone()]);
        }
        assert!(steps.iter().all(|s| s.status == StepStatus::Pending));
        assert_eq!(steps[5].id, "step-6");
        assert_eq!(steps[1].owner, "CISO");
    }

    #[test]
    fn test_playbook_header_comes_from_recommendation() {
        let dataset = Dataset::bundled().unwrap();
        let reco = &dataset.recommendations()[0];
        let now = Utc::now();
        let playbook = build_playbook(reco, now);

        assert_eq!(playbook.id, format!("playbook-{}", reco.id));
        assert_eq!(playbook.recommendation_id, reco.id);
        assert_eq!(playbook.title, format!("Playbook: {}", reco.title));
        assert_eq!(playbook.description, reco.description);
        assert_eq!(playbook.estimated_duration, reco.timeline);
        assert_eq!(playbook.total_savings, reco.estimated_savings);
        assert_eq!(playbook.status, PlaybookStatus::Draft);
        assert_eq!(playbook.created_at, now);
    }

    #[test]
    fn test_steps_identical_across_recommendations() {
        let dataset = Dataset::bundled().unwrap();
        let now = Utc::now();
        let first = build_playbook(&dataset.recommendations()[0], now);
        let last = build_playbook(&dataset.recommendations()[4], now);
        assert_eq!(first.steps, last.steps);
    }
}
