//! Bundled persona datasets
//!
//! The six JSON documents under `data/` are compiled into the binary. A
//! directory holding files with the same names can replace them at startup.

use crate::core::data::{Company, Owner, Persona, RawTool, Recommendation, Tool};
use crate::utils::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

const COMPANY_JSON: &str = include_str!("../../data/company.json");
const TOOLS_STARTUP_JSON: &str = include_str!("../../data/tools_startup.json");
const TOOLS_MIDMARKET_JSON: &str = include_str!("../../data/tools_midmarket.json");
const TOOLS_ENTERPRISE_JSON: &str = include_str!("../../data/tools_enterprise.json");
const OWNERS_JSON: &str = include_str!("../../data/owners.json");
const RECOMMENDATIONS_JSON: &str = include_str!("../../data/recommendations.json");

pub const DATASET_FILES: [&str; 6] = [
    "company.json",
    "tools_startup.json",
    "tools_midmarket.json",
    "tools_enterprise.json",
    "owners.json",
    "recommendations.json",
];

/// One company profile per persona
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfiles {
    pub startup: Company,
    pub midmarket: Company,
    pub enterprise: Company,
}

/// Immutable snapshot of every bundled record
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    companies: CompanyProfiles,
    tools_startup: Vec<RawTool>,
    tools_midmarket: Vec<RawTool>,
    tools_enterprise: Vec<RawTool>,
    owners: Vec<Owner>,
    recommendations: Vec<Recommendation>,
}

fn parse<T: DeserializeOwned>(name: &str, content: &str) -> AppResult<T> {
    serde_json::from_str(content)
        .map_err(|e| AppError::Dataset(format!("Failed to parse {}: {}", name, e)))
}

impl Dataset {
    /// Parse the datasets compiled into the crate
    pub fn bundled() -> AppResult<Self> {
        Self::from_sources(|name| {
            let content = match name {
                "company.json" => COMPANY_JSON,
                "tools_startup.json" => TOOLS_STARTUP_JSON,
                "tools_midmarket.json" => TOOLS_MIDMARKET_JSON,
                "tools_enterprise.json" => TOOLS_ENTERPRISE_JSON,
                "owners.json" => OWNERS_JSON,
                "recommendations.json" => RECOMMENDATIONS_JSON,
                other => {
                    return Err(AppError::Dataset(format!("No bundled dataset named {}", other)));
                }
            };
            Ok(content.to_string())
        })
    }

    /// Load the six dataset files from a directory
    pub fn load_dir(dir: &Path) -> AppResult<Self> {
        Self::from_sources(|name| {
            let path = dir.join(name);
            std::fs::read_to_string(&path)
                .map_err(|e| AppError::Io(format!("Failed to read {}: {}", path.display(), e)))
        })
    }

    fn from_sources(mut read: impl FnMut(&str) -> AppResult<String>) -> AppResult<Self> {
        let [company, startup, midmarket, enterprise, owners, recommendations] = DATASET_FILES;

        Ok(Self {
            companies: parse(company, &read(company)?)?,
            tools_startup: parse(startup, &read(startup)?)?,
            tools_midmarket: parse(midmarket, &read(midmarket)?)?,
            tools_enterprise: parse(enterprise, &read(enterprise)?)?,
            owners: parse(owners, &read(owners)?)?,
            recommendations: parse(recommendations, &read(recommendations)?)?,
        })
    }

    pub fn company(&self, persona: Persona) -> &Company {
        match persona {
            Persona::Startup => &self.companies.startup,
            Persona::Midmarket => &self.companies.midmarket,
            Persona::Enterprise => &self.companies.enterprise,
        }
    }

    pub fn raw_tools(&self, persona: Persona) -> &[RawTool] {
        match persona {
            Persona::Startup => &self.tools_startup,
            Persona::Midmarket => &self.tools_midmarket,
            Persona::Enterprise => &self.tools_enterprise,
        }
    }

    /// Tools for a persona with onboarding defaults resolved against `now`
    pub fn tools(&self, persona: Persona, now: DateTime<Utc>) -> Vec<Tool> {
        self.raw_tools(persona)
            .iter()
            .cloned()
            .map(|raw| Tool::from_raw(raw, now))
            .collect()
    }

    pub fn owners(&self) -> &[Owner] {
        &self.owners
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    pub fn find_recommendation(&self, id: &str) -> Option<&Recommendation> {
        self.recommendations.iter().find(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_datasets_parse() {
        let dataset = Dataset::bundled().unwrap();
        assert_eq!(dataset.raw_tools(Persona::Startup).len(), 6);
        assert_eq!(dataset.raw_tools(Persona::Midmarket).len(), 10);
        assert_eq!(dataset.raw_tools(Persona::Enterprise).len(), 16);
        assert_eq!(dataset.owners().len(), 5);
        assert_eq!(dataset.recommendations().len(), 5);
    }

    #[test]
    fn test_company_per_persona() {
        let dataset = Dataset::bundled().unwrap();
        assert_eq!(dataset.company(Persona::Startup).employee_count, 45);
        assert_eq!(dataset.company(Persona::Midmarket).employee_count, 180);
        assert_eq!(dataset.company(Persona::Enterprise).employee_count, 2500);
    }

    #[test]
    fn test_tools_keep_source_order() {
        let dataset = Dataset::bundled().unwrap();
        let tools = dataset.tools(Persona::Startup, Utc::now());
        let ids: Vec<&str> = tools.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["st-001", "st-002", "st-003", "st-004", "st-005", "st-006"]);
    }

    #[test]
    fn test_load_dir_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let sources = [
            COMPANY_JSON,
            TOOLS_STARTUP_JSON,
            TOOLS_MIDMARKET_JSON,
            TOOLS_ENTERPRISE_JSON,
            OWNERS_JSON,
            RECOMMENDATIONS_JSON,
        ];
        for (name, content) in DATASET_FILES.iter().zip(sources) {
            std::fs::write(dir.path().join(name), content).unwrap();
        }

        let loaded = Dataset::load_dir(dir.path()).unwrap();
        assert_eq!(loaded, Dataset::bundled().unwrap());
    }

    #[test]
    fn test_load_dir_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Dataset::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn test_malformed_dataset_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        for name in DATASET_FILES {
            std::fs::write(dir.path().join(name), "{ not json").unwrap();
        }
        let err = Dataset::load_dir(dir.path()).unwrap_err();
        match err {
            AppError::Dataset(msg) => assert!(msg.contains("company.json")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
