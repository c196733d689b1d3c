use crate::core::data::{InventoryFilters, Tool};
use std::cmp::Ordering;

/// Search engine for inventory filtering and ordering
pub struct SearchEngine;

impl SearchEngine {
    /// Apply inventory filters in order: category, search, min cost, max cost.
    /// A tool must satisfy every filter that is set.
    pub fn filter(tools: Vec<Tool>, filters: &InventoryFilters) -> Vec<Tool> {
        let mut tools = tools;

        if let Some(category) = filters.category.as_deref().filter(|c| !c.is_empty()) {
            tools.retain(|t| t.category == category);
        }

        if let Some(search) = filters.search.as_deref().filter(|s| !s.is_empty()) {
            let term = search.to_lowercase();
            tools.retain(|t| Self::matches_search(t, &term));
        }

        if let Some(min) = filters.min_cost {
            tools.retain(|t| t.annual_cost_usd >= min);
        }

        if let Some(max) = filters.max_cost {
            tools.retain(|t| t.annual_cost_usd <= max);
        }

        tools
    }

    /// Case-insensitive substring match on name, vendor and category.
    /// `term` must already be lowercase.
    fn matches_search(tool: &Tool, term: &str) -> bool {
        tool.name.to_lowercase().contains(term)
            || tool.vendor.to_lowercase().contains(term)
            || tool.category.to_lowercase().contains(term)
    }

    /// Distinct categories, sorted
    pub fn categories(tools: &[Tool]) -> Vec<String> {
        let mut categories: Vec<String> = tools
            .iter()
            .map(|t| t.category.clone())
            .filter(|c| !c.is_empty())
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// Sort tools in place by the given field
    pub fn sort(tools: &mut [Tool], field: SortField, direction: SortDirection) {
        tools.sort_by(|a, b| {
            let ordering = match field {
                SortField::Name => a.name.cmp(&b.name),
                SortField::Vendor => a.vendor.cmp(&b.vendor),
                SortField::Category => a.category.cmp(&b.category),
                SortField::Cost => cmp_f64(a.annual_cost_usd, b.annual_cost_usd),
                SortField::Utilization => cmp_f64(a.utilisation_percent, b.utilisation_percent),
                SortField::Overlap => cmp_f64(a.overlap_score, b.overlap_score),
            };
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Name,
    Vendor,
    Category,
    Cost,
    Utilization,
    Overlap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::{RawTool, Tool};
    use chrono::Utc;

    fn tool(id: &str, name: &str, vendor: &str, category: &str, cost: f64) -> Tool {
        Tool::from_raw(
            RawTool {
                id: id.to_string(),
                name: name.to_string(),
                vendor: vendor.to_string(),
                category: category.to_string(),
                annual_cost_usd: cost,
                license_type: String::new(),
                agents_installed: 0,
                utilisation_percent: cost / 1000.0,
                overlap_tags: Vec::new(),
                controls_covered: Vec::new(),
                last_active_date: String::new(),
                renew_date: String::new(),
                contract_terms: String::new(),
                demo_notes: String::new(),
                risk_coverage: 0.0,
                overlap_score: 0.0,
                status: None,
                onboarding_status: None,
                documents: None,
                integrations: None,
                owner_id: None,
                created_date: None,
                last_updated: None,
            },
            Utc::now(),
        )
    }

    fn sample() -> Vec<Tool> {
        vec![
            tool("a", "Splunk Cloud", "Splunk", "SIEM", 50_000.0),
            tool("b", "Sentinel", "Microsoft", "SIEM", 150_000.0),
            tool("c", "Falcon", "CrowdStrike", "EDR", 120_000.0),
            tool("d", "Defender", "Microsoft", "EDR", 20_000.0),
        ]
    }

    fn ids(tools: &[Tool]) -> Vec<&str> {
        tools.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_no_filters_returns_everything_in_order() {
        let result = SearchEngine::filter(sample(), &InventoryFilters::default());
        assert_eq!(ids(&result), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_category_is_exact_match() {
        let filters = InventoryFilters {
            category: Some("SIEM".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&SearchEngine::filter(sample(), &filters)), ["a", "b"]);

        let filters = InventoryFilters {
            category: Some("siem".to_string()),
            ..Default::default()
        };
        assert!(SearchEngine::filter(sample(), &filters).is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let filters = InventoryFilters {
            search: Some("MICRO".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&SearchEngine::filter(sample(), &filters)), ["b", "d"]);

        let filters = InventoryFilters {
            search: Some("edr".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&SearchEngine::filter(sample(), &filters)), ["c", "d"]);
    }

    #[test]
    fn test_cost_bounds_are_inclusive() {
        let filters = InventoryFilters {
            min_cost: Some(50_000.0),
            max_cost: Some(120_000.0),
            ..Default::default()
        };
        assert_eq!(ids(&SearchEngine::filter(sample(), &filters)), ["a", "c"]);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let filters = InventoryFilters {
            category: Some("SIEM".to_string()),
            min_cost: Some(100_000.0),
            ..Default::default()
        };
        assert_eq!(ids(&SearchEngine::filter(sample(), &filters)), ["b"]);
    }

    #[test]
    fn test_categories_are_distinct_and_sorted() {
        assert_eq!(SearchEngine::categories(&sample()), ["EDR", "SIEM"]);
    }

    #[test]
    fn test_sort_by_cost() {
        let mut tools = sample();
        SearchEngine::sort(&mut tools, SortField::Cost, SortDirection::Desc);
        assert_eq!(ids(&tools), ["b", "c", "a", "d"]);
        SearchEngine::sort(&mut tools, SortField::Name, SortDirection::Asc);
        assert_eq!(ids(&tools), ["d", "c", "b", "a"]);
    }
}
