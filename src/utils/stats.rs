//! Derived metrics over the active dataset
//!
//! Everything here is recomputed on demand from the tool list already held
//! in memory; nothing is cached.

use crate::core::data::{
    BenchmarkReport, Benchmarks, Company, DashboardData, PercentileBenchmark, Recommendation, Tool,
};
use crate::utils::format::{format_currency, format_percent};
use crate::utils::output::OutputStyle;
use rand::Rng;
use serde::Serialize;

pub const TREND_POINTS: usize = 12;
pub const TREND_SPREAD: f64 = 10.0;
pub const HIGH_OVERLAP_THRESHOLD: f64 = 0.7;

pub const SPEND_PER_EMPLOYEE_PERCENTILES: [f64; 4] = [1200.0, 1800.0, 2500.0, 3500.0];
pub const TOOLS_PER_EMPLOYEE_PERCENTILES: [f64; 4] = [0.8, 1.2, 1.8, 2.5];
pub const UTILIZATION_RATE_PERCENTILES: [f64; 4] = [45.0, 65.0, 80.0, 90.0];

pub fn total_spend(tools: &[Tool]) -> f64 {
    tools.iter().map(|t| t.annual_cost_usd).sum()
}

pub fn projected_savings(recommendations: &[Recommendation]) -> f64 {
    recommendations.iter().map(|r| r.estimated_savings).sum()
}

/// Mean utilisation percentage; 0.0 for an empty list
pub fn mean_utilization(tools: &[Tool]) -> f64 {
    if tools.is_empty() {
        return 0.0;
    }
    tools.iter().map(|t| t.utilisation_percent).sum::<f64>() / tools.len() as f64
}

fn per_employee(value: f64, employees: u32) -> f64 {
    if employees == 0 {
        0.0
    } else {
        value / employees as f64
    }
}

pub fn spend_per_employee(company: &Company) -> f64 {
    per_employee(company.annual_security_spend, company.employee_count)
}

pub fn tools_per_employee(tool_count: usize, company: &Company) -> f64 {
    per_employee(tool_count as f64, company.employee_count)
}

/// Synthetic debt score series: each point is the score plus a uniform
/// offset in [-5, +5), clamped to [0, 100]
pub fn debt_score_trend<R: Rng>(debt_score: f64, rng: &mut R) -> Vec<f64> {
    (0..TREND_POINTS)
        .map(|_| {
            let variation = (rng.random::<f64>() - 0.5) * TREND_SPREAD;
            (debt_score + variation).clamp(0.0, 100.0)
        })
        .collect()
}

/// Change between the last two trend points
pub fn trend_delta(trend: &[f64]) -> f64 {
    match trend {
        [.., previous, last] => last - previous,
        _ => 0.0,
    }
}

fn benchmark(table: [f64; 4], current: f64) -> PercentileBenchmark {
    let [percentile25, percentile50, percentile75, percentile90] = table;
    PercentileBenchmark {
        percentile25,
        percentile50,
        percentile75,
        percentile90,
        current,
    }
}

/// Static percentile tables with the persona's current value marked
pub fn benchmark_report(company: &Company, tools: &[Tool]) -> BenchmarkReport {
    let spend = spend_per_employee(company);
    BenchmarkReport {
        industry: company.industry.clone(),
        company_size: company.employee_count,
        security_spend: company.annual_security_spend,
        spend_per_employee: spend,
        benchmarks: Benchmarks {
            spend_per_employee: benchmark(SPEND_PER_EMPLOYEE_PERCENTILES, spend),
            tools_per_employee: benchmark(
                TOOLS_PER_EMPLOYEE_PERCENTILES,
                tools_per_employee(tools.len(), company),
            ),
            utilization_rate: benchmark(UTILIZATION_RATE_PERCENTILES, mean_utilization(tools)),
        },
    }
}

/// Percentile bucket the current value falls into (25, 50, 75, 90 or 95)
pub fn percentile_position(benchmark: &PercentileBenchmark) -> u8 {
    let current = benchmark.current;
    if current <= benchmark.percentile25 {
        25
    } else if current <= benchmark.percentile50 {
        50
    } else if current <= benchmark.percentile75 {
        75
    } else if current <= benchmark.percentile90 {
        90
    } else {
        95
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtBand {
    Low,
    Moderate,
    High,
    Critical,
}

impl DebtBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            DebtBand::Critical
        } else if score >= 60.0 {
            DebtBand::High
        } else if score >= 40.0 {
            DebtBand::Moderate
        } else {
            DebtBand::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DebtBand::Low => "Low",
            DebtBand::Moderate => "Moderate",
            DebtBand::High => "High",
            DebtBand::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapLevel {
    Low,
    Medium,
    High,
}

impl OverlapLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.7 {
            OverlapLevel::High
        } else if score >= 0.4 {
            OverlapLevel::Medium
        } else {
            OverlapLevel::Low
        }
    }
}

/// Split of the composite debt score into its spend, coverage and
/// operational parts
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtBreakdown {
    pub spend_debt: f64,
    pub coverage_debt: f64,
    pub operational_debt: f64,
}

impl DebtBreakdown {
    pub fn for_company(company: &Company) -> Self {
        let spend_debt = if company.annual_security_spend > 0.0 {
            (company.estimated_waste / company.annual_security_spend * 100.0).min(100.0)
        } else {
            0.0
        };
        Self {
            spend_debt,
            coverage_debt: (100.0 - company.debt_score * 0.6).max(0.0),
            operational_debt: (100.0 - company.debt_score * 0.4).max(0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub tool_count: usize,
    pub total_spend: f64,
    pub average_utilization: f64,
    pub high_overlap_count: usize,
}

impl InventorySummary {
    pub fn from_tools(tools: &[Tool]) -> Self {
        Self {
            tool_count: tools.len(),
            total_spend: total_spend(tools),
            average_utilization: mean_utilization(tools).round(),
            high_overlap_count: tools
                .iter()
                .filter(|t| t.overlap_score > HIGH_OVERLAP_THRESHOLD)
                .count(),
        }
    }
}

/// Ratios shown alongside the headline spend figures
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub waste_percentage: f64,
    pub savings_percentage: f64,
    pub budget_utilization: f64,
    pub savings_to_waste: f64,
}

fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 { part / whole * 100.0 } else { 0.0 }
}

impl FinancialSummary {
    pub fn from_dashboard(data: &DashboardData) -> Self {
        let budget = data.company.annual_revenue * data.company.security_budget_pct;
        Self {
            waste_percentage: percent_of(data.estimated_waste, data.total_spend),
            savings_percentage: percent_of(data.projected_savings, data.total_spend),
            budget_utilization: percent_of(data.total_spend, budget),
            savings_to_waste: percent_of(data.projected_savings, data.estimated_waste),
        }
    }
}

/// Group tools by category, categories in first-seen order
pub fn group_by_category(tools: &[Tool]) -> Vec<(String, Vec<Tool>)> {
    let mut groups: Vec<(String, Vec<Tool>)> = Vec::new();
    for tool in tools {
        match groups.iter_mut().find(|(category, _)| *category == tool.category) {
            Some((_, members)) => members.push(tool.clone()),
            None => groups.push((tool.category.clone(), vec![tool.clone()])),
        }
    }
    groups
}

/// Utilities for displaying derived metrics
pub struct StatsCalculator;

impl StatsCalculator {
    pub fn print_inventory_summary(summary: &InventorySummary) {
        OutputStyle::print_header("📊 Inventory Summary");
        OutputStyle::print_field_colored("Tools", &summary.tool_count.to_string(), OutputStyle::info);
        OutputStyle::print_field_colored("Total spend", &format_currency(summary.total_spend), OutputStyle::info);
        OutputStyle::print_field_colored(
            "Utilization",
            &format_percent(summary.average_utilization, 0),
            OutputStyle::info,
        );
        OutputStyle::print_field_colored(
            "High overlap",
            &summary.high_overlap_count.to_string(),
            OutputStyle::warning,
        );
    }

    pub fn print_benchmarks(report: &BenchmarkReport) {
        OutputStyle::print_header("📐 Industry Benchmarks");
        OutputStyle::print_field_colored("Industry", &report.industry, OutputStyle::content);
        OutputStyle::print_field_colored("Employees", &report.company_size.to_string(), OutputStyle::content);

        let rows = [
            ("Spend/employee", &report.benchmarks.spend_per_employee, 0),
            ("Tools/employee", &report.benchmarks.tools_per_employee, 3),
            ("Utilization %", &report.benchmarks.utilization_rate, 0),
        ];
        println!();
        println!(
            "{:<16} {:>9} {:>9} {:>9} {:>9} {:>10} {:>6}",
            OutputStyle::header("Metric"),
            "p25",
            "p50",
            "p75",
            "p90",
            "current",
            "pos"
        );
        for (label, b, decimals) in rows {
            println!(
                "{:<16} {:>9.*} {:>9.*} {:>9.*} {:>9.*} {:>10} {:>6}",
                label,
                decimals,
                b.percentile25,
                decimals,
                b.percentile50,
                decimals,
                b.percentile75,
                decimals,
                b.percentile90,
                OutputStyle::info(&format!("{:.*}", decimals, b.current)),
                format!("p{}", percentile_position(b)),
            );
        }
    }
}
