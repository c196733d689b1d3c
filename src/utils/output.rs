use crate::core::data::{
    DashboardData, IntegrationTestResult, Owner, Playbook, Priority, Recommendation, Tool,
};
use crate::utils::format::{
    format_currency, format_datetime, format_list, format_percent, format_score_percent,
    truncate_string,
};
use crate::utils::error::{AppError, AppResult};
use crate::utils::stats::{DebtBand, DebtBreakdown, FinancialSummary, OverlapLevel, trend_delta};
use colored::*;
use serde::Serialize;

pub struct OutputStyle;

impl OutputStyle {
    pub fn title(text: &str) -> ColoredString {
        text.bright_blue().bold()
    }

    pub fn header(text: &str) -> ColoredString {
        text.bold()
    }

    pub fn label(text: &str) -> ColoredString {
        text.cyan()
    }

    pub fn content(text: &str) -> ColoredString {
        text.clear()
    }

    pub fn tags(text: &str) -> ColoredString {
        text.bright_cyan()
    }

    pub fn money(text: &str) -> ColoredString {
        text.bright_green()
    }

    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    pub fn info(text: &str) -> ColoredString {
        text.blue()
    }

    pub fn muted(text: &str) -> ColoredString {
        text.dimmed()
    }

    pub fn overlap(score: f64) -> ColoredString {
        let text = format_score_percent(score);
        match OverlapLevel::from_score(score) {
            OverlapLevel::High => text.red(),
            OverlapLevel::Medium => text.yellow(),
            OverlapLevel::Low => text.green(),
        }
    }

    pub fn utilization(percent: f64) -> ColoredString {
        let text = format_percent(percent, 0);
        if percent >= 80.0 {
            text.green()
        } else if percent >= 60.0 {
            text.yellow()
        } else {
            text.red()
        }
    }

    pub fn debt(score: f64, text: &str) -> ColoredString {
        match DebtBand::from_score(score) {
            DebtBand::Critical => text.red().bold(),
            DebtBand::High => text.yellow().bold(),
            DebtBand::Moderate => text.blue().bold(),
            DebtBand::Low => text.green().bold(),
        }
    }

    pub fn priority(priority: Priority) -> ColoredString {
        let text = priority.as_str().to_uppercase();
        match priority {
            Priority::Critical => text.red().bold(),
            Priority::High => text.red(),
            Priority::Medium => text.yellow(),
            Priority::Low => text.green(),
        }
    }

    pub fn separator() -> String {
        "─".repeat(60)
    }

    pub fn header_separator() -> String {
        "═".repeat(60)
    }

    pub fn print_header(title: &str) {
        println!("{}", Self::title(title));
        println!("{}", Self::header_separator());
    }

    pub fn print_field_colored(label: &str, value: &str, color_fn: impl Fn(&str) -> ColoredString) {
        println!("{:>14}: {}", Self::label(label), color_fn(value));
    }

    pub fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| AppError::System(format!("Failed to serialize output: {}", e)))?;
        println!("{}", json);
        Ok(())
    }

    // ========== Tool rendering ==========

    pub fn format_tool_row(tool: &Tool) -> String {
        format!(
            "{:<10} {:<32} {:<20} {:<14} {:>8} {:>6} {:>6}",
            tool.id,
            truncate_string(&tool.name, 32),
            truncate_string(&tool.vendor, 20),
            truncate_string(&tool.category, 14),
            format_currency(tool.annual_cost_usd),
            Self::utilization(tool.utilisation_percent),
            Self::overlap(tool.overlap_score),
        )
    }

    pub fn format_tool_table(tools: &[Tool]) -> String {
        let mut lines = Vec::with_capacity(tools.len() + 2);
        lines.push(format!(
            "{:<10} {:<32} {:<20} {:<14} {:>8} {:>6} {:>6}",
            "ID", "Name", "Vendor", "Category", "Cost", "Util", "Ovlp"
        ));
        lines.push(Self::separator());
        lines.extend(tools.iter().map(Self::format_tool_row));
        lines.join("\n")
    }

    pub fn format_tool_simple(tool: &Tool) -> String {
        format!(
            "{} [{}] {}",
            Self::header(&tool.name),
            Self::tags(&tool.category),
            Self::money(&format_currency(tool.annual_cost_usd)),
        )
    }

    pub fn print_tool_detailed(tool: &Tool) {
        println!("{}", Self::title(&format!("🛡️  {}", tool.name)));
        println!("{}", Self::header_separator());
        Self::print_field_colored("ID", &tool.id, Self::muted);
        Self::print_field_colored("Vendor", &tool.vendor, Self::content);
        Self::print_field_colored("Category", &tool.category, Self::tags);
        Self::print_field_colored("Annual cost", &format_currency(tool.annual_cost_usd), Self::money);
        Self::print_field_colored("License", &tool.license_type, Self::content);
        Self::print_field_colored("Agents", &tool.agents_installed.to_string(), Self::content);
        println!("{:>14}: {}", Self::label("Utilization"), Self::utilization(tool.utilisation_percent));
        println!("{:>14}: {}", Self::label("Overlap"), Self::overlap(tool.overlap_score));
        Self::print_field_colored("Risk coverage", &format_score_percent(tool.risk_coverage), Self::info);
        if !tool.overlap_tags.is_empty() {
            Self::print_field_colored("Overlap tags", &format_list(&tool.overlap_tags), Self::tags);
        }
        if !tool.controls_covered.is_empty() {
            Self::print_field_colored("Controls", &format_list(&tool.controls_covered), Self::content);
        }
        Self::print_field_colored("Last active", &tool.last_active_date, Self::muted);
        if !tool.renew_date.is_empty() {
            Self::print_field_colored("Renews", &tool.renew_date, Self::warning);
        }
        if !tool.contract_terms.is_empty() {
            Self::print_field_colored("Contract", &tool.contract_terms, Self::content);
        }
        Self::print_field_colored("Status", &format!("{:?}", tool.status), Self::content);
        Self::print_field_colored("Onboarding", &format!("{:?}", tool.onboarding_status), Self::content);
        if !tool.owner_id.is_empty() {
            Self::print_field_colored("Owner", &tool.owner_id, Self::content);
        }
        Self::print_field_colored("Documents", &tool.documents.len().to_string(), Self::muted);
        Self::print_field_colored("Integrations", &tool.integrations.len().to_string(), Self::muted);
        Self::print_field_colored("Updated", &format_datetime(&tool.last_updated), Self::muted);
        if !tool.demo_notes.is_empty() {
            println!("\n{}:", Self::title("📝 Notes"));
            println!("{}", Self::content(&tool.demo_notes));
        }
    }

    // ========== Dashboard rendering ==========

    pub fn print_dashboard(data: &DashboardData) {
        let company = &data.company;
        Self::print_header(&format!("🏢 {} ({})", company.name, company.industry));
        Self::print_field_colored("Employees", &company.employee_count.to_string(), Self::content);
        Self::print_field_colored("Compliance", &format_list(&company.compliance_requirements), Self::tags);

        let band = DebtBand::from_score(data.debt_score);
        let delta = trend_delta(&data.debt_score_trend);
        println!(
            "{:>14}: {} {} ({:+.1} pts vs last month)",
            Self::label("Debt score"),
            Self::debt(data.debt_score, &format!("{:.0}", data.debt_score)),
            Self::debt(data.debt_score, band.label()),
            delta
        );

        let breakdown = DebtBreakdown::for_company(company);
        Self::print_field_colored(
            "Breakdown",
            &format!(
                "spend {:.0} · coverage {:.0} · operational {:.0}",
                breakdown.spend_debt, breakdown.coverage_debt, breakdown.operational_debt
            ),
            Self::muted,
        );

        let summary = FinancialSummary::from_dashboard(data);
        println!();
        Self::print_field_colored("Total spend", &format_currency(data.total_spend), Self::money);
        Self::print_field_colored(
            "Waste",
            &format!(
                "{} ({} of spend)",
                format_currency(data.estimated_waste),
                format_percent(summary.waste_percentage, 1)
            ),
            Self::warning,
        );
        Self::print_field_colored(
            "Savings",
            &format!(
                "{} ({} of spend)",
                format_currency(data.projected_savings),
                format_percent(summary.savings_percentage, 1)
            ),
            Self::success,
        );
        Self::print_field_colored(
            "Budget used",
            &format_percent(summary.budget_utilization, 1),
            Self::info,
        );
        Self::print_field_colored("Tools", &data.tools.len().to_string(), Self::content);
        Self::print_field_colored(
            "Recommendations",
            &data.recommendations.len().to_string(),
            Self::content,
        );
    }

    pub fn print_owner(owner: &Owner) {
        println!(
            "  {} <{}> {} · {} · {} tools · {}",
            Self::header(&owner.name),
            owner.email,
            owner.role,
            owner.department,
            owner.tools_owned.len(),
            Self::money(&format_currency(owner.budget_responsibility)),
        );
    }

    // ========== Recommendations and playbooks ==========

    pub fn print_recommendation(reco: &Recommendation) {
        println!(
            "{} {} {}",
            Self::priority(reco.priority),
            Self::header(&reco.title),
            Self::muted(&format!("({})", reco.id)),
        );
        println!("  {}", reco.description);
        println!(
            "  {} {} · {} {} · {} {} · {} {}",
            Self::label("Savings"),
            Self::money(&format_currency(reco.estimated_savings)),
            Self::label("Risk Δ"),
            format_percent(reco.estimated_risk_delta * 100.0, 1),
            Self::label("Confidence"),
            format_score_percent(reco.confidence),
            Self::label("Effort"),
            reco.effort_estimate,
        );
        println!(
            "  {} {} · {} {}",
            Self::label("Timeline"),
            reco.timeline,
            Self::label("Tools"),
            Self::tags(&reco.tools_affected.join(", ")),
        );
    }

    pub fn print_playbook(playbook: &Playbook) {
        Self::print_header(&format!("📋 {}", playbook.title));
        Self::print_field_colored("ID", &playbook.id, Self::muted);
        Self::print_field_colored("Status", &format!("{:?}", playbook.status), Self::content);
        Self::print_field_colored("Duration", &playbook.estimated_duration, Self::content);
        Self::print_field_colored("Savings", &format_currency(playbook.total_savings), Self::money);
        Self::print_field_colored("Created", &format_datetime(&playbook.created_at), Self::muted);
        println!("\n{}", playbook.description);

        for (index, step) in playbook.steps.iter().enumerate() {
            println!();
            println!(
                "{} {} {}",
                Self::info(&format!("{}.", index + 1)),
                Self::header(&step.title),
                Self::muted(&format!("[{}] {} · {}", step.id, step.owner, step.estimated_time)),
            );
            println!("   {}", step.description);
            if !step.dependencies.is_empty() {
                println!("   {} {}", Self::label("Depends on:"), step.dependencies.join(", "));
            }
            println!("   {} {}", Self::label("Deliverables:"), step.deliverables.join(", "));
        }
    }

    pub fn print_integration_result(result: &IntegrationTestResult) {
        let timing = result
            .response_time
            .map(|ms| format!(" ({} ms)", ms))
            .unwrap_or_default();
        if result.success {
            println!("✅ {}{}", Self::success(&result.message), Self::muted(&timing));
        } else {
            println!("❌ {}{}", Self::error(&result.message), Self::muted(&timing));
        }
    }
}

pub fn print_warning(msg: &str) {
    println!("⚠️  {}", OutputStyle::warning(msg));
}
