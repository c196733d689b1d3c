// Query operations - dashboard, inventory, show, recommendations, benchmarks

use crate::cli::{
    BenchmarksArgs, DashboardArgs, InventoryArgs, ListFormat, RecommendationsArgs, ShowArgs,
};
use crate::config::Config;
use crate::core::data::{InventoryFilters, InventoryPage, Persona, Session, Tool};
use crate::core::operations::DashboardService;
use crate::core::traits::DashboardQuery;
use crate::utils::error::{AppResult, FlowResult, handle_flow};
use crate::utils::output::OutputStyle;
use crate::utils::pagination::{page_count, paginate, print_or_page};
use crate::utils::search::SearchEngine;
use crate::utils::stats::{InventorySummary, StatsCalculator, group_by_category};

pub async fn handle_dashboard_command(
    service: &DashboardService,
    session: &Session,
    args: &DashboardArgs,
) -> AppResult<()> {
    let data = service.get_dashboard(session).await?;

    if args.json {
        return OutputStyle::print_json(&data);
    }

    OutputStyle::print_dashboard(&data);

    if args.owners {
        println!();
        println!("{}", OutputStyle::title("👥 Owners"));
        for owner in &data.owners {
            OutputStyle::print_owner(owner);
        }
    }

    Ok(())
}

fn filters_from_args(args: &InventoryArgs) -> InventoryFilters {
    InventoryFilters {
        category: args.category.clone(),
        search: args.search.clone(),
        min_cost: args.min_cost,
        max_cost: args.max_cost,
    }
}

pub async fn handle_inventory_command(
    service: &DashboardService,
    config: &Config,
    session: &Session,
    args: &InventoryArgs,
) -> AppResult<()> {
    if args.categories {
        let everything = service
            .get_inventory(session, 1, usize::MAX, &InventoryFilters::default())
            .await?;
        let categories = SearchEngine::categories(&everything.tools);
        println!("{}", OutputStyle::title("🏷️  Categories"));
        for category in categories {
            println!("  {}", OutputStyle::tags(&category));
        }
        return Ok(());
    }

    let filters = filters_from_args(args);
    let sort = args.sort.or(config.general.sort_by);
    let page_size = args.page_size.unwrap_or(config.general.page_size);

    // Sorted, summarized and --all listings are sliced locally
    let page = if sort.is_some() || args.summary || args.all {
        let mut matches = service
            .get_inventory(session, 1, usize::MAX, &filters)
            .await?
            .tools;
        if let Some(field) = sort {
            SearchEngine::sort(&mut matches, field, args.direction);
        }
        if args.summary {
            StatsCalculator::print_inventory_summary(&InventorySummary::from_tools(&matches));
            println!();
        }
        local_page(matches, args.page, page_size, args.all)
    } else {
        service
            .get_inventory(session, args.page, page_size, &filters)
            .await?
    };

    if page.tools.is_empty() {
        handle_flow(FlowResult::EmptyList {
            item_type: if page.total == 0 {
                "tools matching your criteria".to_string()
            } else {
                format!("tools on page {}", page.page)
            },
        });
        return Ok(());
    }

    match args.format.unwrap_or_default() {
        ListFormat::Json => OutputStyle::print_json(&page),
        ListFormat::Simple => {
            for tool in &page.tools {
                println!("{}", OutputStyle::format_tool_simple(tool));
            }
            Ok(())
        }
        ListFormat::Table => {
            let body = if args.group {
                render_grouped(&page.tools)
            } else {
                OutputStyle::format_tool_table(&page.tools)
            };
            print_or_page(&format!("{}\n{}", body, page_footer(&page)))
        }
    }
}

fn local_page(matches: Vec<Tool>, page: usize, page_size: usize, all: bool) -> InventoryPage {
    let total = matches.len();
    if all {
        return InventoryPage {
            tools: matches,
            total,
            page: 1,
            page_size: total,
        };
    }
    InventoryPage {
        tools: paginate(&matches, page, page_size),
        total,
        page,
        page_size,
    }
}

fn render_grouped(tools: &[Tool]) -> String {
    group_by_category(tools)
        .into_iter()
        .map(|(category, members)| {
            format!(
                "{} ({})\n{}",
                OutputStyle::title(&category),
                members.len(),
                OutputStyle::format_tool_table(&members)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn page_footer(page: &InventoryPage) -> String {
    OutputStyle::muted(&format!(
        "Page {} of {} · {} tools",
        page.page,
        page_count(page.total, page.page_size).max(1),
        page.total
    ))
    .to_string()
}

pub async fn handle_show_command(
    service: &DashboardService,
    session: &Session,
    args: &ShowArgs,
) -> AppResult<()> {
    let tool = service.get_tool_by_id(session, &args.id).await?;

    if args.json {
        return OutputStyle::print_json(&tool);
    }

    OutputStyle::print_tool_detailed(&tool);
    Ok(())
}

pub async fn handle_recommendations_command(
    service: &DashboardService,
    args: &RecommendationsArgs,
) -> AppResult<()> {
    let recommendations = service.get_recommendations().await?;

    if recommendations.is_empty() {
        handle_flow(FlowResult::EmptyList {
            item_type: "recommendations".to_string(),
        });
        return Ok(());
    }

    match args.format.unwrap_or_default() {
        ListFormat::Json => OutputStyle::print_json(&recommendations),
        ListFormat::Simple => {
            for reco in &recommendations {
                println!(
                    "{} {} {}",
                    OutputStyle::muted(&reco.id),
                    OutputStyle::priority(reco.priority),
                    reco.title
                );
            }
            Ok(())
        }
        ListFormat::Table => {
            for (index, reco) in recommendations.iter().enumerate() {
                if index > 0 {
                    println!("{}", OutputStyle::separator());
                }
                OutputStyle::print_recommendation(reco);
            }
            Ok(())
        }
    }
}

pub async fn handle_benchmarks_command(
    service: &DashboardService,
    session: &Session,
    args: &BenchmarksArgs,
) -> AppResult<()> {
    let report = service.get_benchmarks(session).await?;

    if args.json {
        return OutputStyle::print_json(&report);
    }

    StatsCalculator::print_benchmarks(&report);
    Ok(())
}

pub fn handle_personas_command(session: &Session) -> AppResult<()> {
    println!("{}", OutputStyle::title("🎭 Personas"));
    for persona in Persona::ALL {
        let marker = if persona == session.persona() { "▶" } else { " " };
        println!(
            "{} {:<11} {}",
            marker,
            OutputStyle::header(persona.as_str()),
            OutputStyle::muted(persona.summary())
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::Dataset;
    use crate::utils::search::{SortDirection, SortField};
    use chrono::Utc;

    fn startup_tools() -> Vec<Tool> {
        Dataset::bundled().unwrap().tools(Persona::Startup, Utc::now())
    }

    #[test]
    fn test_local_page_slices_sorted_matches() {
        let mut tools = startup_tools();
        SearchEngine::sort(&mut tools, SortField::Cost, SortDirection::Desc);
        let page = local_page(tools, 1, 2, false);
        assert_eq!(page.total, 6);
        assert_eq!(page.tools.len(), 2);
        assert_eq!(page.tools[0].annual_cost_usd, 48_000.0);
        assert_eq!(page.tools[1].annual_cost_usd, 36_000.0);
    }

    #[test]
    fn test_local_page_all() {
        let page = local_page(startup_tools(), 3, 2, true);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 6);
        assert_eq!(page.tools.len(), 6);
    }

    #[test]
    fn test_grouped_rendering_lists_each_category_once() {
        colored::control::set_override(false);
        let rendered = render_grouped(&startup_tools());
        assert_eq!(rendered.matches("SCA (2)").count(), 1);
        assert_eq!(rendered.matches("SIEM (1)").count(), 1);
    }
}
