// Mutation operations - add, update, delete, test-integration, onboard
//
// Every mutation is simulated: results are shown but never stored.

use crate::cli::{AddArgs, DeleteArgs, OnboardArgs, TestIntegrationArgs, UpdateArgs};
use crate::core::data::{
    CredentialType, Credentials, DocumentType, IntegrationType, Session, Tool, ToolDraft,
};
use crate::core::onboarding::{NewIntegration, OnboardingSession, OnboardingStep};
use crate::core::operations::DashboardService;
use crate::core::traits::{DashboardQuery, ToolMutation};
use crate::utils::error::{AppResult, FlowResult, handle_flow};
use crate::utils::format::format_currency;
use crate::utils::interactive::{
    prompt_input, prompt_list, prompt_optional, prompt_parsed, prompt_yes_no,
};
use crate::utils::output::{OutputStyle, print_warning};
use chrono::Utc;

const NOT_SAVED: &str = "Simulated change: nothing was saved";

fn print_tool_result(tool: &Tool, json: bool) -> AppResult<()> {
    if json {
        return OutputStyle::print_json(tool);
    }
    OutputStyle::print_tool_detailed(tool);
    println!();
    print_warning(NOT_SAVED);
    Ok(())
}

pub async fn handle_add_command(service: &DashboardService, args: AddArgs) -> AppResult<()> {
    let tool = service.add_tool(args.fields.into_draft()).await?;
    if !args.json {
        handle_flow(FlowResult::Success(format!("Tool '{}' created as {}", tool.name, tool.id)));
    }
    print_tool_result(&tool, args.json)
}

pub async fn handle_update_command(
    service: &DashboardService,
    session: &Session,
    args: UpdateArgs,
) -> AppResult<()> {
    let tool = service
        .update_tool(session, &args.id, args.fields.into_draft())
        .await?;
    if !args.json {
        handle_flow(FlowResult::Success(format!("Tool '{}' updated", tool.id)));
    }
    print_tool_result(&tool, args.json)
}

pub async fn handle_delete_command(
    service: &DashboardService,
    session: &Session,
    args: &DeleteArgs,
) -> AppResult<()> {
    if !args.force {
        let label = match service.get_tool_by_id(session, &args.id).await {
            Ok(tool) => format!("{} ({})", tool.name, tool.id),
            Err(e) if e.is_not_found() => args.id.clone(),
            Err(e) => return Err(e),
        };
        if !prompt_yes_no(&format!("Delete tool '{}'?", label))? {
            handle_flow(FlowResult::Cancelled("Deletion cancelled".to_string()));
            return Ok(());
        }
    }

    service.delete_tool(&args.id).await?;
    handle_flow(FlowResult::Success(format!("Tool '{}' deleted", args.id)));
    print_warning(NOT_SAVED);
    Ok(())
}

pub async fn handle_test_integration_command(
    service: &DashboardService,
    args: &TestIntegrationArgs,
) -> AppResult<()> {
    println!(
        "{}",
        OutputStyle::muted(&format!(
            "Testing integration {} on tool {}...",
            args.integration_id, args.tool_id
        ))
    );
    let result = service
        .test_integration(&args.tool_id, &args.integration_id)
        .await?;
    OutputStyle::print_integration_result(&result);
    Ok(())
}

enum Navigation {
    Next,
    Back,
    Quit,
}

fn prompt_navigation(wizard: &OnboardingSession) -> AppResult<Navigation> {
    let hint = if wizard.is_first_step() {
        "[Enter] next, [q] quit: "
    } else {
        "[Enter] next, [b] back, [q] quit: "
    };
    loop {
        match prompt_input(hint)?.to_lowercase().as_str() {
            "" | "n" | "next" => return Ok(Navigation::Next),
            "b" | "back" => return Ok(Navigation::Back),
            "q" | "quit" => return Ok(Navigation::Quit),
            _ => println!("Please enter 'n', 'b' or 'q'"),
        }
    }
}

pub async fn handle_onboard_command(service: &DashboardService, args: &OnboardArgs) -> AppResult<()> {
    let mut wizard = OnboardingSession::new(Utc::now());
    OutputStyle::print_header("🧭 Tool Onboarding");
    println!("{}", OutputStyle::muted(&format!("Session {}", wizard.id())));

    loop {
        println!();
        println!("{}", OutputStyle::title(&wizard.step().to_string()));
        println!("{}", OutputStyle::separator());

        match wizard.step() {
            OnboardingStep::BasicInfo => collect_basic_info(&mut wizard)?,
            OnboardingStep::Documents => collect_documents(&mut wizard, args)?,
            OnboardingStep::Integration => collect_integrations(&mut wizard, args)?,
            OnboardingStep::Testing => run_integration_tests(service, &mut wizard).await?,
            OnboardingStep::Review => {
                print_review(&wizard);
                if prompt_yes_no("Submit this tool?")? {
                    let tool = service.add_tool(wizard.submit()).await?;
                    handle_flow(FlowResult::Success(format!(
                        "Tool '{}' onboarded as {}",
                        tool.name, tool.id
                    )));
                    return print_tool_result(&tool, args.json);
                }
            }
        }

        match prompt_navigation(&wizard)? {
            Navigation::Next if wizard.is_last_step() => {
                println!("{}", OutputStyle::muted("Already on the last step"));
            }
            Navigation::Next => {
                wizard.next();
            }
            Navigation::Back => {
                wizard.previous();
            }
            Navigation::Quit => {
                handle_flow(FlowResult::Cancelled("Onboarding cancelled".to_string()));
                return Ok(());
            }
        }
    }
}

fn collect_basic_info(wizard: &mut OnboardingSession) -> AppResult<()> {
    println!("{}", OutputStyle::muted("Leave a field blank to keep its current value."));
    let info = ToolDraft {
        name: prompt_optional("Tool name: ")?,
        vendor: prompt_optional("Vendor: ")?,
        category: prompt_optional("Category: ")?,
        annual_cost_usd: prompt_parsed::<f64>("Annual cost (USD): ")?,
        license_type: prompt_optional("License type: ")?,
        agents_installed: prompt_parsed::<u32>("Agents installed: ")?,
        utilisation_percent: prompt_parsed::<f64>("Utilization %: ")?,
        overlap_tags: prompt_list("Overlap tags (comma separated): ")?,
        controls_covered: prompt_list("Controls covered (comma separated): ")?,
        renew_date: prompt_optional("Renewal date (YYYY-MM-DD): ")?,
        contract_terms: prompt_optional("Contract terms: ")?,
        owner_id: prompt_optional("Owner ID: ")?,
        ..Default::default()
    };
    wizard.update_basic_info(info);
    Ok(())
}

fn collect_documents(wizard: &mut OnboardingSession, args: &OnboardArgs) -> AppResult<()> {
    let default_kind = args.document_type.unwrap_or(DocumentType::Other);
    let mut rng = rand::rng();
    while let Some(name) = prompt_optional("Document name (blank to finish): ")? {
        let kind = prompt_parsed::<DocumentType>("Type (contract/sla/sow/license/other): ")?
            .unwrap_or(default_kind);
        let size = prompt_parsed::<u64>("Size in bytes: ")?.unwrap_or_default();
        let document = wizard.add_document(&name, kind, size, Utc::now(), &mut rng);
        println!("  {} {}", OutputStyle::success("added"), OutputStyle::muted(&document.id));
    }

    if !wizard.documents().is_empty() {
        if let Some(id) = prompt_optional("Remove a document by ID (blank to skip): ")? {
            if !wizard.remove_document(&id) {
                handle_flow(FlowResult::NotFound {
                    item_type: "Document".to_string(),
                    search_term: id,
                });
            }
        }
    }
    Ok(())
}

fn collect_integrations(wizard: &mut OnboardingSession, args: &OnboardArgs) -> AppResult<()> {
    let default_kind = args.integration_type.unwrap_or(IntegrationType::Api);
    let mut rng = rand::rng();
    while let Some(name) = prompt_optional("Integration name (blank to finish): ")? {
        let kind = prompt_parsed::<IntegrationType>(
            "Type (api/log_source/webhook/database/file_upload): ",
        )?
        .unwrap_or(default_kind);
        let endpoint = prompt_input("Endpoint: ")?;
        let integration = NewIntegration {
            name,
            kind,
            endpoint,
            credentials: Credentials {
                kind: CredentialType::ApiKey,
                encrypted: false,
            },
        };
        let added = wizard.add_integration(integration, Utc::now(), &mut rng);
        println!("  {} {}", OutputStyle::success("added"), OutputStyle::muted(&added.id));
    }

    if !wizard.integrations().is_empty() {
        if let Some(id) = prompt_optional("Remove an integration by ID (blank to skip): ")? {
            if !wizard.remove_integration(&id) {
                handle_flow(FlowResult::NotFound {
                    item_type: "Integration".to_string(),
                    search_term: id,
                });
            }
        }
    }
    Ok(())
}

async fn run_integration_tests(
    service: &DashboardService,
    wizard: &mut OnboardingSession,
) -> AppResult<()> {
    if wizard.integrations().is_empty() {
        handle_flow(FlowResult::EmptyList {
            item_type: "integrations to test".to_string(),
        });
        return Ok(());
    }

    let ids: Vec<(String, String)> = wizard
        .integrations()
        .iter()
        .map(|i| (i.id.clone(), i.name.clone()))
        .collect();
    let tool_id = wizard.id().to_string();

    for (id, name) in ids {
        println!("{} {}", OutputStyle::label("Testing"), name);
        let result = service.test_integration(&tool_id, &id).await?;
        OutputStyle::print_integration_result(&result);
        wizard.record_test_result(&id, result, Utc::now())?;
    }
    Ok(())
}

fn print_review(wizard: &OnboardingSession) {
    let draft = wizard.draft();
    let text = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    OutputStyle::print_field_colored("Name", &text(&draft.name), OutputStyle::header);
    OutputStyle::print_field_colored("Vendor", &text(&draft.vendor), OutputStyle::content);
    OutputStyle::print_field_colored("Category", &text(&draft.category), OutputStyle::tags);
    OutputStyle::print_field_colored(
        "Annual cost",
        &format_currency(draft.annual_cost_usd.unwrap_or_default()),
        OutputStyle::money,
    );
    OutputStyle::print_field_colored(
        "Documents",
        &wizard.documents().len().to_string(),
        OutputStyle::content,
    );

    let tested = wizard
        .integrations()
        .iter()
        .filter(|i| wizard.test_result(&i.id).is_some())
        .count();
    OutputStyle::print_field_colored(
        "Integrations",
        &format!("{} ({} tested)", wizard.integrations().len(), tested),
        OutputStyle::content,
    );
}
