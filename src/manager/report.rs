// Report operations - playbook, export

use crate::cli::{ExportArgs, PlaybookArgs};
use crate::core::data::Session;
use crate::core::operations::DashboardService;
use crate::core::traits::{DashboardQuery, PlaybookPlanner, ReportExporter};
use crate::utils::error::{AppResult, FlowResult, handle_flow};
use crate::utils::format::format_currency;
use crate::utils::interactive::select_from_list;
use crate::utils::output::OutputStyle;
use std::path::PathBuf;

pub async fn handle_playbook_command(service: &DashboardService, args: &PlaybookArgs) -> AppResult<()> {
    let reco_id = match &args.recommendation_id {
        Some(id) => id.clone(),
        None => {
            let recommendations = service.get_recommendations().await?;
            if recommendations.is_empty() {
                handle_flow(FlowResult::EmptyList {
                    item_type: "recommendations".to_string(),
                });
                return Ok(());
            }
            let lines: Vec<String> = recommendations
                .iter()
                .map(|r| {
                    format!(
                        "[{}] {} ({})",
                        r.priority.as_str(),
                        r.title,
                        format_currency(r.estimated_savings)
                    )
                })
                .collect();
            match select_from_list(&lines)? {
                Some(index) => recommendations[index].id.clone(),
                None => {
                    handle_flow(FlowResult::Cancelled("Playbook creation cancelled".to_string()));
                    return Ok(());
                }
            }
        }
    };

    let playbook = service.create_playbook_from_recommendation(&reco_id).await?;

    if args.json {
        return OutputStyle::print_json(&playbook);
    }

    OutputStyle::print_playbook(&playbook);
    Ok(())
}

pub async fn handle_export_command(
    service: &DashboardService,
    session: &Session,
    args: &ExportArgs,
) -> AppResult<()> {
    let blob = service.export_report(session, args.format).await?;
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(args.format.suggested_file_name()));

    std::fs::write(&path, &blob.bytes)?;

    handle_flow(FlowResult::Success(format!(
        "Exported {} bytes ({}) to {}",
        blob.len(),
        blob.media_type,
        path.display()
    )));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LatencyConfig;
    use crate::core::data::Persona;
    use crate::core::dataset::Dataset;
    use crate::utils::export::{CSV_HEADER, ExportFormat};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tempfile::TempDir;

    fn service() -> DashboardService {
        DashboardService::new(
            Dataset::bundled().unwrap(),
            LatencyConfig::disabled(),
            0.8,
            StdRng::seed_from_u64(5),
        )
    }

    #[tokio::test]
    async fn test_export_writes_csv_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inventory.csv");
        let args = ExportArgs {
            format: ExportFormat::Csv,
            output: Some(path.clone()),
        };

        handle_export_command(&service(), &Session::new(Persona::Midmarket), &args)
            .await
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with(CSV_HEADER));
        assert_eq!(content.lines().count(), 11);
    }

    #[tokio::test]
    async fn test_playbook_for_unknown_recommendation_fails() {
        let args = PlaybookArgs {
            recommendation_id: Some("reco-999".to_string()),
            json: true,
        };
        let err = handle_playbook_command(&service(), &args).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
