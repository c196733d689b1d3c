use crate::config::Config;
use crate::core::data::{DocumentType, IntegrationType, Persona, Session, ToolDraft, ToolStatus};
use crate::core::operations::DashboardService;
use crate::manager;
use crate::utils::error::AppResult;
use crate::utils::export::ExportFormat;
use crate::utils::interactive::split_list;
use crate::utils::search::{SortDirection, SortField};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "tooldebt")]
#[command(about = "Security tool debt dashboard over bundled persona datasets")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Verbose diagnostic logging on stderr")]
    pub debug: bool,

    #[arg(short, long, global = true, help = "Persona dataset to use (startup, midmarket, enterprise)")]
    pub persona: Option<Persona>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Config file in effect: `--config` or the default location
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::config_file_path)
    }

    /// Session for this invocation: `--persona` wins over the configured default
    pub fn session(&self, config: &Config) -> Session {
        Session::new(self.persona.unwrap_or(config.general.default_persona))
    }
}

impl Commands {
    pub async fn execute(self, config: Config, config_path: &Path, session: Session) -> AppResult<()> {
        match self {
            Commands::Config(args) => manager::handle_config_command(&config, config_path, args.command),
            Commands::Personas => manager::handle_personas_command(&session),
            command => {
                let service = DashboardService::from_config(&config)?;
                command.run(&service, &config, &session).await
            }
        }
    }

    async fn run(self, service: &DashboardService, config: &Config, session: &Session) -> AppResult<()> {
        match self {
            Commands::Dashboard(args) => manager::handle_dashboard_command(service, session, &args).await,
            Commands::Inventory(args) => {
                manager::handle_inventory_command(service, config, session, &args).await
            }
            Commands::Show(args) => manager::handle_show_command(service, session, &args).await,
            Commands::Recommendations(args) => {
                manager::handle_recommendations_command(service, &args).await
            }
            Commands::Benchmarks(args) => manager::handle_benchmarks_command(service, session, &args).await,
            Commands::Playbook(args) => manager::handle_playbook_command(service, &args).await,
            Commands::Export(args) => manager::handle_export_command(service, session, &args).await,
            Commands::Add(args) => manager::handle_add_command(service, args).await,
            Commands::Update(args) => manager::handle_update_command(service, session, args).await,
            Commands::Delete(args) => manager::handle_delete_command(service, session, &args).await,
            Commands::TestIntegration(args) => {
                manager::handle_test_integration_command(service, &args).await
            }
            Commands::Onboard(args) => manager::handle_onboard_command(service, &args).await,
            Commands::Config(_) | Commands::Personas => Ok(()),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Company overview, debt score and headline spend figures
    Dashboard(DashboardArgs),

    /// List, filter and page through the tool inventory
    Inventory(InventoryArgs),

    /// Show tool details
    Show(ShowArgs),

    /// List consolidation recommendations
    Recommendations(RecommendationsArgs),

    /// Industry benchmark percentiles
    Benchmarks(BenchmarksArgs),

    /// Build a migration playbook from a recommendation
    Playbook(PlaybookArgs),

    /// Export the inventory report
    Export(ExportArgs),

    /// Add a tool (simulated, nothing is stored)
    Add(AddArgs),

    /// Update a tool (simulated, nothing is stored)
    Update(UpdateArgs),

    /// Delete a tool (simulated, nothing is stored)
    Delete(DeleteArgs),

    /// Run a simulated connectivity check
    TestIntegration(TestIntegrationArgs),

    /// Step through the tool onboarding wizard
    Onboard(OnboardArgs),

    /// List the available personas
    Personas,

    /// Configuration management
    Config(ConfigArgs),
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListFormat {
    #[default]
    Table,
    Simple,
    Json,
}

#[derive(Args)]
pub struct DashboardArgs {
    #[arg(long, help = "Print raw JSON")]
    pub json: bool,

    #[arg(long, help = "Also list owners")]
    pub owners: bool,
}

#[derive(Args)]
pub struct InventoryArgs {
    #[arg(short = 'c', long, help = "Exact category match")]
    pub category: Option<String>,

    #[arg(short, long, help = "Case-insensitive match on name, vendor or category")]
    pub search: Option<String>,

    #[arg(long, help = "Minimum annual cost (inclusive)")]
    pub min_cost: Option<f64>,

    #[arg(long, help = "Maximum annual cost (inclusive)")]
    pub max_cost: Option<f64>,

    #[arg(long, default_value_t = 1)]
    pub page: usize,

    #[arg(long, help = "Rows per page (defaults to the configured page size)")]
    pub page_size: Option<usize>,

    #[arg(long, help = "Show every matching tool on one page")]
    pub all: bool,

    #[arg(long, value_enum)]
    pub sort: Option<SortField>,

    #[arg(long, value_enum, default_value = "desc")]
    pub direction: SortDirection,

    #[arg(short, long, value_enum)]
    pub format: Option<ListFormat>,

    #[arg(long, help = "Print inventory summary figures")]
    pub summary: bool,

    #[arg(long, help = "Show all available categories")]
    pub categories: bool,

    #[arg(long, help = "Group the page by category")]
    pub group: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    #[arg(help = "Tool ID")]
    pub id: String,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct RecommendationsArgs {
    #[arg(short, long, value_enum)]
    pub format: Option<ListFormat>,
}

#[derive(Args)]
pub struct BenchmarksArgs {
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct PlaybookArgs {
    #[arg(help = "Recommendation ID (pick interactively when omitted)")]
    pub recommendation_id: Option<String>,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
    pub format: ExportFormat,

    #[arg(short, long, value_name = "FILE", help = "Output file (defaults to the suggested report name)")]
    pub output: Option<PathBuf>,
}

/// Tool fields shared by `add` and `update`
#[derive(Args, Clone, Default)]
pub struct ToolFieldArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub vendor: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long, help = "Annual cost in USD")]
    pub cost: Option<f64>,

    #[arg(long)]
    pub license: Option<String>,

    #[arg(long)]
    pub agents: Option<u32>,

    #[arg(long, help = "Utilization percentage (0-100)")]
    pub utilization: Option<f64>,

    #[arg(long, help = "Comma separated overlap tags")]
    pub overlap_tags: Option<String>,

    #[arg(long, help = "Comma separated controls covered")]
    pub controls: Option<String>,

    #[arg(long)]
    pub renew_date: Option<String>,

    #[arg(long)]
    pub contract: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    #[arg(long, help = "Risk coverage score (0-1)")]
    pub risk_coverage: Option<f64>,

    #[arg(long, help = "Overlap score (0-1)")]
    pub overlap_score: Option<f64>,

    #[arg(long)]
    pub owner: Option<String>,

    #[arg(long, value_parser = parse_tool_status)]
    pub status: Option<ToolStatus>,
}

fn parse_tool_status(s: &str) -> Result<ToolStatus, String> {
    match s.trim().to_lowercase().as_str() {
        "active" => Ok(ToolStatus::Active),
        "pending" => Ok(ToolStatus::Pending),
        "inactive" => Ok(ToolStatus::Inactive),
        "onboarding" => Ok(ToolStatus::Onboarding),
        other => Err(format!("Invalid tool status: {}", other)),
    }
}

impl ToolFieldArgs {
    pub fn into_draft(self) -> ToolDraft {
        ToolDraft {
            name: self.name,
            vendor: self.vendor,
            category: self.category,
            annual_cost_usd: self.cost,
            license_type: self.license,
            agents_installed: self.agents,
            utilisation_percent: self.utilization,
            overlap_tags: self.overlap_tags.as_deref().map(split_list),
            controls_covered: self.controls.as_deref().map(split_list),
            renew_date: self.renew_date,
            contract_terms: self.contract,
            demo_notes: self.notes,
            risk_coverage: self.risk_coverage,
            overlap_score: self.overlap_score,
            owner_id: self.owner,
            status: self.status,
            ..Default::default()
        }
    }
}

#[derive(Args)]
pub struct AddArgs {
    #[command(flatten)]
    pub fields: ToolFieldArgs,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct UpdateArgs {
    #[arg(help = "Tool ID")]
    pub id: String,

    #[command(flatten)]
    pub fields: ToolFieldArgs,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct DeleteArgs {
    #[arg(help = "Tool ID")]
    pub id: String,

    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args)]
pub struct TestIntegrationArgs {
    #[arg(help = "Tool ID")]
    pub tool_id: String,

    #[arg(help = "Integration ID")]
    pub integration_id: String,
}

#[derive(Args)]
pub struct OnboardArgs {
    #[arg(long, help = "Default document type for uploads")]
    pub document_type: Option<DocumentType>,

    #[arg(long, help = "Default integration type")]
    pub integration_type: Option<IntegrationType>,

    #[arg(long, help = "Print the resulting tool as JSON")]
    pub json: bool,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommands>,
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset {
        #[arg(short, long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tooldebt", "inventory", "--persona", "startup", "--debug"])
            .unwrap();
        assert_eq!(cli.persona, Some(Persona::Startup));
        assert!(cli.debug);
        assert!(matches!(cli.command, Commands::Inventory(_)));
    }

    #[test]
    fn test_session_prefers_flag() {
        let config = Config::default();
        let cli = Cli::try_parse_from(["tooldebt", "dashboard"]).unwrap();
        assert_eq!(cli.session(&config).persona(), Persona::Enterprise);

        let cli = Cli::try_parse_from(["tooldebt", "-p", "midmarket", "dashboard"]).unwrap();
        assert_eq!(cli.session(&config).persona(), Persona::Midmarket);
    }

    #[test]
    fn test_invalid_persona_rejected() {
        assert!(Cli::try_parse_from(["tooldebt", "-p", "smb", "dashboard"]).is_err());
    }

    #[test]
    fn test_inventory_args() {
        let cli = Cli::try_parse_from([
            "tooldebt",
            "inventory",
            "-c",
            "SIEM",
            "--min-cost",
            "1000",
            "--sort",
            "cost",
            "--direction",
            "asc",
            "--page",
            "2",
        ])
        .unwrap();
        let Commands::Inventory(args) = cli.command else {
            panic!("expected inventory");
        };
        assert_eq!(args.category.as_deref(), Some("SIEM"));
        assert_eq!(args.min_cost, Some(1000.0));
        assert_eq!(args.sort, Some(SortField::Cost));
        assert_eq!(args.direction, SortDirection::Asc);
        assert_eq!(args.page, 2);
        assert_eq!(args.page_size, None);
    }

    #[test]
    fn test_tool_fields_into_draft() {
        let cli = Cli::try_parse_from([
            "tooldebt",
            "update",
            "st-001",
            "--cost",
            "5000",
            "--overlap-tags",
            "edr, siem",
            "--status",
            "inactive",
        ])
        .unwrap();
        let Commands::Update(args) = cli.command else {
            panic!("expected update");
        };
        let draft = args.fields.into_draft();
        assert_eq!(draft.annual_cost_usd, Some(5000.0));
        assert_eq!(draft.overlap_tags, Some(vec!["edr".to_string(), "siem".to_string()]));
        assert_eq!(draft.status, Some(ToolStatus::Inactive));
        assert_eq!(draft.name, None);
    }

    #[test]
    fn test_export_defaults_to_csv() {
        let cli = Cli::try_parse_from(["tooldebt", "export"]).unwrap();
        let Commands::Export(args) = cli.command else {
            panic!("expected export");
        };
        assert_eq!(args.format, ExportFormat::Csv);
        assert!(args.output.is_none());
    }

    #[test]
    fn test_config_reset_flag() {
        let cli = Cli::try_parse_from(["tooldebt", "config", "reset", "--yes"]).unwrap();
        let Commands::Config(args) = cli.command else {
            panic!("expected config");
        };
        assert!(matches!(args.command, Some(ConfigCommands::Reset { yes: true })));
    }
}
