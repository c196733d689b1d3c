// Command handlers
pub mod config; // Configuration management
pub mod crud; // Simulated mutations and onboarding
pub mod query; // Dashboard and inventory queries
pub mod report; // Playbooks and exports

pub use config::handle_config_command;
pub use crud::{
    handle_add_command, handle_delete_command, handle_onboard_command,
    handle_test_integration_command, handle_update_command,
};
pub use query::{
    handle_benchmarks_command, handle_dashboard_command, handle_inventory_command,
    handle_personas_command, handle_recommendations_command, handle_show_command,
};
pub use report::{handle_export_command, handle_playbook_command};
