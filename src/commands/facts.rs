use crate::cli::{Cli, Commands};
use crate::error::Result;
use crate::facts::{
    collect_dmi_info,
    collect_network_info,
    collect_report,
    collect_system_info,
    storage,
};
use crate::output::output_data;

pub fn handle_command(cli: &Cli) -> Result<()> {
    let format = cli.format.as_str();
    let storage_config = cli.storage.to_config();

    match cli.command.unwrap_or(Commands::Gather) {
        Commands::Gather => {
            let report = collect_report(&storage_config)?;
            output_data(&report, format)?;
        }
        Commands::Dmi => {
            let dmi_info = collect_dmi_info()?;
            output_data(&dmi_info, format)?;
        }
        Commands::Network => {
            let network_info = collect_network_info();
            output_data(&network_info, format)?;
        }
        Commands::System => {
            let system_info = collect_system_info();
            output_data(&system_info, format)?;
        }
        Commands::Storage => {
            let storage_info = storage::gather(&storage_config)?;
            output_data(&storage_info, format)?;
        }
    }
    Ok(())
}
