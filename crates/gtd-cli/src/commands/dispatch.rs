use gtd_config::GtdConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: &GtdConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Projects => commands::projects::handle(config, flags).await,
        Commands::Tasks(args) => commands::tasks::handle(&args, config, flags).await,
        Commands::Report(args) => commands::report::handle(&args, config, flags).await,
        Commands::Archive(args) => commands::archive::handle(&args, config, flags).await,
        Commands::AssureEntry(args) => commands::assure_entry::handle(&args, config, flags).await,
    }
}
