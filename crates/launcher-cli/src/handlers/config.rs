//! Config command handler.

use anyhow::Result;

use launcher_core::Configuration;

use crate::bootstrap::CliContext;
use crate::config_commands::ConfigCommand;
use crate::error::CliError;

/// Execute the config command.
pub async fn execute(ctx: &CliContext, command: ConfigCommand) -> Result<()> {
    let service = ctx.config();

    match command {
        ConfigCommand::Show { json } => {
            let config = service.load_or_init().await.map_err(CliError::from)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print_configuration(&config);
            }
        }
        ConfigCommand::SetPictures { path } => {
            let config = service.set_pictures_root(&path).await.map_err(CliError::from)?;
            println!("✓ Pictures folder set to: {}", config.pictures_root.display());
            println!("Takes effect on the next server start.");
        }
        ConfigCommand::SetData { path } => {
            let config = service.set_data_root(&path).await.map_err(CliError::from)?;
            println!("✓ Data folder set to: {}", config.data_root.display());
            println!("Takes effect on the next server start.");
        }
        ConfigCommand::SetAutoStart { enabled } => {
            service.set_auto_start(enabled).await.map_err(CliError::from)?;
            if enabled {
                println!("✓ Server will start when the launcher opens.");
            } else {
                println!("✓ Server will not start automatically.");
            }
        }
    }

    Ok(())
}

fn print_configuration(config: &Configuration) {
    println!("Pictures folder:   {}", config.pictures_root.display());
    println!("Data folder:       {}", config.data_root.display());
    println!(
        "Start on launch:   {}",
        if config.auto_start_on_launch { "yes" } else { "no" }
    );
}
