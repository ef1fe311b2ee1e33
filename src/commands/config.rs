//! Config command handler.

use std::process::ExitCode;

use restvault::config::RestvaultConfig;

/// Config command.
pub fn cmd_config(config: &RestvaultConfig, show: bool) -> anyhow::Result<ExitCode> {
    if !show {
        println!("Use --show to display current configuration");
        return Ok(ExitCode::SUCCESS);
    }

    println!("Current Configuration");
    println!("=====================");
    println!();
    match &config.config_path {
        Some(path) => println!("Config File: {}", path.display()),
        None => println!("Config File: (none - using defaults)"),
    }
    println!("Database: {}", config.sqlite_path().display());
    println!();
    print!("{}", config.to_toml()?);
    Ok(ExitCode::SUCCESS)
}
