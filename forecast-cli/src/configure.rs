use anyhow::{Context, Result};
use forecast_core::{Config, TimeConverter, Units};
use inquire::{Password, Select, Text, validator::Validation};

/// Interactive `forecast configure`.
pub fn run() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("Weather API key:")
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()
        .context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        config.api_key = Some(api_key.trim().to_string());
    }

    let current_address = config.default_address.clone().unwrap_or_default();
    let address = Text::new("Default address:")
        .with_default(&current_address)
        .prompt()
        .context("Failed to read default address")?;
    config.default_address = Some(address.trim().to_string()).filter(|a| !a.is_empty());

    let start = Units::all().iter().position(|u| *u == config.units).unwrap_or(0);
    config.units = Select::new("Temperature units:", Units::all().to_vec())
        .with_starting_cursor(start)
        .prompt()
        .context("Failed to read units")?;

    let current_offset = config.utc_offset.clone().unwrap_or_default();
    let offset = Text::new("UTC offset for timestamps (e.g. -08:00):")
        .with_default(&current_offset)
        .with_help_message("Leave empty to use the offset reported for the location")
        .with_validator(|input: &str| {
            if input.trim().is_empty() || TimeConverter::parse_offset(input).is_ok() {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid("Expected e.g. +05:30, -08:00 or UTC".into()))
            }
        })
        .prompt()
        .context("Failed to read UTC offset")?;
    config.utc_offset = Some(offset.trim().to_string()).filter(|o| !o.is_empty());

    let path = config.save()?;
    log::info!("saved configuration to {}", path.display());
    println!("Configuration saved to {}", path.display());

    if config.api_key().is_none() {
        println!("Note: no API key is set yet; forecasts will fail until one is configured.");
    }

    Ok(())
}
