//! Profile command implementation.

use crate::cli::{ProfileAction, ProfileArgs};
use crate::config::{Config, Profile};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the profile command, persisting changes to `config_path`.
pub async fn execute_profile(
    args: ProfileArgs,
    config: &mut Config,
    config_path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ProfileAction::List => list_profiles(config, formatter),
        ProfileAction::Show => show_active_profile(config, formatter),
        ProfileAction::Switch { name } => {
            switch_profile(config, name, formatter)?;
            config.save_to(config_path)
        }
        ProfileAction::Set {
            name,
            endpoint,
            model,
            api_key_env,
        } => {
            set_profile(config, name, endpoint, model, api_key_env, formatter);
            config.save_to(config_path)
        }
        ProfileAction::Delete { name } => {
            if delete_profile(config, name, formatter)? {
                config.save_to(config_path)?;
            }
            Ok(())
        }
    }
}

/// List all profiles.
fn list_profiles(config: &Config, formatter: &Formatter) -> Result<()> {
    if config.profiles.is_empty() {
        println!("{}", formatter.info("No profiles configured"));
        return Ok(());
    }

    println!("Available profiles:");
    for (name, profile) in &config.profiles {
        if name == &config.active_profile {
            println!("* {}", formatter.success(name));
        } else {
            println!("  {}", name);
        }
        print_profile(profile, "    ");
    }

    Ok(())
}

/// Show the active profile.
fn show_active_profile(config: &Config, formatter: &Formatter) -> Result<()> {
    let profile = config.get_active_profile()?;

    println!("Active profile: {}", formatter.success(&config.active_profile));
    print_profile(profile, "  ");

    Ok(())
}

fn print_profile(profile: &Profile, indent: &str) {
    println!("{}Endpoint: {}", indent, profile.endpoint);
    println!("{}Model: {}", indent, profile.model);
    println!("{}API key variable: {}", indent, profile.api_key_env);
    if let Some(temperature) = profile.temperature {
        println!("{}Temperature: {}", indent, temperature);
    }
}

/// Switch to a different profile.
fn switch_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    config.switch_profile(name.clone())?;
    println!(
        "{}",
        formatter.success(&format!("Switched to profile '{}'", name))
    );
    Ok(())
}

/// Create or update a profile.
fn set_profile(
    config: &mut Config,
    name: String,
    endpoint: String,
    model: String,
    api_key_env: String,
    formatter: &Formatter,
) {
    let temperature = config.profiles.get(&name).and_then(|p| p.temperature);
    let profile = Profile {
        endpoint,
        model,
        api_key_env,
        temperature,
    };

    let action = if config.profiles.contains_key(&name) {
        "Updated"
    } else {
        "Created"
    };

    config.set_profile(name.clone(), profile);

    println!(
        "{}",
        formatter.success(&format!("{} profile '{}'", action, name))
    );
}

/// Delete a profile; returns whether anything was removed.
fn delete_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<bool> {
    if name == config.active_profile {
        return Err(CliError::NotPermitted(
            "Cannot delete the active profile".to_string(),
        ));
    }

    if config.profiles.remove(&name).is_some() {
        println!(
            "{}",
            formatter.success(&format!("Deleted profile '{}'", name))
        );
        Ok(true)
    } else {
        println!(
            "{}",
            formatter.warning(&format!("Profile '{}' does not exist", name))
        );
        Ok(false)
    }
}
