//! Config command: manage connection profiles.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::{Config, Profile};
use crate::error::Result;
use crate::output::Formatter;

/// Execute the config command.
pub fn execute_config(args: ConfigArgs, config: &mut Config, formatter: &Formatter) -> Result<()> {
    match args.action {
        ConfigAction::List => {
            for (name, profile) in &config.profiles {
                let marker = if *name == config.active_profile { "*" } else { " " };
                println!("{} {} -> {}", marker, name, profile.api_url);
            }
        }

        ConfigAction::Set { name, api_url } => {
            config.set_profile(name.clone(), Profile { api_url });
            config.save()?;
            println!("{}", formatter.success(&format!("Profile '{}' saved", name)));
        }

        ConfigAction::Use { name } => {
            config.switch_profile(name.clone())?;
            config.save()?;
            println!("{}", formatter.success(&format!("Switched to profile '{}'", name)));
        }
    }
    Ok(())
}
