//! Read-only queries over installed extensions

use std::collections::BTreeMap;

use colored::Colorize;
use extman_core::{InstalledExtension, SettingValue};

use crate::context::Context;
use crate::error::{CliError, Result};

pub fn run_list(context: &Context, json: bool) -> Result<()> {
    let manager = context.manager()?;
    let installed = manager.get_installed();

    if json {
        let records = installed
            .keys()
            .map(|name| -> Result<(String, InstalledExtension)> {
                Ok((name.clone(), manager.get_config(name)?))
            })
            .collect::<Result<BTreeMap<String, InstalledExtension>>>()?;
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if installed.is_empty() {
        println!("{}", "No extensions installed.".dimmed());
        return Ok(());
    }

    println!("{}", "Installed Extensions".bold());
    println!();
    for name in installed.keys() {
        let record = manager.get_config(name)?;
        let state = if record.initialized {
            "enabled".green()
        } else {
            "disabled".yellow()
        };
        println!(
            "  {:<24} {:<7} {:<9} {} > {}",
            name.cyan(),
            record.tier.as_str(),
            state,
            record.parent,
            record.menu_item
        );
    }
    Ok(())
}

pub fn run_show(context: &Context, name: &str, json: bool) -> Result<()> {
    let manager = context.manager()?;
    let record = manager.get_config(name)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!("{}", record.name.cyan().bold());
    let rows = [
        ("main", record.main.clone()),
        ("settings", record.settings.clone()),
        ("toolbar", record.toolbar.clone()),
        ("tests", record.tests.clone()),
        ("parent", record.parent.clone()),
        ("menu_item", record.menu_item.clone()),
        ("menu_level", record.menu_level.to_string()),
        ("type", record.tier.to_string()),
        ("initialized", record.initialized.to_string()),
    ];
    for (key, value) in rows {
        println!("  {:<12} {}", key.bold(), value);
    }
    Ok(())
}

pub fn run_get(context: &Context, name: &str, key: &str) -> Result<()> {
    let manager = context.manager()?;
    let value = match key {
        "type" => manager.get_config(name)?.tier.to_string(),
        "initialized" => manager.get_config(name)?.initialized.to_string(),
        _ => manager.get_property(name, key)?.to_string(),
    };
    println!("{value}");
    Ok(())
}

pub fn run_find(context: &Context, key: &str, value: &str) -> Result<()> {
    let manager = context.manager()?;
    let names = manager.get_extension_from_property(key, &SettingValue::from(value))?;
    if names.is_empty() {
        return Err(CliError::user(format!(
            "no installed extension has {key} = {value}"
        )));
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}
