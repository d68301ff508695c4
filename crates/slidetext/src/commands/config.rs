use colored::Colorize;

use slidetext::config::{Config, VALID_KEYS};

use crate::cli::ConfigCommands;

pub fn run(command: ConfigCommands) -> anyhow::Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Path => {
            println!("{}", Config::path()?.display());
            Ok(())
        }
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> anyhow::Result<()> {
    let path = Config::path()?;
    if !path.exists() {
        println!("{}", "No config file yet; showing defaults.".dimmed());
    }
    let config = Config::load_existing(&path)?;

    let template = config.item_template();
    println!("{}", "Defaults for new text".bold());
    println!("  {:<14} {}", "text", template.text);
    println!("  {:<14} {}", "font_size", template.font_size);
    println!("  {:<14} {}", "color", template.color);
    println!("  {:<14} {}", "font_family", template.font_family);
    println!("{}", "Editor".bold());
    println!("  {:<14} {}", "aspect", config.aspect_ratio());
    println!(
        "  {:<14} {}",
        "release_on_focus_loss",
        config.release_on_focus_loss()
    );
    println!();
    println!("{} {}", "Config file:".dimmed(), path.display());
    println!("{} {}", "Valid keys:".dimmed(), VALID_KEYS.join(", "));
    Ok(())
}

fn set(key: &str, value: &str) -> anyhow::Result<()> {
    let path = Config::path()?;
    let mut config = Config::load_existing(&path)
        .map_err(|e| anyhow::anyhow!("{e}; fix or remove {} first", path.display()))?;
    config.set(key, value)?;
    config.save_to(&path)?;
    println!(
        "{} {} = {} ({})",
        "Saved".green().bold(),
        key,
        value,
        path.display()
    );
    Ok(())
}
