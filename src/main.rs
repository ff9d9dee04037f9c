//! theme-assets - copy theme assets and generate theme loaders.

use anyhow::Result;
use clap::{ColorChoice, Parser};
use theme_assets::{
    ThemePlugin, ToolConfig,
    cli::{Cli, Commands},
    log,
    logger::TerminalLog,
    utils::plural::plural_count,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = ToolConfig::load(&cli)?;
    let plugin = ThemePlugin::new(config.theme_options());

    match &cli.command {
        Commands::Run { .. } => run(&plugin),
        Commands::List { .. } => list(&plugin),
    }
}

/// Copy assets and regenerate loaders for every theme.
fn run(plugin: &ThemePlugin) -> Result<()> {
    let stats = plugin.run(&TerminalLog::new("theme"))?;
    log!(
        "assets";
        "processed {}, copied {}",
        plural_count(stats.themes, "theme"),
        plural_count(stats.files, "file")
    );
    Ok(())
}

/// Print discovered themes and their asset rules.
fn list(plugin: &ThemePlugin) -> Result<()> {
    let themes = plugin.discover()?;
    if themes.is_empty() {
        log!("theme"; "no themes found");
        return Ok(());
    }

    for found in &themes {
        log!(
            "theme";
            "{} ({}) {}",
            found.theme.name,
            found.kind,
            found.theme.folder.display()
        );
        for rule in &found.rules {
            println!(
                "  {} {} -> {}",
                rule.module, rule.pattern, rule.destination
            );
        }
    }
    Ok(())
}
