//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Default config file name, searched upward from the current directory.
pub const DEFAULT_CONFIG: &str = "theme-assets.toml";

/// Theme asset integration for web application builds
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: theme-assets.toml, searched upward)
    #[arg(short = 'C', long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Copy theme assets and regenerate theme loaders (once per build)
    #[command(visible_alias = "r")]
    Run {
        #[command(flatten)]
        args: ThemeArgs,
    },

    /// List discovered themes and their asset rules without writing anything
    #[command(visible_alias = "l")]
    List {
        #[command(flatten)]
        args: ThemeArgs,
    },
}

/// Shared arguments for Run and List commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ThemeArgs {
    /// Packaged theme root (overrides `themes.jar`)
    #[arg(long, value_hint = clap::ValueHint::DirPath)]
    pub jar: Option<PathBuf>,

    /// Project theme root, repeatable (replaces `themes.projects`)
    #[arg(short, long = "project", value_name = "DIR", value_hint = clap::ValueHint::DirPath)]
    pub projects: Vec<PathBuf>,

    /// Static assets output root (overrides `assets.output`)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Installed packages folder (overrides `assets.node_modules`)
    #[arg(long, value_hint = clap::ValueHint::DirPath)]
    pub node_modules: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl Cli {
    /// Arguments of whichever command was given.
    pub const fn theme_args(&self) -> &ThemeArgs {
        match &self.command {
            Commands::Run { args } | Commands::List { args } => args,
        }
    }
}
