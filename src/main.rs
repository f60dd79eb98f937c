//! gcloud-switcher CLI entry point.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::io;

use gcloud_switcher::commands::{
    BuildInfo, add_configuration, edit_configuration, list_configurations, print_version,
    remove_configuration, show_current, switch_command,
};
use gcloud_switcher::gcloud::GcloudCli;
use gcloud_switcher::prompt::Terminal;
use gcloud_switcher::store::ConfigStore;

#[derive(Parser)]
#[command(name = "gcloud-switcher")]
#[command(author, version, about = "Switch between named gcloud configurations", long_about = None)]
struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all configurations
    List,
    /// Add a new configuration
    Add {
        /// Name for the configuration
        name: String,
        /// GCP project ID (prompted for if omitted)
        #[arg(short, long)]
        project: Option<String>,
        /// Service account to impersonate (optional)
        #[arg(short, long)]
        service_account: Option<String>,
    },
    /// Edit an existing configuration
    Edit {
        /// Configuration name
        name: String,
        /// New project ID
        #[arg(short, long)]
        project: Option<String>,
        /// New service account; pass an empty string to clear it
        #[arg(short, long)]
        service_account: Option<String>,
    },
    /// Remove a configuration
    Remove {
        /// Configuration name
        name: String,
    },
    /// Switch to a configuration
    Switch {
        /// Configuration name (interactive if omitted)
        name: Option<String>,
    },
    /// Show the currently active configuration
    Current,
    /// Print version information
    Version,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let build = BuildInfo::from_build_env();
    let sdk = GcloudCli::new();
    let input = Terminal;

    match cli.command {
        Some(Commands::List) => {
            let store = ConfigStore::load()?;
            list_configurations(&store);
        }
        Some(Commands::Add {
            name,
            project,
            service_account,
        }) => {
            let mut store = ConfigStore::load()?;
            add_configuration(&mut store, &sdk, &input, &name, project, service_account)?;
        }
        Some(Commands::Edit {
            name,
            project,
            service_account,
        }) => {
            let mut store = ConfigStore::load()?;
            edit_configuration(&mut store, &sdk, &input, &name, project, service_account)?;
        }
        Some(Commands::Remove { name }) => {
            let mut store = ConfigStore::load()?;
            remove_configuration(&mut store, &name)?;
        }
        Some(Commands::Switch { name }) => {
            let mut store = ConfigStore::load()?;
            switch_command(&mut store, &sdk, &input, name)?;
        }
        Some(Commands::Current) => {
            let store = ConfigStore::load()?;
            show_current(&store, &sdk)?;
        }
        Some(Commands::Version) => print_version(&build),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
        None => {
            let mut store = ConfigStore::load()?;
            switch_command(&mut store, &sdk, &input, None)?;
        }
    }

    Ok(())
}
