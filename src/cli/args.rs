use crate::domain::command::{Command as HotloadCommand, OutputFormat};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};

/// Command line arguments for Hotload
#[derive(Parser, Debug)]
#[command(
    name = "hotload",
    version = env!("CARGO_PKG_VERSION"),
    about = "Release management for over-the-air mobile app updates",
    long_about = "Manage apps, deployments, collaborators and access keys on a hotload server, and release update content to deployments."
)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress diagnostic logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage access keys
    #[command(name = "access-key")]
    AccessKey(AccessKeyArgs),
    /// Manage apps
    App(AppArgs),
    /// Manage app collaborators
    Collaborator(CollaboratorArgs),
    /// Manage app deployments
    Deployment(DeploymentArgs),
    /// Release update content to a deployment
    Release(ReleaseArgs),
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum FormatArg {
    /// JSON output
    Json,
    /// Table output
    #[default]
    Table,
}

#[derive(ClapArgs, Debug)]
pub struct AccessKeyArgs {
    #[command(subcommand)]
    pub command: AccessKeyCommand,
}

#[derive(ClapArgs, Debug)]
pub struct AppArgs {
    #[command(subcommand)]
    pub command: AppCommand,
}

#[derive(ClapArgs, Debug)]
pub struct CollaboratorArgs {
    #[command(subcommand)]
    pub command: CollaboratorCommand,
}

#[derive(ClapArgs, Debug)]
pub struct DeploymentArgs {
    #[command(subcommand)]
    pub command: DeploymentCommand,
}

/// Release arguments
#[derive(ClapArgs, Debug)]
pub struct ReleaseArgs {
    /// App name
    pub app_name: String,
    /// Path to the update content directory or file
    pub package: String,
    /// Binary app version this update targets
    pub app_store_version: String,
    /// Target deployment
    #[arg(short, long, default_value = "Staging")]
    pub deployment_name: String,
    /// Release description
    #[arg(long = "des")]
    pub description: Option<String>,
    /// Require clients to install this update
    #[arg(short, long)]
    pub mandatory: bool,
}

/// Access key subcommands
#[derive(Subcommand, Debug)]
pub enum AccessKeyCommand {
    /// Create a new access key
    Add {
        /// Key description
        description: Option<String>,
    },
    /// List access keys
    #[command(alias = "ls")]
    List {
        #[arg(long, value_enum, default_value = "table")]
        format: FormatArg,
    },
    /// Remove an access key
    #[command(alias = "rm")]
    Remove {
        /// Access key to remove
        access_key: String,
    },
}

/// App subcommands
#[derive(Subcommand, Debug)]
pub enum AppCommand {
    /// Register a new app
    Add {
        app_name: String,
    },
    /// List apps
    #[command(alias = "ls")]
    List {
        #[arg(long, value_enum, default_value = "table")]
        format: FormatArg,
    },
    /// Remove an app
    #[command(alias = "rm")]
    Remove {
        app_name: String,
    },
    /// Rename an app
    #[command(alias = "mv")]
    Rename {
        current_app_name: String,
        new_app_name: String,
    },
    /// Transfer ownership of an app
    Transfer {
        app_name: String,
        /// E-mail of the new owner
        email: String,
    },
}

/// Collaborator subcommands
#[derive(Subcommand, Debug)]
pub enum CollaboratorCommand {
    /// Add a collaborator to an app
    Add {
        app_name: String,
        email: String,
    },
    /// List collaborators of an app
    #[command(alias = "ls")]
    List {
        app_name: String,
        #[arg(long, value_enum, default_value = "table")]
        format: FormatArg,
    },
    /// Remove a collaborator from an app
    #[command(alias = "rm")]
    Remove {
        app_name: String,
        email: String,
    },
}

/// Deployment subcommands
#[derive(Subcommand, Debug)]
pub enum DeploymentCommand {
    /// Add a deployment to an app
    Add {
        app_name: String,
        deployment_name: String,
    },
    /// List deployments of an app
    #[command(alias = "ls")]
    List {
        app_name: String,
        #[arg(long, value_enum, default_value = "table")]
        format: FormatArg,
        /// Show deployment keys
        #[arg(short = 'k', long)]
        display_keys: bool,
    },
    /// Remove a deployment
    #[command(alias = "rm")]
    Remove {
        app_name: String,
        deployment_name: String,
    },
    /// Rename a deployment
    #[command(alias = "mv")]
    Rename {
        app_name: String,
        current_deployment_name: String,
        new_deployment_name: String,
    },
    /// Show release history of a deployment
    #[command(alias = "h")]
    History {
        app_name: String,
        deployment_name: String,
        #[arg(long, value_enum, default_value = "table")]
        format: FormatArg,
        /// Show who released each update
        #[arg(short = 'a', long)]
        display_author: bool,
    },
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Json => Self::Json,
            FormatArg::Table => Self::Table,
        }
    }
}

impl From<Command> for HotloadCommand {
    fn from(command: Command) -> Self {
        match command {
            Command::AccessKey(args) => match args.command {
                AccessKeyCommand::Add { description } => Self::AccessKeyAdd { description },
                AccessKeyCommand::List { format } => Self::AccessKeyList { format: format.into() },
                AccessKeyCommand::Remove { access_key } => Self::AccessKeyRemove { access_key },
            },
            Command::App(args) => match args.command {
                AppCommand::Add { app_name } => Self::AppAdd { app_name },
                AppCommand::List { format } => Self::AppList { format: format.into() },
                AppCommand::Remove { app_name } => Self::AppRemove { app_name },
                AppCommand::Rename {
                    current_app_name,
                    new_app_name,
                } => Self::AppRename {
                    current_app_name,
                    new_app_name,
                },
                AppCommand::Transfer { app_name, email } => Self::AppTransfer { app_name, email },
            },
            Command::Collaborator(args) => match args.command {
                CollaboratorCommand::Add { app_name, email } => Self::CollaboratorAdd { app_name, email },
                CollaboratorCommand::List { app_name, format } => Self::CollaboratorList {
                    app_name,
                    format: format.into(),
                },
                CollaboratorCommand::Remove { app_name, email } => Self::CollaboratorRemove { app_name, email },
            },
            Command::Deployment(args) => match args.command {
                DeploymentCommand::Add {
                    app_name,
                    deployment_name,
                } => Self::DeploymentAdd {
                    app_name,
                    deployment_name,
                },
                DeploymentCommand::List {
                    app_name,
                    format,
                    display_keys,
                } => Self::DeploymentList {
                    app_name,
                    format: format.into(),
                    display_keys,
                },
                DeploymentCommand::Remove {
                    app_name,
                    deployment_name,
                } => Self::DeploymentRemove {
                    app_name,
                    deployment_name,
                },
                DeploymentCommand::Rename {
                    app_name,
                    current_deployment_name,
                    new_deployment_name,
                } => Self::DeploymentRename {
                    app_name,
                    current_deployment_name,
                    new_deployment_name,
                },
                DeploymentCommand::History {
                    app_name,
                    deployment_name,
                    format,
                    display_author,
                } => Self::DeploymentHistory {
                    app_name,
                    deployment_name,
                    format: format.into(),
                    display_author,
                },
            },
            Command::Release(args) => Self::Release {
                app_name: args.app_name,
                deployment_name: args.deployment_name,
                package: args.package,
                app_store_version: args.app_store_version,
                description: args.description,
                mandatory: args.mandatory,
            },
        }
    }
}
