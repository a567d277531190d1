//! Typed commands consumed by the command executor.

use serde::{Deserialize, Serialize};

/// Presentation mode for list and history commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    #[default]
    Table,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Table => write!(f, "table"),
        }
    }
}

/// One command per CLI invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    AccessKeyAdd {
        description: Option<String>,
    },
    AccessKeyList {
        format: OutputFormat,
    },
    AccessKeyRemove {
        access_key: String,
    },
    AppAdd {
        app_name: String,
    },
    AppList {
        format: OutputFormat,
    },
    AppRemove {
        app_name: String,
    },
    AppRename {
        current_app_name: String,
        new_app_name: String,
    },
    AppTransfer {
        app_name: String,
        email: String,
    },
    CollaboratorAdd {
        app_name: String,
        email: String,
    },
    CollaboratorList {
        app_name: String,
        format: OutputFormat,
    },
    CollaboratorRemove {
        app_name: String,
        email: String,
    },
    DeploymentAdd {
        app_name: String,
        deployment_name: String,
    },
    DeploymentList {
        app_name: String,
        format: OutputFormat,
        display_keys: bool,
    },
    DeploymentRemove {
        app_name: String,
        deployment_name: String,
    },
    DeploymentRename {
        app_name: String,
        current_deployment_name: String,
        new_deployment_name: String,
    },
    DeploymentHistory {
        app_name: String,
        deployment_name: String,
        format: OutputFormat,
        display_author: bool,
    },
    Release {
        app_name: String,
        deployment_name: String,
        package: String,
        app_store_version: String,
        description: Option<String>,
        mandatory: bool,
    },
}

impl Command {
    /// Short name used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Command::AccessKeyAdd { .. } => "accessKeyAdd",
            Command::AccessKeyList { .. } => "accessKeyList",
            Command::AccessKeyRemove { .. } => "accessKeyRemove",
            Command::AppAdd { .. } => "appAdd",
            Command::AppList { .. } => "appList",
            Command::AppRemove { .. } => "appRemove",
            Command::AppRename { .. } => "appRename",
            Command::AppTransfer { .. } => "appTransfer",
            Command::CollaboratorAdd { .. } => "collaboratorAdd",
            Command::CollaboratorList { .. } => "collaboratorList",
            Command::CollaboratorRemove { .. } => "collaboratorRemove",
            Command::DeploymentAdd { .. } => "deploymentAdd",
            Command::DeploymentList { .. } => "deploymentList",
            Command::DeploymentRemove { .. } => "deploymentRemove",
            Command::DeploymentRename { .. } => "deploymentRename",
            Command::DeploymentHistory { .. } => "deploymentHistory",
            Command::Release { .. } => "release",
        }
    }
}
