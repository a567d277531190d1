use crate::domain::command::OutputFormat;
use crate::domain::model::{AccessKey, App, CollaboratorMap, Deployment, Package, UpdateMetrics};
use chrono::{Local, TimeZone};
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Mutex;
use tabled::{builder::Builder, Table, Tabled};

/// Sink for the user-visible result of a command
pub trait Logger: Send + Sync {
    fn log(&self, message: &str);
}

/// Output formatting errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl From<OutputError> for crate::domain::error::HotloadError {
    fn from(err: OutputError) -> Self {
        Self::Output(err.to_string())
    }
}

/// Prints each message as one line on stdout
#[derive(Debug, Default)]
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, message: &str) {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        if let Err(e) = writeln!(handle, "{}", message) {
            tracing::warn!(error = %e, "Failed to write command output");
        }
    }
}

/// Keeps messages in memory; used when output is captured rather than shown
#[derive(Debug, Default)]
pub struct MemoryLogger {
    messages: Mutex<Vec<String>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

/// App list entry as shown to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppListing {
    pub name: String,
    pub deployments: Vec<String>,
    #[serde(skip)]
    pub owner: Option<String>,
}

impl AppListing {
    pub fn new(app: &App, deployments: &[Deployment]) -> Self {
        Self {
            name: app.name.clone(),
            deployments: deployments.iter().map(|d| d.name.clone()).collect(),
            owner: app.foreign_owner().map(str::to_string),
        }
    }
}

/// Deployment list entry as shown to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentListing {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<Package>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_key: Option<String>,
}

/// Pretty-printed JSON with two-space indentation
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn render_app_list(format: OutputFormat, apps: &[AppListing]) -> Result<String, OutputError> {
    match format {
        OutputFormat::Json => to_json(apps),
        OutputFormat::Table => {
            let rows: Vec<AppTableRow> = apps.iter().map(AppTableRow::from).collect();
            Ok(Table::new(rows).to_string())
        }
    }
}

/// Render a deployment list; `show_package` adds the release and metrics columns
pub fn render_deployment_list(
    format: OutputFormat,
    deployments: &[DeploymentListing],
    show_package: bool,
) -> Result<String, OutputError> {
    match format {
        OutputFormat::Json => to_json(deployments),
        OutputFormat::Table => {
            let display_keys = deployments.iter().any(|d| d.deployment_key.is_some());
            let mut header = vec!["Name".to_string()];
            if display_keys {
                header.push("Deployment Key".to_string());
            }
            if show_package {
                header.push("Update Metadata".to_string());
                header.push("Install Metrics".to_string());
            }

            let mut builder = Builder::default();
            builder.set_header(header);
            for deployment in deployments {
                let mut record = vec![deployment.name.clone()];
                if display_keys {
                    record.push(deployment.deployment_key.clone().unwrap_or_default());
                }
                if show_package {
                    match &deployment.package {
                        Some(package) => {
                            record.push(package_metadata(package));
                            record.push(install_metrics(package.metrics.as_ref()));
                        }
                        None => {
                            record.push("No updates released".to_string());
                            record.push(String::new());
                        }
                    }
                }
                builder.push_record(record);
            }
            Ok(builder.build().to_string())
        }
    }
}

pub fn render_history(format: OutputFormat, history: &[Package], display_author: bool) -> Result<String, OutputError> {
    match format {
        OutputFormat::Json => to_json(history),
        OutputFormat::Table => {
            let mut header: Vec<String> = [
                "Label",
                "Release Time",
                "App Version",
                "Mandatory",
                "Description",
                "Install Metrics",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect();
            if display_author {
                header.push("Released By".to_string());
            }

            let mut builder = Builder::default();
            builder.set_header(header);
            for package in history {
                let mut record = vec![
                    package.label.clone().unwrap_or_default(),
                    format_release_time(package.upload_time),
                    package.app_version.clone(),
                    yes_no(package.is_mandatory).to_string(),
                    package.description.clone().unwrap_or_default(),
                    install_metrics(package.metrics.as_ref()),
                ];
                if display_author {
                    record.push(package.released_by.clone().unwrap_or_default());
                }
                builder.push_record(record);
            }
            Ok(builder.build().to_string())
        }
    }
}

pub fn render_access_keys(format: OutputFormat, keys: &[AccessKey]) -> Result<String, OutputError> {
    match format {
        OutputFormat::Json => to_json(keys),
        OutputFormat::Table => {
            let rows: Vec<AccessKeyTableRow> = keys.iter().map(AccessKeyTableRow::from).collect();
            Ok(Table::new(rows).to_string())
        }
    }
}

pub fn render_collaborators(format: OutputFormat, collaborators: &CollaboratorMap) -> Result<String, OutputError> {
    match format {
        OutputFormat::Json => to_json(collaborators),
        OutputFormat::Table => {
            let rows: Vec<CollaboratorTableRow> = collaborators
                .iter()
                .map(|(email, props)| CollaboratorTableRow {
                    email: if props.is_current_account {
                        format!("{} (You)", email)
                    } else {
                        email.clone()
                    },
                    permission: props.permission.clone(),
                })
                .collect();
            Ok(Table::new(rows).to_string())
        }
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// Milliseconds since the epoch as local time
pub fn format_release_time(upload_time: i64) -> String {
    match Local.timestamp_millis_opt(upload_time).single() {
        Some(time) => time.format("%b %-d, %Y %-I:%M %p").to_string(),
        None => upload_time.to_string(),
    }
}

fn package_metadata(package: &Package) -> String {
    let mut lines = vec![
        format!("Label: {}", package.label.as_deref().unwrap_or("")),
        format!("App Version: {}", package.app_version),
        format!("Mandatory: {}", yes_no(package.is_mandatory)),
        format!("Release Time: {}", format_release_time(package.upload_time)),
    ];
    if let Some(description) = package.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(format!("Description: {}", description));
    }
    lines.join("\n")
}

fn install_metrics(metrics: Option<&UpdateMetrics>) -> String {
    let Some(metrics) = metrics else {
        return "No installs recorded".to_string();
    };

    let mut lines = vec![format!("Active: {}", metrics.active)];
    if let Some(installed) = metrics.installed {
        lines.push(format!("Installed: {}", installed));
    }
    if let Some(downloaded) = metrics.downloaded {
        lines.push(format!("Downloaded: {}", downloaded));
    }
    // A failed install is one the client rolled back
    if let Some(failed) = metrics.failed {
        lines.push(format!("Rollbacks: {}", failed));
    }
    lines.join("\n")
}

/// Table row for app list
#[derive(Tabled)]
struct AppTableRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Deployments")]
    deployments: String,
}

impl From<&AppListing> for AppTableRow {
    fn from(app: &AppListing) -> Self {
        let name = match &app.owner {
            Some(owner) => format!("{} ({})", app.name, owner),
            None => app.name.clone(),
        };
        Self {
            name,
            deployments: app.deployments.join(", "),
        }
    }
}

/// Table row for access keys
#[derive(Tabled)]
struct AccessKeyTableRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Time Created")]
    created: String,
    #[tabled(rename = "Created From")]
    created_by: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&AccessKey> for AccessKeyTableRow {
    fn from(key: &AccessKey) -> Self {
        Self {
            key: key.name.clone(),
            created: format_release_time(key.created_time),
            created_by: key.created_by.clone(),
            description: key.description.clone().unwrap_or_default(),
        }
    }
}

/// Table row for collaborators
#[derive(Tabled)]
struct CollaboratorTableRow {
    #[tabled(rename = "E-mail Address")]
    email: String,
    #[tabled(rename = "Permission")]
    permission: String,
}
