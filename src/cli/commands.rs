use crate::cli::args::Args;
use crate::cli::output::{
    render_access_keys, render_app_list, render_collaborators, render_deployment_list,
    render_history, AppListing, ConsoleLogger, DeploymentListing, Logger,
};
use crate::core::confirm::{gate, AutoConfirm, Confirmer, Gate};
use crate::core::metrics::{merge_deployments, merge_history};
use crate::core::release::{validate_release_path, Packager};
use crate::core::resolve::{resolve_access_key, resolve_app, resolve_deployment};
use crate::core::sdk::ManagementSdk;
use crate::domain::command::{Command, OutputFormat};
use crate::domain::error::{HotloadError, HotloadResult};
use crate::domain::model::{App, DeploymentKey, DeploymentMetrics, ReleaseRequest};
use crate::infrastructure::config::ConfigManager;
use crate::infrastructure::http::RestManagementClient;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::packaging::CommandPackager;
use crate::infrastructure::prompt::ConsolePrompt;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Runs one typed command against injected collaborators
pub struct CommandExecutor {
    sdk: Arc<dyn ManagementSdk>,
    confirmer: Arc<dyn Confirmer>,
    logger: Arc<dyn Logger>,
    packager: Arc<dyn Packager>,
}

impl CommandExecutor {
    pub fn new(
        sdk: Arc<dyn ManagementSdk>,
        confirmer: Arc<dyn Confirmer>,
        logger: Arc<dyn Logger>,
        packager: Arc<dyn Packager>,
    ) -> Self {
        Self {
            sdk,
            confirmer,
            logger,
            packager,
        }
    }

    /// Execute `command` to completion.
    ///
    /// On success exactly one result line has been logged (app add also
    /// logs a heading before its table). On failure nothing has been logged.
    pub async fn execute(&self, command: Command) -> HotloadResult<()> {
        debug!(command = command.kind(), "Executing command");

        match command {
            Command::AccessKeyAdd { description } => self.access_key_add(description).await,
            Command::AccessKeyList { format } => self.access_key_list(format).await,
            Command::AccessKeyRemove { access_key } => self.access_key_remove(&access_key).await,
            Command::AppAdd { app_name } => self.app_add(&app_name).await,
            Command::AppList { format } => self.app_list(format).await,
            Command::AppRemove { app_name } => self.app_remove(&app_name).await,
            Command::AppRename {
                current_app_name,
                new_app_name,
            } => self.app_rename(&current_app_name, &new_app_name).await,
            Command::AppTransfer { app_name, email } => self.app_transfer(&app_name, &email).await,
            Command::CollaboratorAdd { app_name, email } => self.collaborator_add(&app_name, &email).await,
            Command::CollaboratorList { app_name, format } => self.collaborator_list(&app_name, format).await,
            Command::CollaboratorRemove { app_name, email } => self.collaborator_remove(&app_name, &email).await,
            Command::DeploymentAdd {
                app_name,
                deployment_name,
            } => self.deployment_add(&app_name, &deployment_name).await,
            Command::DeploymentList {
                app_name,
                format,
                display_keys,
            } => {
                let app = resolve_app(self.sdk.as_ref(), &app_name).await?;
                let listing = self.shape_deployments(&app, format, display_keys, true).await?;
                self.logger.log(&listing);
                Ok(())
            }
            Command::DeploymentRemove {
                app_name,
                deployment_name,
            } => self.deployment_remove(&app_name, &deployment_name).await,
            Command::DeploymentRename {
                app_name,
                current_deployment_name,
                new_deployment_name,
            } => {
                self.deployment_rename(&app_name, &current_deployment_name, &new_deployment_name)
                    .await
            }
            Command::DeploymentHistory {
                app_name,
                deployment_name,
                format,
                display_author,
            } => {
                self.deployment_history(&app_name, &deployment_name, format, display_author)
                    .await
            }
            Command::Release {
                app_name,
                deployment_name,
                package,
                app_store_version,
                description,
                mandatory,
            } => {
                self.release(
                    &app_name,
                    &deployment_name,
                    &package,
                    &app_store_version,
                    description,
                    mandatory,
                )
                .await
            }
        }
    }

    async fn access_key_add(&self, description: Option<String>) -> HotloadResult<()> {
        let machine = hostname::get()
            .map(|h| h.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "unknown".to_string());

        let key = self.sdk.add_access_key(&machine, description.as_deref()).await?;
        info!(machine = %machine, "Access key created");
        let message = match description.as_deref() {
            Some(description) => format!("Successfully created a new access key \"{}\": {}", description, key.name),
            None => format!("Successfully created a new access key: {}", key.name),
        };
        self.logger.log(&message);
        Ok(())
    }

    async fn access_key_list(&self, format: OutputFormat) -> HotloadResult<()> {
        let keys = self.sdk.get_access_keys().await?;
        self.logger.log(&render_access_keys(format, &keys)?);
        Ok(())
    }

    async fn access_key_remove(&self, name: &str) -> HotloadResult<()> {
        let key = resolve_access_key(self.sdk.as_ref(), name).await?;

        let prompt = "Are you sure you want to remove this access key?";
        if gate(self.confirmer.as_ref(), prompt).await? == Gate::Cancelled {
            self.logger.log("Access key removal cancelled.");
            return Ok(());
        }

        self.sdk.remove_access_key(&key.id).await?;
        self.logger
            .log(&format!("Successfully removed the \"{}\" access key.", name));
        Ok(())
    }

    async fn app_add(&self, app_name: &str) -> HotloadResult<()> {
        let app = self.sdk.add_app(app_name).await?;
        info!(app = %app.name, id = %app.id, "App created");
        let listing = self
            .shape_deployments(&app, OutputFormat::Table, true, false)
            .await?;

        self.logger.log(&format!(
            "Successfully added the \"{}\" app, along with the following default deployments:",
            app_name
        ));
        self.logger.log(&listing);
        Ok(())
    }

    async fn app_list(&self, format: OutputFormat) -> HotloadResult<()> {
        let apps = self.sdk.get_apps().await?;

        let mut listings = Vec::with_capacity(apps.len());
        for app in &apps {
            let deployments = self.sdk.get_deployments(&app.id).await?;
            listings.push(AppListing::new(app, &deployments));
        }

        self.logger.log(&render_app_list(format, &listings)?);
        Ok(())
    }

    async fn app_remove(&self, app_name: &str) -> HotloadResult<()> {
        let app = resolve_app(self.sdk.as_ref(), app_name).await?;

        let prompt = "Are you sure you want to remove this app? Note that its deployment keys will be PERMANENTLY unrecoverable.";
        if gate(self.confirmer.as_ref(), prompt).await? == Gate::Cancelled {
            self.logger.log("App removal cancelled.");
            return Ok(());
        }

        self.sdk.remove_app(&app.id).await?;
        self.logger
            .log(&format!("Successfully removed the \"{}\" app.", app_name));
        Ok(())
    }

    async fn app_rename(&self, current_name: &str, new_name: &str) -> HotloadResult<()> {
        let mut app = resolve_app(self.sdk.as_ref(), current_name).await?;
        app.name = new_name.to_string();

        self.sdk.update_app(&app).await?;
        self.logger.log(&format!(
            "Successfully renamed the \"{}\" app to \"{}\".",
            current_name, new_name
        ));
        Ok(())
    }

    async fn app_transfer(&self, app_name: &str, email: &str) -> HotloadResult<()> {
        let app = resolve_app(self.sdk.as_ref(), app_name).await?;

        let prompt = "Are you sure you want to transfer the ownership of this app to another account?";
        if gate(self.confirmer.as_ref(), prompt).await? == Gate::Cancelled {
            self.logger.log("App transfer cancelled.");
            return Ok(());
        }

        self.sdk.transfer_app(&app.id, email).await?;
        self.logger.log(&format!(
            "Successfully transferred the ownership of app \"{}\" to the account with email \"{}\".",
            app_name, email
        ));
        Ok(())
    }

    async fn collaborator_add(&self, app_name: &str, email: &str) -> HotloadResult<()> {
        self.sdk.add_collaborator(app_name, email).await?;
        self.logger.log(&format!(
            "Successfully added \"{}\" as a collaborator to the app \"{}\".",
            email, app_name
        ));
        Ok(())
    }

    async fn collaborator_list(&self, app_name: &str, format: OutputFormat) -> HotloadResult<()> {
        let app = resolve_app(self.sdk.as_ref(), app_name).await?;
        let collaborators = self.sdk.get_collaborators_list(&app).await?;
        self.logger.log(&render_collaborators(format, &collaborators)?);
        Ok(())
    }

    async fn collaborator_remove(&self, app_name: &str, email: &str) -> HotloadResult<()> {
        let prompt = "Are you sure you want to remove this collaborator?";
        if gate(self.confirmer.as_ref(), prompt).await? == Gate::Cancelled {
            self.logger.log("Collaborator removal cancelled.");
            return Ok(());
        }

        self.sdk.remove_collaborator(app_name, email).await?;
        self.logger.log(&format!(
            "Successfully removed \"{}\" as a collaborator from the app \"{}\".",
            email, app_name
        ));
        Ok(())
    }

    async fn deployment_add(&self, app_name: &str, deployment_name: &str) -> HotloadResult<()> {
        let app = resolve_app(self.sdk.as_ref(), app_name).await?;
        let deployment = self.sdk.add_deployment(&app.id, deployment_name).await?;
        let keys = self.sdk.get_deployment_keys(&app.id, &deployment.id).await?;
        let key = primary_key(keys).ok_or_else(|| {
            HotloadError::Remote(format!("Deployment \"{}\" has no deployment key.", deployment_name))
        })?;

        self.logger.log(&format!(
            "Successfully added the \"{}\" deployment with key \"{}\" to the \"{}\" app.",
            deployment_name, key, app_name
        ));
        Ok(())
    }

    /// Render an app's deployments; `show_package` fetches and merges metrics
    async fn shape_deployments(
        &self,
        app: &App,
        format: OutputFormat,
        display_keys: bool,
        show_package: bool,
    ) -> HotloadResult<String> {
        let deployments = self.sdk.get_deployments(&app.id).await?;

        let mut keys = Vec::with_capacity(deployments.len());
        if display_keys {
            for deployment in &deployments {
                let deployment_keys = self.sdk.get_deployment_keys(&app.id, &deployment.id).await?;
                keys.push(primary_key(deployment_keys));
            }
        }

        let deployments = if show_package {
            let mut metrics = Vec::with_capacity(deployments.len());
            for deployment in &deployments {
                if deployment.package.is_some() {
                    metrics.push(self.sdk.get_deployment_metrics(&app.id, &deployment.id).await?);
                } else {
                    metrics.push(DeploymentMetrics::new());
                }
            }
            merge_deployments(deployments, &metrics)
        } else {
            deployments
        };

        let listings: Vec<DeploymentListing> = deployments
            .into_iter()
            .enumerate()
            .map(|(i, deployment)| DeploymentListing {
                name: deployment.name,
                package: if show_package { deployment.package } else { None },
                deployment_key: keys.get(i).cloned().flatten(),
            })
            .collect();

        Ok(render_deployment_list(format, &listings, show_package)?)
    }

    async fn deployment_remove(&self, app_name: &str, deployment_name: &str) -> HotloadResult<()> {
        let app = resolve_app(self.sdk.as_ref(), app_name).await?;
        let deployment = resolve_deployment(self.sdk.as_ref(), &app.id, deployment_name).await?;

        let prompt = "Are you sure you want to remove this deployment? Note that its deployment key will be PERMANENTLY unrecoverable.";
        if gate(self.confirmer.as_ref(), prompt).await? == Gate::Cancelled {
            self.logger.log("Deployment removal cancelled.");
            return Ok(());
        }

        self.sdk.remove_deployment(&app.id, &deployment.id).await?;
        self.logger.log(&format!(
            "Successfully removed the \"{}\" deployment from the \"{}\" app.",
            deployment_name, app_name
        ));
        Ok(())
    }

    async fn deployment_rename(&self, app_name: &str, current_name: &str, new_name: &str) -> HotloadResult<()> {
        let app = resolve_app(self.sdk.as_ref(), app_name).await?;
        let mut deployment = resolve_deployment(self.sdk.as_ref(), &app.id, current_name).await?;
        deployment.name = new_name.to_string();

        self.sdk.update_deployment(&app.id, &deployment).await?;
        self.logger.log(&format!(
            "Successfully renamed the \"{}\" deployment to \"{}\" for the \"{}\" app.",
            current_name, new_name, app_name
        ));
        Ok(())
    }

    async fn deployment_history(
        &self,
        app_name: &str,
        deployment_name: &str,
        format: OutputFormat,
        display_author: bool,
    ) -> HotloadResult<()> {
        let app = resolve_app(self.sdk.as_ref(), app_name).await?;
        let deployment = resolve_deployment(self.sdk.as_ref(), &app.id, deployment_name).await?;

        let history = self.sdk.get_package_history(&app.id, &deployment.id).await?;
        let metrics = self.sdk.get_deployment_metrics(&app.id, &deployment.id).await?;
        let history = merge_history(history, &metrics);

        self.logger
            .log(&render_history(format, &history, display_author)?);
        Ok(())
    }

    async fn release(
        &self,
        app_name: &str,
        deployment_name: &str,
        package: &str,
        app_store_version: &str,
        description: Option<String>,
        mandatory: bool,
    ) -> HotloadResult<()> {
        validate_release_path(package)?;

        let app = resolve_app(self.sdk.as_ref(), app_name).await?;
        let deployment = resolve_deployment(self.sdk.as_ref(), &app.id, deployment_name).await?;
        let content_path = self.packager.stage(Path::new(package)).await?;

        let request = ReleaseRequest {
            app_id: app.id,
            deployment_id: deployment.id,
            content_path,
            app_version: app_store_version.to_string(),
            description,
            is_mandatory: mandatory,
        };
        let status = self.sdk.release(&request).await?;
        info!(status = %status, "Release uploaded");

        self.logger.log(&format!(
            "Successfully released an update containing the \"{}\" directory to the \"{}\" deployment of the \"{}\" app.",
            package, deployment_name, app_name
        ));
        Ok(())
    }
}

/// Key string of the primary deployment key, or of the first key when none
/// is marked primary
fn primary_key(keys: Vec<DeploymentKey>) -> Option<String> {
    let index = keys.iter().position(|k| k.is_primary).unwrap_or(0);
    keys.into_iter().nth(index).map(|k| k.key)
}

/// Execute CLI command
pub async fn execute_command(args: Args) -> HotloadResult<()> {
    let config_manager = ConfigManager::new()?;
    let config = if let Some(config_path) = &args.config {
        config_manager.load_config_from_path(config_path.as_ref())?
    } else {
        config_manager.load_config()?
    };

    if !args.quiet {
        init_logging(&config.log_level, args.verbose)?;
    }

    let sdk: Arc<dyn ManagementSdk> = Arc::new(RestManagementClient::new(&config.server)?);
    let confirmer: Arc<dyn Confirmer> = if args.yes {
        Arc::new(AutoConfirm)
    } else {
        Arc::new(ConsolePrompt)
    };
    let packager: Arc<dyn Packager> = Arc::new(CommandPackager::from_config(&config.release)?);

    let executor = CommandExecutor::new(sdk, confirmer, Arc::new(ConsoleLogger), packager);
    executor.execute(args.command.into()).await
}
