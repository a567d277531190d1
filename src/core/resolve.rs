//! Name to id resolution against the caller's entities.
//!
//! Names are unique per caller, so the first exact (case-sensitive) match
//! is the only one.

use crate::core::sdk::ManagementSdk;
use crate::domain::error::{HotloadError, HotloadResult};
use crate::domain::model::{AccessKey, App, Deployment};

/// Fetch the caller's apps and return the one called `app_name`
pub async fn resolve_app(sdk: &dyn ManagementSdk, app_name: &str) -> HotloadResult<App> {
    let apps = sdk.get_apps().await?;
    apps.into_iter()
        .find(|app| app.name == app_name)
        .ok_or_else(|| HotloadError::app_not_found(app_name))
}

/// Fetch an app's deployments and return the one called `deployment_name`
pub async fn resolve_deployment(
    sdk: &dyn ManagementSdk,
    app_id: &str,
    deployment_name: &str,
) -> HotloadResult<Deployment> {
    let deployments = sdk.get_deployments(app_id).await?;
    deployments
        .into_iter()
        .find(|deployment| deployment.name == deployment_name)
        .ok_or_else(|| HotloadError::deployment_not_found(deployment_name))
}

/// Fetch the caller's access keys and return the one whose key is `name`
pub async fn resolve_access_key(sdk: &dyn ManagementSdk, name: &str) -> HotloadResult<AccessKey> {
    let keys = sdk.get_access_keys().await?;
    keys.into_iter()
        .find(|key| key.name == name)
        .ok_or_else(|| HotloadError::access_key_not_found(name))
}
