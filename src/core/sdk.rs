use crate::domain::error::HotloadResult;
use crate::domain::model::{
    AccessKey, App, CollaboratorMap, Deployment, DeploymentKey, DeploymentMetrics, Package,
    ReleaseRequest,
};
use async_trait::async_trait;

/// Client capability for the remote management service.
///
/// Every method is one remote call. Rejections surface as errors and are
/// never retried by callers.
#[async_trait]
pub trait ManagementSdk: Send + Sync {
    /// Create an access key recorded as created from `machine`
    async fn add_access_key(&self, machine: &str, description: Option<&str>) -> HotloadResult<AccessKey>;

    async fn get_access_keys(&self) -> HotloadResult<Vec<AccessKey>>;

    async fn remove_access_key(&self, access_key_id: &str) -> HotloadResult<()>;

    async fn add_app(&self, name: &str) -> HotloadResult<App>;

    /// Apps owned by or shared with the caller
    async fn get_apps(&self) -> HotloadResult<Vec<App>>;

    async fn remove_app(&self, app_id: &str) -> HotloadResult<()>;

    async fn update_app(&self, app: &App) -> HotloadResult<()>;

    /// Hand ownership of an app to another account
    async fn transfer_app(&self, app_id: &str, email: &str) -> HotloadResult<()>;

    /// The service addresses collaborators by app name
    async fn add_collaborator(&self, app_name: &str, email: &str) -> HotloadResult<()>;

    async fn get_collaborators_list(&self, app: &App) -> HotloadResult<CollaboratorMap>;

    async fn remove_collaborator(&self, app_name: &str, email: &str) -> HotloadResult<()>;

    async fn add_deployment(&self, app_id: &str, name: &str) -> HotloadResult<Deployment>;

    async fn get_deployments(&self, app_id: &str) -> HotloadResult<Vec<Deployment>>;

    async fn remove_deployment(&self, app_id: &str, deployment_id: &str) -> HotloadResult<()>;

    async fn update_deployment(&self, app_id: &str, deployment: &Deployment) -> HotloadResult<()>;

    async fn get_deployment_keys(&self, app_id: &str, deployment_id: &str) -> HotloadResult<Vec<DeploymentKey>>;

    /// Releases of a deployment, oldest first
    async fn get_package_history(&self, app_id: &str, deployment_id: &str) -> HotloadResult<Vec<Package>>;

    async fn get_deployment_metrics(&self, app_id: &str, deployment_id: &str) -> HotloadResult<DeploymentMetrics>;

    /// Upload staged content as a new package; returns the service's status text
    async fn release(&self, request: &ReleaseRequest) -> HotloadResult<String>;
}
