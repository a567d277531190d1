//! REST client for the management service
//!
//! Responses wrap their payload in a named field (`{"apps": [...]}`); the
//! client unwraps it before handing records to the command layer.

use crate::core::sdk::ManagementSdk;
use crate::domain::config::ServerConfig;
use crate::domain::error::{HotloadError, HotloadResult};
use crate::domain::model::{
    AccessKey, App, CollaboratorMap, Deployment, DeploymentKey, DeploymentMetrics, Package,
    ReleaseRequest,
};
use async_trait::async_trait;
use reqwest::{multipart, Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Management service client over HTTP
#[derive(Clone)]
pub struct RestManagementClient {
    client: Client,
    base_url: String,
    access_key: Option<String>,
}

impl RestManagementClient {
    pub fn new(config: &ServerConfig) -> HotloadResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(concat!("hotload/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HotloadError::Config {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: config.server_url.trim_end_matches('/').to_string(),
            access_key: config.access_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(method = %method, url = %url, "Management service request");
        let builder = self.client.request(method, url);
        match &self.access_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> HotloadResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, "Management service rejected request");
        Err(HotloadError::Remote(if body.is_empty() {
            format!("Management service returned {}", status)
        } else {
            format!("Management service returned {}: {}", status, body)
        }))
    }

    /// GET `path` and deserialize the `field` member of the response body
    async fn get_field<T: DeserializeOwned>(&self, path: &str, field: &str) -> HotloadResult<T> {
        let response = self.send(self.request(Method::GET, path)).await?;
        unwrap_field(response, field).await
    }

    async fn post_field<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        field: &str,
    ) -> HotloadResult<T> {
        let response = self.send(self.request(Method::POST, path).json(body)).await?;
        unwrap_field(response, field).await
    }

    async fn call(&self, method: Method, path: &str) -> HotloadResult<()> {
        self.send(self.request(method, path)).await?;
        Ok(())
    }

    async fn call_with<B: Serialize + ?Sized>(&self, method: Method, path: &str, body: &B) -> HotloadResult<()> {
        self.send(self.request(method, path).json(body)).await?;
        Ok(())
    }
}

async fn unwrap_field<T: DeserializeOwned>(response: Response, field: &str) -> HotloadResult<T> {
    let mut body: serde_json::Value = response.json().await?;
    let value = body
        .get_mut(field)
        .map(serde_json::Value::take)
        .ok_or_else(|| HotloadError::Remote(format!("Response is missing \"{}\"", field)))?;
    serde_json::from_value(value)
        .map_err(|e| HotloadError::Remote(format!("Malformed \"{}\" in response: {}", field, e)))
}

/// Percent-encode one path segment
fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Files under `root` in a stable order, as (relative name, absolute path)
fn collect_files(root: &Path) -> HotloadResult<Vec<(String, PathBuf)>> {
    if root.is_file() {
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "package".to_string());
        return Ok(vec![(name, root.to_path_buf())]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        let relative = path
            .strip_prefix(root)
            .unwrap_or(&path)
            .to_string_lossy()
            .replace('\\', "/");
        files.push((relative, path));
    }
    files.sort();
    Ok(files)
}

#[async_trait]
impl ManagementSdk for RestManagementClient {
    async fn add_access_key(&self, machine: &str, description: Option<&str>) -> HotloadResult<AccessKey> {
        let body = serde_json::json!({ "createdBy": machine, "description": description });
        self.post_field("/accessKeys", &body, "accessKey").await
    }

    async fn get_access_keys(&self) -> HotloadResult<Vec<AccessKey>> {
        self.get_field("/accessKeys", "accessKeys").await
    }

    async fn remove_access_key(&self, access_key_id: &str) -> HotloadResult<()> {
        self.call(Method::DELETE, &format!("/accessKeys/{}", segment(access_key_id)))
            .await
    }

    async fn add_app(&self, name: &str) -> HotloadResult<App> {
        self.post_field("/apps", &serde_json::json!({ "name": name }), "app")
            .await
    }

    async fn get_apps(&self) -> HotloadResult<Vec<App>> {
        self.get_field("/apps", "apps").await
    }

    async fn remove_app(&self, app_id: &str) -> HotloadResult<()> {
        self.call(Method::DELETE, &format!("/apps/{}", segment(app_id)))
            .await
    }

    async fn update_app(&self, app: &App) -> HotloadResult<()> {
        self.call_with(Method::PATCH, &format!("/apps/{}", segment(&app.id)), app)
            .await
    }

    async fn transfer_app(&self, app_id: &str, email: &str) -> HotloadResult<()> {
        let path = format!("/apps/{}/transfer/{}", segment(app_id), segment(email));
        self.call(Method::POST, &path).await
    }

    async fn add_collaborator(&self, app_name: &str, email: &str) -> HotloadResult<()> {
        let path = format!("/apps/{}/collaborators/{}", segment(app_name), segment(email));
        self.call(Method::POST, &path).await
    }

    async fn get_collaborators_list(&self, app: &App) -> HotloadResult<CollaboratorMap> {
        let path = format!("/apps/{}/collaborators", segment(&app.id));
        self.get_field(&path, "collaborators").await
    }

    async fn remove_collaborator(&self, app_name: &str, email: &str) -> HotloadResult<()> {
        let path = format!("/apps/{}/collaborators/{}", segment(app_name), segment(email));
        self.call(Method::DELETE, &path).await
    }

    async fn add_deployment(&self, app_id: &str, name: &str) -> HotloadResult<Deployment> {
        let path = format!("/apps/{}/deployments", segment(app_id));
        self.post_field(&path, &serde_json::json!({ "name": name }), "deployment")
            .await
    }

    async fn get_deployments(&self, app_id: &str) -> HotloadResult<Vec<Deployment>> {
        let path = format!("/apps/{}/deployments", segment(app_id));
        self.get_field(&path, "deployments").await
    }

    async fn remove_deployment(&self, app_id: &str, deployment_id: &str) -> HotloadResult<()> {
        let path = format!("/apps/{}/deployments/{}", segment(app_id), segment(deployment_id));
        self.call(Method::DELETE, &path).await
    }

    async fn update_deployment(&self, app_id: &str, deployment: &Deployment) -> HotloadResult<()> {
        let path = format!("/apps/{}/deployments/{}", segment(app_id), segment(&deployment.id));
        self.call_with(Method::PATCH, &path, deployment).await
    }

    async fn get_deployment_keys(&self, app_id: &str, deployment_id: &str) -> HotloadResult<Vec<DeploymentKey>> {
        let path = format!("/apps/{}/deployments/{}/deploymentKeys", segment(app_id), segment(deployment_id));
        self.get_field(&path, "deploymentKeys").await
    }

    async fn get_package_history(&self, app_id: &str, deployment_id: &str) -> HotloadResult<Vec<Package>> {
        let path = format!("/apps/{}/deployments/{}/packageHistory", segment(app_id), segment(deployment_id));
        self.get_field(&path, "packageHistory").await
    }

    async fn get_deployment_metrics(&self, app_id: &str, deployment_id: &str) -> HotloadResult<DeploymentMetrics> {
        let path = format!("/apps/{}/deployments/{}/metrics", segment(app_id), segment(deployment_id));
        self.get_field(&path, "metrics").await
    }

    async fn release(&self, request: &ReleaseRequest) -> HotloadResult<String> {
        let package_info = serde_json::json!({
            "appVersion": request.app_version,
            "description": request.description,
            "isMandatory": request.is_mandatory,
        });

        let mut form = multipart::Form::new().text("packageInfo", package_info.to_string());
        for (name, path) in collect_files(&request.content_path)? {
            let bytes = tokio::fs::read(&path).await?;
            form = form.part("package", multipart::Part::bytes(bytes).file_name(name));
        }

        let path = format!(
            "/apps/{}/deployments/{}/release",
            segment(&request.app_id),
            segment(&request.deployment_id)
        );
        let response = self
            .send(self.request(Method::POST, &path).multipart(form))
            .await?;
        Ok(response.text().await?)
    }
}
