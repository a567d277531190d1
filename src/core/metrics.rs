//! Joining usage metrics onto packages.
//!
//! Metrics are fetched separately from package data and keyed by package
//! label, or by app version for installs that predate any labelled release.
//! Every function here is pure and preserves the input order.

use crate::domain::model::{Deployment, DeploymentMetrics, Package};

/// Key under which `package` appears in a metrics mapping.
///
/// A non-empty label wins; the app version is used only when there is no
/// label. A labelled package with no metrics entry does not fall back.
pub fn metrics_key(package: &Package) -> &str {
    match package.label.as_deref() {
        Some(label) if !label.is_empty() => label,
        _ => &package.app_version,
    }
}

/// Attach the matching metrics record to `package`, if there is one
pub fn attach_metrics(package: &mut Package, metrics: &DeploymentMetrics) {
    package.metrics = metrics.get(metrics_key(package)).cloned();
}

/// Merge metrics into a package history
pub fn merge_history(mut history: Vec<Package>, metrics: &DeploymentMetrics) -> Vec<Package> {
    for package in &mut history {
        attach_metrics(package, metrics);
    }
    history
}

/// Merge per-deployment metrics into a deployment list.
///
/// `metrics[i]` belongs to `deployments[i]`; deployments without a package
/// or without a metrics entry are left untouched.
pub fn merge_deployments(mut deployments: Vec<Deployment>, metrics: &[DeploymentMetrics]) -> Vec<Deployment> {
    for (deployment, deployment_metrics) in deployments.iter_mut().zip(metrics) {
        if let Some(package) = deployment.package.as_mut() {
            attach_metrics(package, deployment_metrics);
        }
    }
    deployments
}
