//! Records exchanged with the management service.
//!
//! Field names follow the service's camelCase wire format. Optional fields
//! the service omits are skipped on output, except `description`, which
//! the service reports as an explicit `null`.

use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Collaborators of an app keyed by e-mail address
pub type CollaboratorMap = BTreeMap<String, CollaboratorProperties>;

/// Usage counters keyed by package label or app version
pub type DeploymentMetrics = BTreeMap<String, UpdateMetrics>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaboratorProperties {
    pub permission: String,
    #[serde(default)]
    pub is_current_account: bool,
}

impl CollaboratorProperties {
    pub fn is_owner(&self) -> bool {
        self.permission == "Owner"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct App {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub collaborators: CollaboratorMap,
}

impl App {
    /// E-mail of the owning account when the caller is not the owner
    pub fn foreign_owner(&self) -> Option<&str> {
        self.collaborators
            .iter()
            .find(|(_, props)| props.is_owner() && !props.is_current_account)
            .map(|(email, _)| email.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<Package>,
}

/// A released update.
///
/// Serializes with its keys in the order the service sent them; keys the
/// service did not send (such as attached `metrics`) follow at the end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Package {
    pub app_version: String,
    #[serde(default)]
    pub description: Option<String>,
    pub is_mandatory: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub package_hash: String,
    pub blob_url: String,
    pub size: u64,
    pub upload_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_against_package_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_blob_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_size: Option<u64>,
    /// Set on promote and rollback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_label: Option<String>,
    /// Set on promote
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_deployment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub released_by: Option<String>,
    /// "Upload", "Promote" or "Rollback"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<UpdateMetrics>,
    /// Wire key order, empty for packages built locally
    #[serde(skip)]
    pub key_order: Vec<String>,
}

impl Serialize for Package {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = match Package::serialize(self, serde_json::value::Serializer) {
            Ok(Value::Object(fields)) => fields,
            Ok(other) => return other.serialize(serializer),
            Err(e) => return Err(S::Error::custom(e)),
        };

        let mut ordered = Map::new();
        for key in &self.key_order {
            if let Some(value) = fields.get(key) {
                ordered.insert(key.clone(), value.clone());
            }
        }
        for (key, value) in fields {
            if !ordered.contains_key(&key) {
                ordered.insert(key, value);
            }
        }
        ordered.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Package {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        let key_order = fields.keys().cloned().collect();
        let mut package = Package::deserialize(Value::Object(fields)).map_err(D::Error::custom)?;
        package.key_order = key_order;
        Ok(package)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMetrics {
    pub active: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloaded: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessKey {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub created_time: i64,
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentKey {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub key: String,
    #[serde(default)]
    pub description: Option<String>,
    pub is_primary: bool,
}

/// Payload of a release upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseRequest {
    pub app_id: String,
    pub deployment_id: String,
    pub content_path: std::path::PathBuf,
    pub app_version: String,
    #[serde(default)]
    pub description: Option<String>,
    pub is_mandatory: bool,
}
