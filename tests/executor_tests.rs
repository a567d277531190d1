use async_trait::async_trait;
use hotload::domain::model::{
    AccessKey, App, CollaboratorMap, CollaboratorProperties, Deployment, DeploymentKey,
    DeploymentMetrics, Package, ReleaseRequest,
};
use hotload::{
    Command, CommandExecutor, Confirmer, HotloadError, HotloadResult, ManagementSdk, MemoryLogger,
    OutputFormat, Packager,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

const RELEASE_FAILED_ERROR_MESSAGE: &str = "It is unnecessary to package releases in a .zip or binary file. Please specify the direct path to the update content's directory (e.g. /platforms/ios/www) or file (e.g. main.jsbundle).";

/// Canned management service that records every call
#[derive(Default)]
struct SdkStub {
    calls: Mutex<Vec<String>>,
    fail_removals: bool,
    fail_deployment_listing: bool,
}

impl SdkStub {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn calls_to(&self, method: &str) -> Vec<String> {
        let prefix = format!("{}(", method);
        self.calls()
            .into_iter()
            .filter(|call| call.starts_with(&prefix))
            .collect()
    }
}

fn owner_collaborators() -> CollaboratorMap {
    let mut collaborators = CollaboratorMap::new();
    collaborators.insert(
        "a@a.com".to_string(),
        CollaboratorProperties { permission: "Owner".to_string(), is_current_account: true },
    );
    collaborators
}

fn staging_package() -> Package {
    serde_json::from_value(json!({
        "appVersion": "1.0.0",
        "description": "fgh",
        "label": "v2",
        "packageHash": "jkl",
        "isMandatory": true,
        "size": 10,
        "blobUrl": "http://mno.pqr",
        "uploadTime": 1000
    }))
    .unwrap()
}

fn history() -> Vec<Package> {
    serde_json::from_value(json!([
        {
            "description": null,
            "appVersion": "1.0.0",
            "isMandatory": false,
            "packageHash": "463acc7d06adc9c46233481d87d9e8264b3e9ffe60fe98d721e6974209dc71a0",
            "blobUrl": "https://fakeblobstorage.net/storagev2/blobid1",
            "uploadTime": 1447113596270i64,
            "size": 1,
            "label": "v1"
        },
        {
            "description": "New update - this update does a whole bunch of things, including testing linewrapping",
            "appVersion": "1.0.1",
            "isMandatory": false,
            "packageHash": "463acc7d06adc9c46233481d87d9e8264b3e9ffe60fe98d721e6974209dc71a0",
            "blobUrl": "https://fakeblobstorage.net/storagev2/blobid2",
            "uploadTime": 1447118476669i64,
            "size": 2,
            "label": "v2"
        }
    ]))
    .unwrap()
}

fn metrics() -> DeploymentMetrics {
    serde_json::from_value(json!({
        "1.0.0": { "active": 123 },
        "v1": { "active": 789, "downloaded": 456, "failed": 654, "installed": 987 },
        "v2": { "active": 123, "downloaded": 321, "failed": 789, "installed": 456 }
    }))
    .unwrap()
}

#[async_trait]
impl ManagementSdk for SdkStub {
    async fn add_access_key(&self, machine: &str, description: Option<&str>) -> HotloadResult<AccessKey> {
        self.record(format!("addAccessKey({}, {:?})", machine, description));
        Ok(AccessKey {
            id: "accessKeyId".to_string(),
            name: "key123".to_string(),
            created_time: 0,
            created_by: machine.to_string(),
            description: description.map(str::to_string),
        })
    }

    async fn get_access_keys(&self) -> HotloadResult<Vec<AccessKey>> {
        self.record("getAccessKeys()".to_string());
        Ok(vec![AccessKey {
            id: "7".to_string(),
            name: "8".to_string(),
            created_time: 0,
            created_by: "host".to_string(),
            description: Some("Test Description".to_string()),
        }])
    }

    async fn remove_access_key(&self, access_key_id: &str) -> HotloadResult<()> {
        self.record(format!("removeAccessKey({})", access_key_id));
        Ok(())
    }

    async fn add_app(&self, name: &str) -> HotloadResult<App> {
        self.record(format!("addApp({})", name));
        Ok(App { id: "appId".to_string(), name: name.to_string(), collaborators: CollaboratorMap::new() })
    }

    async fn get_apps(&self) -> HotloadResult<Vec<App>> {
        self.record("getApps()".to_string());
        Ok(vec![
            App { id: "1".to_string(), name: "a".to_string(), collaborators: owner_collaborators() },
            App { id: "2".to_string(), name: "b".to_string(), collaborators: owner_collaborators() },
        ])
    }

    async fn remove_app(&self, app_id: &str) -> HotloadResult<()> {
        self.record(format!("removeApp({})", app_id));
        if self.fail_removals {
            return Err(HotloadError::Remote("Service unavailable".to_string()));
        }
        Ok(())
    }

    async fn update_app(&self, app: &App) -> HotloadResult<()> {
        self.record(format!("updateApp({}, {})", app.id, app.name));
        Ok(())
    }

    async fn transfer_app(&self, app_id: &str, email: &str) -> HotloadResult<()> {
        self.record(format!("transferApp({}, {})", app_id, email));
        Ok(())
    }

    async fn add_collaborator(&self, app_name: &str, email: &str) -> HotloadResult<()> {
        self.record(format!("addCollaborator({}, {})", app_name, email));
        Ok(())
    }

    async fn get_collaborators_list(&self, app: &App) -> HotloadResult<CollaboratorMap> {
        self.record(format!("getCollaboratorsList({})", app.id));
        let mut collaborators = owner_collaborators();
        collaborators.insert(
            "b@b.com".to_string(),
            CollaboratorProperties { permission: "Collaborator".to_string(), is_current_account: false },
        );
        Ok(collaborators)
    }

    async fn remove_collaborator(&self, app_name: &str, email: &str) -> HotloadResult<()> {
        self.record(format!("removeCollaborator({}, {})", app_name, email));
        Ok(())
    }

    async fn add_deployment(&self, app_id: &str, name: &str) -> HotloadResult<Deployment> {
        self.record(format!("addDeployment({}, {})", app_id, name));
        Ok(Deployment { id: "deploymentId".to_string(), name: name.to_string(), package: None })
    }

    async fn get_deployments(&self, app_id: &str) -> HotloadResult<Vec<Deployment>> {
        self.record(format!("getDeployments({})", app_id));
        if self.fail_deployment_listing {
            return Err(HotloadError::Remote("Service unavailable".to_string()));
        }
        Ok(vec![
            Deployment { id: "3".to_string(), name: "Production".to_string(), package: None },
            Deployment { id: "4".to_string(), name: "Staging".to_string(), package: Some(staging_package()) },
        ])
    }

    async fn remove_deployment(&self, app_id: &str, deployment_id: &str) -> HotloadResult<()> {
        self.record(format!("removeDeployment({}, {})", app_id, deployment_id));
        Ok(())
    }

    async fn update_deployment(&self, app_id: &str, deployment: &Deployment) -> HotloadResult<()> {
        self.record(format!("updateDeployment({}, {}, {})", app_id, deployment.id, deployment.name));
        Ok(())
    }

    async fn get_deployment_keys(&self, app_id: &str, deployment_id: &str) -> HotloadResult<Vec<DeploymentKey>> {
        self.record(format!("getDeploymentKeys({}, {})", app_id, deployment_id));
        Ok(vec![DeploymentKey {
            id: "5".to_string(),
            name: "Primary".to_string(),
            key: "6".to_string(),
            description: None,
            is_primary: true,
        }])
    }

    async fn get_package_history(&self, app_id: &str, deployment_id: &str) -> HotloadResult<Vec<Package>> {
        self.record(format!("getPackageHistory({}, {})", app_id, deployment_id));
        Ok(history())
    }

    async fn get_deployment_metrics(&self, app_id: &str, deployment_id: &str) -> HotloadResult<DeploymentMetrics> {
        self.record(format!("getDeploymentMetrics({}, {})", app_id, deployment_id));
        Ok(metrics())
    }

    async fn release(&self, request: &ReleaseRequest) -> HotloadResult<String> {
        self.record(format!(
            "release({}, {}, {})",
            request.app_id,
            request.deployment_id,
            request.content_path.display()
        ));
        Ok("Successfully released".to_string())
    }
}

struct ScriptedConfirm {
    answer: bool,
    asked: Mutex<usize>,
}

#[async_trait]
impl Confirmer for ScriptedConfirm {
    async fn confirm(&self, _prompt: &str) -> HotloadResult<bool> {
        *self.asked.lock().unwrap() += 1;
        Ok(self.answer)
    }
}

#[derive(Default)]
struct RecordingPackager {
    staged: Mutex<Vec<PathBuf>>,
}

#[async_trait]
impl Packager for RecordingPackager {
    async fn stage(&self, content: &Path) -> HotloadResult<PathBuf> {
        self.staged.lock().unwrap().push(content.to_path_buf());
        Ok(content.to_path_buf())
    }
}

struct Harness {
    sdk: Arc<SdkStub>,
    confirm: Arc<ScriptedConfirm>,
    logger: Arc<MemoryLogger>,
    packager: Arc<RecordingPackager>,
    executor: CommandExecutor,
}

impl Harness {
    fn new(was_confirmed: bool) -> Self {
        Self::with_sdk(SdkStub::default(), was_confirmed)
    }

    fn with_sdk(sdk: SdkStub, was_confirmed: bool) -> Self {
        let sdk = Arc::new(sdk);
        let confirm = Arc::new(ScriptedConfirm { answer: was_confirmed, asked: Mutex::new(0) });
        let logger = Arc::new(MemoryLogger::new());
        let packager = Arc::new(RecordingPackager::default());
        let executor = CommandExecutor::new(sdk.clone(), confirm.clone(), logger.clone(), packager.clone());
        Self { sdk, confirm, logger, packager, executor }
    }

    fn confirmations(&self) -> usize {
        *self.confirm.asked.lock().unwrap()
    }
}

fn assert_json_describes_object(actual: &str, expected: &serde_json::Value) {
    assert_eq!(actual, serde_json::to_string_pretty(expected).unwrap());
}

#[tokio::test]
async fn test_app_add_reports_new_app_and_default_deployments() {
    let h = Harness::new(true);

    h.executor.execute(Command::AppAdd { app_name: "a".to_string() }).await.unwrap();

    assert_eq!(h.sdk.calls_to("addApp"), vec!["addApp(a)"]);
    assert_eq!(h.sdk.calls_to("getDeployments"), vec!["getDeployments(appId)"]);
    assert!(h.sdk.calls_to("getDeploymentMetrics").is_empty());

    let messages = h.logger.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(
        messages[0],
        "Successfully added the \"a\" app, along with the following default deployments:"
    );
    assert!(messages[1].contains("Production"));
    assert!(messages[1].contains("Deployment Key"));
    assert_eq!(h.confirmations(), 0);
}

#[tokio::test]
async fn test_app_add_logs_nothing_when_listing_fails() {
    let h = Harness::with_sdk(SdkStub { fail_deployment_listing: true, ..Default::default() }, true);

    let err = h
        .executor
        .execute(Command::AppAdd { app_name: "a".to_string() })
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Service unavailable");
    assert_eq!(h.sdk.calls_to("addApp"), vec!["addApp(a)"]);
    assert!(h.logger.messages().is_empty());
}

#[tokio::test]
async fn test_app_list_lists_app_names_and_deployments() {
    let h = Harness::new(true);

    h.executor.execute(Command::AppList { format: OutputFormat::Json }).await.unwrap();

    let messages = h.logger.messages();
    assert_eq!(messages.len(), 1);
    let expected = json!([
        { "name": "a", "deployments": ["Production", "Staging"] },
        { "name": "b", "deployments": ["Production", "Staging"] }
    ]);
    assert_json_describes_object(&messages[0], &expected);
    assert_eq!(h.sdk.calls_to("getDeployments"), vec!["getDeployments(1)", "getDeployments(2)"]);
}

#[tokio::test]
async fn test_app_remove_removes_app() {
    let h = Harness::new(true);

    h.executor.execute(Command::AppRemove { app_name: "a".to_string() }).await.unwrap();

    assert_eq!(h.sdk.calls_to("removeApp"), vec!["removeApp(1)"]);
    assert_eq!(h.logger.messages(), vec!["Successfully removed the \"a\" app."]);
    assert_eq!(h.confirmations(), 1);
}

#[tokio::test]
async fn test_app_remove_does_not_remove_app_if_cancelled() {
    let h = Harness::new(false);

    h.executor.execute(Command::AppRemove { app_name: "a".to_string() }).await.unwrap();

    assert!(h.sdk.calls_to("removeApp").is_empty());
    assert_eq!(h.logger.messages(), vec!["App removal cancelled."]);
}

#[tokio::test]
async fn test_app_remove_unknown_app_fails_without_prompt() {
    let h = Harness::new(true);

    let err = h
        .executor
        .execute(Command::AppRemove { app_name: "A".to_string() })
        .await
        .unwrap_err();

    assert!(matches!(err, HotloadError::NotFound(_)));
    assert_eq!(err.to_string(), "App \"A\" does not exist.");
    assert_eq!(h.confirmations(), 0);
    assert!(h.sdk.calls_to("removeApp").is_empty());
    assert!(h.logger.messages().is_empty());
}

#[tokio::test]
async fn test_remote_failure_propagates_without_output() {
    let h = Harness::with_sdk(SdkStub { fail_removals: true, ..Default::default() }, true);

    let err = h
        .executor
        .execute(Command::AppRemove { app_name: "a".to_string() })
        .await
        .unwrap_err();

    assert!(matches!(err, HotloadError::Remote(_)));
    assert_eq!(err.to_string(), "Service unavailable");
    assert_eq!(h.sdk.calls_to("removeApp").len(), 1);
    assert!(h.logger.messages().is_empty());
}

#[tokio::test]
async fn test_app_rename_renames_app() {
    let h = Harness::new(true);

    h.executor
        .execute(Command::AppRename { current_app_name: "a".to_string(), new_app_name: "c".to_string() })
        .await
        .unwrap();

    assert_eq!(h.sdk.calls_to("updateApp"), vec!["updateApp(1, c)"]);
    assert_eq!(h.logger.messages(), vec!["Successfully renamed the \"a\" app to \"c\"."]);
    assert_eq!(h.confirmations(), 0);
}

#[tokio::test]
async fn test_app_transfer_gated_by_confirmation() {
    let declined = Harness::new(false);
    declined
        .executor
        .execute(Command::AppTransfer { app_name: "a".to_string(), email: "b@b.com".to_string() })
        .await
        .unwrap();
    assert!(declined.sdk.calls_to("transferApp").is_empty());
    assert_eq!(declined.logger.messages(), vec!["App transfer cancelled."]);

    let accepted = Harness::new(true);
    accepted
        .executor
        .execute(Command::AppTransfer { app_name: "a".to_string(), email: "b@b.com".to_string() })
        .await
        .unwrap();
    assert_eq!(accepted.sdk.calls_to("transferApp"), vec!["transferApp(1, b@b.com)"]);
    assert_eq!(
        accepted.logger.messages(),
        vec!["Successfully transferred the ownership of app \"a\" to the account with email \"b@b.com\"."]
    );
}

#[tokio::test]
async fn test_deployment_add_reports_deployment_key() {
    let h = Harness::new(true);

    h.executor
        .execute(Command::DeploymentAdd { app_name: "a".to_string(), deployment_name: "b".to_string() })
        .await
        .unwrap();

    assert_eq!(h.sdk.calls_to("addDeployment"), vec!["addDeployment(1, b)"]);
    assert_eq!(h.sdk.calls_to("getDeploymentKeys"), vec!["getDeploymentKeys(1, deploymentId)"]);
    assert_eq!(
        h.logger.messages(),
        vec!["Successfully added the \"b\" deployment with key \"6\" to the \"a\" app."]
    );
}

#[tokio::test]
async fn test_deployment_list_lists_keys_and_package_information() {
    let h = Harness::new(true);

    h.executor
        .execute(Command::DeploymentList {
            app_name: "a".to_string(),
            format: OutputFormat::Json,
            display_keys: true,
        })
        .await
        .unwrap();

    let messages = h.logger.messages();
    assert_eq!(messages.len(), 1);
    let expected = json!([
        {
            "name": "Production",
            "deploymentKey": "6"
        },
        {
            "name": "Staging",
            "package": {
                "appVersion": "1.0.0",
                "description": "fgh",
                "label": "v2",
                "packageHash": "jkl",
                "isMandatory": true,
                "size": 10,
                "blobUrl": "http://mno.pqr",
                "uploadTime": 1000,
                "metrics": {
                    "active": 123,
                    "downloaded": 321,
                    "failed": 789,
                    "installed": 456
                }
            },
            "deploymentKey": "6"
        }
    ]);
    assert_json_describes_object(&messages[0], &expected);

    // Metrics are only fetched for deployments that carry a package
    assert_eq!(h.sdk.calls_to("getDeploymentMetrics"), vec!["getDeploymentMetrics(1, 4)"]);
}

#[tokio::test]
async fn test_deployment_list_hides_keys_unless_requested() {
    let h = Harness::new(true);

    h.executor
        .execute(Command::DeploymentList {
            app_name: "a".to_string(),
            format: OutputFormat::Json,
            display_keys: false,
        })
        .await
        .unwrap();

    assert!(!h.logger.messages()[0].contains("deploymentKey"));
    assert!(h.sdk.calls_to("getDeploymentKeys").is_empty());
}

#[tokio::test]
async fn test_deployment_remove_removes_deployment() {
    let h = Harness::new(true);

    h.executor
        .execute(Command::DeploymentRemove { app_name: "a".to_string(), deployment_name: "Staging".to_string() })
        .await
        .unwrap();

    assert_eq!(h.sdk.calls_to("removeDeployment"), vec!["removeDeployment(1, 4)"]);
    assert_eq!(
        h.logger.messages(),
        vec!["Successfully removed the \"Staging\" deployment from the \"a\" app."]
    );
}

#[tokio::test]
async fn test_deployment_remove_does_not_remove_deployment_if_cancelled() {
    let h = Harness::new(false);

    h.executor
        .execute(Command::DeploymentRemove { app_name: "a".to_string(), deployment_name: "Staging".to_string() })
        .await
        .unwrap();

    assert!(h.sdk.calls_to("removeDeployment").is_empty());
    assert_eq!(h.logger.messages(), vec!["Deployment removal cancelled."]);
}

#[tokio::test]
async fn test_deployment_remove_unknown_deployment() {
    let h = Harness::new(true);

    let err = h
        .executor
        .execute(Command::DeploymentRemove { app_name: "a".to_string(), deployment_name: "staging".to_string() })
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Deployment \"staging\" does not exist.");
    assert_eq!(h.confirmations(), 0);
}

#[tokio::test]
async fn test_deployment_rename_renames_deployment() {
    let h = Harness::new(true);

    h.executor
        .execute(Command::DeploymentRename {
            app_name: "a".to_string(),
            current_deployment_name: "Staging".to_string(),
            new_deployment_name: "c".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(h.sdk.calls_to("updateDeployment"), vec!["updateDeployment(1, 4, c)"]);
    assert_eq!(
        h.logger.messages(),
        vec!["Successfully renamed the \"Staging\" deployment to \"c\" for the \"a\" app."]
    );
}

#[tokio::test]
async fn test_deployment_history_lists_package_history_with_metrics() {
    let h = Harness::new(true);

    h.executor
        .execute(Command::DeploymentHistory {
            app_name: "a".to_string(),
            deployment_name: "Staging".to_string(),
            format: OutputFormat::Json,
            display_author: false,
        })
        .await
        .unwrap();

    assert_eq!(h.sdk.calls_to("getPackageHistory"), vec!["getPackageHistory(1, 4)"]);
    let messages = h.logger.messages();
    assert_eq!(messages.len(), 1);

    let expected = json!([
        {
            "description": null,
            "appVersion": "1.0.0",
            "isMandatory": false,
            "packageHash": "463acc7d06adc9c46233481d87d9e8264b3e9ffe60fe98d721e6974209dc71a0",
            "blobUrl": "https://fakeblobstorage.net/storagev2/blobid1",
            "uploadTime": 1447113596270i64,
            "size": 1,
            "label": "v1",
            "metrics": {
                "active": 789,
                "downloaded": 456,
                "failed": 654,
                "installed": 987
            }
        },
        {
            "description": "New update - this update does a whole bunch of things, including testing linewrapping",
            "appVersion": "1.0.1",
            "isMandatory": false,
            "packageHash": "463acc7d06adc9c46233481d87d9e8264b3e9ffe60fe98d721e6974209dc71a0",
            "blobUrl": "https://fakeblobstorage.net/storagev2/blobid2",
            "uploadTime": 1447118476669i64,
            "size": 2,
            "label": "v2",
            "metrics": {
                "active": 123,
                "downloaded": 321,
                "failed": 789,
                "installed": 456
            }
        }
    ]);
    assert_json_describes_object(&messages[0], &expected);
}

#[tokio::test]
async fn test_deployment_history_table_shows_author_column() {
    let h = Harness::new(true);

    h.executor
        .execute(Command::DeploymentHistory {
            app_name: "a".to_string(),
            deployment_name: "Staging".to_string(),
            format: OutputFormat::Table,
            display_author: true,
        })
        .await
        .unwrap();

    let table = &h.logger.messages()[0];
    assert!(table.contains("Released By"));
    assert!(table.contains("v1"));
    assert!(table.contains("Active: 789"));
}

async fn assert_release_rejected(package: &str) {
    let h = Harness::new(true);

    let err = h
        .executor
        .execute(Command::Release {
            app_name: "a".to_string(),
            deployment_name: "Staging".to_string(),
            package: package.to_string(),
            app_store_version: "1.0.0".to_string(),
            description: Some("test releasing archive".to_string()),
            mandatory: false,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, HotloadError::Validation(_)));
    assert_eq!(err.to_string(), RELEASE_FAILED_ERROR_MESSAGE);
    assert!(h.sdk.calls().is_empty());
    assert!(h.packager.staged.lock().unwrap().is_empty());
    assert!(h.logger.messages().is_empty());
}

#[tokio::test]
async fn test_release_rejects_zip_file() {
    assert_release_rejected("/fake/path/test/file.zip").await;
}

#[tokio::test]
async fn test_release_rejects_ipa_file() {
    assert_release_rejected("/fake/path/test/file.ipa").await;
}

#[tokio::test]
async fn test_release_rejects_apk_file() {
    assert_release_rejected("/fake/path/test/file.apk").await;
}

#[tokio::test]
async fn test_release_rejects_upper_case_extension() {
    assert_release_rejected("/fake/path/test/FILE.APK").await;
}

#[tokio::test]
async fn test_release_uploads_staged_content() {
    let h = Harness::new(false);

    h.executor
        .execute(Command::Release {
            app_name: "a".to_string(),
            deployment_name: "Staging".to_string(),
            package: "/platforms/ios/www".to_string(),
            app_store_version: "1.0.0".to_string(),
            description: None,
            mandatory: true,
        })
        .await
        .unwrap();

    assert_eq!(*h.packager.staged.lock().unwrap(), vec![PathBuf::from("/platforms/ios/www")]);
    assert_eq!(h.sdk.calls_to("release"), vec!["release(1, 4, /platforms/ios/www)"]);
    assert_eq!(h.confirmations(), 0);
    assert_eq!(
        h.logger.messages(),
        vec!["Successfully released an update containing the \"/platforms/ios/www\" directory to the \"Staging\" deployment of the \"a\" app."]
    );
}

#[tokio::test]
async fn test_access_key_add_reports_key() {
    let h = Harness::new(true);

    h.executor
        .execute(Command::AccessKeyAdd { description: Some("CI".to_string()) })
        .await
        .unwrap();

    assert_eq!(h.sdk.calls_to("addAccessKey").len(), 1);
    assert_eq!(h.logger.messages(), vec!["Successfully created a new access key \"CI\": key123"]);
}

#[tokio::test]
async fn test_access_key_add_without_description() {
    let h = Harness::new(true);

    h.executor
        .execute(Command::AccessKeyAdd { description: None })
        .await
        .unwrap();

    assert_eq!(h.logger.messages(), vec!["Successfully created a new access key: key123"]);
}

#[tokio::test]
async fn test_access_key_list_json() {
    let h = Harness::new(true);

    h.executor.execute(Command::AccessKeyList { format: OutputFormat::Json }).await.unwrap();

    let expected = json!([
        { "id": "7", "name": "8", "createdTime": 0, "createdBy": "host", "description": "Test Description" }
    ]);
    assert_json_describes_object(&h.logger.messages()[0], &expected);
}

#[tokio::test]
async fn test_access_key_remove_resolves_id() {
    let accepted = Harness::new(true);
    accepted
        .executor
        .execute(Command::AccessKeyRemove { access_key: "8".to_string() })
        .await
        .unwrap();
    assert_eq!(accepted.sdk.calls_to("removeAccessKey"), vec!["removeAccessKey(7)"]);
    assert_eq!(accepted.logger.messages(), vec!["Successfully removed the \"8\" access key."]);

    let declined = Harness::new(false);
    declined
        .executor
        .execute(Command::AccessKeyRemove { access_key: "8".to_string() })
        .await
        .unwrap();
    assert!(declined.sdk.calls_to("removeAccessKey").is_empty());
    assert_eq!(declined.logger.messages(), vec!["Access key removal cancelled."]);
}

#[tokio::test]
async fn test_collaborator_commands() {
    let h = Harness::new(true);

    h.executor
        .execute(Command::CollaboratorAdd { app_name: "a".to_string(), email: "b@b.com".to_string() })
        .await
        .unwrap();
    h.executor
        .execute(Command::CollaboratorList { app_name: "a".to_string(), format: OutputFormat::Json })
        .await
        .unwrap();

    assert_eq!(h.sdk.calls_to("addCollaborator"), vec!["addCollaborator(a, b@b.com)"]);
    assert_eq!(h.sdk.calls_to("getCollaboratorsList"), vec!["getCollaboratorsList(1)"]);

    let messages = h.logger.messages();
    assert_eq!(messages[0], "Successfully added \"b@b.com\" as a collaborator to the app \"a\".");
    let expected = json!({
        "a@a.com": { "permission": "Owner", "isCurrentAccount": true },
        "b@b.com": { "permission": "Collaborator", "isCurrentAccount": false }
    });
    assert_json_describes_object(&messages[1], &expected);
}

#[tokio::test]
async fn test_collaborator_remove_cancelled() {
    let h = Harness::new(false);

    h.executor
        .execute(Command::CollaboratorRemove { app_name: "a".to_string(), email: "b@b.com".to_string() })
        .await
        .unwrap();

    assert!(h.sdk.calls_to("removeCollaborator").is_empty());
    assert_eq!(h.logger.messages(), vec!["Collaborator removal cancelled."]);
}

#[tokio::test]
async fn test_non_destructive_commands_never_prompt() {
    let h = Harness::new(false);

    let commands = vec![
        Command::AppList { format: OutputFormat::Table },
        Command::AppRename { current_app_name: "a".to_string(), new_app_name: "z".to_string() },
        Command::DeploymentAdd { app_name: "a".to_string(), deployment_name: "QA".to_string() },
        Command::DeploymentList { app_name: "a".to_string(), format: OutputFormat::Table, display_keys: true },
        Command::DeploymentHistory {
            app_name: "a".to_string(),
            deployment_name: "Staging".to_string(),
            format: OutputFormat::Table,
            display_author: false,
        },
    ];
    let count = commands.len();
    for command in commands {
        h.executor.execute(command).await.unwrap();
    }

    assert_eq!(h.confirmations(), 0);
    assert_eq!(h.logger.messages().len(), count);
}
