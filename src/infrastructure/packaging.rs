//! Release content staging through an external packaging command

use crate::core::release::Packager;
use crate::domain::config::ReleaseConfig;
use crate::domain::error::{HotloadError, HotloadResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info};

/// Runs the configured packaging command into a fresh release folder.
///
/// Without a configured command the content path is uploaded unchanged.
#[derive(Debug, Clone)]
pub struct CommandPackager {
    command: Option<String>,
    app_directory: Option<PathBuf>,
    /// True when the process was started inside the app directory
    in_app_directory: bool,
    release_folder: PathBuf,
}

impl CommandPackager {
    pub fn from_config(config: &ReleaseConfig) -> HotloadResult<Self> {
        let app_directory = config.app_directory.as_ref().map(PathBuf::from);
        let current_dir = std::env::current_dir()?;
        let in_app_directory = match &app_directory {
            Some(dir) => same_directory(dir, &current_dir),
            None => true,
        };

        Ok(Self {
            command: config.packaging_command.clone(),
            app_directory,
            in_app_directory,
            release_folder: std::env::temp_dir().join(format!("hotload-release-{}", std::process::id())),
        })
    }

    /// Override where staged content is written
    pub fn with_release_folder(mut self, release_folder: PathBuf) -> Self {
        self.release_folder = release_folder;
        self
    }

    pub fn in_app_directory(&self) -> bool {
        self.in_app_directory
    }

    fn working_directory(&self) -> Option<&Path> {
        if self.in_app_directory {
            None
        } else {
            self.app_directory.as_deref()
        }
    }

    async fn create_empty_release_folder(&self) -> HotloadResult<()> {
        if tokio::fs::metadata(&self.release_folder).await.is_ok() {
            tokio::fs::remove_dir_all(&self.release_folder).await?;
        }
        tokio::fs::create_dir_all(&self.release_folder).await?;
        Ok(())
    }
}

fn same_directory(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Substitute `{content}` and `{output}` placeholders
fn render_command(template: &str, content: &Path, output: &Path) -> String {
    template
        .replace("{content}", &content.to_string_lossy())
        .replace("{output}", &output.to_string_lossy())
}

#[async_trait]
impl Packager for CommandPackager {
    async fn stage(&self, content: &Path) -> HotloadResult<PathBuf> {
        let Some(template) = &self.command else {
            return Ok(content.to_path_buf());
        };

        self.create_empty_release_folder().await?;
        let command_line = render_command(template, content, &self.release_folder);
        info!(command = %command_line, "Packaging release content");

        let mut command = Command::new("sh");
        command
            .args(["-c", command_line.as_str()])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = self.working_directory() {
            command.current_dir(dir);
        }

        let mut child = command
            .spawn()
            .map_err(|e| HotloadError::Packaging(format!("Failed to spawn packaging command: {}", e)))?;

        let stdout = child.stdout.take();
        let stdout_task = tokio::spawn(async move {
            if let Some(stdout) = stdout {
                let mut lines = BufReader::new(stdout).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    debug!(stream = "stdout", "{}", line);
                }
            }
        });

        let stderr = child.stderr.take();
        let stderr_task = tokio::spawn(async move {
            let mut collected = Vec::new();
            if let Some(stderr) = stderr {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    debug!(stream = "stderr", "{}", line);
                    collected.push(line);
                }
            }
            collected
        });

        let status = child.wait().await?;
        let _ = stdout_task.await;
        let stderr_lines = stderr_task.await.unwrap_or_default();

        if !status.success() {
            let detail = stderr_lines.last().cloned().unwrap_or_default();
            return Err(HotloadError::Packaging(format!(
                "Packaging command exited with {}{}{}",
                status,
                if detail.is_empty() { "" } else { ": " },
                detail
            )));
        }

        Ok(self.release_folder.clone())
    }
}
