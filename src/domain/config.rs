use serde::{Deserialize, Serialize};

/// Hotload configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotloadConfig {
    /// Management service settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Release packaging settings
    #[serde(default)]
    pub release: ReleaseConfig,
    /// Default log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Management service connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the management service
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Access key sent as a bearer token
    #[serde(default)]
    pub access_key: Option<String>,
    /// Request timeout in milliseconds
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

/// Release packaging settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReleaseConfig {
    /// Shell command that stages update content; `{output}` is replaced
    /// with the temporary release folder
    #[serde(default)]
    pub packaging_command: Option<String>,
    /// Directory the packaging command runs in
    #[serde(default)]
    pub app_directory: Option<String>,
}

/// Partial configuration read from a single file; unset keys fall through
/// to the layer underneath
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigOverlay {
    #[serde(default)]
    pub server: Option<ServerOverlay>,
    #[serde(default)]
    pub release: Option<ReleaseConfig>,
    #[serde(default)]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerOverlay {
    pub server_url: Option<String>,
    pub access_key: Option<String>,
    pub timeout_ms: Option<u64>,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_server_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout() -> u64 {
    30000
}

impl Default for HotloadConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            release: ReleaseConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            access_key: None,
            timeout_ms: default_timeout(),
        }
    }
}

impl HotloadConfig {
    /// Apply the keys set in `overlay` on top of this configuration
    pub fn merge(&mut self, overlay: ConfigOverlay) {
        if let Some(server) = overlay.server {
            if let Some(url) = server.server_url {
                self.server.server_url = url;
            }
            if let Some(key) = server.access_key {
                self.server.access_key = Some(key);
            }
            if let Some(timeout) = server.timeout_ms {
                self.server.timeout_ms = timeout;
            }
        }
        if let Some(release) = overlay.release {
            if release.packaging_command.is_some() {
                self.release.packaging_command = release.packaging_command;
            }
            if release.app_directory.is_some() {
                self.release.app_directory = release.app_directory;
            }
        }
        if let Some(level) = overlay.log_level {
            self.log_level = level;
        }
    }
}
