use std::process::Command;
use std::str;

/// CLI interface tests
#[cfg(test)]
mod cli_tests {
    use super::*;

    fn hotload() -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_hotload"));
        // Keep the user's configuration out of the run
        command.env("HOME", std::env::temp_dir());
        command
    }

    #[test]
    fn test_cli_help() {
        let output = hotload()
            .arg("--help")
            .output()
            .expect("Failed to execute command");

        let stdout = str::from_utf8(&output.stdout).expect("Invalid UTF-8");

        assert!(output.status.success());
        assert!(stdout.contains("Usage:"));
        assert!(stdout.contains("Commands:"));
        assert!(stdout.contains("app"));
        assert!(stdout.contains("deployment"));
        assert!(stdout.contains("release"));
        assert!(stdout.contains("access-key"));
        assert!(stdout.contains("collaborator"));
    }

    #[test]
    fn test_cli_version() {
        let output = hotload()
            .arg("--version")
            .output()
            .expect("Failed to execute command");

        let stdout = str::from_utf8(&output.stdout).expect("Invalid UTF-8");
        assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_cli_deployment_help() {
        let output = hotload()
            .args(["deployment", "--help"])
            .output()
            .expect("Failed to execute command");

        let stdout = str::from_utf8(&output.stdout).expect("Invalid UTF-8");
        assert!(stdout.contains("history"));
        assert!(stdout.contains("rename"));
    }

    #[test]
    fn test_cli_invalid_command() {
        let output = hotload()
            .arg("invalid-command")
            .output()
            .expect("Failed to execute command");

        assert!(!output.status.success());
    }

    #[test]
    fn test_cli_invalid_format() {
        let output = hotload()
            .args(["app", "ls", "--format", "yaml"])
            .output()
            .expect("Failed to execute command");

        let stderr = str::from_utf8(&output.stderr).expect("Invalid UTF-8");
        assert!(!output.status.success());
        assert!(stderr.contains("invalid value 'yaml'"));
    }

    #[test]
    fn test_cli_release_archive_rejected_offline() {
        let output = hotload()
            .args(["-q", "release", "a", "/fake/path/test/file.zip", "1.0.0"])
            .output()
            .expect("Failed to execute command");

        let stdout = str::from_utf8(&output.stdout).expect("Invalid UTF-8");
        let stderr = str::from_utf8(&output.stderr).expect("Invalid UTF-8");

        assert_eq!(output.status.code(), Some(1));
        assert!(stdout.is_empty());
        assert_eq!(
            stderr.trim_end(),
            "Error: It is unnecessary to package releases in a .zip or binary file. Please specify the direct path to the update content's directory (e.g. /platforms/ios/www) or file (e.g. main.jsbundle)."
        );
    }
}
