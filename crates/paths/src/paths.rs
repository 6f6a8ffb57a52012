//! Path context for runtime environment detection and tool-specific paths.

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Identifies the runtime environment where the application is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnvironment {
    /// Running via `cargo run` or from a `target/` directory
    Development,
    /// Running as an installed binary
    Production,
}

/// Directory layout of one tool: `<base>/<vendor>/<app_id>/{config,logs}`.
#[derive(Debug, Clone)]
pub struct PathContext {
    environment: RuntimeEnvironment,
    base_path: Arc<Path>,
    /// Vendor identifier (e.g., "voip_tools")
    vendor: String,
    /// Application identifier (e.g., "cnf_wizard")
    app_id: &'static str,
}

impl PathContext {
    /// Creates a new PathContext with automatic environment detection.
    pub fn new(vendor: impl Into<String>, app_id: &'static str) -> Self {
        let environment = Self::detect_environment();
        let base_path = Self::determine_base_path(environment);

        Self {
            environment,
            base_path: base_path.into(),
            vendor: vendor.into(),
            app_id,
        }
    }

    /// Creates a PathContext with an explicit base path (useful for testing).
    pub fn with_base_path(
        base_path: impl Into<PathBuf>,
        vendor: impl Into<String>,
        app_id: &'static str,
    ) -> Self {
        Self {
            environment: Self::detect_environment(),
            base_path: base_path.into().into(),
            vendor: vendor.into(),
            app_id,
        }
    }

    fn detect_environment() -> RuntimeEnvironment {
        if let Ok(exe_path) = std::env::current_exe() {
            if exe_path.components().any(|c| c.as_os_str() == "target") {
                return RuntimeEnvironment::Development;
            }
        }

        if std::env::var("CARGO").is_ok() || std::env::var("CARGO_MANIFEST_DIR").is_ok() {
            return RuntimeEnvironment::Development;
        }

        RuntimeEnvironment::Production
    }

    fn determine_base_path(environment: RuntimeEnvironment) -> PathBuf {
        match environment {
            RuntimeEnvironment::Development => std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(".out"),
            // XDG_DATA_HOME, Application Support or LocalAppData
            RuntimeEnvironment::Production => {
                dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."))
            }
        }
    }

    pub fn environment(&self) -> RuntimeEnvironment {
        self.environment
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn app_id(&self) -> &str {
        self.app_id
    }

    /// Returns the application root: `<base>/<vendor>/<app_id>`
    pub fn app_root(&self) -> PathBuf {
        self.base_path.join(&self.vendor).join(self.app_id)
    }

    /// Returns the configuration directory: `<root>/config/`
    pub fn config_dir(&self) -> PathBuf {
        self.app_root().join("config")
    }

    /// Returns a configuration file path: `<root>/config/<name>`
    pub fn config_file(&self, name: &str) -> PathBuf {
        self.config_dir().join(name)
    }

    /// Returns the logs directory path: `<root>/logs/`
    pub fn logs_dir(&self) -> PathBuf {
        self.app_root().join("logs")
    }

    /// Returns a log file path with timestamp: `<root>/logs/<app_id>.<timestamp>.log`
    pub fn log_file(&self, timestamp: &str) -> PathBuf {
        self.logs_dir()
            .join(format!("{}.{}.log", self.app_id, timestamp))
    }

    /// Returns a log file path with current timestamp.
    pub fn log_file_now(&self) -> PathBuf {
        let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S").to_string();
        self.log_file(&timestamp)
    }

    /// Ensures the config and log directories exist.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        for dir in [self.config_dir(), self.logs_dir()] {
            if !dir.exists() {
                std::fs::create_dir_all(&dir)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_context_structure() {
        let ctx = PathContext::with_base_path("/test/base", "voip_tools", "cnf_wizard");

        assert_eq!(ctx.vendor(), "voip_tools");
        assert_eq!(ctx.app_id(), "cnf_wizard");
        assert_eq!(
            ctx.app_root(),
            PathBuf::from("/test/base/voip_tools/cnf_wizard")
        );
    }

    #[test]
    fn test_config_paths() {
        let ctx = PathContext::with_base_path("/base", "vendor", "app");

        assert_eq!(ctx.config_dir(), PathBuf::from("/base/vendor/app/config"));
        assert_eq!(
            ctx.config_file("config.toml"),
            PathBuf::from("/base/vendor/app/config/config.toml")
        );
    }

    #[test]
    fn test_log_file_path() {
        let ctx = PathContext::with_base_path("/base", "vendor", "app");

        assert_eq!(
            ctx.log_file("20240315-120000"),
            PathBuf::from("/base/vendor/app/logs/app.20240315-120000.log")
        );
        assert!(ctx.log_file_now().starts_with(ctx.logs_dir()));
    }

    #[test]
    fn test_ensure_directories_creates_tree() {
        let tmp = std::env::temp_dir().join(format!("paths-test-{}", std::process::id()));
        let ctx = PathContext::with_base_path(&tmp, "vendor", "app");

        ctx.ensure_directories().unwrap();
        assert!(ctx.config_dir().is_dir());
        assert!(ctx.logs_dir().is_dir());

        std::fs::remove_dir_all(&tmp).unwrap();
    }
}
